//! Widget registry: `typeKey` → renderer capability + data shaping spec.
//!
//! The registry is the single table consulted at spawn time. Each entry
//! names the renderer the component binds to, its default box size, which
//! dataset endpoint feeds it, and which payload fields are plucked into
//! its props — so field mapping stays table-driven instead of being
//! inlined at every call site. New tools register without touching the
//! orchestration code.

use crate::error::{ShapeError, UnknownComponentError};
use crate::geom::Size;
use crate::model::RendererKind;
use crate::props::{self, WidgetProps, decode_as};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// `"tool.component"` — identifies a (tool, component) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeKey(String);

impl TypeKey {
    pub fn new(key: impl Into<String>) -> Self {
        TypeKey(key.into())
    }

    /// The tool half of the key (everything before the first `.`).
    pub fn tool(&self) -> &str {
        self.0.split_once('.').map(|(t, _)| t).unwrap_or(&self.0)
    }

    /// The component half of the key (empty when there is no `.`).
    pub fn component(&self) -> &str {
        self.0.split_once('.').map(|(_, c)| c).unwrap_or("")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeKey {
    fn from(s: &str) -> Self {
        TypeKey::new(s)
    }
}

/// Shape function decoding a shaped payload into a typed props variant.
pub type DecodeFn = fn(Value) -> Result<WidgetProps, ShapeError>;

/// Everything the orchestrator needs to spawn one component.
#[derive(Clone)]
pub struct RegistryEntry {
    pub renderer: RendererKind,
    pub default_size: Size,
    /// Route segment of the tool's dataset endpoint.
    pub tool_route: &'static str,
    /// Payload fields plucked into this component's props.
    pub required_fields: &'static [&'static str],
    pub decode: DecodeFn,
}

impl fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("renderer", &self.renderer)
            .field("default_size", &self.default_size)
            .field("tool_route", &self.tool_route)
            .field("required_fields", &self.required_fields)
            .finish_non_exhaustive()
    }
}

const DASHBOARD_SIZE: Size = Size::new(900.0, 700.0);
const CHART_SIZE: Size = Size::new(400.0, 300.0);
const WIDE_CHART_SIZE: Size = Size::new(500.0, 400.0);

/// Static lookup from type key to spawn spec.
#[derive(Debug, Clone)]
pub struct WidgetRegistry {
    entries: HashMap<TypeKey, RegistryEntry>,
}

impl Default for WidgetRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl WidgetRegistry {
    /// An empty registry (for hosts that bring their own component set).
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// The builtin component table for the analytics suite.
    pub fn builtin() -> Self {
        let mut reg = Self::empty();

        reg.register(
            "purchase-frequency.dashboard",
            RegistryEntry {
                renderer: RendererKind::Dashboard,
                default_size: DASHBOARD_SIZE,
                tool_route: "purchase-frequency",
                required_fields: &[
                    "frequencyHistogram",
                    "intervalHeatmap",
                    "segmentQuadrant",
                    "regularityChart",
                    "valueTreemap",
                ],
                decode: decode_as::<props::PurchaseFrequencyBoardProps>,
            },
        );
        reg.register(
            "purchase-frequency.histogram",
            RegistryEntry {
                renderer: RendererKind::Histogram,
                default_size: CHART_SIZE,
                tool_route: "purchase-frequency",
                required_fields: &["frequencyHistogram"],
                decode: decode_as::<props::FrequencyHistogramProps>,
            },
        );
        reg.register(
            "customer-behaviour.dashboard",
            RegistryEntry {
                renderer: RendererKind::Dashboard,
                default_size: DASHBOARD_SIZE,
                tool_route: "customer-behaviour",
                required_fields: &["patterns", "categories", "channels", "kpis"],
                decode: decode_as::<props::CustomerBehaviourBoardProps>,
            },
        );
        reg.register(
            "customer-behaviour.channels",
            RegistryEntry {
                renderer: RendererKind::Donut,
                default_size: CHART_SIZE,
                tool_route: "customer-behaviour",
                required_fields: &["channels"],
                decode: decode_as::<props::ChannelBreakdownProps>,
            },
        );
        reg.register(
            "churn-prediction.risk-matrix",
            RegistryEntry {
                renderer: RendererKind::Quadrant,
                default_size: WIDE_CHART_SIZE,
                tool_route: "churn-prediction",
                required_fields: &["riskMatrix", "drivers"],
                decode: decode_as::<props::ChurnRiskMatrixProps>,
            },
        );
        reg.register(
            "sales-performance.dashboard",
            RegistryEntry {
                renderer: RendererKind::Dashboard,
                default_size: DASHBOARD_SIZE,
                tool_route: "sales-performance",
                required_fields: &["trendLines", "regionalBreakdown", "topProducts", "kpis"],
                decode: decode_as::<props::SalesPerformanceBoardProps>,
            },
        );
        reg.register(
            "sales-performance.trend",
            RegistryEntry {
                renderer: RendererKind::LineChart,
                default_size: WIDE_CHART_SIZE,
                tool_route: "sales-performance",
                required_fields: &["trendLines"],
                decode: decode_as::<props::SalesTrendProps>,
            },
        );
        reg.register(
            "demand-forecast.forecast",
            RegistryEntry {
                renderer: RendererKind::AreaChart,
                default_size: WIDE_CHART_SIZE,
                tool_route: "demand-forecast",
                required_fields: &["forecastSeries", "confidenceBands"],
                decode: decode_as::<props::DemandForecastProps>,
            },
        );
        reg.register(
            "inventory-levels.treemap",
            RegistryEntry {
                renderer: RendererKind::Treemap,
                default_size: CHART_SIZE,
                tool_route: "inventory-levels",
                required_fields: &["stockTreemap"],
                decode: decode_as::<props::InventoryTreemapProps>,
            },
        );
        reg.register(
            "financial-overview.dashboard",
            RegistryEntry {
                renderer: RendererKind::Dashboard,
                default_size: DASHBOARD_SIZE,
                tool_route: "financial-overview",
                required_fields: &["revenueWaterfall", "expenseSunburst", "marginTrend", "kpis"],
                decode: decode_as::<props::FinancialOverviewBoardProps>,
            },
        );

        reg
    }

    /// Register (or replace) a component.
    pub fn register(&mut self, key: impl Into<TypeKey>, entry: RegistryEntry) {
        self.entries.insert(key.into(), entry);
    }

    /// Look up the spawn spec for a type key.
    pub fn resolve(&self, key: &TypeKey) -> Result<&RegistryEntry, UnknownComponentError> {
        self.entries
            .get(key)
            .ok_or_else(|| UnknownComponentError(key.as_str().to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<String> for TypeKey {
    fn from(s: String) -> Self {
        TypeKey(s)
    }
}
