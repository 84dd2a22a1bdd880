//! Typed per-component prop bags.
//!
//! Every registered component gets its own statically defined props
//! struct, and `WidgetProps` tags which one a widget carries. Leaf chart
//! data (histogram buckets, treemap cells, …) stays opaque JSON — it is
//! passed through to the renderer untouched — but the *set* of fields a
//! component receives is fixed here and validated at create time rather
//! than trusting renderer tolerance.

use crate::error::ShapeError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ─── Per-component prop structs ──────────────────────────────────────────

/// Full purchase-frequency analysis board (five linked charts).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseFrequencyBoardProps {
    pub frequency_histogram: Value,
    pub interval_heatmap: Value,
    pub segment_quadrant: Value,
    pub regularity_chart: Value,
    pub value_treemap: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrequencyHistogramProps {
    pub frequency_histogram: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerBehaviourBoardProps {
    pub patterns: Value,
    pub categories: Value,
    pub channels: Value,
    pub kpis: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelBreakdownProps {
    pub channels: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChurnRiskMatrixProps {
    pub risk_matrix: Value,
    pub drivers: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesPerformanceBoardProps {
    pub trend_lines: Value,
    pub regional_breakdown: Value,
    pub top_products: Value,
    pub kpis: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesTrendProps {
    pub trend_lines: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemandForecastProps {
    pub forecast_series: Value,
    pub confidence_bands: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryTreemapProps {
    pub stock_treemap: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialOverviewBoardProps {
    pub revenue_waterfall: Value,
    pub expense_sunburst: Value,
    pub margin_trend: Value,
    pub kpis: Value,
}

// ─── Tagged union ────────────────────────────────────────────────────────

/// Props for one widget, tagged by component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum WidgetProps {
    PurchaseFrequencyBoard(PurchaseFrequencyBoardProps),
    FrequencyHistogram(FrequencyHistogramProps),
    CustomerBehaviourBoard(CustomerBehaviourBoardProps),
    ChannelBreakdown(ChannelBreakdownProps),
    ChurnRiskMatrix(ChurnRiskMatrixProps),
    SalesPerformanceBoard(SalesPerformanceBoardProps),
    SalesTrend(SalesTrendProps),
    DemandForecast(DemandForecastProps),
    InventoryTreemap(InventoryTreemapProps),
    FinancialOverviewBoard(FinancialOverviewBoardProps),
}

macro_rules! impl_props_from {
    ($($variant:ident($ty:ty)),+ $(,)?) => {
        $(
            impl From<$ty> for WidgetProps {
                fn from(p: $ty) -> Self {
                    WidgetProps::$variant(p)
                }
            }
        )+
    };
}

impl_props_from! {
    PurchaseFrequencyBoard(PurchaseFrequencyBoardProps),
    FrequencyHistogram(FrequencyHistogramProps),
    CustomerBehaviourBoard(CustomerBehaviourBoardProps),
    ChannelBreakdown(ChannelBreakdownProps),
    ChurnRiskMatrix(ChurnRiskMatrixProps),
    SalesPerformanceBoard(SalesPerformanceBoardProps),
    SalesTrend(SalesTrendProps),
    DemandForecast(DemandForecastProps),
    InventoryTreemap(InventoryTreemapProps),
    FinancialOverviewBoard(FinancialOverviewBoardProps),
}

/// Decode a shaped JSON object into the props variant for `T`.
/// Used as the `decode` fn pointer in registry entries.
pub fn decode_as<T>(value: Value) -> Result<WidgetProps, ShapeError>
where
    T: DeserializeOwned + Into<WidgetProps>,
{
    Ok(serde_json::from_value::<T>(value)?.into())
}

fn merge_into<T>(current: &T, patch: &Map<String, Value>) -> Result<T, ShapeError>
where
    T: Serialize + DeserializeOwned,
{
    let mut value = serde_json::to_value(current)?;
    if let Value::Object(map) = &mut value {
        for (key, val) in patch {
            map.insert(key.clone(), val.clone());
        }
    }
    Ok(serde_json::from_value(value)?)
}

impl WidgetProps {
    /// Shallow merge: overlay `patch` (wire-format keys, camelCase) onto
    /// the current props and re-decode into the same variant. Keys the
    /// variant does not define are dropped.
    pub fn merged(&self, patch: &Map<String, Value>) -> Result<WidgetProps, ShapeError> {
        Ok(match self {
            Self::PurchaseFrequencyBoard(p) => Self::PurchaseFrequencyBoard(merge_into(p, patch)?),
            Self::FrequencyHistogram(p) => Self::FrequencyHistogram(merge_into(p, patch)?),
            Self::CustomerBehaviourBoard(p) => Self::CustomerBehaviourBoard(merge_into(p, patch)?),
            Self::ChannelBreakdown(p) => Self::ChannelBreakdown(merge_into(p, patch)?),
            Self::ChurnRiskMatrix(p) => Self::ChurnRiskMatrix(merge_into(p, patch)?),
            Self::SalesPerformanceBoard(p) => Self::SalesPerformanceBoard(merge_into(p, patch)?),
            Self::SalesTrend(p) => Self::SalesTrend(merge_into(p, patch)?),
            Self::DemandForecast(p) => Self::DemandForecast(merge_into(p, patch)?),
            Self::InventoryTreemap(p) => Self::InventoryTreemap(merge_into(p, patch)?),
            Self::FinancialOverviewBoard(p) => Self::FinancialOverviewBoard(merge_into(p, patch)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn decode_histogram_props() {
        let props = decode_as::<FrequencyHistogramProps>(json!({
            "frequencyHistogram": [1, 2, 3]
        }))
        .unwrap();
        match props {
            WidgetProps::FrequencyHistogram(p) => {
                assert_eq!(p.frequency_histogram, json!([1, 2, 3]));
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn decode_rejects_missing_field() {
        let err = decode_as::<ChurnRiskMatrixProps>(json!({ "riskMatrix": {} })).unwrap_err();
        assert!(matches!(err, ShapeError::Decode(_)));
    }

    #[test]
    fn merged_overlays_patch_and_keeps_variant() {
        let props = WidgetProps::SalesTrend(SalesTrendProps {
            trend_lines: json!([10, 20]),
        });
        let patch = json!({ "trendLines": [30] });
        let Value::Object(patch) = patch else {
            unreachable!()
        };
        let merged = props.merged(&patch).unwrap();
        match merged {
            WidgetProps::SalesTrend(p) => assert_eq!(p.trend_lines, json!([30])),
            other => panic!("variant changed: {other:?}"),
        }
    }

    #[test]
    fn merged_drops_unknown_keys() {
        let props = WidgetProps::ChannelBreakdown(ChannelBreakdownProps {
            channels: json!({}),
        });
        let patch = json!({ "bogus": true });
        let Value::Object(patch) = patch else {
            unreachable!()
        };
        // Unknown keys are ignored by the typed decode.
        let merged = props.merged(&patch).unwrap();
        assert!(matches!(merged, WidgetProps::ChannelBreakdown(_)));
    }
}
