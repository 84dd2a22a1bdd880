//! Widget descriptors — the canvas state's unit of ownership.

use crate::geom::{Point, Size};
use crate::id::WidgetId;
use crate::props::WidgetProps;
use crate::registry::TypeKey;
use serde::{Deserialize, Serialize};

/// Inner padding per side between the widget box and its chart area.
pub const WIDGET_PADDING: f32 = 16.0;

/// Height of the widget header bar (title + close button).
pub const WIDGET_HEADER: f32 = 40.0;

/// The renderer capability a widget is bound to. Rendering itself is an
/// external collaborator; the orchestrator only records which renderer a
/// widget resolves to and what drawing area it gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RendererKind {
    /// Multi-chart analysis board.
    Dashboard,
    Histogram,
    Donut,
    Quadrant,
    LineChart,
    AreaChart,
    Treemap,
}

/// One spawned visualization on the canvas.
///
/// `position` and `size` are mutated only through interaction mutations;
/// `props` only through `update` (fetch completion or external override).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Widget {
    pub id: WidgetId,
    pub type_key: TypeKey,
    pub position: Point,
    pub size: Size,
    pub props: WidgetProps,
    pub renderer: RendererKind,
}

impl Widget {
    /// Drawing area handed to the renderer: the widget box minus the
    /// header bar and padding allowance.
    pub fn inner_size(&self) -> Size {
        Size {
            width: (self.size.width - 2.0 * WIDGET_PADDING).max(0.0),
            height: (self.size.height - WIDGET_HEADER - 2.0 * WIDGET_PADDING).max(0.0),
        }
    }
}
