pub mod error;
pub mod geom;
pub mod id;
pub mod model;
pub mod props;
pub mod registry;

pub use error::{ShapeError, UnknownComponentError};
pub use geom::{CanvasBounds, MIN_WIDGET_SIZE, Point, Size};
pub use id::WidgetId;
pub use model::{RendererKind, Widget};
pub use props::WidgetProps;
pub use registry::{RegistryEntry, TypeKey, WidgetRegistry};
