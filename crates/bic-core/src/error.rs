use thiserror::Error;

/// Registry miss for a requested type key.
///
/// Spawning aborts without adding a widget and without surfacing a user
/// message; the miss is only logged.
#[derive(Debug, Clone, Error)]
#[error("unknown component type `{0}`")]
pub struct UnknownComponentError(pub String);

/// A dataset payload could not be shaped into renderer-ready props.
#[derive(Debug, Error)]
pub enum ShapeError {
    #[error("dataset missing expected field `{field}`")]
    MissingField { field: &'static str },

    #[error("dataset field has unexpected shape: {0}")]
    Decode(#[from] serde_json::Error),
}
