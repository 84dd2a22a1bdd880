use bic_core::ShapeError;
use thiserror::Error;

/// A dataset fetch failed. The in-progress spawn is aborted; the user may
/// retry by re-issuing the command. No retry policy is applied here.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint answered with `status: "error"`.
    #[error("dataset endpoint reported an error: {message}")]
    Endpoint { message: String },

    /// The endpoint's JSON did not carry the envelope we expect.
    #[error("dataset endpoint returned a malformed payload: {detail}")]
    Envelope { detail: &'static str },

    #[error(transparent)]
    Shape(#[from] ShapeError),
}
