//! HTTP client for the per-tool dataset endpoints.
//!
//! Every tool exposes `GET {base}/api/tools/{tool}` returning
//! `{"status": "success" | "error", ...datasetFields}`. The client
//! unwraps that envelope; shaping the dataset fields into props is the
//! adapter's job.

use crate::config::EndpointConfig;
use crate::error::FetchError;
use serde_json::{Map, Value};

/// Thin wrapper over `reqwest::Client` with the endpoint base baked in.
#[derive(Debug, Clone)]
pub struct DatasetClient {
    http: reqwest::Client,
    base_url: String,
}

impl DatasetClient {
    pub fn new(config: &EndpointConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|source| FetchError::Network {
                url: config.base_url.clone(),
                source,
            })?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the raw dataset for one tool. Returns the payload object with
    /// the `status` envelope field stripped.
    pub async fn dataset(&self, tool_route: &str) -> Result<Map<String, Value>, FetchError> {
        let url = format!("{}/api/tools/{}", self.base_url, tool_route);
        log::debug!("fetching dataset from {url}");

        let net = |source: reqwest::Error| FetchError::Network {
            url: url.clone(),
            source,
        };
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(&net)?;
        let body: Value = response.json().await.map_err(&net)?;

        let Value::Object(mut payload) = body else {
            return Err(FetchError::Envelope {
                detail: "expected a JSON object",
            });
        };
        match payload.remove("status") {
            Some(Value::String(s)) if s == "success" => Ok(payload),
            Some(Value::String(s)) if s == "error" => Err(FetchError::Endpoint {
                message: payload
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("unspecified error")
                    .to_string(),
            }),
            _ => Err(FetchError::Envelope {
                detail: "missing or non-string `status` field",
            }),
        }
    }
}
