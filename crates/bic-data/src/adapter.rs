//! The data fetch adapter: raw tool dataset → renderer-ready props.
//!
//! Field mapping is table-driven off the registry entry: the entry lists
//! which payload fields the component consumes and how they decode. The
//! adapter plucks exactly those fields, overlays any explicit props
//! (explicit wins on key collision), and decodes into the typed variant.
//!
//! Deliberately absent: retries, caching, and deduplication of concurrent
//! fetches for the same tool — every spawn issues an independent request.

use crate::client::DatasetClient;
use crate::config::EndpointConfig;
use crate::error::FetchError;
use bic_core::registry::RegistryEntry;
use bic_core::{ShapeError, WidgetProps};
use serde_json::{Map, Value};

#[derive(Debug, Clone)]
pub struct DatasetAdapter {
    client: DatasetClient,
}

impl DatasetAdapter {
    pub fn new(config: &EndpointConfig) -> Result<Self, FetchError> {
        Ok(Self {
            client: DatasetClient::new(config)?,
        })
    }

    pub fn with_client(client: DatasetClient) -> Self {
        Self { client }
    }

    /// Fetch and shape the props for one component spawn.
    pub async fn fetch_props(
        &self,
        entry: &RegistryEntry,
        explicit: Option<&Map<String, Value>>,
    ) -> Result<WidgetProps, FetchError> {
        let payload = self.client.dataset(entry.tool_route).await?;
        shape(entry, &payload, explicit)
    }
}

/// Pluck the entry's fields out of a raw payload and decode, with
/// explicit props overriding derived ones.
pub fn shape(
    entry: &RegistryEntry,
    payload: &Map<String, Value>,
    explicit: Option<&Map<String, Value>>,
) -> Result<WidgetProps, FetchError> {
    let mut shaped = Map::with_capacity(entry.required_fields.len());
    for &field in entry.required_fields {
        let value = payload
            .get(field)
            .ok_or(ShapeError::MissingField { field })?;
        shaped.insert(field.to_string(), value.clone());
    }
    if let Some(explicit) = explicit {
        for (key, value) in explicit {
            shaped.insert(key.clone(), value.clone());
        }
    }
    Ok((entry.decode)(Value::Object(shaped))?)
}
