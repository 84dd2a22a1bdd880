pub mod adapter;
pub mod client;
pub mod config;
pub mod error;

pub use adapter::DatasetAdapter;
pub use client::DatasetClient;
pub use config::EndpointConfig;
pub use error::FetchError;
