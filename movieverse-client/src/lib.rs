//! HTTP access to the MovieVerse recommendation backend.
#![allow(missing_docs)]

pub mod api_client;
pub mod backend;
pub mod config;
pub mod error;
pub mod routes;

pub use api_client::ApiClient;
pub use backend::MovieBackend;
pub use config::{ClientConfig, ConfigOverrides, FileConfig};
pub use error::{ApiError, ConfigError};
