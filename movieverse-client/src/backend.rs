use async_trait::async_trait;
use movieverse_model::{MovieId, Payload};

use crate::error::ApiError;

/// Operations offered by the movie backend.
///
/// Every call returns the classified response [`Payload`]; an error envelope
/// on a successful status is a `Payload::Error`, not an `Err`.
#[async_trait]
pub trait MovieBackend: Send + Sync {
    /// `GET /popular`
    async fn popular(&self) -> Result<Payload, ApiError>;

    /// `GET /movie/{id}`
    async fn movie(&self, id: MovieId) -> Result<Payload, ApiError>;

    /// `POST /recommend` with `{"movie": title}`
    async fn recommend(&self, title: &str) -> Result<Payload, ApiError>;

    /// `GET /random`
    async fn random(&self) -> Result<Payload, ApiError>;
}
