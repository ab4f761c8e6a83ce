pub mod http;
pub mod wire;

pub use http::HttpBackend;
pub use wire::{chart_outcome, prediction_outcome, HealthBody};

use crate::domain::{Chart, PredictionRequest};
use crate::prelude::ClientResult;
use async_trait::async_trait;

/// Raw answer from a remote service. Interpretation happens in [`wire`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpReply {
    pub fn new(status: u16, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        Self::new(status, body.to_string().into_bytes())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Remote collaborators reached by the controllers.
///
/// An `Err` means no response arrived at all; any HTTP status is an `Ok`.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn predict(&self, request: &PredictionRequest) -> ClientResult<HttpReply>;
    async fn chart(&self, chart: Chart) -> ClientResult<HttpReply>;
    async fn health(&self) -> ClientResult<HttpReply>;
}
