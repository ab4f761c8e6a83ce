use crate::domain::FeatureField;

pub use crate::config::ClientConfig;
pub use crate::controller::{CompletionPolicy, PredictionController, VisualizationController};
pub use crate::domain::{Chart, ChartImage, CoercionPolicy, PredictionOutcome, VisualizationOutcome};
pub use crate::transport::{Backend, HttpBackend, HttpReply};

/// Common error type for the client core.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("unknown form field: {0}")]
    UnknownField(String),
    #[error("unknown chart: {0}")]
    UnknownChart(String),
    #[error("chart index {index} out of range (catalog has {len} entries)")]
    SelectionOutOfRange { index: i64, len: usize },
    #[error("{field}: `{value}` is not a number")]
    InvalidInput { field: FeatureField, value: String },
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("image payload is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("serialization failure: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("request task ended without a reply: {0}")]
    Interrupted(String),
}

pub type ClientResult<T> = Result<T, ClientError>;
