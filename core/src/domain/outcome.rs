use crate::prelude::ClientResult;
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Message shown for every prediction failure the server did not explain.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Visible state of the prediction flow.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PredictionOutcome {
    #[default]
    Idle,
    Pending,
    Succeeded(f64),
    Failed(String),
}

impl PredictionOutcome {
    pub fn is_pending(&self) -> bool {
        matches!(self, PredictionOutcome::Pending)
    }

    pub fn generic_failure() -> Self {
        PredictionOutcome::Failed(GENERIC_FAILURE.to_string())
    }
}

/// Visible state of the chart browser. Failures carry no message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum VisualizationOutcome {
    #[default]
    Idle,
    Pending,
    Loaded(ChartImage),
    Failed,
}

impl VisualizationOutcome {
    pub fn is_pending(&self) -> bool {
        matches!(self, VisualizationOutcome::Pending)
    }

    pub fn image(&self) -> Option<&ChartImage> {
        match self {
            VisualizationOutcome::Loaded(image) => Some(image),
            _ => None,
        }
    }
}

/// Base64-encoded PNG returned by the chart service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartImage {
    encoded: String,
}

impl ChartImage {
    /// Wraps a payload, rejecting empty or undecodable text.
    pub fn from_base64(encoded: impl Into<String>) -> ClientResult<Self> {
        let encoded = encoded.into();
        if encoded.is_empty() {
            return Err(base64::DecodeError::InvalidLength(0).into());
        }
        STANDARD.decode(&encoded)?;
        Ok(Self { encoded })
    }

    pub fn as_base64(&self) -> &str {
        &self.encoded
    }

    pub fn decode(&self) -> ClientResult<Vec<u8>> {
        Ok(STANDARD.decode(&self.encoded)?)
    }

    pub fn data_uri(&self) -> String {
        format!("data:image/png;base64,{}", self.encoded)
    }
}
