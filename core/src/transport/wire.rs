//! Response bodies of the two remote services and how they map onto outcomes.

use super::HttpReply;
use crate::domain::{ChartImage, PredictionOutcome, VisualizationOutcome};
use crate::prelude::{ClientError, ClientResult};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field names of the prediction service's response bodies.
pub const PREDICTED_FIELD: &str = "Predicted_new_deaths";
pub const MESSAGE_FIELD: &str = "message";
pub const IMAGE_FIELD: &str = "image_data";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthBody {
    #[serde(default)]
    pub message: Option<String>,
}

pub fn prediction_outcome(reply: ClientResult<HttpReply>) -> PredictionOutcome {
    let reply = match reply {
        Ok(reply) => reply,
        Err(err) => {
            warn!("prediction request failed: {err}");
            return PredictionOutcome::generic_failure();
        }
    };

    let body = serde_json::from_slice::<Value>(&reply.body).unwrap_or_else(|err| {
        warn!("prediction response ({}) is not JSON: {err}", reply.status);
        Value::Null
    });

    if !reply.is_success() {
        return match body.get(MESSAGE_FIELD).and_then(Value::as_str) {
            Some(message) if !message.is_empty() => PredictionOutcome::Failed(message.to_string()),
            _ => PredictionOutcome::generic_failure(),
        };
    }

    match body.get(PREDICTED_FIELD).and_then(Value::as_f64) {
        Some(value) => PredictionOutcome::Succeeded(value),
        None => {
            warn!("prediction response is missing Predicted_new_deaths");
            PredictionOutcome::generic_failure()
        }
    }
}

pub fn chart_outcome(reply: ClientResult<HttpReply>) -> VisualizationOutcome {
    let reply = match reply {
        Ok(reply) if reply.is_success() => reply,
        Ok(reply) => {
            warn!("chart request answered with status {}", reply.status);
            return VisualizationOutcome::Failed;
        }
        Err(err) => {
            warn!("chart request failed: {err}");
            return VisualizationOutcome::Failed;
        }
    };

    let image = serde_json::from_slice::<Value>(&reply.body)
        .map_err(ClientError::from)
        .and_then(|body| {
            let encoded = body.get(IMAGE_FIELD).and_then(Value::as_str).unwrap_or_default();
            ChartImage::from_base64(encoded)
        });
    match image {
        Ok(image) => VisualizationOutcome::Loaded(image),
        Err(err) => {
            warn!("chart response has no usable image: {err}");
            VisualizationOutcome::Failed
        }
    }
}
