use crate::bridge::model::Features;
use crate::generator::charts::ChartSource;
use crate::generator::predictor::predict_deaths;
use covidcore::domain::Chart;
use log::{info, warn};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use warp::{http::StatusCode, reply::Response, Filter, Rejection, Reply};

pub const BANNER: &str = "COVID-19 Death Prediction API is running.";

/// Shared state behind every route.
#[derive(Debug, Clone, Default)]
pub struct ServiceState {
    pub charts: ChartSource,
    /// Answer every prediction with a 500 carrying a message.
    pub fail_predictions: bool,
}

pub fn routes(
    state: Arc<ServiceState>,
) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone {
    let state_filter = warp::any().map(move || state.clone());

    let home = warp::path::end()
        .and(warp::get())
        .map(|| warp::reply::json(&json!({ "message": BANNER })).into_response());

    let predict = warp::path("predict")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(state_filter.clone())
        .map(|body: Value, state: Arc<ServiceState>| predict_reply(&body, &state));

    let graph = warp::path("generate_graph")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<HashMap<String, String>>())
        .and(state_filter)
        .map(|query: HashMap<String, String>, state: Arc<ServiceState>| {
            graph_reply(query.get("plot_type").map(String::as_str), &state)
        });

    home.or(predict).unify().or(graph).unify()
}

fn reply(status: StatusCode, body: Value) -> Response {
    warp::reply::with_status(warp::reply::json(&body), status).into_response()
}

fn predict_reply(body: &Value, state: &ServiceState) -> Response {
    if state.fail_predictions {
        warn!("prediction refused: failure mode enabled");
        return reply(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "message": "model unavailable" }),
        );
    }
    match Features::from_json(body) {
        Ok(features) => {
            let predicted = predict_deaths(&features);
            info!("predicted {predicted} new deaths");
            reply(StatusCode::OK, json!({ "Predicted_new_deaths": predicted }))
        }
        Err(issues) => {
            warn!("prediction body rejected with {} issue(s)", issues.len());
            reply(StatusCode::UNPROCESSABLE_ENTITY, json!({ "detail": issues }))
        }
    }
}

fn graph_reply(plot_type: Option<&str>, state: &ServiceState) -> Response {
    let Some(plot_type) = plot_type else {
        return reply(
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({ "detail": [{ "type": "missing", "loc": ["query", "plot_type"], "msg": "Field required" }] }),
        );
    };
    let image = plot_type
        .parse::<Chart>()
        .map_err(|_| anyhow::anyhow!("Invalid plot type"))
        .and_then(|chart| state.charts.image_for(chart));
    match image {
        Ok(image_data) => {
            info!("serving chart {plot_type}");
            reply(StatusCode::OK, json!({ "image_data": image_data }))
        }
        Err(err) => {
            warn!("chart {plot_type} failed: {err}");
            reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": err.to_string() }),
            )
        }
    }
}
