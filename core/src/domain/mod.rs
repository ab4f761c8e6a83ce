pub mod catalog;
pub mod coercion;
pub mod fields;
pub mod outcome;

pub use catalog::Chart;
pub use coercion::{parse_float_prefix, CoercionPolicy};
pub use fields::{FeatureField, FormRecord, PredictionRequest};
pub use outcome::{ChartImage, PredictionOutcome, VisualizationOutcome, GENERIC_FAILURE};
