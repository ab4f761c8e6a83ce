pub mod charts;
pub mod predictor;
