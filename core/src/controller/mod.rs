pub mod prediction;
pub mod sequencing;
pub mod visualization;

pub use prediction::{PredictionController, PredictionDispatch};
pub use sequencing::{CompletionPolicy, OutcomeSlot, RequestToken};
pub use visualization::{ChartDispatch, VisualizationController};
