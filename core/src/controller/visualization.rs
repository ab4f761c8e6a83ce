use super::sequencing::{CompletionPolicy, OutcomeSlot, RequestToken};
use crate::domain::{Chart, VisualizationOutcome};
use crate::prelude::ClientResult;
use crate::transport::{chart_outcome, HttpReply};
use log::{debug, info};

/// A chart fetch the caller must perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartDispatch {
    pub token: RequestToken,
    pub chart: Chart,
}

/// Owns the catalog selection and the image for it.
#[derive(Debug, Clone)]
pub struct VisualizationController {
    selection: Chart,
    slot: OutcomeSlot<VisualizationOutcome>,
}

impl VisualizationController {
    /// Creates the controller together with the load for the default chart.
    pub fn new(completion: CompletionPolicy) -> (Self, ChartDispatch) {
        let mut controller = Self {
            selection: Chart::default(),
            slot: OutcomeSlot::new(completion),
        };
        let dispatch = controller.select(Chart::default());
        (controller, dispatch)
    }

    /// Selects `catalog[index]`. Out-of-range indices change nothing.
    pub fn select_by_index(&mut self, index: i64) -> ClientResult<ChartDispatch> {
        let chart = Chart::from_index(index)?;
        Ok(self.select(chart))
    }

    pub fn select(&mut self, chart: Chart) -> ChartDispatch {
        self.selection = chart;
        let token = self.slot.begin(VisualizationOutcome::Pending);
        info!("chart {token} dispatched: {chart}");
        ChartDispatch { token, chart }
    }

    pub fn complete(&mut self, token: RequestToken, reply: ClientResult<HttpReply>) -> bool {
        let applied = self.slot.settle(token, chart_outcome(reply));
        debug!(
            "chart {token} {}",
            if applied { "applied" } else { "discarded" }
        );
        applied
    }

    pub fn current_outcome(&self) -> &VisualizationOutcome {
        self.slot.outcome()
    }

    pub fn current_index(&self) -> usize {
        self.selection.index()
    }

    pub fn current_chart(&self) -> Chart {
        self.selection
    }

    pub fn latest_token(&self) -> RequestToken {
        self.slot.latest()
    }
}
