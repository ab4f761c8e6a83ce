use covidcore::domain::{Chart, PredictionOutcome, VisualizationOutcome};

/// Status text for the prediction panel; `None` when there is nothing to show.
pub fn prediction_line(outcome: &PredictionOutcome) -> Option<String> {
    match outcome {
        PredictionOutcome::Idle => None,
        PredictionOutcome::Pending => Some("Predicting...".into()),
        PredictionOutcome::Succeeded(value) => Some(format!("Predicted New Deaths: {value}")),
        PredictionOutcome::Failed(message) => Some(message.clone()),
    }
}

/// Status text for the chart panel. Failures render nothing.
pub fn chart_line(chart: Chart, outcome: &VisualizationOutcome) -> Option<String> {
    match outcome {
        VisualizationOutcome::Pending => Some(format!("Loading {chart}...")),
        VisualizationOutcome::Loaded(image) => Some(format!(
            "{chart} ({} base64 chars)",
            image.as_base64().len()
        )),
        VisualizationOutcome::Idle | VisualizationOutcome::Failed => None,
    }
}

pub fn catalog_lines() -> Vec<String> {
    Chart::ALL
        .iter()
        .map(|chart| format!("{:>2}  {chart}", chart.index()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use covidcore::domain::ChartImage;

    #[test]
    fn prediction_lines_follow_outcome() {
        assert_eq!(prediction_line(&PredictionOutcome::Idle), None);
        assert_eq!(
            prediction_line(&PredictionOutcome::Succeeded(3.5)).unwrap(),
            "Predicted New Deaths: 3.5"
        );
        assert_eq!(
            prediction_line(&PredictionOutcome::Failed("model unavailable".into())).unwrap(),
            "model unavailable"
        );
    }

    #[test]
    fn failed_chart_renders_nothing() {
        assert_eq!(chart_line(Chart::DecisionTree, &VisualizationOutcome::Failed), None);
        let loaded = VisualizationOutcome::Loaded(ChartImage::from_base64("AQID").unwrap());
        assert_eq!(
            chart_line(Chart::DecisionTree, &loaded).unwrap(),
            "Decision Tree Model (4 base64 chars)"
        );
    }

    #[test]
    fn catalog_lists_every_chart() {
        let lines = catalog_lines();
        assert_eq!(lines.len(), 13);
        assert_eq!(lines[0], " 0  Global New Deaths Over Time");
    }
}
