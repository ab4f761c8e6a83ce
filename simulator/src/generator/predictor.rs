use crate::bridge::model::Features;

/// Deterministic stand-in for the trained forest: recent death averages plus
/// the deaths implied by today's cases, rounded to two decimals.
pub fn predict_deaths(features: &Features) -> f64 {
    let trend = 0.5 * features.new_deaths_7day_avg + 0.3 * features.new_deaths_14day_avg;
    let implied = 0.2 * features.new_cases * blended_rate(features) * (1.0 + features.case_growth_rate);
    round_cents((trend + implied).max(0.0))
}

/// Mean of the reported rate and the one observed in the cumulative totals.
fn blended_rate(features: &Features) -> f64 {
    if features.cumulative_cases > 0.0 {
        let observed = features.cumulative_deaths / features.cumulative_cases;
        (features.death_rate + observed) / 2.0
    } else {
        features.death_rate
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
