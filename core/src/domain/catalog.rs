use crate::prelude::{ClientError, ClientResult};
use std::fmt;
use std::str::FromStr;

/// Charts the rendering service knows how to produce, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Chart {
    #[default]
    GlobalNewDeaths,
    TopCountriesCumulativeDeaths,
    IndiaDailyDeaths,
    TopThreeCountriesDeaths,
    DeathsByWhoRegion,
    RegionDailyDeaths,
    GlobalSevenDayAverage,
    DeathsByDayOfWeek,
    CorrelationHeatmap,
    RegionBoxplot,
    LinearRegressionFit,
    DecisionTree,
    RandomForestImportance,
}

impl Chart {
    pub const ALL: [Chart; 13] = [
        Chart::GlobalNewDeaths,
        Chart::TopCountriesCumulativeDeaths,
        Chart::IndiaDailyDeaths,
        Chart::TopThreeCountriesDeaths,
        Chart::DeathsByWhoRegion,
        Chart::RegionDailyDeaths,
        Chart::GlobalSevenDayAverage,
        Chart::DeathsByDayOfWeek,
        Chart::CorrelationHeatmap,
        Chart::RegionBoxplot,
        Chart::LinearRegressionFit,
        Chart::DecisionTree,
        Chart::RandomForestImportance,
    ];

    /// Title sent as the `plot_type` query parameter.
    pub fn title(self) -> &'static str {
        match self {
            Chart::GlobalNewDeaths => "Global New Deaths Over Time",
            Chart::TopCountriesCumulativeDeaths => "Top 10 Countries by Cumulative Deaths",
            Chart::IndiaDailyDeaths => "India Daily Deaths Trend",
            Chart::TopThreeCountriesDeaths => "Deaths Over Time in Top 3 Countries",
            Chart::DeathsByWhoRegion => "Deaths by WHO Region",
            Chart::RegionDailyDeaths => "Region-wise Daily Deaths Over Time",
            Chart::GlobalSevenDayAverage => "7-Day Moving Average (Global Deaths)",
            Chart::DeathsByDayOfWeek => "Avg Deaths by Day of Week",
            Chart::CorrelationHeatmap => "Correlation Heatmap",
            Chart::RegionBoxplot => "Boxplot of New Deaths by Region",
            Chart::LinearRegressionFit => "Actual vs Predicted Deaths - Linear Regression",
            Chart::DecisionTree => "Decision Tree Model",
            Chart::RandomForestImportance => "Feature Importance of Random Forest",
        }
    }

    /// File stem used for pre-rendered images, e.g. `correlation_heatmap`.
    pub fn slug(self) -> String {
        let mut slug = String::new();
        for ch in self.title().chars() {
            if ch.is_ascii_alphanumeric() {
                slug.push(ch.to_ascii_lowercase());
            } else if !slug.is_empty() && !slug.ends_with('_') {
                slug.push('_');
            }
        }
        slug.trim_end_matches('_').to_string()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: i64) -> ClientResult<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Chart::ALL.get(i).copied())
            .ok_or(ClientError::SelectionOutOfRange {
                index,
                len: Chart::ALL.len(),
            })
    }
}

impl fmt::Display for Chart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Chart {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Chart::ALL
            .into_iter()
            .find(|chart| chart.title() == s)
            .ok_or_else(|| ClientError::UnknownChart(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_order_matches_indices() {
        assert_eq!(Chart::ALL.len(), 13);
        for (idx, chart) in Chart::ALL.iter().enumerate() {
            assert_eq!(chart.index(), idx);
            assert_eq!(Chart::from_index(idx as i64).unwrap(), *chart);
        }
        assert_eq!(Chart::ALL[0].title(), "Global New Deaths Over Time");
    }

    #[test]
    fn from_index_rejects_both_boundaries() {
        for index in [-1, 13] {
            assert!(matches!(
                Chart::from_index(index),
                Err(ClientError::SelectionOutOfRange { index: i, len: 13 }) if i == index
            ));
        }
    }

    #[test]
    fn titles_parse_back_to_charts() {
        assert_eq!(
            "Decision Tree Model".parse::<Chart>().unwrap(),
            Chart::DecisionTree
        );
        assert!("Pie Chart".parse::<Chart>().is_err());
    }

    #[test]
    fn slugs_are_file_friendly() {
        assert_eq!(Chart::GlobalSevenDayAverage.slug(), "7_day_moving_average_global_deaths");
        assert_eq!(
            Chart::LinearRegressionFit.slug(),
            "actual_vs_predicted_deaths_linear_regression"
        );
    }
}
