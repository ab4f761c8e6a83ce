use crate::prelude::ClientError;
use serde::{ser::SerializeMap, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Input features understood by the prediction model, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FeatureField {
    NewCases,
    CumulativeCases,
    CumulativeDeaths,
    DaysSinceStart,
    NewDeaths7DayAvg,
    NewDeaths14DayAvg,
    DeathRate,
    CaseGrowthRate,
}

impl FeatureField {
    pub const ALL: [FeatureField; 8] = [
        FeatureField::NewCases,
        FeatureField::CumulativeCases,
        FeatureField::CumulativeDeaths,
        FeatureField::DaysSinceStart,
        FeatureField::NewDeaths7DayAvg,
        FeatureField::NewDeaths14DayAvg,
        FeatureField::DeathRate,
        FeatureField::CaseGrowthRate,
    ];

    /// Wire name used as the JSON key.
    pub fn name(self) -> &'static str {
        match self {
            FeatureField::NewCases => "New_cases",
            FeatureField::CumulativeCases => "Cumulative_cases",
            FeatureField::CumulativeDeaths => "Cumulative_deaths",
            FeatureField::DaysSinceStart => "Days_since_start",
            FeatureField::NewDeaths7DayAvg => "New_deaths_7day_avg",
            FeatureField::NewDeaths14DayAvg => "New_deaths_14day_avg",
            FeatureField::DeathRate => "Death_rate",
            FeatureField::CaseGrowthRate => "Case_growth_rate",
        }
    }

    /// Human-readable label, the wire name with underscores as spaces.
    pub fn label(self) -> String {
        self.name().replace('_', " ")
    }

    fn ordinal(self) -> usize {
        self as usize
    }
}

impl fmt::Display for FeatureField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FeatureField {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FeatureField::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| ClientError::UnknownField(s.to_string()))
    }
}

/// Raw user input for every feature. The key set is fixed by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormRecord {
    values: [String; 8],
}

impl FormRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: FeatureField, raw: String) {
        self.values[field.ordinal()] = raw;
    }

    pub fn get(&self, field: FeatureField) -> &str {
        &self.values[field.ordinal()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (FeatureField, &str)> + '_ {
        FeatureField::ALL
            .into_iter()
            .map(move |field| (field, self.get(field)))
    }
}

/// Numeric payload posted to the prediction endpoint.
///
/// Non-finite values serialize as JSON `null`; the server decides what to do
/// with them.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRequest {
    values: [f64; 8],
}

impl PredictionRequest {
    pub(crate) fn from_values(values: [f64; 8]) -> Self {
        Self { values }
    }

    pub fn get(&self, field: FeatureField) -> f64 {
        self.values[field.ordinal()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (FeatureField, f64)> + '_ {
        FeatureField::ALL
            .into_iter()
            .map(move |field| (field, self.get(field)))
    }
}

impl Serialize for PredictionRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field.name(), &value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_round_trip_through_from_str() {
        for field in FeatureField::ALL {
            assert_eq!(field.name().parse::<FeatureField>().unwrap(), field);
        }
        assert!(matches!(
            "Recovered".parse::<FeatureField>(),
            Err(ClientError::UnknownField(name)) if name == "Recovered"
        ));
    }

    #[test]
    fn form_record_starts_empty_and_keeps_edits() {
        let mut form = FormRecord::new();
        assert!(form.iter().all(|(_, value)| value.is_empty()));

        form.set(FeatureField::DeathRate, "0.02".into());
        assert_eq!(form.get(FeatureField::DeathRate), "0.02");
        assert_eq!(form.iter().count(), 8);
    }

    #[test]
    fn request_serializes_in_form_order_with_nan_as_null() {
        let mut values = [1.0; 8];
        values[FeatureField::DeathRate as usize] = f64::NAN;
        let json = serde_json::to_string(&PredictionRequest::from_values(values)).unwrap();

        assert!(json.starts_with("{\"New_cases\":1.0,\"Cumulative_cases\":1.0"));
        assert!(json.contains("\"Death_rate\":null"));
    }

    #[test]
    fn label_replaces_underscores() {
        assert_eq!(FeatureField::NewDeaths7DayAvg.label(), "New deaths 7day avg");
    }
}
