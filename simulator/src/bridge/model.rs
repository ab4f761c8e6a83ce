use covidcore::domain::FeatureField;
use serde::Serialize;
use serde_json::Value;

/// Validated request body of `POST /predict`.
#[derive(Debug, Clone, PartialEq)]
pub struct Features {
    pub new_cases: f64,
    pub cumulative_cases: f64,
    pub cumulative_deaths: f64,
    pub new_deaths_7day_avg: f64,
    pub new_deaths_14day_avg: f64,
    pub death_rate: f64,
    pub case_growth_rate: f64,
}

/// One entry of a 422 `detail` list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldIssue {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub loc: (&'static str, &'static str),
    pub msg: &'static str,
}

impl FieldIssue {
    fn new(field: FeatureField, kind: &'static str, msg: &'static str) -> Self {
        Self {
            kind,
            loc: ("body", field.name()),
            msg,
        }
    }
}

impl Features {
    pub fn from_json(body: &Value) -> Result<Self, Vec<FieldIssue>> {
        let mut issues = Vec::new();
        let mut read = |field: FeatureField| match body.get(field.name()) {
            Some(Value::Number(number)) => number.as_f64().unwrap_or(f64::NAN),
            None => {
                issues.push(FieldIssue::new(field, "missing", "Field required"));
                f64::NAN
            }
            Some(_) => {
                issues.push(FieldIssue::new(
                    field,
                    "float_type",
                    "Input should be a valid number",
                ));
                f64::NAN
            }
        };

        let new_cases = read(FeatureField::NewCases);
        let cumulative_cases = read(FeatureField::CumulativeCases);
        let cumulative_deaths = read(FeatureField::CumulativeDeaths);
        let days_since_start = read(FeatureField::DaysSinceStart);
        let new_deaths_7day_avg = read(FeatureField::NewDeaths7DayAvg);
        let new_deaths_14day_avg = read(FeatureField::NewDeaths14DayAvg);
        let death_rate = read(FeatureField::DeathRate);
        let case_growth_rate = read(FeatureField::CaseGrowthRate);

        if days_since_start.is_finite() && days_since_start.fract() != 0.0 {
            issues.push(FieldIssue::new(
                FeatureField::DaysSinceStart,
                "int_from_float",
                "Input should be a valid integer, got a number with a fractional part",
            ));
        }

        if !issues.is_empty() {
            return Err(issues);
        }
        Ok(Self {
            new_cases,
            cumulative_cases,
            cumulative_deaths,
            new_deaths_7day_avg,
            new_deaths_14day_avg,
            death_rate,
            case_growth_rate,
        })
    }
}
