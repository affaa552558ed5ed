use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_UNITS: &str = "q_per_ha";

/// Successful body from the prediction service, as received.
///
/// The service normally answers with JSON, but a body that fails to parse is
/// handed back as text instead of being treated as an error.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    Structured(Value),
    Raw(String),
}

impl PredictionOutcome {
    pub fn parse(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => PredictionOutcome::Structured(value),
            Err(_) => PredictionOutcome::Raw(text.to_string()),
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, PredictionOutcome::Raw(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted_yield: Option<f64>,
    pub units: String,
    pub recommendations: Vec<String>,
}

impl Default for PredictionResult {
    fn default() -> Self {
        Self {
            predicted_yield: None,
            units: DEFAULT_UNITS.to_string(),
            recommendations: Vec::new(),
        }
    }
}

impl PredictionResult {
    /// Normalize either response shape: fields at the top level, or nested
    /// under `result`.
    pub fn from_outcome(outcome: &PredictionOutcome) -> Self {
        let value = match outcome {
            PredictionOutcome::Structured(v) => v,
            PredictionOutcome::Raw(_) => return Self::default(),
        };

        let body = match value.get("result") {
            Some(inner) if !inner.is_null() => inner,
            _ => value,
        };

        let predicted_yield = body
            .get("predicted_yield")
            .and_then(number_like)
            .filter(|v| v.is_finite());

        let units = body
            .get("units")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_UNITS)
            .to_string();

        let recommendations = body
            .get("recommendations")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            predicted_yield,
            units,
            recommendations,
        }
    }
}

fn number_like(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Two-decimal text of a yield, the precision the dashboard shows.
///
/// Rounds the exact binary value to nearest. An exact tie (a value whose
/// fractional part is an odd number of eighths) goes away from zero, where
/// `{:.2}` alone would round to even.
pub fn format_yield(value: f64) -> String {
    let eighths = value * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        // value * 100 is exact here, ending in .5
        return format!("{:.2}", (value * 100.0).round() / 100.0);
    }
    format!("{:.2}", value)
}

/// Numeric form of [`format_yield`].
pub fn round_yield(value: f64) -> f64 {
    format_yield(value).parse().unwrap_or(value)
}
