use super::advice::Advice;
use super::prediction::{format_yield, round_yield, PredictionResult};
use super::region::{Crop, District, Season};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const NO_CONCLUSIONS: &str =
    "No conclusions yet — run prediction to get a prioritized action plan.";

/// Everything one prediction cycle produces, replaced wholesale on the next.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YieldReport {
    pub district: District,
    pub crop: Crop,
    pub season: Season,
    pub predicted_yield: Option<f64>,
    pub units: String,
    pub model_recommendations: Vec<String>,
    pub fertilizer: Advice,
    pub pest: Advice,
    pub conclusions: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

impl YieldReport {
    pub fn new(
        district: District,
        crop: Crop,
        season: Season,
        result: PredictionResult,
        fertilizer: Advice,
        pest: Advice,
        conclusions: Vec<String>,
    ) -> Self {
        Self {
            district,
            crop,
            season,
            predicted_yield: result.predicted_yield.map(round_yield),
            units: result.units,
            model_recommendations: result.recommendations,
            fertilizer,
            pest,
            conclusions,
            generated_at: Utc::now(),
        }
    }

    pub fn yield_label(&self) -> String {
        match self.predicted_yield {
            Some(y) => format!("{} {}", format_yield(y), self.units),
            None => "—".to_string(),
        }
    }
}
