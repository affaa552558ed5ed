use super::region::{Crop, District, Season};
use crate::error::{KrishiMitraError, Result};
use serde::{Deserialize, Serialize};

/// Treat NaN the same as an absent reading.
///
/// Every heuristic goes through this, so a value typed into the form as
/// garbage and a value left out behave identically.
pub fn measured(value: Option<f64>) -> Option<f64> {
    value.filter(|v| !v.is_nan())
}

/// Drop blank free-text entries.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Form state as the user is filling it in.
///
/// Selections may still be empty here; [`PredictionForm::validate`] turns a
/// complete form into a [`PredictionRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionForm {
    pub district: Option<District>,
    pub crop: Option<Crop>,
    pub season: Option<Season>,
    pub soil_ph: Option<f64>,
    pub soil_n: Option<f64>,
    pub soil_p: Option<f64>,
    pub soil_k: Option<f64>,
    pub rainfall_30d: Option<f64>,
    pub temp_mean_30d: Option<f64>,
    pub previous_yield: Option<f64>,
    pub fertilizer_used: Option<String>,
    pub fertilizer_amount_kg_per_ha: Option<f64>,
    pub recent_pest_issue: Option<String>,
}

impl Default for PredictionForm {
    fn default() -> Self {
        Self {
            district: None,
            crop: None,
            season: None,
            soil_ph: Some(6.5),
            soil_n: Some(80.0),
            soil_p: Some(30.0),
            soil_k: Some(140.0),
            rainfall_30d: Some(90.0),
            temp_mean_30d: Some(25.0),
            previous_yield: Some(28.0),
            fertilizer_used: Some("NPK 10-26-26".into()),
            fertilizer_amount_kg_per_ha: Some(100.0),
            recent_pest_issue: None,
        }
    }
}

impl PredictionForm {
    pub fn is_complete(&self) -> bool {
        self.district.is_some() && self.crop.is_some() && self.season.is_some()
    }

    pub fn validate(&self) -> Result<PredictionRequest> {
        let (Some(district), Some(crop), Some(season)) = (self.district, self.crop, self.season)
        else {
            return Err(KrishiMitraError::Validation(
                "Please fill district, crop and season".into(),
            ));
        };

        Ok(PredictionRequest {
            district,
            crop,
            season,
            soil_ph: measured(self.soil_ph),
            soil_n: measured(self.soil_n),
            soil_p: measured(self.soil_p),
            soil_k: measured(self.soil_k),
            rainfall_30d: measured(self.rainfall_30d),
            temp_mean_30d: measured(self.temp_mean_30d),
            previous_yield: measured(self.previous_yield),
            fertilizer_used: non_blank(self.fertilizer_used.as_deref()),
            fertilizer_amount_kg_per_ha: measured(self.fertilizer_amount_kg_per_ha).unwrap_or(0.0),
            recent_pest_issue: non_blank(self.recent_pest_issue.as_deref()),
        })
    }
}

/// Body of `POST /predict`.
///
/// Soil and weather readings are always sent, as `null` when missing.
/// `previous_yield` is left out entirely when unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub district: District,
    pub crop: Crop,
    pub season: Season,
    pub soil_ph: Option<f64>,
    pub soil_n: Option<f64>,
    pub soil_p: Option<f64>,
    pub soil_k: Option<f64>,
    pub rainfall_30d: Option<f64>,
    pub temp_mean_30d: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_yield: Option<f64>,
    pub fertilizer_used: Option<String>,
    #[serde(default)]
    pub fertilizer_amount_kg_per_ha: f64,
    pub recent_pest_issue: Option<String>,
}
