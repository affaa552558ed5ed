use super::{AdviceEngine, AdviceRule};
use crate::models::{measured, Advice, AdviceCategory, PredictionRequest};

const FALLBACK_SUMMARY: &str = "Follow soil-test based fertilization.";

/// Readings the fertilizer heuristic looks at. Soil values are kg/ha.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FertilizerInputs {
    pub soil_n: Option<f64>,
    pub soil_p: Option<f64>,
    pub soil_k: Option<f64>,
    pub fertilizer_used: Option<String>,
    pub fertilizer_amount: Option<f64>,
    pub previous_yield: Option<f64>,
    pub predicted_yield: Option<f64>,
}

impl FertilizerInputs {
    pub fn from_request(request: &PredictionRequest, predicted_yield: Option<f64>) -> Self {
        Self {
            soil_n: request.soil_n,
            soil_p: request.soil_p,
            soil_k: request.soil_k,
            fertilizer_used: request.fertilizer_used.clone(),
            fertilizer_amount: Some(request.fertilizer_amount_kg_per_ha),
            previous_yield: request.previous_yield,
            predicted_yield,
        }
    }
}

/// Nitrogen band. Always produces a line, so the fertilizer summary is
/// always the nitrogen verdict.
///
/// - missing: ask for a test
/// - below 80: low
/// - above 250: high
/// - 80 to 250 inclusive: moderate
pub struct NitrogenBand;

impl AdviceRule<FertilizerInputs> for NitrogenBand {
    fn id(&self) -> &'static str {
        "soil_nitrogen"
    }

    fn name(&self) -> &'static str {
        "Soil Nitrogen"
    }

    fn evaluate(&self, input: &FertilizerInputs) -> Option<String> {
        let line = match measured(input.soil_n) {
            None => "Get soil N test for exact N recommendation.",
            Some(n) if n < 80.0 => {
                "Soil N low — apply recommended N (split dosing) such as urea in splits."
            }
            Some(n) if n > 250.0 => "Soil N high — avoid extra N to prevent lodging and N loss.",
            Some(_) => "Soil N moderate — follow balanced N schedule.",
        };
        Some(line.to_string())
    }
}

pub struct PhosphorusBand;

impl AdviceRule<FertilizerInputs> for PhosphorusBand {
    fn id(&self) -> &'static str {
        "soil_phosphorus"
    }

    fn name(&self) -> &'static str {
        "Soil Phosphorus"
    }

    fn evaluate(&self, input: &FertilizerInputs) -> Option<String> {
        let line = match measured(input.soil_p) {
            None => "Get soil P test; apply basal P (DAP/SSP) if low.",
            Some(p) if p < 20.0 => "Soil P low — apply phosphorus at basal dose (e.g., DAP).",
            Some(_) => "Soil P adequate for many crops.",
        };
        Some(line.to_string())
    }
}

pub struct PotassiumBand;

impl AdviceRule<FertilizerInputs> for PotassiumBand {
    fn id(&self) -> &'static str {
        "soil_potassium"
    }

    fn name(&self) -> &'static str {
        "Soil Potassium"
    }

    fn evaluate(&self, input: &FertilizerInputs) -> Option<String> {
        let line = match measured(input.soil_k) {
            None => "Get K test; K side-dressing may be required.",
            Some(k) if k < 120.0 => "Soil K low — apply muriate of potash as needed.",
            Some(_) => "Soil K appears adequate.",
        };
        Some(line.to_string())
    }
}

/// Sanity check on the applied product amount (kg/ha). Silent when the
/// amount is unknown.
pub struct ApplicationRate;

impl AdviceRule<FertilizerInputs> for ApplicationRate {
    fn id(&self) -> &'static str {
        "application_rate"
    }

    fn name(&self) -> &'static str {
        "Application Rate"
    }

    fn evaluate(&self, input: &FertilizerInputs) -> Option<String> {
        let amount = measured(input.fertilizer_amount)?;

        let line = if amount < 50.0 {
            "Applied fertilizer seems low — validate recommended dose for crop."
        } else if amount > 300.0 {
            "Applied fertilizer seems high — avoid over-application."
        } else {
            "Applied fertilizer amount within common range; ensure correct splits."
        };
        Some(line.to_string())
    }
}

/// Compares the prediction with last season. Needs both yields; says
/// nothing when the change is within -10%..+15%.
pub struct YieldTrend;

impl AdviceRule<FertilizerInputs> for YieldTrend {
    fn id(&self) -> &'static str {
        "yield_trend"
    }

    fn name(&self) -> &'static str {
        "Yield Trend"
    }

    fn evaluate(&self, input: &FertilizerInputs) -> Option<String> {
        let previous = measured(input.previous_yield)?;
        let predicted = measured(input.predicted_yield)?;

        if predicted > previous * 1.15 {
            Some("Predicted improvement — maintain soil fertility and irrigation.".to_string())
        } else if predicted < previous * 0.9 {
            Some("Predicted drop — prioritize soil fertility improvement.".to_string())
        } else {
            None
        }
    }
}

pub fn engine() -> AdviceEngine<FertilizerInputs> {
    let rules: Vec<Box<dyn AdviceRule<FertilizerInputs>>> = vec![
        Box::new(NitrogenBand),
        Box::new(PhosphorusBand),
        Box::new(PotassiumBand),
        Box::new(ApplicationRate),
        Box::new(YieldTrend),
    ];

    AdviceEngine::new(AdviceCategory::Fertilizer, rules, FALLBACK_SUMMARY)
}

pub fn build_fertilizer_advice(inputs: &FertilizerInputs) -> Advice {
    engine().evaluate(inputs)
}
