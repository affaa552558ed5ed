use crate::models::{format_yield, measured, Advice, Crop};

/// How many lines of each advice list make it into the action plan.
const ADVICE_SLICE: usize = 3;

pub const QUICK_WINS: &str =
    "Quick wins: correct planting date, split nitrogen dosing, timely irrigation (flowering), and weekly pest scouting.";
pub const CONSULT_EXTENSION: &str =
    "Consult local extension for crop-specific schedules and soil-test based fertilizer charts.";

#[derive(Debug, Clone, Default)]
pub struct ConclusionInputs<'a> {
    pub predicted_yield: Option<f64>,
    pub previous_yield: Option<f64>,
    pub fertilizer: Option<&'a Advice>,
    pub pest: Option<&'a Advice>,
    pub soil_ph: Option<f64>,
    pub crop: Option<Crop>,
}

/// Prioritized action plan: yield outlook, pH, the top fertilizer and pest
/// lines, then two fixed closing tips.
pub fn build_conclusions(inputs: &ConclusionInputs<'_>) -> Vec<String> {
    let mut conclusions = yield_outlook(
        measured(inputs.predicted_yield),
        measured(inputs.previous_yield),
        inputs.crop,
    );

    conclusions.push(ph_verdict(measured(inputs.soil_ph)).to_string());

    if let Some(fertilizer) = inputs.fertilizer {
        conclusions.extend(fertilizer.tagged(ADVICE_SLICE));
    }
    if let Some(pest) = inputs.pest {
        conclusions.extend(pest.tagged(ADVICE_SLICE));
    }

    conclusions.push(QUICK_WINS.to_string());
    conclusions.push(CONSULT_EXTENSION.to_string());

    conclusions
}

fn yield_outlook(predicted: Option<f64>, previous: Option<f64>, crop: Option<Crop>) -> Vec<String> {
    let Some(predicted) = predicted else {
        return vec!["Prediction not available — use soil test and local advice.".to_string()];
    };

    let crop_label = crop.map(|c| c.as_str()).unwrap_or("the crop");
    let mut lines = vec![format!(
        "Model predicts {} q/ha for {}.",
        format_yield(predicted),
        crop_label
    )];

    if let Some(previous) = previous {
        let line = if predicted > previous * 1.1 {
            "This suggests potential improvement — preserve current good practices and refine irrigation timing."
        } else if predicted < previous * 0.9 {
            "This suggests a yield gap — address soil fertility and water stress first."
        } else {
            "Yield looks similar to last season — small optimizations can help."
        };
        lines.push(line.to_string());
    }

    lines
}

fn ph_verdict(ph: Option<f64>) -> &'static str {
    match ph {
        None => "Obtain soil pH test.",
        Some(ph) if ph < 5.5 => "Soil acidic: apply lime as per soil test.",
        Some(ph) if ph > 7.8 => "Soil alkaline: consider gypsum or acidifying measures.",
        Some(_) => "Soil pH acceptable.",
    }
}
