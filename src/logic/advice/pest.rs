use super::{AdviceEngine, AdviceRule};
use crate::models::{measured, non_blank, Advice, AdviceCategory, PredictionRequest};

pub const SANITATION_TIP: &str =
    "Practice field sanitation and use biological control wherever possible.";

/// 30-day weather window plus whatever the farmer reported seeing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PestInputs {
    /// Rainfall over the trailing 30 days, mm
    pub rainfall_30d: Option<f64>,
    /// Mean temperature over the trailing 30 days, °C
    pub temp_mean_30d: Option<f64>,
    pub recent_pest_issue: Option<String>,
}

impl PestInputs {
    pub fn from_request(request: &PredictionRequest) -> Self {
        Self {
            rainfall_30d: request.rainfall_30d,
            temp_mean_30d: request.temp_mean_30d,
            recent_pest_issue: request.recent_pest_issue.clone(),
        }
    }
}

/// Leads every pest advice list.
pub struct ReportedPest;

impl AdviceRule<PestInputs> for ReportedPest {
    fn id(&self) -> &'static str {
        "reported_pest"
    }

    fn name(&self) -> &'static str {
        "Reported Pest"
    }

    fn evaluate(&self, input: &PestInputs) -> Option<String> {
        match non_blank(input.recent_pest_issue.as_deref()) {
            Some(issue) => Some(format!(
                "Reported: {} — do targeted scouting and IPM.",
                issue
            )),
            None => Some("No pest reported — maintain weekly scouting.".to_string()),
        }
    }
}

/// More than 150 mm in 30 days.
pub struct HeavyRainfall;

impl AdviceRule<PestInputs> for HeavyRainfall {
    fn id(&self) -> &'static str {
        "heavy_rainfall"
    }

    fn name(&self) -> &'static str {
        "Fungal Risk"
    }

    fn evaluate(&self, input: &PestInputs) -> Option<String> {
        measured(input.rainfall_30d)
            .filter(|rain| *rain > 150.0)
            .map(|_| {
                "Heavy rainfall increases fungal risks — prioritize disease monitoring.".to_string()
            })
    }
}

/// Mean above 30 °C.
pub struct HighTemperature;

impl AdviceRule<PestInputs> for HighTemperature {
    fn id(&self) -> &'static str {
        "high_temperature"
    }

    fn name(&self) -> &'static str {
        "Pest Pressure"
    }

    fn evaluate(&self, input: &PestInputs) -> Option<String> {
        measured(input.temp_mean_30d)
            .filter(|temp| *temp > 30.0)
            .map(|_| "High temp may favor some pests — increase monitoring.".to_string())
    }
}

pub struct FieldSanitation;

impl AdviceRule<PestInputs> for FieldSanitation {
    fn id(&self) -> &'static str {
        "field_sanitation"
    }

    fn name(&self) -> &'static str {
        "Field Sanitation"
    }

    fn evaluate(&self, _input: &PestInputs) -> Option<String> {
        Some(SANITATION_TIP.to_string())
    }
}

pub fn engine() -> AdviceEngine<PestInputs> {
    let rules: Vec<Box<dyn AdviceRule<PestInputs>>> = vec![
        Box::new(ReportedPest),
        Box::new(HeavyRainfall),
        Box::new(HighTemperature),
        Box::new(FieldSanitation),
    ];

    AdviceEngine::new(AdviceCategory::Pest, rules, SANITATION_TIP)
}

pub fn build_pest_advice(inputs: &PestInputs) -> Advice {
    engine().evaluate(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_report_quiet_weather() {
        let advice = build_pest_advice(&PestInputs {
            rainfall_30d: Some(90.0),
            temp_mean_30d: Some(25.0),
            recent_pest_issue: None,
        });

        assert_eq!(
            advice.recommendations,
            vec!["No pest reported — maintain weekly scouting.", SANITATION_TIP]
        );
        assert_eq!(advice.summary, "No pest reported — maintain weekly scouting.");
    }

    #[test]
    fn reported_pest_leads() {
        let advice = build_pest_advice(&PestInputs {
            recent_pest_issue: Some("brown planthopper".into()),
            ..Default::default()
        });

        assert_eq!(
            advice.summary,
            "Reported: brown planthopper — do targeted scouting and IPM."
        );
    }

    #[test]
    fn blank_report_counts_as_none() {
        let advice = build_pest_advice(&PestInputs {
            recent_pest_issue: Some("  ".into()),
            ..Default::default()
        });

        assert!(advice.summary.starts_with("No pest reported"));
    }

    #[test]
    fn weather_warnings_in_order() {
        let advice = build_pest_advice(&PestInputs {
            rainfall_30d: Some(150.1),
            temp_mean_30d: Some(30.5),
            recent_pest_issue: Some("leaf folder".into()),
        });

        assert_eq!(advice.recommendations.len(), 4);
        assert!(advice.recommendations[1].starts_with("Heavy rainfall"));
        assert!(advice.recommendations[2].starts_with("High temp"));
    }

    #[test]
    fn thresholds_are_exclusive() {
        let advice = build_pest_advice(&PestInputs {
            rainfall_30d: Some(150.0),
            temp_mean_30d: Some(30.0),
            recent_pest_issue: None,
        });

        assert_eq!(advice.recommendations.len(), 2);
    }

    #[test]
    fn always_ends_with_sanitation() {
        let cases = [
            PestInputs::default(),
            PestInputs {
                rainfall_30d: Some(400.0),
                temp_mean_30d: Some(f64::NAN),
                recent_pest_issue: Some("stem borer".into()),
            },
            PestInputs {
                rainfall_30d: None,
                temp_mean_30d: Some(42.0),
                recent_pest_issue: None,
            },
        ];

        for input in &cases {
            let advice = build_pest_advice(input);
            assert_eq!(advice.recommendations.last().unwrap(), SANITATION_TIP);
            assert_eq!(advice.summary, advice.recommendations[0]);
        }
    }
}
