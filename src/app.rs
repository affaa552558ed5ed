use crate::config::Config;
use crate::datasources::PredictionClient;
use crate::error::{KrishiMitraError, Result};
use crate::logic::advice::{
    build_conclusions, build_fertilizer_advice, build_pest_advice, ConclusionInputs,
    FertilizerInputs, PestInputs,
};
use crate::models::{
    PredictionForm, PredictionOutcome, PredictionRequest, PredictionResult, YieldChart,
    YieldReport,
};

/// One dashboard session: the form being edited, the last report, and the
/// chart window.
///
/// Only one prediction may be in flight; `busy` gates re-submission.
pub struct Dashboard {
    pub form: PredictionForm,
    pub report: Option<YieldReport>,
    pub chart: YieldChart,
    pub busy: bool,
    default_window: (i32, i32),
    client: PredictionClient,
}

impl Dashboard {
    pub fn new(config: &Config) -> Self {
        let default_window = (config.chart.start_year, config.chart.end_year);
        let chart = YieldChart::default().with_window(default_window.0, default_window.1);

        Self {
            form: config.form.clone(),
            report: None,
            chart,
            busy: false,
            default_window,
            client: PredictionClient::new(config.api.clone()),
        }
    }

    pub fn client(&self) -> &PredictionClient {
        &self.client
    }

    /// Validate the form, call the model, and derive advice.
    ///
    /// On failure the previous report is gone and nothing replaces it.
    pub async fn submit(&mut self) -> Result<&YieldReport> {
        if self.busy {
            return Err(KrishiMitraError::Busy);
        }

        let request = self.form.validate()?;

        self.busy = true;
        self.report = None;

        let outcome = self.client.predict(&request).await;
        self.busy = false;

        let report = build_report(&request, &outcome?);
        tracing::info!(
            district = %request.district,
            crop = %request.crop,
            "Prediction complete: {}",
            report.yield_label()
        );

        self.reset_chart_window();
        Ok(self.report.insert(report))
    }

    /// Back to the configured window, so a fresh prediction is always shown
    /// right after the familiar history.
    pub fn reset_chart_window(&mut self) {
        let (start, end) = self.default_window;
        self.chart.start_year = start;
        self.chart.end_year = end;
    }

    pub fn predicted_yield(&self) -> Option<f64> {
        self.report.as_ref().and_then(|r| r.predicted_yield)
    }

    pub fn chart_csv(&self) -> String {
        self.chart.to_csv(self.predicted_yield())
    }
}

/// Pure part of a prediction cycle: normalize the model output and run the
/// heuristics over it.
pub fn build_report(request: &PredictionRequest, outcome: &PredictionOutcome) -> YieldReport {
    let result = PredictionResult::from_outcome(outcome);
    build_report_from_result(request, result)
}

pub fn build_report_from_result(
    request: &PredictionRequest,
    result: PredictionResult,
) -> YieldReport {
    let predicted = result.predicted_yield;

    let fertilizer = build_fertilizer_advice(&FertilizerInputs::from_request(request, predicted));
    let pest = build_pest_advice(&PestInputs::from_request(request));
    let conclusions = build_conclusions(&ConclusionInputs {
        predicted_yield: predicted,
        previous_yield: request.previous_yield,
        fertilizer: Some(&fertilizer),
        pest: Some(&pest),
        soil_ph: request.soil_ph,
        crop: Some(request.crop),
    });

    YieldReport::new(
        request.district,
        request.crop,
        request.season,
        result,
        fertilizer,
        pest,
        conclusions,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::models::{Crop, District, Season};
    use serde_json::json;

    fn config_for(base_url: &str) -> Config {
        Config {
            api: ApiConfig {
                base_url: base_url.to_string(),
            },
            ..Default::default()
        }
    }

    fn filled_form() -> PredictionForm {
        PredictionForm {
            district: Some(District::Sambalpur),
            crop: Some(Crop::Paddy),
            season: Some(Season::Kharif),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn submit_blocks_when_busy() {
        let mut dashboard = Dashboard::new(&config_for("http://127.0.0.1:9"));
        dashboard.form = filled_form();
        dashboard.busy = true;

        assert!(matches!(dashboard.submit().await, Err(KrishiMitraError::Busy)));
    }

    #[tokio::test]
    async fn submit_requires_selections() {
        let mut dashboard = Dashboard::new(&config_for("http://127.0.0.1:9"));

        let err = dashboard.submit().await.unwrap_err();
        assert!(matches!(err, KrishiMitraError::Validation(_)));
        assert!(!dashboard.busy);
    }

    #[tokio::test]
    async fn failed_submit_clears_report_and_busy() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let mut dashboard = Dashboard::new(&config_for(&format!("http://{}", addr)));
        dashboard.form = filled_form();
        let request = dashboard.form.validate().unwrap();
        dashboard.report = Some(build_report_from_result(&request, PredictionResult::default()));

        assert!(dashboard.submit().await.is_err());
        assert!(!dashboard.busy);
        assert!(dashboard.report.is_none());
    }

    #[tokio::test]
    async fn submit_stores_report() {
        use axum::{routing::post, Json, Router};

        let router = Router::new().route(
            "/predict",
            post(|| async { Json(json!({ "predicted_yield": 50.123 })) }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let mut config = config_for(&format!("http://{}", addr));
        config.chart.start_year = 2024;
        let mut dashboard = Dashboard::new(&config);
        dashboard.form = filled_form();
        dashboard.chart.start_year = 2019;

        let report = dashboard.submit().await.unwrap();
        assert_eq!(report.predicted_yield, Some(50.12));
        assert!(!dashboard.busy);

        // window snaps back to the configured one after a prediction
        assert_eq!(dashboard.chart.start_year, 2024);
        assert_eq!(
            dashboard.chart_csv(),
            "year,historical,predicted\n2024,46,\n2025,,50.12"
        );
    }

    #[test]
    fn report_from_dashboard_defaults() {
        let request = filled_form().validate().unwrap();
        let outcome = PredictionOutcome::Structured(json!({
            "result": { "predicted_yield": 32.456, "recommendations": ["Use SRI"] }
        }));

        let report = build_report(&request, &outcome);

        assert_eq!(report.predicted_yield, Some(32.46));
        assert_eq!(report.units, "q_per_ha");
        assert_eq!(report.model_recommendations, vec!["Use SRI"]);
        assert_eq!(report.fertilizer.summary, "Soil N moderate — follow balanced N schedule.");
        assert_eq!(report.pest.summary, "No pest reported — maintain weekly scouting.");
        assert_eq!(report.conclusions[0], "Model predicts 32.46 q/ha for Paddy.");
        assert!(report.conclusions[1].contains("potential improvement"));
        assert!(report
            .fertilizer
            .recommendations
            .iter()
            .any(|r| r.starts_with("Predicted improvement")));
    }

    #[test]
    fn report_and_action_plan_agree_on_rounding() {
        let request = filled_form().validate().unwrap();
        let outcome = PredictionOutcome::Structured(json!({ "predicted_yield": 40.125 }));

        let report = build_report(&request, &outcome);

        assert_eq!(report.predicted_yield, Some(40.13));
        assert_eq!(report.yield_label(), "40.13 q_per_ha");
        assert_eq!(report.conclusions[0], "Model predicts 40.13 q/ha for Paddy.");
    }

    #[test]
    fn report_without_prediction() {
        let request = filled_form().validate().unwrap();
        let report = build_report(&request, &PredictionOutcome::Raw("busy".into()));

        assert_eq!(report.predicted_yield, None);
        assert_eq!(
            report.conclusions[0],
            "Prediction not available — use soil test and local advice."
        );
    }
}
