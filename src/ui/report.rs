use crate::models::{Advice, YieldReport, NO_CONCLUSIONS};
use std::fmt::Write;

/// Lines of each advice list shown in the advice panels.
const PANEL_LINES: usize = 4;

/// Plain-text rendering of a [`YieldReport`].
pub struct ReportView<'a> {
    pub report: Option<&'a YieldReport>,
    pub status: Option<&'a str>,
}

impl<'a> ReportView<'a> {
    pub fn new(report: Option<&'a YieldReport>) -> Self {
        Self {
            report,
            status: None,
        }
    }

    pub fn with_status(mut self, status: Option<&'a str>) -> Self {
        self.status = status;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        let Some(report) = self.report else {
            let _ = writeln!(out, "{}", NO_CONCLUSIONS);
            self.render_status(&mut out);
            return out;
        };

        let _ = writeln!(
            out,
            "KrishiMitra: {} / {} / {}",
            report.district, report.crop, report.season
        );
        let _ = writeln!(out, "Predicted yield: {}", report.yield_label());

        if !report.model_recommendations.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Model recommendations");
            for rec in &report.model_recommendations {
                let _ = writeln!(out, "  - {}", rec);
            }
        }

        render_advice(&mut out, &report.fertilizer);
        render_advice(&mut out, &report.pest);

        let _ = writeln!(out);
        let _ = writeln!(out, "Action plan");
        for (i, conclusion) in report.conclusions.iter().enumerate() {
            let _ = writeln!(out, "  Step {}: {}", i + 1, conclusion);
        }

        self.render_status(&mut out);
        out
    }

    fn render_status(&self, out: &mut String) {
        if let Some(status) = self.status {
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", status);
        }
    }
}

fn render_advice(out: &mut String, advice: &Advice) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{} advice: {}", advice.category, advice.summary);
    for rec in advice.recommendations.iter().take(PANEL_LINES) {
        let _ = writeln!(out, "  - {}", rec);
    }
}
