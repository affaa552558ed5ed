use super::prediction::round_yield;
use super::request::measured;
use serde::{Deserialize, Serialize};

pub const DEFAULT_START_YEAR: i32 = 2018;
pub const DEFAULT_END_YEAR: i32 = 2024;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub historical: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted: Option<f64>,
}

impl ChartPoint {
    pub fn historical(year: i32, value: f64) -> Self {
        Self {
            year,
            historical: Some(value),
            predicted: None,
        }
    }

    pub fn predicted(year: i32, value: f64) -> Self {
        Self {
            year,
            historical: None,
            predicted: Some(value),
        }
    }
}

/// Demo district series shown until real history is wired in.
pub fn default_historical() -> Vec<ChartPoint> {
    vec![
        ChartPoint::historical(2018, 40.0),
        ChartPoint::historical(2019, 42.0),
        ChartPoint::historical(2020, 38.0),
        ChartPoint::historical(2021, 45.0),
        ChartPoint::historical(2022, 43.0),
        ChartPoint::historical(2023, 48.0),
        ChartPoint::historical(2024, 46.0),
    ]
}

/// Yield history plus the predicted point, clipped to a year window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YieldChart {
    pub historical: Vec<ChartPoint>,
    pub start_year: i32,
    pub end_year: i32,
}

impl Default for YieldChart {
    fn default() -> Self {
        Self {
            historical: default_historical(),
            start_year: DEFAULT_START_YEAR,
            end_year: DEFAULT_END_YEAR,
        }
    }
}

impl YieldChart {
    pub fn with_window(mut self, start_year: i32, end_year: i32) -> Self {
        self.start_year = start_year;
        self.end_year = end_year;
        self
    }

    /// Year the predicted point is plotted at.
    pub fn predicted_year(&self) -> i32 {
        self.end_year + 1
    }

    /// Points inside the window, with the prediction appended one year past
    /// the window end.
    pub fn points(&self, predicted_yield: Option<f64>) -> Vec<ChartPoint> {
        let mut points: Vec<ChartPoint> = self
            .historical
            .iter()
            .filter(|p| p.year >= self.start_year && p.year <= self.end_year)
            .copied()
            .collect();

        if let Some(value) = measured(predicted_yield).filter(|v| v.is_finite()) {
            points.push(ChartPoint::predicted(
                self.predicted_year(),
                round_yield(value),
            ));
        }

        points
    }

    pub fn to_csv(&self, predicted_yield: Option<f64>) -> String {
        points_to_csv(&self.points(predicted_yield))
    }
}

/// `year,historical,predicted` with blanks for absent values, rows joined
/// by `\n` and no trailing newline.
pub fn points_to_csv(points: &[ChartPoint]) -> String {
    let mut lines = Vec::with_capacity(points.len() + 1);
    lines.push("year,historical,predicted".to_string());

    for point in points {
        lines.push(format!(
            "{},{},{}",
            point.year,
            csv_cell(point.historical),
            csv_cell(point.predicted)
        ));
    }

    lines.join("\n")
}

fn csv_cell(value: Option<f64>) -> String {
    measured(value).map(|v| v.to_string()).unwrap_or_default()
}
