use crate::error::Result;
use crate::models::{non_blank, Crop, District, PredictionForm, Season};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "krishimitra",
    version,
    about = "Crop yield prediction with fertilizer and pest advice"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Prediction service base URL (overrides config and KRISHIMITRA_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Request a yield prediction and print advice (default)
    Predict(PredictArgs),
    /// Run the advice heuristics without contacting the prediction service
    Advise(AdviseArgs),
    /// Validate config and test the prediction service connection
    Check,
    /// Interactive setup of the config file
    Init,
    /// List districts, crops, seasons and advice rules
    Options,
}

#[derive(Args, Default)]
pub struct PredictArgs {
    #[command(flatten)]
    pub form: FormArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Default)]
pub struct AdviseArgs {
    #[command(flatten)]
    pub form: FormArgs,

    /// Yield to reason about, q/ha (omit to get the no-prediction plan)
    #[arg(long)]
    pub predicted_yield: Option<f64>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Default)]
pub struct FormArgs {
    /// Read the form from a YAML or JSON file
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Prompt for the form fields
    #[arg(short, long)]
    pub interactive: bool,

    #[arg(long, value_parser = parse_district)]
    pub district: Option<District>,

    #[arg(long, value_parser = parse_crop)]
    pub crop: Option<Crop>,

    #[arg(long, value_parser = parse_season)]
    pub season: Option<Season>,

    /// Soil pH
    #[arg(long)]
    pub ph: Option<f64>,

    /// Soil N, kg/ha
    #[arg(long)]
    pub soil_n: Option<f64>,

    /// Soil P, kg/ha
    #[arg(long)]
    pub soil_p: Option<f64>,

    /// Soil K, kg/ha
    #[arg(long)]
    pub soil_k: Option<f64>,

    /// Rainfall over the last 30 days, mm
    #[arg(long)]
    pub rainfall: Option<f64>,

    /// Mean temperature over the last 30 days, °C
    #[arg(long)]
    pub temp: Option<f64>,

    /// Last season's yield, q/ha
    #[arg(long, conflicts_with = "no_previous_yield")]
    pub previous_yield: Option<f64>,

    /// Send the request without a previous yield
    #[arg(long)]
    pub no_previous_yield: bool,

    /// Fertilizer product, e.g. "NPK 10-26-26"
    #[arg(long)]
    pub fertilizer: Option<String>,

    /// Fertilizer applied, kg/ha
    #[arg(long)]
    pub fertilizer_amount: Option<f64>,

    /// Recent pest or disease seen in the field
    #[arg(long)]
    pub pest: Option<String>,
}

#[derive(Args, Default)]
pub struct OutputArgs {
    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Write the yield chart as CSV to this path
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// First year of the chart window
    #[arg(long)]
    pub start_year: Option<i32>,

    /// Last year of the chart window
    #[arg(long)]
    pub end_year: Option<i32>,
}

impl FormArgs {
    /// Layer file contents and flags over `base`.
    pub fn apply(&self, base: PredictionForm) -> Result<PredictionForm> {
        let mut form = match &self.file {
            Some(path) => read_form_file(path)?,
            None => base,
        };

        if self.district.is_some() {
            form.district = self.district;
        }
        if self.crop.is_some() {
            form.crop = self.crop;
        }
        if self.season.is_some() {
            form.season = self.season;
        }

        override_reading(&mut form.soil_ph, self.ph);
        override_reading(&mut form.soil_n, self.soil_n);
        override_reading(&mut form.soil_p, self.soil_p);
        override_reading(&mut form.soil_k, self.soil_k);
        override_reading(&mut form.rainfall_30d, self.rainfall);
        override_reading(&mut form.temp_mean_30d, self.temp);
        override_reading(&mut form.previous_yield, self.previous_yield);
        override_reading(&mut form.fertilizer_amount_kg_per_ha, self.fertilizer_amount);

        if self.no_previous_yield {
            form.previous_yield = None;
        }
        if let Some(ref fertilizer) = self.fertilizer {
            form.fertilizer_used = non_blank(Some(fertilizer.as_str()));
        }
        if let Some(ref pest) = self.pest {
            form.recent_pest_issue = non_blank(Some(pest.as_str()));
        }

        Ok(form)
    }
}

fn override_reading(field: &mut Option<f64>, value: Option<f64>) {
    if value.is_some() {
        *field = value;
    }
}

fn read_form_file(path: &PathBuf) -> Result<PredictionForm> {
    let content = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let form = if is_json {
        serde_json::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };
    tracing::debug!("Loaded form from {}", path.display());
    Ok(form)
}

fn parse_district(s: &str) -> std::result::Result<District, String> {
    District::from_str(s)
        .ok_or_else(|| format!("unknown district '{}' (see `krishimitra options`)", s))
}

fn parse_crop(s: &str) -> std::result::Result<Crop, String> {
    Crop::from_str(s)
        .ok_or_else(|| format!("unknown crop '{}' (see `krishimitra options`)", s))
}

fn parse_season(s: &str) -> std::result::Result<Season, String> {
    Season::from_str(s)
        .ok_or_else(|| format!("unknown season '{}' (see `krishimitra options`)", s))
}
