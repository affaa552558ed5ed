mod app;
mod cli;
mod config;
mod datasources;
mod error;
mod logic;
mod models;
mod ui;

use anyhow::Context;
use app::{build_report_from_result, Dashboard};
use clap::Parser;
use cli::{AdviseArgs, Cli, Commands, FormArgs, OutputArgs, PredictArgs};
use config::Config;
use error::KrishiMitraError;
use logic::advice::{fertilizer, pest};
use models::{Crop, District, PredictionForm, PredictionResult, Season, YieldChart, YieldReport};
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;
use ui::{prompt_form, ReportView};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over -v
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let command = cli
        .command
        .unwrap_or_else(|| Commands::Predict(PredictArgs::default()));

    match command {
        Commands::Init => {
            Config::setup_interactive().context("Setup failed")?;
            return Ok(());
        }
        Commands::Options => {
            print_options();
            return Ok(());
        }
        _ => {}
    }

    let config = match Config::load(cli.config) {
        Ok(c) => c.with_api_url(cli.api_url),
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Run `krishimitra init` to write a fresh config file");
            std::process::exit(1);
        }
    };
    config.validate()?;

    match command {
        Commands::Predict(args) => run_predict(&config, args).await,
        Commands::Advise(args) => run_advise(&config, args),
        Commands::Check => run_check(&config).await,
        Commands::Init | Commands::Options => Ok(()),
    }
}

async fn run_predict(config: &Config, args: PredictArgs) -> anyhow::Result<()> {
    let mut dashboard = Dashboard::new(config);

    let form = args.form.apply(dashboard.form.clone())?;
    dashboard.form = if should_prompt(&args.form, &form) {
        prompt_form(form)?
    } else {
        form
    };

    let status = match dashboard.submit().await {
        Ok(_) => None,
        Err(e @ KrishiMitraError::Validation(_)) => {
            eprintln!("{}", e);
            std::process::exit(e.exit_code());
        }
        Err(e) => {
            if let KrishiMitraError::Prediction { status, .. } = &e {
                tracing::debug!(status = *status, "Prediction service rejected the request");
            }
            Some(format!("Prediction failed: {}", e))
        }
    };
    apply_window(&mut dashboard.chart, &args.output);

    if let Some(ref path) = args.output.csv {
        std::fs::write(path, dashboard.chart_csv())
            .with_context(|| format!("Failed to write chart CSV to {}", path.display()))?;
        tracing::info!("Chart written to {}", path.display());
    }

    emit(dashboard.report.as_ref(), status.as_deref(), &args.output)?;

    if status.is_some() {
        std::process::exit(1);
    }
    Ok(())
}

fn run_advise(config: &Config, args: AdviseArgs) -> anyhow::Result<()> {
    let mut form = args.form.apply(config.form.clone())?;
    if args.form.interactive {
        form = prompt_form(form)?;
    }
    let request = match form.validate() {
        Ok(request) => request,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(e.exit_code());
        }
    };

    let result = PredictionResult {
        predicted_yield: args.predicted_yield,
        ..Default::default()
    };
    let report = build_report_from_result(&request, result);

    let mut chart =
        YieldChart::default().with_window(config.chart.start_year, config.chart.end_year);
    apply_window(&mut chart, &args.output);

    if let Some(ref path) = args.output.csv {
        std::fs::write(path, chart.to_csv(report.predicted_yield))
            .with_context(|| format!("Failed to write chart CSV to {}", path.display()))?;
    }

    emit(Some(&report), None, &args.output)
}

async fn run_check(config: &Config) -> anyhow::Result<()> {
    let dashboard = Dashboard::new(config);

    println!("Prediction endpoint: {}", dashboard.client().endpoint());
    println!(
        "Chart window:        {}-{} (prediction plotted at {})",
        dashboard.chart.start_year,
        dashboard.chart.end_year,
        dashboard.chart.predicted_year()
    );

    if dashboard.client().test_connection().await? {
        println!("Prediction service:  OK");
        Ok(())
    } else {
        println!("Prediction service:  OFFLINE");
        std::process::exit(1);
    }
}

/// Prompt on request, or to fill an incomplete form from flags when someone
/// is at the terminal. Scripts get the validation error instead.
fn should_prompt(args: &FormArgs, form: &PredictionForm) -> bool {
    args.interactive
        || (!form.is_complete() && args.file.is_none() && std::io::stdin().is_terminal())
}

fn apply_window(chart: &mut YieldChart, output: &OutputArgs) {
    if let Some(start) = output.start_year {
        chart.start_year = start;
    }
    if let Some(end) = output.end_year {
        chart.end_year = end;
    }
}

fn emit(
    report: Option<&YieldReport>,
    status: Option<&str>,
    output: &OutputArgs,
) -> anyhow::Result<()> {
    if output.json {
        let json = serde_json::to_string_pretty(&report)?;
        println!("{}", json);
        if let Some(status) = status {
            eprintln!("{}", status);
        }
    } else {
        print!("{}", ReportView::new(report).with_status(status).render());
    }
    Ok(())
}

fn print_options() {
    let join = |names: Vec<&str>| names.join(", ");

    println!("Districts: {}", join(District::ALL.iter().map(|d| d.as_str()).collect()));
    println!("Crops:     {}", join(Crop::ALL.iter().map(|c| c.as_str()).collect()));
    println!("Seasons:   {}", join(Season::ALL.iter().map(|s| s.as_str()).collect()));

    println!();
    println!("Fertilizer rules:");
    for (id, name) in fertilizer::engine().list_rules() {
        println!("  {:<18} {}", id, name);
    }
    println!("Pest rules:");
    for (id, name) in pest::engine().list_rules() {
        println!("  {:<18} {}", id, name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interactive_flag_always_prompts() {
        let args = FormArgs {
            interactive: true,
            ..Default::default()
        };
        assert!(should_prompt(&args, &PredictionForm::default()));
    }

    #[test]
    fn complete_or_file_backed_forms_skip_prompt() {
        let complete = PredictionForm {
            district: Some(District::Puri),
            crop: Some(Crop::Paddy),
            season: Some(Season::Kharif),
            ..Default::default()
        };
        assert!(!should_prompt(&FormArgs::default(), &complete));

        let from_file = FormArgs {
            file: Some("form.yaml".into()),
            ..Default::default()
        };
        assert!(!should_prompt(&from_file, &PredictionForm::default()));
    }
}
