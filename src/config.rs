use crate::error::{KrishiMitraError, Result};
use crate::models::{
    Crop, District, PredictionForm, Season, DEFAULT_END_YEAR, DEFAULT_START_YEAR,
};
use dialoguer::{Input, Select};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
pub const API_URL_ENV: &str = "KRISHIMITRA_API_URL";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub form: PredictionForm,
    #[serde(default)]
    pub chart: ChartConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_url")]
    pub base_url: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct ChartConfig {
    #[serde(default = "default_start_year")]
    pub start_year: i32,
    #[serde(default = "default_end_year")]
    pub end_year: i32,
}

fn default_start_year() -> i32 {
    DEFAULT_START_YEAR
}

fn default_end_year() -> i32 {
    DEFAULT_END_YEAR
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            start_year: DEFAULT_START_YEAR,
            end_year: DEFAULT_END_YEAR,
        }
    }
}

impl Config {
    /// Load config from the given path or the standard locations.
    ///
    /// Unlike an explicit `--config`, a missing file in the standard
    /// locations is fine: every setting has a default.
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let mut config = match config_override {
            Some(path) => {
                if !path.exists() {
                    return Err(KrishiMitraError::Config(format!(
                        "Config file not found at {:?}",
                        path
                    )));
                }
                Self::from_file(&path)?
            }
            None => match Self::find_config_path() {
                Some(path) => Self::from_file(&path)?,
                None => {
                    tracing::debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.api.base_url = url;
            }
        }

        config.normalize();
        Ok(config)
    }

    fn from_file(path: &PathBuf) -> Result<Self> {
        tracing::debug!("Loading config from {}", path.display());

        let config_str = std::fs::read_to_string(path)
            .map_err(|e| KrishiMitraError::Config(format!("Failed to read config: {}", e)))?;

        Self::parse(&config_str)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content);

        serde_yaml::from_str(&content)
            .map_err(|e| KrishiMitraError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn with_api_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.api.base_url = url;
            self.normalize();
        }
        self
    }

    fn normalize(&mut self) {
        let trimmed = self.api.base_url.trim().trim_end_matches('/');
        self.api.base_url = if trimmed.is_empty() {
            default_api_url()
        } else {
            trimmed.to_string()
        };
    }

    pub fn validate(&self) -> Result<()> {
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://")
        {
            return Err(KrishiMitraError::Config(format!(
                "api.base_url must be an http(s) URL, got '{}'",
                self.api.base_url
            )));
        }

        if self.chart.start_year > self.chart.end_year {
            return Err(KrishiMitraError::Config(format!(
                "chart.start_year ({}) is after chart.end_year ({})",
                self.chart.start_year, self.chart.end_year
            )));
        }

        Ok(())
    }

    /// First existing config among the local and XDG locations.
    fn find_config_path() -> Option<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        dirs::config_dir()
            .map(|dir| dir.join("krishimitra").join("config.yaml"))
            .filter(|p| p.exists())
    }

    /// Default path for writing new config files (~/.config/krishimitra/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| KrishiMitraError::Config("Cannot determine config directory".into()))?
            .join("krishimitra");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up KrishiMitra!");
        println!();

        println!("Prediction service");
        let base_url: String = Input::new()
            .with_prompt("  Base URL")
            .default(DEFAULT_API_URL.into())
            .interact_text()?;

        println!();
        println!("Form defaults");
        let mut form = PredictionForm::default();

        let district = Select::new()
            .with_prompt("  Default district")
            .items(&District::ALL.map(|d| d.as_str()))
            .default(0)
            .interact()?;
        form.district = Some(District::ALL[district]);

        let crop = Select::new()
            .with_prompt("  Default crop")
            .items(&Crop::ALL.map(|c| c.as_str()))
            .default(0)
            .interact()?;
        form.crop = Some(Crop::ALL[crop]);

        let season = Select::new()
            .with_prompt("  Default season")
            .items(&Season::ALL.map(|s| s.as_str()))
            .default(0)
            .interact()?;
        form.season = Some(Season::ALL[season]);

        println!();

        let mut config = Config {
            api: ApiConfig { base_url },
            form,
            chart: ChartConfig::default(),
        };
        config.normalize();
        config.validate()?;

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| KrishiMitraError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# KrishiMitra Configuration\n\
             # Generated by `krishimitra init`\n\
             # Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
        let re = match regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") {
            Ok(re) => re,
            Err(_) => return result,
        };

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }
}
