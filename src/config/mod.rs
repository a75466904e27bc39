pub mod cli;
pub mod toml_config;

use crate::domain::model::Locale;
use crate::domain::ports::SettingsProvider;
use crate::utils::error::{IntakeError, Result};
use crate::utils::validation::{self, Validate};
use toml_config::{TomlConfig, DEFAULT_DATA_DIR, DEFAULT_PAGE_URL, DEFAULT_WEIGHT_KG};

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "water-intake")]
#[command(about = "Daily water intake calculator")]
pub struct CliConfig {
    /// Path to a TOML settings file
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Directory for saved results and preferences
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Output language (ar or en)
    #[arg(long, global = true)]
    pub locale: Option<String>,

    /// Link included in shared results
    #[arg(long, global = true)]
    pub page_url: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Compute the recommended daily intake
    Calculate {
        #[arg(long)]
        weight: Option<String>,
        #[arg(long)]
        activity: Option<String>,
        /// text, json, csv or tsv
        #[arg(long, default_value = "text")]
        format: String,
        #[arg(long)]
        arabic_digits: bool,
        /// Append the result to the saved history
        #[arg(long)]
        save: bool,
    },
    /// Hydration meter preview from weight alone
    Meter {
        #[arg(long, allow_negative_numbers = true)]
        weight: Option<f64>,
    },
    /// Share a result, or copy it to a clipboard file
    Share {
        #[arg(long)]
        weight: Option<String>,
        #[arg(long)]
        activity: Option<String>,
        /// Write the text to this file instead of printing it
        #[arg(long)]
        clipboard: Option<String>,
        /// Link to include instead of the configured page URL
        #[arg(long)]
        url: Option<String>,
    },
    /// List or clear saved results
    History {
        #[arg(long)]
        clear: bool,
    },
    /// Write saved results to a zip archive
    Export {
        #[arg(long, default_value = "water-history.zip")]
        output: String,
    },
    /// Show or toggle the stored theme
    Theme {
        #[arg(long)]
        toggle: bool,
    },
    /// Step-by-step interactive calculator
    Wizard,
}

/// Effective settings: file values first, command-line flags on top.
#[derive(Debug, Clone)]
pub struct Settings {
    pub data_dir: String,
    pub locale: Locale,
    pub page_url: String,
    pub default_weight: f64,
    pub verbose: bool,
    pub json_logs: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: DEFAULT_DATA_DIR.to_string(),
            locale: Locale::default(),
            page_url: DEFAULT_PAGE_URL.to_string(),
            default_weight: DEFAULT_WEIGHT_KG,
            verbose: false,
            json_logs: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub data_dir: Option<String>,
    pub locale: Option<String>,
    pub page_url: Option<String>,
    pub verbose: bool,
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl From<&CliConfig> for Overrides {
    fn from(cli: &CliConfig) -> Self {
        Self {
            data_dir: cli.data_dir.clone(),
            locale: cli.locale.clone(),
            page_url: cli.page_url.clone(),
            verbose: cli.verbose,
            json_logs: cli.log_json,
        }
    }
}

fn parse_locale(field: &str, raw: &str) -> Result<Locale> {
    raw.parse()
        .map_err(|reason| IntakeError::InvalidConfigValueError {
            field: field.to_string(),
            value: raw.to_string(),
            reason,
        })
}

impl Settings {
    pub fn resolve(file: Option<&TomlConfig>, overrides: &Overrides) -> Result<Self> {
        let mut settings = Settings::default();

        if let Some(file) = file {
            file.validate()?;
            if let Some(dir) = &file.storage.data_dir {
                settings.data_dir = dir.clone();
            }
            if let Some(locale) = &file.app.locale {
                settings.locale = parse_locale("app.locale", locale)?;
            }
            if let Some(url) = &file.app.page_url {
                settings.page_url = url.clone();
            }
            if let Some(weight) = file.app.default_weight {
                settings.default_weight = weight;
            }
            settings.verbose = file.verbose();
            settings.json_logs = file.json_logs();
        }

        if let Some(dir) = &overrides.data_dir {
            settings.data_dir = dir.clone();
        }
        if let Some(locale) = &overrides.locale {
            settings.locale = parse_locale("--locale", locale)?;
        }
        if let Some(url) = &overrides.page_url {
            settings.page_url = url.clone();
        }
        settings.verbose |= overrides.verbose;
        settings.json_logs |= overrides.json_logs;

        settings.validate()?;
        Ok(settings)
    }
}

impl Settings {
    /// The link attached to shared results; a per-command URL replaces the configured one.
    pub fn share_url(&self, override_url: Option<&str>) -> Result<String> {
        match override_url {
            Some(url) => {
                validation::validate_url("--url", url)?;
                Ok(url.to_string())
            }
            None => Ok(self.page_url.clone()),
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_path("data_dir", &self.data_dir)?;
        validation::validate_url("page_url", &self.page_url)?;
        Ok(())
    }
}

impl SettingsProvider for Settings {
    fn data_dir(&self) -> &str {
        &self.data_dir
    }

    fn locale(&self) -> Locale {
        self.locale
    }

    fn page_url(&self) -> &str {
        &self.page_url
    }

    fn default_weight(&self) -> f64 {
        self.default_weight
    }
}
