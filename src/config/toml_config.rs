use crate::core::calculator::{MAX_WEIGHT_KG, MIN_WEIGHT_KG};
use crate::utils::error::{IntakeError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_PAGE_URL: &str = "https://water-intake.local/";
pub const DEFAULT_WEIGHT_KG: f64 = 70.0;
pub const DEFAULT_DATA_DIR: &str = "./.water-intake";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub app: AppSection,
    #[serde(default)]
    pub storage: StorageSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppSection {
    pub locale: Option<String>,
    pub page_url: Option<String>,
    pub default_weight: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageSection {
    pub data_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSection {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// Reads and parses a settings file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(IntakeError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| IntakeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| IntakeError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(url) = &self.app.page_url {
            validation::validate_url("app.page_url", url)?;
        }
        if let Some(weight) = self.app.default_weight {
            validation::validate_range("app.default_weight", weight, MIN_WEIGHT_KG, MAX_WEIGHT_KG)?;
        }
        if let Some(locale) = &self.app.locale {
            locale
                .parse::<crate::domain::model::Locale>()
                .map_err(|reason| IntakeError::InvalidConfigValueError {
                    field: "app.locale".to_string(),
                    value: locale.clone(),
                    reason,
                })?;
        }
        if let Some(dir) = &self.storage.data_dir {
            validation::validate_path("storage.data_dir", dir)?;
        }
        Ok(())
    }

    pub fn verbose(&self) -> bool {
        self.logging.verbose.unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.json.unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
