pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, Command};

pub use crate::config::cli::{ClipboardFile, LocalStorage, StdoutShare};
pub use crate::config::Settings;
pub use crate::core::calculator::{calculate, meter_percentage, validate};
pub use crate::core::session::IntakeEngine;
pub use crate::domain::model::{ActivityTier, CalculationResult, Locale, ValidationError, ValidationErrors};
pub use crate::utils::error::{IntakeError, Result};
