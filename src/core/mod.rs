pub mod calculator;
pub mod locale;
pub mod report;
pub mod session;
pub mod wizard;

pub use crate::domain::model::{CalculationInput, CalculationResult, ScheduleEntry};
pub use crate::domain::ports::{SettingsProvider, ShareSink, Storage};
pub use crate::utils::error::Result;
