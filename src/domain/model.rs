use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Physical exertion category selecting the ml-per-kg multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityTier {
    Low,
    Medium,
    High,
}

impl ActivityTier {
    pub const ALL: [ActivityTier; 3] = [ActivityTier::Low, ActivityTier::Medium, ActivityTier::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityTier::Low => "low",
            ActivityTier::Medium => "medium",
            ActivityTier::High => "high",
        }
    }
}

impl fmt::Display for ActivityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityTier {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ActivityTier::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(s))
            .ok_or(ValidationError::MissingActivity)
    }
}

/// A validated weight/activity pair. Only `core::calculator::validate` builds one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculationInput {
    weight_kg: f64,
    activity: ActivityTier,
}

impl CalculationInput {
    pub(crate) fn new_unchecked(weight_kg: f64, activity: ActivityTier) -> Self {
        Self {
            weight_kg,
            activity,
        }
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn activity(&self) -> ActivityTier {
        self.activity
    }
}

/// A volume in liters with exactly one fractional digit, held as tenths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Liters {
    tenths: i64,
}

impl Liters {
    pub fn from_tenths(tenths: i64) -> Self {
        Self { tenths }
    }

    /// Rounds half-up to the nearest tenth of a liter.
    pub fn from_milliliters(ml: i64) -> Self {
        Self {
            tenths: (ml + 50).div_euclid(100),
        }
    }

    pub fn tenths(&self) -> i64 {
        self.tenths
    }

    pub fn as_f64(&self) -> f64 {
        self.tenths as f64 / 10.0
    }
}

impl fmt::Display for Liters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.tenths < 0 { "-" } else { "" };
        let abs = self.tenths.abs();
        write!(f, "{}{}.{}", sign, abs / 10, abs % 10)
    }
}

impl FromStr for Liters {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| format!("not a liter amount: {}", s))?;
        if !value.is_finite() {
            return Err(format!("not a liter amount: {}", s));
        }
        Ok(Self {
            tenths: (value * 10.0).round() as i64,
        })
    }
}

impl TryFrom<String> for Liters {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Liters> for String {
    fn from(value: Liters) -> Self {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub time_label: String,
    /// Signed: the final slot absorbs the remainder and can go negative for tiny totals.
    pub milliliters: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub total_milliliters: i64,
    pub total_liters: Liters,
    pub activity_label: String,
    pub weight_kg: f64,
    pub activity_tier: ActivityTier,
    pub schedule: Vec<ScheduleEntry>,
}

impl CalculationResult {
    pub fn schedule_total(&self) -> i64 {
        self.schedule.iter().map(|entry| entry.milliliters).sum()
    }
}

/// A result appended to the saved history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedResult {
    pub id: i64,
    pub date: DateTime<Utc>,
    #[serde(flatten)]
    pub result: CalculationResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ar,
    En,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ar" => Ok(Locale::Ar),
            "en" => Ok(Locale::En),
            other => Err(format!("unsupported locale: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationError {
    MissingWeight,
    WeightOutOfRange,
    MissingActivity,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingWeight => f.write_str("weight is missing or not a number"),
            ValidationError::WeightOutOfRange => f.write_str("weight must be between 1 and 300 kg"),
            ValidationError::MissingActivity => {
                f.write_str("activity must be one of low, medium, high")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Every violation found in one validation pass, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn contains(&self, error: ValidationError) -> bool {
        self.0.contains(&error)
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self(errors)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_liters_rounding_and_display() {
        assert_eq!(Liters::from_milliliters(2450).to_string(), "2.5");
        assert_eq!(Liters::from_milliliters(2449).to_string(), "2.4");
        assert_eq!(Liters::from_milliliters(4000).to_string(), "4.0");
        assert_eq!(Liters::from_milliliters(30).to_string(), "0.0");
    }

    #[test]
    fn test_liters_serializes_as_string() {
        let json = serde_json::to_string(&Liters::from_tenths(21)).unwrap();
        assert_eq!(json, "\"2.1\"");
        let back: Liters = serde_json::from_str("\"2.1\"").unwrap();
        assert_eq!(back.tenths(), 21);
    }

    #[test]
    fn test_activity_tier_parsing() {
        assert_eq!("medium".parse::<ActivityTier>(), Ok(ActivityTier::Medium));
        assert_eq!(" HIGH ".parse::<ActivityTier>(), Ok(ActivityTier::High));
        assert_eq!(
            "extreme".parse::<ActivityTier>(),
            Err(ValidationError::MissingActivity)
        );
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::default(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().as_str(), "light");
    }
}
