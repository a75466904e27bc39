//! Water intake calculation: input validation, the daily total, the
//! eight-slot drinking schedule and the hydration meter.
//!
//! Everything here is pure. Callers own the inputs and the results.

use crate::core::locale;
use crate::domain::model::{
    ActivityTier, CalculationInput, CalculationResult, Liters, Locale, ScheduleEntry,
    ValidationError, ValidationErrors,
};

pub const MIN_WEIGHT_KG: f64 = 1.0;
pub const MAX_WEIGHT_KG: f64 = 300.0;

/// Milliliters per glass; sizes the schedule granularity.
pub const GLASS_ML: i64 = 250;
pub const SCHEDULE_SLOTS: usize = 8;

/// Liters that fill the hydration meter to 100%.
pub const METER_FULL_LITERS: f64 = 4.0;

/// Milliliters of water per kilogram of body weight per day.
pub fn multiplier(tier: ActivityTier) -> u32 {
    match tier {
        ActivityTier::Low => 30,
        ActivityTier::Medium => 35,
        ActivityTier::High => 40,
    }
}

fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Parses and range-checks a raw weight field.
pub fn check_weight(raw_weight: Option<&str>) -> Result<f64, ValidationError> {
    let raw = raw_weight
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(ValidationError::MissingWeight)?;

    let weight: f64 = raw.parse().map_err(|_| ValidationError::MissingWeight)?;
    if weight.is_nan() {
        return Err(ValidationError::MissingWeight);
    }
    if !(MIN_WEIGHT_KG..=MAX_WEIGHT_KG).contains(&weight) {
        return Err(ValidationError::WeightOutOfRange);
    }
    Ok(weight)
}

pub fn check_activity(raw_activity: Option<&str>) -> Result<ActivityTier, ValidationError> {
    raw_activity
        .ok_or(ValidationError::MissingActivity)?
        .parse()
}

/// Checks both fields and reports every violation, weight first.
pub fn validate(
    raw_weight: Option<&str>,
    raw_activity: Option<&str>,
) -> Result<CalculationInput, ValidationErrors> {
    let weight = check_weight(raw_weight);
    let activity = check_activity(raw_activity);

    match (weight, activity) {
        (Ok(weight), Ok(activity)) => Ok(CalculationInput::new_unchecked(weight, activity)),
        (weight, activity) => {
            let errors: Vec<ValidationError> = [weight.err(), activity.err()]
                .into_iter()
                .flatten()
                .collect();
            Err(ValidationErrors::from(errors))
        }
    }
}

pub fn calculate(input: &CalculationInput) -> CalculationResult {
    calculate_with_locale(input, Locale::default())
}

pub fn calculate_with_locale(input: &CalculationInput, locale: Locale) -> CalculationResult {
    let tier = input.activity();
    let total_milliliters = round_half_up(input.weight_kg() * f64::from(multiplier(tier)));
    let total_liters = Liters::from_milliliters(total_milliliters);

    CalculationResult {
        total_milliliters,
        total_liters,
        activity_label: locale::activity_label(locale, tier).to_string(),
        weight_kg: input.weight_kg(),
        activity_tier: tier,
        schedule: derive_schedule(total_liters, total_milliliters, locale),
    }
}

/// Splits the day's volume over eight fixed slots.
///
/// The first seven slots get an equal share of whole glasses
/// (`ceil(liters * 4) / 8` glasses each, rounded to the milliliter); the
/// last slot takes whatever remains of `total_milliliters`, so the entries
/// always sum to the total. For very small totals the remainder is negative.
pub fn derive_schedule(
    total_liters: Liters,
    total_milliliters: i64,
    locale: Locale,
) -> Vec<ScheduleEntry> {
    // ceil(tenths * 4 / 10)
    let glass_count = (total_liters.tenths() * 4 + 9).div_euclid(10);
    // round_half_up(glass_count / 8 * 250) without leaving integers
    let slot_ml = (2 * glass_count * GLASS_ML + SCHEDULE_SLOTS as i64)
        .div_euclid(2 * SCHEDULE_SLOTS as i64);

    let labels = &locale::strings(locale).time_labels;
    let leading = (SCHEDULE_SLOTS - 1) as i64;

    labels
        .iter()
        .enumerate()
        .map(|(index, label)| ScheduleEntry {
            time_label: (*label).to_string(),
            milliliters: if index < SCHEDULE_SLOTS - 1 {
                slot_ml
            } else {
                total_milliliters - slot_ml * leading
            },
        })
        .collect()
}

/// Live preview from weight alone, assuming medium activity.
pub fn meter_percentage(weight_kg: f64) -> f64 {
    if !(weight_kg > 0.0) {
        return 0.0;
    }
    let estimated_liters = weight_kg * f64::from(multiplier(ActivityTier::Medium)) / 1000.0;
    (estimated_liters / METER_FULL_LITERS * 100.0).min(100.0)
}

/// Water level shown next to a finished result.
pub fn result_meter_percentage(total_liters: Liters) -> f64 {
    (total_liters.as_f64() / METER_FULL_LITERS * 100.0).clamp(0.0, 100.0)
}
