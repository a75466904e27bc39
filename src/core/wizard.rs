//! Three-step input wizard: weight, activity, result.
//!
//! The state is a plain value. Every command consumes the current state and
//! returns the next one; commands are looked up by name in [`COMMANDS`].

use crate::core::calculator::{self, check_weight};
use crate::domain::model::{CalculationResult, Locale, ValidationError};
use crate::utils::error::{IntakeError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    #[default]
    Weight,
    Activity,
    Result,
}

impl Step {
    pub fn number(&self) -> u8 {
        match self {
            Step::Weight => 1,
            Step::Activity => 2,
            Step::Result => 3,
        }
    }

    fn prev(self) -> Self {
        match self {
            Step::Weight | Step::Activity => Step::Weight,
            Step::Result => Step::Activity,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WizardState {
    pub step: Step,
    pub weight: Option<String>,
    pub activity: Option<String>,
    pub errors: Vec<ValidationError>,
    pub last_result: Option<CalculationResult>,
    pub locale: Locale,
}

impl WizardState {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            ..Default::default()
        }
    }

    /// Hydration meter for whatever weight is currently typed in.
    pub fn meter_preview(&self) -> f64 {
        let weight = self
            .weight
            .as_deref()
            .and_then(|w| w.trim().parse::<f64>().ok())
            .unwrap_or(0.0);
        calculator::meter_percentage(weight)
    }
}

pub type Handler = fn(WizardState, Option<&str>) -> WizardState;

pub struct CommandSpec {
    pub name: &'static str,
    pub usage: &'static str,
    pub handler: Handler,
}

pub static COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "weight",
        usage: "weight <kg>      set the body weight",
        handler: set_weight,
    },
    CommandSpec {
        name: "activity",
        usage: "activity <tier>  choose low, medium or high",
        handler: select_activity,
    },
    CommandSpec {
        name: "next",
        usage: "next             go to the next step",
        handler: next_step,
    },
    CommandSpec {
        name: "back",
        usage: "back             go to the previous step",
        handler: prev_step,
    },
    CommandSpec {
        name: "calculate",
        usage: "calculate        compute the daily intake",
        handler: calculate,
    },
    CommandSpec {
        name: "reset",
        usage: "reset            start over once a result is shown",
        handler: reset,
    },
];

pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|spec| spec.name == name)
}

pub fn dispatch(state: WizardState, name: &str, arg: Option<&str>) -> Result<WizardState> {
    let spec = lookup(name).ok_or_else(|| IntakeError::UnknownCommand {
        name: name.to_string(),
    })?;
    tracing::debug!("wizard command '{}' at step {}", spec.name, state.step.number());
    Ok((spec.handler)(state, arg))
}

/// Splits `"weight 70"` into command and argument and dispatches it.
pub fn dispatch_line(state: WizardState, line: &str) -> Result<WizardState> {
    let mut parts = line.split_whitespace();
    let name = parts.next().unwrap_or_default().to_ascii_lowercase();
    let arg = parts.next();
    dispatch(state, &name, arg)
}

fn set_weight(mut state: WizardState, arg: Option<&str>) -> WizardState {
    state.weight = arg.map(str::to_string);
    state.errors.clear();
    // Range problems surface while typing; an empty field stays quiet until submit.
    if let Err(ValidationError::WeightOutOfRange) = check_weight(arg) {
        state.errors.push(ValidationError::WeightOutOfRange);
    }
    state
}

fn select_activity(mut state: WizardState, arg: Option<&str>) -> WizardState {
    state.activity = arg.map(str::to_string);
    state.errors.retain(|e| *e != ValidationError::MissingActivity);
    state
}

fn next_step(mut state: WizardState, arg: Option<&str>) -> WizardState {
    match state.step {
        Step::Weight => match check_weight(state.weight.as_deref()) {
            Ok(_) => {
                state.errors.clear();
                state.step = Step::Activity;
                state
            }
            Err(error) => {
                state.errors = vec![error];
                state
            }
        },
        Step::Activity => calculate(state, arg),
        Step::Result => state,
    }
}

fn prev_step(mut state: WizardState, _arg: Option<&str>) -> WizardState {
    state.step = state.step.prev();
    state
}

fn calculate(mut state: WizardState, _arg: Option<&str>) -> WizardState {
    match calculator::validate(state.weight.as_deref(), state.activity.as_deref()) {
        Ok(input) => {
            state.errors.clear();
            state.last_result = Some(calculator::calculate_with_locale(&input, state.locale));
            state.step = Step::Result;
        }
        Err(errors) => {
            tracing::debug!("wizard validation failed: {}", errors);
            state.errors = errors.errors().to_vec();
        }
    }
    state
}

fn reset(state: WizardState, _arg: Option<&str>) -> WizardState {
    if state.step != Step::Result {
        return state;
    }
    WizardState::new(state.locale)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(state: WizardState, lines: &[&str]) -> WizardState {
        lines
            .iter()
            .fold(state, |state, line| dispatch_line(state, line).unwrap())
    }

    #[test]
    fn test_full_flow_reaches_result() {
        let state = run(
            WizardState::new(Locale::En),
            &["weight 70", "next", "activity medium", "next"],
        );
        assert_eq!(state.step, Step::Result);
        assert!(state.errors.is_empty());
        let result = state.last_result.unwrap();
        assert_eq!(result.total_milliliters, 2450);
        assert_eq!(result.activity_label, "Moderate activity");
    }

    #[test]
    fn test_next_blocked_without_valid_weight() {
        let state = run(WizardState::default(), &["next"]);
        assert_eq!(state.step, Step::Weight);
        assert_eq!(state.errors, vec![ValidationError::MissingWeight]);

        let state = run(state, &["weight 301", "next"]);
        assert_eq!(state.step, Step::Weight);
        assert_eq!(state.errors, vec![ValidationError::WeightOutOfRange]);
    }

    #[test]
    fn test_typing_out_of_range_weight_flags_immediately() {
        let state = run(WizardState::default(), &["weight 0.5"]);
        assert_eq!(state.errors, vec![ValidationError::WeightOutOfRange]);
        let state = run(state, &["weight 80"]);
        assert!(state.errors.is_empty());
    }

    #[test]
    fn test_calculate_reports_all_errors() {
        let state = run(WizardState::default(), &["calculate"]);
        assert_eq!(
            state.errors,
            vec![ValidationError::MissingWeight, ValidationError::MissingActivity]
        );
        assert!(state.last_result.is_none());
    }

    #[test]
    fn test_back_and_reset() {
        let state = run(
            WizardState::default(),
            &["weight 70", "next", "activity low", "calculate", "back"],
        );
        assert_eq!(state.step, Step::Activity);
        // reset only applies while a result is displayed
        let state = run(state, &["reset"]);
        assert_eq!(state.weight.as_deref(), Some("70"));

        let state = run(state, &["calculate", "reset"]);
        assert_eq!(state, WizardState::default());
    }

    #[test]
    fn test_unknown_command() {
        let err = dispatch_line(WizardState::default(), "dance").unwrap_err();
        assert!(matches!(err, IntakeError::UnknownCommand { .. }));
    }

    #[test]
    fn test_meter_preview_follows_typed_weight() {
        let state = run(WizardState::default(), &["weight 80"]);
        assert!((state.meter_preview() - 70.0).abs() < 1e-9);
        let state = run(state, &["weight abc"]);
        assert_eq!(state.meter_preview(), 0.0);
    }
}
