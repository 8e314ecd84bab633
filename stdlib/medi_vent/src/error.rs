//! Error types for the input boundary.
//!
//! The calculator itself is total and never fails; these errors come from
//! parsing mode tags and from checking settings against the form limits.

use thiserror::Error;

/// A setting falls outside the range the input form allows.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LimitError {
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },
    #[error("{field} = {value} is below the minimum of {min}")]
    BelowMin {
        field: &'static str,
        value: f64,
        min: f64,
    },
    #[error("{field} = {value} is above the maximum of {max}")]
    AboveMax {
        field: &'static str,
        value: f64,
        max: f64,
    },
    #[error("{field} = {value} is not a multiple of {step} from {min}")]
    OffStep {
        field: &'static str,
        value: f64,
        min: f64,
        step: f64,
    },
}

/// Unknown setting name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown setting '{0}'")]
pub struct ParseFieldError(pub String);

/// Unknown ventilation mode tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown ventilation mode '{0}' (expected 'vcv' or 'pcv')")]
pub struct ParseModeError(pub String);
