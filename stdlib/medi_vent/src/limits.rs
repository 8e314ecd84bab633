//! Input ranges of the settings form.
//!
//! Each setting is entered on a bounded slider. The calculator accepts any
//! number; these limits are applied by front ends before a submission.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{LimitError, ParseFieldError};
use crate::params::{VentilationMode, VentilationParameters};

/// A single ventilator setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Vt,
    Ppeak,
    Peep,
    Rr,
    F,
    DelPDin,
}

const VCV_FIELDS: [Field; 5] = [Field::Vt, Field::Ppeak, Field::Peep, Field::Rr, Field::F];
const PCV_FIELDS: [Field; 4] = [Field::Vt, Field::DelPDin, Field::Peep, Field::Rr];

/// Fields entered for `mode`, in display order.
pub fn fields(mode: VentilationMode) -> &'static [Field] {
    match mode {
        VentilationMode::Vcv => &VCV_FIELDS,
        VentilationMode::Pcv => &PCV_FIELDS,
    }
}

impl Field {
    /// Key used in submissions and serialized output.
    pub fn key(&self) -> &'static str {
        match self {
            Field::Vt => "vt",
            Field::Ppeak => "ppeak",
            Field::Peep => "peep",
            Field::Rr => "rr",
            Field::F => "f",
            Field::DelPDin => "del_p_din",
        }
    }

    /// Short clinical name shown next to the value.
    pub fn display_name(&self) -> &'static str {
        match self {
            Field::Vt => "Vt",
            Field::Ppeak => "Ppeak",
            Field::Peep => "PEEP",
            Field::Rr => "RR",
            Field::F => "F",
            Field::DelPDin => "delPdin",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Field::Vt => "мл",
            Field::Ppeak | Field::Peep | Field::DelPDin => "смН2О",
            Field::Rr => "/мин",
            Field::F => "л/мин",
        }
    }

    pub fn bounds(&self) -> SliderBounds {
        match self {
            Field::Vt => SliderBounds::new(100.0, 1000.0, 25.0),
            Field::Ppeak => SliderBounds::new(0.0, 50.0, 1.0),
            Field::Peep => SliderBounds::new(0.0, 30.0, 1.0),
            Field::Rr => SliderBounds::new(0.0, 30.0, 1.0),
            Field::F => SliderBounds::new(0.0, 50.0, 5.0),
            Field::DelPDin => SliderBounds::new(0.0, 50.0, 5.0),
        }
    }

    /// Whether the field is part of the `mode` form.
    pub fn applies_to(&self, mode: VentilationMode) -> bool {
        fields(mode).contains(self)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vt" => Ok(Field::Vt),
            "ppeak" => Ok(Field::Ppeak),
            "peep" => Ok(Field::Peep),
            "rr" => Ok(Field::Rr),
            "f" => Ok(Field::F),
            "del_p_din" | "delpdin" | "dpdin" => Ok(Field::DelPDin),
            _ => Err(ParseFieldError(s.trim().to_string())),
        }
    }
}

/// Closed range with a fixed step, anchored at `min`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderBounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

// Tolerance when checking that a value sits on a step.
const STEP_EPSILON: f64 = 1e-9;

impl SliderBounds {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// Value a slider starts at.
    pub fn default_value(&self) -> f64 {
        self.min
    }

    /// Accept `value` when it is one of the slider's positions.
    pub fn check(&self, field: Field, value: f64) -> Result<f64, LimitError> {
        let name = field.key();
        if !value.is_finite() {
            return Err(LimitError::NotFinite { field: name, value });
        }
        if value < self.min {
            return Err(LimitError::BelowMin {
                field: name,
                value,
                min: self.min,
            });
        }
        if value > self.max {
            return Err(LimitError::AboveMax {
                field: name,
                value,
                max: self.max,
            });
        }
        let steps = (value - self.min) / self.step;
        if (steps - steps.round()).abs() > STEP_EPSILON {
            return Err(LimitError::OffStep {
                field: name,
                value,
                min: self.min,
                step: self.step,
            });
        }
        Ok(value)
    }

    /// Nearest slider position to `value`. Non-finite input snaps to the minimum.
    pub fn snap(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        let clamped = value.clamp(self.min, self.max);
        let steps = ((clamped - self.min) / self.step).round();
        (self.min + steps * self.step).min(self.max)
    }
}

/// Check every setting of `params` against its slider.
pub fn validate(params: &VentilationParameters) -> Result<(), LimitError> {
    for (field, value) in field_values(params) {
        field.bounds().check(field, value)?;
    }
    Ok(())
}

/// Settings of `params` paired with their field, in display order.
pub fn field_values(params: &VentilationParameters) -> Vec<(Field, f64)> {
    match params {
        VentilationParameters::VolumeControl(s) => vec![
            (Field::Vt, s.vt),
            (Field::Ppeak, s.ppeak),
            (Field::Peep, s.peep),
            (Field::Rr, s.rr),
            (Field::F, s.f),
        ],
        VentilationParameters::PressureControl(s) => vec![
            (Field::Vt, s.vt),
            (Field::DelPDin, s.del_p_din),
            (Field::Peep, s.peep),
            (Field::Rr, s.rr),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn every_slider_position_is_accepted() {
        for field in VCV_FIELDS.iter().chain(PCV_FIELDS.iter()) {
            let b = field.bounds();
            let mut v = b.min;
            while v <= b.max {
                assert_eq!(b.check(*field, v), Ok(v), "{field} = {v}");
                v += b.step;
            }
        }
    }

    #[test]
    fn out_of_range_and_off_step_values_are_rejected() {
        let vt = Field::Vt.bounds();
        assert_eq!(
            vt.check(Field::Vt, 50.0),
            Err(LimitError::BelowMin {
                field: "vt",
                value: 50.0,
                min: 100.0
            })
        );
        assert!(matches!(
            vt.check(Field::Vt, 1025.0),
            Err(LimitError::AboveMax { .. })
        ));
        assert!(matches!(
            vt.check(Field::Vt, 510.0),
            Err(LimitError::OffStep { .. })
        ));
        assert!(matches!(
            Field::Rr.bounds().check(Field::Rr, f64::NAN),
            Err(LimitError::NotFinite { .. })
        ));
    }

    #[test]
    fn snap_clamps_and_rounds_to_step() {
        let vt = Field::Vt.bounds();
        assert_eq!(vt.snap(510.0), 500.0);
        assert_eq!(vt.snap(515.0), 525.0);
        assert_eq!(vt.snap(0.0), 100.0);
        assert_eq!(vt.snap(5000.0), 1000.0);
        assert_eq!(vt.snap(f64::NAN), 100.0);
        assert_eq!(Field::F.bounds().snap(12.0), 10.0);
    }

    #[test]
    fn validate_checks_only_the_submitted_mode() {
        let ok = VentilationParameters::pressure_control(400.0, 8.0, 18.0, 15.0);
        assert_eq!(validate(&ok), Ok(()));

        let bad = VentilationParameters::pressure_control(400.0, 8.0, 18.0, 16.0);
        assert!(matches!(
            validate(&bad),
            Err(LimitError::OffStep {
                field: "del_p_din",
                ..
            })
        ));
    }

    #[test]
    fn field_membership_and_order() {
        assert_eq!(
            fields(VentilationMode::Pcv)
                .iter()
                .map(Field::key)
                .collect::<Vec<_>>(),
            vec!["vt", "del_p_din", "peep", "rr"]
        );
        assert!(Field::F.applies_to(VentilationMode::Vcv));
        assert!(!Field::F.applies_to(VentilationMode::Pcv));
        assert!(!Field::Ppeak.applies_to(VentilationMode::Pcv));
        assert_eq!("DelPdin".parse::<Field>(), Ok(Field::DelPDin));
        assert_eq!(
            " tv ".parse::<Field>(),
            Err(ParseFieldError("tv".to_string()))
        );
    }
}
