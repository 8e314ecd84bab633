//! Parsing of `key=value` submissions typed into a session.

use medi_vent::limits::fields;
use medi_vent::{Field, LimitError, ParseFieldError, VentilationMode, VentilationParameters};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("expected key=value, got '{0}'")]
    MalformedPair(String),
    #[error(transparent)]
    UnknownField(#[from] ParseFieldError),
    #[error("invalid number for {field}: '{value}'")]
    InvalidNumber { field: &'static str, value: String },
    #[error("{field} is not a {mode} setting")]
    NotInMode {
        field: &'static str,
        mode: VentilationMode,
    },
    #[error(transparent)]
    Limit(#[from] LimitError),
}

/// Settings being filled in for one page, starting at the slider defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormValues {
    mode: VentilationMode,
    vt: f64,
    ppeak: f64,
    peep: f64,
    rr: f64,
    f: f64,
    del_p_din: f64,
}

impl FormValues {
    pub fn new(mode: VentilationMode) -> Self {
        let d = |field: Field| field.bounds().default_value();
        Self {
            mode,
            vt: d(Field::Vt),
            ppeak: d(Field::Ppeak),
            peep: d(Field::Peep),
            rr: d(Field::Rr),
            f: d(Field::F),
            del_p_din: d(Field::DelPDin),
        }
    }

    /// Set one field, enforcing that it belongs to the page.
    pub fn set(&mut self, field: Field, value: f64) -> Result<(), InputError> {
        if !field.applies_to(self.mode) {
            return Err(InputError::NotInMode {
                field: field.key(),
                mode: self.mode,
            });
        }
        let slot = match field {
            Field::Vt => &mut self.vt,
            Field::Ppeak => &mut self.ppeak,
            Field::Peep => &mut self.peep,
            Field::Rr => &mut self.rr,
            Field::F => &mut self.f,
            Field::DelPDin => &mut self.del_p_din,
        };
        *slot = value;
        Ok(())
    }

    /// Build parameters, checking every field against its slider when `strict`.
    pub fn finish(self, strict: bool) -> Result<VentilationParameters, InputError> {
        let params = match self.mode {
            VentilationMode::Vcv => {
                VentilationParameters::volume_control(self.vt, self.ppeak, self.peep, self.rr, self.f)
            }
            VentilationMode::Pcv => {
                VentilationParameters::pressure_control(self.vt, self.peep, self.rr, self.del_p_din)
            }
        };
        if strict {
            medi_vent::limits::validate(&params)?;
        }
        Ok(params)
    }
}

/// Parse `vt=500 ppeak=20, peep=5` for `mode`. Omitted fields keep the
/// slider default.
pub fn parse_submission(
    mode: VentilationMode,
    line: &str,
    strict: bool,
) -> Result<VentilationParameters, InputError> {
    let mut form = FormValues::new(mode);
    for pair in line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|p| !p.is_empty())
    {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| InputError::MalformedPair(pair.to_string()))?;
        let field = key.parse::<Field>()?;
        let number = value
            .trim()
            .parse::<f64>()
            .map_err(|_| InputError::InvalidNumber {
                field: field.key(),
                value: value.to_string(),
            })?;
        form.set(field, number)?;
    }
    form.finish(strict)
}

/// Help text listing the fields of `mode` with their slider ranges.
pub fn describe_fields(mode: VentilationMode) -> Vec<String> {
    fields(mode)
        .iter()
        .map(|field| {
            let b = field.bounds();
            format!(
                "  {:<10} {} .. {} step {} {}",
                field.key(),
                b.min,
                b.max,
                b.step,
                field.unit()
            )
        })
        .collect()
}
