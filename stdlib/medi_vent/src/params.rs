use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseModeError;

/// Ventilator operating mode, also the page selected in the form UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VentilationMode {
    /// Volume controlled ventilation.
    #[default]
    Vcv,
    /// Pressure controlled ventilation.
    Pcv,
}

impl VentilationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            VentilationMode::Vcv => "vcv",
            VentilationMode::Pcv => "pcv",
        }
    }
}

impl fmt::Display for VentilationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VentilationMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vcv" => Ok(VentilationMode::Vcv),
            "pcv" => Ok(VentilationMode::Pcv),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

/// Volume controlled settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeControlSettings {
    /// Tidal volume, mL.
    pub vt: f64,
    /// Peak inspiratory pressure, cmH2O.
    pub ppeak: f64,
    /// Positive end-expiratory pressure, cmH2O.
    pub peep: f64,
    /// Respiratory rate, breaths/min.
    pub rr: f64,
    /// Inspiratory flow, L/min.
    pub f: f64,
}

/// Pressure controlled settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PressureControlSettings {
    /// Tidal volume, mL.
    pub vt: f64,
    /// Positive end-expiratory pressure, cmH2O.
    pub peep: f64,
    /// Respiratory rate, breaths/min.
    pub rr: f64,
    /// Dynamic driving pressure, cmH2O.
    pub del_p_din: f64,
}

/// One submission of ventilator settings.
///
/// Only the fields of the selected mode are carried, so the formula of the
/// other mode cannot pick up stale values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum VentilationParameters {
    #[serde(rename = "vcv")]
    VolumeControl(VolumeControlSettings),
    #[serde(rename = "pcv")]
    PressureControl(PressureControlSettings),
}

impl VentilationParameters {
    pub fn volume_control(vt: f64, ppeak: f64, peep: f64, rr: f64, f: f64) -> Self {
        VentilationParameters::VolumeControl(VolumeControlSettings {
            vt,
            ppeak,
            peep,
            rr,
            f,
        })
    }

    pub fn pressure_control(vt: f64, peep: f64, rr: f64, del_p_din: f64) -> Self {
        VentilationParameters::PressureControl(PressureControlSettings {
            vt,
            peep,
            rr,
            del_p_din,
        })
    }

    pub fn mode(&self) -> VentilationMode {
        match self {
            VentilationParameters::VolumeControl(_) => VentilationMode::Vcv,
            VentilationParameters::PressureControl(_) => VentilationMode::Pcv,
        }
    }

    pub fn vt(&self) -> f64 {
        match self {
            VentilationParameters::VolumeControl(s) => s.vt,
            VentilationParameters::PressureControl(s) => s.vt,
        }
    }

    pub fn peep(&self) -> f64 {
        match self {
            VentilationParameters::VolumeControl(s) => s.peep,
            VentilationParameters::PressureControl(s) => s.peep,
        }
    }

    pub fn rr(&self) -> f64 {
        match self {
            VentilationParameters::VolumeControl(s) => s.rr,
            VentilationParameters::PressureControl(s) => s.rr,
        }
    }
}
