//! Mechanical power of ventilation, J/min.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::params::{PressureControlSettings, VentilationParameters, VolumeControlSettings};
use crate::risk::{classify, RiskTier};

/// Decimal places kept in the reported mechanical power.
pub const MP_DECIMALS: usize = 2;

/// Conversion factor from cmH2O·L to J used by the pressure controlled formula.
pub const CMH2O_LITRE_TO_JOULE: f64 = 0.098;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MechanicalPowerResult {
    /// Mechanical power, J/min, rounded to two decimals.
    pub mp: f64,
    pub tier: RiskTier,
}

/// Compute mechanical power and its risk tier.
///
/// Total over all inputs: zero volume or rate gives `mp = 0`, and no input
/// validation happens here.
pub fn compute(params: &VentilationParameters) -> MechanicalPowerResult {
    let mp = match params {
        VentilationParameters::VolumeControl(s) => volume_control_power(s),
        VentilationParameters::PressureControl(s) => pressure_control_power(s),
    };
    let tier = classify(mp);
    debug!("mechanical power ({}): {} J/min, tier {:?}", params.mode(), mp, tier);
    MechanicalPowerResult { mp, tier }
}

/// `((vt/1000) * (ppeak + peep + f/6) * rr) / 20`, rounded.
pub fn volume_control_power(s: &VolumeControlSettings) -> f64 {
    let raw = ((s.vt / 1000.0) * (s.ppeak + s.peep + s.f / 6.0) * s.rr) / 20.0;
    round_to(raw, MP_DECIMALS)
}

/// `(vt/1000) * (del_p_din + peep) * rr * 0.098`, rounded.
pub fn pressure_control_power(s: &PressureControlSettings) -> f64 {
    let raw = (s.vt / 1000.0) * (s.del_p_din + s.peep) * s.rr * CMH2O_LITRE_TO_JOULE;
    round_to(raw, MP_DECIMALS)
}

/// Round to `places` decimals using the exact binary value of `x`.
///
/// Goes through the correctly rounded decimal formatter rather than
/// `(x * 100).round() / 100`, which misrounds values like 2.675 whose scaled
/// product lands on the other side of the midpoint.
pub fn round_to(x: f64, places: usize) -> f64 {
    if !x.is_finite() {
        return x;
    }
    let s = format!("{x:.places$}");
    s.parse::<f64>().unwrap_or(x)
}
