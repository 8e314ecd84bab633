//! Mechanical power of mechanical ventilation.
//!
//! Computes the mechanical power delivered by a ventilator from its settings
//! in volume controlled (VCV) or pressure controlled (PCV) mode, and grades
//! the risk of ventilator-induced lung injury it implies.
//!
//! ```
//! use medi_vent::{compute, RiskTier, VentilationParameters};
//!
//! let params = VentilationParameters::volume_control(500.0, 20.0, 5.0, 15.0, 30.0);
//! let result = compute(&params);
//! assert_eq!(result.mp, 11.25);
//! assert_eq!(result.tier, RiskTier::Moderate);
//! ```

pub mod error;
pub mod limits;
pub mod params;
pub mod power;
pub mod report;
pub mod risk;
pub mod session;

pub use error::{LimitError, ParseFieldError, ParseModeError};
pub use limits::{Field, SliderBounds};
pub use params::{
    PressureControlSettings, VentilationMode, VentilationParameters, VolumeControlSettings,
};
pub use power::{compute, MechanicalPowerResult};
pub use report::{render_card, render_metrics, Report};
pub use risk::{classify, RiskTier};
pub use session::{FieldDelta, SessionSnapshot, SessionState, Submission};
