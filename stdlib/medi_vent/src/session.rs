//! Per-session state of the settings form.
//!
//! A session tracks which mode page is open and keeps the last submission in
//! a single slot, so the next submission can be shown as a change against it.
//! The state is owned by the caller; nothing here is global.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::limits::{field_values, Field};
use crate::params::{VentilationMode, VentilationParameters};
use crate::power::{compute, MechanicalPowerResult};

/// Last submitted settings and their mechanical power.
///
/// Fields the submitted mode does not use are stored as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub vt: f64,
    pub ppeak: f64,
    pub peep: f64,
    pub rr: f64,
    pub f: f64,
    pub del_p_din: f64,
    pub mp: f64,
}

impl SessionSnapshot {
    pub fn from_submission(params: &VentilationParameters, mp: f64) -> Self {
        match params {
            VentilationParameters::VolumeControl(s) => Self {
                vt: s.vt,
                ppeak: s.ppeak,
                peep: s.peep,
                rr: s.rr,
                f: s.f,
                del_p_din: 0.0,
                mp,
            },
            VentilationParameters::PressureControl(s) => Self {
                vt: s.vt,
                ppeak: 0.0,
                peep: s.peep,
                rr: s.rr,
                f: 0.0,
                del_p_din: s.del_p_din,
                mp,
            },
        }
    }

    pub fn get(&self, field: Field) -> f64 {
        match field {
            Field::Vt => self.vt,
            Field::Ppeak => self.ppeak,
            Field::Peep => self.peep,
            Field::Rr => self.rr,
            Field::F => self.f,
            Field::DelPDin => self.del_p_din,
        }
    }
}

/// Change of one setting against the previous submission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldDelta {
    pub field: Field,
    pub value: f64,
    pub previous: f64,
    pub delta: f64,
    pub unit: &'static str,
}

/// Outcome of one form submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    pub mode: VentilationMode,
    pub params: VentilationParameters,
    pub result: MechanicalPowerResult,
    pub deltas: Vec<FieldDelta>,
    /// Mechanical power of the previous submission, 0 for the first one.
    pub previous_mp: f64,
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    mode: VentilationMode,
    last: SessionSnapshot,
    submissions: usize,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: VentilationMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Page currently open.
    pub fn mode(&self) -> VentilationMode {
        self.mode
    }

    /// Switch pages. Returns `false` if `mode` is already open.
    pub fn select_mode(&mut self, mode: VentilationMode) -> bool {
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        true
    }

    pub fn last(&self) -> &SessionSnapshot {
        &self.last
    }

    /// Number of submissions accepted so far.
    pub fn submissions(&self) -> usize {
        self.submissions
    }

    /// Compute `params`, diff it against the slot, then replace the slot.
    ///
    /// Both modes share the slot, so switching pages diffs against whatever
    /// was submitted last.
    pub fn submit(&mut self, params: VentilationParameters) -> Submission {
        let result = compute(&params);
        let deltas: Vec<FieldDelta> = field_values(&params)
            .into_iter()
            .map(|(field, value)| {
                let previous = self.last.get(field);
                FieldDelta {
                    field,
                    value,
                    previous,
                    delta: value - previous,
                    unit: field.unit(),
                }
            })
            .collect();
        trace!("deltas: {deltas:?}");

        let previous_mp = self.last.mp;
        self.last = SessionSnapshot::from_submission(&params, result.mp);
        self.submissions += 1;

        Submission {
            mode: params.mode(),
            params,
            result,
            deltas,
            previous_mp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::RiskTier;
    use crate::test_support::init_logger;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_session_opens_on_volume_control_with_empty_slot() {
        let s = SessionState::new();
        assert_eq!(s.mode(), VentilationMode::Vcv);
        assert_eq!(*s.last(), SessionSnapshot::default());
        assert_eq!(s.submissions(), 0);
    }

    #[test]
    fn selecting_the_open_page_is_a_no_op() {
        let mut s = SessionState::new();
        assert!(!s.select_mode(VentilationMode::Vcv));
        assert!(s.select_mode(VentilationMode::Pcv));
        assert_eq!(s.mode(), VentilationMode::Pcv);
        assert!(!s.select_mode(VentilationMode::Pcv));
    }

    #[test]
    fn first_submission_diffs_against_zero() {
        init_logger();
        let mut s = SessionState::new();
        let sub = s.submit(VentilationParameters::volume_control(
            500.0, 20.0, 5.0, 15.0, 30.0,
        ));
        assert_eq!(sub.result.mp, 11.25);
        assert_eq!(sub.previous_mp, 0.0);
        let d: Vec<(Field, f64)> = sub.deltas.iter().map(|d| (d.field, d.delta)).collect();
        assert_eq!(
            d,
            vec![
                (Field::Vt, 500.0),
                (Field::Ppeak, 20.0),
                (Field::Peep, 5.0),
                (Field::Rr, 15.0),
                (Field::F, 30.0),
            ]
        );
    }

    #[test]
    fn slot_holds_only_the_latest_submission() {
        init_logger();
        let mut s = SessionState::new();
        s.submit(VentilationParameters::volume_control(
            500.0, 20.0, 5.0, 15.0, 30.0,
        ));
        let sub = s.submit(VentilationParameters::volume_control(
            450.0, 25.0, 5.0, 20.0, 30.0,
        ));
        assert_eq!(sub.previous_mp, 11.25);
        let vt = sub.deltas[0];
        assert_eq!((vt.value, vt.previous, vt.delta), (450.0, 500.0, -50.0));
        assert_eq!(s.last().vt, 450.0);
        assert_eq!(s.submissions(), 2);
    }

    #[test]
    fn modes_share_the_slot_with_inert_fields_zeroed() {
        init_logger();
        let mut s = SessionState::new();
        s.submit(VentilationParameters::volume_control(
            500.0, 20.0, 5.0, 15.0, 30.0,
        ));
        s.select_mode(VentilationMode::Pcv);
        let sub = s.submit(VentilationParameters::pressure_control(
            400.0, 8.0, 18.0, 16.0,
        ));
        assert_eq!(sub.mode, VentilationMode::Pcv);
        assert_eq!(sub.result.tier, RiskTier::High);
        // driving pressure was zeroed by the volume controlled submission
        let dp = sub
            .deltas
            .iter()
            .find(|d| d.field == Field::DelPDin)
            .copied()
            .unwrap();
        assert_eq!((dp.previous, dp.delta, dp.unit), (0.0, 16.0, "смН2О"));
        assert_eq!(
            *s.last(),
            SessionSnapshot {
                vt: 400.0,
                ppeak: 0.0,
                peep: 8.0,
                rr: 18.0,
                f: 0.0,
                del_p_din: 16.0,
                mp: 16.93,
            }
        );
    }
}
