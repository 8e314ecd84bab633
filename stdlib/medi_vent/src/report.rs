//! Text and JSON rendering of a submission.

use serde::Serialize;

use crate::params::VentilationMode;
use crate::power::MechanicalPowerResult;
use crate::risk::RiskTier;
use crate::session::{FieldDelta, Submission};

/// Risk card: mechanical power and the risk label.
pub fn render_card(result: &MechanicalPowerResult) -> Vec<String> {
    vec![
        format!("Механическая мощность: {} дж./мин", format_mp(result.mp)),
        format!(
            "Риск вентилятор-ассоциированного повреждения лёгких: {}",
            result.tier.label()
        ),
    ]
}

/// Whole numbers keep one decimal place: `17.0`, not `17`.
fn format_mp(mp: f64) -> String {
    if mp.is_finite() && mp.fract() == 0.0 {
        format!("{mp:.1}")
    } else {
        format!("{mp}")
    }
}

/// One line per setting with its change since the previous submission.
pub fn render_metrics(deltas: &[FieldDelta]) -> Vec<String> {
    deltas
        .iter()
        .map(|d| {
            let unit = d.unit;
            format!(
                "{}: {} {unit} ({} {unit})",
                d.field.display_name(),
                d.value,
                signed(d.delta)
            )
        })
        .collect()
}

fn signed(x: f64) -> String {
    if x > 0.0 {
        format!("+{x}")
    } else {
        format!("{x}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub mode: VentilationMode,
    pub mp: f64,
    pub tier: RiskTier,
    pub label: String,
    pub color: String,
    pub previous_mp: f64,
    pub deltas: Vec<FieldDelta>,
}

impl Report {
    pub fn from_submission(submission: &Submission) -> Self {
        let tier = submission.result.tier;
        Self {
            mode: submission.mode,
            mp: submission.result.mp,
            tier,
            label: tier.label().to_string(),
            color: tier.color().to_string(),
            previous_mp: submission.previous_mp,
            deltas: submission.deltas.clone(),
        }
    }

    /// Card lines followed by metric lines.
    pub fn to_lines(&self) -> Vec<String> {
        let result = MechanicalPowerResult {
            mp: self.mp,
            tier: self.tier,
        };
        let mut lines = render_card(&result);
        lines.extend(render_metrics(&self.deltas));
        lines
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
