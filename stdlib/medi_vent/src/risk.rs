use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower bound of the moderate tier, J/min.
pub const MODERATE_THRESHOLD: f64 = 10.0;
/// Lower bound of the high tier, J/min.
pub const HIGH_THRESHOLD: f64 = 15.0;
/// Lower bound of the extreme tier, J/min.
pub const EXTREME_THRESHOLD: f64 = 17.0;

/// Risk of ventilator-induced lung injury implied by mechanical power.
///
/// Ordered from lowest to highest risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Moderate,
    High,
    Extreme,
}

/// Map mechanical power onto its risk tier. Each lower bound is inclusive.
pub fn classify(mp: f64) -> RiskTier {
    if mp >= EXTREME_THRESHOLD {
        RiskTier::Extreme
    } else if mp >= HIGH_THRESHOLD {
        RiskTier::High
    } else if mp >= MODERATE_THRESHOLD {
        RiskTier::Moderate
    } else {
        RiskTier::Low
    }
}

impl RiskTier {
    /// Clinician-facing label shown on the risk card.
    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::Extreme => "КРАЙНЕ ВЫСОКИЙ",
            RiskTier::High => "ВЫСОКИЙ",
            RiskTier::Moderate => "УМЕРЕННЫЙ",
            RiskTier::Low => "НИЗКИЙ",
        }
    }

    /// Background color of the risk card, `#RRGGBB`.
    pub fn color(&self) -> &'static str {
        match self {
            RiskTier::Extreme => "#8B0000",
            RiskTier::High => "#FF0000",
            RiskTier::Moderate => "#FFD700",
            RiskTier::Low => "#008000",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_belong_to_the_higher_tier() {
        assert_eq!(classify(9.99), RiskTier::Low);
        assert_eq!(classify(10.00), RiskTier::Moderate);
        assert_eq!(classify(14.99), RiskTier::Moderate);
        assert_eq!(classify(15.00), RiskTier::High);
        assert_eq!(classify(16.99), RiskTier::High);
        assert_eq!(classify(17.00), RiskTier::Extreme);
    }

    #[test]
    fn out_of_range_values_are_low() {
        assert_eq!(classify(0.0), RiskTier::Low);
        assert_eq!(classify(-5.0), RiskTier::Low);
        assert_eq!(classify(f64::NAN), RiskTier::Low);
        assert_eq!(classify(f64::INFINITY), RiskTier::Extreme);
    }

    #[test]
    fn tiers_are_ordered() {
        assert!(RiskTier::Low < RiskTier::Moderate);
        assert!(RiskTier::Moderate < RiskTier::High);
        assert!(RiskTier::High < RiskTier::Extreme);
    }

    #[test]
    fn labels_and_colors() {
        assert_eq!(RiskTier::Extreme.to_string(), "КРАЙНЕ ВЫСОКИЙ");
        assert_eq!(RiskTier::Low.label(), "НИЗКИЙ");
        assert_eq!(RiskTier::Moderate.color(), "#FFD700");
        assert_eq!(RiskTier::High.color(), "#FF0000");
    }
}
