use medi_vent::{classify, compute, RiskTier, VentilationParameters};
use proptest::prelude::*;

#[test]
fn volume_control_reference_case() {
    let r = compute(&VentilationParameters::volume_control(
        500.0, 20.0, 5.0, 15.0, 30.0,
    ));
    assert_eq!(r.mp, 11.25);
    assert_eq!(r.tier, RiskTier::Moderate);
}

#[test]
fn pressure_control_reference_case() {
    let r = compute(&VentilationParameters::pressure_control(
        400.0, 8.0, 18.0, 16.0,
    ));
    assert_eq!(r.mp, 16.93);
    assert_eq!(r.tier, RiskTier::High);
}

#[test]
fn zero_tidal_volume_is_low_risk_in_both_modes() {
    for p in [
        VentilationParameters::volume_control(0.0, 50.0, 30.0, 30.0, 50.0),
        VentilationParameters::pressure_control(0.0, 30.0, 30.0, 50.0),
    ] {
        let r = compute(&p);
        assert_eq!(r.mp, 0.0);
        assert_eq!(r.tier, RiskTier::Low);
    }
}

#[test]
fn slider_extremes() {
    // vt 1000, ppeak 50, peep 30, rr 30, f 50: (1 * (80 + 50/6) * 30) / 20
    let r = compute(&VentilationParameters::volume_control(
        1000.0, 50.0, 30.0, 30.0, 50.0,
    ));
    assert_eq!(r.mp, 132.5);
    assert_eq!(r.tier, RiskTier::Extreme);

    let r = compute(&VentilationParameters::pressure_control(
        100.0, 0.0, 1.0, 5.0,
    ));
    assert_eq!(r.mp, 0.05);
    assert_eq!(r.tier, RiskTier::Low);
}

fn two_decimals(x: f64) -> bool {
    let scaled = x * 100.0;
    (scaled - scaled.round()).abs() < 1e-6
}

proptest! {
    #[test]
    fn tiers_never_decrease_as_power_rises(a in 0.0f64..40.0, b in 0.0f64..40.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(classify(lo) <= classify(hi));
    }

    #[test]
    fn volume_control_is_deterministic_and_rounded(
        vt in 100u32..=1000,
        ppeak in 0u32..=50,
        peep in 0u32..=30,
        rr in 0u32..=30,
        f in 0u32..=50,
    ) {
        let p = VentilationParameters::volume_control(
            vt as f64, ppeak as f64, peep as f64, rr as f64, f as f64,
        );
        let a = compute(&p);
        let b = compute(&p);
        prop_assert_eq!(a, b);
        prop_assert!(two_decimals(a.mp));
        prop_assert_eq!(a.tier, classify(a.mp));
        let raw = ((vt as f64 / 1000.0) * (ppeak as f64 + peep as f64 + f as f64 / 6.0) * rr as f64) / 20.0;
        prop_assert!((a.mp - raw).abs() <= 0.005 + 1e-9);
    }

    #[test]
    fn pressure_control_is_deterministic_and_rounded(
        vt in 100u32..=1000,
        peep in 0u32..=30,
        rr in 0u32..=30,
        dp in 0u32..=50,
    ) {
        let p = VentilationParameters::pressure_control(
            vt as f64, peep as f64, rr as f64, dp as f64,
        );
        let a = compute(&p);
        prop_assert_eq!(a, compute(&p));
        prop_assert!(two_decimals(a.mp));
        prop_assert_eq!(a.tier, classify(a.mp));
        let raw = (vt as f64 / 1000.0) * (dp as f64 + peep as f64) * rr as f64 * 0.098;
        prop_assert!((a.mp - raw).abs() <= 0.005 + 1e-9);
    }
}
