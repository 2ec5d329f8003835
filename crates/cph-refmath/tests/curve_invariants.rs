//! Monotonicity and continuity of the built-in presets on the golden grid.

use cph_refmath::numeric::linspace;
use cph_refmath::reference::{DEFAULT_CURVE_SAMPLES, ReferenceCurves};
use cph_refmath::tone::OUTPUT_HEADROOM;
use cph_refmath::tone::rlog::BLEND_HALF_WIDTH;
use cph_refmath::tone::validate::{MONOTONIC_TOLERANCE, check_monotonic, continuity_gap};
use cph_refmath::{CurveKind, Preset, ToneCurve};

#[test]
fn test_presets_monotonic_on_golden_grid() {
    let x = linspace(0.0, 1.0, DEFAULT_CURVE_SAMPLES);
    for preset in Preset::all() {
        for curve in preset.curves() {
            let y = curve.evaluate(&x);
            let report = check_monotonic(&y, MONOTONIC_TOLERANCE);
            assert!(
                report.monotonic,
                "{}: min step {:e} at {:?}",
                preset.test_name(curve.kind()),
                report.min_step,
                report.min_step_index
            );
        }
    }
}

#[test]
fn test_presets_stay_within_headroom() {
    let x = linspace(0.0, 1.0, DEFAULT_CURVE_SAMPLES);
    for preset in Preset::all() {
        for curve in preset.curves() {
            let y = curve.evaluate(&x);
            assert_eq!(y[0], 0.0, "{}", preset.test_name(curve.kind()));
            assert!(y.iter().all(|v| (0.0..=1.0 + OUTPUT_HEADROOM).contains(v)));
        }
    }
}

#[test]
fn test_ppr_continuous_at_pivot() {
    for preset in Preset::all() {
        let curve = preset.curve(CurveKind::Ppr);
        let p = preset.ppr.pivot();
        let gap = (curve.evaluate_at(p) - curve.evaluate_at(p + 1e-12)).abs();
        assert!(gap < 1e-9, "{} gap {gap:e}", preset.name);
        assert!(continuity_gap(&curve, p) < 1e-9);
    }
}

#[test]
fn test_rlog_continuous_at_blend_edges() {
    for preset in Preset::all() {
        let curve = ToneCurve::Rlog(preset.rlog);
        let t = preset.rlog.threshold();
        for edge in [t - BLEND_HALF_WIDTH, t + BLEND_HALF_WIDTH] {
            let gap = continuity_gap(&curve, edge);
            assert!(gap < 1e-6, "{} edge {edge} gap {gap:e}", preset.name);
        }
    }
}

#[test]
fn test_builtin_reference_tables() {
    let curves = ReferenceCurves::builtin();
    assert_eq!(curves.sample_count, DEFAULT_CURVE_SAMPLES);
    assert_eq!(curves.records.len(), Preset::all().len() * CurveKind::ALL.len());
    assert!(curves.all_monotonic());
    for record in &curves.records {
        assert!(record.report.passed(1e-9), "{}", record.test_name());
    }
}
