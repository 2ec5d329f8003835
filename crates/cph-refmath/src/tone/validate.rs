//! Curve validation: monotonicity, C0 gaps and derivative jumps.
//!
//! Checks sample the curve on a uniform grid densified around its
//! junctions, where branch switching makes violations most likely.

use serde::{Deserialize, Serialize};

use super::params::{CurveEvaluator, CurveKind, ToneCurve};
use crate::numeric::linspace;

/// Largest backward step still accepted as monotonic.
pub const MONOTONIC_TOLERANCE: f64 = 1e-10;

/// Half distance between the two samples of a continuity check.
pub const CONTINUITY_DELTA: f64 = 1e-12;

/// Default finite-difference step for derivative checks.
pub const DERIVATIVE_EPSILON: f64 = 1e-4;

/// Half width of the densified region around the PPR pivot.
const PPR_PROBLEM_SPAN: f64 = 0.05;

/// Half width of the densified region around the RLOG threshold.
const RLOG_PROBLEM_SPAN: f64 = 0.10;

/// Outcome of a monotonicity scan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonotonicityReport {
    /// `true` when no step falls below `-tolerance`.
    pub monotonic: bool,
    /// Smallest `y[i + 1] − y[i]`; `+∞` for fewer than two samples.
    pub min_step: f64,
    /// `i` of the smallest step.
    pub min_step_index: Option<usize>,
}

/// Scan `y` for backward steps larger than `tolerance`.
pub fn check_monotonic(y: &[f64], tolerance: f64) -> MonotonicityReport {
    let mut min_step = f64::INFINITY;
    let mut min_step_index = None;
    for (i, pair) in y.windows(2).enumerate() {
        let step = pair[1] - pair[0];
        if step < min_step || step.is_nan() {
            min_step = step;
            min_step_index = Some(i);
            if step.is_nan() {
                break;
            }
        }
    }
    MonotonicityReport {
        monotonic: min_step >= -tolerance,
        min_step,
        min_step_index,
    }
}

/// Uniform `[0, 1]` grid plus `problem_points` samples around the junction.
///
/// PPR is densified over `pivot ± 5%`, RLOG over `t ± 10%`. The result is
/// sorted, clamped to `[0, 1]` and free of duplicates.
pub fn validation_grid(curve: &ToneCurve, sample_count: usize, problem_points: usize) -> Vec<f64> {
    let mut points = linspace(0.0, 1.0, sample_count);
    points.reserve(problem_points);

    let (center, span) = match curve {
        ToneCurve::Ppr(p) => (p.pivot(), PPR_PROBLEM_SPAN),
        ToneCurve::Rlog(p) => (p.threshold(), RLOG_PROBLEM_SPAN),
    };
    points.extend((0..problem_points).map(|i| {
        let offset = (i as f64 / problem_points as f64 - 0.5) * 2.0 * span;
        (center + offset).clamp(0.0, 1.0)
    }));

    points.sort_by(f64::total_cmp);
    points.dedup();
    points
}

/// Evaluate `curve` on its validation grid and scan for backward steps.
pub fn check_curve_monotonic(
    curve: &ToneCurve,
    sample_count: usize,
    problem_points: usize,
    tolerance: f64,
) -> MonotonicityReport {
    monotonic_with(curve, &curve.evaluator(), sample_count, problem_points, tolerance)
}

fn monotonic_with(
    curve: &ToneCurve,
    evaluator: &CurveEvaluator<'_>,
    sample_count: usize,
    problem_points: usize,
    tolerance: f64,
) -> MonotonicityReport {
    let grid = validation_grid(curve, sample_count, problem_points);
    let report = check_monotonic(&evaluator.evaluate(&grid), tolerance);
    if !report.monotonic {
        tracing::warn!(
            "{} curve not monotonic: step {:.3e} at x={:.6}",
            curve.kind(),
            report.min_step,
            report.min_step_index.map_or(f64::NAN, |i| grid[i])
        );
    }
    report
}

/// `|y(at + δ) − y(at − δ)|` with `δ = CONTINUITY_DELTA`.
pub fn continuity_gap(curve: &ToneCurve, at: f64) -> f64 {
    gap_with(&curve.evaluator(), at)
}

fn gap_with(evaluator: &CurveEvaluator<'_>, at: f64) -> f64 {
    (evaluator.eval(at + CONTINUITY_DELTA) - evaluator.eval(at - CONTINUITY_DELTA)).abs()
}

/// Central difference of `curve` at `x`, with sample points clamped to `[0, 1]`.
pub fn central_difference(curve: &ToneCurve, x: f64, eps: f64) -> f64 {
    slope_with(&curve.evaluator(), x, eps)
}

fn slope_with(evaluator: &CurveEvaluator<'_>, x: f64, eps: f64) -> f64 {
    let lo = (x - eps).max(0.0);
    let hi = (x + eps).min(1.0);
    let dx = hi - lo;
    if dx <= 0.0 {
        return 0.0;
    }
    (evaluator.eval(hi) - evaluator.eval(lo)) / dx
}

/// Jump between the slopes just left and right of `at`.
pub fn derivative_gap_at(curve: &ToneCurve, at: f64, eps: f64) -> f64 {
    slope_jump_with(&curve.evaluator(), at, eps)
}

fn slope_jump_with(evaluator: &CurveEvaluator<'_>, at: f64, eps: f64) -> f64 {
    let left = slope_with(evaluator, at - eps, eps);
    let right = slope_with(evaluator, at + eps, eps);
    (right - left).abs()
}

/// Largest [`derivative_gap_at`] over the curve's junctions.
pub fn derivative_gap(curve: &ToneCurve, eps: f64) -> f64 {
    let evaluator = curve.evaluator();
    curve
        .junctions()
        .into_iter()
        .map(|at| slope_jump_with(&evaluator, at, eps))
        .fold(0.0, f64::max)
}

/// Full validation summary for one curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveReport {
    pub kind: CurveKind,
    pub monotonicity: MonotonicityReport,
    /// Largest C0 gap over the junctions.
    pub continuity_gap: f64,
    /// Largest slope jump over the junctions.
    pub derivative_gap: f64,
}

impl CurveReport {
    /// Monotonic and C0 within `continuity_tolerance`.
    pub fn passed(&self, continuity_tolerance: f64) -> bool {
        self.monotonicity.monotonic && self.continuity_gap <= continuity_tolerance
    }
}

/// Run every check on `curve` with `sample_count` uniform samples and as
/// many again around the junction.
pub fn validate_curve(curve: &ToneCurve, sample_count: usize) -> CurveReport {
    let evaluator = curve.evaluator();
    let junctions = curve.junctions();
    let continuity_gap = junctions
        .iter()
        .map(|&at| gap_with(&evaluator, at))
        .fold(0.0, f64::max);
    let derivative_gap = junctions
        .iter()
        .map(|&at| slope_jump_with(&evaluator, at, DERIVATIVE_EPSILON))
        .fold(0.0, f64::max);

    CurveReport {
        kind: curve.kind(),
        monotonicity: monotonic_with(
            curve,
            &evaluator,
            sample_count,
            sample_count,
            MONOTONIC_TOLERANCE,
        ),
        continuity_gap,
        derivative_gap,
    }
}
