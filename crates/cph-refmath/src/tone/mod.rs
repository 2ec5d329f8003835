//! Tone curves: PPR and RLOG evaluators, presets and curve validation.
//!
//! Both curves are pure functions of `(samples, params)`. They share the
//! soft-knee and toe post-processing below; PPR is additionally clamped to
//! `[0, 1]` while RLOG may overshoot by up to [`OUTPUT_HEADROOM`] depending
//! on its parameters.

pub mod params;
pub mod ppr;
pub mod presets;
pub mod rlog;
pub mod validate;

use params::{CurveParams, RlogParams, SoftKnee};

/// Allowed overshoot above 1.0 for curve outputs (the `ε` in `[0, 1 + ε]`).
pub const OUTPUT_HEADROOM: f64 = 0.125;

/// Evaluate the PPR curve over `x`.
///
/// Inputs are expected to be non-decreasing and typically cover `[0, 1]`;
/// the output has the same length and is clamped to `[0, 1]`.
pub fn ppr_curve(x: &[f64], params: &CurveParams) -> Vec<f64> {
    let evaluator = ppr::PprEvaluator::new(params);
    x.iter().map(|&v| evaluator.eval(v)).collect()
}

/// Evaluate the RLOG curve over `x`.
///
/// No final clamp is applied; callers normalize through parameter choice.
pub fn rlog_curve(x: &[f64], params: &RlogParams) -> Vec<f64> {
    let evaluator = rlog::RlogEvaluator::new(params);
    x.iter().map(|&v| evaluator.eval(v)).collect()
}

/// Soft-knee highlight compression.
///
/// ```text
/// y > y_knee → y_knee + (y − y_knee) / (1 + alpha × (y − y_knee))
/// ```
pub fn apply_soft_knee(y: f64, knee: &SoftKnee) -> f64 {
    if y <= knee.y_knee() {
        return y;
    }
    let excess = y - knee.y_knee();
    knee.y_knee() + excess / (1.0 + knee.alpha() * excess)
}

/// Toe clamp: `max(y, toe)`.
pub fn apply_toe(y: f64, toe: f64) -> f64 {
    y.max(toe)
}

/// Shared post-processing: optional soft knee, then toe.
pub(crate) fn finish(y: f64, soft_knee: Option<&SoftKnee>, toe: f64) -> f64 {
    let y = match soft_knee {
        Some(knee) => apply_soft_knee(y, knee),
        None => y,
    };
    apply_toe(y, toe)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_soft_knee_leaves_values_below_knee() {
        let knee = SoftKnee::new(0.97, 0.5).expect("valid knee");
        assert_eq!(apply_soft_knee(0.5, &knee), 0.5);
        assert_eq!(apply_soft_knee(0.97, &knee), 0.97);
    }

    #[test]
    fn test_soft_knee_compresses_and_approaches_asymptote() {
        let knee = SoftKnee::new(0.97, 0.5).expect("valid knee");
        let y = apply_soft_knee(1.07, &knee);
        // 0.97 + 0.1 / 1.05
        assert!((y - (0.97 + 0.1 / 1.05)).abs() < EPSILON);
        let far = apply_soft_knee(1e9, &knee);
        assert!(far < knee.asymptote());
        assert!(knee.asymptote() - far < 1e-6);
    }

    #[test]
    fn test_soft_knee_is_monotonic() {
        let knee = SoftKnee::new(0.95, 1.0).expect("valid knee");
        let mut prev = f64::NEG_INFINITY;
        for i in 0..2000 {
            let y = apply_soft_knee(i as f64 / 1000.0, &knee);
            assert!(y >= prev);
            prev = y;
        }
    }

    #[test]
    fn test_toe_raises_floor() {
        assert_eq!(apply_toe(0.0, 0.002), 0.002);
        assert_eq!(apply_toe(0.5, 0.002), 0.5);
        assert_eq!(apply_toe(0.001, 0.0), 0.001);
    }

    #[test]
    fn test_finish_applies_knee_before_toe() {
        let knee = SoftKnee::new(0.9, 1.0).expect("valid knee");
        assert!((finish(1.0, Some(&knee), 0.01) - (0.9 + 0.1 / 1.1)).abs() < EPSILON);
        assert_eq!(finish(0.0, Some(&knee), 0.01), 0.01);
        assert_eq!(finish(0.3, None, 0.0), 0.3);
    }
}
