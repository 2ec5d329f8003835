//! PPR (Pivoted Power-Rational) curve.
//!
//! ```text
//! x <= p : y = (x / p)^γs × p                 (x = 0 → 0)
//! x >  p : y = s × (x / (1 + h × (x − p)))^γh
//! ```
//!
//! The raw highlight segment evaluates to `p^γh` at the pivot while the
//! shadow segment evaluates to `p`. Whenever the two differ by more than
//! [`PPR_CONTINUITY_THRESHOLD`], `s = shadow(p) / highlight(p)` rescales the
//! highlight segment so the curve is C0 at the pivot; otherwise `s = 1`.

use super::params::CurveParams;
use crate::numeric::guard_denominator;

/// Segment disagreement at the pivot above which the highlight is rescaled.
pub const PPR_CONTINUITY_THRESHOLD: f64 = 1e-10;

/// Per-parameter-set PPR state; the continuity scale is resolved once.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PprEvaluator<'a> {
    params: &'a CurveParams,
    scale: f64,
}

impl<'a> PprEvaluator<'a> {
    pub(crate) fn new(params: &'a CurveParams) -> Self {
        Self {
            params,
            scale: continuity_scale(params),
        }
    }

    pub(crate) fn eval(&self, x: f64) -> f64 {
        let p = self.params;
        let y = if x <= p.pivot() {
            shadow_segment(x, p)
        } else {
            self.scale * highlight_segment(x, p)
        };
        super::finish(y, p.soft_knee().as_ref(), p.toe()).clamp(0.0, 1.0)
    }
}

/// `(x / p)^γs × p`, with inputs at or below zero mapped to zero.
fn shadow_segment(x: f64, params: &CurveParams) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    let p = params.pivot();
    (x / p).powf(params.gamma_shadow()) * p
}

/// `(x / (1 + h × (x − p)))^γh`, with a negative base floored at zero.
fn highlight_segment(x: f64, params: &CurveParams) -> f64 {
    let p = params.pivot();
    let den = guard_denominator(1.0 + params.shoulder() * (x - p));
    (x / den).max(0.0).powf(params.gamma_highlight())
}

/// Factor that makes the highlight segment meet the shadow segment at `p`.
pub fn continuity_scale(params: &CurveParams) -> f64 {
    let p = params.pivot();
    let at_pivot_shadow = shadow_segment(p, params);
    let at_pivot_highlight = highlight_segment(p, params);

    if (at_pivot_shadow - at_pivot_highlight).abs() <= PPR_CONTINUITY_THRESHOLD {
        return 1.0;
    }
    if at_pivot_highlight <= 0.0 {
        tracing::warn!(
            "PPR highlight segment vanishes at pivot {p}; continuity scale left at 1"
        );
        return 1.0;
    }

    let scale = at_pivot_shadow / at_pivot_highlight;
    tracing::debug!(
        "PPR highlight rescaled by {scale:.12} (shadow {at_pivot_shadow:.12} vs highlight {at_pivot_highlight:.12} at pivot {p})"
    );
    scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tone::params::SoftKnee;
    use crate::tone::ppr_curve;

    const EPSILON: f64 = 1e-12;

    fn flat() -> CurveParams {
        CurveParams::new(0.18, 1.10, 1.05, 1.0).expect("valid params")
    }

    #[test]
    fn test_zero_maps_to_zero() {
        let y = ppr_curve(&[0.0], &flat());
        assert_eq!(y[0], 0.0);
    }

    #[test]
    fn test_zero_maps_to_zero_with_sub_unity_shadow_gamma() {
        let params = CurveParams::new(0.18, 0.9, 1.0, 1.0).expect("valid params");
        assert_eq!(ppr_curve(&[0.0], &params)[0], 0.0);
    }

    #[test]
    fn test_pivot_maps_to_itself() {
        let params = flat();
        let y = ppr_curve(&[params.pivot()], &params);
        assert!((y[0] - params.pivot()).abs() < EPSILON);
    }

    #[test]
    fn test_continuity_at_pivot() {
        for (gs, gh, h) in [(1.10, 1.05, 1.0), (1.40, 1.10, 1.8), (1.20, 0.95, 1.2)] {
            let params = CurveParams::new(0.18, gs, gh, h).expect("valid params");
            let p = params.pivot();
            let y = ppr_curve(&[p, p + 1e-12], &params);
            assert!((y[0] - y[1]).abs() < 1e-9, "gap {}", (y[0] - y[1]).abs());
        }
    }

    #[test]
    fn test_scale_is_identity_when_segments_already_agree() {
        let params = CurveParams::new(0.18, 1.3, 1.0, 2.0).expect("valid params");
        assert_eq!(continuity_scale(&params), 1.0);
    }

    #[test]
    fn test_scale_matches_ratio_when_segments_disagree() {
        let params = flat();
        let expected = 0.18 / 0.18_f64.powf(1.05);
        assert!((continuity_scale(&params) - expected).abs() < EPSILON);
    }

    #[test]
    fn test_output_is_clamped_to_unit_range() {
        let params = CurveParams::new(0.3, 1.0, 0.8, 0.0).expect("valid params");
        let y = ppr_curve(&[0.0, 0.5, 1.0, 2.0, 10.0], &params);
        assert!(y.iter().all(|v| (0.0..=1.0).contains(v)));
        assert_eq!(y[4], 1.0);
    }

    #[test]
    fn test_negative_inputs_evaluate_as_zero() {
        let y = ppr_curve(&[-0.5, -1e-9], &flat());
        assert_eq!(y, vec![0.0, 0.0]);
    }

    #[test]
    fn test_toe_lifts_black() {
        let params = flat().with_toe(0.004).expect("valid toe");
        let y = ppr_curve(&[0.0, 0.01, 0.5], &params);
        assert_eq!(y[0], 0.004);
        assert!(y[2] > 0.004);
    }

    #[test]
    fn test_soft_knee_compresses_highlights() {
        let params = CurveParams::new(0.3, 1.0, 0.8, 0.0).expect("valid params");
        let kneed = params.with_soft_knee(Some(SoftKnee::new(0.5, 1.0).expect("valid knee")));
        let raw = ppr_curve(&[0.9], &params)[0];
        let soft = ppr_curve(&[0.9], &kneed)[0];
        assert!(raw > 0.5);
        assert!(soft < raw);
        assert!(soft > 0.5);
    }
}
