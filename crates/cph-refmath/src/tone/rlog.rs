//! RLOG (Rational-Logarithmic) curve.
//!
//! ```text
//! y1 = ln(1 + a·x) / ln(1 + a)           log shadow branch
//! y2 = b'·x / (1 + c·x)                  rational highlight branch
//! w  = smoothstep(t − 0.05, t + 0.05, x)
//! y  = (1 − w)·y1 + w·y2
//! ```
//!
//! `b' = b` unless the raw branches differ by more than
//! [`RLOG_CONTINUITY_THRESHOLD`] at `t`, in which case
//! `b' = y1(t)·(1 + c·t) / t` so that `y2(t) = y1(t)`.

use super::params::RlogParams;
use crate::numeric::{guard_denominator, mix, smoothstep};

/// Half width of the blend window around the threshold.
pub const BLEND_HALF_WIDTH: f64 = 0.05;

/// Branch disagreement at the threshold above which `b` is recomputed.
pub const RLOG_CONTINUITY_THRESHOLD: f64 = 0.1;

/// Per-parameter-set RLOG state; the log normalizer and `b'` are resolved once.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RlogEvaluator<'a> {
    params: &'a RlogParams,
    log_norm: f64,
    b: f64,
}

impl<'a> RlogEvaluator<'a> {
    pub(crate) fn new(params: &'a RlogParams) -> Self {
        let log_norm = guard_denominator(params.a().ln_1p());
        let b = effective_b(params, log_norm);
        Self {
            params,
            log_norm,
            b,
        }
    }

    pub(crate) fn eval(&self, x: f64) -> f64 {
        let p = self.params;
        let x = x.max(0.0);
        let t = p.threshold();
        let w = smoothstep(t - BLEND_HALF_WIDTH, t + BLEND_HALF_WIDTH, x);

        let y = if w <= 0.0 {
            self.log_branch(x)
        } else if w >= 1.0 {
            self.rational_branch(x)
        } else {
            mix(self.log_branch(x), self.rational_branch(x), w)
        };
        super::finish(y, p.soft_knee().as_ref(), p.toe())
    }

    fn log_branch(&self, x: f64) -> f64 {
        log_branch(x, self.params.a(), self.log_norm)
    }

    fn rational_branch(&self, x: f64) -> f64 {
        rational_branch(x, self.b, self.params.c())
    }
}

fn log_branch(x: f64, a: f64, log_norm: f64) -> f64 {
    (a * x).ln_1p() / log_norm
}

fn rational_branch(x: f64, b: f64, c: f64) -> f64 {
    b * x / guard_denominator(1.0 + c * x)
}

fn effective_b(params: &RlogParams, log_norm: f64) -> f64 {
    let t = params.threshold();
    let y1 = log_branch(t, params.a(), log_norm);
    let y2 = rational_branch(t, params.b(), params.c());

    if (y1 - y2).abs() <= RLOG_CONTINUITY_THRESHOLD {
        return params.b();
    }

    let adjusted = y1 * (1.0 + params.c() * t) / t;
    tracing::debug!(
        "RLOG b adjusted {} -> {adjusted:.12} (branches {y1:.6} vs {y2:.6} at t={t})",
        params.b()
    );
    adjusted
}

/// The rational-branch gain actually used for these parameters.
pub fn adjusted_b(params: &RlogParams) -> f64 {
    RlogEvaluator::new(params).b
}
