//! Tone curve parameter records.
//!
//! Records are validated once at construction (and on deserialization), then
//! treated as opaque by the evaluators. Validation only rejects values that
//! make a formula undefined; the artistic ranges documented on each field are
//! the preset loader's business.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RefMathError;

/// The closed set of tone curves the reference engine knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CurveKind {
    /// Pivoted Power-Rational.
    Ppr,
    /// Rational-Logarithmic.
    Rlog,
}

impl CurveKind {
    /// Both curve kinds in reporting order.
    pub const ALL: [CurveKind; 2] = [CurveKind::Ppr, CurveKind::Rlog];

    /// Upper-case label used in test names (`"PPR"`, `"RLOG"`).
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Ppr => "PPR",
            Self::Rlog => "RLOG",
        }
    }
}

impl fmt::Display for CurveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn ensure_finite(name: &'static str, value: f64) -> Result<(), RefMathError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(RefMathError::invalid(name, value, "must be finite"))
    }
}

// ---------------------------------------------------------------------------
// Soft knee
// ---------------------------------------------------------------------------

/// Rational highlight compressor applied above `y_knee`.
///
/// ```text
/// y > y_knee → y_knee + (y − y_knee) / (1 + alpha × (y − y_knee))
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSoftKnee")]
pub struct SoftKnee {
    y_knee: f64,
    alpha: f64,
}

#[derive(Deserialize)]
struct RawSoftKnee {
    y_knee: f64,
    alpha: f64,
}

impl TryFrom<RawSoftKnee> for SoftKnee {
    type Error = RefMathError;

    fn try_from(raw: RawSoftKnee) -> Result<Self, Self::Error> {
        Self::new(raw.y_knee, raw.alpha)
    }
}

impl SoftKnee {
    /// Create a soft knee. Typical ranges: `y_knee ∈ [0.95, 0.99]`,
    /// `alpha ∈ [0.2, 1.0]`.
    ///
    /// A negative `alpha` puts a pole in the compressor and is rejected.
    pub fn new(y_knee: f64, alpha: f64) -> Result<Self, RefMathError> {
        ensure_finite("y_knee", y_knee)?;
        ensure_finite("alpha", alpha)?;
        if alpha < 0.0 {
            return Err(RefMathError::invalid(
                "alpha",
                alpha,
                "must be non-negative",
            ));
        }
        Ok(Self { y_knee, alpha })
    }

    /// Unvalidated constructor for compile-time preset tables.
    pub(crate) const fn preset(y_knee: f64, alpha: f64) -> Self {
        Self { y_knee, alpha }
    }

    /// Knee position.
    pub fn y_knee(&self) -> f64 {
        self.y_knee
    }

    /// Compression strength.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Value the compressed output approaches as `y → ∞`.
    pub fn asymptote(&self) -> f64 {
        if self.alpha > 0.0 {
            self.y_knee + 1.0 / self.alpha
        } else {
            f64::INFINITY
        }
    }
}

// ---------------------------------------------------------------------------
// PPR
// ---------------------------------------------------------------------------

/// Parameter set for the PPR curve and the shared post-processing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCurveParams")]
pub struct CurveParams {
    pivot: f64,
    #[serde(rename = "gamma_s")]
    gamma_shadow: f64,
    #[serde(rename = "gamma_h")]
    gamma_highlight: f64,
    shoulder: f64,
    soft_knee: Option<SoftKnee>,
    toe: f64,
}

#[derive(Deserialize)]
struct RawCurveParams {
    pivot: f64,
    gamma_s: f64,
    gamma_h: f64,
    shoulder: f64,
    #[serde(default)]
    soft_knee: Option<SoftKnee>,
    #[serde(default)]
    toe: f64,
}

impl TryFrom<RawCurveParams> for CurveParams {
    type Error = RefMathError;

    fn try_from(raw: RawCurveParams) -> Result<Self, Self::Error> {
        Ok(Self::new(raw.pivot, raw.gamma_s, raw.gamma_h, raw.shoulder)?
            .with_soft_knee(raw.soft_knee)
            .with_toe(raw.toe)?)
    }
}

impl CurveParams {
    /// Create PPR parameters with no soft knee and a zero toe.
    ///
    /// Typical ranges: `pivot ∈ [0.05, 0.30]`, `gamma_shadow ∈ [1.0, 1.6]`,
    /// `gamma_highlight ∈ [0.8, 1.4]`, `shoulder ∈ [0.5, 3.0]`.
    pub fn new(
        pivot: f64,
        gamma_shadow: f64,
        gamma_highlight: f64,
        shoulder: f64,
    ) -> Result<Self, RefMathError> {
        ensure_finite("pivot", pivot)?;
        ensure_finite("gamma_s", gamma_shadow)?;
        ensure_finite("gamma_h", gamma_highlight)?;
        ensure_finite("shoulder", shoulder)?;
        if pivot <= 0.0 {
            return Err(RefMathError::invalid(
                "pivot",
                pivot,
                "must be positive (shadow segment divides by it)",
            ));
        }
        Ok(Self {
            pivot,
            gamma_shadow,
            gamma_highlight,
            shoulder,
            soft_knee: None,
            toe: 0.0,
        })
    }

    /// Unvalidated constructor for compile-time preset tables.
    pub(crate) const fn preset(
        pivot: f64,
        gamma_shadow: f64,
        gamma_highlight: f64,
        shoulder: f64,
        soft_knee: SoftKnee,
    ) -> Self {
        Self {
            pivot,
            gamma_shadow,
            gamma_highlight,
            shoulder,
            soft_knee: Some(soft_knee),
            toe: 0.0,
        }
    }

    /// Replace the soft knee.
    pub fn with_soft_knee(mut self, soft_knee: Option<SoftKnee>) -> Self {
        self.soft_knee = soft_knee;
        self
    }

    /// Replace the toe clamp level. Typical range `[0, 0.01]`.
    pub fn with_toe(mut self, toe: f64) -> Result<Self, RefMathError> {
        ensure_finite("toe", toe)?;
        self.toe = toe;
        Ok(self)
    }

    /// Split point between the shadow and highlight segments.
    pub fn pivot(&self) -> f64 {
        self.pivot
    }

    /// Shadow segment exponent.
    pub fn gamma_shadow(&self) -> f64 {
        self.gamma_shadow
    }

    /// Highlight segment exponent.
    pub fn gamma_highlight(&self) -> f64 {
        self.gamma_highlight
    }

    /// Highlight compression strength `h`.
    pub fn shoulder(&self) -> f64 {
        self.shoulder
    }

    /// Optional highlight soft knee.
    pub fn soft_knee(&self) -> Option<SoftKnee> {
        self.soft_knee
    }

    /// Minimum output level.
    pub fn toe(&self) -> f64 {
        self.toe
    }
}

// ---------------------------------------------------------------------------
// RLOG
// ---------------------------------------------------------------------------

/// Parameter set for the RLOG curve.
///
/// ```text
/// y1 = ln(1 + a·x) / ln(1 + a)
/// y2 = b·x / (1 + c·x)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRlogParams")]
pub struct RlogParams {
    a: f64,
    b: f64,
    c: f64,
    #[serde(rename = "t")]
    threshold: f64,
    soft_knee: Option<SoftKnee>,
    toe: f64,
}

#[derive(Deserialize)]
struct RawRlogParams {
    a: f64,
    b: f64,
    c: f64,
    t: f64,
    #[serde(default)]
    soft_knee: Option<SoftKnee>,
    #[serde(default)]
    toe: f64,
}

impl TryFrom<RawRlogParams> for RlogParams {
    type Error = RefMathError;

    fn try_from(raw: RawRlogParams) -> Result<Self, Self::Error> {
        Ok(Self::new(raw.a, raw.b, raw.c, raw.t)?
            .with_soft_knee(raw.soft_knee)
            .with_toe(raw.toe)?)
    }
}

impl RlogParams {
    /// Create RLOG parameters with no soft knee and a zero toe.
    ///
    /// `a` must exceed −1 and be non-zero (`ln(1 + a)` is the normalizer),
    /// `c` must exceed −1 so `1 + c·x` stays positive on `[0, 1]`, and the
    /// threshold must be positive. Typical threshold range `[0.4, 0.7]`.
    pub fn new(a: f64, b: f64, c: f64, threshold: f64) -> Result<Self, RefMathError> {
        ensure_finite("a", a)?;
        ensure_finite("b", b)?;
        ensure_finite("c", c)?;
        ensure_finite("t", threshold)?;
        if a <= -1.0 {
            return Err(RefMathError::invalid("a", a, "must be greater than -1"));
        }
        if a == 0.0 {
            return Err(RefMathError::invalid(
                "a",
                a,
                "must be non-zero (ln(1 + a) normalizes the log branch)",
            ));
        }
        if c <= -1.0 {
            return Err(RefMathError::invalid("c", c, "must be greater than -1"));
        }
        if threshold <= 0.0 {
            return Err(RefMathError::invalid("t", threshold, "must be positive"));
        }
        Ok(Self {
            a,
            b,
            c,
            threshold,
            soft_knee: None,
            toe: 0.0,
        })
    }

    /// Unvalidated constructor for compile-time preset tables.
    pub(crate) const fn preset(a: f64, b: f64, c: f64, threshold: f64) -> Self {
        Self {
            a,
            b,
            c,
            threshold,
            soft_knee: None,
            toe: 0.0,
        }
    }

    /// Replace the soft knee.
    pub fn with_soft_knee(mut self, soft_knee: Option<SoftKnee>) -> Self {
        self.soft_knee = soft_knee;
        self
    }

    /// Replace the toe clamp level.
    pub fn with_toe(mut self, toe: f64) -> Result<Self, RefMathError> {
        ensure_finite("toe", toe)?;
        self.toe = toe;
        Ok(self)
    }

    /// Log branch strength.
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Rational branch gain, before any continuity adjustment.
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Rational branch compression.
    pub fn c(&self) -> f64 {
        self.c
    }

    /// Center of the blend window.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Optional highlight soft knee.
    pub fn soft_knee(&self) -> Option<SoftKnee> {
        self.soft_knee
    }

    /// Minimum output level.
    pub fn toe(&self) -> f64 {
        self.toe
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// A fully parameterized tone curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ToneCurve {
    /// Pivoted Power-Rational curve.
    Ppr(CurveParams),
    /// Rational-Logarithmic curve.
    Rlog(RlogParams),
}

impl ToneCurve {
    /// Which curve this is.
    pub fn kind(&self) -> CurveKind {
        match self {
            Self::Ppr(_) => CurveKind::Ppr,
            Self::Rlog(_) => CurveKind::Rlog,
        }
    }

    /// Resolve the per-parameter state (PPR continuity scale, RLOG `b'`)
    /// once for repeated point-wise evaluation.
    pub fn evaluator(&self) -> CurveEvaluator<'_> {
        let inner = match self {
            Self::Ppr(p) => Evaluator::Ppr(super::ppr::PprEvaluator::new(p)),
            Self::Rlog(p) => Evaluator::Rlog(super::rlog::RlogEvaluator::new(p)),
        };
        CurveEvaluator { inner }
    }

    /// Evaluate over a sample array.
    pub fn evaluate(&self, x: &[f64]) -> Vec<f64> {
        self.evaluator().evaluate(x)
    }

    /// Evaluate a single sample.
    ///
    /// Resolves the curve state on every call; prefer [`ToneCurve::evaluator`]
    /// inside loops.
    pub fn evaluate_at(&self, x: f64) -> f64 {
        self.evaluator().eval(x)
    }

    /// Input positions where the curve switches branches.
    ///
    /// PPR: the pivot. RLOG: both edges of the blend window.
    pub fn junctions(&self) -> Vec<f64> {
        match self {
            Self::Ppr(p) => vec![p.pivot()],
            Self::Rlog(p) => vec![
                p.threshold() - super::rlog::BLEND_HALF_WIDTH,
                p.threshold() + super::rlog::BLEND_HALF_WIDTH,
            ],
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Evaluator<'a> {
    Ppr(super::ppr::PprEvaluator<'a>),
    Rlog(super::rlog::RlogEvaluator<'a>),
}

/// A [`ToneCurve`] with its derived state resolved.
#[derive(Debug, Clone, Copy)]
pub struct CurveEvaluator<'a> {
    inner: Evaluator<'a>,
}

impl CurveEvaluator<'_> {
    /// Evaluate a single sample.
    pub fn eval(&self, x: f64) -> f64 {
        match &self.inner {
            Evaluator::Ppr(e) => e.eval(x),
            Evaluator::Rlog(e) => e.eval(x),
        }
    }

    /// Evaluate over a sample array.
    pub fn evaluate(&self, x: &[f64]) -> Vec<f64> {
        x.iter().map(|&v| self.eval(v)).collect()
    }
}
