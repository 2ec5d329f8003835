//! Error statistics and tolerance gating.
//!
//! An [`ErrorAnalysis`] summarizes the absolute error between a reference
//! array and a candidate array; [`check_tolerance`] turns it into a verdict
//! and [`compare`] wraps both into a [`ComparisonResult`] that also carries
//! structural failures (missing or misaligned data) as plain data.

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Maximum number of worst points kept per analysis.
pub const WORST_POINT_COUNT: usize = 10;

/// One of the worst-offending samples of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorstPoint {
    pub index: usize,
    /// Input coordinate of the sample, or its index when no grid was given.
    pub input: f64,
    pub expected: f64,
    pub actual: f64,
}

impl WorstPoint {
    /// Absolute error of this sample.
    pub fn error(&self) -> f64 {
        point_error(self.expected, self.actual)
    }
}

/// Summary statistics of the absolute error between two arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorAnalysis {
    pub max_error: f64,
    pub mean_error: f64,
    pub rms_error: f64,
    /// 95th percentile (linear interpolation).
    pub p95: f64,
    /// 99th percentile (linear interpolation).
    pub p99: f64,
    /// Up to [`WORST_POINT_COUNT`] samples by descending error, ties by index.
    pub worst_points: Vec<WorstPoint>,
}

/// `|expected − actual|`, with any non-finite difference counted as `+∞`.
fn point_error(expected: f64, actual: f64) -> f64 {
    let err = (expected - actual).abs();
    if err.is_finite() { err } else { f64::INFINITY }
}

/// Per-sample absolute errors, for heatmaps and other visualization sinks.
pub fn absolute_errors(expected: &[f64], actual: &[f64]) -> Result<Vec<f64>, AnalysisError> {
    if expected.len() != actual.len() {
        return Err(AnalysisError::ShapeMismatch {
            expected: expected.len(),
            actual: actual.len(),
        });
    }
    Ok(expected
        .iter()
        .zip(actual)
        .map(|(&e, &a)| point_error(e, a))
        .collect())
}

/// `q`-th percentile (`q ∈ [0, 100]`) with linear interpolation between the
/// two nearest ranks. `None` for an empty slice.
pub fn percentile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Some(percentile_of_sorted(&sorted, q))
}

fn percentile_of_sorted(sorted: &[f64], q: f64) -> f64 {
    let rank = q.clamp(0.0, 100.0) / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    if lo == hi || frac == 0.0 || sorted[lo] == sorted[hi] {
        return sorted[lo];
    }
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Analyze `actual` against `expected`.
///
/// `inputs`, when given, supplies the input coordinate reported with each
/// worst point and must be as long as `expected`.
pub fn analyze(
    expected: &[f64],
    actual: &[f64],
    inputs: Option<&[f64]>,
) -> Result<ErrorAnalysis, AnalysisError> {
    let errors = absolute_errors(expected, actual)?;
    if let Some(inputs) = inputs {
        if inputs.len() != expected.len() {
            return Err(AnalysisError::ShapeMismatch {
                expected: expected.len(),
                actual: inputs.len(),
            });
        }
    }
    if errors.is_empty() {
        return Err(AnalysisError::MissingData);
    }

    let n = errors.len() as f64;
    let max_error = errors.iter().copied().fold(0.0, f64::max);
    let mean_error = errors.iter().sum::<f64>() / n;
    let rms_error = (errors.iter().map(|e| e * e).sum::<f64>() / n).sqrt();

    let mut sorted = errors.clone();
    sorted.sort_by(f64::total_cmp);
    let p95 = percentile_of_sorted(&sorted, 95.0);
    let p99 = percentile_of_sorted(&sorted, 99.0);

    let mut order: Vec<usize> = (0..errors.len()).collect();
    order.sort_by(|&a, &b| errors[b].total_cmp(&errors[a]).then(a.cmp(&b)));
    let worst_points = order
        .into_iter()
        .take(WORST_POINT_COUNT)
        .map(|index| WorstPoint {
            index,
            input: inputs.map_or(index as f64, |x| x[index]),
            expected: expected[index],
            actual: actual[index],
        })
        .collect();

    Ok(ErrorAnalysis {
        max_error,
        mean_error,
        rms_error,
        p95,
        p99,
        worst_points,
    })
}

/// Gate an analysis: strict compares the maximum error, lenient the 99th
/// percentile.
pub fn check_tolerance(analysis: &ErrorAnalysis, tolerance: f64, strict: bool) -> bool {
    if strict {
        analysis.max_error <= tolerance
    } else {
        analysis.p99 <= tolerance
    }
}

/// Verdict for one named comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub test_name: String,
    pub passed: bool,
    /// `None` when the data could not be analyzed at all.
    pub analysis: Option<ErrorAnalysis>,
    pub tolerance: f64,
    pub message: String,
}

impl ComparisonResult {
    /// A structural failure with no analysis attached.
    pub fn structural_failure(
        test_name: impl Into<String>,
        tolerance: f64,
        error: &AnalysisError,
    ) -> Self {
        let test_name = test_name.into();
        let message = match error {
            AnalysisError::MissingData => format!("missing test data: {test_name}"),
            AnalysisError::ShapeMismatch { .. } => error.to_string(),
        };
        tracing::warn!("{test_name}: {message}");
        Self {
            test_name,
            passed: false,
            analysis: None,
            tolerance,
            message,
        }
    }

    /// Whether the result failed without a numeric analysis behind it.
    pub fn is_structural_failure(&self) -> bool {
        !self.passed && self.analysis.is_none()
    }

    pub fn max_error(&self) -> Option<f64> {
        self.analysis.as_ref().map(|a| a.max_error)
    }
}

/// Compare a candidate array against the reference.
///
/// `actual == None` or an empty candidate is reported as missing data, a
/// length disagreement as a shape mismatch; neither carries an analysis.
pub fn compare(
    test_name: &str,
    expected: &[f64],
    actual: Option<&[f64]>,
    tolerance: f64,
    strict: bool,
) -> ComparisonResult {
    compare_inner(test_name, expected, actual, None, tolerance, strict)
}

/// [`compare`] with the input grid carried into the worst points.
pub fn compare_with_inputs(
    test_name: &str,
    expected: &[f64],
    actual: Option<&[f64]>,
    inputs: &[f64],
    tolerance: f64,
    strict: bool,
) -> ComparisonResult {
    compare_inner(test_name, expected, actual, Some(inputs), tolerance, strict)
}

fn compare_inner(
    test_name: &str,
    expected: &[f64],
    actual: Option<&[f64]>,
    inputs: Option<&[f64]>,
    tolerance: f64,
    strict: bool,
) -> ComparisonResult {
    let actual = match actual {
        Some(actual) if !actual.is_empty() => actual,
        _ => {
            return ComparisonResult::structural_failure(
                test_name,
                tolerance,
                &AnalysisError::MissingData,
            );
        }
    };

    let analysis = match analyze(expected, actual, inputs) {
        Ok(analysis) => analysis,
        Err(err) => return ComparisonResult::structural_failure(test_name, tolerance, &err),
    };

    let passed = check_tolerance(&analysis, tolerance, strict);
    let gate = if strict { "max" } else { "p99" };
    let mut message = format!(
        "max error {:.2e}, rms {:.2e}, {gate} gated at {tolerance:.2e}",
        analysis.max_error, analysis.rms_error
    );
    if passed {
        tracing::debug!("{test_name}: {message}");
    } else {
        message.push_str(" [FAIL]");
        if let Some(worst) = analysis.worst_points.first() {
            tracing::warn!(
                "{test_name}: {message}; worst at index {} (input {:.6}): expected {:.9}, got {:.9}",
                worst.index,
                worst.input,
                worst.expected,
                worst.actual
            );
        }
    }

    ComparisonResult {
        test_name: test_name.to_string(),
        passed,
        analysis: Some(analysis),
        tolerance,
        message,
    }
}
