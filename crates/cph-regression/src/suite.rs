//! Regression suites: curve tables and color transforms against the
//! reference engine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use cph_refmath::color_management::transfer::{PQ_PEAK_NITS, PqTransfer, TransferFunction};
use cph_refmath::reference::{ColorReference, ColorTransform, ReferenceCurves, flatten_triples};
use cph_refmath::{
    Preset, bt2020_to_p3d65, linear_rgb_to_oklab, oklab_to_linear_rgb, p3d65_to_bt2020,
};

use crate::analysis::{ComparisonResult, compare, compare_with_inputs};
use crate::config::RegressionConfig;

// ---------------------------------------------------------------------------
// Curves
// ---------------------------------------------------------------------------

/// Candidate curve outputs keyed by test name (`cinema_flat_PPR`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurveSamples {
    entries: BTreeMap<String, Vec<f64>>,
}

impl CurveSamples {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the samples for `test_name`.
    pub fn insert(&mut self, test_name: impl Into<String>, values: Vec<f64>) {
        self.entries.insert(test_name.into(), values);
    }

    pub fn get(&self, test_name: &str) -> Option<&[f64]> {
        self.entries.get(test_name).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Evaluate every preset curve point by point on the reference grid.
    pub fn evaluate_presets(presets: &[Preset], reference: &ReferenceCurves) -> Self {
        let mut samples = Self::new();
        for preset in presets {
            for curve in preset.curves() {
                let name = preset.test_name(curve.kind());
                if let Some(record) = reference.get(&name) {
                    let evaluator = curve.evaluator();
                    let y = record.x.iter().map(|&x| evaluator.eval(x)).collect();
                    samples.insert(name, y);
                }
            }
        }
        samples
    }
}

/// Largest C0 gap a reference curve may show at its junctions.
pub const CONTINUITY_TOLERANCE: f64 = 1e-9;

/// Compares candidate curve outputs with the reference tables.
#[derive(Debug, Clone)]
pub struct CurveSuite {
    reference: ReferenceCurves,
    tolerance: f64,
    strict: bool,
}

impl CurveSuite {
    pub fn new(reference: ReferenceCurves, tolerance: f64, strict: bool) -> Self {
        Self {
            reference,
            tolerance,
            strict,
        }
    }

    /// Reference tables for the built-in presets at the configured density.
    pub fn from_config(config: &RegressionConfig) -> Self {
        let reference = ReferenceCurves::generate(Preset::all(), config.sample_count);
        Self::new(reference, config.tolerance, config.strict)
    }

    pub fn reference(&self) -> &ReferenceCurves {
        &self.reference
    }

    /// One result per reference table from its monotonicity and C0 verdict.
    ///
    /// Test names are `"{preset}_{PPR|RLOG}_validation"`. These results carry
    /// no error analysis.
    pub fn validate_reference(&self) -> Vec<ComparisonResult> {
        self.reference
            .records
            .iter()
            .map(|record| {
                let report = &record.report;
                let passed = report.passed(CONTINUITY_TOLERANCE);
                let mut message = format!(
                    "min step {:.2e}, C0 gap {:.2e}, C1 gap {:.2e}",
                    report.monotonicity.min_step, report.continuity_gap, report.derivative_gap
                );
                if !passed {
                    message.push_str(" [FAIL]");
                    tracing::warn!("{} reference curve invalid: {message}", record.test_name());
                }
                ComparisonResult {
                    test_name: format!("{}_validation", record.test_name()),
                    passed,
                    analysis: None,
                    tolerance: CONTINUITY_TOLERANCE,
                    message,
                }
            })
            .collect()
    }

    /// One result per reference table, in table order.
    pub fn run(&self, samples: &CurveSamples) -> Vec<ComparisonResult> {
        self.reference
            .records
            .iter()
            .map(|record| {
                let name = record.test_name();
                compare_with_inputs(
                    &name,
                    &record.y,
                    samples.get(&name),
                    &record.x,
                    self.tolerance,
                    self.strict,
                )
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Color transforms
// ---------------------------------------------------------------------------

/// Candidate color transform outputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorSamples {
    entries: BTreeMap<ColorTransform, Vec<[f64; 3]>>,
}

impl ColorSamples {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, transform: ColorTransform, values: Vec<[f64; 3]>) {
        self.entries.insert(transform, values);
    }

    pub fn get(&self, transform: ColorTransform) -> Option<&[[f64; 3]]> {
        self.entries.get(&transform).map(Vec::as_slice)
    }

    /// Run every reference input through the scalar conversion functions.
    pub fn evaluate_scalar(reference: &ColorReference) -> Self {
        let pq = PqTransfer;
        let mut samples = Self::new();
        for table in &reference.tables {
            let outputs = table
                .inputs
                .iter()
                .map(|&v| match table.transform {
                    ColorTransform::Bt2020ToP3d65 => bt2020_to_p3d65(v),
                    ColorTransform::P3d65ToBt2020 => p3d65_to_bt2020(v),
                    ColorTransform::PqEotf => v.map(|c| pq.to_linear(c) * PQ_PEAK_NITS),
                    ColorTransform::PqOetf => v.map(|n| pq.to_encoded(n / PQ_PEAK_NITS)),
                    ColorTransform::RgbToOklab => linear_rgb_to_oklab(v),
                    ColorTransform::OklabToRgb => oklab_to_linear_rgb(v),
                })
                .collect();
            samples.insert(table.transform, outputs);
        }
        samples
    }
}

/// Compares candidate color transform outputs with the reference tables.
///
/// Triples are flattened to `[r0, g0, b0, r1, ...]` before analysis. Color
/// transforms are always gated on p99; the strict flag only applies to
/// curves.
#[derive(Debug, Clone)]
pub struct ColorSuite {
    reference: ColorReference,
    tolerance: f64,
}

impl ColorSuite {
    pub fn new(reference: ColorReference, tolerance: f64) -> Self {
        Self {
            reference,
            tolerance,
        }
    }

    pub fn from_config(config: &RegressionConfig) -> Self {
        Self::new(ColorReference::builtin(), config.color_tolerance)
    }

    pub fn reference(&self) -> &ColorReference {
        &self.reference
    }

    /// One result per transform, in [`ColorTransform::ALL`] order.
    pub fn run(&self, samples: &ColorSamples) -> Vec<ComparisonResult> {
        self.reference
            .tables
            .iter()
            .map(|table| {
                let expected = flatten_triples(&table.outputs);
                let actual = samples.get(table.transform).map(flatten_triples);
                compare(
                    table.transform.name(),
                    &expected,
                    actual.as_deref(),
                    self.tolerance,
                    false,
                )
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Aggregate of every comparison in a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub results: Vec<ComparisonResult>,
}

impl RunSummary {
    pub fn new(results: Vec<ComparisonResult>) -> Self {
        Self { results }
    }

    pub fn extend(&mut self, results: impl IntoIterator<Item = ComparisonResult>) {
        self.results.extend(results);
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.passed()
    }

    /// Fraction of passing results; `1.0` for an empty run.
    pub fn pass_rate(&self) -> f64 {
        if self.results.is_empty() {
            return 1.0;
        }
        self.passed() as f64 / self.total() as f64
    }

    /// Exit-code criterion: every result passed.
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ComparisonResult> {
        self.results.iter().filter(|r| !r.passed)
    }

    /// Largest max error over the analyzed results; `None` if none were.
    pub fn max_error(&self) -> Option<f64> {
        self.results
            .iter()
            .filter_map(ComparisonResult::max_error)
            .reduce(f64::max)
    }

    /// Emit one line per failure and a closing total at info level.
    pub fn log(&self) {
        for result in self.failures() {
            tracing::warn!("FAIL {}: {}", result.test_name, result.message);
        }
        tracing::info!(
            "{}/{} comparisons passed ({:.1}%)",
            self.passed(),
            self.total(),
            self.pass_rate() * 100.0
        );
        if let Some(max_error) = self.max_error() {
            tracing::info!("largest deviation {max_error:.2e}");
        }
    }
}
