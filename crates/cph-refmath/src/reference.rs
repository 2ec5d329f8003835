//! In-memory golden tables.
//!
//! Curve tables hold every preset × curve kind sampled on a uniform `[0, 1]`
//! grid together with the validation verdict; color tables hold the output of
//! each color transform over an RGB lattice. Both are plain serde records so
//! a report sink can persist them in whatever format it likes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color_management::color_space::{bt2020_to_p3d65_slice, p3d65_to_bt2020_slice};
use crate::color_management::oklab::{linear_rgb_to_oklab_slice, oklab_to_linear_rgb_slice};
use crate::color_management::transfer::{PQ_PEAK_NITS, pq_eotf_rgb, pq_oetf_rgb};
use crate::numeric::linspace;
use crate::tone::params::CurveKind;
use crate::tone::presets::Preset;
use crate::tone::validate::{CurveReport, validate_curve};

/// Default sample count of the curve tables.
pub const DEFAULT_CURVE_SAMPLES: usize = 16384;

/// Default lattice steps per axis of the color tables (`steps³` triples).
pub const DEFAULT_LATTICE_STEPS: usize = 17;

/// One preset × curve kind reference table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveRecord {
    /// Preset identifier.
    pub preset: String,
    pub kind: CurveKind,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Validation verdict for the curve these samples came from.
    pub report: CurveReport,
}

impl CurveRecord {
    /// `"{preset}_{PPR|RLOG}"`.
    pub fn test_name(&self) -> String {
        format!("{}_{}", self.preset, self.kind.label())
    }

    /// Whether the curve passed the monotonicity scan.
    pub fn monotonic(&self) -> bool {
        self.report.monotonicity.monotonic
    }
}

/// Reference curve tables for a set of presets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceCurves {
    pub sample_count: usize,
    pub records: Vec<CurveRecord>,
}

impl ReferenceCurves {
    /// Sample every curve of every preset on `sample_count` points.
    pub fn generate(presets: &[Preset], sample_count: usize) -> Self {
        let x = linspace(0.0, 1.0, sample_count);
        let mut records = Vec::with_capacity(presets.len() * CurveKind::ALL.len());

        for preset in presets {
            for curve in preset.curves() {
                let report = validate_curve(&curve, sample_count);
                tracing::debug!(
                    "{} {}: monotonic={} C0 gap={:.2e} C1 gap={:.2e}",
                    preset.id,
                    curve.kind(),
                    report.monotonicity.monotonic,
                    report.continuity_gap,
                    report.derivative_gap
                );
                records.push(CurveRecord {
                    preset: preset.id.to_string(),
                    kind: curve.kind(),
                    y: curve.evaluate(&x),
                    x: x.clone(),
                    report,
                });
            }
        }

        Self {
            sample_count,
            records,
        }
    }

    /// Tables for the built-in presets at [`DEFAULT_CURVE_SAMPLES`].
    pub fn builtin() -> Self {
        Self::generate(Preset::all(), DEFAULT_CURVE_SAMPLES)
    }

    /// Look a table up by its test name.
    pub fn get(&self, test_name: &str) -> Option<&CurveRecord> {
        self.records.iter().find(|r| r.test_name() == test_name)
    }

    /// Whether every table passed the monotonicity scan.
    pub fn all_monotonic(&self) -> bool {
        self.records.iter().all(CurveRecord::monotonic)
    }
}

// ---------------------------------------------------------------------------
// Color transforms
// ---------------------------------------------------------------------------

/// The color transforms covered by the color tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorTransform {
    Bt2020ToP3d65,
    P3d65ToBt2020,
    PqEotf,
    PqOetf,
    RgbToOklab,
    OklabToRgb,
}

impl ColorTransform {
    /// Every transform, in reporting order.
    pub const ALL: [ColorTransform; 6] = [
        Self::Bt2020ToP3d65,
        Self::P3d65ToBt2020,
        Self::PqEotf,
        Self::PqOetf,
        Self::RgbToOklab,
        Self::OklabToRgb,
    ];

    /// Snake-case name used as the test name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bt2020ToP3d65 => "bt2020_to_p3d65",
            Self::P3d65ToBt2020 => "p3d65_to_bt2020",
            Self::PqEotf => "pq_eotf",
            Self::PqOetf => "pq_oetf",
            Self::RgbToOklab => "rgb_to_oklab",
            Self::OklabToRgb => "oklab_to_rgb",
        }
    }

    /// Apply the transform to every triple.
    pub fn apply(&self, samples: &[[f64; 3]]) -> Vec<[f64; 3]> {
        match self {
            Self::Bt2020ToP3d65 => bt2020_to_p3d65_slice(samples),
            Self::P3d65ToBt2020 => p3d65_to_bt2020_slice(samples),
            Self::PqEotf => samples.iter().map(|&c| pq_eotf_rgb(c)).collect(),
            Self::PqOetf => samples.iter().map(|&n| pq_oetf_rgb(n)).collect(),
            Self::RgbToOklab => linear_rgb_to_oklab_slice(samples),
            Self::OklabToRgb => oklab_to_linear_rgb_slice(samples),
        }
    }

    /// Map an RGB lattice in `[0, 1]³` into this transform's input domain.
    ///
    /// PQ OETF inputs are scaled to nits; OKLab → RGB inputs are the OKLab
    /// images of the lattice. The others take the lattice as is.
    pub fn domain_inputs(&self, lattice: &[[f64; 3]]) -> Vec<[f64; 3]> {
        match self {
            Self::PqOetf => lattice.iter().map(|c| c.map(|v| v * PQ_PEAK_NITS)).collect(),
            Self::OklabToRgb => linear_rgb_to_oklab_slice(lattice),
            _ => lattice.to_vec(),
        }
    }
}

impl fmt::Display for ColorTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reference inputs and outputs of one color transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorTable {
    pub transform: ColorTransform,
    pub inputs: Vec<[f64; 3]>,
    pub outputs: Vec<[f64; 3]>,
}

/// Reference tables for every [`ColorTransform`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorReference {
    pub tables: Vec<ColorTable>,
}

impl ColorReference {
    /// Build tables over a `steps³` lattice.
    pub fn generate(lattice_steps: usize) -> Self {
        let lattice = rgb_lattice(lattice_steps);
        let tables = ColorTransform::ALL
            .into_iter()
            .map(|transform| {
                let inputs = transform.domain_inputs(&lattice);
                let outputs = transform.apply(&inputs);
                ColorTable {
                    transform,
                    inputs,
                    outputs,
                }
            })
            .collect();
        Self { tables }
    }

    /// Tables over the default lattice.
    pub fn builtin() -> Self {
        Self::generate(DEFAULT_LATTICE_STEPS)
    }

    pub fn get(&self, transform: ColorTransform) -> Option<&ColorTable> {
        self.tables.iter().find(|t| t.transform == transform)
    }
}

/// Regular `steps³` lattice over `[0, 1]³`, red varying slowest.
pub fn rgb_lattice(steps: usize) -> Vec<[f64; 3]> {
    let axis = linspace(0.0, 1.0, steps);
    let mut out = Vec::with_capacity(axis.len().pow(3));
    for &r in &axis {
        for &g in &axis {
            for &b in &axis {
                out.push([r, g, b]);
            }
        }
    }
    out
}

/// Interleave triples into a flat `[r0, g0, b0, r1, ...]` array.
pub fn flatten_triples(samples: &[[f64; 3]]) -> Vec<f64> {
    samples.iter().flatten().copied().collect()
}
