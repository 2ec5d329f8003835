//! Cinema Pro HDR regression gating.
//!
//! Error statistics, tolerance gating and the regression suites that hold
//! external implementations (GPU shader, OFX plugin, DCTL kernel) to the
//! float64 reference engine in `cph-refmath`.

pub mod analysis;
pub mod config;
pub mod error;
pub mod suite;

// Re-exports for convenience.
pub use analysis::{
    ComparisonResult, ErrorAnalysis, WorstPoint, absolute_errors, analyze, check_tolerance,
    compare, compare_with_inputs, percentile,
};
pub use config::RegressionConfig;
pub use error::AnalysisError;
pub use suite::{ColorSamples, ColorSuite, CurveSamples, CurveSuite, RunSummary};
