//! Self-check of the reference engine.
//!
//! Builds the golden curve and color tables, checks the reference curves for
//! monotonicity and continuity, re-evaluates the tables through the point-wise
//! and scalar entry points, and exits non-zero if any result fails. Settings
//! come from `CPH_TOLERANCE`, `CPH_STRICT` and `CPH_SAMPLES`.

use std::process::ExitCode;

use cph_refmath::Preset;
use cph_regression::{
    ColorSamples, ColorSuite, CurveSamples, CurveSuite, RegressionConfig, RunSummary,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cph_regression=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = RegressionConfig::from_env();
    tracing::info!(
        "tolerance {:.1e} ({}), color tolerance {:.1e}, {} samples per curve",
        config.tolerance,
        if config.strict { "strict" } else { "p99" },
        config.color_tolerance,
        config.sample_count
    );

    let curve_suite = CurveSuite::from_config(&config);
    let curve_samples = CurveSamples::evaluate_presets(Preset::all(), curve_suite.reference());
    let curve_results = curve_suite.run(&curve_samples);
    let validation_results = curve_suite.validate_reference();
    tracing::info!(
        "curve suite: {} comparisons, {} reference checks",
        curve_results.len(),
        validation_results.len()
    );

    let color_suite = ColorSuite::from_config(&config);
    let color_samples = ColorSamples::evaluate_scalar(color_suite.reference());
    let color_results = color_suite.run(&color_samples);
    tracing::info!("color suite: {} comparisons", color_results.len());

    let mut summary = RunSummary::new(validation_results);
    summary.extend(curve_results);
    summary.extend(color_results);
    summary.log();

    if summary.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
