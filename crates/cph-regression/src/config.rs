//! Regression run configuration.

use serde::{Deserialize, Serialize};

const DEFAULT_TOLERANCE: f64 = 1e-6;
const DEFAULT_COLOR_TOLERANCE: f64 = 1e-6;
const DEFAULT_SAMPLE_COUNT: usize = 16384;

/// Tolerance and sampling settings for a regression run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegressionConfig {
    /// Curve comparison tolerance.
    pub tolerance: f64,
    /// Gate on the maximum error instead of the 99th percentile.
    pub strict: bool,
    /// Samples per reference curve.
    pub sample_count: usize,
    /// Color transform comparison tolerance.
    pub color_tolerance: f64,
}

impl Default for RegressionConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            strict: false,
            sample_count: DEFAULT_SAMPLE_COUNT,
            color_tolerance: DEFAULT_COLOR_TOLERANCE,
        }
    }
}

impl RegressionConfig {
    /// Defaults overridden by `CPH_TOLERANCE`, `CPH_STRICT` and `CPH_SAMPLES`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden through `lookup`. Malformed values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            tolerance: lookup("CPH_TOLERANCE")
                .and_then(|s| s.trim().parse().ok())
                .filter(|t: &f64| t.is_finite() && *t >= 0.0)
                .unwrap_or(defaults.tolerance),
            strict: lookup("CPH_STRICT")
                .and_then(|s| parse_flag(&s))
                .unwrap_or(defaults.strict),
            sample_count: lookup("CPH_SAMPLES")
                .and_then(|s| s.trim().parse().ok())
                .filter(|n: &usize| *n >= 2)
                .unwrap_or(defaults.sample_count),
            color_tolerance: defaults.color_tolerance,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_from<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_defaults() {
        let config = RegressionConfig::default();
        assert_eq!(config.tolerance, 1e-6);
        assert!(!config.strict);
        assert_eq!(config.sample_count, 16384);
        assert_eq!(config.color_tolerance, 1e-6);
    }

    #[test]
    fn test_overrides() {
        let config = RegressionConfig::from_lookup(lookup_from(&[
            ("CPH_TOLERANCE", "1e-4"),
            ("CPH_STRICT", "true"),
            ("CPH_SAMPLES", "1024"),
        ]));
        assert_eq!(config.tolerance, 1e-4);
        assert!(config.strict);
        assert_eq!(config.sample_count, 1024);
    }

    #[test]
    fn test_malformed_values_fall_back() {
        let config = RegressionConfig::from_lookup(lookup_from(&[
            ("CPH_TOLERANCE", "tight"),
            ("CPH_STRICT", "maybe"),
            ("CPH_SAMPLES", "1"),
        ]));
        assert_eq!(config, RegressionConfig::default());
    }

    #[test]
    fn test_negative_tolerance_rejected() {
        let config = RegressionConfig::from_lookup(lookup_from(&[("CPH_TOLERANCE", "-1")]));
        assert_eq!(config.tolerance, 1e-6);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: RegressionConfig =
            serde_json::from_str(r#"{"strict":true}"#).expect("valid json");
        assert!(config.strict);
        assert_eq!(config.sample_count, 16384);
    }
}
