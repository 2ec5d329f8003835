//! PQ (SMPTE ST 2084) transfer functions at full f64 precision.
//!
//! The EOTF maps a PQ code value in `[0, 1]` to absolute luminance in nits
//! (`[0, 10000]`); the OETF is its inverse. Both functions pin their domain
//! boundaries explicitly so the reference tables never depend on how `powf`
//! treats zero or negative bases.
//!
//! # Reference
//! SMPTE ST 2084:2014: High Dynamic Range EOTF of Mastering Reference Displays

use crate::numeric::guard_denominator;

/// `m1 = 2610 / 16384`
pub const PQ_M1: f64 = 2610.0 / 16384.0;
/// `m2 = 2523 / 4096 × 128`
pub const PQ_M2: f64 = 2523.0 / 4096.0 * 128.0;
/// `c1 = 3424 / 4096`
pub const PQ_C1: f64 = 3424.0 / 4096.0;
/// `c2 = 2413 / 4096 × 32`
pub const PQ_C2: f64 = 2413.0 / 4096.0 * 32.0;
/// `c3 = 2392 / 4096 × 32`
pub const PQ_C3: f64 = 2392.0 / 4096.0 * 32.0;

/// Peak luminance of the PQ container in nits.
pub const PQ_PEAK_NITS: f64 = 10000.0;

/// A transfer function that converts between linear and non-linear encodings.
///
/// Linear values are normalized so that `1.0` is the container peak.
pub trait TransferFunction: Send + Sync {
    /// Convert from non-linear (encoded) to linear light.
    fn to_linear(&self, encoded: f64) -> f64;

    /// Convert from linear light to non-linear (encoded).
    fn to_encoded(&self, linear: f64) -> f64;
}

// ---------------------------------------------------------------------------
// PQ (ST 2084)
// ---------------------------------------------------------------------------

/// PQ EOTF: code value → luminance in nits.
///
/// ```text
/// P   = E^(1/m2)
/// num = max(P − c1, 0)
/// den = c2 − c3 × P            (|den| < 1e-15 → ±1e-15)
/// Y   = (num / den)^(1/m1) × 10000
///
/// E <= 0 → 0
/// E >= 1 → 10000
/// ```
pub fn pq_eotf(code: f64) -> f64 {
    if code <= 0.0 {
        return 0.0;
    }
    if code >= 1.0 {
        return PQ_PEAK_NITS;
    }

    let p = code.powf(1.0 / PQ_M2);
    let num = (p - PQ_C1).max(0.0);
    let den = guard_denominator(PQ_C2 - PQ_C3 * p);
    (num / den).powf(1.0 / PQ_M1) * PQ_PEAK_NITS
}

/// PQ OETF (inverse EOTF): luminance in nits → code value.
///
/// ```text
/// Y   = L / 10000
/// E   = ((c1 + c2 × Y^m1) / (1 + c3 × Y^m1))^m2     clamped to [0, 1]
///
/// L <= 0     → 0
/// L >= 10000 → 1
/// ```
pub fn pq_oetf(nits: f64) -> f64 {
    if nits <= 0.0 {
        return 0.0;
    }
    if nits >= PQ_PEAK_NITS {
        return 1.0;
    }

    let ym = (nits / PQ_PEAK_NITS).powf(PQ_M1);
    let den = guard_denominator(1.0 + PQ_C3 * ym);
    ((PQ_C1 + PQ_C2 * ym) / den).powf(PQ_M2).clamp(0.0, 1.0)
}

/// Apply [`pq_eotf`] to every sample.
pub fn pq_eotf_slice(codes: &[f64]) -> Vec<f64> {
    codes.iter().map(|&c| pq_eotf(c)).collect()
}

/// Apply [`pq_oetf`] to every sample.
pub fn pq_oetf_slice(nits: &[f64]) -> Vec<f64> {
    nits.iter().map(|&n| pq_oetf(n)).collect()
}

/// Apply [`pq_eotf`] per channel.
pub fn pq_eotf_rgb(rgb: [f64; 3]) -> [f64; 3] {
    rgb.map(pq_eotf)
}

/// Apply [`pq_oetf`] per channel.
pub fn pq_oetf_rgb(rgb: [f64; 3]) -> [f64; 3] {
    rgb.map(pq_oetf)
}

/// PQ as a [`TransferFunction`] with linear light normalized to 10000 nits.
#[derive(Debug, Clone, Copy, Default)]
pub struct PqTransfer;

impl TransferFunction for PqTransfer {
    fn to_linear(&self, encoded: f64) -> f64 {
        pq_eotf(encoded) / PQ_PEAK_NITS
    }

    fn to_encoded(&self, linear: f64) -> f64 {
        pq_oetf(linear * PQ_PEAK_NITS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn assert_roundtrip(tf: &dyn TransferFunction, values: &[f64]) {
        for &v in values {
            let encoded = tf.to_encoded(v);
            let back = tf.to_linear(encoded);
            assert!(
                (v - back).abs() < EPSILON,
                "roundtrip failed for {v}: encoded={encoded}, back={back}, diff={}",
                (v - back).abs()
            );
        }
    }

    #[test]
    fn test_pq_constants_match_st2084() {
        assert_eq!(PQ_M1, 0.1593017578125);
        assert_eq!(PQ_M2, 78.84375);
        assert_eq!(PQ_C1, 0.8359375);
        assert_eq!(PQ_C2, 18.8515625);
        assert_eq!(PQ_C3, 18.6875);
    }

    #[test]
    fn test_pq_boundaries() {
        assert_eq!(pq_eotf(0.0), 0.0);
        assert_eq!(pq_eotf(1.0), 10000.0);
        assert_eq!(pq_oetf(0.0), 0.0);
        assert_eq!(pq_oetf(10000.0), 1.0);
    }

    #[test]
    fn test_pq_out_of_domain_inputs_pin_to_boundaries() {
        assert_eq!(pq_eotf(-0.5), 0.0);
        assert_eq!(pq_eotf(1.5), 10000.0);
        assert_eq!(pq_oetf(-100.0), 0.0);
        assert_eq!(pq_oetf(20000.0), 1.0);
    }

    #[test]
    fn test_pq_known_values() {
        // 100 nits sits at roughly 0.508 PQ.
        assert!((pq_oetf(100.0) - 0.508078).abs() < 1e-4);
        // 1000 nits sits at roughly 0.751827 PQ.
        assert!((pq_oetf(1000.0) - 0.751827).abs() < 1e-4);
        assert!((pq_eotf(pq_oetf(100.0)) - 100.0).abs() < 1e-7);
    }

    #[test]
    fn test_pq_codes_below_black_floor_decode_to_zero() {
        // Codes below c1^m2 decode to exactly zero.
        let floor = PQ_C1.powf(PQ_M2);
        assert!(floor > 7.0e-7 && floor < 7.6e-7, "floor={floor}");
        assert_eq!(pq_eotf(floor * 0.5), 0.0);
        assert!(pq_eotf(floor * 2.0) > 0.0);
    }

    #[test]
    fn test_pq_roundtrip_on_grid() {
        for i in 1..1000 {
            let x = i as f64 / 1000.0;
            let back = pq_oetf(pq_eotf(x));
            assert!((back - x).abs() < EPSILON, "x={x} back={back}");
        }
    }

    #[test]
    fn test_pq_transfer_roundtrip_preserves_values() {
        assert_roundtrip(&PqTransfer, &[0.0, 1e-4, 0.01, 0.1, 0.5, 0.9, 1.0]);
    }

    #[test]
    fn test_pq_slice_and_rgb_forms_match_scalar() {
        let codes = [0.0, 0.25, 0.5, 0.75, 1.0];
        let nits = pq_eotf_slice(&codes);
        for (c, n) in codes.iter().zip(&nits) {
            assert_eq!(*n, pq_eotf(*c));
        }
        assert_eq!(pq_oetf_slice(&nits).len(), codes.len());

        let rgb = pq_eotf_rgb([0.1, 0.5, 0.9]);
        assert_eq!(rgb[1], pq_eotf(0.5));
        let back = pq_oetf_rgb(rgb);
        assert!((back[2] - 0.9).abs() < EPSILON);
    }

    #[test]
    fn test_pq_eotf_is_monotonic() {
        let mut prev = pq_eotf(0.0);
        for i in 1..=4096 {
            let y = pq_eotf(i as f64 / 4096.0);
            assert!(y >= prev);
            prev = y;
        }
    }
}
