//! CIEDE2000 color difference (ΔE00).
//!
//! # Reference
//! G. Sharma, W. Wu, E. N. Dalal, "The CIEDE2000 Color-Difference Formula:
//! Implementation Notes, Supplementary Test Data, and Mathematical
//! Observations" (2005)
//!
//! Parametric weights are fixed at `k_L = k_C = k_H = 1`. Hue angles are
//! handled in degrees throughout, matching the published formula.

use crate::error::{RefMathError, ensure_same_len};

/// `25^7`, the chroma pivot of the `G` and `R_C` terms.
const POW25_7: f64 = 6_103_515_625.0;

/// Hue angle of `(a, b)` in degrees on `[0, 360)`; zero for the neutral axis.
fn hue_degrees(a: f64, b: f64) -> f64 {
    if a == 0.0 && b == 0.0 {
        return 0.0;
    }
    let h = b.atan2(a).to_degrees();
    if h < 0.0 { h + 360.0 } else { h }
}

/// `sqrt(c^7 / (c^7 + 25^7))`, zero for zero chroma.
fn chroma_weight(c: f64) -> f64 {
    if c <= 0.0 {
        return 0.0;
    }
    let c7 = c.powi(7);
    (c7 / (c7 + POW25_7)).sqrt()
}

/// ΔE00 between two CIELAB colors `[L*, a*, b*]`.
pub fn delta_e_00_pair(lab1: [f64; 3], lab2: [f64; 3]) -> f64 {
    let [l1, a1, b1] = lab1;
    let [l2, a2, b2] = lab2;

    // Chroma-dependent a* stretch.
    let c_bar = (a1.hypot(b1) + a2.hypot(b2)) / 2.0;
    let g = 0.5 * (1.0 - chroma_weight(c_bar));
    let a1p = a1 * (1.0 + g);
    let a2p = a2 * (1.0 + g);

    let c1p = a1p.hypot(b1);
    let c2p = a2p.hypot(b2);
    let h1p = hue_degrees(a1p, b1);
    let h2p = hue_degrees(a2p, b2);
    let chroma_product = c1p * c2p;

    let dl = l2 - l1;
    let dc = c2p - c1p;
    let dh = if chroma_product == 0.0 {
        0.0
    } else {
        let diff = h2p - h1p;
        if diff > 180.0 {
            diff - 360.0
        } else if diff <= -180.0 {
            diff + 360.0
        } else {
            diff
        }
    };
    let dh_big = 2.0 * chroma_product.sqrt() * (dh / 2.0).to_radians().sin();

    let l_bar = (l1 + l2) / 2.0;
    let c_bar_p = (c1p + c2p) / 2.0;
    let h_bar = if chroma_product == 0.0 {
        h1p + h2p
    } else if (h1p - h2p).abs() <= 180.0 {
        (h1p + h2p) / 2.0
    } else if h1p + h2p < 360.0 {
        (h1p + h2p + 360.0) / 2.0
    } else {
        (h1p + h2p - 360.0) / 2.0
    };

    let t = 1.0 - 0.17 * (h_bar - 30.0).to_radians().cos()
        + 0.24 * (2.0 * h_bar).to_radians().cos()
        + 0.32 * (3.0 * h_bar + 6.0).to_radians().cos()
        - 0.20 * (4.0 * h_bar - 63.0).to_radians().cos();

    let l_off = (l_bar - 50.0).powi(2);
    let s_l = 1.0 + 0.015 * l_off / (20.0 + l_off).sqrt();
    let s_c = 1.0 + 0.045 * c_bar_p;
    let s_h = 1.0 + 0.015 * c_bar_p * t;

    // Blue-region rotation.
    let d_theta = 30.0 * (-((h_bar - 275.0) / 25.0).powi(2)).exp();
    let r_c = 2.0 * chroma_weight(c_bar_p);
    let r_t = -(2.0 * d_theta).to_radians().sin() * r_c;

    let l_term = dl / s_l;
    let c_term = dc / s_c;
    let h_term = dh_big / s_h;
    (l_term * l_term + c_term * c_term + h_term * h_term + r_t * c_term * h_term)
        .max(0.0)
        .sqrt()
}

/// Element-wise ΔE00 over two index-aligned Lab arrays.
pub fn delta_e_00(lab1: &[[f64; 3]], lab2: &[[f64; 3]]) -> Result<Vec<f64>, RefMathError> {
    ensure_same_len(lab1.len(), lab2.len())?;
    Ok(lab1
        .iter()
        .zip(lab2)
        .map(|(&x, &y)| delta_e_00_pair(x, y))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Published values are rounded to four decimals.
    const EPSILON: f64 = 5e-5;

    const SHARMA_PAIRS: [([f64; 3], [f64; 3], f64); 10] = [
        ([50.0, 2.6772, -79.7751], [50.0, 0.0, -82.7485], 2.0425),
        ([50.0, 3.1571, -77.2803], [50.0, 0.0, -82.7485], 2.8615),
        ([50.0, 2.8361, -74.0200], [50.0, 0.0, -82.7485], 3.4412),
        ([50.0, -1.3802, -84.2814], [50.0, 0.0, -82.7485], 1.0000),
        ([50.0, 0.0, 0.0], [50.0, -1.0, 2.0], 2.3669),
        ([50.0, 2.49, -0.001], [50.0, -2.49, 0.0009], 7.1792),
        ([50.0, -0.001, 2.49], [50.0, 0.0009, -2.49], 4.8045),
        ([50.0, 2.5, 0.0], [73.0, 25.0, -18.0], 27.1492),
        ([60.2574, -34.0099, 36.2677], [60.4626, -34.1751, 39.4387], 1.2644),
        ([2.0776, 0.0795, -1.1350], [0.9033, -0.0636, -0.5514], 0.9082),
    ];

    #[test]
    fn test_sharma_reference_pairs() {
        for (lab1, lab2, expected) in SHARMA_PAIRS {
            let de = delta_e_00_pair(lab1, lab2);
            assert!(
                (de - expected).abs() < EPSILON,
                "{lab1:?} vs {lab2:?}: {de} != {expected}"
            );
        }
    }

    #[test]
    fn test_identity_is_zero() {
        for (lab, _, _) in SHARMA_PAIRS {
            assert_eq!(delta_e_00_pair(lab, lab), 0.0);
        }
        assert_eq!(delta_e_00_pair([0.0; 3], [0.0; 3]), 0.0);
    }

    #[test]
    fn test_symmetric() {
        for (lab1, lab2, _) in SHARMA_PAIRS {
            let forward = delta_e_00_pair(lab1, lab2);
            let backward = delta_e_00_pair(lab2, lab1);
            assert!((forward - backward).abs() < 1e-12);
        }
    }

    #[test]
    fn test_lightness_only_difference_on_neutral_axis() {
        // L̄ = 50 makes S_L = 1, so ΔE00 = ΔL.
        let de = delta_e_00_pair([45.0, 0.0, 0.0], [55.0, 0.0, 0.0]);
        assert!((de - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_hue_wraps_across_zero_degrees() {
        // Hues at ±1° must be 2° apart, not 358°.
        let a = 10.0;
        let b = a * 1.0_f64.to_radians().tan();
        let de = delta_e_00_pair([50.0, a, b], [50.0, a, -b]);
        assert!(de < 1.0, "{de}");
    }

    #[test]
    fn test_array_form() {
        let lab1: Vec<_> = SHARMA_PAIRS.iter().map(|p| p.0).collect();
        let lab2: Vec<_> = SHARMA_PAIRS.iter().map(|p| p.1).collect();
        let de = delta_e_00(&lab1, &lab2).expect("same length");
        assert_eq!(de.len(), SHARMA_PAIRS.len());
        assert_eq!(de[3], delta_e_00_pair(lab1[3], lab2[3]));
    }

    #[test]
    fn test_array_form_rejects_length_mismatch() {
        let err = delta_e_00(&[[50.0, 0.0, 0.0]; 2], &[[50.0, 0.0, 0.0]; 3]).unwrap_err();
        assert_eq!(
            err,
            RefMathError::ShapeMismatch {
                expected: 2,
                actual: 3
            }
        );
    }
}
