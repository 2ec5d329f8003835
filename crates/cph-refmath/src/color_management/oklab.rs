//! Linear RGB ↔ OKLab through a cube-root-compressed LMS intermediate.
//!
//! # Reference
//! Björn Ottosson, "A perceptual color space for image processing" (2020)
//!
//! ```text
//! lms  = M1 · rgb
//! lms' = sign(lms) · |lms|^(1/3)
//! lab  = M2 · lms'
//! ```
//!
//! The inverse matrices are the exact inverses of the published forward
//! matrices (rounded once to f64), not the separately published 10-digit
//! inverse tables, so the pair round-trips to machine precision.

use super::color_space::ColorMatrix;
use crate::numeric::{signed_cbrt, signed_cube};

/// Linear RGB → LMS.
pub const RGB_TO_LMS: ColorMatrix = ColorMatrix([
    [0.4122214708, 0.5363325363, 0.0514459929],
    [0.2119034982, 0.6806995451, 0.1073969566],
    [0.0883024619, 0.2817188376, 0.6299787005],
]);

/// Compressed LMS → OKLab.
pub const LMS_TO_LAB: ColorMatrix = ColorMatrix([
    [0.2104542553, 0.7936177850, -0.0040720468],
    [1.9779984951, -2.4285922050, 0.4505937099],
    [0.0259040371, 0.7827717662, -0.8086757660],
]);

/// OKLab → compressed LMS.
pub const LAB_TO_LMS: ColorMatrix = ColorMatrix([
    [0.9999999984505198, 0.39633779217376786, 0.2158037580607588],
    [1.0000000088817609, -0.10556134232365635, -0.06385417477170591],
    [1.0000000546724108, -0.08948418209496575, -1.2914855378640917],
]);

/// LMS → linear RGB.
pub const LMS_TO_RGB: ColorMatrix = ColorMatrix([
    [4.076741661347994, -3.3077115904081933, 0.2309699287294279],
    [-1.268438004092176, 2.6097574006633715, -0.3413193963102196],
    [-0.004196086541837109, -0.7034186144594496, 1.7076147009309448],
]);

/// Linear RGB → OKLab `[L, a, b]`.
///
/// Negative LMS responses (out-of-gamut input) go through the signed cube
/// root instead of producing NaN.
pub fn linear_rgb_to_oklab(rgb: [f64; 3]) -> [f64; 3] {
    let lms = RGB_TO_LMS.apply(rgb).map(signed_cbrt);
    LMS_TO_LAB.apply(lms)
}

/// OKLab `[L, a, b]` → linear RGB.
pub fn oklab_to_linear_rgb(lab: [f64; 3]) -> [f64; 3] {
    let lms = LAB_TO_LMS.apply(lab).map(signed_cube);
    LMS_TO_RGB.apply(lms)
}

/// Apply [`linear_rgb_to_oklab`] to every triple.
pub fn linear_rgb_to_oklab_slice(samples: &[[f64; 3]]) -> Vec<[f64; 3]> {
    samples.iter().map(|&rgb| linear_rgb_to_oklab(rgb)).collect()
}

/// Apply [`oklab_to_linear_rgb`] to every triple.
pub fn oklab_to_linear_rgb_slice(samples: &[[f64; 3]]) -> Vec<[f64; 3]> {
    samples.iter().map(|&lab| oklab_to_linear_rgb(lab)).collect()
}
