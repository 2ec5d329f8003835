//! Cinema Pro HDR RefMath: float64 ground truth for the tone-mapping pipeline.
//!
//! This crate contains the transfer functions, tone curves, color-space
//! conversions and perceptual difference metric that GPU, OFX and DCTL
//! implementations are measured against. No I/O or framework dependencies;
//! every function is a pure transform over sample arrays.

pub mod color_management;
pub mod difference;
pub mod error;
pub mod numeric;
pub mod reference;
pub mod tone;

// Re-exports for convenience.
pub use color_management::color_space::{bt2020_to_p3d65, p3d65_to_bt2020};
pub use color_management::oklab::{linear_rgb_to_oklab, oklab_to_linear_rgb};
pub use color_management::transfer::{pq_eotf, pq_oetf};
pub use difference::{delta_e_00, delta_e_00_pair};
pub use error::RefMathError;
pub use tone::params::{CurveEvaluator, CurveKind, CurveParams, RlogParams, SoftKnee, ToneCurve};
pub use tone::presets::Preset;
pub use tone::{ppr_curve, rlog_curve};
