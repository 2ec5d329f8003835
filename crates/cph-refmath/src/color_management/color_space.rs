//! Gamut conversions between BT.2020 and P3-D65 through CIE XYZ.
//!
//! The matrices are derived offline from the published primaries and the
//! D65 white point (x = 0.3127, y = 0.3290) with exact rational arithmetic,
//! then rounded once to the nearest f64. Inverses are computed the same way
//! rather than inverted at runtime, so a forward/inverse pair round-trips to
//! within a few ulps.
//!
//! | Space   | R (x, y)       | G (x, y)       | B (x, y)       |
//! |---------|----------------|----------------|----------------|
//! | BT.2020 | 0.708, 0.292   | 0.170, 0.797   | 0.131, 0.046   |
//! | P3-D65  | 0.680, 0.320   | 0.265, 0.690   | 0.150, 0.060   |

use glam::{DMat3, DVec3};

/// A 3x3 color matrix for linear color space conversions, stored row-major.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatrix(pub [[f64; 3]; 3]);

impl ColorMatrix {
    /// Returns the identity matrix (no-op transform).
    pub const fn identity() -> Self {
        Self([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
    }

    /// The matrix as a column-major `glam` matrix.
    pub fn to_mat3(&self) -> DMat3 {
        DMat3::from_cols_array_2d(&self.0).transpose()
    }

    fn from_mat3(m: DMat3) -> Self {
        Self(m.transpose().to_cols_array_2d())
    }

    /// Apply this matrix to an RGB triplet.
    pub fn apply(&self, rgb: [f64; 3]) -> [f64; 3] {
        (self.to_mat3() * DVec3::from_array(rgb)).to_array()
    }

    /// The matrix that applies `self` first and then `next`.
    pub fn then(&self, next: &ColorMatrix) -> ColorMatrix {
        Self::from_mat3(next.to_mat3() * self.to_mat3())
    }
}

/// Linear BT.2020 RGB → CIE XYZ (D65).
pub const BT2020_TO_XYZ: ColorMatrix = ColorMatrix([
    [0.6369580483012913, 0.14461690358620838, 0.16888097516417205],
    [0.26270021201126703, 0.677998071518871, 0.059301716469861945],
    [0.0, 0.028072693049087508, 1.0609850577107909],
]);

/// CIE XYZ (D65) → linear BT.2020 RGB.
pub const XYZ_TO_BT2020: ColorMatrix = ColorMatrix([
    [1.7166511879712676, -0.3556707837763924, -0.2533662813736598],
    [-0.666684351832489, 1.616481236634939, 0.01576854581391113],
    [0.017639857445310915, -0.042770613257808655, 0.942103121235474],
]);

/// Linear P3-D65 RGB → CIE XYZ (D65).
pub const P3D65_TO_XYZ: ColorMatrix = ColorMatrix([
    [0.48657094864821626, 0.26566769316909294, 0.1982172852343625],
    [0.22897456406974884, 0.6917385218365062, 0.079286914093745],
    [0.0, 0.045113381858902575, 1.0439443689009757],
]);

/// CIE XYZ (D65) → linear P3-D65 RGB.
pub const XYZ_TO_P3D65: ColorMatrix = ColorMatrix([
    [2.4934969119414245, -0.9313836179191236, -0.40271078445071684],
    [-0.829488969561575, 1.7626640603183468, 0.02362468584194359],
    [0.035845830243784335, -0.07617238926804171, 0.9568845240076873],
]);

/// Linear BT.2020 RGB → CIE XYZ.
pub fn bt2020_to_xyz(rgb: [f64; 3]) -> [f64; 3] {
    BT2020_TO_XYZ.apply(rgb)
}

/// CIE XYZ → linear BT.2020 RGB.
pub fn xyz_to_bt2020(xyz: [f64; 3]) -> [f64; 3] {
    XYZ_TO_BT2020.apply(xyz)
}

/// Linear BT.2020 RGB → linear P3-D65 RGB, as `XYZ→P3 · (BT.2020→XYZ · rgb)`.
///
/// Out-of-gamut results (negative components) are returned unclipped.
pub fn bt2020_to_p3d65(rgb: [f64; 3]) -> [f64; 3] {
    XYZ_TO_P3D65.apply(BT2020_TO_XYZ.apply(rgb))
}

/// Linear P3-D65 RGB → linear BT.2020 RGB, as `XYZ→BT.2020 · (P3→XYZ · rgb)`.
pub fn p3d65_to_bt2020(rgb: [f64; 3]) -> [f64; 3] {
    XYZ_TO_BT2020.apply(P3D65_TO_XYZ.apply(rgb))
}

/// Apply [`bt2020_to_p3d65`] to every triple.
pub fn bt2020_to_p3d65_slice(samples: &[[f64; 3]]) -> Vec<[f64; 3]> {
    samples.iter().map(|&rgb| bt2020_to_p3d65(rgb)).collect()
}

/// Apply [`p3d65_to_bt2020`] to every triple.
pub fn p3d65_to_bt2020_slice(samples: &[[f64; 3]]) -> Vec<[f64; 3]> {
    samples.iter().map(|&rgb| p3d65_to_bt2020(rgb)).collect()
}
