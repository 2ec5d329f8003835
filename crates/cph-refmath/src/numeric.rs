//! Small numeric helpers shared by the transfer, tone and color modules.

/// Smallest denominator magnitude the reference math divides by.
pub const MIN_DENOMINATOR: f64 = 1e-15;

/// Replace a near-zero denominator with `±MIN_DENOMINATOR`, keeping its sign.
///
/// Zero itself is treated as positive.
pub fn guard_denominator(den: f64) -> f64 {
    if den.abs() < MIN_DENOMINATOR {
        if den.is_sign_negative() && den != 0.0 {
            -MIN_DENOMINATOR
        } else {
            MIN_DENOMINATOR
        }
    } else {
        den
    }
}

/// Hermite smoothstep of `x` over `[edge0, edge1]`.
///
/// ```text
/// w = clamp((x − edge0) / (edge1 − edge0), 0, 1)
/// s = 3w² − 2w³
/// ```
///
/// A degenerate window (`edge1 <= edge0`) acts as a hard step at `edge0`.
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    if edge1 <= edge0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let w = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    w * w * (3.0 - 2.0 * w)
}

/// Linear interpolation `a + t·(b − a)`.
pub fn mix(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

/// `sign(v)·|v|^(1/3)`. Defined for negative inputs, unlike `powf(1/3)`.
pub fn signed_cbrt(v: f64) -> f64 {
    v.cbrt()
}

/// `sign(v)·|v|³`.
pub fn signed_cube(v: f64) -> f64 {
    v * v * v
}

/// `count` evenly spaced samples over `[start, end]`, both ends included.
///
/// `count == 1` yields `[start]`; `count == 0` yields an empty grid.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count)
                .map(|i| {
                    if i == count - 1 {
                        end
                    } else {
                        start + step * i as f64
                    }
                })
                .collect()
        }
    }
}
