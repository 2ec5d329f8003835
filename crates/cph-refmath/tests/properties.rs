//! Property tests over random parameters and samples.

use cph_refmath::numeric::linspace;
use cph_refmath::tone::validate::{MONOTONIC_TOLERANCE, check_monotonic};
use cph_refmath::{
    CurveParams, RlogParams, SoftKnee, bt2020_to_p3d65, delta_e_00_pair, linear_rgb_to_oklab,
    oklab_to_linear_rgb, p3d65_to_bt2020, ppr_curve, rlog_curve,
};
use proptest::prelude::*;

fn unit() -> impl Strategy<Value = f64> {
    0.0_f64..=1.0
}

fn lab() -> impl Strategy<Value = [f64; 3]> {
    (0.0_f64..=100.0, -100.0_f64..=100.0, -100.0_f64..=100.0).prop_map(|(l, a, b)| [l, a, b])
}

fn ppr_params() -> impl Strategy<Value = CurveParams> {
    (0.05_f64..=0.30, 1.0_f64..=1.6, 0.8_f64..=1.4, 0.5_f64..=3.0, 0.95_f64..=0.99, 0.2_f64..=1.0)
        .prop_map(|(p, gs, gh, h, yk, alpha)| {
            CurveParams::new(p, gs, gh, h)
                .map(|c| c.with_soft_knee(SoftKnee::new(yk, alpha).ok()))
                .expect("ranges are valid")
        })
}

proptest! {
    #[test]
    fn ppr_monotonic_over_artistic_ranges(params in ppr_params()) {
        let y = ppr_curve(&linspace(0.0, 1.0, 2048), &params);
        let report = check_monotonic(&y, MONOTONIC_TOLERANCE);
        prop_assert!(report.monotonic, "{params:?}: {report:?}");
        prop_assert!(y.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn ppr_continuous_at_pivot(params in ppr_params()) {
        let p = params.pivot();
        let y = ppr_curve(&[p, p + 1e-12], &params);
        prop_assert!((y[0] - y[1]).abs() < 1e-9);
    }

    #[test]
    fn rlog_continuous_at_blend_edges(
        a in 1.0_f64..=8.0,
        b in 0.3_f64..=1.5,
        c in 0.3_f64..=1.5,
        t in 0.4_f64..=0.7,
    ) {
        let params = RlogParams::new(a, b, c, t).expect("ranges are valid");
        for edge in [t - 0.05, t + 0.05] {
            let y = rlog_curve(&[edge - 1e-9, edge + 1e-9], &params);
            prop_assert!((y[0] - y[1]).abs() < 1e-6);
        }
    }

    #[test]
    fn gamut_roundtrip(r in unit(), g in unit(), b in unit()) {
        let back = p3d65_to_bt2020(bt2020_to_p3d65([r, g, b]));
        for (x, y) in [r, g, b].iter().zip(back) {
            prop_assert!((x - y).abs() < 1e-9);
        }
    }

    #[test]
    fn oklab_roundtrip(r in unit(), g in unit(), b in unit()) {
        let back = oklab_to_linear_rgb(linear_rgb_to_oklab([r, g, b]));
        for (x, y) in [r, g, b].iter().zip(back) {
            prop_assert!((x - y).abs() < 1e-6);
        }
    }

    #[test]
    fn delta_e_symmetric_and_non_negative(x in lab(), y in lab()) {
        let forward = delta_e_00_pair(x, y);
        let backward = delta_e_00_pair(y, x);
        prop_assert!(forward >= 0.0);
        prop_assert!((forward - backward).abs() < 1e-9);
        prop_assert_eq!(delta_e_00_pair(x, x), 0.0);
    }
}
