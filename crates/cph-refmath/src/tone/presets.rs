//! Built-in grading presets.
//!
//! The three presets define the golden reference tables: each carries one
//! PPR and one RLOG parameter set. Toe is zero throughout and only the PPR
//! side carries a soft knee.

use serde::Serialize;

use super::params::{CurveKind, CurveParams, RlogParams, SoftKnee, ToneCurve};

/// A named pair of tone curve parameter sets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Preset {
    /// Snake-case identifier used in test names (`cinema_flat`).
    pub id: &'static str,
    /// Display name (`Cinema-Flat`).
    pub name: &'static str,
    /// PPR parameters.
    pub ppr: CurveParams,
    /// RLOG parameters.
    pub rlog: RlogParams,
}

/// Low-contrast look with a gentle shoulder.
pub const CINEMA_FLAT: Preset = Preset {
    id: "cinema_flat",
    name: "Cinema-Flat",
    ppr: CurveParams::preset(0.18, 1.10, 1.05, 1.0, SoftKnee::preset(0.97, 0.5)),
    rlog: RlogParams::preset(3.0, 0.9, 1.0, 0.5),
};

/// Deeper shadows and a stronger shoulder.
pub const CINEMA_PUNCH: Preset = Preset {
    id: "cinema_punch",
    name: "Cinema-Punch",
    ppr: CurveParams::preset(0.18, 1.40, 1.10, 1.8, SoftKnee::preset(0.96, 0.7)),
    rlog: RlogParams::preset(3.0, 0.5, 0.8, 0.55),
};

/// Raised pivot that keeps highlight separation.
pub const CINEMA_HIGHLIGHT: Preset = Preset {
    id: "cinema_highlight",
    name: "Cinema-Highlight",
    ppr: CurveParams::preset(0.20, 1.20, 0.95, 1.2, SoftKnee::preset(0.98, 0.3)),
    rlog: RlogParams::preset(5.0, 0.85, 0.8, 0.45),
};

/// Every built-in preset, in reporting order.
pub const PRESETS: [Preset; 3] = [CINEMA_FLAT, CINEMA_PUNCH, CINEMA_HIGHLIGHT];

impl Preset {
    /// All built-in presets.
    pub fn all() -> &'static [Preset] {
        &PRESETS
    }

    /// Look a preset up by `id` or display name.
    pub fn find(key: &str) -> Option<&'static Preset> {
        PRESETS.iter().find(|p| p.id == key || p.name == key)
    }

    /// The tone curve of the given kind.
    pub fn curve(&self, kind: CurveKind) -> ToneCurve {
        match kind {
            CurveKind::Ppr => ToneCurve::Ppr(self.ppr),
            CurveKind::Rlog => ToneCurve::Rlog(self.rlog),
        }
    }

    /// Both curves, PPR first.
    pub fn curves(&self) -> impl Iterator<Item = ToneCurve> + '_ {
        CurveKind::ALL.into_iter().map(|kind| self.curve(kind))
    }

    /// Regression test name for one of this preset's curves, e.g.
    /// `cinema_punch_RLOG`.
    pub fn test_name(&self, kind: CurveKind) -> String {
        format!("{}_{}", self.id, kind.label())
    }
}
