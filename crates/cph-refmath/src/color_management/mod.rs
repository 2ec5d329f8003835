//! Color management: PQ transfer functions, gamut matrices and OKLab.

pub mod color_space;
pub mod oklab;
pub mod transfer;
