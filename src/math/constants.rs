//! This module defines numerical constants used throughout the fragos library.
//!
//! These thresholds keep the descriptor formulas numerically stable in regions where the
//! electron density decays to zero, matching the masking conventions of the reference
//! density-analysis literature.

/// Floor applied to electron densities appearing in denominators.
///
/// Descriptor formulas such as the reduced density gradient and the
/// Weizsäcker kinetic-energy density divide by powers of the density, which
/// decays exponentially far from the nuclei. Densities below this floor are
/// clamped to it before division, preventing infinities and NaN values on
/// asymptotic grid points without measurably perturbing chemically relevant
/// regions.
pub const DENSITY_FLOOR: f64 = 1.0e-30;
