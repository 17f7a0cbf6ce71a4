//! This module provides mathematical utilities and numerical constants for the fragos library.
//!
//! It contains the numerical thresholds shared across the crate and the pointwise density-based
//! descriptor functions. These components support the interpretive analysis layer by providing
//! the closed-form formulas evaluated on grid-sampled electron densities.

/// Numerical constants and thresholds used throughout the library.
///
/// This module defines the floor applied to electron densities before they
/// appear in denominators, keeping descriptor formulas finite in asymptotic
/// regions where the density vanishes.
pub mod constants;

/// Pointwise density-based descriptor functions.
///
/// This module holds the `DensityFields` data carrier and the free functions
/// computing local reactivity descriptors from it: kinetic-energy density
/// functionals, the reduced density gradient, the electron localization
/// function and related quantities. Each function checks that the fields it
/// needs are present instead of relying on a type hierarchy.
pub mod descriptors;
