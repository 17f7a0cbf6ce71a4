//! This module defines the core types used in the fragos library for representing spin channels,
//! fragment partitions and calculation results.
//!
//! It includes the `WavefunctionView` and `FragmentCondenser` traits that abstract the
//! electronic-structure model and the density-partitioning scheme, the `Fragment` struct for
//! grouping atoms, and the `FragmentOxidation` struct for storing the outcome of an effective
//! oxidation state calculation. These types form the foundation for the decoupled design that
//! allows integration with different wavefunction backends and partitioning codes.

use crate::error::FragosError;
use std::fmt;
use std::str::FromStr;

/// A spin channel of a single-determinant wavefunction.
///
/// Every effective oxidation state query runs independently per spin channel.
/// There is no combined channel: front-ends carrying a joint `"ab"` tag must
/// split it before calling into the library, and `FromStr` rejects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Spin {
    /// The alpha (spin-up) channel.
    Alpha,
    /// The beta (spin-down) channel.
    Beta,
}

impl fmt::Display for Spin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Spin::Alpha => f.write_str("alpha"),
            Spin::Beta => f.write_str("beta"),
        }
    }
}

impl FromStr for Spin {
    type Err = FragosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" | "alpha" => Ok(Spin::Alpha),
            "b" | "beta" => Ok(Spin::Beta),
            _ => Err(FragosError::InvalidSpin(s.to_string())),
        }
    }
}

/// An ordered group of atoms treated as one unit for charge and occupation
/// accounting.
///
/// Fragments are identified by their position in the slice passed to the
/// solver; results are always reported in that same order. The partition is
/// an explicit parameter on every solver call, never cached between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Indices of the member atoms, as numbered by the wavefunction provider.
    pub atoms: Vec<usize>,
}

impl Fragment {
    /// Creates a fragment from a collection of atom indices.
    pub fn new<I: IntoIterator<Item = usize>>(atoms: I) -> Self {
        Self {
            atoms: atoms.into_iter().collect(),
        }
    }

    /// Builds the default partition of one single-atom fragment per atom.
    ///
    /// This mirrors the conventional "no partition given" behavior: every atom
    /// is its own fragment, in atom order.
    pub fn atomwise(n_atoms: usize) -> Vec<Self> {
        (0..n_atoms).map(|index| Fragment::new([index])).collect()
    }

    /// Number of member atoms.
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    /// Whether the fragment holds no atoms.
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }
}

/// The weighting exponent applied to partition weights during condensation.
///
/// Orbital-product fields are bilinear in the orbitals, hence quadratic in the
/// partition weight; plain density-like fields are linear in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightPower {
    /// Weight to the first power, for linear (density) fields.
    Linear,
    /// Weight squared, for bilinear (orbital-product) fields.
    Bilinear,
}

impl WeightPower {
    /// The numeric exponent.
    pub fn exponent(self) -> u32 {
        match self {
            WeightPower::Linear => 1,
            WeightPower::Bilinear => 2,
        }
    }
}

/// A view of a converged single-determinant wavefunction.
///
/// This trait decouples the oxidation state engine from any particular
/// electronic-structure backend. Implementations own the molecular grid; the
/// engine only ever sees orbital amplitudes sampled on it, so no geometry or
/// basis-set information crosses this boundary.
pub trait WavefunctionView {
    /// Number of atoms in the system, bounding valid fragment atom indices.
    fn num_atoms(&self) -> usize;

    /// Nuclear (or pseudopotential) charge of the given atom. Non-negative.
    fn nuclear_charge(&self, atom: usize) -> f64;

    /// Number of electrons in the given spin channel.
    fn electron_count(&self, spin: Spin) -> usize;

    /// Amplitudes of the occupied orbitals of the given spin channel, one
    /// field per orbital, each sampled on the provider's integration grid.
    ///
    /// The fields must all share the same grid and their count must equal
    /// `electron_count(spin)`; the solver verifies both before condensing.
    fn evaluate_orbitals(&self, spin: Spin) -> Vec<Vec<f64>>;
}

/// The fragment-condensation operator of an external density-partitioning
/// scheme.
///
/// Condensation is a weighted reduction of a grid-sampled field to one scalar
/// per fragment. The trait is `Sync` because the solver shards condensation
/// calls across worker threads; the underlying grid data is read-only.
pub trait FragmentCondenser: Sync {
    /// Reduces `field` to one value per entry of `fragments`, weighting each
    /// grid point by the fragment's partition weight raised to `power`.
    ///
    /// The returned vector must have exactly `fragments.len()` entries, in
    /// fragment order.
    fn condense_to_fragments(
        &self,
        field: &[f64],
        fragments: &[Fragment],
        power: WeightPower,
    ) -> Vec<f64>;
}

/// The effective oxidation state of one fragment.
///
/// Produced by [`EosSolver::compute_oxidation_state`](crate::EosSolver::compute_oxidation_state),
/// one record per fragment, in the same order as the input partition.
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentOxidation {
    /// Position of the fragment in the supplied partition.
    pub fragment: usize,
    /// Sum of the nuclear charges of the fragment's member atoms.
    pub nuclear_charge: f64,
    /// Electrons assigned to this fragment from the alpha channel.
    pub assigned_alpha: usize,
    /// Electrons assigned to this fragment from the beta channel.
    pub assigned_beta: usize,
    /// The effective oxidation state: nuclear charge minus assigned electrons.
    pub oxidation: f64,
}
