//! Fragment-resolved effective oxidation states (EOS) and real-space density
//! descriptors from converged wavefunction data.
//!
//! The core of the library is the [`EosSolver`]: given a view of a
//! single-determinant wavefunction and the condensation operator of an
//! external density-partitioning scheme, it builds one effective-orbital
//! overlap matrix per fragment, decomposes each into fractional occupation
//! numbers, and resolves a competitive assignment of the system's electrons
//! across fragments by strict occupation-number ranking. Nuclear charges
//! minus assigned electrons give each fragment's formal oxidation state.
//!
//! Pointwise density-based descriptors (kinetic-energy densities, reduced
//! density gradient, ELF, ...) live in [`math::descriptors`].

pub mod error;
pub mod math;
pub mod solver;
pub mod types;

pub use error::FragosError;
pub use solver::{EosSolver, SolverOptions};
pub use types::{Fragment, FragmentCondenser, FragmentOxidation, Spin, WavefunctionView, WeightPower};
