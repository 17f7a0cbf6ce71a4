//! This module contains the effective oxidation state (EOS) engine.
//!
//! It includes the `EosSolver` implementation, the `SolverOptions` for configuring it, and the
//! global electron assignment resolver, providing the core fragment-resolved analysis of the
//! `fragos` library.

mod assignment;
mod implementation;
mod options;

pub use implementation::EosSolver;
pub use options::SolverOptions;
