use crate::types::Spin;
use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for all fallible operations in the `fragos` library.
///
/// Every failure here is a precondition violation detected before any
/// expensive grid work starts; the computation itself is deterministic and is
/// never retried. Numerical degeneracy (a rank-deficient overlap matrix) is
/// deliberately absent: it propagates as near-zero occupation numbers, not as
/// an error. The enum implements `std::error::Error`, allowing it to be
/// composed with other error types in application code.
#[derive(Error, Debug)]
pub enum FragosError {
    /// An unrecognized spin-channel tag was supplied, for example the combined
    /// `"ab"` selector that some front-ends emit. There is no silent default
    /// channel; callers must name `alpha` or `beta` explicitly.
    #[error("Unknown spin selector '{0}' (expected 'a'/'alpha' or 'b'/'beta')")]
    InvalidSpin(String),

    /// The fragment partition was empty. At least one fragment is required to
    /// account for the system's electrons.
    #[error("Input validation failed: at least one fragment is required")]
    NoFragments,

    /// A fragment referenced an atom index outside the molecular system.
    #[error(
        "Fragment {fragment} references atom index {atom}, but the system only has {n_atoms} atoms"
    )]
    AtomOutOfRange {
        /// Position of the offending fragment in the supplied partition.
        fragment: usize,
        /// The out-of-range atom index.
        atom: usize,
        /// Number of atoms reported by the wavefunction provider.
        n_atoms: usize,
    },

    /// The orbital provider returned a different number of occupied orbitals
    /// than the declared electron count for that spin channel.
    ///
    /// The single-determinant assumption requires one occupied orbital per
    /// electron; truncating or padding silently would corrupt the assignment.
    #[error(
        "Spin {spin} declares {expected} electrons but {actual} occupied orbitals were provided"
    )]
    OrbitalCountMismatch {
        /// The spin channel being evaluated.
        spin: Spin,
        /// Electron count declared by the provider.
        expected: usize,
        /// Number of orbital fields actually returned.
        actual: usize,
    },

    /// Orbital fields were sampled on differing numbers of grid points.
    #[error("Orbital {orbital} is sampled on {actual} grid points, expected {expected}")]
    GridSizeMismatch {
        /// Index of the inconsistent orbital field.
        orbital: usize,
        /// Grid size of the first orbital field.
        expected: usize,
        /// Grid size of the inconsistent field.
        actual: usize,
    },

    /// The condensation operator violated its contract by returning a number
    /// of fragment values different from the number of fragments supplied.
    #[error("Condensation returned {actual} values for {expected} fragments")]
    CondensationMismatch {
        /// Number of fragments in the partition.
        expected: usize,
        /// Number of values the condenser returned.
        actual: usize,
    },

    /// A non-finite occupation number reached the assignment resolver.
    ///
    /// NaN values have no defined rank, so they are rejected before the
    /// global sort rather than being ordered arbitrarily.
    #[error("Fragment {fragment} produced a non-finite occupation number")]
    NonFiniteOccupation {
        /// Position of the offending fragment in the supplied partition.
        fragment: usize,
    },

    /// The pooled occupation list holds fewer slots than the electrons that
    /// must be assigned, so the counts could not sum to the electron count.
    #[error("Cannot assign {needed} electrons across {available} occupation slots")]
    NotEnoughOccupationSlots {
        /// Electron count of the spin channel.
        needed: usize,
        /// Total occupation slots across all fragments.
        available: usize,
    },

    /// The batched overlap decomposition exceeded the configured wall-clock
    /// deadline. No partial occupation results are returned.
    #[error("Overlap decomposition exceeded the {limit_secs} s deadline")]
    DeadlineExceeded {
        /// The configured limit in seconds.
        limit_secs: f64,
    },

    /// A descriptor function required a field (gradient, Laplacian or
    /// kinetic-energy density) that the supplied `DensityFields` does not hold.
    #[error("Descriptor requires the '{field}' field, which was not provided")]
    MissingField {
        /// Name of the absent field.
        field: &'static str,
    },

    /// A descriptor field did not match the density's grid size.
    #[error("Field '{field}' has {actual} entries, expected {expected}")]
    ShapeMismatch {
        /// Name of the malformed field.
        field: &'static str,
        /// Grid size of the density array.
        expected: usize,
        /// Length of the malformed field.
        actual: usize,
    },

    /// An I/O error that occurred while reading a solver options file.
    #[error("I/O error at path '{path}': {source}")]
    Io {
        /// The path of the file that caused the I/O error.
        path: PathBuf,
        /// The underlying `std::io::Error`.
        #[source]
        source: std::io::Error,
    },

    /// An error parsing a solver options file, typically invalid TOML or a
    /// structural mismatch with the expected `SolverOptions` format.
    #[error("Failed to deserialize TOML options: {0}")]
    Deserialization(#[from] toml::de::Error),
}
