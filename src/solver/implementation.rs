//! This module implements the core `EosSolver` for effective oxidation state calculations.
//!
//! The `EosSolver` builds one effective-orbital overlap matrix per fragment by condensing
//! orbital-pair product fields through an external partitioning scheme, decomposes each matrix
//! into fractional occupation numbers, and resolves the competitive assignment of electrons
//! across fragments. It integrates with the broader `fragos` architecture through the
//! `WavefunctionView` and `FragmentCondenser` traits, keeping the engine decoupled from any
//! particular electronic-structure backend or partitioning code.

use super::assignment;
use super::options::SolverOptions;
use crate::{
    error::FragosError,
    types::{Fragment, FragmentCondenser, FragmentOxidation, Spin, WavefunctionView, WeightPower},
};
use faer::{prelude::*, Mat};
use rayon::prelude::*;
use std::time::{Duration, Instant};

/// A thread-safe wrapper for raw access to one fragment's overlap matrix.
///
/// Pair condensation is sharded across worker threads, each writing the
/// symmetric (i, j)/(j, i) slots of every fragment matrix for its own orbital
/// pair. Writes are disjoint because each unordered pair is handled by
/// exactly one thread, so no locking is needed.
struct RawMatView {
    ptr: *mut f64,
    row_stride: isize,
    col_stride: isize,
}

unsafe impl Send for RawMatView {}
unsafe impl Sync for RawMatView {}

impl RawMatView {
    fn of(matrix: &mut Mat<f64>) -> Self {
        Self {
            ptr: matrix.as_ptr_mut(),
            row_stride: matrix.row_stride(),
            col_stride: matrix.col_stride(),
        }
    }

    /// Writes a value at the specified (row, col) index.
    ///
    /// # Safety
    ///
    /// The caller must ensure that:
    /// 1. The (row, col) indices are within bounds.
    /// 2. No other thread is writing to the same address simultaneously.
    unsafe fn write(&self, row: usize, col: usize, val: f64) {
        let offset = (row as isize) * self.row_stride + (col as isize) * self.col_stride;
        unsafe {
            *self.ptr.offset(offset) = val;
        }
    }
}

/// The effective oxidation state solver.
///
/// This struct ties a wavefunction view to the condensation operator of a
/// density-partitioning scheme and exposes the three stages of the EOS
/// method: fragment overlap matrices, fragment occupation numbers, and final
/// oxidation states. All methods take the fragment partition explicitly and
/// keep no state between calls, so repeated calls with identical inputs are
/// numerically identical.
pub struct EosSolver<'a, W, C> {
    /// The converged wavefunction being analyzed.
    wavefunction: &'a W,
    /// The fragment-condensation operator of the partitioning scheme.
    condenser: &'a C,
    /// Configuration options, such as the decomposition deadline.
    options: SolverOptions,
}

impl<'a, W, C> EosSolver<'a, W, C>
where
    W: WavefunctionView,
    C: FragmentCondenser,
{
    /// Creates a new `EosSolver` with default options.
    pub fn new(wavefunction: &'a W, condenser: &'a C) -> Self {
        Self {
            wavefunction,
            condenser,
            options: SolverOptions::default(),
        }
    }

    /// Configures the solver with custom options.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # fn demo<W: fragos::WavefunctionView, C: fragos::FragmentCondenser>(wfn: &W, part: &C) {
    /// use fragos::{EosSolver, SolverOptions};
    ///
    /// let options = SolverOptions {
    ///     decomposition_deadline_secs: Some(30.0),
    /// };
    /// let solver = EosSolver::new(wfn, part).with_options(options);
    /// # }
    /// ```
    pub fn with_options(mut self, options: SolverOptions) -> Self {
        self.options = options;
        self
    }

    /// Builds the effective-orbital overlap matrix of every fragment for one
    /// spin channel.
    ///
    /// For each unordered pair (i ≤ j) of occupied orbitals, the pointwise
    /// product field is condensed once to one scalar per fragment with
    /// bilinear weighting, and written symmetrically into each fragment's
    /// N×N matrix. Pairs are condensed in parallel; the grid data behind the
    /// condenser is only read.
    ///
    /// A system with zero electrons in the channel yields one 0×0 matrix per
    /// fragment.
    ///
    /// # Errors
    ///
    /// Fails before any condensation if the partition is empty or references
    /// an out-of-range atom, if the orbital count does not match the declared
    /// electron count, or if the orbital fields disagree on grid size.
    pub fn compute_fragment_overlap(
        &self,
        fragments: &[Fragment],
        spin: Spin,
    ) -> Result<Vec<Mat<f64>>, FragosError> {
        self.validate_fragments(fragments)?;

        let n_orbitals = self.wavefunction.electron_count(spin);
        let orbitals = self.wavefunction.evaluate_orbitals(spin);
        if orbitals.len() != n_orbitals {
            return Err(FragosError::OrbitalCountMismatch {
                spin,
                expected: n_orbitals,
                actual: orbitals.len(),
            });
        }

        let n_points = orbitals.first().map_or(0, Vec::len);
        for (index, orbital) in orbitals.iter().enumerate() {
            if orbital.len() != n_points {
                return Err(FragosError::GridSizeMismatch {
                    orbital: index,
                    expected: n_points,
                    actual: orbital.len(),
                });
            }
        }

        let mut matrices: Vec<Mat<f64>> = (0..fragments.len())
            .map(|_| Mat::zeros(n_orbitals, n_orbitals))
            .collect();
        let views: Vec<RawMatView> = matrices.iter_mut().map(RawMatView::of).collect();

        let pairs: Vec<(usize, usize)> = (0..n_orbitals)
            .flat_map(|i| (i..n_orbitals).map(move |j| (i, j)))
            .collect();

        let condenser = self.condenser;
        pairs
            .par_iter()
            .try_for_each(|&(i, j)| -> Result<(), FragosError> {
                let product: Vec<f64> = orbitals[i]
                    .iter()
                    .zip(orbitals[j].iter())
                    .map(|(a, b)| a * b)
                    .collect();

                let condensed =
                    condenser.condense_to_fragments(&product, fragments, WeightPower::Bilinear);
                if condensed.len() != fragments.len() {
                    return Err(FragosError::CondensationMismatch {
                        expected: fragments.len(),
                        actual: condensed.len(),
                    });
                }

                // SAFETY: Each unordered pair (i, j) is handled by exactly one
                // thread. That thread writes (i, j) and (j, i) of every
                // fragment matrix, so no two threads touch the same entries.
                for (view, &value) in views.iter().zip(condensed.iter()) {
                    unsafe {
                        view.write(i, j, value);
                        view.write(j, i, value);
                    }
                }
                Ok(())
            })?;

        Ok(matrices)
    }

    /// Computes the fractional occupation numbers of every fragment for one
    /// spin channel.
    ///
    /// Each fragment overlap matrix is decomposed by singular value
    /// decomposition, keeping only the singular values. Singular values are
    /// used instead of eigenvalues because the condensed matrices can carry
    /// small numerical asymmetry, and singular values stay sign-robust under
    /// near-degeneracy. The result is one non-negative, descending array of
    /// length N per fragment; a rank-deficient matrix simply yields
    /// near-zero trailing values.
    ///
    /// # Errors
    ///
    /// Propagates the overlap builder's validation failures, and fails with
    /// [`FragosError::DeadlineExceeded`] if the configured decomposition
    /// deadline runs out.
    pub fn compute_fragment_occupation(
        &self,
        fragments: &[Fragment],
        spin: Spin,
    ) -> Result<Vec<Vec<f64>>, FragosError> {
        let overlaps = self.compute_fragment_overlap(fragments, spin)?;
        self.decompose(&overlaps)
    }

    /// Computes the effective oxidation state of every fragment.
    ///
    /// Runs the occupation analysis independently for the alpha and beta
    /// channels, assigns each channel's electrons to fragments by strict
    /// descending occupation-number ranking, and subtracts the assigned
    /// totals from each fragment's summed nuclear charge. Results follow the
    /// input fragment order.
    ///
    /// # Examples
    ///
    /// ```
    /// use fragos::{EosSolver, Fragment, FragmentCondenser, Spin, WavefunctionView, WeightPower};
    ///
    /// // A hydrogen atom: one alpha electron in one orbital on a one-point grid.
    /// struct HydrogenAtom;
    /// impl WavefunctionView for HydrogenAtom {
    ///     fn num_atoms(&self) -> usize { 1 }
    ///     fn nuclear_charge(&self, _atom: usize) -> f64 { 1.0 }
    ///     fn electron_count(&self, spin: Spin) -> usize {
    ///         match spin { Spin::Alpha => 1, Spin::Beta => 0 }
    ///     }
    ///     fn evaluate_orbitals(&self, spin: Spin) -> Vec<Vec<f64>> {
    ///         match spin { Spin::Alpha => vec![vec![1.0]], Spin::Beta => Vec::new() }
    ///     }
    /// }
    ///
    /// // A trivial partition: every fragment sees the whole grid.
    /// struct WholeSpace;
    /// impl FragmentCondenser for WholeSpace {
    ///     fn condense_to_fragments(
    ///         &self,
    ///         field: &[f64],
    ///         fragments: &[Fragment],
    ///         _power: WeightPower,
    ///     ) -> Vec<f64> {
    ///         vec![field.iter().sum(); fragments.len()]
    ///     }
    /// }
    ///
    /// let wavefunction = HydrogenAtom;
    /// let condenser = WholeSpace;
    /// let solver = EosSolver::new(&wavefunction, &condenser);
    ///
    /// let states = solver.compute_oxidation_state(&Fragment::atomwise(1)).unwrap();
    /// assert_eq!(states[0].oxidation, 0.0);
    /// ```
    pub fn compute_oxidation_state(
        &self,
        fragments: &[Fragment],
    ) -> Result<Vec<FragmentOxidation>, FragosError> {
        // TODO: skip the beta recomputation when the provider can report
        // spin-restriction; both channels are identical in that case.
        let occupations_alpha = self.compute_fragment_occupation(fragments, Spin::Alpha)?;
        let occupations_beta = self.compute_fragment_occupation(fragments, Spin::Beta)?;

        let counts_alpha = assignment::assign_by_ranking(
            &occupations_alpha,
            self.wavefunction.electron_count(Spin::Alpha),
        )?;
        let counts_beta = assignment::assign_by_ranking(
            &occupations_beta,
            self.wavefunction.electron_count(Spin::Beta),
        )?;

        Ok(fragments
            .iter()
            .enumerate()
            .map(|(index, fragment)| {
                let nuclear_charge: f64 = fragment
                    .atoms
                    .iter()
                    .map(|&atom| self.wavefunction.nuclear_charge(atom))
                    .sum();
                let assigned_alpha = counts_alpha[index];
                let assigned_beta = counts_beta[index];
                FragmentOxidation {
                    fragment: index,
                    nuclear_charge,
                    assigned_alpha,
                    assigned_beta,
                    oxidation: nuclear_charge - (assigned_alpha + assigned_beta) as f64,
                }
            })
            .collect())
    }

    /// Checks the fragment partition against the wavefunction's atom count.
    fn validate_fragments(&self, fragments: &[Fragment]) -> Result<(), FragosError> {
        if fragments.is_empty() {
            return Err(FragosError::NoFragments);
        }
        let n_atoms = self.wavefunction.num_atoms();
        for (index, fragment) in fragments.iter().enumerate() {
            for &atom in &fragment.atoms {
                if atom >= n_atoms {
                    return Err(FragosError::AtomOutOfRange {
                        fragment: index,
                        atom,
                        n_atoms,
                    });
                }
            }
        }
        Ok(())
    }

    /// Decomposes a batch of fragment overlap matrices into singular values.
    fn decompose(&self, overlaps: &[Mat<f64>]) -> Result<Vec<Vec<f64>>, FragosError> {
        let deadline = self
            .options
            .decomposition_deadline_secs
            .map(Duration::from_secs_f64);
        let start = Instant::now();

        let mut occupations = Vec::with_capacity(overlaps.len());
        for matrix in overlaps {
            if let Some(limit) = deadline {
                if start.elapsed() >= limit {
                    return Err(FragosError::DeadlineExceeded {
                        limit_secs: limit.as_secs_f64(),
                    });
                }
            }
            if matrix.nrows() == 0 {
                occupations.push(Vec::new());
            } else {
                occupations.push(matrix.singular_values());
            }
        }
        Ok(occupations)
    }
}
