use fragos::{Fragment, FragmentCondenser, Spin, WavefunctionView, WeightPower};

/// A table-driven wavefunction mock: orbital amplitudes are stored directly,
/// one row per occupied orbital, sampled on a synthetic grid.
pub struct ModelSystem {
    pub nuclear_charges: Vec<f64>,
    pub alpha_electrons: usize,
    pub beta_electrons: usize,
    pub alpha_orbitals: Vec<Vec<f64>>,
    pub beta_orbitals: Vec<Vec<f64>>,
}

impl WavefunctionView for ModelSystem {
    fn num_atoms(&self) -> usize {
        self.nuclear_charges.len()
    }

    fn nuclear_charge(&self, atom: usize) -> f64 {
        self.nuclear_charges[atom]
    }

    fn electron_count(&self, spin: Spin) -> usize {
        match spin {
            Spin::Alpha => self.alpha_electrons,
            Spin::Beta => self.beta_electrons,
        }
    }

    fn evaluate_orbitals(&self, spin: Spin) -> Vec<Vec<f64>> {
        match spin {
            Spin::Alpha => self.alpha_orbitals.clone(),
            Spin::Beta => self.beta_orbitals.clone(),
        }
    }
}

/// A table-driven condensation operator: per-atom partition weights are given
/// explicitly per grid point, a fragment's weight is the sum over its member
/// atoms, and condensation is the weighted sum of the field.
pub struct WeightTable {
    /// `atom_weights[atom][point]`, a partition of unity at every point.
    pub atom_weights: Vec<Vec<f64>>,
}

impl FragmentCondenser for WeightTable {
    fn condense_to_fragments(
        &self,
        field: &[f64],
        fragments: &[Fragment],
        power: WeightPower,
    ) -> Vec<f64> {
        fragments
            .iter()
            .map(|fragment| {
                field
                    .iter()
                    .enumerate()
                    .map(|(point, &value)| {
                        let weight: f64 = fragment
                            .atoms
                            .iter()
                            .map(|&atom| self.atom_weights[atom][point])
                            .sum();
                        weight.powi(power.exponent() as i32) * value
                    })
                    .sum()
            })
            .collect()
    }
}

/// Reference alpha occupation numbers of the oxygen fragment in the water
/// model, matching the APOST-3D values for H2O with atomwise fragments.
pub const WATER_OXYGEN_OCCUPATIONS: [f64; 5] = [0.995, 0.893, 0.788, 0.559, 0.538];

/// A synthetic closed-shell water model (O, H, H) with five electrons per
/// spin channel.
///
/// Each occupied orbital is an indicator field on its own grid point, so the
/// fragment overlap matrices are diagonal and the oxygen occupations can be
/// dialed in exactly: the oxygen partition weight at point p is chosen so
/// that its squared value equals the reference occupation, and the remainder
/// is split evenly between the hydrogens.
pub fn water_model() -> (ModelSystem, WeightTable) {
    let n = WATER_OXYGEN_OCCUPATIONS.len();

    let mut orbitals = vec![vec![0.0; n]; n];
    for (i, orbital) in orbitals.iter_mut().enumerate() {
        orbital[i] = 1.0;
    }

    let system = ModelSystem {
        nuclear_charges: vec![8.0, 1.0, 1.0],
        alpha_electrons: n,
        beta_electrons: n,
        alpha_orbitals: orbitals.clone(),
        beta_orbitals: orbitals,
    };

    let oxygen: Vec<f64> = WATER_OXYGEN_OCCUPATIONS.iter().map(|q| q.sqrt()).collect();
    let hydrogen: Vec<f64> = oxygen.iter().map(|w| (1.0 - w) / 2.0).collect();
    let condenser = WeightTable {
        atom_weights: vec![oxygen, hydrogen.clone(), hydrogen],
    };

    (system, condenser)
}
