use super::constants::DENSITY_FLOOR;
use crate::error::FragosError;
use std::f64::consts::PI;

/// Grid-sampled density data for pointwise descriptor evaluation.
///
/// The density itself is always required; the gradient, Laplacian and
/// positive-definite kinetic-energy density are optional. Descriptor
/// functions check for the fields they need and fail with
/// [`FragosError::MissingField`] when one is absent, so adding a new
/// field combination never requires a new type.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityFields {
    density: Vec<f64>,
    gradient: Option<Vec<[f64; 3]>>,
    laplacian: Option<Vec<f64>>,
    kinetic_energy_density: Option<Vec<f64>>,
}

impl DensityFields {
    /// Creates a holder carrying only the electron density.
    pub fn new(density: Vec<f64>) -> Self {
        Self {
            density,
            gradient: None,
            laplacian: None,
            kinetic_energy_density: None,
        }
    }

    /// Attaches the density gradient, one 3-vector per grid point.
    pub fn with_gradient(mut self, gradient: Vec<[f64; 3]>) -> Result<Self, FragosError> {
        if gradient.len() != self.density.len() {
            return Err(FragosError::ShapeMismatch {
                field: "gradient",
                expected: self.density.len(),
                actual: gradient.len(),
            });
        }
        self.gradient = Some(gradient);
        Ok(self)
    }

    /// Attaches the density Laplacian.
    pub fn with_laplacian(mut self, laplacian: Vec<f64>) -> Result<Self, FragosError> {
        if laplacian.len() != self.density.len() {
            return Err(FragosError::ShapeMismatch {
                field: "laplacian",
                expected: self.density.len(),
                actual: laplacian.len(),
            });
        }
        self.laplacian = Some(laplacian);
        Ok(self)
    }

    /// Attaches the positive-definite (Lagrangian) kinetic-energy density.
    pub fn with_kinetic_energy_density(mut self, ked: Vec<f64>) -> Result<Self, FragosError> {
        if ked.len() != self.density.len() {
            return Err(FragosError::ShapeMismatch {
                field: "kinetic_energy_density",
                expected: self.density.len(),
                actual: ked.len(),
            });
        }
        self.kinetic_energy_density = Some(ked);
        Ok(self)
    }

    /// The electron density.
    pub fn density(&self) -> &[f64] {
        &self.density
    }

    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.density.len()
    }

    /// Whether the grid is empty.
    pub fn is_empty(&self) -> bool {
        self.density.is_empty()
    }

    fn gradient(&self) -> Result<&[[f64; 3]], FragosError> {
        self.gradient
            .as_deref()
            .ok_or(FragosError::MissingField { field: "gradient" })
    }

    fn laplacian(&self) -> Result<&[f64], FragosError> {
        self.laplacian
            .as_deref()
            .ok_or(FragosError::MissingField { field: "laplacian" })
    }

    fn kinetic_energy_density(&self) -> Result<&[f64], FragosError> {
        self.kinetic_energy_density
            .as_deref()
            .ok_or(FragosError::MissingField {
                field: "kinetic_energy_density",
            })
    }
}

#[inline]
fn floored(density: f64) -> f64 {
    density.max(DENSITY_FLOOR)
}

/// Shannon information density, rho * ln(rho).
pub fn shannon_information(fields: &DensityFields) -> Vec<f64> {
    fields
        .density()
        .iter()
        .map(|&d| d * floored(d).ln())
        .collect()
}

/// Thomas-Fermi kinetic-energy density, 0.3 * (3 pi^2)^(2/3) * rho^(5/3).
pub fn ked_thomas_fermi(fields: &DensityFields) -> Vec<f64> {
    let prefactor = 0.3 * (3.0 * PI * PI).powf(2.0 / 3.0);
    fields
        .density()
        .iter()
        .map(|&d| prefactor * d.powf(5.0 / 3.0))
        .collect()
}

/// Euclidean norm of the density gradient at each grid point.
pub fn gradient_norm(fields: &DensityFields) -> Result<Vec<f64>, FragosError> {
    let gradient = fields.gradient()?;
    Ok(gradient
        .iter()
        .map(|g| (g[0] * g[0] + g[1] * g[1] + g[2] * g[2]).sqrt())
        .collect())
}

/// Reduced density gradient, |grad rho| / (2 (3 pi^2)^(1/3) rho^(4/3)).
pub fn reduced_density_gradient(fields: &DensityFields) -> Result<Vec<f64>, FragosError> {
    let norms = gradient_norm(fields)?;
    let prefactor = 0.5 / (3.0 * PI * PI).powf(1.0 / 3.0);
    Ok(fields
        .density()
        .iter()
        .zip(norms)
        .map(|(&d, norm)| prefactor * norm / floored(d).powf(4.0 / 3.0))
        .collect())
}

/// Weizsäcker kinetic-energy density, |grad rho|^2 / (8 rho).
pub fn ked_weizsacker(fields: &DensityFields) -> Result<Vec<f64>, FragosError> {
    let norms = gradient_norm(fields)?;
    Ok(fields
        .density()
        .iter()
        .zip(norms)
        .map(|(&d, norm)| norm * norm / (8.0 * floored(d)))
        .collect())
}

/// General gradient expansion approximation of the kinetic-energy density,
/// tau_TF + a * tau_W + b * lap(rho).
pub fn ked_gradient_expansion_general(
    fields: &DensityFields,
    a: f64,
    b: f64,
) -> Result<Vec<f64>, FragosError> {
    let laplacian = fields.laplacian()?;
    let thomas_fermi = ked_thomas_fermi(fields);
    let weizsacker = ked_weizsacker(fields)?;
    Ok(thomas_fermi
        .iter()
        .zip(&weizsacker)
        .zip(laplacian)
        .map(|((&tf, &w), &lap)| tf + a * w + b * lap)
        .collect())
}

/// Standard gradient expansion approximation (a = 1/9, b = 1/6).
pub fn ked_gradient_expansion(fields: &DensityFields) -> Result<Vec<f64>, FragosError> {
    ked_gradient_expansion_general(fields, 1.0 / 9.0, 1.0 / 6.0)
}

/// Empirical gradient expansion approximation (a = 1/5, b = 1/6).
pub fn ked_gradient_expansion_empirical(fields: &DensityFields) -> Result<Vec<f64>, FragosError> {
    ked_gradient_expansion_general(fields, 1.0 / 5.0, 1.0 / 6.0)
}

/// Positive-definite (Lagrangian) kinetic-energy density, as supplied.
pub fn ked_positive_definite(fields: &DensityFields) -> Result<Vec<f64>, FragosError> {
    Ok(fields.kinetic_energy_density()?.to_vec())
}

/// One-parameter kinetic-energy density family, tau_PD + (a - 1)/4 * lap(rho).
pub fn ked_general(fields: &DensityFields, a: f64) -> Result<Vec<f64>, FragosError> {
    let ked = fields.kinetic_energy_density()?;
    let laplacian = fields.laplacian()?;
    Ok(ked
        .iter()
        .zip(laplacian)
        .map(|(&pd, &lap)| pd + lap * (a - 1.0) / 4.0)
        .collect())
}

/// Hamiltonian kinetic-energy density, tau_PD - lap(rho)/4.
pub fn ked_hamiltonian(fields: &DensityFields) -> Result<Vec<f64>, FragosError> {
    ked_general(fields, 0.0)
}

/// Electron localization function of Becke and Edgecombe,
/// 1 / (1 + ((tau_PD - tau_W) / tau_TF)^2).
pub fn elf(fields: &DensityFields) -> Result<Vec<f64>, FragosError> {
    let ked = fields.kinetic_energy_density()?;
    let weizsacker = ked_weizsacker(fields)?;
    let thomas_fermi = ked_thomas_fermi(fields);
    Ok(ked
        .iter()
        .zip(&weizsacker)
        .zip(&thomas_fermi)
        .map(|((&pd, &w), &tf)| {
            let ratio = (pd - w) / tf.max(DENSITY_FLOOR);
            1.0 / (1.0 + ratio * ratio)
        })
        .collect())
}
