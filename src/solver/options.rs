//! This module defines configuration options for the effective oxidation state solver.
//!
//! It provides the `SolverOptions` struct, which bounds the cost of the batched overlap
//! decomposition step. Options can be set programmatically or loaded from a TOML file so
//! analysis pipelines can carry them alongside their other configuration.

use crate::error::FragosError;
use serde::Deserialize;
use std::path::Path;

/// Configuration parameters for the effective oxidation state solver.
///
/// The overlap decomposition is the step whose cost grows with fragment
/// count, so it is the one the solver allows to be bounded.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverOptions {
    /// Wall-clock deadline for the batched overlap decomposition, in seconds.
    ///
    /// When set, the solver checks the elapsed time before decomposing each
    /// fragment matrix and aborts with
    /// [`FragosError::DeadlineExceeded`] once the limit is passed. `None`
    /// disables the check.
    pub decomposition_deadline_secs: Option<f64>,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            decomposition_deadline_secs: None,
        }
    }
}

impl SolverOptions {
    /// Loads solver options from a TOML file.
    ///
    /// Missing keys fall back to their defaults; unknown keys are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`FragosError::Io`] if the file cannot be read, or
    /// [`FragosError::Deserialization`] if the TOML content is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, FragosError> {
        let content = std::fs::read_to_string(path).map_err(|io_error| FragosError::Io {
            path: path.to_path_buf(),
            source: io_error,
        })?;
        Self::load_from_str(&content)
    }

    /// Parses solver options from a TOML string.
    ///
    /// # Examples
    ///
    /// ```
    /// use fragos::SolverOptions;
    ///
    /// let options = SolverOptions::load_from_str("decomposition_deadline_secs = 30.0").unwrap();
    /// assert_eq!(options.decomposition_deadline_secs, Some(30.0));
    /// ```
    pub fn load_from_str(toml_str: &str) -> Result<Self, FragosError> {
        toml::from_str(toml_str).map_err(FragosError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_has_no_deadline() {
        assert_eq!(
            SolverOptions::default().decomposition_deadline_secs,
            None
        );
    }

    #[test]
    fn test_load_from_str_empty_is_default() {
        let options = SolverOptions::load_from_str("").unwrap();
        assert_eq!(options, SolverOptions::default());
    }

    #[test]
    fn test_load_from_str_rejects_unknown_keys() {
        let result = SolverOptions::load_from_str("tolerance = 1e-6");
        assert!(matches!(result, Err(FragosError::Deserialization(_))));
    }

    #[test]
    fn test_load_from_str_invalid_toml() {
        let result = SolverOptions::load_from_str("this is not valid toml");
        assert!(matches!(result, Err(FragosError::Deserialization(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "decomposition_deadline_secs = 2.5").unwrap();

        let options = SolverOptions::load_from_file(temp_file.path()).unwrap();
        assert_eq!(options.decomposition_deadline_secs, Some(2.5));
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = SolverOptions::load_from_file(Path::new("non_existent_options.toml"));
        assert!(matches!(result, Err(FragosError::Io { .. })));
    }
}
