use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to read pKa table: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse pKa table: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Intrinsic pKa values for the recognized ionizable groups. Typical
/// solvent-exposed values; a TOML file may override any subset of them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PkaTable {
    pub carboxylic_acid: f64,
    pub phenol: f64,
    pub thiol: f64,
    pub phosphate_oh: f64,
    pub aliphatic_amine: f64,
    pub aryl_amine: f64,
    pub imidazole: f64,
    pub pyridine: f64,
}

impl Default for PkaTable {
    fn default() -> Self {
        Self {
            carboxylic_acid: 4.2,
            phenol: 10.0,
            thiol: 8.3,
            phosphate_oh: 7.2,
            aliphatic_amine: 10.5,
            aryl_amine: 4.6,
            imidazole: 6.0,
            pyridine: 5.2,
        }
    }
}

impl PkaTable {
    pub fn from_toml_str(text: &str) -> Result<Self, TableError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, TableError> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let table = PkaTable::from_toml_str("").unwrap();
        assert_eq!(table, PkaTable::default());
    }

    #[test]
    fn partial_override_keeps_the_rest() {
        let table = PkaTable::from_toml_str("thiol = 9.1\npyridine = 5.5\n").unwrap();
        assert!((table.thiol - 9.1).abs() < 1e-12);
        assert!((table.pyridine - 5.5).abs() < 1e-12);
        assert!((table.carboxylic_acid - 4.2).abs() < 1e-12);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(PkaTable::from_toml_str("guanidine = 12.5\n").is_err());
    }
}
