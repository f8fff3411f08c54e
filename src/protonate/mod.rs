//! Protonation-state enumeration over a pH window.
//!
//! Each detected ionizable site is resolved against the window: far enough
//! from its pKa the state is fixed, inside the widened window both states
//! are enumerated. The cartesian product over sites is emitted favored-state
//! first, so the first variant is the most likely microstate, and capped at
//! `max_variants`.

mod sites;
mod table;

pub use sites::{detect_sites, Site, SiteKind};
pub use table::{PkaTable, TableError};

use thiserror::Error;

use crate::model::Molecule;
use crate::smiles;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid pH window: ph_min {ph_min} exceeds ph_max {ph_max}")]
    InvalidWindow { ph_min: f64, ph_max: f64 },

    #[error("precision must be positive (got {0})")]
    InvalidPrecision(f64),

    #[error("max_variants must be at least 1 (got {0})")]
    InvalidMaxVariants(usize),

    #[error(transparent)]
    Smiles(#[from] smiles::Error),
}

#[derive(Debug, Clone)]
pub struct ProtonationWindow {
    pub ph_min: f64,
    pub ph_max: f64,
    pub precision: f64,
    pub max_variants: usize,
}

impl Default for ProtonationWindow {
    fn default() -> Self {
        Self {
            ph_min: 6.4,
            ph_max: 8.4,
            precision: 1.0,
            max_variants: 128,
        }
    }
}

impl ProtonationWindow {
    pub fn midpoint(&self) -> f64 {
        (self.ph_min + self.ph_max) / 2.0
    }

    fn validate(&self) -> Result<(), Error> {
        if self.ph_min > self.ph_max {
            return Err(Error::InvalidWindow {
                ph_min: self.ph_min,
                ph_max: self.ph_max,
            });
        }
        if !(self.precision > 0.0) {
            return Err(Error::InvalidPrecision(self.precision));
        }
        if self.max_variants < 1 {
            return Err(Error::InvalidMaxVariants(self.max_variants));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SiteState {
    Protonated,
    Deprotonated,
}

/// Fail-open entry point: on any enumeration error the diagnostic is printed
/// and the original SMILES comes back as the sole variant, so downstream 3D
/// generation always has a candidate. Single attempt, no retry.
pub fn protonate_smiles(
    smiles_in: &str,
    table: &PkaTable,
    window: &ProtonationWindow,
) -> Vec<String> {
    match enumerate(smiles_in, table, window) {
        Ok(variants) => variants,
        Err(e) => {
            println!("Error protonating {smiles_in}: {e}");
            vec![smiles_in.to_string()]
        }
    }
}

/// Enumerates protonation variants as SMILES strings. The result is never
/// empty; a molecule without ionizable sites yields the input unchanged.
pub fn enumerate(
    smiles_in: &str,
    table: &PkaTable,
    window: &ProtonationWindow,
) -> Result<Vec<String>, Error> {
    window.validate()?;
    let mol = smiles::parse(smiles_in)?;
    let found = detect_sites(&mol);
    if found.is_empty() {
        return Ok(vec![smiles_in.to_string()]);
    }

    let site_states: Vec<(Site, Vec<SiteState>)> = found
        .into_iter()
        .map(|site| {
            let states = allowed_states(site.kind, table, window);
            (site, states)
        })
        .collect();

    let mut variants = Vec::new();
    let mut counters = vec![0usize; site_states.len()];
    loop {
        let mut variant = mol.clone();
        for (k, (site, states)) in site_states.iter().enumerate() {
            apply_state(&mut variant, site.atom, site.kind, states[counters[k]]);
        }
        let rendered = smiles::write(&variant);
        if !variants.contains(&rendered) {
            variants.push(rendered);
        }
        if variants.len() >= window.max_variants || !advance(&mut counters, &site_states) {
            break;
        }
    }
    Ok(variants)
}

/// Odometer increment over the per-site state lists; returns false once every
/// combination has been visited.
fn advance(counters: &mut [usize], site_states: &[(Site, Vec<SiteState>)]) -> bool {
    for (k, counter) in counters.iter_mut().enumerate() {
        *counter += 1;
        if *counter < site_states[k].1.len() {
            return true;
        }
        *counter = 0;
    }
    false
}

/// States a site can take inside the window, favored state first.
fn allowed_states(
    kind: SiteKind,
    table: &PkaTable,
    window: &ProtonationWindow,
) -> Vec<SiteState> {
    let pka = kind.pka(table);
    let spread = window.precision;

    if kind.is_acid() {
        if window.ph_min > pka + spread {
            return vec![SiteState::Deprotonated];
        }
        if window.ph_max < pka - spread {
            return vec![SiteState::Protonated];
        }
        if window.midpoint() >= pka {
            vec![SiteState::Deprotonated, SiteState::Protonated]
        } else {
            vec![SiteState::Protonated, SiteState::Deprotonated]
        }
    } else {
        // Bases hold the proton below their pKa.
        if window.ph_max < pka - spread {
            return vec![SiteState::Protonated];
        }
        if window.ph_min > pka + spread {
            return vec![SiteState::Deprotonated];
        }
        if window.midpoint() <= pka {
            vec![SiteState::Protonated, SiteState::Deprotonated]
        } else {
            vec![SiteState::Deprotonated, SiteState::Protonated]
        }
    }
}

fn apply_state(mol: &mut Molecule, atom: usize, kind: SiteKind, state: SiteState) {
    let atom = &mut mol.atoms[atom];
    // Hydrogen counts follow the new charge via the valence rule.
    atom.explicit_h = None;
    atom.formal_charge = match (kind.is_acid(), state) {
        (true, SiteState::Protonated) => 0,
        (true, SiteState::Deprotonated) => -1,
        (false, SiteState::Protonated) => 1,
        (false, SiteState::Deprotonated) => 0,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(ph_min: f64, ph_max: f64) -> ProtonationWindow {
        ProtonationWindow {
            ph_min,
            ph_max,
            ..ProtonationWindow::default()
        }
    }

    #[test]
    fn acetic_acid_is_deprotonated_at_physiological_ph() {
        let table = PkaTable::default();
        let variants = enumerate("CC(=O)O", &table, &window(6.4, 8.4)).unwrap();
        assert_eq!(variants, vec!["CC(=O)[O-]".to_string()]);
    }

    #[test]
    fn amine_is_protonated_at_physiological_ph() {
        let table = PkaTable::default();
        let variants = enumerate("CN", &table, &window(6.4, 8.4)).unwrap();
        assert_eq!(variants, vec!["C[NH3+]".to_string()]);
    }

    #[test]
    fn no_ionizable_groups_returns_input_unchanged() {
        let table = PkaTable::default();
        let variants = enumerate("CCO", &table, &window(6.4, 8.4)).unwrap();
        assert_eq!(variants, vec!["CCO".to_string()]);
    }

    #[test]
    fn thiol_straddles_the_window_favored_first() {
        // Thiol pKa 8.3 sits inside 6.4-8.4 widened by 1.0; midpoint 7.4 is
        // below the pKa, so the protonated form leads.
        let table = PkaTable::default();
        let variants = enumerate("CS", &table, &window(6.4, 8.4)).unwrap();
        assert_eq!(variants, vec!["CS".to_string(), "C[S-]".to_string()]);
    }

    #[test]
    fn glycine_becomes_the_zwitterion() {
        let table = PkaTable::default();
        let variants = enumerate("NCC(=O)O", &table, &window(6.4, 8.4)).unwrap();
        assert_eq!(variants, vec!["[NH3+]CC(=O)[O-]".to_string()]);
    }

    #[test]
    fn max_variants_caps_the_product() {
        let table = PkaTable::default();
        let mut w = window(6.4, 8.4);
        w.max_variants = 1;
        let variants = enumerate("CS", &table, &w).unwrap();
        assert_eq!(variants.len(), 1);
        assert_eq!(variants[0], "CS");
    }

    #[test]
    fn already_protonated_input_is_renormalized() {
        let table = PkaTable::default();
        let variants = enumerate("C[NH3+]", &table, &window(6.4, 8.4)).unwrap();
        assert_eq!(variants, vec!["C[NH3+]".to_string()]);
    }

    #[test]
    fn fail_open_on_unparsable_input() {
        let table = PkaTable::default();
        let variants = protonate_smiles("XYZ123invalid", &table, &ProtonationWindow::default());
        assert_eq!(variants, vec!["XYZ123invalid".to_string()]);
    }

    #[test]
    fn fail_open_on_inverted_window() {
        let table = PkaTable::default();
        let bad = window(9.0, 7.0);
        assert!(matches!(
            enumerate("CC(=O)O", &table, &bad),
            Err(Error::InvalidWindow { .. })
        ));
        let variants = protonate_smiles("CC(=O)O", &table, &bad);
        assert_eq!(variants, vec!["CC(=O)O".to_string()]);
    }

    #[test]
    fn imidazole_enumerates_both_states_near_its_pka() {
        let table = PkaTable::default();
        let variants = enumerate("c1cnc[nH]1", &table, &window(5.0, 7.0)).unwrap();
        assert_eq!(variants.len(), 2);
    }
}
