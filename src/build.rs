//! The SMILES → 3D build pipeline.
//!
//! [`build_3d`] is the one operation batch and single processing share:
//! optional protonation, parsing, hydrogen addition, conformer embedding,
//! optimization, export, and property calculation. Failures inside the
//! pipeline never escape; they are printed and collapse the outcome to
//! all-`None`, so a batch caller can skip the entry and move on.

use std::fs;
use std::path::{Path, PathBuf};

use crate::embed::{self, add_hydrogens, DEFAULT_SEED};
use crate::io::{self, Format};
use crate::props::{compute_properties, PropertyMap};
use crate::protonate::{protonate_smiles, PkaTable, ProtonationWindow};
use crate::smiles;
use crate::model::Molecule;

#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub num_confs: usize,
    pub optimize: bool,
    pub protonation: Option<ProtonationWindow>,
    pub pka_table: PkaTable,
    pub seed: u64,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            num_confs: 10,
            optimize: true,
            protonation: None,
            pka_table: PkaTable::default(),
            seed: DEFAULT_SEED,
        }
    }
}

/// Mirror of the pipeline's result triple: all three present on success,
/// all three absent after any failure.
#[derive(Debug, Default)]
pub struct BuildOutcome {
    pub molecule: Option<Molecule>,
    pub properties: Option<PropertyMap>,
    pub variants: Option<Vec<String>>,
}

impl BuildOutcome {
    fn failed() -> Self {
        Self::default()
    }

    pub fn succeeded(&self) -> bool {
        self.molecule.is_some() && self.properties.is_some()
    }
}

/// Paths the exporter will write for a given output base.
pub fn output_paths(output_base: &Path) -> Vec<PathBuf> {
    Format::ALL
        .iter()
        .map(|format| export_path(output_base, *format))
        .collect()
}

fn export_path(output_base: &Path, format: Format) -> PathBuf {
    PathBuf::from(format!(
        "{}.{}",
        output_base.display(),
        format.extension()
    ))
}

/// Converts one SMILES to 3D, exports all formats at `<output_base>.<ext>`,
/// and computes the property map.
pub fn build_3d(input: &str, output_base: &Path, config: &BuildConfig) -> BuildOutcome {
    let mut variants = None;
    let mut working = input.to_string();

    if let Some(window) = &config.protonation {
        let states = protonate_smiles(input, &config.pka_table, window);
        println!(
            "Generated {} protonation states for pH {}-{}",
            states.len(),
            window.ph_min,
            window.ph_max
        );
        for (i, state) in states.iter().enumerate() {
            println!("  Variant {}: {}", i + 1, state);
        }
        if states.len() > 1 {
            println!("Using first protonation variant: {}", states[0]);
        }
        working = states[0].clone();
        variants = Some(states);
    }

    let mut mol = match smiles::parse(&working) {
        Ok(mol) => mol,
        Err(_) => {
            println!("Invalid SMILES: {working}");
            return BuildOutcome::failed();
        }
    };

    add_hydrogens(&mut mol);

    if let Err(e) = embed::embed_conformers(&mut mol, config.num_confs, config.seed) {
        println!("Conformer generation failed for {working}: {e}");
        return BuildOutcome::failed();
    }

    if config.optimize {
        for conf in 0..mol.conformers.len() {
            let mut coords = std::mem::take(&mut mol.conformers[conf]);
            embed::minimize_conformer(&mol, &mut coords);
            mol.conformers[conf] = coords;
        }
    }

    if let Some(parent) = output_base.parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(e) = fs::create_dir_all(parent) {
                println!(
                    "Failed to create output directory {}: {e}",
                    parent.display()
                );
                return BuildOutcome::failed();
            }
        }
    }

    for format in Format::ALL {
        let path = export_path(output_base, format);
        if let Err(e) = io::export(&mol, &path, format) {
            println!("Failed to write {}: {e}", path.display());
        }
    }

    let properties = compute_properties(&mol);
    BuildOutcome {
        molecule: Some(mol),
        properties: Some(properties),
        variants,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_base(tag: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let base = dir.path().join(tag);
        (dir, base)
    }

    #[test]
    fn ethanol_builds_and_exports_four_files() {
        let (dir, base) = temp_base("ethanol");
        let config = BuildConfig {
            num_confs: 5,
            ..BuildConfig::default()
        };

        let outcome = build_3d("CCO", &base, &config);
        assert!(outcome.succeeded());
        assert!(outcome.variants.is_none());

        let mol = outcome.molecule.as_ref().unwrap();
        assert_eq!(mol.conformers.len(), 5);

        let props = outcome.properties.as_ref().unwrap();
        let mw = props.get("Molecular Weight").unwrap();
        assert!((mw - 46.07).abs() < 0.01);

        for path in output_paths(&base) {
            assert!(path.is_file(), "missing export {}", path.display());
            assert!(path.metadata().unwrap().len() > 0);
        }
        drop(dir);
    }

    #[test]
    fn invalid_smiles_yields_all_none() {
        let (dir, base) = temp_base("bad");
        let outcome = build_3d("XYZ123invalid", &base, &BuildConfig::default());
        assert!(outcome.molecule.is_none());
        assert!(outcome.properties.is_none());
        assert!(outcome.variants.is_none());
        assert!(output_paths(&base).iter().all(|p| !p.exists()));
        drop(dir);
    }

    #[test]
    fn protonation_swaps_the_working_smiles() {
        let (dir, base) = temp_base("acid");
        let config = BuildConfig {
            num_confs: 1,
            protonation: Some(ProtonationWindow::default()),
            ..BuildConfig::default()
        };

        let outcome = build_3d("CC(=O)O", &base, &config);
        assert!(outcome.succeeded());
        let variants = outcome.variants.as_ref().unwrap();
        assert_eq!(variants[0], "CC(=O)[O-]");

        // The built molecule carries the deprotonated oxygen.
        let mol = outcome.molecule.as_ref().unwrap();
        assert_eq!(mol.net_charge(), -1);
        drop(dir);
    }

    #[test]
    fn disabled_protonation_leaves_input_untouched() {
        let (dir, base) = temp_base("plain");
        let config = BuildConfig {
            num_confs: 1,
            ..BuildConfig::default()
        };
        let outcome = build_3d("CC(=O)O", &base, &config);
        assert!(outcome.succeeded());
        assert!(outcome.variants.is_none());
        assert_eq!(outcome.molecule.as_ref().unwrap().net_charge(), 0);
        drop(dir);
    }

    #[test]
    fn repeated_builds_are_deterministic() {
        let (dir_a, base_a) = temp_base("a");
        let (dir_b, base_b) = temp_base("b");
        let config = BuildConfig {
            num_confs: 2,
            ..BuildConfig::default()
        };

        let first = build_3d("CCO", &base_a, &config);
        let second = build_3d("CCO", &base_b, &config);
        assert_eq!(
            first.molecule.unwrap().conformers,
            second.molecule.unwrap().conformers
        );
        drop((dir_a, dir_b));
    }
}
