//! Ionizable-site detection on the molecular graph.
//!
//! Recognition is structural and ignores the input protonation state: an
//! already-deprotonated carboxylate or an ammonium nitrogen is still its
//! site, so enumeration can reassign the state either way.

use super::table::PkaTable;
use crate::model::{BondOrder, Element, Molecule};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteKind {
    CarboxylicAcid,
    Phenol,
    Thiol,
    PhosphateOh,
    AliphaticAmine,
    ArylAmine,
    Imidazole,
    Pyridine,
}

impl SiteKind {
    pub fn is_acid(&self) -> bool {
        matches!(
            self,
            SiteKind::CarboxylicAcid | SiteKind::Phenol | SiteKind::Thiol | SiteKind::PhosphateOh
        )
    }

    pub fn pka(&self, table: &PkaTable) -> f64 {
        match self {
            SiteKind::CarboxylicAcid => table.carboxylic_acid,
            SiteKind::Phenol => table.phenol,
            SiteKind::Thiol => table.thiol,
            SiteKind::PhosphateOh => table.phosphate_oh,
            SiteKind::AliphaticAmine => table.aliphatic_amine,
            SiteKind::ArylAmine => table.aryl_amine,
            SiteKind::Imidazole => table.imidazole,
            SiteKind::Pyridine => table.pyridine,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Site {
    pub atom: usize,
    pub kind: SiteKind,
}

/// Scans every atom, in index order, for a recognizable ionizable group.
pub fn detect_sites(mol: &Molecule) -> Vec<Site> {
    (0..mol.atom_count())
        .filter_map(|idx| classify(mol, idx).map(|kind| Site { atom: idx, kind }))
        .collect()
}

fn classify(mol: &Molecule, idx: usize) -> Option<SiteKind> {
    match mol.atoms[idx].element {
        Element::O => classify_oxygen(mol, idx),
        Element::S => classify_sulfur(mol, idx),
        Element::N => classify_nitrogen(mol, idx),
        _ => None,
    }
}

fn is_protic(mol: &Molecule, idx: usize) -> bool {
    mol.total_hydrogens(idx) >= 1 || mol.atoms[idx].formal_charge == -1
}

fn classify_oxygen(mol: &Molecule, idx: usize) -> Option<SiteKind> {
    let atom = &mol.atoms[idx];
    if atom.aromatic || !is_protic(mol, idx) {
        return None;
    }

    let heavy = mol.heavy_neighbors(idx);
    if heavy.len() != 1 {
        return None;
    }
    let parent = heavy[0];
    if mol.bond_between(idx, parent)?.order != BondOrder::Single {
        return None;
    }

    match mol.atoms[parent].element {
        Element::C if has_double_bonded_oxygen(mol, parent) => Some(SiteKind::CarboxylicAcid),
        Element::C if mol.atoms[parent].aromatic => Some(SiteKind::Phenol),
        Element::P => Some(SiteKind::PhosphateOh),
        _ => None,
    }
}

fn classify_sulfur(mol: &Molecule, idx: usize) -> Option<SiteKind> {
    let atom = &mol.atoms[idx];
    if atom.aromatic || !is_protic(mol, idx) {
        return None;
    }
    let heavy = mol.heavy_neighbors(idx);
    if heavy.len() == 1 && mol.atoms[heavy[0]].element == Element::C {
        Some(SiteKind::Thiol)
    } else {
        None
    }
}

fn classify_nitrogen(mol: &Molecule, idx: usize) -> Option<SiteKind> {
    let atom = &mol.atoms[idx];

    if atom.aromatic {
        // A pyrrole-type NH contributes its lone pair to the ring and is not
        // basic; the bare ring nitrogen is the site.
        if atom.formal_charge == 0 && mol.total_hydrogens(idx) >= 1 {
            return None;
        }
        let in_azole_with_nh = mol.rings.iter().any(|ring| {
            ring.len() == 5
                && ring.contains(&idx)
                && ring.iter().any(|&other| {
                    other != idx
                        && mol.atoms[other].element == Element::N
                        && mol.atoms[other].aromatic
                        && mol.total_hydrogens(other) >= 1
                })
        });
        return Some(if in_azole_with_nh {
            SiteKind::Imidazole
        } else {
            SiteKind::Pyridine
        });
    }

    if atom.formal_charge < 0 {
        return None;
    }
    // Quaternary nitrogen has nothing to release.
    if atom.formal_charge > 0 && mol.total_hydrogens(idx) == 0 {
        return None;
    }
    // Imines and nitriles are out of scope.
    if mol
        .neighbors(idx)
        .iter()
        .any(|&(_, o)| o != BondOrder::Single)
    {
        return None;
    }
    if is_amide_like(mol, idx) {
        return None;
    }

    let aryl = mol
        .heavy_neighbors(idx)
        .iter()
        .any(|&n| mol.atoms[n].aromatic);
    Some(if aryl {
        SiteKind::ArylAmine
    } else {
        SiteKind::AliphaticAmine
    })
}

/// Nitrogen next to a carbonyl, sulfonyl, or similar acyl group.
fn is_amide_like(mol: &Molecule, n: usize) -> bool {
    mol.heavy_neighbors(n).iter().any(|&c| {
        matches!(mol.atoms[c].element, Element::C | Element::S | Element::P)
            && has_double_bonded_oxygen(mol, c)
    })
}

fn has_double_bonded_oxygen(mol: &Molecule, idx: usize) -> bool {
    mol.neighbors(idx).iter().any(|&(nb, order)| {
        order == BondOrder::Double && mol.atoms[nb].element == Element::O
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smiles::parse;

    fn kinds(smiles: &str) -> Vec<SiteKind> {
        detect_sites(&parse(smiles).unwrap())
            .into_iter()
            .map(|s| s.kind)
            .collect()
    }

    #[test]
    fn carboxylic_acid_is_found() {
        assert_eq!(kinds("CC(=O)O"), vec![SiteKind::CarboxylicAcid]);
    }

    #[test]
    fn deprotonated_carboxylate_is_still_a_site() {
        assert_eq!(kinds("CC(=O)[O-]"), vec![SiteKind::CarboxylicAcid]);
    }

    #[test]
    fn phenol_vs_alcohol() {
        assert_eq!(kinds("Oc1ccccc1"), vec![SiteKind::Phenol]);
        assert!(kinds("CCO").is_empty());
    }

    #[test]
    fn amines_split_by_attachment() {
        assert_eq!(kinds("CCN"), vec![SiteKind::AliphaticAmine]);
        assert_eq!(kinds("Nc1ccccc1"), vec![SiteKind::ArylAmine]);
    }

    #[test]
    fn ammonium_is_still_an_amine_site() {
        assert_eq!(kinds("C[NH3+]"), vec![SiteKind::AliphaticAmine]);
    }

    #[test]
    fn amide_nitrogen_is_not_basic() {
        assert!(kinds("CC(=O)NC").is_empty());
    }

    #[test]
    fn aromatic_nitrogens() {
        assert_eq!(kinds("c1ccncc1"), vec![SiteKind::Pyridine]);
        // Imidazole: the bare N is the basic site, the NH is skipped.
        assert_eq!(kinds("c1cnc[nH]1"), vec![SiteKind::Imidazole]);
    }

    #[test]
    fn thiol_and_phosphate() {
        assert_eq!(kinds("CS"), vec![SiteKind::Thiol]);
        assert_eq!(kinds("OP(=O)(O)O").len(), 3);
    }

    #[test]
    fn glycine_has_both_sites() {
        let found = kinds("NCC(=O)O");
        assert_eq!(found.len(), 2);
        assert!(found.contains(&SiteKind::AliphaticAmine));
        assert!(found.contains(&SiteKind::CarboxylicAcid));
    }
}
