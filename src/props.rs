//! Molecular descriptors computed from the graph.
//!
//! Contribution schemes are coarse atomic-additive models: enough to rank and
//! filter, not a substitute for a fitted descriptor package. All counts work
//! both before and after explicit hydrogen addition because hydrogen totals
//! come from [`Molecule::total_hydrogens`].

use crate::model::{BondOrder, Element, Molecule};

/// Ordered name → value map so printed property order is stable.
#[derive(Debug, Clone, Default)]
pub struct PropertyMap {
    entries: Vec<(&'static str, f64)>,
}

impl PropertyMap {
    fn insert(&mut self, name: &'static str, value: f64) {
        self.entries.push((name, value));
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(k, _)| *k == name)
            .map(|&(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn compute_properties(mol: &Molecule) -> PropertyMap {
    let mut props = PropertyMap::default();
    props.insert("Molecular Weight", molecular_weight(mol));
    props.insert("LogP", logp(mol));
    props.insert("Molar Refractivity", molar_refractivity(mol));
    props.insert("H-Bond Donors", h_bond_donors(mol) as f64);
    props.insert("H-Bond Acceptors", h_bond_acceptors(mol) as f64);
    props.insert("TPSA", tpsa(mol));
    props.insert("Rotatable Bonds", rotatable_bonds(mol) as f64);
    props.insert("Aliphatic Rings", aliphatic_rings(mol) as f64);
    props.insert("Aromatic Rings", aromatic_rings(mol) as f64);
    props.insert("Heteroaromatic Rings", heteroaromatic_rings(mol) as f64);
    props
}

/// Mass of the molecule including implicit and explicit hydrogens.
pub fn molecular_weight(mol: &Molecule) -> f64 {
    let mut mass = 0.0;
    for idx in 0..mol.atom_count() {
        mass += mol.atoms[idx].element.atomic_mass();
        mass += mol.implicit_hydrogen_count(idx) as f64 * Element::H.atomic_mass();
    }
    mass
}

pub fn h_bond_donors(mol: &Molecule) -> usize {
    (0..mol.atom_count())
        .filter(|&idx| {
            matches!(
                mol.atoms[idx].element,
                Element::N | Element::O | Element::S
            ) && mol.total_hydrogens(idx) >= 1
        })
        .count()
}

pub fn h_bond_acceptors(mol: &Molecule) -> usize {
    (0..mol.atom_count())
        .filter(|&idx| {
            let atom = &mol.atoms[idx];
            if atom.formal_charge > 0 {
                return false;
            }
            match atom.element {
                // Pyrrole-type NH donates its lone pair into the ring.
                Element::N => !(atom.aromatic && mol.total_hydrogens(idx) >= 1),
                Element::O => true,
                _ => false,
            }
        })
        .count()
}

/// Bonds free to rotate: acyclic single bonds between two non-terminal heavy
/// atoms.
pub fn rotatable_bonds(mol: &Molecule) -> usize {
    mol.bonds
        .iter()
        .filter(|bond| {
            bond.order == BondOrder::Single
                && mol.atoms[bond.i].element != Element::H
                && mol.atoms[bond.j].element != Element::H
                && !mol.ring_bond(bond.i, bond.j)
                && mol.heavy_degree(bond.i) >= 2
                && mol.heavy_degree(bond.j) >= 2
        })
        .count()
}

pub fn aromatic_rings(mol: &Molecule) -> usize {
    mol.rings
        .iter()
        .filter(|ring| ring.iter().all(|&a| mol.atoms[a].aromatic))
        .count()
}

pub fn aliphatic_rings(mol: &Molecule) -> usize {
    mol.rings
        .iter()
        .filter(|ring| !ring.iter().all(|&a| mol.atoms[a].aromatic))
        .count()
}

pub fn heteroaromatic_rings(mol: &Molecule) -> usize {
    mol.rings
        .iter()
        .filter(|ring| {
            ring.iter().all(|&a| mol.atoms[a].aromatic)
                && ring.iter().any(|&a| mol.atoms[a].element != Element::C)
        })
        .count()
}

/// Topological polar surface area from per-atom contributions (Ertl-style,
/// reduced to the common N/O/S/P environments).
pub fn tpsa(mol: &Molecule) -> f64 {
    let mut area = 0.0;
    for idx in 0..mol.atom_count() {
        let atom = &mol.atoms[idx];
        let h = mol.total_hydrogens(idx);
        let has_double = mol
            .neighbors(idx)
            .iter()
            .any(|&(_, o)| o == BondOrder::Double);

        area += match atom.element {
            Element::N => {
                if atom.formal_charge > 0 {
                    match h {
                        0 => 0.0,
                        1 => 4.44,
                        2 => 16.61,
                        _ => 27.64,
                    }
                } else if atom.aromatic {
                    if h >= 1 { 15.79 } else { 12.89 }
                } else {
                    match h {
                        0 => 3.24,
                        1 => 12.03,
                        _ => 26.02,
                    }
                }
            }
            Element::O => {
                if atom.formal_charge < 0 {
                    23.06
                } else if atom.aromatic {
                    13.14
                } else if h >= 1 {
                    20.23
                } else if has_double {
                    17.07
                } else {
                    9.23
                }
            }
            Element::S => {
                if h >= 1 {
                    38.80
                } else if atom.aromatic {
                    28.24
                } else if has_double {
                    32.09
                } else {
                    25.30
                }
            }
            Element::P => 13.59,
            _ => 0.0,
        };
    }
    area
}

/// Octanol/water partition estimate from atomic contributions.
pub fn logp(mol: &Molecule) -> f64 {
    let mut total = 0.0;
    for idx in 0..mol.atom_count() {
        let atom = &mol.atoms[idx];
        let contribution = match (atom.element, atom.aromatic) {
            (Element::H, _) => continue,
            (Element::C, true) => 0.29,
            (Element::C, false) => 0.14,
            (Element::N, true) => -0.49,
            (Element::N, false) => -0.87,
            (Element::O, true) => 0.11,
            (Element::O, false) => -0.64,
            (Element::S, true) => 0.41,
            (Element::S, false) => 0.25,
            (Element::P, _) => -0.45,
            (Element::F, _) => 0.22,
            (Element::Cl, _) => 0.65,
            (Element::Br, _) => 0.86,
            (Element::I, _) => 1.12,
            (Element::B, _) => -0.03,
            _ => 0.0,
        };
        total += contribution;
        // Hydrogens on carbon add lipophilicity, on heteroatoms polarity.
        let h_term = if atom.element == Element::C { 0.12 } else { -0.33 };
        total += mol.total_hydrogens(idx) as f64 * h_term;
    }
    // Explicit hydrogen atoms were already counted through their parents.
    total
}

/// Molar refractivity from atomic contributions.
pub fn molar_refractivity(mol: &Molecule) -> f64 {
    let mut total = 0.0;
    for idx in 0..mol.atom_count() {
        let atom = &mol.atoms[idx];
        total += match atom.element {
            Element::H => continue,
            Element::C => {
                if atom.aromatic {
                    3.50
                } else {
                    2.50
                }
            }
            Element::N => 2.82,
            Element::O => 1.58,
            Element::S => 7.72,
            Element::P => 6.92,
            Element::F => 0.92,
            Element::Cl => 5.84,
            Element::Br => 8.88,
            Element::I => 13.95,
            Element::B => 3.0,
            _ => 3.0,
        };
        total += mol.total_hydrogens(idx) as f64 * 1.06;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::add_hydrogens;
    use crate::smiles::parse;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    #[test]
    fn ethanol_molecular_weight() {
        let mol = parse("CCO").unwrap();
        assert!(approx_eq(molecular_weight(&mol), 46.069, 1e-3));
    }

    #[test]
    fn weight_is_unchanged_by_explicit_hydrogens() {
        let mut mol = parse("CCO").unwrap();
        let implicit = molecular_weight(&mol);
        add_hydrogens(&mut mol);
        assert!(approx_eq(molecular_weight(&mol), implicit, 1e-9));
    }

    #[test]
    fn ethanol_donors_acceptors_tpsa() {
        let mol = parse("CCO").unwrap();
        assert_eq!(h_bond_donors(&mol), 1);
        assert_eq!(h_bond_acceptors(&mol), 1);
        assert!(approx_eq(tpsa(&mol), 20.23, 1e-9));
    }

    #[test]
    fn ethanol_has_no_rotatable_bonds() {
        let mol = parse("CCO").unwrap();
        assert_eq!(rotatable_bonds(&mol), 0);
    }

    #[test]
    fn butane_chain_rotates_once() {
        // Only the central C-C bond has two non-terminal ends.
        let mol = parse("CCCC").unwrap();
        assert_eq!(rotatable_bonds(&mol), 1);
    }

    #[test]
    fn ring_classification() {
        let benzene = parse("c1ccccc1").unwrap();
        assert_eq!(aromatic_rings(&benzene), 1);
        assert_eq!(aliphatic_rings(&benzene), 0);
        assert_eq!(heteroaromatic_rings(&benzene), 0);

        let pyridine = parse("c1ccncc1").unwrap();
        assert_eq!(aromatic_rings(&pyridine), 1);
        assert_eq!(heteroaromatic_rings(&pyridine), 1);

        let cyclohexane = parse("C1CCCCC1").unwrap();
        assert_eq!(aliphatic_rings(&cyclohexane), 1);
        assert_eq!(aromatic_rings(&cyclohexane), 0);
    }

    #[test]
    fn property_map_is_ordered_and_complete() {
        let mol = parse("CCO").unwrap();
        let props = compute_properties(&mol);
        assert_eq!(props.len(), 10);
        let names: Vec<&str> = props.iter().map(|(k, _)| k).collect();
        assert_eq!(names[0], "Molecular Weight");
        assert!(props.get("TPSA").is_some());
        assert!(props.get("unknown").is_none());
    }

    #[test]
    fn aromatic_carbon_raises_logp() {
        let benzene = parse("c1ccccc1").unwrap();
        let cyclohexane = parse("C1CCCCC1").unwrap();
        assert!(logp(&benzene) > 0.0);
        assert!(molar_refractivity(&benzene) > molar_refractivity(&parse("C").unwrap()));
        assert!(logp(&cyclohexane) > 0.0);
    }
}
