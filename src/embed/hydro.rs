use crate::model::{Atom, BondOrder, Element, Molecule};

/// Adds explicit hydrogen atoms to every heavy atom, consuming the implicit
/// counts. Bracket-fixed counts are honored; everything else follows the
/// charge-adjusted valence rule.
///
/// After this call no atom carries implicit hydrogens, so repeated calls are
/// no-ops.
pub fn add_hydrogens(mol: &mut Molecule) {
    let heavy_count = mol.atom_count();
    for idx in 0..heavy_count {
        if mol.atoms[idx].element == Element::H {
            continue;
        }
        let count = mol.implicit_hydrogen_count(idx);
        for _ in 0..count {
            let h = mol.add_atom(Atom::new(Element::H));
            mol.add_bond(idx, h, BondOrder::Single);
        }
        // The hydrogens are in the graph now; freeze the count at zero.
        mol.atoms[idx].explicit_h = Some(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Element;
    use crate::smiles::parse;

    fn hydrogen_count(mol: &Molecule) -> usize {
        mol.atoms
            .iter()
            .filter(|a| a.element == Element::H)
            .count()
    }

    #[test]
    fn ethanol_gains_six_hydrogens() {
        let mut mol = parse("CCO").unwrap();
        add_hydrogens(&mut mol);
        assert_eq!(mol.atom_count(), 9);
        assert_eq!(hydrogen_count(&mol), 6);
        assert_eq!(mol.bond_count(), 8);
    }

    #[test]
    fn ammonium_gains_four() {
        let mut mol = parse("[NH4+]").unwrap();
        add_hydrogens(&mut mol);
        assert_eq!(hydrogen_count(&mol), 4);
    }

    #[test]
    fn carboxylate_oxygen_gains_none() {
        let mut mol = parse("CC(=O)[O-]").unwrap();
        add_hydrogens(&mut mol);
        // CH3 (3) plus nothing on the carbonyl or the charged oxygen.
        assert_eq!(hydrogen_count(&mol), 3);
    }

    #[test]
    fn benzene_gains_one_per_carbon() {
        let mut mol = parse("c1ccccc1").unwrap();
        add_hydrogens(&mut mol);
        assert_eq!(hydrogen_count(&mol), 6);
    }

    #[test]
    fn idempotent_on_second_call() {
        let mut mol = parse("CCO").unwrap();
        add_hydrogens(&mut mol);
        let atoms = mol.atom_count();
        add_hydrogens(&mut mol);
        assert_eq!(mol.atom_count(), atoms);
    }
}
