use crate::model::{BondOrder, Element, Molecule};

/// CTfile (SDF) bond type codes.
pub fn bond_order_to_ctfile(order: BondOrder) -> u8 {
    match order {
        BondOrder::Single => 1,
        BondOrder::Double => 2,
        BondOrder::Triple => 3,
        BondOrder::Aromatic => 4,
    }
}

/// TRIPOS MOL2 bond type strings.
pub fn bond_order_to_mol2(order: BondOrder) -> &'static str {
    match order {
        BondOrder::Single => "1",
        BondOrder::Double => "2",
        BondOrder::Triple => "3",
        BondOrder::Aromatic => "ar",
    }
}

/// SYBYL atom type for MOL2 output, from element and bonding environment.
pub fn sybyl_atom_type(mol: &Molecule, idx: usize) -> String {
    let atom = &mol.atoms[idx];
    let symbol = atom.element.symbol();
    if atom.aromatic {
        return format!("{symbol}.ar");
    }
    let max_order = mol
        .neighbors(idx)
        .iter()
        .map(|&(_, o)| o)
        .max_by(|a, b| a.value().partial_cmp(&b.value()).unwrap_or(std::cmp::Ordering::Equal));
    match (atom.element, max_order) {
        (Element::C, Some(BondOrder::Triple)) => "C.1".to_string(),
        (Element::C, Some(BondOrder::Double)) => "C.2".to_string(),
        (Element::C, _) => "C.3".to_string(),
        (Element::N, Some(BondOrder::Triple)) => "N.1".to_string(),
        (Element::N, Some(BondOrder::Double)) => "N.2".to_string(),
        (Element::N, _) => "N.3".to_string(),
        (Element::O, Some(BondOrder::Double)) => "O.2".to_string(),
        (Element::O, _) => "O.3".to_string(),
        (Element::S, _) => "S.3".to_string(),
        (Element::P, _) => "P.3".to_string(),
        _ => symbol.to_string(),
    }
}

/// AutoDock atom type for PDBQT output.
pub fn autodock_atom_type(mol: &Molecule, idx: usize) -> &'static str {
    let atom = &mol.atoms[idx];
    match atom.element {
        Element::C => {
            if atom.aromatic {
                "A"
            } else {
                "C"
            }
        }
        Element::N => {
            // Acceptor nitrogens carry no hydrogen.
            if mol.total_hydrogens(idx) == 0 {
                "NA"
            } else {
                "N"
            }
        }
        Element::O => "OA",
        Element::S => "SA",
        Element::H => {
            let polar = mol.neighbors(idx).iter().any(|&(nb, _)| {
                matches!(
                    mol.atoms[nb].element,
                    Element::N | Element::O | Element::S
                )
            });
            if polar { "HD" } else { "H" }
        }
        other => other.symbol(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::add_hydrogens;
    use crate::smiles::parse;

    #[test]
    fn sybyl_types_follow_bonding() {
        let mol = parse("CC(=O)O").unwrap();
        assert_eq!(sybyl_atom_type(&mol, 0), "C.3");
        assert_eq!(sybyl_atom_type(&mol, 1), "C.2");
        assert_eq!(sybyl_atom_type(&mol, 2), "O.2");
        assert_eq!(sybyl_atom_type(&mol, 3), "O.3");

        let benzene = parse("c1ccccc1").unwrap();
        assert_eq!(sybyl_atom_type(&benzene, 0), "C.ar");
    }

    #[test]
    fn autodock_types_mark_polar_hydrogens() {
        let mut mol = parse("CO").unwrap();
        add_hydrogens(&mut mol);
        let h_types: Vec<&str> = (0..mol.atom_count())
            .filter(|&i| mol.atoms[i].element == crate::model::Element::H)
            .map(|i| autodock_atom_type(&mol, i))
            .collect();
        assert_eq!(h_types.iter().filter(|t| **t == "HD").count(), 1);
        assert_eq!(h_types.iter().filter(|t| **t == "H").count(), 3);
        assert_eq!(autodock_atom_type(&mol, 1), "OA");
    }
}
