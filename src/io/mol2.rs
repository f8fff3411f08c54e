use std::io::Write;

use crate::io::{error::Error, util};
use crate::model::Molecule;

pub fn write<W: Write>(mut writer: W, mol: &Molecule) -> Result<(), Error> {
    let coords = mol.conformers.first().ok_or(Error::NoConformer)?;
    let charged = mol.atoms.iter().any(|a| a.formal_charge != 0);

    writeln!(writer, "@<TRIPOS>MOLECULE")?;
    writeln!(writer, "SMI-FORGE")?;
    writeln!(
        writer,
        "{:>5} {:>5} 0 0 0",
        mol.atom_count(),
        mol.bond_count()
    )?;
    writeln!(writer, "SMALL")?;
    writeln!(
        writer,
        "{}",
        if charged { "USER_CHARGES" } else { "NO_CHARGES" }
    )?;
    writeln!(writer, "****")?;
    writeln!(writer)?;

    writeln!(writer, "@<TRIPOS>ATOM")?;
    for (i, atom) in mol.atoms.iter().enumerate() {
        writeln!(
            writer,
            "{:>7} {:<8} {:>10.4} {:>10.4} {:>10.4} {:<6} {:>3} {:<8} {:>8.4}",
            i + 1,
            format!("{}{}", atom.element.symbol(), i + 1),
            coords[i][0],
            coords[i][1],
            coords[i][2],
            util::sybyl_atom_type(mol, i),
            1,
            "UNL",
            atom.formal_charge as f64
        )?;
    }

    writeln!(writer, "@<TRIPOS>BOND")?;
    for (i, bond) in mol.bonds.iter().enumerate() {
        writeln!(
            writer,
            "{:>7} {:>4} {:>4} {}",
            i + 1,
            bond.i + 1,
            bond.j + 1,
            util::bond_order_to_mol2(bond.order)
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::{add_hydrogens, embed_conformers, DEFAULT_SEED};
    use crate::smiles::parse;

    #[test]
    fn writes_tripos_sections() {
        let mut mol = parse("CC(=O)[O-]").unwrap();
        add_hydrogens(&mut mol);
        embed_conformers(&mut mol, 1, DEFAULT_SEED).unwrap();

        let mut buf = Vec::new();
        write(&mut buf, &mol).expect("write mol2");
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("@<TRIPOS>MOLECULE"));
        assert!(text.contains("@<TRIPOS>ATOM"));
        assert!(text.contains("@<TRIPOS>BOND"));
        assert!(text.contains("USER_CHARGES"));
        assert!(text.contains("C.2"));

        let atom_lines = text
            .lines()
            .skip_while(|l| !l.starts_with("@<TRIPOS>ATOM"))
            .skip(1)
            .take_while(|l| !l.starts_with("@<TRIPOS>"))
            .count();
        assert_eq!(atom_lines, mol.atom_count());
    }

    #[test]
    fn uncharged_molecule_declares_no_charges() {
        let mut mol = parse("CCO").unwrap();
        add_hydrogens(&mut mol);
        embed_conformers(&mut mol, 1, DEFAULT_SEED).unwrap();

        let mut buf = Vec::new();
        write(&mut buf, &mol).expect("write mol2");
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("NO_CHARGES"));
    }
}
