use std::io::Write;

use crate::io::{error::Error, util};
use crate::model::Molecule;

pub fn write<W: Write>(mut writer: W, mol: &Molecule) -> Result<(), Error> {
    let coords = mol.conformers.first().ok_or(Error::NoConformer)?;

    writeln!(writer, "UNL")?;
    writeln!(writer, "  SMI-FORGE")?;
    writeln!(writer)?;
    writeln!(
        writer,
        "{:>3}{:>3}  0  0  0  0  0  0  0  0999 V2000",
        mol.atom_count(),
        mol.bond_count()
    )?;

    for (i, atom) in mol.atoms.iter().enumerate() {
        writeln!(
            writer,
            "{:>10.4}{:>10.4}{:>10.4} {:<3} 0  0  0  0  0  0  0  0  0  0  0  0",
            coords[i][0],
            coords[i][1],
            coords[i][2],
            atom.element.symbol()
        )?;
    }

    for bond in &mol.bonds {
        writeln!(
            writer,
            "{:>3}{:>3}{:>3}  0  0  0  0",
            bond.i + 1,
            bond.j + 1,
            util::bond_order_to_ctfile(bond.order)
        )?;
    }

    let charges: Vec<(usize, i8)> = mol
        .atoms
        .iter()
        .enumerate()
        .filter(|(_, a)| a.formal_charge != 0)
        .map(|(i, a)| (i + 1, a.formal_charge))
        .collect();
    for chunk in charges.chunks(8) {
        write!(writer, "M  CHG{:>3}", chunk.len())?;
        for (idx, charge) in chunk {
            write!(writer, "{:>4}{:>4}", idx, charge)?;
        }
        writeln!(writer)?;
    }

    writeln!(writer, "M  END")?;
    writeln!(writer, "$$$$")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::{add_hydrogens, embed_conformers, DEFAULT_SEED};
    use crate::smiles::parse;

    #[test]
    fn writes_v2000_block() {
        let mut mol = parse("CCO").unwrap();
        add_hydrogens(&mut mol);
        embed_conformers(&mut mol, 1, DEFAULT_SEED).unwrap();

        let mut buf = Vec::new();
        write(&mut buf, &mol).expect("write sdf");
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("V2000"));
        assert!(text.contains("  9  8  0"));
        assert!(text.contains("M  END"));
        assert!(text.trim_end().ends_with("$$$$"));
        assert!(!text.contains("M  CHG"));
    }

    #[test]
    fn charged_atoms_get_chg_lines() {
        let mut mol = parse("CC(=O)[O-]").unwrap();
        add_hydrogens(&mut mol);
        embed_conformers(&mut mol, 1, DEFAULT_SEED).unwrap();

        let mut buf = Vec::new();
        write(&mut buf, &mol).expect("write sdf");
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("M  CHG  1   4  -1"));
    }
}
