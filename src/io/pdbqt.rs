//! AutoDock PDBQT export.
//!
//! Column layout follows the AutoDock convention: PDB-style HETATM records
//! with partial charge and AutoDock atom type in the trailing columns.

use std::io::Write;

use crate::io::{error::Error, util};
use crate::model::Molecule;

pub fn write<W: Write>(mut writer: W, mol: &Molecule) -> Result<(), Error> {
    let coords = mol.conformers.first().ok_or(Error::NoConformer)?;

    writeln!(writer, "REMARK  Name = UNL")?;
    writeln!(
        writer,
        "REMARK                            x       y       z     vdW  Elec       q    Type"
    )?;
    writeln!(
        writer,
        "REMARK                         _______ _______ _______ _____ _____    ______ ____"
    )?;

    for (i, atom) in mol.atoms.iter().enumerate() {
        let mut name = format!("{}{}", atom.element.symbol(), i + 1);
        name.truncate(4);
        writeln!(
            writer,
            "{:<6}{:>5}  {:<3} {:<3} {:>1}{:>4}    {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}    {:>+6.3} {:<2}",
            "HETATM",
            i + 1,
            name,
            "UNL",
            'A',
            1,
            coords[i][0],
            coords[i][1],
            coords[i][2],
            0.0,
            0.0,
            atom.formal_charge as f64,
            util::autodock_atom_type(mol, i)
        )?;
    }

    writeln!(writer, "END")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::{add_hydrogens, embed_conformers, DEFAULT_SEED};
    use crate::smiles::parse;

    #[test]
    fn writes_autodock_records() {
        let mut mol = parse("c1ccccc1O").unwrap();
        add_hydrogens(&mut mol);
        embed_conformers(&mut mol, 1, DEFAULT_SEED).unwrap();

        let mut buf = Vec::new();
        write(&mut buf, &mol).expect("write pdbqt");
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with("REMARK  Name = UNL"));
        let atom_lines: Vec<&str> = text.lines().filter(|l| l.starts_with("HETATM")).collect();
        assert_eq!(atom_lines.len(), mol.atom_count());
        // Aromatic carbons map to type A, the hydroxyl H to HD.
        assert!(atom_lines.iter().any(|l| l.trim_end().ends_with(" A")));
        assert!(atom_lines.iter().any(|l| l.trim_end().ends_with(" HD")));
        assert!(text.trim_end().ends_with("END"));
    }
}
