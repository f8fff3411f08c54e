use std::io::Write;

use crate::io::error::Error;
use crate::model::Molecule;

/// Writes the first conformer as a single-residue HETATM block with CONECT
/// records for every bond.
pub fn write<W: Write>(mut writer: W, mol: &Molecule) -> Result<(), Error> {
    let coords = mol.conformers.first().ok_or(Error::NoConformer)?;

    writeln!(writer, "COMPND    UNL")?;
    writeln!(writer, "REMARK   4 GENERATED BY SMI-FORGE")?;

    for (i, atom) in mol.atoms.iter().enumerate() {
        let mut name = format!("{}{}", atom.element.symbol(), i + 1);
        name.truncate(4);
        writeln!(
            writer,
            "HETATM{:>5} {:<4} UNL A   1    {:>8.3}{:>8.3}{:>8.3}  1.00  0.00          {:>2}",
            i + 1,
            name,
            coords[i][0],
            coords[i][1],
            coords[i][2],
            atom.element.symbol()
        )?;
    }

    for i in 0..mol.atom_count() {
        let neighbors = mol.neighbors(i);
        if neighbors.is_empty() {
            continue;
        }
        write!(writer, "CONECT{:>5}", i + 1)?;
        for (j, _) in neighbors {
            write!(writer, "{:>5}", j + 1)?;
        }
        writeln!(writer)?;
    }

    writeln!(writer, "END")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::{add_hydrogens, embed_conformers, DEFAULT_SEED};
    use crate::smiles::parse;

    fn built_ethanol() -> Molecule {
        let mut mol = parse("CCO").unwrap();
        add_hydrogens(&mut mol);
        embed_conformers(&mut mol, 1, DEFAULT_SEED).unwrap();
        mol
    }

    #[test]
    fn writes_hetatm_and_conect_records() {
        let mol = built_ethanol();
        let mut buf = Vec::new();
        write(&mut buf, &mol).expect("write pdb");
        let text = String::from_utf8(buf).unwrap();

        let hetatm_lines = text.lines().filter(|l| l.starts_with("HETATM")).count();
        assert_eq!(hetatm_lines, mol.atom_count());
        assert!(text.lines().any(|l| l.starts_with("CONECT")));
        assert!(text.trim_end().ends_with("END"));
    }

    #[test]
    fn errors_without_a_conformer() {
        let mol = parse("CCO").unwrap();
        let err = write(Vec::new(), &mol).expect_err("no conformer should fail");
        assert!(matches!(err, Error::NoConformer));
    }
}
