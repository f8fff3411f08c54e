//! Export of built 3D structures to the supported file formats.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub mod error;
pub mod util;

mod mol2;
mod pdb;
mod pdbqt;
mod sdf;

pub use error::Error;

use crate::model::Molecule;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Pdb,
    Mol2,
    Sdf,
    Pdbqt,
}

impl Format {
    pub const ALL: [Format; 4] = [Format::Pdb, Format::Mol2, Format::Sdf, Format::Pdbqt];

    pub fn extension(&self) -> &'static str {
        match self {
            Format::Pdb => "pdb",
            Format::Mol2 => "mol2",
            Format::Sdf => "sdf",
            Format::Pdbqt => "pdbqt",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Pdb => write!(f, "PDB"),
            Format::Mol2 => write!(f, "MOL2"),
            Format::Sdf => write!(f, "SDF"),
            Format::Pdbqt => write!(f, "PDBQT"),
        }
    }
}

/// Writes the molecule's first conformer in the given format.
pub fn write_format<W: Write>(writer: W, mol: &Molecule, format: Format) -> Result<(), Error> {
    match format {
        Format::Pdb => pdb::write(writer, mol),
        Format::Mol2 => mol2::write(writer, mol),
        Format::Sdf => sdf::write(writer, mol),
        Format::Pdbqt => pdbqt::write(writer, mol),
    }
}

/// Exports to a file path, overwriting any existing file.
pub fn export(mol: &Molecule, path: &Path, format: Format) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_format(&mut writer, mol, format)?;
    writer.flush()?;
    Ok(())
}
