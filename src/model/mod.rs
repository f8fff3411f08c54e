pub mod atom;
pub mod molecule;
pub mod rings;
pub mod types;

pub use atom::Atom;
pub use molecule::{Bond, Conformer, Molecule};
pub use types::{BondOrder, Element, ParseBondOrderError, ParseElementError};
