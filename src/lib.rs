//! A pure Rust pipeline from SMILES strings to 3D molecular structures.
//! It enumerates protonation states over a pH window, embeds and optimizes
//! conformers deterministically, exports PDB/MOL2/SDF/PDBQT, computes
//! molecular descriptors, and scores fingerprint similarity.
//!
//! # Features
//!
//! - **SMILES parsing and writing** — organic subset with brackets, charges,
//!   aromatic notation, branches, and ring closures
//! - **Protonation enumeration** — pKa-window microstate generation with a
//!   fail-open fallback to the input structure
//! - **Deterministic 3D embedding** — seeded layout plus distance refinement,
//!   with an optional per-conformer minimization pass
//! - **Multi-format export** — PDB, MOL2, SDF, and PDBQT writers
//! - **Descriptors and similarity** — molecular weight, LogP, TPSA, ring
//!   counts and friends, plus Morgan and path fingerprints with Tanimoto
//!   scoring
//!
//! # Quick Start
//!
//! ```
//! use smi_forge::{embed, props, smiles};
//!
//! // Ethanol: parse, hydrogenate, embed five conformers.
//! let mut mol = smiles::parse("CCO")?;
//! embed::add_hydrogens(&mut mol);
//! embed::embed_conformers(&mut mol, 5, embed::DEFAULT_SEED)?;
//!
//! assert_eq!(mol.atom_count(), 9);
//! assert_eq!(mol.conformers.len(), 5);
//!
//! let props = props::compute_properties(&mol);
//! let mw = props.get("Molecular Weight").unwrap();
//! assert!((mw - 46.07).abs() < 0.01);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The full pipeline, including protonation and file export, is
//! [`build::build_3d`]; the `sforge` binary drives it over single SMILES
//! strings or batch files.
//!
//! # Module Organization
//!
//! - [`model`] — atoms, bonds, molecules, elements, ring perception
//! - [`smiles`] — SMILES parser and writer
//! - [`protonate`] — pKa table and protonation-state enumeration
//! - [`embed`] — hydrogen addition, conformer embedding, minimization
//! - [`props`] — molecular descriptors
//! - [`similarity`] — fingerprints and Tanimoto scoring
//! - [`io`] — PDB/MOL2/SDF/PDBQT writers
//! - [`build`] — the orchestrating build pipeline

pub mod build;
pub mod embed;
pub mod io;
pub mod model;
pub mod props;
pub mod protonate;
pub mod similarity;
pub mod smiles;

pub use build::{build_3d, BuildConfig, BuildOutcome};
pub use model::{Atom, Bond, BondOrder, Conformer, Element, Molecule};
pub use props::{compute_properties, PropertyMap};
pub use protonate::{protonate_smiles, PkaTable, ProtonationWindow};
pub use similarity::{similarity, FpKind};
