//! Fingerprints and Tanimoto similarity.
//!
//! Both fingerprints are computed over heavy atoms, with hydrogen totals
//! folded into the atom invariants. A molecule therefore scores identically
//! before and after explicit hydrogen addition, so a freshly parsed
//! reference can be compared against a fully built 3D structure.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::model::{BondOrder, Element, Molecule};

/// Fingerprint algorithm selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FpKind {
    /// Circular (ECFP-style) fingerprint parameterized by radius and width.
    Morgan,
    /// Hashed linear-path fingerprint with fixed parameters.
    Topological,
}

/// Width of the topological path fingerprint.
pub const PATH_FP_BITS: usize = 2048;
/// Longest path, in bonds, folded into the topological fingerprint.
const PATH_FP_MAX_BONDS: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    words: Vec<u64>,
    n_bits: usize,
}

impl Fingerprint {
    pub fn new(n_bits: usize) -> Self {
        let n_bits = n_bits.max(1);
        Self {
            words: vec![0; n_bits.div_ceil(64)],
            n_bits,
        }
    }

    pub fn n_bits(&self) -> usize {
        self.n_bits
    }

    fn set(&mut self, hash: u64) {
        let bit = (hash % self.n_bits as u64) as usize;
        self.words[bit / 64] |= 1u64 << (bit % 64);
    }

    pub fn count_ones(&self) -> u32 {
        self.words.iter().map(|w| w.count_ones()).sum()
    }
}

/// Tanimoto coefficient in [0, 1]. Two empty fingerprints are identical and
/// score 1.0.
pub fn tanimoto(a: &Fingerprint, b: &Fingerprint) -> f64 {
    debug_assert_eq!(a.n_bits, b.n_bits, "fingerprint widths must match");
    let mut intersection = 0u32;
    let mut union = 0u32;
    for (x, y) in a.words.iter().zip(b.words.iter()) {
        intersection += (x & y).count_ones();
        union += (x | y).count_ones();
    }
    if union == 0 {
        1.0
    } else {
        intersection as f64 / union as f64
    }
}

/// Fingerprint-based similarity between two molecules. For
/// [`FpKind::Topological`] the radius and width parameters are ignored.
pub fn similarity(a: &Molecule, b: &Molecule, kind: FpKind, radius: u32, n_bits: usize) -> f64 {
    match kind {
        FpKind::Morgan => tanimoto(
            &morgan_fingerprint(a, radius, n_bits),
            &morgan_fingerprint(b, radius, n_bits),
        ),
        FpKind::Topological => tanimoto(&path_fingerprint(a), &path_fingerprint(b)),
    }
}

fn hash_value(value: &impl Hash) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

fn bond_code(order: BondOrder) -> u8 {
    match order {
        BondOrder::Single => 1,
        BondOrder::Double => 2,
        BondOrder::Triple => 3,
        BondOrder::Aromatic => 4,
    }
}

fn atom_invariant(mol: &Molecule, idx: usize) -> u64 {
    let atom = &mol.atoms[idx];
    hash_value(&(
        atom.element.atomic_number(),
        mol.heavy_degree(idx) as u8,
        atom.formal_charge,
        mol.total_hydrogens(idx),
        atom.aromatic,
        mol.in_ring(idx),
    ))
}

/// Iterated circular fingerprint: every atom environment from radius 0 up to
/// `radius` sets one bit.
pub fn morgan_fingerprint(mol: &Molecule, radius: u32, n_bits: usize) -> Fingerprint {
    let heavy: Vec<usize> = (0..mol.atom_count())
        .filter(|&i| mol.atoms[i].element != Element::H)
        .collect();

    let mut fp = Fingerprint::new(n_bits);
    let mut invariants: Vec<u64> = heavy.iter().map(|&i| atom_invariant(mol, i)).collect();
    let index_of = |atom: usize| heavy.binary_search(&atom).ok();

    for &inv in &invariants {
        fp.set(inv);
    }

    for _ in 0..radius {
        let mut next = invariants.clone();
        for (k, &atom) in heavy.iter().enumerate() {
            let mut env: Vec<(u8, u64)> = mol
                .neighbors(atom)
                .into_iter()
                .filter_map(|(nb, order)| {
                    index_of(nb).map(|nk| (bond_code(order), invariants[nk]))
                })
                .collect();
            env.sort_unstable();
            next[k] = hash_value(&(invariants[k], env));
            fp.set(next[k]);
        }
        invariants = next;
    }
    fp
}

/// Hashed linear paths of 1 to [`PATH_FP_MAX_BONDS`] bonds over heavy atoms.
pub fn path_fingerprint(mol: &Molecule) -> Fingerprint {
    let mut fp = Fingerprint::new(PATH_FP_BITS);
    for start in 0..mol.atom_count() {
        if mol.atoms[start].element == Element::H {
            continue;
        }
        let mut path = vec![start];
        let mut bonds = Vec::new();
        extend_path(mol, &mut path, &mut bonds, &mut fp);
    }
    fp
}

fn extend_path(mol: &Molecule, path: &mut Vec<usize>, bonds: &mut Vec<u8>, fp: &mut Fingerprint) {
    let last = *path.last().expect("path never empty");
    for (nb, order) in mol.neighbors(last) {
        if mol.atoms[nb].element == Element::H || path.contains(&nb) {
            continue;
        }
        path.push(nb);
        bonds.push(bond_code(order));
        fp.set(canonical_path_hash(mol, path, bonds));
        if bonds.len() < PATH_FP_MAX_BONDS {
            extend_path(mol, path, bonds, fp);
        }
        path.pop();
        bonds.pop();
    }
}

/// Encodes the path forward and reversed and hashes the smaller encoding, so
/// a path found from either end sets the same bit.
fn canonical_path_hash(mol: &Molecule, path: &[usize], bonds: &[u8]) -> u64 {
    let encode = |atoms: &mut dyn Iterator<Item = usize>, bonds: &[u8], rev: bool| -> Vec<u16> {
        let mut code = Vec::with_capacity(path.len() * 2);
        let bond_iter: Vec<u8> = if rev {
            bonds.iter().rev().copied().collect()
        } else {
            bonds.to_vec()
        };
        let mut b = bond_iter.into_iter();
        for atom in atoms {
            let a = &mol.atoms[atom];
            code.push(u16::from(a.element.atomic_number()) << 1 | u16::from(a.aromatic));
            if let Some(order) = b.next() {
                code.push(u16::from(order) | 0x100);
            }
        }
        code
    };

    let forward = encode(&mut path.iter().copied(), bonds, false);
    let backward = encode(&mut path.iter().rev().copied(), bonds, true);
    hash_value(&forward.min(backward))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::add_hydrogens;
    use crate::smiles::parse;

    #[test]
    fn identical_molecules_score_one() {
        let a = parse("CCO").unwrap();
        let b = parse("CCO").unwrap();
        assert_eq!(similarity(&a, &b, FpKind::Morgan, 2, 2048), 1.0);
        assert_eq!(similarity(&a, &b, FpKind::Topological, 2, 2048), 1.0);
    }

    #[test]
    fn explicit_hydrogens_do_not_change_the_score() {
        let reference = parse("CCO").unwrap();
        let mut built = parse("CCO").unwrap();
        add_hydrogens(&mut built);
        assert_eq!(
            similarity(&built, &reference, FpKind::Morgan, 2, 2048),
            1.0
        );
        assert_eq!(
            similarity(&built, &reference, FpKind::Topological, 0, 0),
            1.0
        );
    }

    #[test]
    fn different_molecules_score_below_one() {
        let a = parse("CCO").unwrap();
        let b = parse("c1ccccc1").unwrap();
        let score = similarity(&a, &b, FpKind::Morgan, 2, 2048);
        assert!((0.0..1.0).contains(&score));
        let path_score = similarity(&a, &b, FpKind::Topological, 0, 0);
        assert!((0.0..1.0).contains(&path_score));
    }

    #[test]
    fn related_molecules_score_between_zero_and_one() {
        let ethanol = parse("CCO").unwrap();
        let propanol = parse("CCCO").unwrap();
        let score = similarity(&ethanol, &propanol, FpKind::Morgan, 2, 2048);
        assert!(score > 0.0 && score < 1.0);
    }

    #[test]
    fn charge_distinguishes_fingerprints() {
        let acid = parse("CC(=O)O").unwrap();
        let anion = parse("CC(=O)[O-]").unwrap();
        assert!(similarity(&acid, &anion, FpKind::Morgan, 2, 2048) < 1.0);
    }

    #[test]
    fn empty_fingerprints_are_identical() {
        let a = Fingerprint::new(64);
        let b = Fingerprint::new(64);
        assert_eq!(tanimoto(&a, &b), 1.0);
    }

    #[test]
    fn fingerprint_sets_some_bits() {
        let mol = parse("CCO").unwrap();
        assert!(morgan_fingerprint(&mol, 2, 2048).count_ones() > 0);
        assert!(path_fingerprint(&mol).count_ones() > 0);
    }
}
