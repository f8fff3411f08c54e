//! Deterministic 3D embedding.
//!
//! Conformers are generated by a seeded random layout followed by iterative
//! distance refinement: bonds relax toward covalent-radius targets, geminal
//! neighbors spread to the angle their center's hybridization implies, and
//! nonbonded atoms are pushed apart. The same seed always reproduces the
//! same geometry bit for bit.

mod hydro;

pub use hydro::add_hydrogens;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::model::{BondOrder, Conformer, Molecule};

/// Fixed seed so repeated runs on identical input produce identical
/// conformer sets.
pub const DEFAULT_SEED: u64 = 42;

const EMBED_ITERATIONS: usize = 200;
const OPTIMIZE_ITERATIONS: usize = 300;
const EMBED_STEP: f64 = 0.4;
const OPTIMIZE_STEP: f64 = 0.15;
const TETRAHEDRAL_DEG: f64 = 109.47;

#[derive(Debug, Error)]
pub enum Error {
    #[error("molecule has no atoms to embed")]
    EmptyMolecule,
}

/// Replaces the molecule's conformers with `num_confs` freshly embedded
/// coordinate sets. Conformer `k` is seeded with `seed + k`.
pub fn embed_conformers(mol: &mut Molecule, num_confs: usize, seed: u64) -> Result<(), Error> {
    if mol.atom_count() == 0 {
        return Err(Error::EmptyMolecule);
    }

    mol.conformers.clear();
    for conf in 0..num_confs {
        let mut rng = StdRng::seed_from_u64(seed.wrapping_add(conf as u64));
        let mut coords = initial_layout(mol, &mut rng);
        relax(mol, &mut coords, EMBED_ITERATIONS, EMBED_STEP);
        mol.conformers.push(coords);
    }
    Ok(())
}

/// Extra refinement rounds with a smaller step, run per conformer when
/// optimization is requested.
pub fn minimize_conformer(mol: &Molecule, coords: &mut Conformer) {
    relax(mol, coords, OPTIMIZE_ITERATIONS, OPTIMIZE_STEP);
}

/// Target length in Å for a bond, from covalent radii scaled by order.
fn ideal_bond_length(mol: &Molecule, i: usize, j: usize, order: BondOrder) -> f64 {
    let base = mol.atoms[i].element.covalent_radius() + mol.atoms[j].element.covalent_radius();
    let factor = match order {
        BondOrder::Single => 1.0,
        BondOrder::Aromatic => 0.92,
        BondOrder::Double => 0.87,
        BondOrder::Triple => 0.78,
    };
    base * factor
}

/// Ideal bond angle at a center, from a coarse hybridization guess.
fn ideal_angle_deg(mol: &Molecule, center: usize) -> f64 {
    let neighbors = mol.neighbors(center);
    if neighbors.iter().any(|&(_, o)| o == BondOrder::Triple) {
        return 180.0;
    }
    if mol.atoms[center].aromatic || neighbors.iter().any(|&(_, o)| o == BondOrder::Double) {
        return 120.0;
    }
    TETRAHEDRAL_DEG
}

fn initial_layout(mol: &Molecule, rng: &mut StdRng) -> Conformer {
    let n = mol.atom_count();
    let mut coords = vec![[0.0f64; 3]; n];
    let mut placed = vec![false; n];
    let mut component_offset = 0.0f64;

    for root in 0..n {
        if placed[root] {
            continue;
        }
        coords[root] = [component_offset, 0.0, 0.0];
        placed[root] = true;

        let mut queue = std::collections::VecDeque::from([root]);
        while let Some(u) = queue.pop_front() {
            for (v, order) in mol.neighbors(u) {
                if placed[v] {
                    continue;
                }
                let dir = random_unit(rng);
                let len = ideal_bond_length(mol, u, v, order);
                coords[v] = [
                    coords[u][0] + dir[0] * len,
                    coords[u][1] + dir[1] * len,
                    coords[u][2] + dir[2] * len,
                ];
                placed[v] = true;
                queue.push_back(v);
            }
        }

        // Keep disconnected fragments from overlapping.
        component_offset += 5.0;
    }
    coords
}

fn random_unit(rng: &mut StdRng) -> [f64; 3] {
    loop {
        let v: [f64; 3] = [
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        ];
        let norm = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
        if norm > 0.1 && norm <= 1.0 {
            return [v[0] / norm, v[1] / norm, v[2] / norm];
        }
    }
}

fn relax(mol: &Molecule, coords: &mut [[f64; 3]], iterations: usize, step: f64) {
    let nonbonded = nonbonded_pairs(mol);

    for _ in 0..iterations {
        // Bond springs.
        for bond in &mol.bonds {
            let target = ideal_bond_length(mol, bond.i, bond.j, bond.order);
            adjust_distance(coords, bond.i, bond.j, target, step);
        }

        // Geminal spreading toward the hybridization angle.
        for center in 0..mol.atom_count() {
            let theta = ideal_angle_deg(mol, center).to_radians();
            let neighbors = mol.neighbors(center);
            for a in 0..neighbors.len() {
                for b in (a + 1)..neighbors.len() {
                    let (na, oa) = neighbors[a];
                    let (nb, ob) = neighbors[b];
                    let la = ideal_bond_length(mol, center, na, oa);
                    let lb = ideal_bond_length(mol, center, nb, ob);
                    let target =
                        (la * la + lb * lb - 2.0 * la * lb * theta.cos()).sqrt();
                    adjust_distance(coords, na, nb, target, step * 0.25);
                }
            }
        }

        // Nonbonded repulsion only: pull nothing together, just resolve clashes.
        for &(i, j) in &nonbonded {
            let min_sep = mol.atoms[i].element.covalent_radius()
                + mol.atoms[j].element.covalent_radius()
                + 0.9;
            let d = distance(coords, i, j);
            if d < min_sep {
                adjust_distance(coords, i, j, min_sep, step * 0.3);
            }
        }
    }
}

/// Atom pairs separated by at least three bonds (not bonded, no shared
/// neighbor).
fn nonbonded_pairs(mol: &Molecule) -> Vec<(usize, usize)> {
    let n = mol.atom_count();
    let mut excluded = std::collections::HashSet::new();
    for bond in &mol.bonds {
        excluded.insert((bond.i, bond.j));
    }
    for center in 0..n {
        let neighbors = mol.neighbors(center);
        for a in 0..neighbors.len() {
            for b in (a + 1)..neighbors.len() {
                let (i, j) = (neighbors[a].0, neighbors[b].0);
                excluded.insert(if i <= j { (i, j) } else { (j, i) });
            }
        }
    }

    let mut pairs = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            if !excluded.contains(&(i, j)) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

fn distance(coords: &[[f64; 3]], i: usize, j: usize) -> f64 {
    let dx = coords[j][0] - coords[i][0];
    let dy = coords[j][1] - coords[i][1];
    let dz = coords[j][2] - coords[i][2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Moves both atoms symmetrically so their distance approaches `target`.
fn adjust_distance(coords: &mut [[f64; 3]], i: usize, j: usize, target: f64, strength: f64) {
    let dx = coords[j][0] - coords[i][0];
    let dy = coords[j][1] - coords[i][1];
    let dz = coords[j][2] - coords[i][2];
    let dist = (dx * dx + dy * dy + dz * dz).sqrt();
    if dist < 1e-9 {
        return;
    }
    let delta = (dist - target) / dist * strength * 0.5;
    coords[i][0] += dx * delta;
    coords[i][1] += dy * delta;
    coords[i][2] += dz * delta;
    coords[j][0] -= dx * delta;
    coords[j][1] -= dy * delta;
    coords[j][2] -= dz * delta;
}
