use super::atom::Atom;
use super::rings;
use super::types::{BondOrder, Element};

/// One coordinate set per atom, in Å.
pub type Conformer = Vec<[f64; 3]>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bond {
    pub i: usize,
    pub j: usize,
    pub order: BondOrder,
}

impl Bond {
    pub fn new(idx1: usize, idx2: usize, order: BondOrder) -> Self {
        if idx1 <= idx2 {
            Self { i: idx1, j: idx2, order }
        } else {
            Self { i: idx2, j: idx1, order }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Molecule {
    pub atoms: Vec<Atom>,
    pub bonds: Vec<Bond>,
    pub rings: Vec<Vec<usize>>,
    pub conformers: Vec<Conformer>,
}

impl Molecule {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    #[inline]
    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    pub fn add_atom(&mut self, atom: Atom) -> usize {
        self.atoms.push(atom);
        self.atoms.len() - 1
    }

    pub fn add_bond(&mut self, i: usize, j: usize, order: BondOrder) {
        self.bonds.push(Bond::new(i, j, order));
    }

    pub fn bond_between(&self, i: usize, j: usize) -> Option<&Bond> {
        let (lo, hi) = if i <= j { (i, j) } else { (j, i) };
        self.bonds.iter().find(|b| b.i == lo && b.j == hi)
    }

    pub fn neighbors(&self, idx: usize) -> Vec<(usize, BondOrder)> {
        let mut out = Vec::new();
        for bond in &self.bonds {
            if bond.i == idx {
                out.push((bond.j, bond.order));
            } else if bond.j == idx {
                out.push((bond.i, bond.order));
            }
        }
        out
    }

    pub fn heavy_neighbors(&self, idx: usize) -> Vec<usize> {
        self.neighbors(idx)
            .into_iter()
            .filter(|&(n, _)| self.atoms[n].element != Element::H)
            .map(|(n, _)| n)
            .collect()
    }

    pub fn degree(&self, idx: usize) -> usize {
        self.neighbors(idx).len()
    }

    pub fn heavy_degree(&self, idx: usize) -> usize {
        self.heavy_neighbors(idx).len()
    }

    /// Sum of bond orders around an atom, aromatic counting 1.5.
    pub fn bond_order_sum(&self, idx: usize) -> f64 {
        self.neighbors(idx).iter().map(|(_, o)| o.value()).sum()
    }

    /// Hydrogens implied by valence but not present as graph atoms. A bracket
    /// H count overrides the valence rule entirely.
    pub fn implicit_hydrogen_count(&self, idx: usize) -> u8 {
        let atom = &self.atoms[idx];
        if let Some(h) = atom.explicit_h {
            return h;
        }

        let charge = atom.formal_charge as f64;
        let base = atom.element.default_valence() as f64;
        if base == 0.0 {
            return 0;
        }

        // Carbocations and carbanions both lose a slot; for heteroatoms the
        // charge shifts the valence directly (N+ binds four, O- binds one).
        let effective = if atom.element == Element::C {
            base - charge.abs()
        } else {
            base + charge
        };

        let open = (effective - self.bond_order_sum(idx)).round();
        if open > 0.0 { open as u8 } else { 0 }
    }

    /// Total hydrogen count: explicit H neighbors plus implicit hydrogens.
    pub fn total_hydrogens(&self, idx: usize) -> u8 {
        let attached = self
            .neighbors(idx)
            .iter()
            .filter(|&&(n, _)| self.atoms[n].element == Element::H)
            .count() as u8;
        attached + self.implicit_hydrogen_count(idx)
    }

    pub fn perceive_rings(&mut self) {
        self.rings = rings::cycle_basis(self.atoms.len(), &self.bonds);
    }

    pub fn in_ring(&self, idx: usize) -> bool {
        self.rings.iter().any(|r| r.contains(&idx))
    }

    /// Whether the bond between `i` and `j` lies on a perceived ring.
    pub fn ring_bond(&self, i: usize, j: usize) -> bool {
        self.rings.iter().any(|ring| {
            ring.iter().enumerate().any(|(k, &a)| {
                let b = ring[(k + 1) % ring.len()];
                (a == i && b == j) || (a == j && b == i)
            })
        })
    }

    /// Net formal charge over all atoms.
    pub fn net_charge(&self) -> i32 {
        self.atoms.iter().map(|a| a.formal_charge as i32).sum()
    }
}
