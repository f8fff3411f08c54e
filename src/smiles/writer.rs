use std::collections::HashMap;
use std::fmt::Write;

use crate::model::{BondOrder, Molecule};

/// Serializes a molecule back to SMILES.
///
/// Atoms that need no bracket (organic subset, zero charge, no isotope, no
/// fixed hydrogen count) are written bare; everything else gets a bracket
/// with its hydrogen count and charge spelled out, so charged protonation
/// variants round-trip through [`parse`](super::parse).
pub fn write(mol: &Molecule) -> String {
    let n = mol.atom_count();
    let mut visited = vec![false; n];
    let mut closures: HashMap<(usize, usize), u16> = HashMap::new();
    let mut next_label = 1u16;
    let mut out = String::new();

    let mut first = true;
    for root in 0..n {
        if visited[root] {
            continue;
        }
        if !first {
            out.push('.');
        }
        first = false;
        classify_edges(mol, root, &mut visited, &mut closures, &mut next_label);
        emit(mol, root, usize::MAX, &closures, &mut out);
    }
    out
}

/// DFS over one component: edges used to reach a vertex for the first time
/// become tree edges, every other edge gets a ring closure label.
fn classify_edges(
    mol: &Molecule,
    root: usize,
    visited: &mut [bool],
    closures: &mut HashMap<(usize, usize), u16>,
    next_label: &mut u16,
) {
    let mut parent: HashMap<usize, usize> = HashMap::new();
    let mut stack = vec![root];
    visited[root] = true;

    while let Some(u) = stack.pop() {
        for (v, _) in mol.neighbors(u) {
            if parent.get(&u) == Some(&v) {
                continue;
            }
            if !visited[v] {
                visited[v] = true;
                parent.insert(v, u);
                stack.push(v);
            } else if !closures.contains_key(&edge_key(u, v)) {
                closures.insert(edge_key(u, v), *next_label);
                *next_label += 1;
            }
        }
    }
}

fn edge_key(a: usize, b: usize) -> (usize, usize) {
    if a <= b { (a, b) } else { (b, a) }
}

fn emit(
    mol: &Molecule,
    u: usize,
    from: usize,
    closures: &HashMap<(usize, usize), u16>,
    out: &mut String,
) {
    out.push_str(&atom_token(mol, u));

    let mut children: Vec<(usize, BondOrder)> = Vec::new();
    for (v, order) in mol.neighbors(u) {
        if v == from {
            continue;
        }
        if let Some(&label) = closures.get(&edge_key(u, v)) {
            // Ring closure digit directly after the atom; the bond symbol is
            // written on the opening side only.
            if v > u {
                push_bond(mol, u, v, order, out);
            }
            push_ring_label(label, out);
        } else {
            children.push((v, order));
        }
    }

    let count = children.len();
    for (k, (v, order)) in children.into_iter().enumerate() {
        if k + 1 < count {
            out.push('(');
            push_bond(mol, u, v, order, out);
            emit(mol, v, u, closures, out);
            out.push(')');
        } else {
            push_bond(mol, u, v, order, out);
            emit(mol, v, u, closures, out);
        }
    }
}

fn push_ring_label(label: u16, out: &mut String) {
    if label < 10 {
        let _ = write!(out, "{label}");
    } else {
        let _ = write!(out, "%{label:02}");
    }
}

fn push_bond(mol: &Molecule, u: usize, v: usize, order: BondOrder, out: &mut String) {
    let both_aromatic = mol.atoms[u].aromatic && mol.atoms[v].aromatic;
    match order {
        BondOrder::Single => {
            if both_aromatic {
                out.push('-');
            }
        }
        BondOrder::Double => out.push('='),
        BondOrder::Triple => out.push('#'),
        BondOrder::Aromatic => {
            if !both_aromatic {
                out.push(':');
            }
        }
    }
}

fn atom_token(mol: &Molecule, idx: usize) -> String {
    let atom = &mol.atoms[idx];
    let needs_bracket = !atom.element.is_organic_subset()
        || atom.formal_charge != 0
        || atom.isotope.is_some()
        || atom.explicit_h.is_some();

    let symbol = if atom.aromatic {
        atom.element.symbol().to_lowercase()
    } else {
        atom.element.symbol().to_string()
    };

    if !needs_bracket {
        return symbol;
    }

    let mut token = String::from("[");
    if let Some(iso) = atom.isotope {
        let _ = write!(token, "{iso}");
    }
    token.push_str(&symbol);

    let h = atom
        .explicit_h
        .unwrap_or_else(|| mol.implicit_hydrogen_count(idx));
    if h == 1 {
        token.push('H');
    } else if h > 1 {
        let _ = write!(token, "H{h}");
    }

    let q = atom.formal_charge;
    if q == 1 {
        token.push('+');
    } else if q == -1 {
        token.push('-');
    } else if q > 1 {
        let _ = write!(token, "+{q}");
    } else if q < -1 {
        let _ = write!(token, "-{}", -q);
    }

    token.push(']');
    token
}
