//! Ring perception via a spanning-forest cycle basis. Each non-tree edge
//! closes exactly one ring against the forest, which is enough for the ring
//! counts and membership tests the descriptors need.

use super::molecule::Bond;

pub fn cycle_basis(atom_count: usize, bonds: &[Bond]) -> Vec<Vec<usize>> {
    let mut adjacency = vec![Vec::new(); atom_count];
    for bond in bonds {
        adjacency[bond.i].push(bond.j);
        adjacency[bond.j].push(bond.i);
    }

    let mut parent = vec![usize::MAX; atom_count];
    let mut depth = vec![0usize; atom_count];
    let mut visited = vec![false; atom_count];
    let mut tree_edges = std::collections::HashSet::new();

    for root in 0..atom_count {
        if visited[root] {
            continue;
        }
        visited[root] = true;
        let mut queue = std::collections::VecDeque::from([root]);
        while let Some(u) = queue.pop_front() {
            for &v in &adjacency[u] {
                if !visited[v] {
                    visited[v] = true;
                    parent[v] = u;
                    depth[v] = depth[u] + 1;
                    tree_edges.insert(edge_key(u, v));
                    queue.push_back(v);
                }
            }
        }
    }

    let mut rings = Vec::new();
    for bond in bonds {
        if tree_edges.contains(&edge_key(bond.i, bond.j)) {
            continue;
        }
        rings.push(ring_through(bond.i, bond.j, &parent, &depth));
    }
    rings
}

fn edge_key(a: usize, b: usize) -> (usize, usize) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Walks both endpoints of a non-tree edge up to their lowest common
/// ancestor. The resulting vertex sequence is cyclic: consecutive entries
/// (and the closing pair) are bonded.
fn ring_through(u: usize, v: usize, parent: &[usize], depth: &[usize]) -> Vec<usize> {
    let mut left = vec![u];
    let mut right = vec![v];
    let (mut a, mut b) = (u, v);

    while depth[a] > depth[b] {
        a = parent[a];
        left.push(a);
    }
    while depth[b] > depth[a] {
        b = parent[b];
        right.push(b);
    }
    while a != b {
        a = parent[a];
        b = parent[b];
        left.push(a);
        right.push(b);
    }

    // `left` ends at the ancestor; append the right branch walking back down.
    right.pop();
    right.reverse();
    left.extend(right);
    left
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::molecule::Bond;
    use crate::model::types::BondOrder;

    fn chain_bonds(pairs: &[(usize, usize)]) -> Vec<Bond> {
        pairs
            .iter()
            .map(|&(i, j)| Bond::new(i, j, BondOrder::Single))
            .collect()
    }

    #[test]
    fn acyclic_graph_has_no_rings() {
        let bonds = chain_bonds(&[(0, 1), (1, 2), (2, 3)]);
        assert!(cycle_basis(4, &bonds).is_empty());
    }

    #[test]
    fn six_ring_is_found_once() {
        let bonds = chain_bonds(&[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0)]);
        let rings = cycle_basis(6, &bonds);
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].len(), 6);
        let mut sorted = rings[0].clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn fused_bicyclic_yields_two_rings() {
        // Naphthalene-like skeleton: two fused six-rings sharing edge 0-5.
        let bonds = chain_bonds(&[
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 4),
            (4, 5),
            (5, 0),
            (5, 6),
            (6, 7),
            (7, 8),
            (8, 9),
            (9, 0),
        ]);
        let rings = cycle_basis(10, &bonds);
        assert_eq!(rings.len(), 2);
    }

    #[test]
    fn ring_vertices_are_cyclically_bonded() {
        let bonds = chain_bonds(&[(0, 1), (1, 2), (2, 0)]);
        let rings = cycle_basis(3, &bonds);
        assert_eq!(rings.len(), 1);
        let ring = &rings[0];
        for k in 0..ring.len() {
            let a = ring[k];
            let b = ring[(k + 1) % ring.len()];
            assert!(
                bonds.iter().any(|bd| (bd.i, bd.j) == (a.min(b), a.max(b))),
                "ring vertices {a} and {b} are not bonded"
            );
        }
    }
}
