use std::collections::HashMap;
use std::str::FromStr;

use super::error::Error;
use crate::model::{Atom, BondOrder, Element, Molecule};

/// Parses a SMILES string into a [`Molecule`] with perceived rings.
///
/// Supports the organic subset, aromatic lowercase notation, branches, ring
/// closures (including `%nn` labels), fragment dots, and bracket atoms with
/// isotope, charge, and explicit hydrogen counts. Stereo markers (`/`, `\`,
/// `@`) are accepted and ignored.
pub fn parse(smiles: &str) -> Result<Molecule, Error> {
    let input = smiles.trim();
    if input.is_empty() {
        return Err(Error::Empty);
    }

    let chars: Vec<char> = input.chars().collect();
    let mut mol = Molecule::new();
    let mut current: Option<usize> = None;
    let mut pending: Option<BondOrder> = None;
    let mut pending_pos = 0usize;
    let mut branch_stack: Vec<usize> = Vec::new();
    let mut ring_map: HashMap<u16, (usize, Option<BondOrder>)> = HashMap::new();

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            '(' => {
                let from = current.ok_or(Error::DanglingBranch { pos: i })?;
                branch_stack.push(from);
                i += 1;
            }
            ')' => {
                current = Some(branch_stack.pop().ok_or(Error::UnmatchedBranchClose { pos: i })?);
                i += 1;
            }
            '-' | '/' | '\\' => {
                pending = Some(BondOrder::Single);
                pending_pos = i;
                i += 1;
            }
            '=' => {
                pending = Some(BondOrder::Double);
                pending_pos = i;
                i += 1;
            }
            '#' => {
                pending = Some(BondOrder::Triple);
                pending_pos = i;
                i += 1;
            }
            ':' => {
                pending = Some(BondOrder::Aromatic);
                pending_pos = i;
                i += 1;
            }
            '.' => {
                if pending.is_some() {
                    return Err(Error::TrailingBond { pos: pending_pos });
                }
                current = None;
                i += 1;
            }
            '%' => {
                if i + 2 >= chars.len()
                    || !chars[i + 1].is_ascii_digit()
                    || !chars[i + 2].is_ascii_digit()
                {
                    return Err(Error::UnexpectedChar { ch: '%', pos: i });
                }
                let label = (chars[i + 1].to_digit(10).unwrap() * 10
                    + chars[i + 2].to_digit(10).unwrap()) as u16;
                close_ring(&mut mol, &mut ring_map, label, current, &mut pending, i)?;
                i += 3;
            }
            '0'..='9' => {
                let label = c.to_digit(10).unwrap() as u16;
                close_ring(&mut mol, &mut ring_map, label, current, &mut pending, i)?;
                i += 1;
            }
            '[' => {
                let close = chars[i + 1..]
                    .iter()
                    .position(|&c| c == ']')
                    .ok_or(Error::UnterminatedBracket { pos: i })?
                    + i
                    + 1;
                let content: String = chars[i + 1..close].iter().collect();
                let atom = parse_bracket(&content).ok_or_else(|| Error::InvalidBracket {
                    content: content.clone(),
                    pos: i,
                })?;
                let idx = mol.add_atom(atom);
                connect(&mut mol, &mut current, &mut pending, idx, pending_pos)?;
                i = close + 1;
            }
            c if c.is_ascii_uppercase() => {
                let symbol = organic_symbol(&chars, i);
                let element =
                    Element::from_str(&symbol).map_err(|_| Error::UnknownElement {
                        symbol: symbol.clone(),
                        pos: i,
                    })?;
                if !element.is_organic_subset() {
                    return Err(Error::UnknownElement { symbol, pos: i });
                }
                let idx = mol.add_atom(Atom::new(element));
                connect(&mut mol, &mut current, &mut pending, idx, pending_pos)?;
                i += symbol.len();
            }
            c if c.is_ascii_lowercase() => {
                let symbol: String = c.to_uppercase().collect();
                let element =
                    Element::from_str(&symbol).map_err(|_| Error::UnknownElement {
                        symbol: c.to_string(),
                        pos: i,
                    })?;
                if !element.supports_aromatic() || !element.is_organic_subset() {
                    return Err(Error::NotAromatic {
                        symbol: c.to_string(),
                        pos: i,
                    });
                }
                let idx = mol.add_atom(Atom::aromatic(element));
                connect(&mut mol, &mut current, &mut pending, idx, pending_pos)?;
                i += 1;
            }
            _ => return Err(Error::UnexpectedChar { ch: c, pos: i }),
        }
    }

    if pending.is_some() {
        return Err(Error::TrailingBond { pos: pending_pos });
    }
    if !branch_stack.is_empty() {
        return Err(Error::UnclosedBranch {
            count: branch_stack.len(),
        });
    }
    if let Some(&label) = ring_map.keys().min() {
        return Err(Error::UnclosedRing { label });
    }
    if mol.atom_count() == 0 {
        return Err(Error::Empty);
    }

    mol.perceive_rings();
    Ok(mol)
}

fn organic_symbol(chars: &[char], i: usize) -> String {
    let c = chars[i];
    if c == 'C' && chars.get(i + 1) == Some(&'l') {
        return "Cl".to_string();
    }
    if c == 'B' && chars.get(i + 1) == Some(&'r') {
        return "Br".to_string();
    }
    c.to_string()
}

fn connect(
    mol: &mut Molecule,
    current: &mut Option<usize>,
    pending: &mut Option<BondOrder>,
    new_idx: usize,
    bond_pos: usize,
) -> Result<(), Error> {
    if let Some(from) = *current {
        let default = if mol.atoms[from].aromatic && mol.atoms[new_idx].aromatic {
            BondOrder::Aromatic
        } else {
            BondOrder::Single
        };
        let order = pending.take().unwrap_or(default);
        mol.add_bond(from, new_idx, order);
    } else if pending.is_some() {
        return Err(Error::TrailingBond { pos: bond_pos });
    }
    *current = Some(new_idx);
    Ok(())
}

fn close_ring(
    mol: &mut Molecule,
    ring_map: &mut HashMap<u16, (usize, Option<BondOrder>)>,
    label: u16,
    current: Option<usize>,
    pending: &mut Option<BondOrder>,
    pos: usize,
) -> Result<(), Error> {
    let cur = current.ok_or(Error::DanglingRingClosure { label, pos })?;
    match ring_map.remove(&label) {
        Some((other, opening_bond)) => {
            if other == cur {
                return Err(Error::SelfRingClosure { label, pos });
            }
            let default = if mol.atoms[other].aromatic && mol.atoms[cur].aromatic {
                BondOrder::Aromatic
            } else {
                BondOrder::Single
            };
            let order = pending.take().or(opening_bond).unwrap_or(default);
            mol.add_bond(other, cur, order);
        }
        None => {
            ring_map.insert(label, (cur, pending.take()));
        }
    }
    Ok(())
}

/// Bracket atom body, without the surrounding `[` `]`:
/// `isotope? symbol chirality? H-count? charge? class?`.
fn parse_bracket(content: &str) -> Option<Atom> {
    let chars: Vec<char> = content.chars().collect();
    let mut k = 0;

    let mut isotope_digits = String::new();
    while k < chars.len() && chars[k].is_ascii_digit() {
        isotope_digits.push(chars[k]);
        k += 1;
    }
    let isotope = if isotope_digits.is_empty() {
        None
    } else {
        Some(isotope_digits.parse().ok()?)
    };

    let c0 = *chars.get(k)?;
    let (element, aromatic) = if c0.is_ascii_uppercase() {
        let mut symbol = c0.to_string();
        if let Some(&c1) = chars.get(k + 1) {
            if c1.is_ascii_lowercase() && c1 != 'h' {
                let two = format!("{c0}{c1}");
                if Element::from_str(&two).is_ok() {
                    symbol = two;
                }
            }
        }
        k += symbol.len();
        (Element::from_str(&symbol).ok()?, false)
    } else if c0.is_ascii_lowercase() {
        let symbol = if c0 == 's' && chars.get(k + 1) == Some(&'e') {
            "Se".to_string()
        } else {
            c0.to_uppercase().collect()
        };
        k += if symbol.len() == 2 { 2 } else { 1 };
        let element = Element::from_str(&symbol).ok()?;
        if !element.supports_aromatic() {
            return None;
        }
        (element, true)
    } else {
        return None;
    };

    let mut atom = Atom {
        element,
        formal_charge: 0,
        aromatic,
        // Bracket atoms carry no implicit hydrogens unless an H count is given.
        explicit_h: Some(0),
        isotope,
    };

    while k < chars.len() {
        match chars[k] {
            '@' => k += 1,
            'H' => {
                k += 1;
                let mut digits = String::new();
                while k < chars.len() && chars[k].is_ascii_digit() {
                    digits.push(chars[k]);
                    k += 1;
                }
                let count = if digits.is_empty() {
                    1
                } else {
                    digits.parse().ok()?
                };
                atom.explicit_h = Some(count);
            }
            sign @ ('+' | '-') => {
                k += 1;
                let unit: i32 = if sign == '+' { 1 } else { -1 };
                let mut digits = String::new();
                while k < chars.len() && chars[k].is_ascii_digit() {
                    digits.push(chars[k]);
                    k += 1;
                }
                let mut magnitude: i32 = if digits.is_empty() {
                    1
                } else {
                    digits.parse().ok()?
                };
                while k < chars.len() && chars[k] == sign {
                    magnitude += 1;
                    k += 1;
                }
                atom.formal_charge = i8::try_from(unit * magnitude).ok()?;
            }
            ':' => {
                k += 1;
                if k >= chars.len() || !chars[k].is_ascii_digit() {
                    return None;
                }
                while k < chars.len() && chars[k].is_ascii_digit() {
                    k += 1;
                }
            }
            _ => return None,
        }
    }

    Some(atom)
}
