use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid or unsupported element symbol: '{0}'")]
pub struct ParseElementError(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid bond order string: '{0}'")]
pub struct ParseBondOrderError(String);

/// Elements the SMILES subset supports. Covers the organic subset plus the
/// bracket-only elements that show up in drug-like molecules and salts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Element {
    H,
    B,
    C,
    N,
    O,
    F,
    Na,
    Mg,
    Si,
    P,
    S,
    Cl,
    K,
    Ca,
    Fe,
    Zn,
    Se,
    Br,
    I,
}

impl Element {
    pub fn atomic_number(&self) -> u8 {
        match self {
            Element::H => 1,
            Element::B => 5,
            Element::C => 6,
            Element::N => 7,
            Element::O => 8,
            Element::F => 9,
            Element::Na => 11,
            Element::Mg => 12,
            Element::Si => 14,
            Element::P => 15,
            Element::S => 16,
            Element::Cl => 17,
            Element::K => 19,
            Element::Ca => 20,
            Element::Fe => 26,
            Element::Zn => 30,
            Element::Se => 34,
            Element::Br => 35,
            Element::I => 53,
        }
    }

    pub fn atomic_mass(&self) -> f64 {
        match self {
            Element::H => 1.008,
            Element::B => 10.81,
            Element::C => 12.011,
            Element::N => 14.007,
            Element::O => 15.999,
            Element::F => 18.998,
            Element::Na => 22.99,
            Element::Mg => 24.305,
            Element::Si => 28.085,
            Element::P => 30.974,
            Element::S => 32.06,
            Element::Cl => 35.45,
            Element::K => 39.098,
            Element::Ca => 40.078,
            Element::Fe => 55.845,
            Element::Zn => 65.38,
            Element::Se => 78.971,
            Element::Br => 79.904,
            Element::I => 126.9,
        }
    }

    /// Single-bond covalent radius in Å, used for ideal bond lengths.
    pub fn covalent_radius(&self) -> f64 {
        match self {
            Element::H => 0.31,
            Element::B => 0.84,
            Element::C => 0.76,
            Element::N => 0.71,
            Element::O => 0.66,
            Element::F => 0.57,
            Element::Na => 1.66,
            Element::Mg => 1.41,
            Element::Si => 1.11,
            Element::P => 1.07,
            Element::S => 1.05,
            Element::Cl => 1.02,
            Element::K => 2.03,
            Element::Ca => 1.76,
            Element::Fe => 1.32,
            Element::Zn => 1.22,
            Element::Se => 1.2,
            Element::Br => 1.2,
            Element::I => 1.39,
        }
    }

    /// Default valence for implicit hydrogen counting. Zero for elements that
    /// never carry implicit hydrogens (metals, bracket-only species).
    pub fn default_valence(&self) -> u8 {
        match self {
            Element::H => 1,
            Element::B => 3,
            Element::C => 4,
            Element::N => 3,
            Element::O => 2,
            Element::F => 1,
            Element::Si => 4,
            Element::P => 3,
            Element::S => 2,
            Element::Cl => 1,
            Element::Se => 2,
            Element::Br => 1,
            Element::I => 1,
            Element::Na | Element::Mg | Element::K | Element::Ca | Element::Fe | Element::Zn => 0,
        }
    }

    /// Elements of the SMILES organic subset, writable without brackets.
    pub fn is_organic_subset(&self) -> bool {
        matches!(
            self,
            Element::B
                | Element::C
                | Element::N
                | Element::O
                | Element::F
                | Element::P
                | Element::S
                | Element::Cl
                | Element::Br
                | Element::I
        )
    }

    /// Elements that may appear lowercase (aromatic) in SMILES.
    pub fn supports_aromatic(&self) -> bool {
        matches!(
            self,
            Element::B | Element::C | Element::N | Element::O | Element::P | Element::S | Element::Se
        )
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Element::H => "H",
            Element::B => "B",
            Element::C => "C",
            Element::N => "N",
            Element::O => "O",
            Element::F => "F",
            Element::Na => "Na",
            Element::Mg => "Mg",
            Element::Si => "Si",
            Element::P => "P",
            Element::S => "S",
            Element::Cl => "Cl",
            Element::K => "K",
            Element::Ca => "Ca",
            Element::Fe => "Fe",
            Element::Zn => "Zn",
            Element::Se => "Se",
            Element::Br => "Br",
            Element::I => "I",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Element {
    type Err = ParseElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "H" => Ok(Element::H),
            "B" => Ok(Element::B),
            "C" => Ok(Element::C),
            "N" => Ok(Element::N),
            "O" => Ok(Element::O),
            "F" => Ok(Element::F),
            "Na" => Ok(Element::Na),
            "Mg" => Ok(Element::Mg),
            "Si" => Ok(Element::Si),
            "P" => Ok(Element::P),
            "S" => Ok(Element::S),
            "Cl" => Ok(Element::Cl),
            "K" => Ok(Element::K),
            "Ca" => Ok(Element::Ca),
            "Fe" => Ok(Element::Fe),
            "Zn" => Ok(Element::Zn),
            "Se" => Ok(Element::Se),
            "Br" => Ok(Element::Br),
            "I" => Ok(Element::I),
            _ => Err(ParseElementError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BondOrder {
    Single,
    Double,
    Triple,
    Aromatic,
}

impl BondOrder {
    pub fn value(&self) -> f64 {
        match self {
            BondOrder::Single => 1.0,
            BondOrder::Double => 2.0,
            BondOrder::Triple => 3.0,
            BondOrder::Aromatic => 1.5,
        }
    }
}

impl fmt::Display for BondOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BondOrder::Single => write!(f, "Single"),
            BondOrder::Double => write!(f, "Double"),
            BondOrder::Triple => write!(f, "Triple"),
            BondOrder::Aromatic => write!(f, "Aromatic"),
        }
    }
}

impl FromStr for BondOrder {
    type Err = ParseBondOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single" | "1" => Ok(BondOrder::Single),
            "double" | "2" => Ok(BondOrder::Double),
            "triple" | "3" => Ok(BondOrder::Triple),
            "aromatic" | "ar" => Ok(BondOrder::Aromatic),
            _ => Err(ParseBondOrderError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    #[test]
    fn element_from_str_valid() {
        assert_eq!(Element::from_str("H").unwrap(), Element::H);
        assert_eq!(Element::from_str("Cl").unwrap(), Element::Cl);
        assert_eq!(Element::from_str("Zn").unwrap(), Element::Zn);
    }

    #[test]
    fn element_from_str_invalid_case() {
        let err = Element::from_str("c").unwrap_err();
        assert_eq!(err.to_string(), "invalid or unsupported element symbol: 'c'");
    }

    #[test]
    fn element_symbol_display_and_atomic_number() {
        assert_eq!(Element::Na.symbol(), "Na");
        assert_eq!(Element::Na.to_string(), "Na");
        assert_eq!(Element::Na.atomic_number(), 11u8);
    }

    #[test]
    fn atomic_mass_values() {
        assert!(approx_eq(Element::H.atomic_mass(), 1.008, 1e-6));
        assert!(approx_eq(Element::C.atomic_mass(), 12.011, 1e-6));
        assert!(approx_eq(Element::I.atomic_mass(), 126.9, 1e-6));
    }

    #[test]
    fn default_valences() {
        assert_eq!(Element::C.default_valence(), 4);
        assert_eq!(Element::N.default_valence(), 3);
        assert_eq!(Element::O.default_valence(), 2);
        assert_eq!(Element::Br.default_valence(), 1);
        assert_eq!(Element::Na.default_valence(), 0);
    }

    #[test]
    fn organic_subset_membership() {
        assert!(Element::C.is_organic_subset());
        assert!(Element::Br.is_organic_subset());
        assert!(!Element::Na.is_organic_subset());
        assert!(!Element::H.is_organic_subset());
    }

    #[test]
    fn bondorder_value_and_parse() {
        assert!(approx_eq(BondOrder::Aromatic.value(), 1.5, 1e-12));
        assert_eq!(BondOrder::from_str("2").unwrap(), BondOrder::Double);
        assert_eq!(BondOrder::from_str("ar").unwrap(), BondOrder::Aromatic);
        assert!(BondOrder::from_str("quad").is_err());
    }
}
