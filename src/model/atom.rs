use super::types::Element;

#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub element: Element,
    pub formal_charge: i8,
    pub aromatic: bool,
    /// Hydrogen count fixed by a bracket atom. `None` means the count is
    /// implicit and derived from the element's valence.
    pub explicit_h: Option<u8>,
    pub isotope: Option<u16>,
}

impl Atom {
    pub fn new(element: Element) -> Self {
        Self {
            element,
            formal_charge: 0,
            aromatic: false,
            explicit_h: None,
            isotope: None,
        }
    }

    pub fn aromatic(element: Element) -> Self {
        Self {
            aromatic: true,
            ..Self::new(element)
        }
    }
}
