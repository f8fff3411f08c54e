use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("empty SMILES string")]
    Empty,

    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("unknown element '{symbol}' at position {pos}")]
    UnknownElement { symbol: String, pos: usize },

    #[error("'{symbol}' cannot be aromatic (position {pos})")]
    NotAromatic { symbol: String, pos: usize },

    #[error("branch start '(' at position {pos} has no attachment atom")]
    DanglingBranch { pos: usize },

    #[error("unmatched ')' at position {pos}")]
    UnmatchedBranchClose { pos: usize },

    #[error("{count} unclosed '(' at end of input")]
    UnclosedBranch { count: usize },

    #[error("ring closure {label} at position {pos} has no attachment atom")]
    DanglingRingClosure { label: u16, pos: usize },

    #[error("ring closure {label} at position {pos} bonds an atom to itself")]
    SelfRingClosure { label: u16, pos: usize },

    #[error("ring closure {label} was opened but never closed")]
    UnclosedRing { label: u16 },

    #[error("unterminated bracket atom starting at position {pos}")]
    UnterminatedBracket { pos: usize },

    #[error("invalid bracket atom '[{content}]' at position {pos}")]
    InvalidBracket { content: String, pos: usize },

    #[error("bond symbol at position {pos} is missing an atom to connect")]
    TrailingBond { pos: usize },
}
