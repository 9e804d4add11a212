use std::fmt;
use thiserror::Error;

/// Identifies which of a molecule's two collections an error or log event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKind {
    Atoms,
    Bonds,
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Atoms => "atoms",
                Self::Bonds => "bonds",
            }
        )
    }
}

/// Errors raised by molecule construction and growth.
///
/// Every variant is local to the call that produced it: the molecule is left
/// exactly as it was before the failing call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoleculeError {
    /// Growing the backing storage could not acquire memory.
    #[error("Failed to grow {store} storage to a capacity of {requested}")]
    AllocationFailure { store: StoreKind, requested: usize },

    /// A bond referenced an atom that does not exist in the molecule.
    #[error("Atom index {index} is out of range for a molecule with {count} atom(s)")]
    InvalidIndex { index: usize, count: usize },

    /// An element code was empty, too long, or not alphabetic.
    #[error("Invalid element symbol '{0}': expected 1-2 ASCII letters")]
    InvalidElement(String),
}
