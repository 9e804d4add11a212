use super::error::MoleculeError;
use crate::core::sorting::Depth;
use nalgebra::Point3;
use std::fmt;
use std::str::FromStr;

const MAX_SYMBOL_LEN: usize = 2;

/// A chemical element code of one or two ASCII letters (e.g. "C", "Cl").
///
/// The symbol is stored inline so that [`Atom`] stays a plain `Copy` value,
/// mirroring the fixed-width element field of the records it models.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementSymbol {
    bytes: [u8; MAX_SYMBOL_LEN],
    len: u8,
}

impl ElementSymbol {
    /// Returns the symbol as a string slice.
    pub fn as_str(&self) -> &str {
        // Construction only admits ASCII letters, so this is always valid UTF-8.
        std::str::from_utf8(&self.bytes[..usize::from(self.len)]).unwrap_or_default()
    }
}

impl FromStr for ElementSymbol {
    type Err = MoleculeError;

    /// Parses an element code.
    ///
    /// # Errors
    ///
    /// Returns [`MoleculeError::InvalidElement`] if the input is empty, longer
    /// than two characters, or contains anything other than ASCII letters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.as_bytes();
        if raw.is_empty() || raw.len() > MAX_SYMBOL_LEN || !raw.iter().all(u8::is_ascii_alphabetic)
        {
            return Err(MoleculeError::InvalidElement(s.to_string()));
        }
        let mut bytes = [0u8; MAX_SYMBOL_LEN];
        bytes[..raw.len()].copy_from_slice(raw);
        Ok(Self {
            bytes,
            len: raw.len() as u8,
        })
    }
}

impl fmt::Display for ElementSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Debug for ElementSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementSymbol({:?})", self.as_str())
    }
}

/// Represents a single atom: its element and its position in Angstroms.
///
/// Atoms are value records. They are copied into a molecule on append and
/// copied again when the molecule is cloned, so no two molecules ever share
/// an atom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atom {
    /// The element code of the atom.
    pub element: ElementSymbol,
    /// The 3D coordinates of the atom in Angstroms, relative to the molecule origin.
    pub position: Point3<f64>,
}

impl Atom {
    /// Creates a new `Atom` from an element and a position.
    pub fn new(element: ElementSymbol, position: Point3<f64>) -> Self {
        Self { element, position }
    }

    /// Creates a new `Atom` from an element code and raw coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`MoleculeError::InvalidElement`] if `element` is not a valid symbol.
    pub fn from_coords(element: &str, x: f64, y: f64, z: f64) -> Result<Self, MoleculeError> {
        Ok(Self::new(element.parse()?, Point3::new(x, y, z)))
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    /// The viewing-axis depth used for back-to-front ordering.
    pub fn z(&self) -> f64 {
        self.position.z
    }
}

impl Depth for Atom {
    fn depth(&self) -> f64 {
        self.position.z
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<2} ({:.4}, {:.4}, {:.4})",
            self.element,
            self.position.x,
            self.position.y,
            self.position.z
        )
    }
}
