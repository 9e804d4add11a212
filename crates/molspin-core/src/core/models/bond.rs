use super::atom::Atom;
use crate::core::sorting::Depth;
use crate::core::utils::geometry::{BondGeometry, bond_geometry};
use std::fmt;

/// A covalent bond between two atoms of the same molecule.
///
/// Endpoints are stored as positions in the owning molecule's atom storage,
/// never as references, so they stay valid when that storage grows. The
/// derived [`BondGeometry`] is a snapshot: it reflects the atom positions at
/// the time of the last append or rigid transform of the owning molecule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bond {
    a1: usize,
    a2: usize,
    epairs: u8,
    geometry: BondGeometry,
}

impl Bond {
    /// Builds a bond and derives its geometry from `atoms`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range for `atoms`. The molecule
    /// validates indices before calling this.
    pub(crate) fn resolve(a1: usize, a2: usize, epairs: u8, atoms: &[Atom]) -> Self {
        Self {
            a1,
            a2,
            epairs,
            geometry: bond_geometry(&atoms[a1].position, &atoms[a2].position),
        }
    }

    /// Re-derives the geometry from the current atom positions.
    pub(crate) fn refresh(&mut self, atoms: &[Atom]) {
        self.geometry = bond_geometry(&atoms[self.a1].position, &atoms[self.a2].position);
    }

    pub fn a1(&self) -> usize {
        self.a1
    }

    pub fn a2(&self) -> usize {
        self.a2
    }

    /// Number of shared electron pairs (bond order); not validated.
    pub fn epairs(&self) -> u8 {
        self.epairs
    }

    pub fn geometry(&self) -> &BondGeometry {
        &self.geometry
    }

    /// Average depth of the two endpoints.
    pub fn z(&self) -> f64 {
        self.geometry.z
    }

    /// Planar length between the endpoints.
    pub fn length(&self) -> f64 {
        self.geometry.len
    }
}

impl Depth for Bond {
    fn depth(&self) -> f64 {
        self.geometry.z
    }
}

impl fmt::Display for Bond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let g = &self.geometry;
        write!(
            f,
            "{} -> {} (epairs {}): ({:.4}, {:.4}) -> ({:.4}, {:.4}), z {:.4}, len {:.4}, dir ({:.4}, {:.4})",
            self.a1, self.a2, self.epairs, g.x1, g.y1, g.x2, g.y2, g.z, g.len, g.dx, g.dy
        )
    }
}
