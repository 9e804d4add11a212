use super::atom::Atom;
use super::bond::Bond;
use super::error::{MoleculeError, StoreKind};
use super::store::{AtomStore, BondStore, DepthStore};
use crate::core::utils::geometry::{Axis, XformMatrix};
use nalgebra::Point3;
use std::fmt;
use tracing::debug;

/// A molecule: the unit of ownership for a set of atoms and the bonds between them.
///
/// The molecule exclusively owns both collections. Bonds address atoms by
/// index only, and every bond's derived geometry is kept consistent with the
/// atom positions as of the last append or rigid transform. Dropping the
/// molecule releases both collections.
#[derive(Debug, Clone)]
pub struct Molecule {
    atoms: AtomStore,
    bonds: BondStore,
}

/// One element of a back-to-front draw list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DepthItem<'a> {
    Atom(&'a Atom),
    Bond(&'a Bond),
}

impl Molecule {
    /// Creates an empty molecule with no preallocated storage.
    pub fn new() -> Self {
        Self {
            atoms: DepthStore::new(StoreKind::Atoms),
            bonds: DepthStore::new(StoreKind::Bonds),
        }
    }

    /// Creates an empty molecule with room for the given numbers of atoms and bonds.
    ///
    /// # Errors
    ///
    /// Returns [`MoleculeError::AllocationFailure`] if either collection cannot be reserved.
    pub fn with_capacity(atom_capacity: usize, bond_capacity: usize) -> Result<Self, MoleculeError> {
        Ok(Self {
            atoms: DepthStore::with_capacity(StoreKind::Atoms, atom_capacity)?,
            bonds: DepthStore::with_capacity(StoreKind::Bonds, bond_capacity)?,
        })
    }

    /// Appends an atom built from an element code and coordinates.
    ///
    /// # Return
    ///
    /// The index of the new atom.
    ///
    /// # Errors
    ///
    /// - [`MoleculeError::InvalidElement`] if `element` is not 1-2 ASCII letters.
    /// - [`MoleculeError::AllocationFailure`] if the atom storage cannot grow.
    ///
    /// On error the molecule is unchanged.
    pub fn append_atom(
        &mut self,
        element: &str,
        x: f64,
        y: f64,
        z: f64,
    ) -> Result<usize, MoleculeError> {
        self.push_atom(Atom::from_coords(element, x, y, z)?)
    }

    /// Appends an already constructed atom, copying it into the molecule.
    pub fn push_atom(&mut self, atom: Atom) -> Result<usize, MoleculeError> {
        self.atoms.push(atom)
    }

    /// Appends a bond between atoms `a1` and `a2` and derives its geometry.
    ///
    /// # Return
    ///
    /// The index of the new bond.
    ///
    /// # Errors
    ///
    /// - [`MoleculeError::InvalidIndex`] if either atom index is not `< atom_count()`.
    /// - [`MoleculeError::AllocationFailure`] if the bond storage cannot grow.
    ///
    /// On error the molecule is unchanged.
    pub fn append_bond(&mut self, a1: usize, a2: usize, epairs: u8) -> Result<usize, MoleculeError> {
        self.bonds.append_bond(&self.atoms, a1, a2, epairs)
    }

    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    pub fn bond(&self, index: usize) -> Option<&Bond> {
        self.bonds.get(index)
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    pub fn atom_capacity(&self) -> usize {
        self.atoms.capacity()
    }

    pub fn bond_capacity(&self) -> usize {
        self.bonds.capacity()
    }

    /// Atoms in append order.
    pub fn atoms(&self) -> &[Atom] {
        self.atoms.as_slice()
    }

    /// Bonds in append order.
    pub fn bonds(&self) -> &[Bond] {
        self.bonds.as_slice()
    }

    pub fn atom_view(&self) -> &[usize] {
        self.atoms.view()
    }

    pub fn bond_view(&self) -> &[usize] {
        self.bonds.view()
    }

    /// Atoms in view order (back-to-front after [`Molecule::sort`]).
    pub fn sorted_atoms(&self) -> impl Iterator<Item = &Atom> + '_ {
        self.atoms.iter_view()
    }

    /// Bonds in view order (back-to-front after [`Molecule::sort`]).
    pub fn sorted_bonds(&self) -> impl Iterator<Item = &Bond> + '_ {
        self.bonds.iter_view()
    }

    /// Creates a fully independent deep copy.
    ///
    /// The copy starts with the same capacities as `self` and is filled by
    /// re-appending every atom and bond, so its views are in storage order and
    /// its bond geometry is derived from its own atoms.
    ///
    /// # Errors
    ///
    /// Returns [`MoleculeError::AllocationFailure`] if the copy's storage cannot be reserved.
    pub fn copy(&self) -> Result<Self, MoleculeError> {
        let mut copy = Self::with_capacity(self.atom_capacity(), self.bond_capacity())?;
        for atom in self.atoms() {
            copy.push_atom(*atom)?;
        }
        for bond in self.bonds() {
            copy.append_bond(bond.a1(), bond.a2(), bond.epairs())?;
        }
        Ok(copy)
    }

    /// Sorts the atom and bond views into ascending depth.
    pub fn sort(&mut self) {
        self.atoms.sort_by_depth();
        self.bonds.sort_by_depth();
        debug!(
            atoms = self.atom_count(),
            bonds = self.bond_count(),
            "Sorted molecule views by depth."
        );
    }

    /// Applies `matrix` to every atom position, then re-derives every bond's geometry.
    pub fn transform(&mut self, matrix: &XformMatrix) {
        for atom in self.atoms.as_mut_slice() {
            atom.position = matrix.apply(&atom.position);
        }
        self.bonds.refresh_geometry(&self.atoms);
        debug!(
            atoms = self.atom_count(),
            bonds = self.bond_count(),
            "Applied transform to molecule."
        );
    }

    pub fn rotate_axis(&mut self, axis: Axis, degrees: i32) {
        self.transform(&XformMatrix::rotation(axis, degrees));
    }

    pub fn rotate_x(&mut self, degrees: i32) {
        self.rotate_axis(Axis::X, degrees);
    }

    pub fn rotate_y(&mut self, degrees: i32) {
        self.rotate_axis(Axis::Y, degrees);
    }

    pub fn rotate_z(&mut self, degrees: i32) {
        self.rotate_axis(Axis::Z, degrees);
    }

    /// Rotates about X, then Y, then Z as three separate passes, skipping zero angles.
    pub fn rotate(&mut self, pitch: i32, yaw: i32, roll: i32) {
        for (axis, degrees) in Axis::ALL.into_iter().zip([pitch, yaw, roll]) {
            if degrees != 0 {
                self.rotate_axis(axis, degrees);
            }
        }
    }

    /// Positions of all atoms in append order.
    pub fn positions(&self) -> Vec<Point3<f64>> {
        self.atoms().iter().map(|atom| atom.position).collect()
    }

    /// Merges the atom and bond views into a single back-to-front sequence.
    ///
    /// While both views have elements left, the atom is emitted if its depth is
    /// strictly less than the bond's, otherwise the bond. Remaining atoms are
    /// emitted before remaining bonds. Call [`Molecule::sort`] first for a
    /// depth-correct order.
    pub fn depth_ordered(&self) -> DepthOrdered<'_> {
        DepthOrdered {
            molecule: self,
            next_atom: 0,
            next_bond: 0,
        }
    }
}

impl Default for Molecule {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Molecule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "atoms: {} (capacity {})",
            self.atom_count(),
            self.atom_capacity()
        )?;
        for (index, atom) in self.atoms().iter().enumerate() {
            writeln!(f, "  [{}] {}", index, atom)?;
        }
        writeln!(
            f,
            "bonds: {} (capacity {})",
            self.bond_count(),
            self.bond_capacity()
        )?;
        for (index, bond) in self.bonds().iter().enumerate() {
            writeln!(f, "  [{}] {}", index, bond)?;
        }
        Ok(())
    }
}

/// Iterator returned by [`Molecule::depth_ordered`].
#[derive(Debug, Clone)]
pub struct DepthOrdered<'a> {
    molecule: &'a Molecule,
    next_atom: usize,
    next_bond: usize,
}

impl<'a> Iterator for DepthOrdered<'a> {
    type Item = DepthItem<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let molecule = self.molecule;
        let atom = molecule
            .atom_view()
            .get(self.next_atom)
            .map(|&index| &molecule.atoms()[index]);
        let bond = molecule
            .bond_view()
            .get(self.next_bond)
            .map(|&index| &molecule.bonds()[index]);

        match (atom, bond) {
            (Some(atom), Some(bond)) if atom.z() < bond.z() => {
                self.next_atom += 1;
                Some(DepthItem::Atom(atom))
            }
            (_, Some(bond)) => {
                self.next_bond += 1;
                Some(DepthItem::Bond(bond))
            }
            (Some(atom), None) => {
                self.next_atom += 1;
                Some(DepthItem::Atom(atom))
            }
            (None, None) => None,
        }
    }
}
