//! # Core Models Module
//!
//! Data structures representing a molecule in memory.
//!
//! ## Key Components
//!
//! - [`atom`] - Element symbol and position of a single atom
//! - [`bond`] - Bond between two atom indices and its derived planar geometry
//! - [`store`] - Growable, index-addressable storage with a reorderable depth view
//! - [`molecule`] - The owning aggregate of one atom store and one bond store
//! - [`error`] - Errors raised by construction and growth
//!
//! ## Usage
//!
//! ```
//! use molspin::core::models::molecule::Molecule;
//!
//! let mut molecule = Molecule::new();
//! let c = molecule.append_atom("C", 0.0, 0.0, 0.0)?;
//! let o = molecule.append_atom("O", 1.2, 0.0, 0.0)?;
//! molecule.append_bond(c, o, 2)?;
//!
//! molecule.rotate_z(90);
//! molecule.sort();
//! assert_eq!(molecule.bond_count(), 1);
//! # Ok::<(), molspin::core::models::error::MoleculeError>(())
//! ```

pub mod atom;
pub mod bond;
pub mod error;
pub mod molecule;
pub mod store;
