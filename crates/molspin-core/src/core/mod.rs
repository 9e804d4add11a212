//! # Core Module
//!
//! The data model and the pure geometry behind it.
//!
//! - **Molecular Representation** ([`models`]) - Atoms, bonds, their growable storage
//!   and the `Molecule` that owns them
//! - **Geometry** ([`utils`]) - Axis rotation matrices and derived bond geometry
//! - **Depth Ordering** ([`sorting`]) - Tolerance comparator and view sorting
//!
//! Positions are in Angstroms. All transforms are rotations about the origin;
//! there is no translation component.

pub mod models;
pub mod sorting;
pub mod utils;
