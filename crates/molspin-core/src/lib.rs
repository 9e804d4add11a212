//! # molspin
//!
//! An in-memory geometric model of molecules: growable collections of atoms
//! and the covalent bonds between them, per-bond planar geometry, depth
//! ordering for back-to-front rendering, and rigid rotation about the
//! coordinate axes.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout:
//!
//! - **[`core`]: The Foundation.** Value types (`Atom`, `Bond`), the index-stable
//!   growable storage behind them, the `Molecule` aggregate, rotation matrices and
//!   the depth sorter.
//!
//! - **[`engine`]: Shared Machinery.** Batch configuration, progress reporting and
//!   the engine-level error type.
//!
//! - **[`workflows`]: The Public API for bulk work.** The spin workflow that turns
//!   one molecule into a full set of rotated, sorted clones.
//!
//! Rendering, file formats and any host bindings are left to callers; this crate
//! only exposes the in-memory API they build on.

pub mod core;
pub mod engine;
pub mod workflows;
