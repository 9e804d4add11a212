//! # Workflows Module
//!
//! High-level entry points that drive the [`crate::core`] operations in bulk.
//!
//! - **Spin Workflow** ([`spin`]) - Generates a batch of independently rotated and
//!   depth-sorted clones of a molecule about each coordinate axis, for stepwise
//!   rotation playback.

pub mod spin;
