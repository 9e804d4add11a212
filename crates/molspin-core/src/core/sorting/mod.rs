//! Depth ordering for back-to-front rendering.
//!
//! Atoms and bonds are never moved; only the index views that expose them are
//! reordered. See [`sorter`] for the comparator and the sort itself.

pub mod sorter;

/// Anything with a viewing-axis depth that can be ordered back-to-front.
pub trait Depth {
    fn depth(&self) -> f64;
}
