use super::atom::Atom;
use super::bond::Bond;
use super::error::{MoleculeError, StoreKind};
use crate::core::sorting::{Depth, sorter};
use tracing::{trace, warn};

/// Growable, index-addressable storage plus a reorderable view over it.
///
/// Elements are identified by their position in the backing storage, which
/// never changes once assigned. The view is a separate list of those positions
/// that depth sorting permutes; the backing storage itself is never reordered.
///
/// Capacity follows the geometric schedule 0 -> 1 -> 2 -> 4 -> ...; whenever it
/// grows, the view is re-synchronized to identity order (`view[i] == i`).
#[derive(Debug, Clone)]
pub struct DepthStore<T> {
    kind: StoreKind,
    items: Vec<T>,
    view: Vec<usize>,
    capacity: usize,
}

pub type AtomStore = DepthStore<Atom>;
pub type BondStore = DepthStore<Bond>;

impl<T> DepthStore<T> {
    pub fn new(kind: StoreKind) -> Self {
        Self {
            kind,
            items: Vec::new(),
            view: Vec::new(),
            capacity: 0,
        }
    }

    /// Creates an empty store with room for `capacity` elements.
    ///
    /// # Errors
    ///
    /// Returns [`MoleculeError::AllocationFailure`] if the storage cannot be reserved.
    pub fn with_capacity(kind: StoreKind, capacity: usize) -> Result<Self, MoleculeError> {
        let mut store = Self::new(kind);
        if capacity > 0 {
            store.grow_to(capacity)?;
        }
        Ok(store)
    }

    pub fn kind(&self) -> StoreKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Logical capacity, as tracked by the growth schedule.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Elements in storage (append) order.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }

    /// Storage indices in current view order.
    pub fn view(&self) -> &[usize] {
        &self.view
    }

    /// Elements in current view order.
    pub fn iter_view(&self) -> impl Iterator<Item = &T> + '_ {
        self.view.iter().map(move |&index| &self.items[index])
    }

    /// Appends `item` and returns its stable index.
    ///
    /// # Errors
    ///
    /// Returns [`MoleculeError::AllocationFailure`] if growth fails; the store
    /// is left unchanged in that case.
    pub fn push(&mut self, item: T) -> Result<usize, MoleculeError> {
        if self.items.len() >= self.capacity {
            let requested = next_capacity(self.capacity)
                .ok_or_else(|| self.allocation_failure(usize::MAX))?;
            self.grow_to(requested)?;
        }

        let index = self.items.len();
        self.items.push(item);
        self.view.push(index);
        Ok(index)
    }

    fn grow_to(&mut self, requested: usize) -> Result<(), MoleculeError> {
        let additional = requested - self.items.len();
        self.items
            .try_reserve_exact(additional)
            .map_err(|_| self.allocation_failure(requested))?;
        self.view
            .try_reserve_exact(requested - self.view.len())
            .map_err(|_| self.allocation_failure(requested))?;

        trace!(
            store = %self.kind,
            from = self.capacity,
            to = requested,
            "Storage grew; view re-synchronized to storage order."
        );
        self.capacity = requested;
        self.view.clear();
        self.view.extend(0..self.items.len());
        Ok(())
    }

    fn allocation_failure(&self, requested: usize) -> MoleculeError {
        warn!(
            store = %self.kind,
            capacity = self.capacity,
            requested,
            "Storage growth failed; append aborted."
        );
        MoleculeError::AllocationFailure {
            store: self.kind,
            requested,
        }
    }
}

/// Capacity after one growth step: 0 -> 1, otherwise doubled. `None` on overflow.
fn next_capacity(current: usize) -> Option<usize> {
    match current {
        0 => Some(1),
        current => current.checked_mul(2),
    }
}

impl<T: Depth> DepthStore<T> {
    /// Reorders the view into ascending depth. Storage order is untouched.
    pub fn sort_by_depth(&mut self) {
        sorter::sort_view_by_depth(&mut self.view, &self.items);
    }
}

impl BondStore {
    /// Appends a bond between atoms `a1` and `a2` of `atoms`.
    ///
    /// The atom storage is passed on every call and the bond's geometry is
    /// derived from it immediately, so a bond never observes a stale copy of
    /// its endpoints.
    ///
    /// # Errors
    ///
    /// - [`MoleculeError::InvalidIndex`] if either index is not a current atom.
    /// - [`MoleculeError::AllocationFailure`] if the bond storage cannot grow.
    pub fn append_bond(
        &mut self,
        atoms: &AtomStore,
        a1: usize,
        a2: usize,
        epairs: u8,
    ) -> Result<usize, MoleculeError> {
        let count = atoms.len();
        if let Some(&index) = [a1, a2].iter().find(|&&index| index >= count) {
            return Err(MoleculeError::InvalidIndex { index, count });
        }
        self.push(Bond::resolve(a1, a2, epairs, atoms.as_slice()))
    }

    /// Re-derives every bond's geometry from the current atom positions.
    pub fn refresh_geometry(&mut self, atoms: &AtomStore) {
        for bond in &mut self.items {
            bond.refresh(atoms.as_slice());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;

    fn atom(element: &str, x: f64, y: f64, z: f64) -> Atom {
        Atom::from_coords(element, x, y, z).unwrap()
    }

    #[test]
    fn capacity_follows_doubling_schedule() {
        let mut store = AtomStore::new(StoreKind::Atoms);
        let mut observed = vec![store.capacity()];
        for i in 0..9 {
            store.push(atom("C", i as f64, 0.0, 0.0)).unwrap();
            observed.push(store.capacity());
        }
        assert_eq!(observed, vec![0, 1, 2, 4, 4, 8, 8, 8, 8, 16]);
    }

    #[test]
    fn push_returns_sequential_indices_and_preserves_content() {
        let mut store = AtomStore::new(StoreKind::Atoms);
        for i in 0..20 {
            let index = store.push(atom("N", i as f64, -(i as f64), 0.5)).unwrap();
            assert_eq!(index, i);
        }
        assert_eq!(store.len(), 20);
        for i in 0..20 {
            let stored = store.get(i).unwrap();
            assert_eq!(stored.x(), i as f64);
            assert_eq!(stored.y(), -(i as f64));
        }
        assert!(store.get(20).is_none());
    }

    #[test]
    fn next_capacity_doubles_and_reports_overflow() {
        assert_eq!(next_capacity(0), Some(1));
        assert_eq!(next_capacity(1), Some(2));
        assert_eq!(next_capacity(48), Some(96));
        assert_eq!(next_capacity(usize::MAX / 2), Some(usize::MAX - 1));
        assert_eq!(next_capacity(usize::MAX / 2 + 1), None);
    }

    #[test]
    fn failed_growth_leaves_store_unchanged() {
        let mut store = AtomStore::new(StoreKind::Atoms);
        for z in [1.0, -1.0] {
            store.push(atom("C", 0.0, 0.0, z)).unwrap();
        }
        store.sort_by_depth();
        let items_before = store.as_slice().to_vec();

        let err = store.grow_to(usize::MAX).unwrap_err();

        assert_eq!(
            err,
            MoleculeError::AllocationFailure {
                store: StoreKind::Atoms,
                requested: usize::MAX,
            }
        );
        assert_eq!(store.as_slice(), items_before.as_slice());
        assert_eq!(store.capacity(), 2);
        assert_eq!(store.view(), &[1, 0]);

        assert_eq!(store.push(atom("O", 0.0, 0.0, 0.0)).unwrap(), 2);
        assert_eq!(store.capacity(), 4);
    }

    #[test]
    fn with_capacity_honours_hint_before_doubling() {
        let mut store = AtomStore::with_capacity(StoreKind::Atoms, 3).unwrap();
        assert_eq!(store.capacity(), 3);
        for _ in 0..3 {
            store.push(atom("H", 0.0, 0.0, 0.0)).unwrap();
        }
        assert_eq!(store.capacity(), 3);
        store.push(atom("H", 0.0, 0.0, 0.0)).unwrap();
        assert_eq!(store.capacity(), 6);
    }

    #[test]
    fn huge_capacity_hint_reports_allocation_failure() {
        let result = AtomStore::with_capacity(StoreKind::Atoms, usize::MAX);
        assert_eq!(
            result.unwrap_err(),
            MoleculeError::AllocationFailure {
                store: StoreKind::Atoms,
                requested: usize::MAX,
            }
        );
    }

    #[test]
    fn sorting_reorders_view_only() {
        let mut store = AtomStore::new(StoreKind::Atoms);
        for z in [2.0, -1.0, 0.5] {
            store.push(atom("C", 0.0, 0.0, z)).unwrap();
        }
        store.sort_by_depth();

        assert_eq!(store.view(), &[1, 2, 0]);
        let depths: Vec<f64> = store.iter_view().map(|a| a.z()).collect();
        assert_eq!(depths, vec![-1.0, 0.5, 2.0]);
        let storage: Vec<f64> = store.as_slice().iter().map(|a| a.z()).collect();
        assert_eq!(storage, vec![2.0, -1.0, 0.5]);
    }

    #[test]
    fn append_without_growth_keeps_sorted_prefix() {
        let mut store = AtomStore::with_capacity(StoreKind::Atoms, 4).unwrap();
        store.push(atom("C", 0.0, 0.0, 1.0)).unwrap();
        store.push(atom("C", 0.0, 0.0, 0.0)).unwrap();
        store.sort_by_depth();
        store.push(atom("C", 0.0, 0.0, -1.0)).unwrap();

        assert_eq!(store.view(), &[1, 0, 2]);
    }

    #[test]
    fn growth_resets_view_to_storage_order() {
        let mut store = AtomStore::new(StoreKind::Atoms);
        store.push(atom("C", 0.0, 0.0, 1.0)).unwrap();
        store.push(atom("C", 0.0, 0.0, 0.0)).unwrap();
        store.sort_by_depth();
        assert_eq!(store.view(), &[1, 0]);

        store.push(atom("C", 0.0, 0.0, -1.0)).unwrap();

        assert_eq!(store.view(), &[0, 1, 2]);
    }

    #[test]
    fn append_bond_rejects_out_of_range_atoms_without_mutation() {
        let mut atoms = AtomStore::new(StoreKind::Atoms);
        atoms.push(atom("C", 0.0, 0.0, 0.0)).unwrap();
        atoms.push(atom("O", 1.0, 0.0, 0.0)).unwrap();
        let mut bonds = BondStore::new(StoreKind::Bonds);

        let err = bonds.append_bond(&atoms, 0, 2, 1).unwrap_err();

        assert_eq!(err, MoleculeError::InvalidIndex { index: 2, count: 2 });
        assert!(bonds.is_empty());
        assert_eq!(bonds.capacity(), 0);
    }

    #[test]
    fn append_bond_reads_atoms_after_atom_storage_relocates() {
        let mut atoms = AtomStore::new(StoreKind::Atoms);
        let mut bonds = BondStore::new(StoreKind::Bonds);
        atoms.push(atom("C", 0.0, 0.0, 0.0)).unwrap();
        atoms.push(atom("C", 1.0, 0.0, 0.0)).unwrap();
        bonds.append_bond(&atoms, 0, 1, 1).unwrap();

        for i in 2..40 {
            atoms.push(atom("C", i as f64, 0.0, 0.0)).unwrap();
        }
        let index = bonds.append_bond(&atoms, 0, 39, 1).unwrap();

        assert_eq!(index, 1);
        assert!((bonds.get(1).unwrap().length() - 39.0).abs() < 1e-9);
        assert!((bonds.get(0).unwrap().length() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn growth_is_traced() {
        let log_file = tempfile::NamedTempFile::new().unwrap();
        let writer = Mutex::new(log_file.reopen().unwrap());
        let subscriber = tracing_subscriber::fmt()
            .with_writer(writer)
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut store = AtomStore::new(StoreKind::Atoms);
            store.push(atom("C", 0.0, 0.0, 0.0)).unwrap();
        });

        let content = fs::read_to_string(log_file.path()).unwrap();
        assert!(content.contains("Storage grew"));
        assert!(content.contains("store=atoms"));
    }
}
