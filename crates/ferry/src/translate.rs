//! Virtual index translation between the source and target models.
//!
//! Source symbols are keyed by author-assigned [`Id`]s and target shapes get
//! their ids from the target document only when they are created. The two
//! spaces are correlated through a dense [`VirtualIndex`]: the Nth addressable
//! element in the fixed traversal order (actors, objects, activation slots,
//! lifelines) has virtual index N on both sides.
//!
//! - [`SourceIndex`] maps native source ids to virtual indices. It is built
//!   once, from the full traversal, and never changes afterwards.
//! - [`TargetIndex`] maps virtual indices to target ids. It grows by one entry
//!   per addressable element added to the target, so its length doubles as
//!   the next free virtual index.
//!
//! Nothing at runtime checks that both sides walked the same order. That is
//! the caller's contract and is covered by the export tests.

use std::{collections::HashMap, fmt};

use ferry_core::identifier::Id;

use crate::FerryError;

/// Shared position of an addressable element in both models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VirtualIndex(usize);

impl VirtualIndex {
    /// Creates a virtual index from its position.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the position as a plain integer.
    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for VirtualIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for VirtualIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl TryFrom<i64> for VirtualIndex {
    type Error = FerryError;

    /// Converts an untyped index. A negative value can never resolve to a
    /// target element and is rejected as a reference error.
    fn try_from(index: i64) -> Result<Self, Self::Error> {
        usize::try_from(index)
            .map(Self)
            .map_err(|_| FerryError::Reference(format!("virtual index {index} is negative")))
    }
}

/// Reader-side table from native source ids to virtual indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceIndex {
    entries: HashMap<Id, VirtualIndex>,
}

impl SourceIndex {
    /// Numbers `ids` sequentially from zero in iteration order.
    ///
    /// The iterator must yield the addressable elements in virtual index
    /// order. A repeated id keeps its first index.
    pub fn build(ids: impl IntoIterator<Item = Id>) -> Self {
        let mut entries = HashMap::new();
        for id in ids {
            let next = VirtualIndex(entries.len());
            entries.entry(id).or_insert(next);
        }
        Self { entries }
    }

    /// Returns the virtual index of `id`, or `None` if it is not addressable.
    pub fn get(&self, id: Id) -> Option<VirtualIndex> {
        self.entries.get(&id).copied()
    }

    /// Number of addressable source elements.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Writer-side table from virtual indices to target native ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetIndex<T> {
    entries: Vec<T>,
}

impl<T> Default for TargetIndex<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: Copy> TargetIndex<T> {
    /// Creates an empty table; the first registration gets index 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `native` under the next unused virtual index and returns it.
    pub fn register(&mut self, native: T) -> VirtualIndex {
        let index = self.next_index();
        self.entries.push(native);
        index
    }

    /// Returns the target id registered for `index`, if any.
    pub fn resolve(&self, index: VirtualIndex) -> Option<T> {
        self.entries.get(index.0).copied()
    }

    /// The virtual index the next registration will receive.
    pub fn next_index(&self) -> VirtualIndex {
        VirtualIndex(self.entries.len())
    }

    /// Number of addressable elements registered so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forgets every registration and restarts numbering at zero.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_try_from_i64() {
        assert_eq!(VirtualIndex::try_from(0_i64).unwrap(), VirtualIndex::new(0));
        assert_eq!(VirtualIndex::try_from(7_i64).unwrap(), VirtualIndex::new(7));
    }

    #[test]
    fn test_negative_index_is_reference_error() {
        let err = VirtualIndex::try_from(-1_i64).unwrap_err();
        assert!(matches!(err, FerryError::Reference(_)), "{err:?}");
        assert!(err.to_string().contains("-1"), "{err}");
    }

    #[test]
    fn test_source_index_numbers_in_order() {
        let index = SourceIndex::build(["user", "admin", "svc"].map(Id::new));

        assert_eq!(index.len(), 3);
        assert_eq!(index.get(Id::new("user")), Some(VirtualIndex::new(0)));
        assert_eq!(index.get(Id::new("admin")), Some(VirtualIndex::new(1)));
        assert_eq!(index.get(Id::new("svc")), Some(VirtualIndex::new(2)));
        assert_eq!(index.get(Id::new("note")), None);
    }

    #[test]
    fn test_source_index_keeps_first_index_of_repeated_id() {
        let index = SourceIndex::build(["a", "b", "a"].map(Id::new));

        assert_eq!(index.len(), 2);
        assert_eq!(index.get(Id::new("a")), Some(VirtualIndex::new(0)));
        assert_eq!(index.get(Id::new("b")), Some(VirtualIndex::new(1)));
    }

    #[test]
    fn test_target_index_resolves_only_registered() {
        let mut index = TargetIndex::new();
        assert_eq!(index.resolve(VirtualIndex::new(0)), None);

        let first = index.register(101_u64);
        let second = index.register(205_u64);

        assert_eq!(first, VirtualIndex::new(0));
        assert_eq!(second, VirtualIndex::new(1));
        assert_eq!(index.resolve(first), Some(101));
        assert_eq!(index.resolve(second), Some(205));
        assert_eq!(index.resolve(VirtualIndex::new(2)), None);
    }

    #[test]
    fn test_target_index_clear_restarts_numbering() {
        let mut index = TargetIndex::new();
        index.register('a');
        index.register('b');

        index.clear();

        assert!(index.is_empty());
        assert_eq!(index.register('c'), VirtualIndex::new(0));
    }

    proptest! {
        #[test]
        fn prop_target_counter_equals_registrations(natives in prop::collection::vec(any::<u32>(), 0..64)) {
            let mut index = TargetIndex::new();
            for (k, native) in natives.iter().enumerate() {
                prop_assert_eq!(index.len(), k);
                prop_assert_eq!(index.next_index(), VirtualIndex::new(k));
                let assigned = index.register(*native);
                prop_assert_eq!(assigned, VirtualIndex::new(k));
            }
            prop_assert_eq!(index.len(), natives.len());
        }

        #[test]
        fn prop_source_index_is_dense(count in 0usize..64) {
            let ids: Vec<Id> = (0..count).map(|i| Id::new(&format!("prop_sym_{i}"))).collect();
            let index = SourceIndex::build(ids.iter().copied());

            prop_assert_eq!(index.len(), count);
            for (i, id) in ids.into_iter().enumerate() {
                prop_assert_eq!(index.get(id), Some(VirtualIndex::new(i)));
            }
        }
    }
}
