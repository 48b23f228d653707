//! The container that owns the sorted sequence and its three iterators.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::Result;
use crate::iterator::{AscendingIterator, PrimeIterator, SharedSequence, SideCrossIterator};
use crate::sequence::{Generation, SortedSequence};

/// Generates the accessors for the iterator instances embedded in
/// [`Container`].
macro_rules! embedded_iterators {
    ($($field:ident: $iterator:ident),+ $(,)?) => {
        paste::paste! {
            impl Container {
                $(
                    #[doc = "Returns the `" $iterator "` embedded in this container."]
                    ///
                    /// The same instance is returned on every call. After `add` or a
                    /// successful `remove` it is stale: call `begin()` or `end()`
                    /// before dereferencing or advancing it again.
                    #[inline]
                    pub fn [<$field _iterator>](&mut self) -> &mut $iterator {
                        &mut self.$field
                    }
                )+
            }
        }
    };
}

/// A sorted integer container with three built-in traversal orders.
///
/// The container owns one long-lived instance of each iterator kind. Those
/// instances (and any clones of them) are invalidated by every successful
/// mutation; using one afterwards without `begin()`/`end()` fails with
/// [`Error::StaleIterator`](crate::Error::StaleIterator).
///
/// A container is a unique owner and is deliberately not `Clone`. It is not
/// `Send` or `Sync` either; it is meant for single-threaded, sequential use.
///
/// # Examples
///
/// ```rust
/// use triverse::{Container, Error, Traversal};
///
/// let mut container = Container::new();
/// for value in [7, 2, 9, 2] {
///     container.add(value);
/// }
/// assert_eq!(container.elements(), vec![2, 2, 7, 9]);
///
/// container.remove(2).unwrap();
/// assert_eq!(container.elements(), vec![2, 7, 9]);
/// assert_eq!(container.remove(5), Err(Error::NotFound { value: 5 }));
///
/// let iterator = container.side_cross_iterator();
/// iterator.begin();
/// assert_eq!(iterator.dereference(), Ok(2));
/// iterator.advance().unwrap();
/// assert_eq!(iterator.dereference(), Ok(9));
/// ```
pub struct Container {
    sequence: SharedSequence,
    ascending: AscendingIterator,
    side_cross: SideCrossIterator,
    prime: PrimeIterator,
}

impl Container {
    /// Creates an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self::from_sequence(SortedSequence::new())
    }

    fn from_sequence(sequence: SortedSequence) -> Self {
        let sequence = Rc::new(RefCell::new(sequence));
        Self {
            ascending: AscendingIterator::new(&sequence),
            side_cross: SideCrossIterator::new(&sequence),
            prime: PrimeIterator::new(&sequence),
            sequence,
        }
    }

    /// Inserts `value` in sorted position.
    ///
    /// Always succeeds. Every iterator bound to this container becomes stale.
    pub fn add(&mut self, value: i32) {
        let mut sequence = self.sequence.borrow_mut();
        sequence.insert(value);
        tracing::debug!(
            value,
            len = sequence.len(),
            generation = %sequence.generation(),
            "element added"
        );
    }

    /// Removes one occurrence of `value`.
    ///
    /// On success every iterator bound to this container becomes stale.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`](crate::Error::NotFound) if `value` is not
    /// present. Nothing changes in that case and iterators stay valid.
    pub fn remove(&mut self, value: i32) -> Result<()> {
        let mut sequence = self.sequence.borrow_mut();
        match sequence.remove(value) {
            Ok(()) => {
                tracing::debug!(
                    value,
                    len = sequence.len(),
                    generation = %sequence.generation(),
                    "element removed"
                );
                Ok(())
            }
            Err(error) => {
                tracing::debug!(value, "remove target not found");
                Err(error)
            }
        }
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.borrow().len()
    }

    /// Returns `true` if the container holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.borrow().is_empty()
    }

    /// Returns `true` if at least one element equals `value`.
    #[must_use]
    pub fn contains(&self, value: i32) -> bool {
        self.sequence.borrow().contains(value)
    }

    /// Returns a snapshot of the elements in ascending order.
    #[must_use]
    pub fn elements(&self) -> Vec<i32> {
        self.sequence.borrow().snapshot()
    }

    /// Returns the current generation; it changes on every successful
    /// mutation.
    #[must_use]
    pub fn generation(&self) -> Generation {
        self.sequence.borrow().generation()
    }
}

embedded_iterators! {
    ascending: AscendingIterator,
    side_cross: SideCrossIterator,
    prime: PrimeIterator,
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<i32> for Container {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        Self::from_sequence(iter.into_iter().collect())
    }
}

impl Extend<i32> for Container {
    fn extend<I: IntoIterator<Item = i32>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Container")
            .field("sequence", &*self.sequence.borrow())
            .finish_non_exhaustive()
    }
}

static_assertions::assert_not_impl_any!(Container: Clone, Send, Sync);

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for Container {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&*self.sequence.borrow(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Container {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        <SortedSequence as serde::Deserialize>::deserialize(deserializer).map(Self::from_sequence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::iterator::Traversal;
    use rstest::rstest;

    #[rstest]
    fn test_new_container_iterators_start_exhausted() {
        let mut container = Container::new();
        assert!(container.ascending_iterator().is_exhausted());
        assert!(container.side_cross_iterator().is_exhausted());
        assert!(container.prime_iterator().is_exhausted());
    }

    #[rstest]
    fn test_from_iter_iterators_are_fresh() {
        let mut container: Container = [3, 1, 2].into_iter().collect();
        assert_eq!(container.ascending_iterator().dereference(), Ok(1));
        assert_eq!(container.side_cross_iterator().dereference(), Ok(1));
        assert_eq!(container.prime_iterator().dereference(), Ok(2));
    }

    #[rstest]
    fn test_add_invalidates_all_embedded_iterators() {
        let mut container: Container = [1].into_iter().collect();
        container.add(2);
        assert!(container.ascending_iterator().is_stale());
        assert!(container.side_cross_iterator().is_stale());
        assert!(container.prime_iterator().is_stale());
    }

    #[rstest]
    fn test_failed_remove_keeps_iterators_valid() {
        let mut container: Container = [1, 2].into_iter().collect();
        assert_eq!(container.remove(7), Err(Error::NotFound { value: 7 }));
        assert!(!container.ascending_iterator().is_stale());
        assert_eq!(container.ascending_iterator().dereference(), Ok(1));
    }

    #[rstest]
    fn test_extend_counts_as_mutation() {
        let mut container = Container::new();
        let before = container.generation();
        container.extend([5, 4]);
        assert_eq!(container.elements(), vec![4, 5]);
        assert!(container.generation() > before);
    }

    #[rstest]
    fn test_debug_shows_elements() {
        let container: Container = [2, 1].into_iter().collect();
        let rendered = format!("{container:?}");
        assert!(rendered.starts_with("Container"));
        assert!(rendered.contains("[1, 2]"));
    }
}
