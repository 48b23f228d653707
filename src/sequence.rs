//! The always-sorted backing sequence.
//!
//! [`SortedSequence`] stores signed integers in non-decreasing order and keeps
//! duplicates in insertion-stable order. Every structural mutation bumps a
//! [`Generation`] counter, which iterators capture to detect that the
//! positions they hold no longer describe the sequence.
//!
//! # Time Complexity
//!
//! | Operation    | Complexity |
//! |--------------|------------|
//! | `insert`     | O(n)       |
//! | `remove`     | O(n)       |
//! | `contains`   | O(log n)   |
//! | `count`      | O(log n)   |
//! | `get`        | O(1)       |
//! | `len`        | O(1)       |
//! | `snapshot`   | O(n)       |
//!
//! Small sequences (up to 8 elements) live inline without a heap allocation.
//!
//! # Examples
//!
//! ```rust
//! use triverse::SortedSequence;
//!
//! let mut sequence = SortedSequence::new();
//! sequence.insert(7);
//! sequence.insert(2);
//! sequence.insert(9);
//! sequence.insert(2);
//!
//! assert_eq!(sequence.snapshot(), vec![2, 2, 7, 9]);
//!
//! sequence.remove(2).unwrap();
//! assert_eq!(sequence.snapshot(), vec![2, 7, 9]);
//! ```

use smallvec::SmallVec;
use std::fmt;

use crate::error::{Error, Result};

/// Number of elements stored inline before spilling to the heap.
const INLINE_CAPACITY: usize = 8;

const SORTED_INVARIANT_PANIC_MESSAGE: &str = "SortedSequence must stay non-decreasing";

/// Mutation counter of a [`SortedSequence`].
///
/// Starts at zero and is incremented by every successful `insert` or
/// `remove`. The counter wraps to zero after `u64::MAX`; short of 2^64
/// mutations it never decreases, so two equal generations of the same
/// sequence describe identical contents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    /// Creates a generation with the given raw counter value.
    #[inline]
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw counter value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    #[inline]
    const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// A dynamically sized, always-sorted collection of `i32`.
///
/// Ordering is ascending with duplicates allowed; equal elements keep the
/// order in which they were inserted.
///
/// Equality compares contents only; two sequences holding the same elements
/// are equal regardless of how many mutations produced them.
#[derive(Clone, Default)]
pub struct SortedSequence {
    elements: SmallVec<[i32; INLINE_CAPACITY]>,
    generation: Generation,
}

impl SortedSequence {
    /// Creates a new empty sequence at generation zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use triverse::SortedSequence;
    ///
    /// let sequence = SortedSequence::new();
    /// assert!(sequence.is_empty());
    /// assert_eq!(sequence.generation().get(), 0);
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            elements: SmallVec::new(),
            generation: Generation::default(),
        }
    }

    /// Inserts `value` after every existing element that is `<= value`.
    ///
    /// Always succeeds and invalidates every position into the sequence.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use triverse::SortedSequence;
    ///
    /// let mut sequence = SortedSequence::new();
    /// sequence.insert(5);
    /// sequence.insert(1);
    /// assert_eq!(sequence.as_slice(), &[1, 5]);
    /// ```
    pub fn insert(&mut self, value: i32) {
        let position = self.elements.partition_point(|element| *element <= value);
        self.elements.insert(position, value);
        self.generation = self.generation.next();

        debug_assert!(
            is_non_decreasing(&self.elements),
            "{}",
            SORTED_INVARIANT_PANIC_MESSAGE
        );
    }

    /// Removes the first occurrence of `value`.
    ///
    /// Exactly one element is removed even when `value` is duplicated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no element equals `value`. The sequence
    /// and its generation are left untouched in that case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use triverse::{Error, SortedSequence};
    ///
    /// let mut sequence: SortedSequence = [2, 2, 7].into_iter().collect();
    /// sequence.remove(2).unwrap();
    /// assert_eq!(sequence.as_slice(), &[2, 7]);
    /// assert_eq!(sequence.remove(5), Err(Error::NotFound { value: 5 }));
    /// ```
    pub fn remove(&mut self, value: i32) -> Result<()> {
        let position = self.elements.partition_point(|element| *element < value);
        if self.elements.get(position) != Some(&value) {
            return Err(Error::NotFound { value });
        }
        self.elements.remove(position);
        self.generation = self.generation.next();
        Ok(())
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the sequence holds no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the element at `index`, if any.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<i32> {
        self.elements.get(index).copied()
    }

    /// Returns `true` if at least one element equals `value`.
    #[must_use]
    pub fn contains(&self, value: i32) -> bool {
        self.elements.binary_search(&value).is_ok()
    }

    /// Returns how many elements equal `value`.
    #[must_use]
    pub fn count(&self, value: i32) -> usize {
        let lower = self.elements.partition_point(|element| *element < value);
        let upper = self.elements.partition_point(|element| *element <= value);
        upper - lower
    }

    /// Returns the current mutation counter.
    #[inline]
    #[must_use]
    pub const fn generation(&self) -> Generation {
        self.generation
    }

    /// Returns the elements as a sorted slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[i32] {
        &self.elements
    }

    /// Returns an owned copy of the current contents in ascending order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<i32> {
        self.elements.to_vec()
    }
}

fn is_non_decreasing(elements: &[i32]) -> bool {
    elements.windows(2).all(|pair| pair[0] <= pair[1])
}

impl PartialEq for SortedSequence {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl Eq for SortedSequence {}

impl FromIterator<i32> for SortedSequence {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        let mut sequence = Self::new();
        sequence.extend(iter);
        sequence
    }
}

impl Extend<i32> for SortedSequence {
    fn extend<I: IntoIterator<Item = i32>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl fmt::Debug for SortedSequence {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SortedSequence")
            .field("elements", &self.elements.as_slice())
            .field("generation", &self.generation.get())
            .finish()
    }
}

impl fmt::Display for SortedSequence {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "[")?;
        let mut first = true;
        for element in &self.elements {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "]")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for SortedSequence {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in &self.elements {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
struct SortedSequenceVisitor;

#[cfg(feature = "serde")]
impl<'de> serde::de::Visitor<'de> for SortedSequenceVisitor {
    type Value = SortedSequence;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence of integers")
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        const MAX_PREALLOCATE: usize = 4096;
        let capacity = seq.size_hint().unwrap_or(0).min(MAX_PREALLOCATE);
        let mut elements: SmallVec<[i32; INLINE_CAPACITY]> = SmallVec::with_capacity(capacity);
        while let Some(element) = seq.next_element()? {
            elements.push(element);
        }
        elements.sort_unstable();
        Ok(SortedSequence {
            elements,
            generation: Generation::default(),
        })
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for SortedSequence {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(SortedSequenceVisitor)
    }
}
