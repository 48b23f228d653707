//! Cursor-style iterators over a container's sorted sequence.
//!
//! This module provides three traversal orders over the same backing
//! sequence:
//!
//! - [`AscendingIterator`]: front to back in sorted order
//! - [`SideCrossIterator`]: smallest, largest, second smallest, second
//!   largest, ...
//! - [`PrimeIterator`]: front to back, skipping values that are not prime
//!
//! All three implement the [`Traversal`] capability trait. Each kind is a
//! distinct type with its own state; there is no shared mutable base.
//!
//! # Validity
//!
//! An iterator stores positions as plain indices together with the
//! [`Generation`] of the sequence at its last `begin()`/`end()`. Every
//! mutation of the container bumps the generation, after which
//! [`Traversal::dereference`] and [`Traversal::advance`] fail with
//! [`Error::StaleIterator`] until the iterator is re-seeded.
//!
//! # Examples
//!
//! ```rust
//! use triverse::{Container, Error, Traversal};
//!
//! let mut container: Container = [7, 2, 9, 2].into_iter().collect();
//!
//! let ascending = container.ascending_iterator();
//! ascending.begin();
//! assert_eq!(ascending.dereference(), Ok(2));
//!
//! container.add(5);
//! assert!(matches!(
//!     container.ascending_iterator().dereference(),
//!     Err(Error::StaleIterator { .. })
//! ));
//! ```

mod ascending;
mod prime;
mod side_cross;

pub use ascending::AscendingIterator;
pub use prime::{PrimeIterator, is_prime};
pub use side_cross::SideCrossIterator;

use std::cell::{Ref, RefCell};
use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::sequence::{Generation, SortedSequence};

/// Sequence storage shared between a container and the iterators bound to it.
pub(crate) type SharedSequence = Rc<RefCell<SortedSequence>>;

/// Identifies one of the three traversal orders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IteratorKind {
    /// Ascending traversal.
    Ascending,
    /// Side-crossing traversal.
    SideCross,
    /// Prime-filtered traversal.
    Prime,
}

impl fmt::Display for IteratorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ascending => "ascending",
            Self::SideCross => "side-cross",
            Self::Prime => "prime",
        };
        formatter.write_str(name)
    }
}

/// A slot in the sequence, or the past-the-end sentinel.
///
/// The derived ordering places every `At` before `PastEnd`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Position {
    At(usize),
    PastEnd,
}

/// Ties an iterator to its owning sequence and the generation it was last
/// seeded at.
#[derive(Clone)]
pub(crate) struct Binding {
    sequence: SharedSequence,
    generation: Generation,
}

impl Binding {
    pub(crate) fn new(sequence: &SharedSequence) -> Self {
        let generation = sequence.borrow().generation();
        Self {
            sequence: Rc::clone(sequence),
            generation,
        }
    }

    /// Captures the current generation and returns the sequence for seeding.
    pub(crate) fn reseed(&mut self, kind: IteratorKind) -> Ref<'_, SortedSequence> {
        let sequence = self.sequence.borrow();
        self.generation = sequence.generation();
        tracing::trace!(%kind, generation = %self.generation, "iterator reseeded");
        sequence
    }

    /// Returns the sequence if no mutation happened since the last reseed.
    pub(crate) fn fresh(&self, kind: IteratorKind) -> Result<Ref<'_, SortedSequence>> {
        let sequence = self.sequence.borrow();
        let current = sequence.generation();
        if current == self.generation {
            Ok(sequence)
        } else {
            tracing::debug!(
                %kind,
                captured = %self.generation,
                current = %current,
                "stale iterator used"
            );
            Err(Error::StaleIterator {
                captured: self.generation,
                current,
            })
        }
    }

    pub(crate) fn is_stale(&self) -> bool {
        self.sequence.borrow().generation() != self.generation
    }

    pub(crate) fn ensure_same_owner(&self, other: &Self) -> Result<()> {
        if Rc::ptr_eq(&self.sequence, &other.sequence) {
            Ok(())
        } else {
            Err(Error::IncompatibleIterators)
        }
    }

    /// Checks that both bindings share an owner and that neither is stale.
    pub(crate) fn ensure_comparable(&self, other: &Self, kind: IteratorKind) -> Result<()> {
        self.ensure_same_owner(other)?;
        drop(self.fresh(kind)?);
        drop(other.fresh(kind)?);
        Ok(())
    }

    pub(crate) const fn generation(&self) -> Generation {
        self.generation
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Binding")
            .field("owner", &Rc::as_ptr(&self.sequence))
            .field("generation", &self.generation().get())
            .finish()
    }
}

/// The capability interface shared by every iterator kind.
///
/// `begin()` and `end()` re-seed the iterator they are called on, so the
/// same instance can be reused for any number of traversals. Comparison and
/// assignment are only meaningful between iterators of the same kind bound
/// to the same container; across containers they fail with
/// [`Error::IncompatibleIterators`]. Comparing against an iterator seeded
/// before the last mutation fails with [`Error::StaleIterator`].
pub trait Traversal: Sized {
    /// The traversal order this type implements.
    const KIND: IteratorKind;

    /// Resets to the first valid position and binds to the current generation.
    fn begin(&mut self) -> &mut Self;

    /// Resets to the past-the-end sentinel and binds to the current generation.
    ///
    /// The sentinel is only meant for comparison; dereferencing it fails.
    fn end(&mut self) -> &mut Self;

    /// Returns the element at the current position.
    ///
    /// # Errors
    ///
    /// - [`Error::StaleIterator`] if the container changed since the last
    ///   `begin()`/`end()`.
    /// - [`Error::OutOfRange`] if the traversal is exhausted.
    fn dereference(&self) -> Result<i32>;

    /// Moves to the next position of this traversal order.
    ///
    /// # Errors
    ///
    /// - [`Error::StaleIterator`] if the container changed since the last
    ///   `begin()`/`end()`.
    /// - [`Error::OutOfRange`] if the traversal is already exhausted.
    fn advance(&mut self) -> Result<&mut Self>;

    /// Returns `true` if the container was mutated since the last
    /// `begin()`/`end()`.
    fn is_stale(&self) -> bool;

    /// Returns `true` if no element remains to be visited.
    ///
    /// The answer describes the captured state and is meaningless while the
    /// iterator is stale.
    fn is_exhausted(&self) -> bool;

    /// Compares traversal progress with another iterator of the same kind.
    ///
    /// # Errors
    ///
    /// - [`Error::IncompatibleIterators`] if `other` belongs to a different
    ///   container.
    /// - [`Error::StaleIterator`] if either iterator was seeded before the
    ///   last mutation of the container.
    fn compare(&self, other: &Self) -> Result<Ordering>;

    /// Copies the cursor state of `other` into `self`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompatibleIterators`] if `other` belongs to a
    /// different container; `self` is left unchanged in that case.
    fn assign_from(&mut self, other: &Self) -> Result<()>;

    /// Returns `true` if both iterators denote the same traversal progress.
    ///
    /// # Errors
    ///
    /// [`Error::IncompatibleIterators`] across containers,
    /// [`Error::StaleIterator`] if either side is stale.
    fn equals(&self, other: &Self) -> Result<bool> {
        self.compare(other).map(Ordering::is_eq)
    }

    /// Returns `true` if `self` is behind `other`.
    ///
    /// # Errors
    ///
    /// [`Error::IncompatibleIterators`] across containers,
    /// [`Error::StaleIterator`] if either side is stale.
    fn less_than(&self, other: &Self) -> Result<bool> {
        self.compare(other).map(Ordering::is_lt)
    }

    /// Returns `true` if `self` is ahead of `other`.
    ///
    /// # Errors
    ///
    /// [`Error::IncompatibleIterators`] across containers,
    /// [`Error::StaleIterator`] if either side is stale.
    fn greater_than(&self, other: &Self) -> Result<bool> {
        other.less_than(self)
    }

    /// Adapts the remaining traversal into a standard [`Iterator`].
    ///
    /// Each item is the dereferenced element, after which the iterator is
    /// advanced. The adapter stops after the first error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use triverse::{Container, Traversal};
    ///
    /// let mut container: Container = [4, 3, 5, 1].into_iter().collect();
    /// let primes: Vec<i32> = container
    ///     .prime_iterator()
    ///     .begin()
    ///     .walk()
    ///     .collect::<Result<_, _>>()
    ///     .unwrap();
    /// assert_eq!(primes, vec![3, 5]);
    /// ```
    fn walk(&mut self) -> Walk<'_, Self> {
        Walk {
            traversal: self,
            finished: false,
        }
    }
}

/// Standard iterator adapter returned by [`Traversal::walk`].
#[derive(Debug)]
pub struct Walk<'a, T: Traversal> {
    traversal: &'a mut T,
    finished: bool,
}

impl<T: Traversal> Iterator for Walk<'_, T> {
    type Item = Result<i32>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if !self.traversal.is_stale() && self.traversal.is_exhausted() {
            self.finished = true;
            return None;
        }
        let step = self.traversal.dereference().and_then(|value| {
            self.traversal.advance()?;
            Ok(value)
        });
        if step.is_err() {
            self.finished = true;
        }
        Some(step)
    }
}

impl<T: Traversal> FusedIterator for Walk<'_, T> {}

/// Implements `PartialEq` and `PartialOrd` in terms of [`Traversal`].
///
/// Iterators from different containers, or stale ones, are never equal and
/// unordered.
macro_rules! impl_std_comparisons {
    ($($iterator:ty),+ $(,)?) => {
        $(
            impl PartialEq for $iterator {
                fn eq(&self, other: &Self) -> bool {
                    matches!(self.equals(other), Ok(true))
                }
            }

            impl PartialOrd for $iterator {
                fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                    self.compare(other).ok()
                }
            }
        )+
    };
}

impl_std_comparisons!(AscendingIterator, SideCrossIterator, PrimeIterator);

static_assertions::assert_not_impl_any!(AscendingIterator: Send, Sync);
static_assertions::assert_not_impl_any!(SideCrossIterator: Send, Sync);
static_assertions::assert_not_impl_any!(PrimeIterator: Send, Sync);
