//! Front-to-back traversal in sorted order.

use std::cmp::Ordering;

use super::{Binding, IteratorKind, Position, SharedSequence, Traversal};
use crate::error::{Error, Result};

/// Walks the container from its smallest to its largest element.
///
/// Duplicates are visited in the order they were inserted. The state is a
/// single [`Position`]: a slot index, or the past-the-end sentinel.
///
/// # Examples
///
/// ```rust
/// use triverse::{Container, Traversal};
///
/// let mut container: Container = [7, 2, 9, 2].into_iter().collect();
///
/// let mut end = container.ascending_iterator().clone();
/// end.end();
///
/// let iterator = container.ascending_iterator();
/// iterator.begin();
/// let mut visited = Vec::new();
/// while *iterator != end {
///     visited.push(iterator.dereference().unwrap());
///     iterator.advance().unwrap();
/// }
/// assert_eq!(visited, vec![2, 2, 7, 9]);
/// ```
#[derive(Clone, Debug)]
pub struct AscendingIterator {
    binding: Binding,
    position: Position,
}

impl AscendingIterator {
    pub(crate) fn new(sequence: &SharedSequence) -> Self {
        let mut iterator = Self {
            binding: Binding::new(sequence),
            position: Position::PastEnd,
        };
        iterator.begin();
        iterator
    }
}

impl Traversal for AscendingIterator {
    const KIND: IteratorKind = IteratorKind::Ascending;

    fn begin(&mut self) -> &mut Self {
        let sequence = self.binding.reseed(Self::KIND);
        self.position = if sequence.is_empty() {
            Position::PastEnd
        } else {
            Position::At(0)
        };
        drop(sequence);
        self
    }

    fn end(&mut self) -> &mut Self {
        drop(self.binding.reseed(Self::KIND));
        self.position = Position::PastEnd;
        self
    }

    fn dereference(&self) -> Result<i32> {
        let sequence = self.binding.fresh(Self::KIND)?;
        match self.position {
            Position::At(index) => sequence
                .get(index)
                .ok_or(Error::OutOfRange { kind: Self::KIND }),
            Position::PastEnd => Err(Error::OutOfRange { kind: Self::KIND }),
        }
    }

    fn advance(&mut self) -> Result<&mut Self> {
        let sequence = self.binding.fresh(Self::KIND)?;
        let Position::At(index) = self.position else {
            return Err(Error::OutOfRange { kind: Self::KIND });
        };
        let next = index + 1;
        let position = if next < sequence.len() {
            Position::At(next)
        } else {
            Position::PastEnd
        };
        drop(sequence);
        self.position = position;
        Ok(self)
    }

    fn is_stale(&self) -> bool {
        self.binding.is_stale()
    }

    fn is_exhausted(&self) -> bool {
        self.position == Position::PastEnd
    }

    fn compare(&self, other: &Self) -> Result<Ordering> {
        self.binding.ensure_comparable(&other.binding, Self::KIND)?;
        Ok(self.position.cmp(&other.position))
    }

    fn assign_from(&mut self, other: &Self) -> Result<()> {
        self.binding.ensure_same_owner(&other.binding)?;
        self.clone_from(other);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::SortedSequence;
    use rstest::rstest;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn shared(values: &[i32]) -> SharedSequence {
        Rc::new(RefCell::new(values.iter().copied().collect::<SortedSequence>()))
    }

    #[rstest]
    fn test_new_starts_at_first_element() {
        let sequence = shared(&[3, 1]);
        let iterator = AscendingIterator::new(&sequence);
        assert_eq!(iterator.dereference(), Ok(1));
    }

    #[rstest]
    fn test_new_on_empty_sequence_is_past_end() {
        let sequence = shared(&[]);
        let iterator = AscendingIterator::new(&sequence);
        assert!(iterator.is_exhausted());
        assert_eq!(
            iterator.dereference(),
            Err(Error::OutOfRange {
                kind: IteratorKind::Ascending
            })
        );
    }

    #[rstest]
    fn test_advance_past_end_fails() {
        let sequence = shared(&[5]);
        let mut iterator = AscendingIterator::new(&sequence);
        iterator.advance().unwrap();
        assert!(iterator.is_exhausted());
        assert!(matches!(
            iterator.advance(),
            Err(Error::OutOfRange {
                kind: IteratorKind::Ascending
            })
        ));
    }

    #[rstest]
    fn test_staleness_is_checked_before_range() {
        let sequence = shared(&[]);
        let mut iterator = AscendingIterator::new(&sequence);
        sequence.borrow_mut().insert(1);
        assert!(matches!(
            iterator.advance(),
            Err(Error::StaleIterator { .. })
        ));
    }
}
