//! Alternating smallest/largest traversal.
//!
//! # State Machine
//!
//! The iterator keeps a half-open window `[low, high)` of slots that have
//! not been visited yet, plus a flag selecting which end is current:
//!
//! ```text
//!   begin:  [ 2   2   7   9 ]   low = 0, high = 4, from_low   -> 2
//!   +1:     .[ 2   7   9 ]      low = 1, high = 4, from_high  -> 9
//!   +2:     .[ 2   7 ].         low = 1, high = 3, from_low   -> 2
//!   +3:     . .[ 7 ].           low = 2, high = 3, from_high  -> 7
//!   +4:     . . [] .            low = 2, high = 2  (exhausted == end)
//! ```
//!
//! Consuming an element always shrinks the window by one slot, so when both
//! ends meet on the middle element of an odd-sized sequence that element is
//! emitted once and the next `advance()` empties the window. A sequence of
//! length `n` therefore yields exactly `n` elements.

use std::cmp::Ordering;

use super::{Binding, IteratorKind, SharedSequence, Traversal};
use crate::error::{Error, Result};

/// Alternates between the smallest and the largest element not yet visited.
///
/// Visiting order for a sequence of length `n` is slot `0`, slot `n - 1`,
/// slot `1`, slot `n - 2`, and so on. Two side-cross iterators of the same
/// container are equal when they have taken the same number of steps, which
/// lets a traversal reach [`Traversal::end`] regardless of the side it
/// finishes on.
///
/// # Examples
///
/// ```rust
/// use triverse::{Container, Traversal};
///
/// let mut container: Container = [7, 2, 9, 2].into_iter().collect();
/// let visited: Vec<i32> = container
///     .side_cross_iterator()
///     .begin()
///     .walk()
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(visited, vec![2, 9, 2, 7]);
/// ```
#[derive(Clone, Debug)]
pub struct SideCrossIterator {
    binding: Binding,
    low: usize,
    high: usize,
    from_low: bool,
    steps_taken: usize,
}

impl SideCrossIterator {
    pub(crate) fn new(sequence: &SharedSequence) -> Self {
        let mut iterator = Self {
            binding: Binding::new(sequence),
            low: 0,
            high: 0,
            from_low: true,
            steps_taken: 0,
        };
        iterator.begin();
        iterator
    }

    /// Returns how many elements this traversal has consumed.
    #[inline]
    #[must_use]
    pub const fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    /// Returns `true` if the next element is taken from the low end.
    #[inline]
    #[must_use]
    pub const fn is_from_low(&self) -> bool {
        self.from_low
    }

    const fn out_of_range() -> Error {
        Error::OutOfRange { kind: Self::KIND }
    }
}

impl Traversal for SideCrossIterator {
    const KIND: IteratorKind = IteratorKind::SideCross;

    fn begin(&mut self) -> &mut Self {
        let length = self.binding.reseed(Self::KIND).len();
        self.low = 0;
        self.high = length;
        self.from_low = true;
        self.steps_taken = 0;
        self
    }

    fn end(&mut self) -> &mut Self {
        let length = self.binding.reseed(Self::KIND).len();
        self.low = length;
        self.high = length;
        // A completed traversal flips once per element.
        self.from_low = length % 2 == 0;
        self.steps_taken = length;
        self
    }

    fn dereference(&self) -> Result<i32> {
        let sequence = self.binding.fresh(Self::KIND)?;
        if self.is_exhausted() {
            return Err(Self::out_of_range());
        }
        let index = if self.from_low {
            self.low
        } else {
            self.high - 1
        };
        sequence.get(index).ok_or_else(Self::out_of_range)
    }

    fn advance(&mut self) -> Result<&mut Self> {
        drop(self.binding.fresh(Self::KIND)?);
        if self.is_exhausted() {
            return Err(Self::out_of_range());
        }
        if self.from_low {
            self.low += 1;
        } else {
            self.high -= 1;
        }
        self.steps_taken += 1;
        self.from_low = !self.from_low;
        Ok(self)
    }

    fn is_stale(&self) -> bool {
        self.binding.is_stale()
    }

    fn is_exhausted(&self) -> bool {
        self.low >= self.high
    }

    /// Orders by steps taken; at equal depth a low-side position ranks
    /// before a high-side one.
    ///
    /// Every state reachable through the public API has
    /// `from_low == (steps_taken % 2 == 0)`, so the side only breaks ties
    /// between hand-built states.
    fn compare(&self, other: &Self) -> Result<Ordering> {
        self.binding.ensure_comparable(&other.binding, Self::KIND)?;
        Ok(self
            .steps_taken
            .cmp(&other.steps_taken)
            .then_with(|| other.from_low.cmp(&self.from_low)))
    }

    fn assign_from(&mut self, other: &Self) -> Result<()> {
        self.binding.ensure_same_owner(&other.binding)?;
        self.clone_from(other);
        Ok(())
    }

    fn equals(&self, other: &Self) -> Result<bool> {
        self.binding.ensure_comparable(&other.binding, Self::KIND)?;
        Ok(self.steps_taken == other.steps_taken)
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

    fn drain(iterator: &mut SideCrossIterator) -> Vec<i32> {
        iterator.begin().walk().collect::<Result<_>>().unwrap()
    }

    #[rstest]
    #[case(&[], &[])]
    #[case(&[4], &[4])]
    #[case(&[1, 2], &[1, 2])]
    #[case(&[1, 2, 3], &[1, 3, 2])]
    #[case(&[1, 2, 3, 4], &[1, 4, 2, 3])]
    #[case(&[1, 2, 3, 4, 5], &[1, 5, 2, 4, 3])]
    fn test_visits_every_element_once(#[case] values: &[i32], #[case] expected: &[i32]) {
        let sequence = shared(values);
        let mut iterator = SideCrossIterator::new(&sequence);
        assert_eq!(drain(&mut iterator), expected);
        assert_eq!(iterator.steps_taken(), values.len());
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    #[case(4)]
    fn test_exhausted_traversal_equals_end(#[case] length: i32) {
        let values: Vec<i32> = (0..length).collect();
        let sequence = shared(&values);
        let mut iterator = SideCrossIterator::new(&sequence);
        let mut end = iterator.clone();
        end.end();

        drain(&mut iterator);
        assert_eq!(iterator.equals(&end), Ok(true));
        assert_eq!(iterator.compare(&end), Ok(Ordering::Equal));
    }

    #[rstest]
    fn test_middle_element_is_not_repeated() {
        let sequence = shared(&[10, 20, 30]);
        let mut iterator = SideCrossIterator::new(&sequence);
        iterator.advance().unwrap().advance().unwrap();

        assert_eq!(iterator.dereference(), Ok(20));
        iterator.advance().unwrap();
        assert!(iterator.is_exhausted());
        assert_eq!(
            iterator.dereference(),
            Err(Error::OutOfRange {
                kind: IteratorKind::SideCross
            })
        );
    }

    #[rstest]
    fn test_direction_flips_on_every_step() {
        let sequence = shared(&[1, 2, 3, 4]);
        let mut iterator = SideCrossIterator::new(&sequence);
        assert!(iterator.is_from_low());
        iterator.advance().unwrap();
        assert!(!iterator.is_from_low());
        iterator.advance().unwrap();
        assert!(iterator.is_from_low());
    }

    #[rstest]
    fn test_side_breaks_ties_between_hand_built_states() {
        let sequence = shared(&[1, 2, 3, 4]);
        let base = SideCrossIterator::new(&sequence);
        let low_side = SideCrossIterator {
            low: 1,
            high: 4,
            from_low: true,
            steps_taken: 1,
            ..base.clone()
        };
        let high_side = SideCrossIterator {
            from_low: false,
            ..low_side.clone()
        };

        assert_eq!(low_side.compare(&high_side), Ok(Ordering::Less));
        assert_eq!(high_side.compare(&low_side), Ok(Ordering::Greater));
        assert_eq!(low_side.equals(&high_side), Ok(true));
    }

    #[rstest]
    fn test_reachable_states_keep_side_in_step_with_parity() {
        let sequence = shared(&[1, 2, 3, 4, 5]);
        let mut iterator = SideCrossIterator::new(&sequence);
        while !iterator.is_exhausted() {
            assert_eq!(iterator.is_from_low(), iterator.steps_taken() % 2 == 0);
            iterator.advance().unwrap();
        }
        assert_eq!(iterator.is_from_low(), iterator.steps_taken() % 2 == 0);
        iterator.end();
        assert_eq!(iterator.is_from_low(), iterator.steps_taken() % 2 == 0);
    }

    #[rstest]
    fn test_advance_past_end_fails() {
        let sequence = shared(&[1]);
        let mut iterator = SideCrossIterator::new(&sequence);
        iterator.advance().unwrap();
        assert!(matches!(
            iterator.advance(),
            Err(Error::OutOfRange {
                kind: IteratorKind::SideCross
            })
        ));
        assert_eq!(iterator.steps_taken(), 1);
    }
}
