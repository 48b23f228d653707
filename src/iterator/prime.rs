//! Ascending traversal restricted to prime values.

use std::cmp::Ordering;

use super::{Binding, IteratorKind, Position, SharedSequence, Traversal};
use crate::error::{Error, Result};
use crate::sequence::SortedSequence;

/// Returns `true` if `number` is prime.
///
/// Values below 2 (zero, one and every negative number) are never prime.
/// Plain trial division: a composite always has a divisor no larger than its
/// square root, so checking up to there gives the same answer as checking
/// every integer in `[2, number - 1]`.
///
/// # Examples
///
/// ```rust
/// use triverse::is_prime;
///
/// assert!(is_prime(2));
/// assert!(is_prime(7919));
/// assert!(!is_prime(1));
/// assert!(!is_prime(9));
/// assert!(!is_prime(-7));
/// ```
#[must_use]
pub fn is_prime(number: i32) -> bool {
    if number <= 1 {
        return false;
    }
    let number = i64::from(number);
    let mut divisor: i64 = 2;
    while divisor * divisor <= number {
        if number % divisor == 0 {
            return false;
        }
        divisor += 1;
    }
    true
}

/// Walks the container front to back, stopping only on prime values.
///
/// Whenever the iterator is positioned on a slot, that slot holds a prime.
/// Duplicated primes are visited once per occurrence.
///
/// # Examples
///
/// ```rust
/// use triverse::{Container, Traversal};
///
/// let mut container: Container = [7, 2, 9, 2].into_iter().collect();
/// let primes: Vec<i32> = container
///     .prime_iterator()
///     .begin()
///     .walk()
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(primes, vec![2, 2, 7]);
/// ```
#[derive(Clone, Debug)]
pub struct PrimeIterator {
    binding: Binding,
    position: Position,
}

impl PrimeIterator {
    pub(crate) fn new(sequence: &SharedSequence) -> Self {
        let mut iterator = Self {
            binding: Binding::new(sequence),
            position: Position::PastEnd,
        };
        iterator.begin();
        iterator
    }
}

/// Finds the first prime-valued slot at or after `start`.
fn next_prime_from(sequence: &SortedSequence, start: usize) -> Position {
    sequence
        .as_slice()
        .iter()
        .enumerate()
        .skip(start)
        .find(|(_, value)| is_prime(**value))
        .map_or(Position::PastEnd, |(index, _)| Position::At(index))
}

impl Traversal for PrimeIterator {
    const KIND: IteratorKind = IteratorKind::Prime;

    fn begin(&mut self) -> &mut Self {
        let sequence = self.binding.reseed(Self::KIND);
        self.position = next_prime_from(&sequence, 0);
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
        let position = next_prime_from(&sequence, index + 1);
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
