//! # triverse
//!
//! A sorted integer container with three traversal orders, each served by a
//! dedicated cursor-style iterator.
//!
//! ## Overview
//!
//! - **[`SortedSequence`]**: an always-sorted sequence of `i32` that allows
//!   duplicates and counts its own mutations
//! - **[`Container`]**: owns the sequence plus one long-lived instance of
//!   each iterator kind
//! - **[`AscendingIterator`]**: smallest to largest
//! - **[`SideCrossIterator`]**: smallest, largest, second smallest, ...
//! - **[`PrimeIterator`]**: smallest to largest, prime values only
//!
//! Iterators hold indices, never references, together with the generation
//! of the sequence they were seeded at. Mutating the container bumps the
//! generation, and any iterator used afterwards without a fresh `begin()` or
//! `end()` reports [`Error::StaleIterator`] instead of reading shifted data.
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for [`SortedSequence`] and
//!   [`Container`]
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use triverse::prelude::*;
//!
//! let mut container = Container::new();
//! for value in [7, 2, 9, 2] {
//!     container.add(value);
//! }
//!
//! let ascending: Vec<i32> = container
//!     .ascending_iterator()
//!     .begin()
//!     .walk()
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(ascending, vec![2, 2, 7, 9]);
//!
//! let side_cross: Vec<i32> = container
//!     .side_cross_iterator()
//!     .begin()
//!     .walk()
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(side_cross, vec![2, 9, 2, 7]);
//!
//! let primes: Vec<i32> = container
//!     .prime_iterator()
//!     .begin()
//!     .walk()
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(primes, vec![2, 2, 7]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use triverse::prelude::*;
/// ```
pub mod prelude {
    pub use crate::container::Container;
    pub use crate::error::Error;
    pub use crate::iterator::{
        AscendingIterator, IteratorKind, PrimeIterator, SideCrossIterator, Traversal,
    };
    pub use crate::sequence::{Generation, SortedSequence};
}

pub mod container;
pub mod error;
pub mod iterator;
pub mod sequence;

pub use container::Container;
pub use error::{Error, Result};
pub use iterator::{
    AscendingIterator, IteratorKind, PrimeIterator, SideCrossIterator, Traversal, Walk, is_prime,
};
pub use sequence::{Generation, SortedSequence};
