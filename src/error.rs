//! Error types for container mutation and iterator use.
//!
//! Every failure in this crate reflects a misuse of the API by the caller,
//! never an environmental fault, so none of these errors is transient and
//! none of them leaves the container in an unusable state.

use thiserror::Error;

use crate::iterator::IteratorKind;
use crate::sequence::Generation;

/// Represents errors that can occur when mutating a container or driving
/// one of its iterators.
///
/// # Examples
///
/// ```rust
/// use triverse::{Container, Error};
///
/// let mut container = Container::new();
/// container.add(3);
///
/// assert_eq!(container.remove(5), Err(Error::NotFound { value: 5 }));
/// assert_eq!(
///     Error::NotFound { value: 5 }.to_string(),
///     "element 5 not found in container"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// The value passed to `remove` is not present in the container.
    #[error("element {value} not found in container")]
    NotFound {
        /// The value that was looked up.
        value: i32,
    },

    /// An iterator was dereferenced or advanced past its valid range.
    #[error("{kind} iterator is out of range")]
    OutOfRange {
        /// The kind of iterator that failed.
        kind: IteratorKind,
    },

    /// Two iterators bound to different containers were compared or assigned.
    #[error("iterators belong to different containers")]
    IncompatibleIterators,

    /// An iterator was used after a mutation of its container without an
    /// intervening `begin()` or `end()`.
    #[error(
        "stale iterator: bound to generation {captured} but container is at generation {current}"
    )]
    StaleIterator {
        /// The generation captured by the iterator's last `begin()`/`end()`.
        captured: Generation,
        /// The container's generation at the time of the failed call.
        current: Generation,
    },
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
