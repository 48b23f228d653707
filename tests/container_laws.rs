//! Property tests for the container and its traversals.

use proptest::prelude::*;
use triverse::{Container, Error, Traversal, is_prime};

#[derive(Clone, Debug)]
enum Operation {
    Add(i32),
    Remove(i32),
}

fn operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        (-50..50i32).prop_map(Operation::Add),
        (-50..50i32).prop_map(Operation::Remove),
    ]
}

fn drain<T: Traversal>(iterator: &mut T) -> Vec<i32> {
    iterator.begin().walk().collect::<Result<_, _>>().unwrap()
}

/// Side-crossing order computed directly from the sorted elements.
fn expected_side_cross(sorted: &[i32]) -> Vec<i32> {
    let mut result = Vec::with_capacity(sorted.len());
    let (mut low, mut high) = (0, sorted.len());
    let mut from_low = true;
    while low < high {
        if from_low {
            result.push(sorted[low]);
            low += 1;
        } else {
            high -= 1;
            result.push(sorted[high]);
        }
        from_low = !from_low;
    }
    result
}

proptest! {
    /// elements() stays non-decreasing under any interleaving of add/remove,
    /// and remove fails exactly when the value is absent.
    #[test]
    fn prop_mutations_preserve_order(operations in prop::collection::vec(operation(), 0..100)) {
        let mut container = Container::new();
        let mut model: Vec<i32> = Vec::new();

        for operation in operations {
            match operation {
                Operation::Add(value) => {
                    container.add(value);
                    model.push(value);
                }
                Operation::Remove(value) => {
                    let present = model.contains(&value);
                    let result = container.remove(value);
                    if present {
                        prop_assert_eq!(result, Ok(()));
                        let index = model.iter().position(|element| *element == value).unwrap();
                        model.remove(index);
                    } else {
                        prop_assert_eq!(result, Err(Error::NotFound { value }));
                    }
                }
            }
            let elements = container.elements();
            prop_assert!(elements.windows(2).all(|pair| pair[0] <= pair[1]));
        }

        model.sort_unstable();
        prop_assert_eq!(container.elements(), model);
    }

    /// Removing one occurrence of a duplicate shrinks the container by one.
    #[test]
    fn prop_remove_duplicate_decrements_len(
        elements in prop::collection::vec(-20..20i32, 0..40),
        duplicated in -20..20i32,
    ) {
        let mut container: Container = elements.iter().copied().collect();
        container.add(duplicated);
        container.add(duplicated);
        let before = container.len();

        container.remove(duplicated).unwrap();
        prop_assert_eq!(container.len(), before - 1);
        prop_assert!(container.contains(duplicated));
    }

    /// Each traversal yields exactly what its definition says.
    #[test]
    fn prop_traversals_match_definitions(elements in prop::collection::vec(any::<i16>(), 0..60)) {
        let mut container: Container = elements.iter().map(|value| i32::from(*value)).collect();
        let sorted = container.elements();

        let ascending = drain(container.ascending_iterator());
        prop_assert_eq!(&ascending, &sorted);

        let side_cross = drain(container.side_cross_iterator());
        prop_assert_eq!(side_cross.len(), sorted.len());
        prop_assert_eq!(side_cross, expected_side_cross(&sorted));

        let primes = drain(container.prime_iterator());
        let expected: Vec<i32> = sorted.iter().copied().filter(|value| is_prime(*value)).collect();
        prop_assert_eq!(primes, expected);
    }

    /// Any successful mutation makes a previously seeded iterator stale.
    #[test]
    fn prop_mutation_invalidates(
        elements in prop::collection::vec(-10..10i32, 1..20),
        added in -10..10i32,
    ) {
        let mut container: Container = elements.iter().copied().collect();
        container.ascending_iterator().begin();
        container.side_cross_iterator().begin();
        container.prime_iterator().begin();

        container.add(added);

        let ascending_stale = matches!(
            container.ascending_iterator().advance(),
            Err(Error::StaleIterator { .. })
        );
        let side_cross_stale = matches!(
            container.side_cross_iterator().dereference(),
            Err(Error::StaleIterator { .. })
        );
        let prime_stale = matches!(
            container.prime_iterator().dereference(),
            Err(Error::StaleIterator { .. })
        );
        prop_assert!(ascending_stale);
        prop_assert!(side_cross_stale);
        prop_assert!(prime_stale);
    }
}
