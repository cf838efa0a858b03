//! Total orders used to place values in a tree.

use std::cmp::Ordering;

/// A total order over `T`.
///
/// Two values comparing [`Ordering::Equal`] are the same key as far as the
/// tree is concerned: inserting the second one is rejected.
pub trait Compare<T: ?Sized> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// Orders values by their [`Ord`] implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Natural;

impl<T: Ord + ?Sized> Compare<T> for Natural {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Orders values by the reverse of their [`Ord`] implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Descending;

impl<T: Ord + ?Sized> Compare<T> for Descending {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        b.cmp(a)
    }
}

impl<T: ?Sized, F> Compare<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_and_descending_are_mirrors() {
        assert_eq!(Natural.compare(&1, &2), Ordering::Less);
        assert_eq!(Descending.compare(&1, &2), Ordering::Greater);
        assert_eq!(Natural.compare("b", "a"), Ordering::Greater);
        assert_eq!(Descending.compare("b", "b"), Ordering::Equal);
    }

    #[test]
    fn closures_compare() {
        let by_len = |a: &String, b: &String| a.len().cmp(&b.len());
        assert_eq!(by_len.compare(&"abc".to_string(), &"de".to_string()), Ordering::Greater);
    }
}
