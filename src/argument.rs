//! Per-node derived values ("arguments") kept consistent through rotations.
//!
//! An argument is a pure function of a node's own value and the arguments of its
//! two children, so after any local restructuring only the nodes whose children
//! changed (and their ancestors) need to be recomputed. Recomputation walks
//! upward and stops at the first node whose argument came out [`same`] as before.
//!
//! [`same`]: Argument::same

use std::marker::PhantomData;

/// The aggregation cached in every node of an augmented tree.
pub trait Argument<T> {
    type Output;

    /// Whether the tree should maintain arguments at all.
    const ENABLED: bool = true;

    /// Computes a node's argument. A missing child is passed as `None`.
    fn compute(&self, value: &T, left: Option<&Self::Output>, right: Option<&Self::Output>) -> Self::Output;

    /// Whether a recomputed argument is unchanged. Returning `false` spuriously is
    /// always correct, just slower; returning `true` spuriously leaves ancestors stale.
    fn same(&self, old: &Self::Output, new: &Self::Output) -> bool;
}

/// No augmentation.
impl<T> Argument<T> for () {
    type Output = ();
    const ENABLED: bool = false;

    fn compute(&self, _: &T, _: Option<&()>, _: Option<&()>) {}

    fn same(&self, _: &(), _: &()) -> bool {
        true
    }
}

/// The largest value in each subtree.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubtreeMax;

impl<T: Ord + Clone> Argument<T> for SubtreeMax {
    type Output = T;

    fn compute(&self, value: &T, left: Option<&T>, right: Option<&T>) -> T {
        [left, right].into_iter().flatten().fold(value, |max, x| max.max(x)).clone()
    }

    fn same(&self, old: &T, new: &T) -> bool {
        old == new
    }
}

/// The number of nodes in each subtree. Enables the order-statistics queries
/// ([`nth`], [`rank`]) on trees built with it.
///
/// [`nth`]: crate::RbTree::nth
/// [`rank`]: crate::RbTree::rank
#[derive(Debug, Clone, Copy, Default)]
pub struct SubtreeSize;

impl<T> Argument<T> for SubtreeSize {
    type Output = usize;

    fn compute(&self, _: &T, left: Option<&usize>, right: Option<&usize>) -> usize {
        1 + left.copied().unwrap_or(0) + right.copied().unwrap_or(0)
    }

    fn same(&self, old: &usize, new: &usize) -> bool {
        old == new
    }
}

/// An argument assembled from a compute closure and an equality closure.
pub struct FnArgument<T, R, F, E> {
    compute: F,
    same: E,
    _phantom: PhantomData<fn(&T) -> R>,
}

/// Builds an [`Argument`] out of two closures.
///
/// ```
/// use rbtree::{RbTree, argument};
///
/// // sum of all values in the subtree
/// let sum = argument::from_fn(
///     |v: &u64, l: Option<&u64>, r: Option<&u64>| v + l.unwrap_or(&0) + r.unwrap_or(&0),
///     |a: &u64, b: &u64| a == b,
/// );
/// let mut tree = RbTree::with_argument(sum);
/// tree.extend([1, 2, 3, 4]);
/// let root = tree.root().unwrap();
/// assert_eq!(tree.argument(root), Some(&10));
/// ```
pub fn from_fn<T, R, F, E>(compute: F, same: E) -> FnArgument<T, R, F, E>
where
    F: Fn(&T, Option<&R>, Option<&R>) -> R,
    E: Fn(&R, &R) -> bool,
{
    FnArgument { compute, same, _phantom: PhantomData }
}

impl<T, R, F, E> Argument<T> for FnArgument<T, R, F, E>
where
    F: Fn(&T, Option<&R>, Option<&R>) -> R,
    E: Fn(&R, &R) -> bool,
{
    type Output = R;

    fn compute(&self, value: &T, left: Option<&R>, right: Option<&R>) -> R {
        (self.compute)(value, left, right)
    }

    fn same(&self, old: &R, new: &R) -> bool {
        (self.same)(old, new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtree_max_picks_largest() {
        assert_eq!(SubtreeMax.compute(&5, Some(&3), None), 5);
        assert_eq!(SubtreeMax.compute(&5, Some(&3), Some(&9)), 9);
        assert_eq!(SubtreeMax.compute(&"b", None, None), "b");
    }

    #[test]
    fn subtree_size_counts() {
        assert_eq!(<SubtreeSize as Argument<i32>>::compute(&SubtreeSize, &0, None, None), 1);
        assert_eq!(SubtreeSize.compute(&0, Some(&3), Some(&4)), 8);
    }

    #[test]
    fn unit_argument_is_disabled() {
        assert!(!<() as Argument<i32>>::ENABLED);
        assert!(<SubtreeSize as Argument<i32>>::ENABLED);
    }

    #[test]
    fn closures_make_an_argument() {
        let min = from_fn(
            |v: &i32, l: Option<&i32>, _: Option<&i32>| *l.unwrap_or(v),
            |a: &i32, b: &i32| a == b,
        );
        assert_eq!(min.compute(&4, Some(&1), Some(&7)), 1);
        assert_eq!(min.compute(&4, None, Some(&7)), 4);
        assert!(min.same(&1, &1));
    }
}
