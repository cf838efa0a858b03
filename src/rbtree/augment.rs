use generational_arena::Index;

use super::RbTree;
use crate::argument::Argument;

impl<T, C, A: Argument<T>> RbTree<T, C, A> {
    /// Recomputes the argument of `at` from its value and its children's
    /// arguments, and reports whether it changed.
    pub(super) fn recompute(&mut self, at: Index) -> bool {
        let node = &self.nodes[at];
        let left = node.left.map(|l| &self.nodes[l].argument);
        let right = node.right.map(|r| &self.nodes[r].argument);
        let fresh = self.argument.compute(&node.value, left, right);

        let changed = !self.argument.same(&node.argument, &fresh);
        self.nodes[at].argument = fresh;
        changed
    }

    /// Recomputes arguments from `from` upward, stopping at the first node whose
    /// argument did not change. Everything below `from` must already be up to date.
    pub(super) fn propagate(&mut self, from: Option<Index>) {
        if !A::ENABLED {
            return;
        }
        let mut cursor = from;
        while let Some(at) = cursor {
            if !self.recompute(at) {
                break;
            }
            cursor = self.nodes[at].parent;
        }
    }

    /// Recomputes every argument on the path from `from` up to its ancestor
    /// `through` (both included) without stopping early, then propagates above
    /// `through` as usual.
    ///
    /// Used when `through` got new children: an unchanged argument further down
    /// says nothing about whether `through` itself is up to date.
    pub(super) fn refresh_path(&mut self, from: Index, through: Index) {
        if !A::ENABLED {
            return;
        }
        let mut cursor = Some(from);
        while let Some(at) = cursor {
            self.recompute(at);
            if at == through {
                break;
            }
            cursor = self.nodes[at].parent;
        }
        let above = self.nodes[through].parent;
        self.propagate(above);
    }
}

#[cfg(test)]
mod tests {
    use crate::argument::{self, SubtreeMax};
    use crate::RbTree;

    #[test]
    fn leaf_argument_is_own_value() {
        let mut tree = RbTree::with_argument(SubtreeMax);
        let (at, _) = tree.insert(7);
        assert_eq!(tree.argument(at), Some(&7));
    }

    #[test]
    fn propagation_stops_when_unchanged() {
        use std::cell::Cell;

        let calls = Cell::new(0usize);
        let max = argument::from_fn(
            |v: &i32, l: Option<&i32>, r: Option<&i32>| {
                calls.set(calls.get() + 1);
                *[Some(v), l, r].into_iter().flatten().max().unwrap_or(v)
            },
            |a: &i32, b: &i32| a == b,
        );
        let mut tree = RbTree::with_argument(max);
        for i in (0..64).map(|i| i * 2) {
            tree.insert(i);
        }

        // 126 stays the maximum, so inserting a small value only touches the path
        // as far as the first unchanged ancestor (plus whatever rotations happen)
        calls.set(0);
        tree.insert(1);
        assert!(calls.get() < 20, "recomputed {} nodes", calls.get());
        assert!(tree.validate().is_ok());
        let root = tree.root().unwrap();
        assert_eq!(tree.argument(root), Some(&126));
    }
}
