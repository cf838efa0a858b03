//! Stackless traversal: every step only follows child and parent links.
//!
//! A single step is O(log(n)) in the worst case, a full traversal is O(n).

use std::iter::FusedIterator;

use generational_arena::Index;

use super::node::{NodeRef, Side};
use super::RbTree;
use crate::argument::Argument;

impl<T, C, A: Argument<T>> RbTree<T, C, A> {
    /// The smallest node, if any.
    pub fn first(&self) -> Option<NodeRef> {
        self.root.map(|root| NodeRef(self.extreme(root, Side::Left)))
    }

    /// The largest node, if any.
    pub fn last(&self) -> Option<NodeRef> {
        self.root.map(|root| NodeRef(self.extreme(root, Side::Right)))
    }

    /// The in-order successor of `at`. `None` after the last node or for a stale handle.
    pub fn next(&self, at: NodeRef) -> Option<NodeRef> {
        self.nodes.get(at.0)?;
        self.step(at.0, Side::Right).map(NodeRef)
    }

    /// The in-order predecessor of `at`. `None` before the first node or for a stale handle.
    pub fn prev(&self, at: NodeRef) -> Option<NodeRef> {
        self.nodes.get(at.0)?;
        self.step(at.0, Side::Left).map(NodeRef)
    }

    /// The first pre-order node, which is the root.
    pub fn preorder_first(&self) -> Option<NodeRef> {
        self.root()
    }

    /// The pre-order successor of `at`: its first child if it has one, otherwise
    /// the right sibling of the nearest ancestor entered from the left.
    pub fn preorder_next(&self, at: NodeRef) -> Option<NodeRef> {
        self.nodes.get(at.0)?;
        self.preorder_step(at.0).map(NodeRef)
    }

    /// The last pre-order node of the subtree rooted at `at`.
    pub fn preorder_last_in(&self, at: NodeRef) -> Option<NodeRef> {
        self.nodes.get(at.0)?;
        Some(NodeRef(self.preorder_last(at.0)))
    }

    /// The first post-order node, the leaf reached by preferring left children.
    pub fn postorder_first(&self) -> Option<NodeRef> {
        self.root.map(|root| NodeRef(self.postorder_leftmost(root)))
    }

    /// The post-order successor of `at`: the parent, unless `at` is a left child
    /// with a right sibling, in which case it is the first post-order node of
    /// that sibling's subtree.
    pub fn postorder_next(&self, at: NodeRef) -> Option<NodeRef> {
        self.nodes.get(at.0)?;
        self.postorder_step(at.0).map(NodeRef)
    }

    /// The first post-order node of the subtree rooted at `at`.
    pub fn postorder_first_in(&self, at: NodeRef) -> Option<NodeRef> {
        self.nodes.get(at.0)?;
        Some(NodeRef(self.postorder_leftmost(at.0)))
    }

    /// In-order values, smallest first. Double-ended.
    pub fn iter(&self) -> Iter<'_, T, C, A> {
        Iter {
            tree: self,
            front: self.first().map(|n| n.0),
            back: self.last().map(|n| n.0),
            remaining: self.len(),
        }
    }

    /// Values in pre-order (each node before its children).
    pub fn preorder(&self) -> Preorder<'_, T, C, A> {
        Preorder { tree: self, next: self.root }
    }

    /// Values in post-order (each node after its children).
    pub fn postorder(&self) -> Postorder<'_, T, C, A> {
        Postorder { tree: self, next: self.root.map(|root| self.postorder_leftmost(root)) }
    }

    /// One in-order step towards `dir` (`Right` is the successor).
    pub(super) fn step(&self, at: Index, dir: Side) -> Option<Index> {
        if let Some(child) = self.child(at, dir) {
            return Some(self.extreme(child, dir.opposite()));
        }
        // climb while we are the `dir` child, the first other edge leads to the answer
        let mut at = at;
        let mut parent = self.nodes[at].parent;
        while let Some(p) = parent {
            if self.child(p, dir) != Some(at) {
                break;
            }
            at = p;
            parent = self.nodes[p].parent;
        }
        parent
    }

    fn preorder_step(&self, at: Index) -> Option<Index> {
        let node = &self.nodes[at];
        if let Some(child) = node.left.or(node.right) {
            return Some(child);
        }
        let mut at = at;
        while let Some(p) = self.nodes[at].parent {
            let parent = &self.nodes[p];
            if parent.left == Some(at) && parent.right.is_some() {
                return parent.right;
            }
            at = p;
        }
        None
    }

    fn preorder_last(&self, mut at: Index) -> Index {
        loop {
            let node = &self.nodes[at];
            match node.right.or(node.left) {
                Some(child) => at = child,
                None => return at,
            }
        }
    }

    fn postorder_step(&self, at: Index) -> Option<Index> {
        let p = self.nodes[at].parent?;
        let parent = &self.nodes[p];
        match parent.right {
            Some(right) if parent.left == Some(at) => Some(self.postorder_leftmost(right)),
            _ => Some(p),
        }
    }

    fn postorder_leftmost(&self, mut at: Index) -> Index {
        loop {
            let node = &self.nodes[at];
            match node.left.or(node.right) {
                Some(child) => at = child,
                None => return at,
            }
        }
    }
}

/// In-order iterator over the values of an [`RbTree`], see [`RbTree::iter`].
pub struct Iter<'a, T, C, A: Argument<T>> {
    tree: &'a RbTree<T, C, A>,
    front: Option<Index>,
    back: Option<Index>,
    // NOTE: `front` and `back` cross without becoming `None`, so this is what ends iteration
    remaining: usize,
}

impl<'a, T, C, A: Argument<T>> Iterator for Iter<'a, T, C, A> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let at = self.front?;
        self.front = self.tree.step(at, Side::Right);
        self.remaining -= 1;
        let tree = self.tree;
        Some(&tree.nodes[at].value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, C, A: Argument<T>> DoubleEndedIterator for Iter<'_, T, C, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let at = self.back?;
        self.back = self.tree.step(at, Side::Left);
        self.remaining -= 1;
        let tree = self.tree;
        Some(&tree.nodes[at].value)
    }
}

impl<T, C, A: Argument<T>> ExactSizeIterator for Iter<'_, T, C, A> {}
impl<T, C, A: Argument<T>> FusedIterator for Iter<'_, T, C, A> {}

/// Pre-order iterator over the values of an [`RbTree`], see [`RbTree::preorder`].
pub struct Preorder<'a, T, C, A: Argument<T>> {
    tree: &'a RbTree<T, C, A>,
    next: Option<Index>,
}

impl<'a, T, C, A: Argument<T>> Iterator for Preorder<'a, T, C, A> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let at = self.next?;
        self.next = self.tree.preorder_step(at);
        let tree = self.tree;
        Some(&tree.nodes[at].value)
    }
}

impl<T, C, A: Argument<T>> FusedIterator for Preorder<'_, T, C, A> {}

/// Post-order iterator over the values of an [`RbTree`], see [`RbTree::postorder`].
pub struct Postorder<'a, T, C, A: Argument<T>> {
    tree: &'a RbTree<T, C, A>,
    next: Option<Index>,
}

impl<'a, T, C, A: Argument<T>> Iterator for Postorder<'a, T, C, A> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let at = self.next?;
        self.next = self.tree.postorder_step(at);
        let tree = self.tree;
        Some(&tree.nodes[at].value)
    }
}

impl<T, C, A: Argument<T>> FusedIterator for Postorder<'_, T, C, A> {}

impl<'a, T, C, A: Argument<T>> IntoIterator for &'a RbTree<T, C, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, C, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
