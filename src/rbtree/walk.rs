//! Visitor-driven walks. A visitor gets each node's handle and the node itself,
//! and returns `false` to stop the walk early.

use super::node::{Node, NodeRef};
use super::RbTree;
use crate::argument::Argument;

impl<T, C, A: Argument<T>> RbTree<T, C, A> {
    /// Visits every node in ascending order.
    pub fn walk<F>(&self, visit: F)
    where
        F: FnMut(NodeRef, &Node<T, A::Output>) -> bool,
    {
        self.walk_from(self.first(), Self::next, visit);
    }

    /// Visits every node in descending order.
    pub fn walk_reverse<F>(&self, visit: F)
    where
        F: FnMut(NodeRef, &Node<T, A::Output>) -> bool,
    {
        self.walk_from(self.last(), Self::prev, visit);
    }

    /// Visits every node before its children.
    pub fn walk_preorder<F>(&self, visit: F)
    where
        F: FnMut(NodeRef, &Node<T, A::Output>) -> bool,
    {
        self.walk_from(self.preorder_first(), Self::preorder_next, visit);
    }

    /// Visits every node after its children.
    pub fn walk_postorder<F>(&self, visit: F)
    where
        F: FnMut(NodeRef, &Node<T, A::Output>) -> bool,
    {
        self.walk_from(self.postorder_first(), Self::postorder_next, visit);
    }

    /// Visits the subtree rooted at `at` (`at` included) in pre-order.
    pub fn walk_sub_preorder<F>(&self, at: NodeRef, mut visit: F)
    where
        F: FnMut(NodeRef, &Node<T, A::Output>) -> bool,
    {
        let Some(last) = self.preorder_last_in(at) else { return };
        let mut cursor = Some(at);
        while let Some(n) = cursor {
            if !visit(n, &self.nodes[n.0]) || n == last {
                return;
            }
            cursor = self.preorder_next(n);
        }
    }

    /// Visits the subtree rooted at `at` (`at` included) in post-order.
    pub fn walk_sub_postorder<F>(&self, at: NodeRef, mut visit: F)
    where
        F: FnMut(NodeRef, &Node<T, A::Output>) -> bool,
    {
        let mut cursor = self.postorder_first_in(at);
        while let Some(n) = cursor {
            // `at` is the last node of its own subtree in post-order
            if !visit(n, &self.nodes[n.0]) || n == at {
                return;
            }
            cursor = self.postorder_next(n);
        }
    }

    fn walk_from<S, F>(&self, start: Option<NodeRef>, step: S, mut visit: F)
    where
        S: Fn(&Self, NodeRef) -> Option<NodeRef>,
        F: FnMut(NodeRef, &Node<T, A::Output>) -> bool,
    {
        let mut cursor = start;
        while let Some(n) = cursor {
            if !visit(n, &self.nodes[n.0]) {
                return;
            }
            cursor = step(self, n);
        }
    }
}
