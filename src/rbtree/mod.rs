//! A red-black tree with optional per-node augmentation.
//!
//! Nodes live in a generational arena owned by the tree; child links and the
//! parent back-link are arena indices. The tree is the only owner of node memory,
//! and a [`NodeRef`] handed out to callers is just an index that gets checked on
//! every use.
//!
//! Invariants that hold whenever a public method returns:
//!
//! 1. in-order traversal is strictly increasing under the tree's comparator
//!    (so no two values compare equal),
//! 2. the root is black,
//! 3. a red node never has a red child,
//! 4. every path from a node down to a missing child crosses the same number of
//!    black nodes,
//! 5. if augmentation is enabled, every node's cached argument equals
//!    `compute(value, left.argument, right.argument)`.

use std::cmp::Ordering;
use std::fmt::Debug;
use std::mem;

use generational_arena::{Arena, Index};
use log::{debug, trace};

use crate::argument::Argument;
use crate::compare::{Compare, Natural};
use crate::error::Error;

mod augment;
mod balance;
mod iter;
mod node;
mod order;
mod validate;
mod walk;

#[cfg(test)]
mod tests;

pub use iter::{Iter, Postorder, Preorder};
pub use node::{Color, Node, NodeRef};

use node::Side;

pub struct RbTree<T, C = Natural, A = ()>
where
    A: Argument<T>,
{
    nodes: Arena<Node<T, A::Output>>,
    root: Option<Index>,
    compare: C,
    argument: A,
}

impl<T: Ord> RbTree<T> {
    /// An empty tree ordered by `T: Ord`, without augmentation.
    pub fn new() -> Self {
        Self::with_compare_and_argument(Natural, ())
    }
}

impl<T: Ord, A: Argument<T>> RbTree<T, Natural, A> {
    /// An empty tree ordered by `T: Ord` that maintains `argument` in every node.
    pub fn with_argument(argument: A) -> Self {
        Self::with_compare_and_argument(Natural, argument)
    }
}

impl<T, C: Compare<T>> RbTree<T, C> {
    pub fn with_compare(compare: C) -> Self {
        Self::with_compare_and_argument(compare, ())
    }
}

impl<T, C: Compare<T>, A: Argument<T>> RbTree<T, C, A> {
    pub fn with_compare_and_argument(compare: C, argument: A) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            compare,
            argument,
        }
    }

    pub fn contains(&self, value: &T) -> bool {
        self.search(value).is_some()
    }

    /// Finds the node holding a value equal to `value`.
    ///
    /// Complexity: O(log(n))
    pub fn search(&self, value: &T) -> Option<NodeRef> {
        self.search_by(|x| self.compare.compare(value, x))
    }

    /// Descends from the root using `probe`, which reports where the wanted value
    /// lies relative to the value of the node being looked at (`Less` goes left).
    ///
    /// `probe` has to be consistent with the tree's comparator.
    pub fn search_by<F>(&self, mut probe: F) -> Option<NodeRef>
    where
        F: FnMut(&T) -> Ordering,
    {
        let mut cursor = self.root;
        while let Some(at) = cursor {
            let node = &self.nodes[at];
            cursor = match probe(&node.value) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(NodeRef(at)),
            };
        }
        None
    }

    /// Inserts `value` and returns its handle along with `true`.
    ///
    /// If an equal value is already present the tree is left untouched, `value`
    /// is dropped, and the existing node's handle is returned along with `false`.
    pub fn insert(&mut self, value: T) -> (NodeRef, bool) {
        let mut parent = None;
        let mut side = Side::Left;
        let mut cursor = self.root;

        while let Some(at) = cursor {
            parent = Some(at);
            let node = &self.nodes[at];
            (side, cursor) = match self.compare.compare(&value, &node.value) {
                Ordering::Less => (Side::Left, node.left),
                Ordering::Greater => (Side::Right, node.right),
                Ordering::Equal => return (NodeRef(at), false),
            };
        }

        let argument = self.argument.compute(&value, None, None);
        let at = self.nodes.insert(Node::new(value, argument, parent));
        match parent {
            None => self.root = Some(at),
            Some(p) => *self.nodes[p].child_mut(side) = Some(at),
        }
        trace!("Inserted {at:?} under {parent:?} ({side:?})");

        // the new leaf's own argument is already right, everything above it may not be
        self.propagate(parent);
        self.insert_fixup(at);

        (NodeRef(at), true)
    }

    /// Swaps the value stored at `at` for `value` and returns the old one.
    ///
    /// `value` has to compare equal to the current value, since the node is not
    /// moved. On failure `value` is handed back untouched. The node's argument
    /// (and its ancestors') is recomputed, so fields the comparator ignores may
    /// feed the argument.
    pub fn replace(&mut self, at: NodeRef, value: T) -> Result<T, (Error, T)> {
        let Some(node) = self.nodes.get_mut(at.0) else {
            return Err((Error::StaleHandle, value));
        };
        if self.compare.compare(&node.value, &value) != Ordering::Equal {
            return Err((Error::OrderMismatch, value));
        }

        let previous = mem::replace(&mut node.value, value);
        self.propagate(Some(at.0));
        Ok(previous)
    }

    /// Removes the node behind `at` and returns its value.
    ///
    /// When the node has two children its in-order successor is relinked into its
    /// place, so handles to every other node stay valid.
    pub fn delete(&mut self, at: NodeRef) -> Result<T, Error> {
        let x = at.0;
        let Some(node) = self.nodes.get(x) else {
            return Err(Error::StaleHandle);
        };

        // `z` is the subtree that moves up into the spliced-out position, `parent`
        // is where it hangs afterwards (tracked separately since `z` may be absent)
        let (removed_color, parent, z) = match (node.left, node.right) {
            (None, child) | (child, None) => {
                let (color, parent) = (node.color, node.parent);
                self.transplant(x, child);
                self.propagate(parent);
                (color, parent, child)
            }
            (Some(left), Some(right)) => {
                let y = self.minimum(right);
                let color = self.nodes[y].color;
                let z = self.nodes[y].right;

                let parent = if y == right {
                    y
                } else {
                    let parent = self.nodes[y].parent.expect("the successor sits below `x`");
                    self.transplant(y, z);
                    self.nodes[y].right = Some(right);
                    self.nodes[right].parent = Some(y);
                    parent
                };

                self.nodes[y].left = Some(left);
                self.nodes[left].parent = Some(y);
                self.transplant(x, Some(y));
                self.nodes[y].color = self.nodes[x].color;

                // `y` has brand new children, so everything between the splice point
                // and `y` is recomputed before the usual early-exit propagation
                self.refresh_path(parent, y);
                (color, Some(parent), z)
            }
        };
        trace!("Deleted {x:?}, {removed_color:?} node spliced out above {z:?}");

        if removed_color == Color::Black {
            self.delete_fixup(parent, z);
        }

        self.nodes.remove(x).map(|node| node.value).ok_or(Error::StaleHandle)
    }

    /// Removes the value equal to `value`, if any.
    pub fn delete_value(&mut self, value: &T) -> Option<T> {
        let at = self.search(value)?;
        self.delete(at).ok()
    }

    /// Removes every node. All outstanding handles become stale.
    pub fn clean(&mut self) -> &mut Self {
        debug!("Cleaning tree with {} nodes", self.len());

        // removing slot by slot bumps the arena generation, which is what keeps
        // old handles from matching nodes inserted later
        let live: Vec<Index> = self.nodes.iter().map(|(at, _)| at).collect();
        for at in live {
            self.nodes.remove(at);
        }
        self.root = None;
        self
    }
}

// accessors that never compare values
impl<T, C, A: Argument<T>> RbTree<T, C, A> {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<NodeRef> {
        self.root.map(NodeRef)
    }

    /// The node behind `at`, or `None` if the handle is stale.
    pub fn node(&self, at: NodeRef) -> Option<&Node<T, A::Output>> {
        self.nodes.get(at.0)
    }

    pub fn get(&self, at: NodeRef) -> Option<&T> {
        self.node(at).map(Node::value)
    }

    pub fn argument(&self, at: NodeRef) -> Option<&A::Output> {
        self.node(at).map(Node::argument)
    }
}

// structural helpers shared by the balancing, augmentation and traversal code
impl<T, C, A: Argument<T>> RbTree<T, C, A> {
    fn child(&self, at: Index, side: Side) -> Option<Index> {
        self.nodes[at].child(side)
    }

    /// Which child of `parent` the node `child` is.
    fn side_of(&self, parent: Index, child: Option<Index>) -> Side {
        if self.nodes[parent].left == child { Side::Left } else { Side::Right }
    }

    fn is_red(&self, at: Option<Index>) -> bool {
        at.is_some_and(|at| self.nodes[at].color == Color::Red)
    }

    /// Missing children count as black.
    fn is_black(&self, at: Option<Index>) -> bool {
        !self.is_red(at)
    }

    /// Follows `side` links from `at` as far as they go.
    fn extreme(&self, mut at: Index, side: Side) -> Index {
        while let Some(next) = self.child(at, side) {
            at = next;
        }
        at
    }

    fn minimum(&self, at: Index) -> Index {
        self.extreme(at, Side::Left)
    }
}

impl<T: Ord> Default for RbTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for RbTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T, C: Compare<T>, A: Argument<T>> Extend<T> for RbTree<T, C, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Debug, C: Compare<T>, A: Argument<T>> Debug for RbTree<T, C, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
