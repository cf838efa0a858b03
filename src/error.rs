use thiserror::Error;

use crate::rbtree::NodeRef;

/// Errors returned by tree mutations.
///
/// Misses and duplicate inserts are not errors, they show up as `None` and
/// `(handle, false)` respectively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The replacement value does not compare equal to the value it replaces.
    #[error("replacement value is not order-equivalent to the current value")]
    OrderMismatch,
    /// The handle refers to a node that was deleted (or cleaned) from the tree.
    #[error("node handle does not refer to a live node")]
    StaleHandle,
}

/// A broken red-black (or augmentation) invariant, as found by [`RbTree::validate`].
///
/// [`RbTree::validate`]: crate::RbTree::validate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidTree {
    /// The root node is red.
    #[error("root is red")]
    RedRoot,
    /// A red node hangs under a red parent.
    #[error("red node {0:?} has a red parent")]
    RedChild(NodeRef),
    /// The two subtrees of a node cross different numbers of black nodes.
    #[error("children of {0:?} have different black heights")]
    BlackHeight(NodeRef),
    /// A node's parent link does not point at the node holding it as a child.
    #[error("parent link of {0:?} does not match its position")]
    BrokenParent(NodeRef),
    /// A node does not compare greater than its in-order predecessor.
    #[error("{0:?} is out of order with its in-order predecessor")]
    OutOfOrder(NodeRef),
    /// A cached argument differs from a fresh recomputation.
    #[error("cached argument of {0:?} is stale")]
    StaleArgument(NodeRef),
    /// The nodes reachable from the root are not all the nodes the tree holds.
    #[error("reachable node count {counted} differs from recorded length {recorded}")]
    SizeMismatch { counted: usize, recorded: usize },
}
