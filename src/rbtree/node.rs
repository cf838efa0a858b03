use generational_arena::Index;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

/// Which child of a node. Every mirrored pair of cases in the balancing code is
/// written once in terms of a `Side` and its [`opposite`](Side::opposite).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Side {
    Left,
    Right,
}

impl Side {
    pub(super) fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A handle to a node of an [`RbTree`](super::RbTree).
///
/// Handles are plain copyable indices into the tree's node arena. They stay valid
/// until the node they point to is deleted or the tree is cleaned; after that the
/// arena generation no longer matches, and the tree treats the handle as absent
/// (reads return `None`, mutations return [`Error::StaleHandle`]).
///
/// A handle is only meaningful for the tree that handed it out.
///
/// [`Error::StaleHandle`]: crate::Error::StaleHandle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeRef(pub(super) Index);

/// A node of the tree.
///
/// `left` and `right` are owning links in the sense that the subtree hanging off
/// them belongs to this node; `parent` is only ever followed upward.
#[derive(Debug)]
pub struct Node<T, R> {
    pub(super) parent: Option<Index>,
    pub(super) left: Option<Index>,
    pub(super) right: Option<Index>,
    pub(super) color: Color,
    pub(super) value: T,
    pub(super) argument: R,
}

impl<T, R> Node<T, R> {
    /// A fresh red leaf hanging off `parent`.
    pub(super) fn new(value: T, argument: R, parent: Option<Index>) -> Self {
        Self {
            parent,
            left: None,
            right: None,
            color: Color::Red,
            value,
            argument,
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    /// The cached argument of this node's subtree.
    pub fn argument(&self) -> &R {
        &self.argument
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    pub fn is_black(&self) -> bool {
        self.color == Color::Black
    }

    pub fn left(&self) -> Option<NodeRef> {
        self.left.map(NodeRef)
    }

    pub fn right(&self) -> Option<NodeRef> {
        self.right.map(NodeRef)
    }

    /// `None` for the root.
    pub fn parent(&self) -> Option<NodeRef> {
        self.parent.map(NodeRef)
    }

    pub(super) fn child(&self, side: Side) -> Option<Index> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(super) fn child_mut(&mut self, side: Side) -> &mut Option<Index> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}
