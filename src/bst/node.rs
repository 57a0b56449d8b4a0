use crate::arena::Handle;

/// Which child slot of a node is meant.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A struct representing an internal node of a binary search tree.
///
/// `meta` belongs to the balancing policy; the tree core only moves it around with the node.
/// `parent` is a plain back reference and never owns anything.
pub struct Node<T, M> {
    pub value: T,
    pub meta: M,
    pub left: Option<Handle>,
    pub right: Option<Handle>,
    pub parent: Option<Handle>,
}

impl<T, M> Node<T, M> {
    pub fn new(value: T, meta: M) -> Self {
        Node {
            value,
            meta,
            left: None,
            right: None,
            parent: None,
        }
    }

    pub fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn child_mut(&mut self, side: Side) -> &mut Option<Handle> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Returns the only child of a node with at most one child.
    pub fn only_child(&self) -> Option<Handle> {
        debug_assert!(self.left.is_none() || self.right.is_none());
        self.left.or(self.right)
    }
}
