//! Ordered binary search tree core shared by balancing strategies.
//!
//! The core owns node allocation, plain descent, attaching and splicing nodes, and the two
//! rotations. A [`Balance`] policy decides what happens after a node is attached and how a node
//! with at most one child is removed, using only the structural operations exposed here.

mod iter;
mod node;
mod tree;

pub use self::iter::{IntoIter, Iter};
pub use self::node::{Node, Side};
pub use self::tree::Tree;

use crate::arena::Handle;

/// A balancing strategy plugged into [`Tree`].
///
/// The tree never reads `Meta`; it only stores it next to each value.
pub trait Balance: Sized {
    /// Per-node bookkeeping owned by the strategy.
    type Meta: Copy;

    /// Metadata given to a freshly allocated node.
    fn new_meta() -> Self::Meta;

    /// Restores the strategy's invariants after `node` was attached by
    /// [`Tree::insert_unbalanced`].
    fn after_insert<T>(tree: &mut Tree<T, Self>, node: Handle);

    /// Removes `node`, which has at most one child, and returns its value.
    fn remove_spliceable<T>(tree: &mut Tree<T, Self>, node: Handle) -> T;
}
