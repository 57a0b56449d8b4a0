//! An ordered set backed by an arena-allocated red black tree.
//!
//! [`bst`] is the balancing-agnostic binary search tree core, [`red_black_tree`] plugs the red
//! black coloring discipline into it and exposes [`red_black_tree::RedBlackSet`], and [`arena`]
//! owns the nodes.

pub mod arena;
pub mod bst;
pub mod red_black_tree;
