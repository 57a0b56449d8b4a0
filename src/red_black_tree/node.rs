use crate::arena::Handle;
use crate::bst::{Balance, Tree};

/// An enum representing the color of a node in a red black tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Red,
    Black,
}

/// Color of a possibly absent node. Absent children count as black.
pub fn color_of<T, B>(tree: &Tree<T, B>, node: Option<Handle>) -> Color
where
    B: Balance<Meta = Color>,
{
    match node {
        None => Color::Black,
        Some(node) => tree.node(node).meta,
    }
}

pub fn is_red<T, B>(tree: &Tree<T, B>, node: Option<Handle>) -> bool
where
    B: Balance<Meta = Color>,
{
    color_of(tree, node) == Color::Red
}

pub fn set_color<T, B>(tree: &mut Tree<T, B>, node: Handle, color: Color)
where
    B: Balance<Meta = Color>,
{
    tree.node_mut(node).meta = color;
}
