use crate::arena::Handle;
use crate::bst::{Balance, Side, Tree};
use crate::red_black_tree::error::{Error, Stats};
use crate::red_black_tree::node::{color_of, is_red, set_color, Color};
use log::trace;

/// Red black balancing: every inserted node starts red and the fixups below restore the color
/// invariants using the tree core's rotations.
pub struct RedBlack;

pub type RedBlackTree<T> = Tree<T, RedBlack>;

impl Balance for RedBlack {
    type Meta = Color;

    fn new_meta() -> Color {
        Color::Red
    }

    fn after_insert<T>(tree: &mut RedBlackTree<T>, node: Handle) {
        fix_insert(tree, node);
    }

    fn remove_spliceable<T>(tree: &mut RedBlackTree<T>, node: Handle) -> T {
        remove(tree, node)
    }
}

fn fix_insert<T>(tree: &mut RedBlackTree<T>, mut node: Handle) {
    while let Some(mut parent) = tree.parent(node) {
        if !is_red(tree, Some(node)) || !is_red(tree, Some(parent)) {
            break;
        }

        // a red parent is never the root
        let grandparent = tree
            .parent(parent)
            .expect("Expected red parent node to have a parent.");
        let parent_side = tree
            .side_of(parent)
            .expect("Expected red parent node to have a side.");
        let uncle = tree.child(grandparent, parent_side.opposite());

        if let Some(uncle) = uncle.filter(|uncle| is_red(tree, Some(*uncle))) {
            trace!("insert fixup: red uncle {:?}", uncle);
            set_color(tree, grandparent, Color::Red);
            set_color(tree, parent, Color::Black);
            set_color(tree, uncle, Color::Black);
            node = grandparent;
            continue;
        }

        if tree.side_of(node) != Some(parent_side) {
            trace!("insert fixup: inner child {:?}", node);
            tree.rotate(parent, parent_side);
            node = parent;
            parent = tree
                .parent(node)
                .expect("Expected rotated node to have a parent.");
        }

        trace!("insert fixup: outer child {:?}", node);
        tree.rotate(grandparent, parent_side.opposite());
        let parent_color = color_of(tree, Some(parent));
        let grandparent_color = color_of(tree, Some(grandparent));
        set_color(tree, parent, grandparent_color);
        set_color(tree, grandparent, parent_color);
        break;
    }

    if let Some(root) = tree.root() {
        set_color(tree, root, Color::Black);
    }
}

// precondition: `node` has at most one child
fn remove<T>(tree: &mut RedBlackTree<T>, node: Handle) -> T {
    let (child, color) = {
        let node = tree.node(node);
        (node.only_child(), node.meta)
    };
    let double_black = !is_red(tree, child) && color == Color::Black;

    match child {
        None => {
            // the leaf stays attached while the fixup runs so that its siblings can be found
            if tree.parent(node).is_some() {
                if double_black {
                    fix_double_black(tree, node);
                } else if let Some(sibling) = tree.sibling(node) {
                    set_color(tree, sibling, Color::Red);
                }
            }
            tree.splice_out(node).0
        },
        Some(child) => {
            let (value, _) = tree.splice_out(node);
            if double_black {
                fix_double_black(tree, child);
            } else {
                set_color(tree, child, Color::Black);
            }
            value
        },
    }
}

/// Repairs a subtree rooted at `node` that is one black node short of its siblings.
fn fix_double_black<T>(tree: &mut RedBlackTree<T>, mut node: Handle) {
    loop {
        let parent = match tree.parent(node) {
            Some(parent) => parent,
            None => return,
        };
        let sibling = match tree.sibling(node) {
            Some(sibling) => sibling,
            None => {
                node = parent;
                continue;
            },
        };
        let sibling_side = tree
            .side_of(sibling)
            .expect("Expected sibling node to have a side.");

        if is_red(tree, Some(sibling)) {
            trace!("delete fixup: red sibling {:?}", sibling);
            set_color(tree, parent, Color::Red);
            set_color(tree, sibling, Color::Black);
            tree.rotate(parent, sibling_side.opposite());
            continue;
        }

        let outer = tree.child(sibling, sibling_side);
        let inner = tree.child(sibling, sibling_side.opposite());
        let parent_color = color_of(tree, Some(parent));

        if let Some(outer) = outer.filter(|outer| is_red(tree, Some(*outer))) {
            trace!("delete fixup: red outer nephew {:?}", outer);
            set_color(tree, outer, Color::Black);
            set_color(tree, sibling, parent_color);
            tree.rotate(parent, sibling_side.opposite());
            set_color(tree, parent, Color::Black);
            return;
        }

        if let Some(inner) = inner.filter(|inner| is_red(tree, Some(*inner))) {
            trace!("delete fixup: red inner nephew {:?}", inner);
            set_color(tree, inner, parent_color);
            tree.rotate(sibling, sibling_side);
            tree.rotate(parent, sibling_side.opposite());
            set_color(tree, parent, Color::Black);
            return;
        }

        set_color(tree, sibling, Color::Red);
        if parent_color == Color::Red {
            set_color(tree, parent, Color::Black);
            return;
        }
        node = parent;
    }
}

/// Checks every red black and ordering invariant of `tree`.
pub fn validate<T: Ord>(tree: &RedBlackTree<T>) -> Result<Stats, Error> {
    let mut stats = Stats {
        len: 0,
        height: 0,
        black_height: 0,
    };
    if is_red(tree, tree.root()) {
        return Err(Error::RedRoot);
    }
    let black_height = validate_subtree(tree, tree.root(), None, (None, None), 0, &mut stats)?;
    stats.black_height = black_height;
    if stats.len != tree.len() {
        return Err(Error::SizeMismatch {
            expected: tree.len(),
            actual: stats.len,
        });
    }
    Ok(stats)
}

fn validate_subtree<'a, T: Ord>(
    tree: &'a RedBlackTree<T>,
    node: Option<Handle>,
    parent: Option<Handle>,
    bounds: (Option<&'a T>, Option<&'a T>),
    depth: usize,
    stats: &mut Stats,
) -> Result<usize, Error> {
    let handle = match node {
        None => {
            stats.height = stats.height.max(depth);
            return Ok(0);
        },
        Some(handle) => handle,
    };
    let node = tree.node(handle);
    stats.len += 1;

    if node.parent != parent {
        return Err(Error::BrokenParentLink);
    }
    if node.meta == Color::Red && is_red(tree, parent) {
        return Err(Error::ConsecutiveReds);
    }
    let (lower, upper) = bounds;
    if lower.map_or(false, |lower| node.value <= *lower)
        || upper.map_or(false, |upper| node.value >= *upper)
    {
        return Err(Error::OutOfOrder);
    }

    let left = validate_subtree(
        tree,
        node.child(Side::Left),
        Some(handle),
        (lower, Some(&node.value)),
        depth + 1,
        stats,
    )?;
    let right = validate_subtree(
        tree,
        node.child(Side::Right),
        Some(handle),
        (Some(&node.value), upper),
        depth + 1,
        stats,
    )?;
    if left != right {
        return Err(Error::UnbalancedBlacks { left, right });
    }

    match node.meta {
        Color::Black => Ok(left + 1),
        Color::Red => Ok(left),
    }
}

#[cfg(test)]
mod tests {
    use super::{validate, RedBlackTree};
    use crate::bst::Side;
    use crate::red_black_tree::error::Error;
    use crate::red_black_tree::node::{set_color, Color};

    fn tree_of(values: &[u32]) -> RedBlackTree<u32> {
        let mut tree = RedBlackTree::new(8);
        for value in values {
            tree.insert(*value);
            validate(&tree).unwrap();
        }
        tree
    }

    fn color(tree: &RedBlackTree<u32>, value: u32) -> Color {
        tree.node(tree.find(&value).unwrap()).meta
    }

    fn shape(tree: &RedBlackTree<u32>, value: u32) -> (Option<u32>, Option<u32>) {
        let node = tree.find(&value).unwrap();
        let value_of = |side| tree.child(node, side).map(|child| *tree.value(child));
        (value_of(Side::Left), value_of(Side::Right))
    }

    #[test]
    fn test_insert_red_uncle_recolors() {
        let tree = tree_of(&[2, 1, 3, 4]);
        assert_eq!(*tree.value(tree.root().unwrap()), 2);
        assert_eq!(color(&tree, 1), Color::Black);
        assert_eq!(color(&tree, 3), Color::Black);
        assert_eq!(color(&tree, 4), Color::Red);
    }

    #[test]
    fn test_insert_outer_child_rotates_once() {
        let tree = tree_of(&[1, 2, 3]);
        assert_eq!(*tree.value(tree.root().unwrap()), 2);
        assert_eq!(shape(&tree, 2), (Some(1), Some(3)));
        assert_eq!(color(&tree, 2), Color::Black);
        assert_eq!(color(&tree, 1), Color::Red);
        assert_eq!(color(&tree, 3), Color::Red);
    }

    #[test]
    fn test_insert_inner_child_rotates_twice() {
        let tree = tree_of(&[3, 1, 2]);
        assert_eq!(*tree.value(tree.root().unwrap()), 2);
        assert_eq!(shape(&tree, 2), (Some(1), Some(3)));
        assert_eq!(tree.parent(tree.find(&1).unwrap()), tree.root());
        assert_eq!(tree.parent(tree.find(&3).unwrap()), tree.root());
    }

    #[test]
    fn test_remove_red_leaf() {
        let mut tree = tree_of(&[2, 1, 3, 4]);
        assert_eq!(tree.remove(&4), Some(4));
        assert_eq!(validate(&tree).unwrap().black_height, 2);
    }

    #[test]
    fn test_remove_black_node_with_red_child() {
        let mut tree = tree_of(&[2, 1, 3, 4]);
        assert_eq!(tree.remove(&3), Some(3));
        assert_eq!(shape(&tree, 2), (Some(1), Some(4)));
        assert_eq!(color(&tree, 4), Color::Black);
        validate(&tree).unwrap();
    }

    #[test]
    fn test_remove_black_leaf_outer_nephew() {
        let mut tree = tree_of(&[2, 1, 3, 4]);
        assert_eq!(tree.remove(&1), Some(1));
        assert_eq!(*tree.value(tree.root().unwrap()), 3);
        assert_eq!(shape(&tree, 3), (Some(2), Some(4)));
        assert_eq!(validate(&tree).unwrap().black_height, 2);
    }

    #[test]
    fn test_remove_black_leaf_inner_nephew() {
        let mut tree = tree_of(&[3, 1, 4, 2]);
        assert_eq!(tree.remove(&4), Some(4));
        assert_eq!(*tree.value(tree.root().unwrap()), 2);
        assert_eq!(shape(&tree, 2), (Some(1), Some(3)));
        assert_eq!(color(&tree, 1), Color::Black);
        assert_eq!(color(&tree, 3), Color::Black);
        validate(&tree).unwrap();
    }

    #[test]
    fn test_remove_black_leaf_red_sibling() {
        let mut tree = tree_of(&[2, 1, 4, 3, 5, 6, 7, 8]);
        assert_eq!(*tree.value(tree.root().unwrap()), 4);
        assert_eq!(color(&tree, 6), Color::Red);

        assert_eq!(tree.remove(&1), Some(1));
        validate(&tree).unwrap();
        assert_eq!(tree.remove(&3), Some(3));
        validate(&tree).unwrap();

        // 2 is now a black leaf whose sibling 6 is red
        assert_eq!(color(&tree, 2), Color::Black);
        assert_eq!(tree.remove(&2), Some(2));
        assert_eq!(*tree.value(tree.root().unwrap()), 6);
        assert_eq!(shape(&tree, 4), (None, Some(5)));
        validate(&tree).unwrap();
        assert_eq!(tree.iter().cloned().collect::<Vec<u32>>(), vec![4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_remove_black_leaf_black_nephews_pushes_up() {
        let mut tree = tree_of(&[4, 2, 6, 1, 3, 5, 7]);
        // all black, so the deficiency has to climb to the root
        for value in 1..=7 {
            let node = tree.find(&value).unwrap();
            set_color(&mut tree, node, Color::Black);
        }
        assert_eq!(*tree.value(tree.root().unwrap()), 4);
        assert_eq!(validate(&tree).unwrap().black_height, 3);

        assert_eq!(tree.remove(&1), Some(1));
        assert_eq!(validate(&tree).unwrap().black_height, 2);
        assert_eq!(color(&tree, 3), Color::Red);
        assert_eq!(color(&tree, 6), Color::Red);
    }

    #[test]
    fn test_remove_root_with_single_child() {
        let mut tree = tree_of(&[1, 2]);
        assert_eq!(tree.remove(&1), Some(1));
        assert_eq!(*tree.value(tree.root().unwrap()), 2);
        assert_eq!(color(&tree, 2), Color::Black);
        validate(&tree).unwrap();

        assert_eq!(tree.remove(&2), Some(2));
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
    }

    #[test]
    fn test_validate_reports_violations() {
        let mut tree = tree_of(&[2, 1, 3]);
        let root = tree.root().unwrap();

        set_color(&mut tree, root, Color::Red);
        assert_eq!(validate(&tree).unwrap_err(), Error::RedRoot);

        let one = tree.find(&1).unwrap();
        set_color(&mut tree, root, Color::Black);
        set_color(&mut tree, one, Color::Black);
        assert_eq!(
            validate(&tree).unwrap_err(),
            Error::UnbalancedBlacks { left: 1, right: 0 },
        );

        set_color(&mut tree, one, Color::Red);
        tree.node_mut(one).value = 5;
        assert_eq!(validate(&tree).unwrap_err(), Error::OutOfOrder);
    }

    #[test]
    fn test_validate_reports_consecutive_reds() {
        let mut tree = tree_of(&[2, 1, 3, 4]);
        let three = tree.find(&3).unwrap();
        set_color(&mut tree, three, Color::Red);
        assert_eq!(validate(&tree).unwrap_err(), Error::ConsecutiveReds);
    }

    #[test]
    fn test_validate_reports_broken_parent_link() {
        let mut tree = tree_of(&[2, 1, 3]);
        let one = tree.find(&1).unwrap();
        let three = tree.find(&3);
        tree.node_mut(one).parent = three;
        assert_eq!(validate(&tree).unwrap_err(), Error::BrokenParentLink);
    }
}
