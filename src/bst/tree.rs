use crate::arena::{Handle, TypedArena};
use crate::bst::node::{Node, Side};
use crate::bst::Balance;
use log::{debug, trace};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::marker::PhantomData;
use std::mem;

/// A binary search tree whose nodes live in a `TypedArena` and whose shape is maintained by the
/// balancing policy `B`.
pub struct Tree<T, B: Balance> {
    pub(super) arena: TypedArena<Node<T, B::Meta>>,
    pub(super) root: Option<Handle>,
    pub(super) len: usize,
    policy: PhantomData<B>,
}

impl<T, B: Balance> Tree<T, B> {
    pub fn new(chunk_size: usize) -> Self {
        Tree {
            arena: TypedArena::new(chunk_size),
            root: None,
            len: 0,
            policy: PhantomData,
        }
    }

    pub fn root(&self) -> Option<Handle> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn node(&self, node: Handle) -> &Node<T, B::Meta> {
        &self.arena[node]
    }

    pub fn node_mut(&mut self, node: Handle) -> &mut Node<T, B::Meta> {
        &mut self.arena[node]
    }

    pub fn value(&self, node: Handle) -> &T {
        &self.arena[node].value
    }

    pub fn parent(&self, node: Handle) -> Option<Handle> {
        self.arena[node].parent
    }

    pub fn child(&self, node: Handle, side: Side) -> Option<Handle> {
        self.arena[node].child(side)
    }

    /// Returns which child slot of its parent holds `node`, or `None` for the root.
    pub fn side_of(&self, node: Handle) -> Option<Side> {
        let parent = &self.arena[self.parent(node)?];
        if parent.left == Some(node) {
            Some(Side::Left)
        } else {
            debug_assert_eq!(parent.right, Some(node));
            Some(Side::Right)
        }
    }

    pub fn sibling(&self, node: Handle) -> Option<Handle> {
        let side = self.side_of(node)?;
        let parent = self.parent(node)?;
        self.child(parent, side.opposite())
    }

    /// Points the slot that held `old` (a child of `parent`, or the root) at `new`.
    fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let parent = &mut self.arena[parent];
                if parent.left == Some(old) {
                    parent.left = new;
                } else {
                    debug_assert_eq!(parent.right, Some(old));
                    parent.right = new;
                }
            },
        }
    }

    pub fn find<V>(&self, key: &V) -> Option<Handle>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut curr = self.root;
        while let Some(handle) = curr {
            let node = &self.arena[handle];
            curr = match key.cmp(node.value.borrow()) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(handle),
            };
        }
        None
    }

    /// Allocates a node and attaches it as a leaf without rebalancing.
    ///
    /// The caller guarantees that `value` is not already in the tree.
    pub fn insert_unbalanced(&mut self, value: T, meta: B::Meta) -> Handle
    where
        T: Ord,
    {
        let mut parent = None;
        let mut side = Side::Left;
        let mut curr = self.root;
        while let Some(handle) = curr {
            let node = &self.arena[handle];
            debug_assert!(value != node.value);
            side = if value < node.value {
                Side::Left
            } else {
                Side::Right
            };
            parent = Some(handle);
            curr = node.child(side);
        }

        let mut new_node = Node::new(value, meta);
        new_node.parent = parent;
        let handle = self.arena.allocate(new_node);
        match parent {
            None => self.root = Some(handle),
            Some(parent) => *self.arena[parent].child_mut(side) = Some(handle),
        }
        self.len += 1;
        handle
    }

    /// Unlinks a node with at most one child, moving that child into its slot, and frees it.
    ///
    /// Returns the freed value and the node that took over the slot.
    pub fn splice_out(&mut self, node: Handle) -> (T, Option<Handle>) {
        let (child, parent) = {
            let node = &self.arena[node];
            (node.only_child(), node.parent)
        };
        self.replace_child(parent, node, child);
        if let Some(child) = child {
            self.arena[child].parent = parent;
        }
        self.len -= 1;
        (self.arena.free(&node).value, child)
    }

    pub fn min_node(&self, subtree: Option<Handle>) -> Option<Handle> {
        let mut curr = subtree?;
        while let Some(left) = self.arena[curr].left {
            curr = left;
        }
        Some(curr)
    }

    pub fn max_node(&self, subtree: Option<Handle>) -> Option<Handle> {
        let mut curr = subtree?;
        while let Some(right) = self.arena[curr].right {
            curr = right;
        }
        Some(curr)
    }

    /// Moves `node` one level down towards `side`; its child on the opposite side takes its place.
    /// Returns the new root of the rotated subtree.
    ///
    /// # Panics
    ///
    /// Panics if `node` has no child on the opposite side.
    pub fn rotate(&mut self, node: Handle, side: Side) -> Handle {
        let pivot = self.arena[node]
            .child(side.opposite())
            .expect("Expected rotated child node to be `Some`.");
        trace!("rotating {:?} {:?} around {:?}", node, side, pivot);

        let inner = self.arena[pivot].child(side);
        *self.arena[node].child_mut(side.opposite()) = inner;
        if let Some(inner) = inner {
            self.arena[inner].parent = Some(node);
        }

        let parent = self.arena[node].parent;
        self.arena[pivot].parent = parent;
        self.replace_child(parent, node, Some(pivot));

        *self.arena[pivot].child_mut(side) = Some(node);
        self.arena[node].parent = Some(pivot);
        pivot
    }

    pub fn rotate_left(&mut self, node: Handle) -> Handle {
        self.rotate(node, Side::Left)
    }

    pub fn rotate_right(&mut self, node: Handle) -> Handle {
        self.rotate(node, Side::Right)
    }

    /// Number of nodes on the longest path from the root.
    pub fn height(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(Handle, usize)> = self.root.iter().map(|root| (*root, 1)).collect();
        while let Some((handle, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            let node = &self.arena[handle];
            stack.extend(node.left.iter().chain(node.right.iter()).map(|child| (*child, depth + 1)));
        }
        max_depth
    }

    pub fn clear(&mut self) {
        debug!("clearing tree of {} nodes", self.len);
        self.arena.clear();
        self.root = None;
        self.len = 0;
    }

    /// Inserts `value` unless an equal value is present, and returns the node holding it.
    pub fn insert(&mut self, value: T) -> Handle
    where
        T: Ord,
    {
        if let Some(existing) = self.find(&value) {
            return existing;
        }
        let node = self.insert_unbalanced(value, B::new_meta());
        B::after_insert(self, node);
        node
    }

    /// Removes the value equal to `key` and returns it, or returns `None` if it is absent.
    ///
    /// A node with two children keeps its place: its in-order successor is removed instead and
    /// the successor's value moves into it.
    pub fn remove<V>(&mut self, key: &V) -> Option<T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let node = self.find(key)?;
        let (left, right) = {
            let node = &self.arena[node];
            (node.left, node.right)
        };
        if left.is_some() && right.is_some() {
            let successor = self.min_node(right).expect("Expected a non-empty right subtree.");
            let successor_value = B::remove_spliceable(self, successor);
            Some(mem::replace(&mut self.arena[node].value, successor_value))
        } else {
            Some(B::remove_spliceable(self, node))
        }
    }
}
