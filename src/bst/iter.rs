use crate::arena::{Handle, TypedArena};
use crate::bst::node::Node;
use crate::bst::tree::Tree;
use crate::bst::Balance;

/// An in-order iterator over the values of a `Tree<T, B>`.
pub struct Iter<'a, T, B: Balance> {
    tree: &'a Tree<T, B>,
    stack: Vec<Handle>,
    current: Option<Handle>,
    remaining: usize,
}

impl<'a, T, B: Balance> Iter<'a, T, B> {
    pub(crate) fn new(tree: &'a Tree<T, B>) -> Self {
        Iter {
            tree,
            stack: Vec::new(),
            current: tree.root,
            remaining: tree.len,
        }
    }
}

impl<'a, T, B: Balance> Iterator for Iter<'a, T, B>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        while let Some(handle) = self.current {
            self.stack.push(handle);
            self.current = tree.node(handle).left;
        }
        let node = tree.node(self.stack.pop()?);
        self.current = node.right;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, B: Balance> ExactSizeIterator for Iter<'a, T, B> where T: 'a {}

/// An owning in-order iterator over the values of a `Tree<T, B>`.
///
/// Each node is freed from the arena as its value is yielded; the rest are dropped with the
/// iterator.
pub struct IntoIter<T, B: Balance> {
    arena: TypedArena<Node<T, B::Meta>>,
    stack: Vec<Handle>,
    current: Option<Handle>,
}

impl<T, B: Balance> Iterator for IntoIter<T, B> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(handle) = self.current {
            self.stack.push(handle);
            self.current = self.arena[handle].left;
        }
        let node = self.arena.free(&self.stack.pop()?);
        self.current = node.right;
        Some(node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.arena.len(), Some(self.arena.len()))
    }
}

impl<T, B: Balance> ExactSizeIterator for IntoIter<T, B> {}

impl<T, B: Balance> Tree<T, B> {
    pub fn iter(&self) -> Iter<'_, T, B> {
        Iter::new(self)
    }
}

impl<T, B: Balance> IntoIterator for Tree<T, B> {
    type IntoIter = IntoIter<T, B>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            current: self.root,
            arena: self.arena,
            stack: Vec::new(),
        }
    }
}

impl<'a, T, B: Balance> IntoIterator for &'a Tree<T, B>
where
    T: 'a,
{
    type IntoIter = Iter<'a, T, B>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::bst::tree::tests::Plain;
    use crate::bst::Tree;

    #[test]
    fn test_iter() {
        let mut tree: Tree<u32, Plain> = Tree::new(2);
        for value in &[4, 2, 6, 1, 3, 5, 7] {
            tree.insert(*value);
        }

        let mut iter = tree.iter();
        assert_eq!(iter.len(), 7);
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.len(), 6);
        assert_eq!(iter.collect::<Vec<&u32>>(), vec![&2, &3, &4, &5, &6, &7]);
    }

    #[test]
    fn test_into_iter() {
        let mut tree: Tree<String, Plain> = Tree::new(2);
        for value in &["m", "c", "x", "a"] {
            tree.insert(value.to_string());
        }

        let mut iter = tree.into_iter();
        assert_eq!(iter.next(), Some(String::from("a")));
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.collect::<Vec<String>>(), vec!["c", "m", "x"]);
    }

    #[test]
    fn test_iter_empty() {
        let tree: Tree<u32, Plain> = Tree::new(2);
        assert_eq!(tree.iter().next(), None);
        assert_eq!(tree.into_iter().next(), None);
    }
}
