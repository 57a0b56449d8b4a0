//! Chunked slot allocator that owns every node of a tree.

use std::mem;
use std::ops::{Index, IndexMut};

/// A stable reference to an object allocated in a `TypedArena<T>`.
///
/// Handles stay valid until the object they name is freed. Growing the arena never invalidates
/// them because chunks are never reallocated.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Handle {
    chunk: usize,
    slot: usize,
}

enum Slot<T> {
    Occupied(T),
    Vacant(Option<Handle>),
}

/// An allocator for a single type of object backed by fixed-capacity chunks.
///
/// Freed slots are linked into a free list and are reused by the next allocation, so a tree
/// that inserts and removes keys repeatedly does not grow without bound. Dropping or clearing the
/// arena drops every live object exactly once.
///
/// # Examples
///
/// ```
/// use rbtree_set::arena::TypedArena;
///
/// let mut arena = TypedArena::new(16);
///
/// let x = arena.allocate(1);
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
///
/// assert_eq!(arena.free(&x), 2);
/// assert!(arena.is_empty());
/// ```
pub struct TypedArena<T> {
    free_head: Option<Handle>,
    chunks: Vec<Vec<Slot<T>>>,
    chunk_size: usize,
    len: usize,
    capacity: usize,
}

impl<T> TypedArena<T> {
    fn is_valid(&self, handle: &Handle) -> bool {
        handle.chunk < self.chunks.len() && handle.slot < self.chunks[handle.chunk].len()
    }

    /// Constructs a new, empty `TypedArena<T>` that holds `chunk_size` objects per chunk.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    pub fn new(chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "Expected a non-zero chunk size.");
        TypedArena {
            free_head: None,
            chunks: Vec::new(),
            chunk_size,
            len: 0,
            capacity: 0,
        }
    }

    /// Moves `value` into the arena and returns the handle naming it.
    pub fn allocate(&mut self, value: T) -> Handle {
        self.len += 1;

        if let Some(handle) = self.free_head.take() {
            let vacant = mem::replace(
                &mut self.chunks[handle.chunk][handle.slot],
                Slot::Occupied(value),
            );
            match vacant {
                Slot::Vacant(next) => self.free_head = next,
                Slot::Occupied(_) => panic!("Expected the free list to point at a vacant slot."),
            }
            return handle;
        }

        if self.len > self.capacity {
            self.chunks.push(Vec::with_capacity(self.chunk_size));
            self.capacity += self.chunk_size;
        }
        let chunk = self.chunks.len() - 1;
        let last_chunk = &mut self.chunks[chunk];
        last_chunk.push(Slot::Occupied(value));
        Handle {
            chunk,
            slot: last_chunk.len() - 1,
        }
    }

    /// Removes the object named by `handle` from the arena and returns it.
    ///
    /// # Panics
    ///
    /// Panics if `handle` is out of bounds or names a slot that was already freed.
    pub fn free(&mut self, handle: &Handle) -> T {
        assert!(self.is_valid(handle), "Error: attempting to free invalid slot.");
        let slot = &mut self.chunks[handle.chunk][handle.slot];
        if let Slot::Vacant(_) = slot {
            panic!("Error: attempting to free vacant slot.");
        }
        match mem::replace(slot, Slot::Vacant(self.free_head.take())) {
            Slot::Occupied(value) => {
                self.len -= 1;
                self.free_head = Some(*handle);
                value
            }
            Slot::Vacant(_) => unreachable!(),
        }
    }

    /// Returns an immutable reference to an object, or `None` if the handle is invalid or vacant.
    pub fn get(&self, handle: &Handle) -> Option<&T> {
        if !self.is_valid(handle) {
            return None;
        }
        match self.chunks[handle.chunk][handle.slot] {
            Slot::Occupied(ref value) => Some(value),
            Slot::Vacant(_) => None,
        }
    }

    /// Returns a mutable reference to an object, or `None` if the handle is invalid or vacant.
    pub fn get_mut(&mut self, handle: &Handle) -> Option<&mut T> {
        if !self.is_valid(handle) {
            return None;
        }
        match self.chunks[handle.chunk][handle.slot] {
            Slot::Occupied(ref mut value) => Some(value),
            Slot::Vacant(_) => None,
        }
    }

    /// Returns the number of live objects in the arena.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the arena holds no live objects.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every live object and releases all chunks.
    pub fn clear(&mut self) {
        self.chunks.clear();
        self.free_head = None;
        self.len = 0;
        self.capacity = 0;
    }
}

impl<T> Index<Handle> for TypedArena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(&handle).expect("Expected handle to name an occupied slot.")
    }
}

impl<T> IndexMut<Handle> for TypedArena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(&handle).expect("Expected handle to name an occupied slot.")
    }
}
