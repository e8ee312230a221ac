//! LRU List Module
//!
//! Recency ordering for cache eviction, as an arena-backed doubly-linked list.
//!
//! Nodes live in a `Vec` and link to each other by index, so touch, unlink
//! and pop-oldest are all O(1) without any unsafe pointer juggling. Freed
//! slots are recycled through a free list.

/// Null link marker.
const NIL: usize = usize::MAX;

// == Node Handle ==
/// Opaque handle to a node in an [`LruList`].
///
/// Only valid until the node is removed from the list it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Node<K> {
    key: Option<K>,
    prev: usize,
    next: usize,
}

// == LRU List ==
/// Tracks access order for LRU eviction.
///
/// - Front = least recently used (next eviction candidate)
/// - Back = most recently used
#[derive(Debug)]
pub struct LruList<K> {
    nodes: Vec<Node<K>>,
    head: usize,
    tail: usize,
    free: usize,
    len: usize,
}

impl<K> LruList<K> {
    // == Constructor ==
    /// Creates a new empty list.
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            head: NIL,
            tail: NIL,
            free: NIL,
            len: 0,
        }
    }

    // == Push Back ==
    /// Appends `key` as the most recently used node.
    pub fn push_back(&mut self, key: K) -> NodeId {
        let idx = self.alloc(key);
        self.link_back(idx);
        self.len += 1;
        NodeId(idx)
    }

    // == Touch ==
    /// Marks the node as most recently used.
    pub fn move_to_back(&mut self, id: NodeId) {
        if self.tail == id.0 {
            return;
        }
        self.unlink(id.0);
        self.link_back(id.0);
    }

    // == Remove ==
    /// Unlinks the node and returns its key.
    ///
    /// # Panics
    /// Panics if `id` does not refer to a live node of this list.
    pub fn remove(&mut self, id: NodeId) -> K {
        let key = self.nodes[id.0]
            .key
            .take()
            .expect("NodeId refers to a freed node");
        self.unlink(id.0);
        self.release(id.0);
        self.len -= 1;
        key
    }

    // == Evict Oldest ==
    /// Removes and returns the least recently used key.
    ///
    /// Returns None if the list is empty.
    pub fn pop_front(&mut self) -> Option<K> {
        if self.head == NIL {
            return None;
        }
        Some(self.remove(NodeId(self.head)))
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without removing it.
    #[allow(dead_code)]
    pub fn peek_front(&self) -> Option<&K> {
        self.nodes.get(self.head).and_then(|node| node.key.as_ref())
    }

    // == Length ==
    /// Returns the number of tracked keys.
    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.len
    }

    // == Is Empty ==
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = NIL;
        self.tail = NIL;
        self.free = NIL;
        self.len = 0;
    }

    /// Iterates keys from least to most recently used.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            nodes: &self.nodes,
            current: self.head,
            remaining: self.len,
        }
    }

    // == Internal Link Operations ==

    fn alloc(&mut self, key: K) -> usize {
        let node = Node {
            key: Some(key),
            prev: NIL,
            next: NIL,
        };
        if self.free == NIL {
            self.nodes.push(node);
            self.nodes.len() - 1
        } else {
            let idx = self.free;
            self.free = self.nodes[idx].next;
            self.nodes[idx] = node;
            idx
        }
    }

    fn release(&mut self, idx: usize) {
        self.nodes[idx].next = self.free;
        self.free = idx;
    }

    fn link_back(&mut self, idx: usize) {
        self.nodes[idx].prev = self.tail;
        self.nodes[idx].next = NIL;

        if self.tail == NIL {
            self.head = idx;
        } else {
            self.nodes[self.tail].next = idx;
        }
        self.tail = idx;
    }

    fn unlink(&mut self, idx: usize) {
        let prev = self.nodes[idx].prev;
        let next = self.nodes[idx].next;

        if prev == NIL {
            self.head = next;
        } else {
            self.nodes[prev].next = next;
        }

        if next == NIL {
            self.tail = prev;
        } else {
            self.nodes[next].prev = prev;
        }

        self.nodes[idx].prev = NIL;
        self.nodes[idx].next = NIL;
    }
}

// == Iterator ==
/// Iterator over keys in eviction order (oldest first).
pub struct Iter<'a, K> {
    nodes: &'a [Node<K>],
    current: usize,
    remaining: usize,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == NIL {
            return None;
        }
        let node = &self.nodes[self.current];
        self.current = node.next;
        self.remaining -= 1;
        node.key.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}
