//! Recency List Module
//!
//! Arena-backed doubly-linked list ordering entries by access time.

use crate::cache::entry::{Entry, Node};

// == Handle ==
/// Stable reference to an entry's slot in the recency list.
///
/// A handle stays valid until its entry is removed from the back of the
/// list; after that the slot may be reused by a later `push_front`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(usize);

impl Handle {
    #[cfg(test)]
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

// == Recency List ==
/// Orders entries from most recently used to least recently used.
///
/// Nodes live in a single `Vec` and link to each other by index:
/// - Front (head) = Most recently used
/// - Back (tail) = Least recently used
///
/// Slots vacated by `remove_back` go on a free list and are reused, so the
/// arena never holds more slots than the peak number of live entries.
#[derive(Debug)]
pub struct RecencyList<K, V> {
    /// Node storage, `None` marks a free slot
    slots: Vec<Option<Node<K, V>>>,
    /// Indices of free slots
    free: Vec<usize>,
    head: Option<Handle>,
    tail: Option<Handle>,
    len: usize,
}

impl<K, V> Default for RecencyList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> RecencyList<K, V> {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    // == Push Front ==
    /// Inserts a new entry as the most recently used and returns its handle.
    pub fn push_front(&mut self, entry: Entry<K, V>) -> Handle {
        let node = Node::detached(entry);
        let handle = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                Handle(idx)
            }
            None => {
                self.slots.push(Some(node));
                Handle(self.slots.len() - 1)
            }
        };

        self.attach_front(handle);
        self.len += 1;
        handle
    }

    // == Move To Front ==
    /// Marks the entry at `handle` as the most recently used.
    ///
    /// The node is always detached and reattached, even when it is already
    /// at the front. A handle to a free slot is ignored.
    pub fn move_to_front(&mut self, handle: Handle) {
        if self.node(handle).is_none() {
            return;
        }
        self.detach(handle);
        self.attach_front(handle);
    }

    // == Remove Back ==
    /// Removes and returns the least recently used entry.
    ///
    /// Returns None if the list is empty.
    pub fn remove_back(&mut self) -> Option<Entry<K, V>> {
        let tail = self.tail?;
        self.detach(tail);

        let node = self.slots[tail.0].take()?;
        self.free.push(tail.0);
        self.len -= 1;
        Some(node.entry)
    }

    // == Accessors ==
    /// Returns the entry at `handle`, if the slot is occupied.
    pub fn get(&self, handle: Handle) -> Option<&Entry<K, V>> {
        self.node(handle).map(|node| &node.entry)
    }

    /// Returns a mutable reference to the entry at `handle`.
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut Entry<K, V>> {
        self.node_mut(handle).map(|node| &mut node.entry)
    }

    /// Returns the least recently used entry without removing it.
    #[cfg(test)]
    pub(crate) fn peek_back(&self) -> Option<&Entry<K, V>> {
        self.tail.and_then(|tail| self.get(tail))
    }

    // == Length ==
    /// Returns the number of entries in the list.
    pub fn len(&self) -> usize {
        self.len
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Walks the list from front to back.
    #[cfg(test)]
    pub(crate) fn iter(&self) -> impl Iterator<Item = &Entry<K, V>> + '_ {
        let mut cursor = self.head;
        std::iter::from_fn(move || {
            let node = self.node(cursor?)?;
            cursor = node.next;
            Some(&node.entry)
        })
    }

    /// Checks that forward and backward links agree with each other and
    /// with the stored length.
    #[cfg(test)]
    pub(crate) fn links_are_consistent(&self) -> bool {
        let mut forward = Vec::new();
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(handle) = cursor {
            let Some(node) = self.node(handle) else {
                return false;
            };
            if node.prev != prev || forward.len() > self.len {
                return false;
            }
            forward.push(handle);
            prev = Some(handle);
            cursor = node.next;
        }

        forward.len() == self.len && self.tail == prev
    }

    // == Internal Helpers ==
    fn node(&self, handle: Handle) -> Option<&Node<K, V>> {
        self.slots.get(handle.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, handle: Handle) -> Option<&mut Node<K, V>> {
        self.slots.get_mut(handle.0).and_then(Option::as_mut)
    }

    /// Unlinks a node from its neighbours, leaving it in its slot.
    fn detach(&mut self, handle: Handle) {
        let (prev, next) = match self.node(handle) {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(prev_handle) => {
                if let Some(prev_node) = self.node_mut(prev_handle) {
                    prev_node.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(next_handle) => {
                if let Some(next_node) = self.node_mut(next_handle) {
                    next_node.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if let Some(node) = self.node_mut(handle) {
            node.prev = None;
            node.next = None;
        }
    }

    /// Links a detached node in as the new head.
    fn attach_front(&mut self, handle: Handle) {
        let old_head = self.head;
        match self.node_mut(handle) {
            Some(node) => {
                node.prev = None;
                node.next = old_head;
            }
            None => return,
        }

        if let Some(head_handle) = old_head {
            if let Some(head_node) = self.node_mut(head_handle) {
                head_node.prev = Some(handle);
            }
        }

        self.head = Some(handle);
        if self.tail.is_none() {
            self.tail = Some(handle);
        }
    }
}
