//! Sequence container
//!
//! [`PriorityList`] keeps its nodes in an explicit order bounded by two
//! sentinel positions, [`Position::Head`] and [`Position::Tail`]. The order is
//! stored contiguously as a vector of handles, so a node's rank (its 1-based
//! distance from the front) is its slot index plus one, and every splice
//! renumbers the nodes it shifts. Nodes themselves live in a `slotmap` arena,
//! which gives clients stable generational handles and makes stale handles
//! detectable.
//!
//! # Time Complexity
//!
//! | Operation                  | Complexity |
//! |----------------------------|------------|
//! | `push_back` / `pop_back`   | O(1)       |
//! | `insert_before` / `remove` | O(n)       |
//! | `push_front` / `pop_front` | O(n)       |
//! | `front` / `back` / `len`   | O(1)       |
//! | `rank` / `at_rank`         | O(1)       |
//!
//! # Concurrency
//!
//! There is no internal synchronization. A scheduler sharing a list between
//! interrupt context and thread context must hold its own lock (or disable
//! preemption) across every multi-step sequence such as extract-then-reinsert.

use alloc::vec::Vec;
use core::fmt;

use slotmap::SlotMap;
use tracing::trace;

use crate::node::{Node, NodeHandle};
use crate::traits::HeapError;

/// A place in the sequence: one of the two sentinels or a live node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    /// Boundary before the front; rank 0
    Head,
    /// A live node
    Node(NodeHandle),
    /// Boundary after the back
    Tail,
}

impl Position {
    /// The node handle, if this position is not a sentinel
    pub fn node(self) -> Option<NodeHandle> {
        match self {
            Position::Node(handle) => Some(handle),
            Position::Head | Position::Tail => None,
        }
    }
}

impl From<NodeHandle> for Position {
    fn from(handle: NodeHandle) -> Self {
        Position::Node(handle)
    }
}

/// What [`PriorityList::remove`] hands back to the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removed<T, P> {
    /// Priority the node had when it was removed
    pub priority: P,
    /// The client payload
    pub item: T,
    /// The position that followed the removed node
    pub next: Position,
}

/// Ordered sequence of prioritized nodes with max-heap algorithms layered on
/// top (see the [`heap`](crate::heap) module)
pub struct PriorityList<T, P> {
    nodes: SlotMap<NodeHandle, Node<T, P>>,
    /// `order[i]` holds the node of rank `i + 1`
    order: Vec<NodeHandle>,
}

impl<T, P> PriorityList<T, P> {
    /// Creates an empty list: the sentinels are adjacent
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    /// Creates an empty list with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
            order: Vec::with_capacity(capacity),
        }
    }

    /// Number of live nodes
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True iff the front is the tail sentinel
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The head sentinel
    #[inline]
    pub fn head(&self) -> Position {
        Position::Head
    }

    /// The tail sentinel
    #[inline]
    pub fn tail(&self) -> Position {
        Position::Tail
    }

    /// First live node, or `None` if the list is empty
    #[inline]
    pub fn front(&self) -> Option<NodeHandle> {
        self.order.first().copied()
    }

    /// Last live node, or `None` if the list is empty
    #[inline]
    pub fn back(&self) -> Option<NodeHandle> {
        self.order.last().copied()
    }

    /// Returns true if `handle` refers to a live node of this list
    #[inline]
    pub fn contains(&self, handle: NodeHandle) -> bool {
        self.nodes.contains_key(handle)
    }

    /// The node record behind `handle`
    #[inline]
    pub fn get(&self, handle: NodeHandle) -> Option<&Node<T, P>> {
        self.nodes.get(handle)
    }

    /// Mutable access to the node record behind `handle`
    #[inline]
    pub fn get_mut(&mut self, handle: NodeHandle) -> Option<&mut Node<T, P>> {
        self.nodes.get_mut(handle)
    }

    /// Current priority of `handle`
    #[inline]
    pub fn priority(&self, handle: NodeHandle) -> Option<&P> {
        self.nodes.get(handle).map(Node::priority)
    }

    /// Current rank of `handle`
    #[inline]
    pub fn rank(&self, handle: NodeHandle) -> Option<usize> {
        self.nodes.get(handle).map(Node::rank)
    }

    /// Node at the given 1-based rank
    #[inline]
    pub fn at_rank(&self, rank: usize) -> Option<NodeHandle> {
        let index = rank.checked_sub(1)?;
        self.order.get(index).copied()
    }

    /// Position following `position`
    ///
    /// The successor of the back node (or of the tail itself) is the tail;
    /// the successor of the head is the front, or the tail if empty. A stale
    /// handle yields `None`.
    pub fn next(&self, position: Position) -> Option<Position> {
        let rank = match position {
            Position::Head => 0,
            Position::Node(handle) => self.rank(handle)?,
            Position::Tail => return Some(Position::Tail),
        };
        Some(self.position_at(rank + 1))
    }

    /// Position preceding `position`, mirroring [`next`](Self::next)
    pub fn prev(&self, position: Position) -> Option<Position> {
        let rank = match position {
            Position::Head => return Some(Position::Head),
            Position::Node(handle) => self.rank(handle)?,
            Position::Tail => self.len() + 1,
        };
        Some(self.position_at(rank - 1))
    }

    fn position_at(&self, rank: usize) -> Position {
        if rank == 0 {
            Position::Head
        } else {
            self.at_rank(rank).map_or(Position::Tail, Position::Node)
        }
    }

    /// Inserts a node immediately before `before`
    ///
    /// `before` may be a live node or the tail sentinel; inserting before the
    /// tail appends. The new node takes the rank `before` had and every node
    /// from `before` onwards is renumbered.
    ///
    /// # Errors
    /// `HeapError::InvalidPosition` if `before` is the head sentinel,
    /// `HeapError::InvalidHandle` if `before` is a removed node.
    pub fn insert_before(
        &mut self,
        before: Position,
        priority: P,
        item: T,
    ) -> Result<NodeHandle, HeapError> {
        let index = match before {
            Position::Head => return Err(HeapError::InvalidPosition),
            Position::Node(handle) => self.rank(handle).ok_or(HeapError::InvalidHandle)? - 1,
            Position::Tail => self.order.len(),
        };
        Ok(self.insert_at(index, priority, item))
    }

    /// Inserts a node at the front of the list
    pub fn push_front(&mut self, priority: P, item: T) -> NodeHandle {
        self.insert_at(0, priority, item)
    }

    /// Inserts a node at the back of the list
    pub fn push_back(&mut self, priority: P, item: T) -> NodeHandle {
        self.insert_at(self.order.len(), priority, item)
    }

    fn insert_at(&mut self, index: usize, priority: P, item: T) -> NodeHandle {
        let handle = self.nodes.insert(Node::new(item, priority, index + 1));
        self.order.insert(index, handle);
        self.renumber_from(index + 1);
        trace!(rank = index + 1, len = self.order.len(), "inserted node");
        handle
    }

    /// Removes `handle` from the list
    ///
    /// The removed handle becomes stale; every node after it moves up one
    /// rank.
    ///
    /// # Errors
    /// `HeapError::InvalidHandle` if the node is not live in this list.
    pub fn remove(&mut self, handle: NodeHandle) -> Result<Removed<T, P>, HeapError> {
        let rank = self.rank(handle).ok_or(HeapError::InvalidHandle)?;
        let (priority, item) = self.remove_at(rank - 1);
        Ok(Removed {
            priority,
            item,
            next: self.position_at(rank),
        })
    }

    /// Removes and returns the front node, or `None` if the list is empty
    pub fn pop_front(&mut self) -> Option<(P, T)> {
        if self.order.is_empty() {
            return None;
        }
        Some(self.remove_at(0))
    }

    /// Removes and returns the back node, or `None` if the list is empty
    pub fn pop_back(&mut self) -> Option<(P, T)> {
        let index = self.order.len().checked_sub(1)?;
        Some(self.remove_at(index))
    }

    fn remove_at(&mut self, index: usize) -> (P, T) {
        let handle = self.order.remove(index);
        self.renumber_from(index);
        trace!(rank = index + 1, len = self.order.len(), "removed node");
        match self.nodes.remove(handle) {
            Some(node) => node.into_parts(),
            // order and nodes are only ever mutated together
            None => unreachable!("sequence slot without a node"),
        }
    }

    /// Removes every node, invalidating all handles
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.order.clear();
    }

    /// Iterates over the live nodes from front to back
    pub fn iter(&self) -> Iter<'_, T, P> {
        Iter {
            nodes: &self.nodes,
            order: self.order.iter(),
        }
    }

    /// Exchanges the nodes at two 0-based slots, keeping ranks current
    pub(crate) fn swap_slots(&mut self, a: usize, b: usize) {
        self.order.swap(a, b);
        self.nodes[self.order[a]].rank = a + 1;
        self.nodes[self.order[b]].rank = b + 1;
    }

    /// Priority of the node at a 0-based slot
    pub(crate) fn slot_priority(&self, index: usize) -> &P {
        &self.nodes[self.order[index]].priority
    }

    /// Rewrites ranks from the 0-based slot `start` to the back
    fn renumber_from(&mut self, start: usize) {
        for (index, handle) in self.order.iter().enumerate().skip(start) {
            self.nodes[*handle].rank = index + 1;
        }
    }
}

impl<T, P> Default for PriorityList<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, P: fmt::Debug> fmt::Debug for PriorityList<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|(_, node)| (&node.priority, &node.item)))
            .finish()
    }
}

impl<T, P> Extend<(P, T)> for PriorityList<T, P> {
    /// Appends in iteration order without restoring heap order
    fn extend<I: IntoIterator<Item = (P, T)>>(&mut self, iter: I) {
        for (priority, item) in iter {
            self.push_back(priority, item);
        }
    }
}

impl<T, P> FromIterator<(P, T)> for PriorityList<T, P> {
    fn from_iter<I: IntoIterator<Item = (P, T)>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

/// Front-to-back iterator over `(handle, node)` pairs
pub struct Iter<'a, T, P> {
    nodes: &'a SlotMap<NodeHandle, Node<T, P>>,
    order: core::slice::Iter<'a, NodeHandle>,
}

impl<'a, T, P> Iterator for Iter<'a, T, P> {
    type Item = (NodeHandle, &'a Node<T, P>);

    fn next(&mut self) -> Option<Self::Item> {
        let handle = *self.order.next()?;
        Some((handle, &self.nodes[handle]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<T, P> DoubleEndedIterator for Iter<'_, T, P> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let handle = *self.order.next_back()?;
        Some((handle, &self.nodes[handle]))
    }
}

impl<T, P> ExactSizeIterator for Iter<'_, T, P> {}

impl<'a, T, P> IntoIterator for &'a PriorityList<T, P> {
    type Item = (NodeHandle, &'a Node<T, P>);
    type IntoIter = Iter<'a, T, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
