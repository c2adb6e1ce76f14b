//! Node records stored in a [`PriorityList`](crate::PriorityList).
//!
//! A node pairs the client's payload with its priority key and the rank it
//! currently occupies in the sequence. Nodes live in the container's arena and
//! are addressed through a [`NodeHandle`], a generational key that stays
//! attached to the payload while heap operations move it around and goes
//! stale once the node is removed.

use slotmap::new_key_type;

use crate::traits::Handle;

new_key_type! {
    /// Stable handle to a node in a [`PriorityList`](crate::PriorityList)
    pub struct NodeHandle;
}

impl Handle for NodeHandle {}

/// An element participating in both the sequence and the implicit binary tree
#[derive(Debug, Clone)]
pub struct Node<T, P> {
    pub(crate) item: T,
    pub(crate) priority: P,
    /// 1-based position in the sequence, renumbered on every mutation
    pub(crate) rank: usize,
}

impl<T, P> Node<T, P> {
    pub(crate) fn new(item: T, priority: P, rank: usize) -> Self {
        Self {
            item,
            priority,
            rank,
        }
    }

    /// The ordering key
    #[inline]
    pub fn priority(&self) -> &P {
        &self.priority
    }

    /// 1-based distance from the front of the sequence
    ///
    /// This is also the node's index in the implicit binary tree: the parent
    /// sits at `rank / 2`, the children at `rank * 2` and `rank * 2 + 1`.
    #[inline]
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// The client payload
    #[inline]
    pub fn item(&self) -> &T {
        &self.item
    }

    /// Mutable access to the client payload
    ///
    /// The priority is deliberately not exposed mutably: changing it without
    /// restoring heap order would break the max-heap invariant. Use
    /// [`PriorityList::heap_increase_key`](crate::PriorityList::heap_increase_key).
    #[inline]
    pub fn item_mut(&mut self) -> &mut T {
        &mut self.item
    }

    pub(crate) fn into_parts(self) -> (P, T) {
        (self.priority, self.item)
    }
}
