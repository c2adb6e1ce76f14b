//! Common traits for max-heap containers
//!
//! This module provides a two-tier trait hierarchy:
//!
//! - [`Heap`]: Base trait for simple max-heaps (push, peek, pop, merge)
//! - [`IncreaseKeyHeap`]: Extended trait adding `increase_key` and handle-based operations
//!
//! A scheduler ready queue needs the extended tier: raising the priority of a
//! specific waiting thread (priority donation) is an `increase_key` on the
//! handle obtained when the thread was enqueued.

use core::fmt;

/// Error type for heap and sequence operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// The new priority is lower than the current priority
    PriorityNotIncreased,
    /// The handle is no longer valid (element was removed)
    InvalidHandle,
    /// The position cannot be used as an insertion anchor (the head sentinel)
    InvalidPosition,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::PriorityNotIncreased => {
                write!(f, "new priority is lower than current priority")
            }
            HeapError::InvalidHandle => {
                write!(f, "handle is no longer valid (element was removed)")
            }
            HeapError::InvalidPosition => {
                write!(f, "cannot insert before the head sentinel")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HeapError {}

/// A handle to an element in the heap, used for `increase_key` operations
///
/// Handles stay attached to their element while it moves through heap order,
/// and become invalid once the element is removed.
pub trait Handle: Clone + PartialEq + Eq {}

/// Base trait for max-heap containers
///
/// Elements are stored as (priority, item) pairs so the ordering key is
/// separate from the payload. Unlike the min-heaps common in graph algorithms,
/// these heaps return the *greatest* priority first, which is what a
/// scheduler ready queue wants.
///
/// # Example
///
/// ```rust
/// use sequence_heap::Heap;
/// use sequence_heap::PriorityList;
///
/// let mut heap = PriorityList::new();
/// heap.push(3, "three");
/// heap.push(1, "one");
/// heap.push(2, "two");
///
/// assert_eq!(heap.peek(), Some((&3, &"three")));
/// assert_eq!(heap.pop(), Some((3, "three")));
/// ```
pub trait Heap<T, P: Ord> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts an element with the given priority
    fn push(&mut self, priority: P, item: T);

    /// Returns the maximum priority and associated item without removing it
    fn peek(&self) -> Option<(&P, &T)>;

    /// Removes and returns the maximum priority and associated item,
    /// leaving the remaining elements in heap order
    fn pop(&mut self) -> Option<(P, T)>;

    /// Merges another heap into this one, consuming the other heap
    fn merge(&mut self, other: Self);
}

/// Extended heap trait with `increase_key` support
///
/// # Example
///
/// ```rust
/// use sequence_heap::{Heap, IncreaseKeyHeap, PriorityList};
///
/// let mut heap = PriorityList::new();
/// heap.push(10, "other");
/// let handle = heap.push_with_handle(5, "item");
/// heap.increase_key(&handle, 20).unwrap();
/// assert_eq!(heap.peek(), Some((&20, &"item")));
/// ```
pub trait IncreaseKeyHeap<T, P: Ord>: Heap<T, P> {
    /// The handle type for this heap
    type Handle: Handle;

    /// Inserts an element with the given priority, returning a handle
    fn push_with_handle(&mut self, priority: P, item: T) -> Self::Handle;

    /// Raises the priority of the element identified by the handle
    ///
    /// # Errors
    /// Returns `HeapError::InvalidHandle` if the element was removed, and
    /// `HeapError::PriorityNotIncreased` if the new priority is lower than
    /// the current one.
    fn increase_key(&mut self, handle: &Self::Handle, new_priority: P) -> Result<(), HeapError>;
}
