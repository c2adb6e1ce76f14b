//! Max-heap ordered sequences for scheduler ready queues
//!
//! This crate provides [`PriorityList`], a container that keeps its elements
//! in an explicit front-to-back sequence and, at the same time, treats that
//! sequence as an implicit binary tree ordered as a max-heap. A node's rank
//! (its 1-based position in the sequence) is its tree index, so the parent and
//! children of any node are found by rank arithmetic.
//!
//! # Features
//!
//! - **Sequence operations**: `insert_before`, `push_front`/`push_back`,
//!   `remove`, `pop_front`/`pop_back`, sentinel-bounded navigation
//! - **Position resolver**: parent/left/right lookups derived from the
//!   always-current rank
//! - **Heap algorithms**: `max_heapify`, `build_max_heap`, `percolate`,
//!   `max_heap_insert`, `heap_increase_key`, `heap_extract_max`
//! - **Stable handles**: elements move as whole records, so a [`NodeHandle`]
//!   keeps identifying the same payload; removed handles are detected
//! - **Ready queue**: a scheduler-facing facade with priority donation
//!
//! `no_std` is supported by disabling the default `std` feature; the crate
//! then only needs `alloc`.
//!
//! # Example
//!
//! ```rust
//! use sequence_heap::{Heap, IncreaseKeyHeap, PriorityList};
//!
//! let mut heap = PriorityList::new();
//! let idle = heap.push_with_handle(1, "idle");
//! heap.push(10, "shell");
//! heap.increase_key(&idle, 20).unwrap();
//! assert_eq!(heap.peek(), Some((&20, &"idle")));
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]

extern crate alloc;

pub mod heap;
pub mod node;
pub mod position;
pub mod ready_queue;
pub mod sequence;
pub mod traits;

// Re-export the main types for convenience
pub use node::{Node, NodeHandle};
pub use ready_queue::{ReadyHandle, ReadyQueue, ThreadId};
pub use sequence::{Position, PriorityList, Removed};
pub use traits::{Handle, Heap, HeapError, IncreaseKeyHeap};
