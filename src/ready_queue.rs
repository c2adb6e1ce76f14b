//! Scheduler ready queue
//!
//! [`ReadyQueue`] is the facade a kernel scheduler talks to: threads are
//! enqueued with a priority, the scheduler asks for the next thread to run,
//! and priority donation raises a waiting thread's priority in place.
//!
//! Priorities run from [`PRI_MIN`] to [`PRI_MAX`]; larger values run first.
//! Threads of equal priority are served in the order they were enqueued, so
//! round-robin among equals falls out of re-enqueueing a preempted thread.
//!
//! The queue is not synchronized. Callers disable interrupts or hold the
//! scheduler lock across every call that must appear atomic, e.g. a
//! `next_to_run` followed by re-enqueueing the preempted thread.

use core::cmp::Reverse;

use tracing::{debug, trace};

use crate::node::NodeHandle;
use crate::sequence::PriorityList;
use crate::traits::{Heap, HeapError};

/// Lowest thread priority
pub const PRI_MIN: i32 = 0;
/// Priority given to threads that do not ask for one
pub const PRI_DEFAULT: i32 = 31;
/// Highest thread priority
pub const PRI_MAX: i32 = 63;

/// Identifier of a schedulable thread
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ThreadId(pub u32);

/// Handle to a thread waiting in a [`ReadyQueue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReadyHandle(NodeHandle);

/// Heap key: priority first, then earliest enqueue wins
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct ReadyKey {
    priority: i32,
    ticket: Reverse<u64>,
}

/// Priority-ordered set of runnable threads
#[derive(Debug, Default)]
pub struct ReadyQueue {
    threads: PriorityList<ThreadId, ReadyKey>,
    next_ticket: u64,
}

impl ReadyQueue {
    /// Creates an empty ready queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty ready queue with room for `capacity` threads
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            threads: PriorityList::with_capacity(capacity),
            next_ticket: 0,
        }
    }

    /// Number of runnable threads
    pub fn len(&self) -> usize {
        self.threads.len()
    }

    /// True if no thread is runnable
    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }

    /// Makes `tid` runnable at `priority`, clamped to `PRI_MIN..=PRI_MAX`
    pub fn enqueue(&mut self, tid: ThreadId, priority: i32) -> ReadyHandle {
        let key = ReadyKey {
            priority: clamp_priority(priority),
            ticket: Reverse(self.next_ticket),
        };
        self.next_ticket += 1;
        trace!(tid = tid.0, priority = key.priority, "enqueue");
        ReadyHandle(self.threads.max_heap_insert(key, tid))
    }

    /// Removes and returns the highest-priority runnable thread
    pub fn next_to_run(&mut self) -> Option<ThreadId> {
        let (key, tid) = self.threads.pop()?;
        debug!(tid = tid.0, priority = key.priority, waiting = self.len(), "dispatch");
        Some(tid)
    }

    /// The thread `next_to_run` would return, with its priority
    pub fn peek(&self) -> Option<(ThreadId, i32)> {
        self.threads.peek().map(|(key, tid)| (*tid, key.priority))
    }

    /// Current priority of a waiting thread
    pub fn priority_of(&self, handle: ReadyHandle) -> Option<i32> {
        self.threads.priority(handle.0).map(|key| key.priority)
    }

    /// The thread behind `handle`, if it is still waiting
    pub fn thread(&self, handle: ReadyHandle) -> Option<ThreadId> {
        self.threads.get(handle.0).map(|node| *node.item())
    }

    /// Raises a waiting thread's priority (priority donation)
    ///
    /// Returns `Ok(false)` without touching the queue when the clamped
    /// priority does not exceed the current one; a thread keeps its place
    /// among equals.
    ///
    /// # Errors
    /// `HeapError::InvalidHandle` if the thread already left the queue.
    pub fn raise_priority(&mut self, handle: ReadyHandle, priority: i32) -> Result<bool, HeapError> {
        let current = *self.threads.priority(handle.0).ok_or(HeapError::InvalidHandle)?;
        let priority = clamp_priority(priority);
        if priority <= current.priority {
            return Ok(false);
        }
        self.threads.heap_increase_key(
            handle.0,
            ReadyKey {
                priority,
                ..current
            },
        )?;
        trace!(from = current.priority, to = priority, "priority raised");
        Ok(true)
    }

    /// Takes a thread out of the queue, e.g. because it blocked or exited
    ///
    /// # Errors
    /// `HeapError::InvalidHandle` if the thread already left the queue.
    pub fn remove(&mut self, handle: ReadyHandle) -> Result<ThreadId, HeapError> {
        let (_, tid) = self.threads.heap_delete(handle.0)?;
        trace!(tid = tid.0, "removed from ready queue");
        Ok(tid)
    }
}

fn clamp_priority(priority: i32) -> i32 {
    priority.clamp(PRI_MIN, PRI_MAX)
}
