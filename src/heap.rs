//! Max-heap algorithms over the sequence
//!
//! The sequence doubles as an implicit binary tree: the node of rank `r` has
//! its parent at rank `r / 2` and its children at `2r` and `2r + 1` (see
//! [`position`](crate::position)). The classic binary-heap operations are
//! expressed over that tree. Whenever two nodes change places the *whole*
//! record moves, so a [`NodeHandle`] keeps pointing at the same payload and
//! its current priority no matter how often it is sifted.
//!
//! # Time Complexity
//!
//! | Operation           | Complexity |
//! |---------------------|------------|
//! | `max_heap_insert`   | O(log n)   |
//! | `heap_maximum`      | O(1)       |
//! | `heap_extract_max`  | O(n)       |
//! | `heap_increase_key` | O(log n)   |
//! | `build_max_heap`    | O(n)       |
//! | `pop` (trait)       | O(log n)   |
//!
//! # Extraction
//!
//! [`heap_extract_max`](PriorityList::heap_extract_max) only unlinks the
//! front node. Every remaining node moves up one rank, which reshapes the
//! implicit tree, so the survivors are generally *not* in heap order
//! afterwards. Callers that want repeated extraction to come out sorted either
//! call [`build_max_heap`](PriorityList::build_max_heap) after each
//! extraction or use [`Heap::pop`], which restores order in O(log n).
//!
//! # Example
//!
//! ```rust
//! use sequence_heap::PriorityList;
//!
//! let mut list = PriorityList::new();
//! for p in [4, 1, 3, 2, 16, 9, 10, 14, 8, 7] {
//!     list.push_back(p, ());
//! }
//! list.build_max_heap();
//!
//! let root = list.heap_maximum().unwrap();
//! assert_eq!(list.priority(root), Some(&16));
//! assert!(list.is_max_heap());
//! ```

use tracing::{debug, trace};

use crate::node::NodeHandle;
use crate::position::{left_rank, parent_rank, right_rank};
use crate::sequence::PriorityList;
use crate::traits::{Heap, HeapError, IncreaseKeyHeap};

impl<T, P: Ord> PriorityList<T, P> {
    /// Sifts `handle` down until neither child has a strictly greater
    /// priority
    ///
    /// # Errors
    /// `HeapError::InvalidHandle` if the node is not live in this list.
    pub fn max_heapify(&mut self, handle: NodeHandle) -> Result<(), HeapError> {
        let rank = self.rank(handle).ok_or(HeapError::InvalidHandle)?;
        self.sift_down(rank - 1);
        Ok(())
    }

    /// Rearranges the whole sequence into max-heap order
    pub fn build_max_heap(&mut self) {
        debug!(len = self.len(), "building max heap");
        // Slots past len / 2 are leaves
        for index in (0..self.len() / 2).rev() {
            self.sift_down(index);
        }
    }

    /// The root of the heap: the current front
    #[inline]
    pub fn heap_maximum(&self) -> Option<NodeHandle> {
        self.front()
    }

    /// Removes the front node without re-sifting the rest
    ///
    /// See the [module documentation](self) for why the remaining nodes are
    /// left out of heap order.
    pub fn heap_extract_max(&mut self) -> Option<(P, T)> {
        self.pop_front()
    }

    /// Raises the priority of `handle` and percolates it towards the root
    ///
    /// Unlike an unconditional key assignment, a lower key is refused: only
    /// upward moves keep the heap intact with a single sift-up. Use
    /// [`heap_delete`](Self::heap_delete) and reinsert to lower a key.
    ///
    /// # Errors
    /// `HeapError::InvalidHandle` if the node is not live in this list,
    /// `HeapError::PriorityNotIncreased` if `new_priority` is lower than the
    /// current priority. Nothing changes on error.
    pub fn heap_increase_key(
        &mut self,
        handle: NodeHandle,
        new_priority: P,
    ) -> Result<(), HeapError> {
        let node = self.get_mut(handle).ok_or(HeapError::InvalidHandle)?;
        if new_priority < node.priority {
            return Err(HeapError::PriorityNotIncreased);
        }
        node.priority = new_priority;
        let rank = node.rank;
        self.sift_up(rank - 1);
        Ok(())
    }

    /// Sifts `handle` up while it is strictly greater than its parent
    ///
    /// # Errors
    /// `HeapError::InvalidHandle` if the node is not live in this list.
    pub fn percolate(&mut self, handle: NodeHandle) -> Result<(), HeapError> {
        let rank = self.rank(handle).ok_or(HeapError::InvalidHandle)?;
        self.sift_up(rank - 1);
        Ok(())
    }

    /// Appends a node and percolates it into place
    pub fn max_heap_insert(&mut self, priority: P, item: T) -> NodeHandle {
        let handle = self.push_back(priority, item);
        self.sift_up(self.len() - 1);
        handle
    }

    /// Removes an arbitrary node while keeping heap order
    ///
    /// The back node takes the vacated slot and is sifted whichever way its
    /// priority demands. Unlike [`remove`](Self::remove), no other node
    /// changes rank except along that one sift path.
    ///
    /// # Errors
    /// `HeapError::InvalidHandle` if the node is not live in this list.
    pub fn heap_delete(&mut self, handle: NodeHandle) -> Result<(P, T), HeapError> {
        let index = self.rank(handle).ok_or(HeapError::InvalidHandle)? - 1;
        let last = self.len() - 1;
        self.swap_slots(index, last);
        let removed = self.pop_back().ok_or(HeapError::InvalidHandle)?;
        if index < self.len() {
            self.sift_down(index);
            self.sift_up(index);
        }
        Ok(removed)
    }

    /// Checks the max-heap invariant: no node has a child with a greater
    /// priority
    pub fn is_max_heap(&self) -> bool {
        (2..=self.len()).all(|rank| {
            parent_rank(rank)
                .is_some_and(|parent| self.slot_priority(parent - 1) >= self.slot_priority(rank - 1))
        })
    }

    /// Removes the root and restores heap order by moving the back node to
    /// the root and sifting it down
    fn pop_root(&mut self) -> Option<(P, T)> {
        let last = self.len().checked_sub(1)?;
        self.swap_slots(0, last);
        let popped = self.pop_back();
        if !self.is_empty() {
            self.sift_down(0);
        }
        popped
    }

    /// Move the node at 0-based slot `index` up to maintain heap order
    fn sift_up(&mut self, mut index: usize) {
        while let Some(parent) = parent_rank(index + 1).map(|rank| rank - 1) {
            if self.slot_priority(index) > self.slot_priority(parent) {
                self.swap_slots(index, parent);
                index = parent;
            } else {
                break;
            }
        }
        trace!(rank = index + 1, "percolated");
    }

    /// Move the node at 0-based slot `index` down to maintain heap order
    fn sift_down(&mut self, mut index: usize) {
        let len = self.len();
        loop {
            let rank = index + 1;
            let mut largest = index;

            if let Some(left) = left_rank(rank, len).map(|r| r - 1) {
                if self.slot_priority(left) > self.slot_priority(largest) {
                    largest = left;
                }
            }
            if let Some(right) = right_rank(rank, len).map(|r| r - 1) {
                if self.slot_priority(right) > self.slot_priority(largest) {
                    largest = right;
                }
            }

            if largest == index {
                break;
            }
            self.swap_slots(index, largest);
            index = largest;
        }
    }
}

impl<T, P: Ord> Heap<T, P> for PriorityList<T, P> {
    fn new() -> Self {
        PriorityList::new()
    }

    fn is_empty(&self) -> bool {
        PriorityList::is_empty(self)
    }

    fn len(&self) -> usize {
        PriorityList::len(self)
    }

    fn push(&mut self, priority: P, item: T) {
        self.max_heap_insert(priority, item);
    }

    fn peek(&self) -> Option<(&P, &T)> {
        let node = self.get(self.heap_maximum()?)?;
        Some((node.priority(), node.item()))
    }

    fn pop(&mut self) -> Option<(P, T)> {
        self.pop_root()
    }

    fn merge(&mut self, mut other: Self) {
        // Order does not matter before a rebuild: O(n + m)
        while let Some((priority, item)) = other.pop_back() {
            self.push_back(priority, item);
        }
        self.build_max_heap();
    }
}

impl<T, P: Ord> IncreaseKeyHeap<T, P> for PriorityList<T, P> {
    type Handle = NodeHandle;

    fn push_with_handle(&mut self, priority: P, item: T) -> Self::Handle {
        self.max_heap_insert(priority, item)
    }

    fn increase_key(&mut self, handle: &Self::Handle, new_priority: P) -> Result<(), HeapError> {
        self.heap_increase_key(*handle, new_priority)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn priorities<T>(list: &PriorityList<T, i32>) -> Vec<i32> {
        list.iter().map(|(_, node)| *node.priority()).collect()
    }

    #[test]
    fn test_build_max_heap_textbook_sequence() {
        let mut list = PriorityList::new();
        for p in [4, 1, 3, 2, 16, 9, 10, 14, 8, 7] {
            list.push_back(p, ());
        }
        list.build_max_heap();

        assert_eq!(priorities(&list), vec![16, 14, 10, 8, 7, 9, 3, 2, 4, 1]);
        assert!(list.is_max_heap());
    }

    #[test]
    fn test_max_heapify_single_node() {
        let mut list = PriorityList::new();
        let root = list.push_back(1, "root");
        list.push_back(5, "left");
        list.push_back(3, "right");

        list.max_heapify(root).unwrap();
        assert_eq!(priorities(&list), vec![5, 1, 3]);
        // the payload moved with its key
        assert_eq!(list.rank(root), Some(2));
        assert_eq!(list.get(root).map(|n| *n.item()), Some("root"));
    }

    #[test]
    fn test_max_heapify_prefers_left_on_tie() {
        let mut list = PriorityList::new();
        let root = list.push_back(1, 'r');
        let left = list.push_back(7, 'l');
        let right = list.push_back(7, 'x');

        list.max_heapify(root).unwrap();
        assert_eq!(list.front(), Some(left));
        assert_eq!(list.rank(right), Some(3));
    }

    #[test]
    fn test_max_heap_insert_percolates() {
        let mut list = PriorityList::new();
        list.max_heap_insert(1, ());
        list.max_heap_insert(2, ());
        let top = list.max_heap_insert(3, ());

        assert_eq!(list.heap_maximum(), Some(top));
        assert_eq!(priorities(&list), vec![3, 1, 2]);
        assert!(list.is_max_heap());
    }

    #[test]
    fn test_increase_key_swaps_whole_records() {
        let mut list = PriorityList::new();
        for p in [10, 8, 6, 4, 2] {
            list.max_heap_insert(p, p);
        }
        let leaf = list.at_rank(5).unwrap();
        let parent = list.parent(leaf).unwrap();

        list.heap_increase_key(leaf, 9).unwrap();

        assert_eq!(list.rank(leaf), Some(2));
        assert_eq!(list.rank(parent), Some(5));
        assert_eq!(list.priority(leaf), Some(&9));
        assert_eq!(list.priority(parent), Some(&8));
        assert_eq!(list.get(leaf).map(|n| *n.item()), Some(2));
        assert!(list.is_max_heap());
    }

    #[test]
    fn test_increase_key_rejects_lower_priority() {
        let mut list = PriorityList::new();
        let h = list.max_heap_insert(5, ());
        assert_eq!(list.heap_increase_key(h, 3), Err(HeapError::PriorityNotIncreased));
        assert_eq!(list.priority(h), Some(&5));
        assert_eq!(list.heap_increase_key(h, 5), Ok(()));
    }

    #[test]
    fn test_stale_handle_errors() {
        let mut list = PriorityList::new();
        let h = list.max_heap_insert(5, ());
        list.heap_extract_max();

        assert_eq!(list.heap_increase_key(h, 9), Err(HeapError::InvalidHandle));
        assert_eq!(list.max_heapify(h), Err(HeapError::InvalidHandle));
        assert_eq!(list.percolate(h), Err(HeapError::InvalidHandle));
    }

    #[test]
    fn test_extract_max_does_not_resift() {
        let mut list = PriorityList::new();
        for p in [9, 8, 7, 1, 2, 6, 5] {
            list.push_back(p, ());
        }
        assert!(list.is_max_heap());

        assert_eq!(list.heap_extract_max(), Some((9, ())));
        // everything shifted up one rank: 1 now sits above 5
        assert_eq!(priorities(&list), vec![8, 7, 1, 2, 6, 5]);
        assert!(!list.is_max_heap());

        list.build_max_heap();
        assert!(list.is_max_heap());
    }

    #[test]
    fn test_heap_delete_keeps_order() {
        let mut list = PriorityList::new();
        let handles: Vec<_> = [20, 15, 18, 3, 14, 17, 16, 1, 2]
            .into_iter()
            .map(|p| list.max_heap_insert(p, p))
            .collect();
        assert!(list.is_max_heap());

        // the back node (2) takes the slot of 3 and stays there
        assert_eq!(list.heap_delete(handles[3]), Ok((3, 3)));
        assert!(list.is_max_heap());
        // the back node sinks from the root
        assert_eq!(list.heap_delete(handles[0]), Ok((20, 20)));
        assert!(list.is_max_heap());
        assert_eq!(list.len(), 7);
        assert_eq!(list.heap_delete(handles[0]), Err(HeapError::InvalidHandle));

        let last = list.back().unwrap();
        assert!(list.heap_delete(last).is_ok());
        assert!(list.is_max_heap());
    }

    #[test]
    fn test_heap_delete_sifts_up() {
        let mut list = PriorityList::new();
        let handles: Vec<_> = [20, 5, 18, 4, 3, 17, 16]
            .into_iter()
            .map(|p| list.push_back(p, ()))
            .collect();
        assert!(list.is_max_heap());

        // 16 lands under 5 and has to rise above it
        list.heap_delete(handles[3]).unwrap();
        assert_eq!(list.rank(handles[6]), Some(2));
        assert_eq!(list.rank(handles[1]), Some(4));
        assert!(list.is_max_heap());
    }

    #[test]
    fn test_percolate_after_external_change() {
        let mut list = PriorityList::new();
        for p in [5, 4, 3] {
            list.push_back(p, ());
        }
        let back = list.back().unwrap();
        if let Some(node) = list.get_mut(back) {
            node.priority = 10;
        }
        list.percolate(back).unwrap();
        assert_eq!(list.heap_maximum(), Some(back));
    }

    #[test]
    fn test_pop_restores_order() {
        let mut list = PriorityList::new();
        for p in [3, 9, 1, 7, 5, 8, 2] {
            Heap::push(&mut list, p, p * 10);
        }
        let mut out = Vec::new();
        while let Some((p, item)) = Heap::pop(&mut list) {
            assert_eq!(item, p * 10);
            assert!(list.is_max_heap());
            out.push(p);
        }
        assert_eq!(out, vec![9, 8, 7, 5, 3, 2, 1]);
    }

    #[test]
    fn test_merge() {
        let mut a: PriorityList<&str, i32> = PriorityList::new();
        let mut b = PriorityList::new();
        a.max_heap_insert(3, "three");
        a.max_heap_insert(1, "one");
        b.max_heap_insert(4, "four");
        b.max_heap_insert(2, "two");

        a.merge(b);
        assert_eq!(Heap::len(&a), 4);
        assert!(a.is_max_heap());
        assert_eq!(a.peek(), Some((&4, &"four")));
    }
}
