//! Position resolver
//!
//! Maps a node's rank to the ranks of its parent and children in the implicit
//! binary tree laid over the sequence. Rank 0 is the head sentinel and has no
//! relatives; live nodes occupy ranks `1..=len`.
//!
//! | Relative | Rank           |
//! |----------|----------------|
//! | parent   | `rank / 2`     |
//! | left     | `rank * 2`     |
//! | right    | `rank * 2 + 1` |
//!
//! The rank arithmetic is pure. The container-level lookups
//! ([`PriorityList::parent`] and friends) resolve the rank against the current
//! sequence on every call, so there is no cached relative that can go stale.

use crate::node::NodeHandle;
use crate::sequence::PriorityList;

/// Rank of the parent, or `None` for the root (rank 1) and the head sentinel
#[inline]
pub fn parent_rank(rank: usize) -> Option<usize> {
    if rank >= 2 {
        Some(rank / 2)
    } else {
        None
    }
}

/// Rank of the left child, or `None` if it lies past the back of a
/// sequence of `len` nodes
#[inline]
pub fn left_rank(rank: usize, len: usize) -> Option<usize> {
    if rank == 0 {
        return None;
    }
    rank.checked_mul(2).filter(|&child| child <= len)
}

/// Rank of the right child, or `None` if it lies past the back of a
/// sequence of `len` nodes
#[inline]
pub fn right_rank(rank: usize, len: usize) -> Option<usize> {
    if rank == 0 {
        return None;
    }
    rank.checked_mul(2)
        .and_then(|r| r.checked_add(1))
        .filter(|&child| child <= len)
}

impl<T, P> PriorityList<T, P> {
    /// Node occupying the parent rank of `handle`
    ///
    /// Returns `None` for the front node and for stale handles.
    pub fn parent(&self, handle: NodeHandle) -> Option<NodeHandle> {
        let rank = self.rank(handle)?;
        self.at_rank(parent_rank(rank)?)
    }

    /// Node occupying the left-child rank of `handle`
    pub fn left(&self, handle: NodeHandle) -> Option<NodeHandle> {
        let rank = self.rank(handle)?;
        self.at_rank(left_rank(rank, self.len())?)
    }

    /// Node occupying the right-child rank of `handle`
    pub fn right(&self, handle: NodeHandle) -> Option<NodeHandle> {
        let rank = self.rank(handle)?;
        self.at_rank(right_rank(rank, self.len())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_rank() {
        assert_eq!(parent_rank(0), None);
        assert_eq!(parent_rank(1), None);
        assert_eq!(parent_rank(2), Some(1));
        assert_eq!(parent_rank(3), Some(1));
        assert_eq!(parent_rank(7), Some(3));
    }

    #[test]
    fn test_child_ranks_respect_len() {
        assert_eq!(left_rank(1, 1), None);
        assert_eq!(left_rank(1, 2), Some(2));
        assert_eq!(right_rank(1, 2), None);
        assert_eq!(right_rank(1, 3), Some(3));
        assert_eq!(left_rank(5, 10), Some(10));
        assert_eq!(right_rank(5, 10), None);
    }

    #[test]
    fn test_head_sentinel_has_no_children() {
        assert_eq!(left_rank(0, 10), None);
        assert_eq!(right_rank(0, 10), None);
    }

    #[test]
    fn test_overflow_is_absent() {
        assert_eq!(left_rank(usize::MAX, usize::MAX), None);
        assert_eq!(right_rank(usize::MAX / 2 + 1, usize::MAX), None);
        assert_eq!(right_rank(usize::MAX / 2, usize::MAX - 1), None);
    }

    #[test]
    fn test_relatives_follow_sequence() {
        let mut list = PriorityList::new();
        let handles: Vec<_> = (0..6).map(|i| list.push_back(i, i)).collect();

        assert_eq!(list.parent(handles[0]), None);
        assert_eq!(list.left(handles[0]), Some(handles[1]));
        assert_eq!(list.right(handles[0]), Some(handles[2]));
        assert_eq!(list.parent(handles[4]), Some(handles[1]));
        assert_eq!(list.left(handles[2]), Some(handles[5]));
        assert_eq!(list.right(handles[2]), None);
        assert_eq!(list.left(handles[3]), None);
    }

    #[test]
    fn test_relatives_track_insertions_elsewhere() {
        let mut list = PriorityList::new();
        let a = list.push_back(1, 'a');
        let b = list.push_back(2, 'b');
        let c = list.push_back(3, 'c');

        // c starts as the right child of a
        assert_eq!(list.parent(c), Some(a));

        assert_eq!(list.parent(b), Some(a));

        // Pushing to the front shifts everything: c is now rank 4, child of a
        let z = list.push_front(0, 'z');
        assert_eq!(list.rank(c), Some(4));
        assert_eq!(list.parent(c), Some(a));
        // b moved from rank 2 to rank 3, so its parent is now z
        assert_eq!(list.rank(b), Some(3));
        assert_eq!(list.parent(b), Some(z));
        assert_eq!(list.left(z), Some(a));
        assert_eq!(list.right(z), Some(b));
    }
}
