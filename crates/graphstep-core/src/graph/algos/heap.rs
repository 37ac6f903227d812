//! Binary min-heap keyed by node priority
//!
//! The queue may hold several live entries for the same node. It never
//! deduplicates: callers must re-check their settled set on every pop and
//! drop stale entries.

use crate::graph::types::NodeId;

/// A queue entry: node plus tentative priority
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeapEntry {
    pub node_id: NodeId,
    pub priority: f64,
}

/// Array-backed binary min-heap.
///
/// Parent of `i` is `(i - 1) / 2`, children are `2i + 1` and `2i + 2`.
/// Ties are broken arbitrarily.
#[derive(Debug, Clone, Default)]
pub struct MinQueue {
    heap: Vec<HeapEntry>,
}

impl MinQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node_id: NodeId, priority: f64) {
        self.heap.push(HeapEntry { node_id, priority });
        self.sift_up(self.heap.len() - 1);
    }

    /// Remove the minimum-priority entry, or `None` when empty
    pub fn pop(&mut self) -> Option<HeapEntry> {
        let last = self.heap.pop()?;
        if self.heap.is_empty() {
            return Some(last);
        }
        let root = std::mem::replace(&mut self.heap[0], last);
        self.sift_down(0);
        Some(root)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.heap[parent].priority <= self.heap[i].priority {
                break;
            }
            self.heap.swap(parent, i);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.heap.len();
        loop {
            let left = 2 * i + 1;
            let right = 2 * i + 2;
            let mut smallest = i;
            if left < n && self.heap[left].priority < self.heap[smallest].priority {
                smallest = left;
            }
            if right < n && self.heap[right].priority < self.heap[smallest].priority {
                smallest = right;
            }
            if smallest == i {
                break;
            }
            self.heap.swap(i, smallest);
            i = smallest;
        }
    }
}
