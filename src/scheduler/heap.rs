/*!
 * Process Heap
 * Array-backed binary min-heap over process records with an injected ordering
 */

use super::policy::Comparator;
use super::types::Algorithm;
use crate::core::types::ProcessId;
use crate::process::ProcessRecord;
use std::cmp::Ordering;
use tracing::debug;

/// Initial backing capacity; the array doubles when full
pub const DEFAULT_CAPACITY: usize = 100;

/// Binary min-heap ordered by the algorithm's comparator
///
/// The element that compares smallest sits at index 0. Array order beyond
/// the root is heap order, not priority order.
pub struct ProcessHeap {
    items: Vec<ProcessRecord>,
    algorithm: Algorithm,
    compare: Comparator,
}

impl ProcessHeap {
    /// Create an empty heap for an algorithm
    pub fn new(algorithm: Algorithm) -> Self {
        Self::with_comparator(algorithm, algorithm.comparator(), DEFAULT_CAPACITY)
    }

    /// Create an empty heap with an explicit comparison strategy
    pub fn with_comparator(algorithm: Algorithm, compare: Comparator, capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            algorithm,
            compare,
        }
    }

    /// Insert a record - O(log n)
    pub fn insert(&mut self, record: ProcessRecord) {
        if self.items.len() == self.items.capacity() {
            let grow_by = self.items.capacity().max(1);
            self.items.reserve_exact(grow_by);
        }
        self.items.push(record);
        self.sift_up(self.items.len() - 1);
    }

    /// Remove and return the minimal record - O(log n)
    pub fn extract_min(&mut self) -> Option<ProcessRecord> {
        if self.items.is_empty() {
            return None;
        }
        let root = self.items.swap_remove(0);
        self.sift_down(0);
        Some(root)
    }

    /// Minimal record without removing it - O(1)
    pub fn peek_min(&self) -> Option<&ProcessRecord> {
        self.items.first()
    }

    /// Remove a record by identity - O(n) scan + O(log n) repair
    pub fn remove_by_id(&mut self, pid: ProcessId) -> Option<ProcessRecord> {
        let index = self.items.iter().position(|r| r.id() == pid)?;
        let removed = self.items.swap_remove(index);
        if index < self.items.len() {
            // The moved-in last element may belong above or below the hole
            self.sift_down(index);
            self.sift_up(index);
        }
        Some(removed)
    }

    /// Whether a record with this id is queued
    pub fn contains(&self, pid: ProcessId) -> bool {
        self.items.iter().any(|r| r.id() == pid)
    }

    /// Copy of the contents in heap-array order
    pub fn to_snapshot_vec(&self) -> Vec<ProcessRecord> {
        self.items.clone()
    }

    /// Records in heap-array order
    pub fn iter(&self) -> std::slice::Iter<'_, ProcessRecord> {
        self.items.iter()
    }

    /// Mutate every record, then restore heap order
    ///
    /// Needed when the mutated field feeds the comparator (HRRN waiting time).
    pub fn update_all<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut ProcessRecord),
    {
        self.items.iter_mut().for_each(&mut f);
        self.heapify();
    }

    /// Drain into a fresh heap ordered by another algorithm - O(n log n)
    pub fn rebuild(mut self, algorithm: Algorithm) -> ProcessHeap {
        let mut next =
            ProcessHeap::with_comparator(algorithm, algorithm.comparator(), self.items.capacity());
        while let Some(record) = self.extract_min() {
            next.insert(record);
        }
        debug!(
            from = %self.algorithm,
            to = %algorithm,
            len = next.len(),
            "Ready heap rebuilt"
        );
        next
    }

    /// Index of the first child that orders before its parent, if any
    pub fn order_violation(&self) -> Option<usize> {
        (1..self.items.len()).find(|&i| self.less(i, (i - 1) / 2))
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    #[inline]
    fn less(&self, i: usize, j: usize) -> bool {
        (self.compare)(&self.items[i], &self.items[j]) == Ordering::Less
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !self.less(index, parent) {
                break;
            }
            self.items.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.items.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut smallest = index;

            if left < len && self.less(left, smallest) {
                smallest = left;
            }
            if right < len && self.less(right, smallest) {
                smallest = right;
            }
            if smallest == index {
                break;
            }
            self.items.swap(index, smallest);
            index = smallest;
        }
    }

    // Floyd's bottom-up construction - O(n)
    fn heapify(&mut self) {
        for index in (0..self.items.len() / 2).rev() {
            self.sift_down(index);
        }
    }
}

impl std::fmt::Debug for ProcessHeap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessHeap")
            .field("algorithm", &self.algorithm)
            .field("len", &self.items.len())
            .field("root", &self.peek_min().map(|r| r.id()))
            .finish()
    }
}
