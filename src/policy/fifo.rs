//! FIFO (First-In-First-Out) replacement policy.
//!
//! Evicts pages in strict admission order, ignoring later hits.

use std::collections::{HashSet, VecDeque};

use crate::common::{Error, PageId, Result};
use crate::policy::{DirtyTracker, ReplacementPolicy, RunStats};
use crate::trace::Access;

/// FIFO replacement.
///
/// The admission queue mirrors working-set membership exactly: a page enters
/// at the tail on fault and leaves from the head on eviction. Hits never
/// reorder the queue.
pub struct FifoPolicy {
    capacity: usize,

    /// Admission order (front = oldest).
    queue: VecDeque<PageId>,

    /// Set for O(1) residency checks.
    resident: HashSet<PageId>,

    dirty: DirtyTracker,
    stats: RunStats,
}

impl FifoPolicy {
    /// Create a FIFO policy with `capacity` frames.
    ///
    /// # Errors
    /// Returns [`Error::InvalidCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity);
        }

        Ok(Self {
            capacity,
            queue: VecDeque::with_capacity(capacity),
            resident: HashSet::with_capacity(capacity),
            dirty: DirtyTracker::new(),
            stats: RunStats::new(),
        })
    }

    /// Process a single access.
    pub fn step(&mut self, access: Access) {
        let page = access.page;

        if self.resident.contains(&page) {
            // Hit: membership unchanged, dirty flag may rise.
            self.dirty.touch(page, access.is_write);
            return;
        }

        self.stats.record_fault();

        if self.queue.len() == self.capacity {
            let victim = self
                .queue
                .pop_front()
                .expect("admission queue empty at capacity");
            self.resident.remove(&victim);
            if self.dirty.evict(victim) {
                self.stats.record_write_back();
            }
        }

        self.queue.push_back(page);
        self.resident.insert(page);
        self.dirty.admit(page, access.is_write);

        debug_assert!(self.queue.len() <= self.capacity);
        debug_assert_eq!(self.queue.len(), self.resident.len());
    }

    /// The pages currently resident, oldest first.
    pub fn resident_pages(&self) -> impl Iterator<Item = PageId> + '_ {
        self.queue.iter().copied()
    }

    fn reset(&mut self) {
        self.queue.clear();
        self.resident.clear();
        self.dirty.clear();
        self.stats.reset();
    }
}

impl ReplacementPolicy for FifoPolicy {
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn run(&mut self, trace: &[Access]) -> RunStats {
        self.reset();
        for &access in trace {
            self.step(access);
        }
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(page: u32) -> Access {
        Access::read(PageId::new(page))
    }

    fn write(page: u32) -> Access {
        Access::write(PageId::new(page))
    }

    #[test]
    fn test_fifo_evicts_oldest() {
        // Capacity 2, pages 1, 2, 3: page 1 goes first.
        let mut policy = FifoPolicy::new(2).unwrap();
        policy.run(&[read(1), read(2), read(3)]);

        let resident: Vec<PageId> = policy.resident_pages().collect();
        assert_eq!(resident, vec![PageId::new(2), PageId::new(3)]);
    }

    #[test]
    fn test_fifo_hit_does_not_reorder() {
        // Re-accessing page 1 must not save it from eviction.
        let mut policy = FifoPolicy::new(2).unwrap();
        let stats = policy.run(&[read(1), read(2), read(1), read(3)]);

        assert_eq!(stats.faults, 3);
        let resident: Vec<PageId> = policy.resident_pages().collect();
        assert_eq!(resident, vec![PageId::new(2), PageId::new(3)]);
    }

    #[test]
    fn test_fifo_reuse_after_eviction() {
        // Capacity 2, trace 1,2,3,1: the fault on 3 evicts page 1, so its
        // second access faults again.
        let mut policy = FifoPolicy::new(2).unwrap();
        let stats = policy.run(&[read(1), read(2), read(3), read(1)]);

        assert_eq!(stats.faults, 4);
        assert_eq!(stats.writes, 0);
        assert_eq!(stats.interrupts, 4);
    }

    #[test]
    fn test_fifo_dirty_eviction_writes_back() {
        // Capacity 1: A admitted dirty, B evicts it.
        let mut policy = FifoPolicy::new(1).unwrap();
        let stats = policy.run(&[write(10), read(11)]);

        assert_eq!(stats.faults, 2);
        assert_eq!(stats.writes, 1);
        assert_eq!(stats.interrupts, 3);
    }

    #[test]
    fn test_fifo_write_hit_dirties() {
        let mut policy = FifoPolicy::new(1).unwrap();
        let stats = policy.run(&[read(10), write(10), read(11)]);

        assert_eq!(stats.faults, 2);
        assert_eq!(stats.writes, 1);
    }

    #[test]
    fn test_fifo_clean_readmission() {
        // A is evicted dirty once; its second residency is clean.
        let mut policy = FifoPolicy::new(1).unwrap();
        let stats = policy.run(&[write(1), read(2), read(1), read(2)]);

        assert_eq!(stats.faults, 4);
        assert_eq!(stats.writes, 1);
    }

    #[test]
    fn test_fifo_zero_capacity_rejected() {
        assert!(FifoPolicy::new(0).is_err());
    }
}
