//! Adaptive Replacement Cache (ARC) replacement policy.
//!
//! ARC splits the resident set into a recency segment T1 (pages seen once)
//! and a frequency segment T2 (pages seen at least twice), and remembers
//! recently evicted page ids in the ghost lists B1 and B2. Ghost hits are
//! evidence that the corresponding segment should be larger, and move the
//! adaptation target `p` (the desired size of T1) accordingly.
//!
//! Invariants, checked after every access in debug builds:
//! - |T1| + |T2| ≤ capacity
//! - |T1| + |T2| + |B1| + |B2| ≤ 2 × capacity
//! - 0 ≤ p ≤ capacity

use std::collections::{HashSet, VecDeque};

use crate::common::{Error, PageId, Result};
use crate::policy::{DirtyTracker, ReplacementPolicy, RunStats};
use crate::trace::Access;

/// An ordered page list with O(1) membership checks.
///
/// Front = least recently inserted. Backs each of ARC's four lists; the
/// membership set keeps residency/ghost lookups off the linear scan.
#[derive(Debug, Default)]
struct PageList {
    order: VecDeque<PageId>,
    members: HashSet<PageId>,
}

impl PageList {
    fn new() -> Self {
        Self::default()
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn contains(&self, page: PageId) -> bool {
        self.members.contains(&page)
    }

    fn push_back(&mut self, page: PageId) {
        debug_assert!(!self.members.contains(&page));
        self.order.push_back(page);
        self.members.insert(page);
    }

    fn pop_front(&mut self) -> Option<PageId> {
        let page = self.order.pop_front()?;
        self.members.remove(&page);
        Some(page)
    }

    /// Remove a specific page, wherever it sits in the order.
    fn remove(&mut self, page: PageId) -> bool {
        if !self.members.remove(&page) {
            return false;
        }
        if let Some(pos) = self.order.iter().position(|&p| p == page) {
            self.order.remove(pos);
        }
        true
    }

    fn clear(&mut self) {
        self.order.clear();
        self.members.clear();
    }
}

/// Adaptive Replacement Cache.
pub struct ArcPolicy {
    capacity: usize,

    /// Target size for T1; always in `0..=capacity`.
    p: usize,

    /// Resident, seen once.
    t1: PageList,
    /// Resident, seen at least twice.
    t2: PageList,
    /// Ghosts of recent T1 evictions.
    b1: PageList,
    /// Ghosts of recent T2 evictions.
    b2: PageList,

    dirty: DirtyTracker,
    stats: RunStats,
}

impl ArcPolicy {
    /// Create an ARC policy with `capacity` frames.
    ///
    /// # Errors
    /// Returns [`Error::InvalidCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity);
        }

        Ok(Self {
            capacity,
            p: 0,
            t1: PageList::new(),
            t2: PageList::new(),
            b1: PageList::new(),
            b2: PageList::new(),
            dirty: DirtyTracker::new(),
            stats: RunStats::new(),
        })
    }

    /// Process a single access.
    ///
    /// Exposed so instrumented callers (and the property tests) can verify
    /// the list invariants between accesses.
    pub fn step(&mut self, access: Access) {
        let page = access.page;

        // Resident hit in T1: second touch, promote to the frequency side.
        if self.t1.remove(page) {
            self.t2.push_back(page);
            self.dirty.touch(page, access.is_write);
            self.assert_invariants();
            return;
        }

        // Resident hit in T2: refresh recency.
        if self.t2.remove(page) {
            self.t2.push_back(page);
            self.dirty.touch(page, access.is_write);
            self.assert_invariants();
            return;
        }

        if self.b1.contains(page) {
            self.ghost_hit_b1(page, access.is_write);
        } else if self.b2.contains(page) {
            self.ghost_hit_b2(page, access.is_write);
        } else {
            self.total_miss(page, access.is_write);
        }

        self.assert_invariants();
    }

    /// B1 ghost hit: the page was evicted after a single use and came back,
    /// so grow the recency target.
    fn ghost_hit_b1(&mut self, page: PageId, is_write: bool) {
        let delta = (self.b2.len() / self.b1.len().max(1)).max(1);
        self.p = (self.p + delta).min(self.capacity);

        self.stats.record_fault();

        if self.resident_len() >= self.capacity {
            self.replace(false);
        }

        self.b1.remove(page);
        self.t2.push_back(page);
        self.dirty.admit(page, is_write);
    }

    /// B2 ghost hit: symmetric, shrink the recency target.
    fn ghost_hit_b2(&mut self, page: PageId, is_write: bool) {
        let delta = (self.b1.len() / self.b2.len().max(1)).max(1);
        self.p = self.p.saturating_sub(delta);

        self.stats.record_fault();

        if self.resident_len() >= self.capacity {
            self.replace(true);
        }

        self.b2.remove(page);
        self.t2.push_back(page);
        self.dirty.admit(page, is_write);
    }

    /// The page is in none of the four lists.
    fn total_miss(&mut self, page: PageId, is_write: bool) {
        self.stats.record_fault();

        if self.t1.len() + self.b1.len() >= self.capacity {
            if self.b1.pop_front().is_some() {
                // Recency history is at its bound: forget the oldest B1
                // ghost, and free a frame only if the cache itself is full.
                if self.resident_len() >= self.capacity {
                    self.replace(false);
                }
            } else {
                // T1 alone fills the cache and B1 is empty: demote the
                // oldest T1 page straight into B1. The next miss drops this
                // ghost before admitting, so |T1|+|B1| stays bounded.
                if self.total_len() >= 2 * self.capacity {
                    self.b2.pop_front();
                }
                if let Some(victim) = self.t1.pop_front() {
                    if self.dirty.evict(victim) {
                        self.stats.record_write_back();
                    }
                    self.b1.push_back(victim);
                }
            }
        } else {
            // Bound total history at 2×capacity, shrinking B2 before B1.
            if self.total_len() >= 2 * self.capacity {
                let dropped = self.b2.pop_front();
                debug_assert!(dropped.is_some(), "history full but B2 empty");
            }
            if self.resident_len() >= self.capacity {
                self.replace(false);
            }
        }

        self.t1.push_back(page);
        self.dirty.admit(page, is_write);
    }

    /// Evict one resident page into the matching ghost list.
    ///
    /// T1's head goes when T1 exceeds its target `p` (or meets it while
    /// serving a B2 ghost hit), and always when T2 has nothing to give up;
    /// otherwise T2's head goes. The sole place ARC write-backs happen.
    fn replace(&mut self, serving_b2_hit: bool) {
        let from_t1 = !self.t1.is_empty()
            && (self.t2.is_empty()
                || self.t1.len() > self.p
                || (serving_b2_hit && self.t1.len() == self.p));

        if from_t1 {
            if let Some(victim) = self.t1.pop_front() {
                if self.dirty.evict(victim) {
                    self.stats.record_write_back();
                }
                self.b1.push_back(victim);
            }
        } else if let Some(victim) = self.t2.pop_front() {
            if self.dirty.evict(victim) {
                self.stats.record_write_back();
            }
            self.b2.push_back(victim);
        }
        // Both lists empty only before the cache has filled; nothing to do.
    }

    /// Current adaptation target for T1.
    pub fn p(&self) -> usize {
        self.p
    }

    /// Sizes of (T1, T2, B1, B2).
    pub fn list_lens(&self) -> (usize, usize, usize, usize) {
        (self.t1.len(), self.t2.len(), self.b1.len(), self.b2.len())
    }

    fn resident_len(&self) -> usize {
        self.t1.len() + self.t2.len()
    }

    fn total_len(&self) -> usize {
        self.resident_len() + self.b1.len() + self.b2.len()
    }

    #[inline]
    fn assert_invariants(&self) {
        debug_assert!(self.resident_len() <= self.capacity);
        debug_assert!(self.total_len() <= 2 * self.capacity);
        debug_assert!(self.p <= self.capacity);
        debug_assert_eq!(self.dirty.len(), self.resident_len());
    }

    fn reset(&mut self) {
        self.p = 0;
        self.t1.clear();
        self.t2.clear();
        self.b1.clear();
        self.b2.clear();
        self.dirty.clear();
        self.stats.reset();
    }
}

impl ReplacementPolicy for ArcPolicy {
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
