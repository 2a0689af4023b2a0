//! Additional-Reference-Bits replacement policy.
//!
//! Approximates LRU with an 8-bit history byte per resident page. Every
//! [`AGING_INTERVAL`] accesses all bytes shift right one bit; a hit ORs the
//! top bit back in. The victim is the page with the numerically smallest
//! byte, i.e. the one least recently touched within the last eight
//! shift intervals.

use std::collections::{HashMap, HashSet};

use crate::common::config::{AGING_INTERVAL, REFERENCE_SEED_BIT};
use crate::common::{Error, PageId, Result};
use crate::policy::{DirtyTracker, ReplacementPolicy, RunStats};
use crate::trace::Access;

/// Additional-reference-bits replacement.
pub struct ReferenceBitsPolicy {
    capacity: usize,

    /// Resident pages in admission order (victim scan order).
    resident: Vec<PageId>,

    /// Set for O(1) residency checks.
    resident_set: HashSet<PageId>,

    /// Per-page reference byte, present iff resident.
    bits: HashMap<PageId, u8>,

    /// Trace position of the next access, drives the aging clock.
    clock: usize,

    dirty: DirtyTracker,
    stats: RunStats,
}

impl ReferenceBitsPolicy {
    /// Create a reference-bits policy with `capacity` frames.
    ///
    /// # Errors
    /// Returns [`Error::InvalidCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity);
        }

        Ok(Self {
            capacity,
            resident: Vec::with_capacity(capacity),
            resident_set: HashSet::with_capacity(capacity),
            bits: HashMap::with_capacity(capacity),
            clock: 0,
            dirty: DirtyTracker::new(),
            stats: RunStats::new(),
        })
    }

    /// Process a single access.
    pub fn step(&mut self, access: Access) {
        // Age all resident pages before servicing this position.
        if self.clock > 0 && self.clock % AGING_INTERVAL == 0 {
            for byte in self.bits.values_mut() {
                *byte >>= 1;
            }
        }
        self.clock += 1;

        let page = access.page;

        if self.resident_set.contains(&page) {
            // Hit: re-arm the top bit, lower history bits stay.
            if let Some(byte) = self.bits.get_mut(&page) {
                *byte |= REFERENCE_SEED_BIT;
            }
            self.dirty.touch(page, access.is_write);
            return;
        }

        self.stats.record_fault();

        if self.resident.len() == self.capacity {
            let victim = self.resident.remove(self.find_victim());
            self.resident_set.remove(&victim);
            self.bits.remove(&victim);
            if self.dirty.evict(victim) {
                self.stats.record_write_back();
            }
        }

        self.resident.push(page);
        self.resident_set.insert(page);
        self.bits.insert(page, REFERENCE_SEED_BIT);
        self.dirty.admit(page, access.is_write);

        debug_assert!(self.resident.len() <= self.capacity);
        debug_assert_eq!(self.resident.len(), self.bits.len());
    }

    /// Index of the resident page with the smallest reference byte.
    ///
    /// Ties go to the first page in admission order.
    fn find_victim(&self) -> usize {
        let mut victim_idx = 0;
        let mut smallest = u8::MAX;

        for (idx, page) in self.resident.iter().enumerate() {
            let byte = self.bits.get(page).copied().unwrap_or(0);
            if byte < smallest {
                smallest = byte;
                victim_idx = idx;
            }
        }

        victim_idx
    }

    fn reset(&mut self) {
        self.resident.clear();
        self.resident_set.clear();
        self.bits.clear();
        self.clock = 0;
        self.dirty.clear();
        self.stats.reset();
    }
}

impl ReplacementPolicy for ReferenceBitsPolicy {
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
