//! Per-run statistics tracking.

use std::fmt;

/// Counters collected over one policy run.
///
/// Interrupt accounting is additive: every fault raises one interrupt, and
/// every dirty write-back raises another. `interrupts == faults + writes`
/// therefore holds after any run.
///
/// Counters reset at the start of every run; they are never shared between
/// runs or policy instances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Accesses to pages that were not resident.
    pub faults: u64,

    /// Fault interrupts plus write-back interrupts.
    pub interrupts: u64,

    /// Dirty evictions that required writing the page back.
    pub writes: u64,
}

impl RunStats {
    /// Create a zeroed stats record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a page fault (one interrupt).
    #[inline]
    pub fn record_fault(&mut self) {
        self.faults += 1;
        self.interrupts += 1;
    }

    /// Record a dirty-page write-back (one additional interrupt).
    #[inline]
    pub fn record_write_back(&mut self) {
        self.writes += 1;
        self.interrupts += 1;
    }

    /// Reset all counters to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Number of hits given the trace length this run replayed.
    pub fn hits(&self, trace_len: usize) -> u64 {
        trace_len as u64 - self.faults
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "faults: {}, interrupts: {}, writes: {}",
            self.faults, self.interrupts, self.writes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_start_at_zero() {
        let stats = RunStats::new();
        assert_eq!(stats.faults, 0);
        assert_eq!(stats.interrupts, 0);
        assert_eq!(stats.writes, 0);
    }

    #[test]
    fn test_fault_raises_one_interrupt() {
        let mut stats = RunStats::new();
        stats.record_fault();

        assert_eq!(stats.faults, 1);
        assert_eq!(stats.interrupts, 1);
        assert_eq!(stats.writes, 0);
    }

    #[test]
    fn test_write_back_is_additive() {
        let mut stats = RunStats::new();
        stats.record_fault();
        stats.record_write_back();

        assert_eq!(stats.faults, 1);
        assert_eq!(stats.writes, 1);
        assert_eq!(stats.interrupts, 2);
    }

    #[test]
    fn test_reset() {
        let mut stats = RunStats::new();
        stats.record_fault();
        stats.record_write_back();

        stats.reset();
        assert_eq!(stats, RunStats::default());
    }

    #[test]
    fn test_hits() {
        let mut stats = RunStats::new();
        stats.record_fault();
        stats.record_fault();

        assert_eq!(stats.hits(10), 8);
    }

    #[test]
    fn test_display() {
        let mut stats = RunStats::new();
        stats.record_fault();

        let text = format!("{}", stats);
        assert!(text.contains("faults: 1"));
        assert!(text.contains("interrupts: 1"));
    }
}
