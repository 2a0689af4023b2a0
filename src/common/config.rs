//! Configuration constants for pagesim.
//!
//! Default parameters for the classic experiment: a 300k-access trace over
//! pages 1..=1500, swept across five frame counts.

/// Default number of accesses in a generated trace.
pub const DEFAULT_TRACE_LENGTH: usize = 300_000;

/// Smallest page id produced by the default generators.
pub const DEFAULT_MIN_PAGE: u32 = 1;

/// Largest page id produced by the default generators.
pub const DEFAULT_MAX_PAGE: u32 = 1500;

/// Default frame counts for the sweep.
pub const DEFAULT_FRAME_SIZES: [usize; 5] = [30, 60, 90, 120, 150];

/// Probability that a purely random access is a write.
///
/// A 70/30 read/write split is a common rule of thumb for mixed workloads.
pub const WRITE_PROBABILITY: f64 = 0.3;

/// Number of consecutive pages in a locality window.
pub const LOCALITY_WINDOW: u32 = 40;

/// Number of accesses generated inside one locality window.
pub const LOCALITY_BURST: usize = 1000;

/// Window size for the locality phase of the mixed pattern.
pub const MIXED_WINDOW: u32 = 60;

/// Burst length bounds for the mixed pattern (inclusive).
pub const MIXED_BURST_RANGE: (usize, usize) = (50, 200);

/// Write probability inside a mixed-pattern locality burst.
///
/// Bursts model a hot working set under modification, so writes are more
/// frequent than in the baseline split.
pub const MIXED_BURST_WRITE_PROBABILITY: f64 = 0.4;

/// Write probability on a mixed-pattern random jump (mostly reads).
pub const MIXED_JUMP_WRITE_PROBABILITY: f64 = 0.2;

/// Probability that the mixed pattern stays in a locality burst.
pub const MIXED_LOCALITY_PROBABILITY: f64 = 0.7;

/// Zipf exponent for the skewed access pattern.
pub const ZIPF_EXPONENT: f64 = 1.1;

/// Accesses between reference-byte aging shifts (Additional-Reference-Bits).
pub const AGING_INTERVAL: usize = 100;

/// Reference byte assigned on admission and ORed in on every hit.
pub const REFERENCE_SEED_BIT: u8 = 0b1000_0000;
