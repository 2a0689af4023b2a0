//! Synthetic reference trace generation.
//!
//! Four access patterns with different temporal characteristics:
//! - [`AccessPattern::Random`] - uniform page selection
//! - [`AccessPattern::Locality`] - long bursts inside small page windows
//! - [`AccessPattern::Mixed`] - locality bursts interleaved with random jumps
//! - [`AccessPattern::Zipf`] - skewed popularity (a few very hot pages)

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Zipf};
use tracing::debug;

use crate::common::config::{
    DEFAULT_MAX_PAGE, DEFAULT_MIN_PAGE, DEFAULT_TRACE_LENGTH, LOCALITY_BURST, LOCALITY_WINDOW,
    MIXED_BURST_RANGE, MIXED_BURST_WRITE_PROBABILITY, MIXED_JUMP_WRITE_PROBABILITY,
    MIXED_LOCALITY_PROBABILITY, MIXED_WINDOW, WRITE_PROBABILITY, ZIPF_EXPONENT,
};
use crate::common::{Error, PageId, Result};
use crate::trace::{Access, Trace};

/// The synthetic access patterns the generator can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessPattern {
    /// Uniformly random page selection, 30% writes.
    Random,

    /// 1000-access bursts inside 40-page windows.
    Locality,

    /// 70% locality bursts (write-heavy), 30% random jumps (read-heavy).
    Mixed,

    /// Zipf-distributed page popularity.
    Zipf,
}

impl AccessPattern {
    /// All patterns, in presentation order.
    pub const ALL: [AccessPattern; 4] = [
        AccessPattern::Random,
        AccessPattern::Locality,
        AccessPattern::Mixed,
        AccessPattern::Zipf,
    ];
}

impl fmt::Display for AccessPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AccessPattern::Random => "random",
            AccessPattern::Locality => "locality",
            AccessPattern::Mixed => "mixed",
            AccessPattern::Zipf => "zipf",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for AccessPattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(AccessPattern::Random),
            "locality" => Ok(AccessPattern::Locality),
            "mixed" => Ok(AccessPattern::Mixed),
            "zipf" => Ok(AccessPattern::Zipf),
            other => Err(Error::UnknownPattern(other.to_string())),
        }
    }
}

/// Synthesizes reference traces over a fixed page range.
///
/// # Example
/// ```
/// use pagesim::trace::{AccessPattern, TraceGenerator};
///
/// let mut gen = TraceGenerator::new(1000, 1, 100, Some(42)).unwrap();
/// let trace = gen.generate(AccessPattern::Locality);
/// assert_eq!(trace.len(), 1000);
/// ```
pub struct TraceGenerator {
    /// Number of accesses per generated trace.
    length: usize,

    /// Inclusive page id range.
    min_page: u32,
    max_page: u32,

    rng: StdRng,
}

impl TraceGenerator {
    /// Create a generator for `length` accesses over pages `min_page..=max_page`.
    ///
    /// A `seed` makes generation reproducible; `None` seeds from the OS.
    ///
    /// # Errors
    /// Returns [`Error::InvalidPageRange`] if the range is empty or inverted.
    pub fn new(length: usize, min_page: u32, max_page: u32, seed: Option<u64>) -> Result<Self> {
        if min_page >= max_page {
            return Err(Error::InvalidPageRange {
                min: min_page,
                max: max_page,
            });
        }

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            length,
            min_page,
            max_page,
            rng,
        })
    }

    /// Create a generator with the default experiment parameters
    /// (300k accesses, pages 1..=1500).
    pub fn with_defaults(seed: Option<u64>) -> Result<Self> {
        Self::new(DEFAULT_TRACE_LENGTH, DEFAULT_MIN_PAGE, DEFAULT_MAX_PAGE, seed)
    }

    /// Generate a trace with the given pattern.
    pub fn generate(&mut self, pattern: AccessPattern) -> Trace {
        let trace = match pattern {
            AccessPattern::Random => self.generate_random(),
            AccessPattern::Locality => self.generate_locality(),
            AccessPattern::Mixed => self.generate_mixed(),
            AccessPattern::Zipf => self.generate_zipf(),
        };

        debug!(
            pattern = %pattern,
            length = trace.len(),
            "generated reference trace"
        );

        trace
    }

    // ========================================================================
    // Pattern implementations
    // ========================================================================

    /// Uniformly random references with a 70/30 read/write split.
    fn generate_random(&mut self) -> Trace {
        let mut trace = Vec::with_capacity(self.length);

        for _ in 0..self.length {
            let page = self.rng.gen_range(self.min_page..=self.max_page);
            let is_write = self.rng.gen_bool(WRITE_PROBABILITY);
            trace.push(Access {
                page: PageId::new(page),
                is_write,
            });
        }

        trace
    }

    /// Bursts of references confined to small contiguous page windows.
    ///
    /// Each burst picks a window start at random, then issues up to
    /// [`LOCALITY_BURST`] references inside the window.
    fn generate_locality(&mut self) -> Trace {
        let mut trace = Vec::with_capacity(self.length);
        let window = self.clamped_window(LOCALITY_WINDOW);

        while trace.len() < self.length {
            let start = self.rng.gen_range(self.min_page..=self.max_page - window);

            for _ in 0..LOCALITY_BURST {
                if trace.len() >= self.length {
                    break;
                }
                let page = self.rng.gen_range(start..start + window);
                let is_write = self.rng.gen_bool(WRITE_PROBABILITY);
                trace.push(Access {
                    page: PageId::new(page),
                    is_write,
                });
            }
        }

        trace
    }

    /// Locality bursts interleaved with random jumps.
    ///
    /// Models a program that mostly works in a hot region (modifying local
    /// state, hence more writes) and occasionally jumps elsewhere (reading
    /// shared structures, hence mostly reads).
    fn generate_mixed(&mut self) -> Trace {
        let mut trace = Vec::with_capacity(self.length);
        let window = self.clamped_window(MIXED_WINDOW);
        let (burst_min, burst_max) = MIXED_BURST_RANGE;

        while trace.len() < self.length {
            if self.rng.gen_bool(MIXED_LOCALITY_PROBABILITY) {
                let start = self.rng.gen_range(self.min_page..=self.max_page - window);
                let burst = self.rng.gen_range(burst_min..=burst_max);

                for _ in 0..burst {
                    if trace.len() >= self.length {
                        break;
                    }
                    let page = self.rng.gen_range(start..start + window);
                    let is_write = self.rng.gen_bool(MIXED_BURST_WRITE_PROBABILITY);
                    trace.push(Access {
                        page: PageId::new(page),
                        is_write,
                    });
                }
            } else {
                let page = self.rng.gen_range(self.min_page..=self.max_page);
                let is_write = self.rng.gen_bool(MIXED_JUMP_WRITE_PROBABILITY);
                trace.push(Access {
                    page: PageId::new(page),
                    is_write,
                });
            }
        }

        trace
    }

    /// Zipf-distributed references: rank 1 is the hottest page.
    fn generate_zipf(&mut self) -> Trace {
        let span = (self.max_page - self.min_page + 1) as u64;
        // Parameters are validated in `new`, so the distribution is well-formed.
        let zipf = Zipf::new(span, ZIPF_EXPONENT).expect("valid zipf parameters");

        let mut trace = Vec::with_capacity(self.length);
        for _ in 0..self.length {
            // Samples are ranks in 1..=span; map rank k to the k-th page.
            let rank = zipf.sample(&mut self.rng) as u32;
            let page = self.min_page + (rank - 1);
            let is_write = self.rng.gen_bool(WRITE_PROBABILITY);
            trace.push(Access {
                page: PageId::new(page),
                is_write,
            });
        }

        trace
    }

    /// Shrink a window to fit the configured page range.
    fn clamped_window(&self, window: u32) -> u32 {
        window.min(self.max_page - self.min_page)
    }
}
