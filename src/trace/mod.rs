//! Reference traces - the input to every policy run.
//!
//! A trace is an ordered sequence of [`Access`]es. The policy engine consumes
//! traces read-only; generators in [`generator`] synthesize them.

pub mod generator;

use std::collections::HashSet;

use crate::common::PageId;

pub use generator::{AccessPattern, TraceGenerator};

/// A single page reference: which page, and whether it was a write.
///
/// Accesses are immutable once generated and are replayed in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Access {
    /// The page being referenced.
    pub page: PageId,

    /// True if the reference modifies the page (dirties it).
    pub is_write: bool,
}

impl Access {
    /// Create a read access.
    #[inline]
    pub fn read(page: PageId) -> Self {
        Access {
            page,
            is_write: false,
        }
    }

    /// Create a write access.
    #[inline]
    pub fn write(page: PageId) -> Self {
        Access {
            page,
            is_write: true,
        }
    }
}

/// An ordered reference trace.
pub type Trace = Vec<Access>;

/// Count the distinct pages referenced by a trace.
///
/// Useful for sizing experiments: a policy given at least this many frames
/// never evicts.
pub fn distinct_pages(trace: &[Access]) -> usize {
    trace
        .iter()
        .map(|access| access.page)
        .collect::<HashSet<_>>()
        .len()
}
