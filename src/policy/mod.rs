//! Page replacement policies.
//!
//! Each policy owns a bounded working set of resident pages and replays a
//! reference trace, counting faults, interrupts, and disk writes.
//!
//! Implemented policies:
//! - [`FifoPolicy`] - evict in strict admission order
//! - [`OptimalPolicy`] - clairvoyant lower bound (Belady)
//! - [`ReferenceBitsPolicy`] - additional-reference-bits LRU approximation
//! - [`ArcPolicy`] - Adaptive Replacement Cache
//!
//! # Contract
//! A policy is constructed with a fixed capacity (≥ 1 frame). [`run`] replays
//! a trace once, start to finish, after resetting all counters and the
//! working set, so a policy instance can be reused across runs. Policies
//! never mutate the trace.
//!
//! [`run`]: ReplacementPolicy::run

mod arc;
mod dirty;
mod fifo;
mod optimal;
mod ref_bits;
mod stats;

use std::fmt;
use std::str::FromStr;

use crate::common::{Error, Result};
use crate::trace::Access;

pub use arc::ArcPolicy;
pub use fifo::FifoPolicy;
pub use optimal::OptimalPolicy;
pub use ref_bits::ReferenceBitsPolicy;
pub use stats::RunStats;

pub(crate) use dirty::DirtyTracker;

/// Common contract implemented by every replacement policy.
pub trait ReplacementPolicy {
    /// The fixed frame count this policy was constructed with.
    fn capacity(&self) -> usize;

    /// Replay `trace` once and return the final counters.
    ///
    /// Resets counters and the working set first, so repeated runs of the
    /// same trace yield identical statistics.
    fn run(&mut self, trace: &[Access]) -> RunStats;
}

/// Selects one of the four replacement policies by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PolicyKind {
    Fifo,
    Optimal,
    ReferenceBits,
    Arc,
}

impl PolicyKind {
    /// All policies, in presentation order.
    pub const ALL: [PolicyKind; 4] = [
        PolicyKind::Fifo,
        PolicyKind::Optimal,
        PolicyKind::ReferenceBits,
        PolicyKind::Arc,
    ];

    /// Construct a boxed policy instance with the given frame count.
    ///
    /// # Errors
    /// Returns [`Error::InvalidCapacity`] if `capacity` is zero.
    pub fn build(self, capacity: usize) -> Result<Box<dyn ReplacementPolicy + Send>> {
        Ok(match self {
            PolicyKind::Fifo => Box::new(FifoPolicy::new(capacity)?),
            PolicyKind::Optimal => Box::new(OptimalPolicy::new(capacity)?),
            PolicyKind::ReferenceBits => Box::new(ReferenceBitsPolicy::new(capacity)?),
            PolicyKind::Arc => Box::new(ArcPolicy::new(capacity)?),
        })
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PolicyKind::Fifo => "FIFO",
            PolicyKind::Optimal => "Optimal",
            PolicyKind::ReferenceBits => "ReferenceBits",
            PolicyKind::Arc => "ARC",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for PolicyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "fifo" => Ok(PolicyKind::Fifo),
            "optimal" | "opt" => Ok(PolicyKind::Optimal),
            "referencebits" | "refbits" | "reference-bits" => Ok(PolicyKind::ReferenceBits),
            "arc" => Ok(PolicyKind::Arc),
            other => Err(Error::UnknownPolicy(other.to_string())),
        }
    }
}
