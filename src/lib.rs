//! pagesim - A page replacement simulator with swappable eviction policies.
//!
//! # Architecture
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                         pagesim                           │
//! ├───────────────────────────────────────────────────────────┤
//! │  ┌───────────────────────────────────────────────────┐    │
//! │  │           Trace Layer (trace/)                    │    │
//! │  │   TraceGenerator: random | locality | mixed | zipf│    │
//! │  └───────────────────────────────────────────────────┘    │
//! │                          ↓                                │
//! │  ┌───────────────────────────────────────────────────┐    │
//! │  │     Policy Engine (policy/)  [Swappable]          │    │
//! │  │  ┌─────────────────────────────────────────────┐  │    │
//! │  │  │  FIFO | Optimal | ReferenceBits | ARC       │  │    │
//! │  │  └─────────────────────────────────────────────┘  │    │
//! │  │     ReplacementPolicy + DirtyTracker + RunStats   │    │
//! │  └───────────────────────────────────────────────────┘    │
//! │                          ↓                                │
//! │  ┌───────────────────────────────────────────────────┐    │
//! │  │          Experiment Driver (sim/)                 │    │
//! │  │   frame sweep × traces × policies → summary/CSV   │    │
//! │  └───────────────────────────────────────────────────┘    │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (PageId, Error, default parameters)
//! - [`trace`] - Access traces and synthetic trace generation
//! - [`policy`] - The four replacement policies and their common contract
//! - [`sim`] - Sweep orchestration, summaries, and CSV export
//!
//! # Quick Start
//! ```
//! use pagesim::policy::PolicyKind;
//! use pagesim::trace::{AccessPattern, TraceGenerator};
//!
//! let mut gen = TraceGenerator::new(10_000, 1, 500, Some(42)).unwrap();
//! let trace = gen.generate(AccessPattern::Locality);
//!
//! let mut policy = PolicyKind::Arc.build(64).unwrap();
//! let stats = policy.run(&trace);
//! assert!(stats.interrupts >= stats.faults);
//! ```

// Core modules
pub mod common;
pub mod policy;
pub mod sim;
pub mod trace;

// Re-export commonly used items at crate root for convenience
pub use common::{Error, PageId, Result};

pub use policy::{
    ArcPolicy, FifoPolicy, OptimalPolicy, PolicyKind, ReferenceBitsPolicy, ReplacementPolicy,
    RunStats,
};
pub use sim::{ResultRow, Simulator, SweepConfig};
pub use trace::{Access, AccessPattern, Trace, TraceGenerator};
