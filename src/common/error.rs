//! Error types for pagesim.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
/// This is a common Rust pattern (see `std::io::Result`).
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in pagesim.
///
/// By having a single error type, error handling stays consistent across
/// the policy engine, the trace generators, and the sweep driver.
#[derive(Debug, Error)]
pub enum Error {
    /// A policy was constructed with zero frames.
    ///
    /// Every policy needs at least one frame to hold a resident page;
    /// this is rejected at construction time, before any run.
    #[error("capacity must be at least 1 frame")]
    InvalidCapacity,

    /// A sweep was configured with no frame sizes.
    #[error("frame size sweep must not be empty")]
    EmptyFrameSweep,

    /// A policy name did not match any known policy.
    #[error("unknown policy: {0:?} (expected fifo, optimal, refbits, or arc)")]
    UnknownPolicy(String),

    /// An access pattern name did not match any known generator.
    #[error("unknown access pattern: {0:?} (expected random, locality, mixed, or zipf)")]
    UnknownPattern(String),

    /// Trace generator parameters describe an empty or inverted page range.
    #[error("invalid page range: {min}..={max}")]
    InvalidPageRange { min: u32, max: u32 },

    /// I/O error from result export.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
