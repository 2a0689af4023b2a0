//! Experiment orchestration.
//!
//! The [`Simulator`] sweeps frame sizes × traces × policies, running each
//! combination in isolation and collecting one [`ResultRow`] per run.
//! Combinations share nothing mutable, so the sweep fans out across scoped
//! threads and gathers rows behind a mutex.

use std::fmt;
use std::io::Write;
use std::thread;

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::common::config::DEFAULT_FRAME_SIZES;
use crate::common::{Error, Result};
use crate::policy::{PolicyKind, RunStats};
use crate::trace::Trace;

/// Sweep parameters.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Frame counts to evaluate, in presentation order.
    pub frame_sizes: Vec<usize>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            frame_sizes: DEFAULT_FRAME_SIZES.to_vec(),
        }
    }
}

/// One (trace, policy, frame count) result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub trace_name: String,
    pub policy: PolicyKind,
    pub frames: usize,
    pub stats: RunStats,
}

impl fmt::Display for ResultRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<10} {:<14} frames: {:<4} {}",
            self.trace_name, self.policy, self.frames, self.stats
        )
    }
}

/// Per-(trace, policy) averages across the frame sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub trace_name: String,
    pub policy: PolicyKind,
    pub avg_faults: f64,
    pub avg_interrupts: f64,
    pub avg_writes: f64,
}

impl fmt::Display for SummaryRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<10} {:<14} avg faults: {:>10.0}  avg interrupts: {:>10.0}  avg writes: {:>10.0}",
            self.trace_name, self.policy, self.avg_faults, self.avg_interrupts, self.avg_writes
        )
    }
}

/// Runs the frame-size sweep and holds the collected results.
///
/// # Example
/// ```
/// use pagesim::sim::{Simulator, SweepConfig};
/// use pagesim::policy::PolicyKind;
/// use pagesim::trace::{AccessPattern, TraceGenerator};
///
/// let mut gen = TraceGenerator::new(2000, 1, 100, Some(1)).unwrap();
/// let traces = vec![("random".to_string(), gen.generate(AccessPattern::Random))];
///
/// let mut sim = Simulator::new(SweepConfig { frame_sizes: vec![8, 16] }).unwrap();
/// sim.run_experiments(&traces, &[PolicyKind::Fifo, PolicyKind::Arc]);
/// assert_eq!(sim.results().len(), 4);
/// ```
pub struct Simulator {
    frame_sizes: Vec<usize>,
    results: Vec<ResultRow>,
}

impl Simulator {
    /// Create a simulator for the given sweep.
    ///
    /// # Errors
    /// - [`Error::EmptyFrameSweep`] if no frame sizes are configured
    /// - [`Error::InvalidCapacity`] if any frame size is zero
    pub fn new(config: SweepConfig) -> Result<Self> {
        if config.frame_sizes.is_empty() {
            return Err(Error::EmptyFrameSweep);
        }
        if config.frame_sizes.contains(&0) {
            return Err(Error::InvalidCapacity);
        }

        Ok(Self {
            frame_sizes: config.frame_sizes,
            results: Vec::new(),
        })
    }

    /// Create a simulator with the default frame sweep [30, 60, 90, 120, 150].
    pub fn with_defaults() -> Self {
        Self {
            frame_sizes: DEFAULT_FRAME_SIZES.to_vec(),
            results: Vec::new(),
        }
    }

    /// The configured frame sweep.
    pub fn frame_sizes(&self) -> &[usize] {
        &self.frame_sizes
    }

    /// Run every (trace × policy × frame count) combination.
    ///
    /// Each run owns its policy instance and shares only the read-only
    /// trace, so the combinations execute on scoped threads. Rows come back
    /// in deterministic (trace, policy, frames) order regardless of thread
    /// scheduling. Results from earlier calls are discarded.
    pub fn run_experiments(&mut self, traces: &[(String, Trace)], policies: &[PolicyKind]) {
        self.results.clear();

        // (ordering key, job description) pairs.
        let mut jobs = Vec::new();
        for (trace_idx, (name, trace)) in traces.iter().enumerate() {
            for (policy_idx, &kind) in policies.iter().enumerate() {
                for &frames in &self.frame_sizes {
                    jobs.push((trace_idx, policy_idx, frames, name.as_str(), trace, kind));
                }
            }
        }

        let collected: Mutex<Vec<((usize, usize, usize), ResultRow)>> =
            Mutex::new(Vec::with_capacity(jobs.len()));

        thread::scope(|scope| {
            for &(trace_idx, policy_idx, frames, name, trace, kind) in &jobs {
                let collected = &collected;
                scope.spawn(move || {
                    // Frame sizes are validated at construction, so build
                    // cannot fail here.
                    let mut policy = kind.build(frames).expect("validated frame count");
                    let stats = policy.run(trace);

                    debug!(trace = name, policy = %kind, frames, %stats, "run complete");

                    collected.lock().push((
                        (trace_idx, policy_idx, frames),
                        ResultRow {
                            trace_name: name.to_string(),
                            policy: kind,
                            frames,
                            stats,
                        },
                    ));
                });
            }
        });

        let mut rows = collected.into_inner();
        rows.sort_by_key(|(key, _)| *key);
        self.results = rows.into_iter().map(|(_, row)| row).collect();

        info!(results = self.results.len(), "sweep complete");
    }

    /// All collected rows, in (trace, policy, frames) order.
    pub fn results(&self) -> &[ResultRow] {
        &self.results
    }

    /// Average the sweep per (trace, policy), preserving result order.
    pub fn summary(&self) -> Vec<SummaryRow> {
        let divisor = self.frame_sizes.len() as f64;
        let mut rows: Vec<SummaryRow> = Vec::new();

        for result in &self.results {
            let found = rows
                .iter_mut()
                .find(|s| s.trace_name == result.trace_name && s.policy == result.policy);

            match found {
                Some(summary) => {
                    summary.avg_faults += result.stats.faults as f64 / divisor;
                    summary.avg_interrupts += result.stats.interrupts as f64 / divisor;
                    summary.avg_writes += result.stats.writes as f64 / divisor;
                }
                None => rows.push(SummaryRow {
                    trace_name: result.trace_name.clone(),
                    policy: result.policy,
                    avg_faults: result.stats.faults as f64 / divisor,
                    avg_interrupts: result.stats.interrupts as f64 / divisor,
                    avg_writes: result.stats.writes as f64 / divisor,
                }),
            }
        }

        rows
    }

    /// Write all rows as CSV.
    pub fn write_csv<W: Write>(&self, mut writer: W) -> Result<()> {
        writeln!(writer, "trace,policy,frames,faults,interrupts,writes")?;
        for row in &self.results {
            writeln!(
                writer,
                "{},{},{},{},{},{}",
                row.trace_name,
                row.policy,
                row.frames,
                row.stats.faults,
                row.stats.interrupts,
                row.stats.writes
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::PageId;
    use crate::trace::Access;

    /// A small looping trace with a few writes.
    fn looping_trace(pages: u32, length: usize) -> Trace {
        (0..length)
            .map(|i| Access {
                page: PageId::new(i as u32 % pages),
                is_write: i % 4 == 0,
            })
            .collect()
    }

    fn small_sim() -> Simulator {
        Simulator::new(SweepConfig {
            frame_sizes: vec![2, 4],
        })
        .unwrap()
    }

    #[test]
    fn test_empty_sweep_rejected() {
        let result = Simulator::new(SweepConfig {
            frame_sizes: vec![],
        });
        assert!(matches!(result, Err(Error::EmptyFrameSweep)));
    }

    #[test]
    fn test_zero_frame_size_rejected() {
        let result = Simulator::new(SweepConfig {
            frame_sizes: vec![4, 0],
        });
        assert!(matches!(result, Err(Error::InvalidCapacity)));
    }

    #[test]
    fn test_sweep_produces_all_combinations() {
        let traces = vec![
            ("a".to_string(), looping_trace(6, 200)),
            ("b".to_string(), looping_trace(9, 200)),
        ];

        let mut sim = small_sim();
        sim.run_experiments(&traces, &PolicyKind::ALL);

        // 2 traces × 4 policies × 2 frame sizes
        assert_eq!(sim.results().len(), 16);
    }

    #[test]
    fn test_result_order_is_deterministic() {
        let traces = vec![("a".to_string(), looping_trace(6, 200))];

        let mut sim = small_sim();
        sim.run_experiments(&traces, &[PolicyKind::Arc, PolicyKind::Fifo]);

        let order: Vec<(PolicyKind, usize)> = sim
            .results()
            .iter()
            .map(|row| (row.policy, row.frames))
            .collect();

        assert_eq!(
            order,
            vec![
                (PolicyKind::Arc, 2),
                (PolicyKind::Arc, 4),
                (PolicyKind::Fifo, 2),
                (PolicyKind::Fifo, 4),
            ]
        );
    }

    #[test]
    fn test_rerun_replaces_results() {
        let traces = vec![("a".to_string(), looping_trace(6, 200))];

        let mut sim = small_sim();
        sim.run_experiments(&traces, &[PolicyKind::Fifo]);
        sim.run_experiments(&traces, &[PolicyKind::Fifo]);

        assert_eq!(sim.results().len(), 2);
    }

    #[test]
    fn test_optimal_is_lower_bound_in_sweep() {
        let traces = vec![("loop".to_string(), looping_trace(10, 500))];

        let mut sim = small_sim();
        sim.run_experiments(&traces, &PolicyKind::ALL);

        for &frames in sim.frame_sizes() {
            let fault_count = |kind: PolicyKind| {
                sim.results()
                    .iter()
                    .find(|row| row.policy == kind && row.frames == frames)
                    .map(|row| row.stats.faults)
                    .unwrap()
            };

            let optimal = fault_count(PolicyKind::Optimal);
            for kind in [PolicyKind::Fifo, PolicyKind::ReferenceBits, PolicyKind::Arc] {
                assert!(optimal <= fault_count(kind), "{} beat Optimal", kind);
            }
        }
    }

    #[test]
    fn test_summary_averages() {
        let traces = vec![("a".to_string(), looping_trace(3, 100))];

        let mut sim = Simulator::new(SweepConfig {
            frame_sizes: vec![3, 5],
        })
        .unwrap();
        sim.run_experiments(&traces, &[PolicyKind::Fifo]);

        // Capacity ≥ distinct pages in both runs: 3 cold faults each.
        let summary = sim.summary();
        assert_eq!(summary.len(), 1);
        assert!((summary[0].avg_faults - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_csv_output() {
        let traces = vec![("a".to_string(), looping_trace(3, 100))];

        let mut sim = Simulator::new(SweepConfig {
            frame_sizes: vec![3],
        })
        .unwrap();
        sim.run_experiments(&traces, &[PolicyKind::Fifo]);

        let mut buffer = Vec::new();
        sim.write_csv(&mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();

        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("trace,policy,frames,faults,interrupts,writes")
        );
        assert!(lines.next().unwrap().starts_with("a,FIFO,3,3,"));
    }
}
