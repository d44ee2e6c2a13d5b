//! Repeated-run timing harness.
//!
//! Runs the full evaluation several times over the same dataset, discards
//! a warm-up prefix, and reports the mean latency of the rest together with
//! the covered node count.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::ingest::Dataset;
use crate::reach::{CoverageReport, ReachError, ReachabilityEngine};

/// How each iteration attaches virtual sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Strategy {
    /// Read-only overlay per category.
    #[default]
    Overlay,

    /// Insert and remove the virtual source in the shared graph.
    InPlace,
}

/// Configuration for a benchmark run.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Total iterations, warm-up included. Zero is treated as one.
    pub repeat: usize,

    /// Virtual source strategy.
    pub strategy: Strategy,
}

impl BenchConfig {
    pub fn new(repeat: usize, strategy: Strategy) -> Self {
        Self { repeat, strategy }
    }

    /// Iterations actually executed.
    pub fn iterations(&self) -> usize {
        self.repeat.max(1)
    }

    /// Leading iterations excluded from timing: none for a single run,
    /// otherwise a tenth of the runs, capped at ten.
    pub fn warmup(&self) -> usize {
        match self.iterations() {
            1 => 0,
            n => (n / 10).min(10),
        }
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            repeat: 1,
            strategy: Strategy::Overlay,
        }
    }
}

/// Timing summary of a benchmark run.
#[derive(Debug, Clone)]
pub struct BenchReport {
    pub threshold: f64,
    pub iterations: usize,
    pub warmup: usize,
    /// Mean duration over the measured (non warm-up) iterations.
    pub average: Duration,
    /// Number of covered nodes in the final iteration.
    pub covered: usize,
    /// Result of the final iteration.
    pub last: CoverageReport,
}

impl BenchReport {
    /// Iterations that contributed to the average.
    pub fn measured(&self) -> usize {
        self.iterations - self.warmup
    }
}

impl fmt::Display for BenchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.iterations > 1 {
            writeln!(
                f,
                "Average execution time over {} iterations for {}-MC: {:?}",
                self.measured(),
                self.threshold,
                self.average
            )?;
        } else {
            writeln!(f, "Execution time for {}-MC: {:?}", self.threshold, self.average)?;
        }
        write!(f, "There are {} nodes in the {} MC", self.covered, self.threshold)
    }
}

/// Run the evaluation `config.repeat` times.
///
/// Each iteration builds a fresh matrix. The first error aborts the run.
pub fn run_bench(
    engine: &ReachabilityEngine,
    data: &mut Dataset,
    threshold: f64,
    config: &BenchConfig,
) -> Result<BenchReport, ReachError> {
    let iterations = config.iterations();
    let warmup = config.warmup();

    let timed = |data: &mut Dataset| -> Result<(CoverageReport, Duration), ReachError> {
        let start = Instant::now();
        let report = match config.strategy {
            Strategy::Overlay => engine.evaluate(&data.graph, &data.index, threshold)?,
            Strategy::InPlace => {
                engine.evaluate_in_place(&mut data.graph, &data.index, threshold)?
            }
        };
        Ok((report, start.elapsed()))
    };

    let mut total = Duration::ZERO;
    let (mut last, elapsed) = timed(data)?;
    if warmup == 0 {
        total += elapsed;
    }

    for i in 1..iterations {
        let (report, elapsed) = timed(data)?;
        if i >= warmup {
            total += elapsed;
        }
        debug!(iteration = i, ?elapsed, covered = report.covered.len(), "iteration complete");
        last = report;
    }

    let measured = u32::try_from(iterations - warmup).unwrap_or(u32::MAX);

    Ok(BenchReport {
        threshold,
        iterations,
        warmup,
        average: total / measured,
        covered: last.covered.len(),
        last,
    })
}
