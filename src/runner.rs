//! Timed trial runner.
//!
//! A trial executes one operation `iterations` times back to back on the
//! calling thread and records the wall-clock time of the whole loop. Every
//! trial is preceded by an untimed warm-up and repeated
//! [`RunConfig::repetitions`] times so the averages smooth out first-call
//! skew and scheduler noise.

use std::{
    hint::black_box,
    time::{Duration, Instant},
};

use tracing::{debug, info};

use crate::config::RunConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RateUnit {
    Calls,
    Ops,
}

impl RateUnit {
    pub fn rate_label(self) -> &'static str {
        match self {
            RateUnit::Calls => "calls/sec",
            RateUnit::Ops => "ops/sec",
        }
    }

    pub fn summary_label(self) -> &'static str {
        match self {
            RateUnit::Calls => "Per-call",
            RateUnit::Ops => "Per-operation",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TrialSpec {
    /// Single-token identifier, unique within a report.
    pub name: String,
    pub description: String,
    pub iterations: u64,
    pub unit: RateUnit,
}

impl TrialSpec {
    pub fn new(name: &str, description: &str, iterations: u64, unit: RateUnit) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            iterations,
            unit,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TrialSeries {
    pub spec: TrialSpec,
    /// Iterations actually executed per repetition, after scaling.
    pub iterations: u64,
    pub runs: Vec<Duration>,
}

impl TrialSeries {
    pub fn average(&self) -> Duration {
        if self.runs.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.runs.iter().sum();
        total / self.runs.len() as u32
    }

    pub fn average_ms(&self) -> f64 {
        self.average().as_secs_f64() * 1_000.0
    }

    pub fn average_rate(&self) -> f64 {
        throughput(self.iterations, self.average())
    }

    pub fn per_op_us(&self) -> f64 {
        mean_latency_us(self.iterations, self.average())
    }
}

/// Iterations per second; zero when nothing measurable elapsed.
pub fn throughput(iterations: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs == 0.0 {
        0.0
    } else {
        iterations as f64 / secs
    }
}

pub fn mean_latency_us(iterations: u64, elapsed: Duration) -> f64 {
    if iterations == 0 {
        0.0
    } else {
        elapsed.as_secs_f64() / iterations as f64 * 1_000_000.0
    }
}

/// Runs `op` `iterations` times and returns the elapsed wall-clock time.
/// The first error stops the loop and is returned unchanged.
pub fn time_loop<F, E>(iterations: u64, op: &mut F) -> Result<Duration, E>
where
    F: FnMut() -> Result<(), E>,
{
    let start = Instant::now();
    for _ in 0..iterations {
        black_box(op()?);
    }
    Ok(start.elapsed())
}

pub fn run_trial<F, E>(spec: TrialSpec, config: &RunConfig, mut op: F) -> Result<TrialSeries, E>
where
    F: FnMut() -> Result<(), E>,
{
    let iterations = config.scaled(spec.iterations);
    let warmup = config.warmup_iterations(iterations);
    debug!(trial = %spec.name, warmup, "warming up");
    time_loop(warmup, &mut op)?;

    let mut runs = Vec::with_capacity(config.repetitions);
    for rep in 0..config.repetitions {
        let elapsed = time_loop(iterations, &mut op)?;
        debug!(trial = %spec.name, rep = rep + 1, elapsed_us = elapsed.as_micros() as u64, "repetition done");
        runs.push(elapsed);
    }
    let series = TrialSeries {
        spec,
        iterations,
        runs,
    };
    info!(
        trial = %series.spec.name,
        iterations,
        average_ms = series.average_ms(),
        "trial complete"
    );
    Ok(series)
}
