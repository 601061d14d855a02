//! Overhead benchmarks for the Retrace interception layer.
//!
//! The `bench_driver` binary runs the trial suites and writes plain-text
//! reports; run it once normally and once under Retrace. `retrace_bench
//! analyze` then pairs the two runs and prints the per-test overhead.

pub mod config;
pub mod errors;
pub mod logging;
pub mod overhead;
pub mod parser;
pub mod report;
pub mod runner;
pub mod summary;
pub mod workloads;

pub use crate::config::{AnalyzerConfig, ReportSlot, RunConfig};
pub use crate::errors::BenchError;
pub use crate::overhead::{Classification, OverheadRecord, calculate_overhead, format_overhead};
pub use crate::parser::{ParsedReport, load_report, parse_report};
pub use crate::report::{SuiteReport, TrialResult, render_report};
pub use crate::summary::Analyzer;
pub use crate::workloads::Suite;
