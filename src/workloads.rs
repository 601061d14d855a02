//! The concrete trial suites.
//!
//! `internal` stays inside the process and touches nothing the interception
//! layer watches. `external` crosses real boundaries (environment, file
//! system). `synthetic` hammers clock reads in tight loops, which is the
//! worst case for per-call interception cost.

use std::{env, fmt, fs, hint::black_box, io::Write as _, str::FromStr, time::SystemTime};

use chrono::Local;
use rand::{Rng, SeedableRng, rngs::StdRng};
use tempfile::NamedTempFile;

use crate::{
    BenchError,
    config::RunConfig,
    report::SuiteReport,
    runner::{RateUnit, TrialSeries, TrialSpec, run_trial},
};

const SORT_SEED: u64 = 0x5EED_50A7;
const SORT_LEN: usize = 256;
const FILE_PAYLOAD: &[u8] = b"test data";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Suite {
    Internal,
    External,
    Synthetic,
}

impl Suite {
    pub fn all() -> [Suite; 3] {
        [Suite::Internal, Suite::External, Suite::Synthetic]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Suite::Internal => "internal",
            Suite::External => "external",
            Suite::Synthetic => "synthetic",
        }
    }

    /// File name a suite's report is written under for a run label such as
    /// `baseline` or `retrace`.
    pub fn report_file_name(self, label: &str) -> String {
        format!("{}_{label}.txt", self.as_str())
    }

    fn title(self) -> &'static str {
        match self {
            Suite::Internal => "INTERNAL CODE BENCHMARKS",
            Suite::External => "EXTERNAL BOUNDARY CROSSING BENCHMARKS",
            Suite::Synthetic => "RETRACE SYNTHETIC WORST-CASE BENCHMARKS",
        }
    }

    fn banner(self) -> Vec<String> {
        let lines: &[&str] = match self {
            Suite::Internal => &[
                "Deterministic in-process work. Nothing here crosses an external boundary.",
            ],
            Suite::External => &["These test actual boundaries that Retrace intercepts."],
            Suite::Synthetic => &[
                "These measure pure proxy interception overhead in tight loops.",
                "Real applications will see much lower overhead.",
            ],
        };
        lines.iter().map(|line| line.to_string()).collect()
    }

    fn interpretation(self) -> Vec<String> {
        let lines: &[&str] = match self {
            Suite::Synthetic => &[
                "This represents WORST CASE overhead:",
                "- Tight loops calling external functions",
                "- Zero actual business logic",
                "- Maximum proxy interception density",
                "",
                "Real applications will see much lower overhead because:",
                "- Most code is internal (not intercepted)",
                "- External calls do actual work (network, DB)",
                "- Business logic dominates execution time",
            ],
            Suite::Internal | Suite::External => &[],
        };
        lines.iter().map(|line| line.to_string()).collect()
    }
}

impl fmt::Display for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Suite {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "internal" => Ok(Suite::Internal),
            "external" => Ok(Suite::External),
            "synthetic" => Ok(Suite::Synthetic),
            other => Err(BenchError::invalid_input(format!("unknown suite {other}"))),
        }
    }
}

pub fn run_suite(suite: Suite, config: &RunConfig) -> Result<SuiteReport, BenchError> {
    let trials = match suite {
        Suite::Internal => internal_trials(config)?,
        Suite::External => external_trials(config)?,
        Suite::Synthetic => synthetic_trials(config)?,
    };
    Ok(SuiteReport {
        title: suite.title().to_string(),
        banner: suite.banner(),
        trials,
        interpretation: suite.interpretation(),
    })
}

fn internal_trials(config: &RunConfig) -> Result<Vec<TrialSeries>, BenchError> {
    let input = seeded_integers(SORT_SEED, SORT_LEN);
    let sort = run_trial(
        TrialSpec::new(
            "sort_integers",
            "sorting 256 seeded integers",
            10_000,
            RateUnit::Calls,
        ),
        config,
        || {
            let mut data = input.clone();
            data.sort_unstable();
            black_box(data);
            Ok::<_, BenchError>(())
        },
    )?;

    let mut counter = 0u64;
    let formatting = run_trial(
        TrialSpec::new(
            "format_strings",
            "building short strings with format!",
            10_000,
            RateUnit::Calls,
        ),
        config,
        || {
            counter = counter.wrapping_add(1);
            black_box(format!("request-{counter}-{}", counter % 7));
            Ok::<_, BenchError>(())
        },
    )?;

    let fold = run_trial(
        TrialSpec::new(
            "arithmetic_fold",
            "folding 1,000 integers with wrapping arithmetic",
            10_000,
            RateUnit::Calls,
        ),
        config,
        || {
            let acc = (0..1_000u64).fold(17u64, |acc, x| {
                acc.wrapping_mul(31).wrapping_add(black_box(x))
            });
            black_box(acc);
            Ok::<_, BenchError>(())
        },
    )?;

    Ok(vec![sort, formatting, fold])
}

fn external_trials(config: &RunConfig) -> Result<Vec<TrialSeries>, BenchError> {
    let env_read = run_trial(
        TrialSpec::new(
            "env_var_access",
            "reading HOME from the process environment",
            10_000,
            RateUnit::Calls,
        ),
        config,
        || {
            black_box(env::var_os("HOME"));
            Ok::<_, BenchError>(())
        },
    )?;

    let mut file = NamedTempFile::new().map_err(|e| BenchError::io(e.to_string()))?;
    file.write_all(FILE_PAYLOAD)
        .and_then(|_| file.flush())
        .map_err(|e| BenchError::io(e.to_string()))?;
    let path = file.path().to_path_buf();
    let file_read = run_trial(
        TrialSpec::new(
            "file_read",
            "opening and reading a small temporary file",
            1_000,
            RateUnit::Ops,
        ),
        config,
        || {
            let data = fs::read(&path).map_err(|e| BenchError::io(e.to_string()))?;
            black_box(data);
            Ok::<_, BenchError>(())
        },
    )?;

    Ok(vec![env_read, file_read])
}

fn synthetic_trials(config: &RunConfig) -> Result<Vec<TrialSeries>, BenchError> {
    let clock = run_trial(
        TrialSpec::new(
            "wall_clock_read",
            "cost of intercepting SystemTime::now calls",
            10_000,
            RateUnit::Calls,
        ),
        config,
        || {
            black_box(SystemTime::now());
            Ok::<_, BenchError>(())
        },
    )?;

    let datetime = run_trial(
        TrialSpec::new(
            "local_datetime_read",
            "cost of intercepting local calendar time lookups",
            10_000,
            RateUnit::Calls,
        ),
        config,
        || {
            black_box(Local::now());
            Ok::<_, BenchError>(())
        },
    )?;

    Ok(vec![clock, datetime])
}

fn seeded_integers(seed: u64, len: usize) -> Vec<u32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(0..1_000_000)).collect()
}
