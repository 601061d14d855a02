//! Reads [`TrialResult`]s back out of rendered report text.
//!
//! Parsing is line oriented. Each `## Test <n>:` heading opens a new block and
//! discards any half-read one, so an `Average` line can never be paired with a
//! `Per-call` line from a different test. A heading without a name closes the
//! open block without starting another. Summary tokens only count at the start
//! of a line, which keeps prose such as `Measures:` descriptions inert.

use std::{fs, path::Path, sync::LazyLock};

use ahash::AHashMap;
use regex::Regex;
use tracing::{debug, warn};

use crate::{BenchError, report::TrialResult};

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*## Test \d+:\s*(\S+)?").expect("heading pattern"));
static AVERAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*Average: ([0-9.]+)ms").expect("average pattern"));
static PER_OP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*Per-(?:call|operation): ([0-9.]+)µs").expect("per-op pattern")
});

/// Parsed results in report order, addressable by test name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedReport {
    entries: Vec<TrialResult>,
    index: AHashMap<String, usize>,
}

impl ParsedReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repeated name overwrites the earlier values but keeps its slot.
    pub fn insert(&mut self, result: TrialResult) {
        match self.index.get(&result.name) {
            Some(&slot) => {
                warn!(test = %result.name, "duplicate test block, keeping the later values");
                self.entries[slot] = result;
            }
            None => {
                self.index.insert(result.name.clone(), self.entries.len());
                self.entries.push(result);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&TrialResult> {
        self.index.get(name).map(|&slot| &self.entries[slot])
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrialResult> {
        self.entries.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|r| r.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<TrialResult> for ParsedReport {
    fn from_iter<I: IntoIterator<Item = TrialResult>>(iter: I) -> Self {
        let mut report = ParsedReport::new();
        for result in iter {
            report.insert(result);
        }
        report
    }
}

#[derive(Debug)]
enum BlockState {
    AwaitingHeading,
    AwaitingAverage { name: String },
    AwaitingPerOp { name: String, average_ms: f64 },
}

pub fn parse_report(text: &str) -> Result<ParsedReport, BenchError> {
    let mut report = ParsedReport::new();
    let mut state = BlockState::AwaitingHeading;
    for (line_no, line) in text.lines().enumerate() {
        if let Some(caps) = HEADING.captures(line) {
            if !matches!(state, BlockState::AwaitingHeading) {
                debug!(line = line_no + 1, ?state, "heading reached before block completed");
            }
            state = match caps.get(1) {
                Some(name) => BlockState::AwaitingAverage {
                    name: name.as_str().to_string(),
                },
                None => {
                    debug!(line = line_no + 1, "heading without a test name, skipping block");
                    BlockState::AwaitingHeading
                }
            };
            continue;
        }
        state = advance(state, line, line_no + 1, &mut report)?;
    }
    if let BlockState::AwaitingAverage { name } | BlockState::AwaitingPerOp { name, .. } = &state {
        debug!(test = %name, "report ended inside an incomplete block");
    }
    debug!(tests = report.len(), "parsed report");
    Ok(report)
}

pub fn load_report(path: &Path) -> Result<ParsedReport, BenchError> {
    if !path.exists() {
        return Err(BenchError::MissingReport(path.to_path_buf()));
    }
    let text = fs::read_to_string(path)
        .map_err(|e| BenchError::io(format!("{}: {e}", path.display())))?;
    parse_report(&text).map_err(|err| match err {
        BenchError::MalformedReport(msg) => {
            BenchError::malformed(format!("{}: {msg}", path.display()))
        }
        other => other,
    })
}

/// True when `line` would be read as a heading or summary line.
pub(crate) fn is_structural_line(line: &str) -> bool {
    HEADING.is_match(line) || AVERAGE.is_match(line) || PER_OP.is_match(line)
}

fn advance(
    state: BlockState,
    line: &str,
    line_no: usize,
    report: &mut ParsedReport,
) -> Result<BlockState, BenchError> {
    match state {
        BlockState::AwaitingHeading => Ok(BlockState::AwaitingHeading),
        BlockState::AwaitingAverage { name } => {
            let Some(caps) = AVERAGE.captures(line) else {
                return Ok(BlockState::AwaitingAverage { name });
            };
            let average_ms = parse_number(&caps[1], line_no)?;
            let rest = &line[caps.get(0).map_or(line.len(), |m| m.end())..];
            advance(
                BlockState::AwaitingPerOp { name, average_ms },
                rest,
                line_no,
                report,
            )
        }
        BlockState::AwaitingPerOp { name, average_ms } => {
            let Some(caps) = PER_OP.captures(line) else {
                return Ok(BlockState::AwaitingPerOp { name, average_ms });
            };
            let per_op_us = parse_number(&caps[1], line_no)?;
            report.insert(TrialResult {
                name,
                average_ms,
                per_op_us,
            });
            Ok(BlockState::AwaitingHeading)
        }
    }
}

fn parse_number(token: &str, line_no: usize) -> Result<f64, BenchError> {
    token
        .parse::<f64>()
        .map_err(|_| BenchError::malformed(format!("line {line_no}: invalid number {token:?}")))
}
