//! Plain-text benchmark reports.
//!
//! The layout is read back by [`crate::parser`], so a few tokens are fixed:
//! every test opens with `## Test <n>: <name>`, and its summary carries
//! `Average: <x>ms` followed by `Per-call: <y>µs` or `Per-operation: <y>µs`.
//! Everything else is prose for humans.

use std::{
    fmt::{self, Write as _},
    fs,
    path::Path,
};

use crate::{
    BenchError,
    parser::is_structural_line,
    runner::{TrialSeries, throughput},
};

const RULE_WIDTH: usize = 70;

/// One named measurement as it appears in a rendered report.
#[derive(Clone, Debug, PartialEq)]
pub struct TrialResult {
    pub name: String,
    pub average_ms: f64,
    pub per_op_us: f64,
}

impl TrialResult {
    pub fn zeroed(name: &str) -> Self {
        Self {
            name: name.to_string(),
            average_ms: 0.0,
            per_op_us: 0.0,
        }
    }
}

impl From<&TrialSeries> for TrialResult {
    fn from(series: &TrialSeries) -> Self {
        Self {
            name: series.spec.name.clone(),
            average_ms: series.average_ms(),
            per_op_us: series.per_op_us(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SuiteReport {
    pub title: String,
    pub banner: Vec<String>,
    pub trials: Vec<TrialSeries>,
    pub interpretation: Vec<String>,
}

impl SuiteReport {
    pub fn results(&self) -> Vec<TrialResult> {
        self.trials.iter().map(TrialResult::from).collect()
    }
}

pub fn render_report(report: &SuiteReport) -> Result<String, BenchError> {
    validate_names(&report.trials)?;
    validate_prose(report)?;
    let mut out = String::new();
    render_into(&mut out, report).map_err(|e| BenchError::io(format!("render: {e}")))?;
    Ok(out)
}

pub fn write_report(path: &Path, report: &SuiteReport) -> Result<(), BenchError> {
    let text = render_report(report)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| BenchError::io(e.to_string()))?;
        }
    }
    fs::write(path, text).map_err(|e| BenchError::io(format!("{}: {e}", path.display())))
}

fn render_into(out: &mut String, report: &SuiteReport) -> fmt::Result {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out, "{rule}")?;
    writeln!(out, "{}", report.title)?;
    writeln!(out, "{rule}")?;
    for line in &report.banner {
        writeln!(out, "{line}")?;
    }
    if !report.banner.is_empty() {
        writeln!(out, "{rule}")?;
    }
    for (idx, series) in report.trials.iter().enumerate() {
        render_trial(out, idx + 1, series)?;
    }
    writeln!(out, "\n{rule}")?;
    if !report.interpretation.is_empty() {
        writeln!(out, "INTERPRETATION")?;
        writeln!(out, "{rule}")?;
        for line in &report.interpretation {
            writeln!(out, "{line}")?;
        }
        writeln!(out, "{rule}")?;
    }
    Ok(())
}

fn render_trial(out: &mut String, number: usize, series: &TrialSeries) -> fmt::Result {
    let spec = &series.spec;
    let unit = spec.unit;
    writeln!(
        out,
        "\n## Test {number}: {} ({} iterations)",
        spec.name,
        group_thousands(series.iterations)
    )?;
    if !spec.description.is_empty() {
        writeln!(out, "Measures: {}", spec.description)?;
    }
    for (idx, elapsed) in series.runs.iter().enumerate() {
        writeln!(
            out,
            "  Run {}: {:.2}ms ({:.0} {})",
            idx + 1,
            elapsed.as_secs_f64() * 1_000.0,
            throughput(series.iterations, *elapsed),
            unit.rate_label()
        )?;
    }
    writeln!(
        out,
        "  Average: {:.2}ms ({:.0} {})",
        series.average_ms(),
        series.average_rate(),
        unit.rate_label()
    )?;
    writeln!(out, "  {}: {:.2}µs", unit.summary_label(), series.per_op_us())
}

fn validate_names(trials: &[TrialSeries]) -> Result<(), BenchError> {
    let mut seen = Vec::with_capacity(trials.len());
    for series in trials {
        let name = series.spec.name.as_str();
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(BenchError::invalid_input(format!(
                "test name {name:?} must be a single non-empty token"
            )));
        }
        if seen.contains(&name) {
            return Err(BenchError::invalid_input(format!(
                "duplicate test name {name}"
            )));
        }
        seen.push(name);
    }
    Ok(())
}

/// Report text must stay on one line. Lines printed bare must also not look
/// like a heading or summary line, or the parser would pick them up.
fn validate_prose(report: &SuiteReport) -> Result<(), BenchError> {
    let bare = std::iter::once(report.title.as_str())
        .chain(report.banner.iter().map(String::as_str))
        .chain(report.interpretation.iter().map(String::as_str));
    for line in bare {
        single_line(line)?;
        if is_structural_line(line) {
            return Err(BenchError::invalid_input(format!(
                "report text {line:?} reads as a test heading or summary"
            )));
        }
    }
    for series in &report.trials {
        single_line(&series.spec.description)?;
    }
    Ok(())
}

fn single_line(line: &str) -> Result<(), BenchError> {
    if line.contains(['\n', '\r']) {
        return Err(BenchError::invalid_input(format!(
            "report text {line:?} spans several lines"
        )));
    }
    Ok(())
}

pub(crate) fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
