use tracing::warn;

use crate::{parser::ParsedReport, report::TrialResult};

/// Internal-code deltas smaller than this (in percent) are scheduler noise.
pub const NOISE_THRESHOLD_PCT: f64 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    /// Code that never crosses the interception boundary; expected ~0%.
    Internal,
    /// Boundary crossings the interception layer sees; expected small fixed cost.
    External,
}

impl Classification {
    pub fn is_internal(self) -> bool {
        matches!(self, Classification::Internal)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoiseVerdict {
    WithinNoise,
    Unexpected,
}

impl NoiseVerdict {
    pub fn of(percentage: f64) -> Self {
        if percentage.abs() < NOISE_THRESHOLD_PCT {
            NoiseVerdict::WithinNoise
        } else {
            NoiseVerdict::Unexpected
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OverheadRecord {
    pub name: String,
    pub baseline_ms: f64,
    pub treatment_ms: f64,
    pub baseline_per_op_us: f64,
    pub treatment_per_op_us: f64,
    pub percentage_delta: f64,
    pub absolute_delta_us: f64,
    pub classification: Classification,
    /// The treatment report had no block with this name; its values are zero.
    pub treatment_missing: bool,
}

impl OverheadRecord {
    pub fn describe(&self) -> String {
        format_overhead(
            self.percentage_delta,
            self.absolute_delta_us,
            self.classification.is_internal(),
        )
    }
}

/// Returns `(percentage, absolute_us)` for a baseline/treatment pair given in
/// milliseconds. A zero baseline yields `(0.0, 0.0)`.
pub fn calculate_overhead(baseline: f64, treatment: f64) -> (f64, f64) {
    if baseline == 0.0 {
        return (0.0, 0.0);
    }
    let percentage = (treatment - baseline) / baseline * 100.0;
    let absolute_us = (treatment - baseline) * 1000.0;
    (percentage, absolute_us)
}

pub fn format_overhead(percentage: f64, absolute_us: f64, is_internal: bool) -> String {
    if is_internal {
        match NoiseVerdict::of(percentage) {
            NoiseVerdict::WithinNoise => format!("{percentage:+.1}% ✓ (within noise)"),
            NoiseVerdict::Unexpected => format!("{percentage:+.1}% ⚠ (unexpected)"),
        }
    } else {
        // Non-zero deltas under 0.1% get a second decimal.
        let digits = if percentage != 0.0 && percentage.abs() < 0.1 { 2 } else { 1 };
        format!("{absolute_us:+.1}µs per operation ({percentage:+.digits$}%)")
    }
}

/// Pairs every baseline test with its treatment counterpart, in baseline
/// order. Treatment-only tests are ignored; baseline-only tests compare
/// against a zeroed result.
pub fn compare_reports(
    baseline: &ParsedReport,
    treatment: &ParsedReport,
    classification: Classification,
) -> Vec<OverheadRecord> {
    baseline
        .iter()
        .map(|base| {
            let (other, treatment_missing) = match treatment.get(&base.name) {
                Some(found) => (found.clone(), false),
                None => {
                    warn!(test = %base.name, "test missing from treatment report, treating as zero");
                    (TrialResult::zeroed(&base.name), true)
                }
            };
            let (percentage_delta, absolute_delta_us) =
                calculate_overhead(base.average_ms, other.average_ms);
            OverheadRecord {
                name: base.name.clone(),
                baseline_ms: base.average_ms,
                treatment_ms: other.average_ms,
                baseline_per_op_us: base.per_op_us,
                treatment_per_op_us: other.per_op_us,
                percentage_delta,
                absolute_delta_us,
                classification,
                treatment_missing,
            }
        })
        .collect()
}
