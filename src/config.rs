//! Process-wide settings for the analyzer and the trial runner.
//!
//! The analyzer never reads literal paths; it asks an [`AnalyzerConfig`] for
//! the location of each of the four reports. Values come from, in rising
//! precedence: built-in defaults, an optional JSON file, the
//! `RETRACE_RESULTS_DIR` environment variable, and the command line.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::BenchError;

pub const RESULTS_DIR_ENV: &str = "RETRACE_RESULTS_DIR";
pub const DEFAULT_RESULTS_DIR: &str = "results";
pub const DEFAULT_REPETITIONS: usize = 5;

/// One of the four reports the analyzer consumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportSlot {
    InternalBaseline,
    InternalTreatment,
    ExternalBaseline,
    ExternalTreatment,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub root: PathBuf,
    pub internal_baseline: String,
    pub internal_treatment: String,
    pub external_baseline: String,
    pub external_treatment: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_RESULTS_DIR),
            internal_baseline: "internal_baseline.txt".into(),
            internal_treatment: "internal_retrace.txt".into(),
            external_baseline: "external_baseline.txt".into(),
            external_treatment: "external_retrace.txt".into(),
        }
    }
}

impl AnalyzerConfig {
    pub fn with_root<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Reads a JSON config file. Fields absent from the file keep their
    /// defaults.
    pub fn load(path: &Path) -> Result<Self, BenchError> {
        let data = fs::read(path)
            .map_err(|e| BenchError::io(format!("config {}: {e}", path.display())))?;
        serde_json::from_slice(&data)
            .map_err(|e| BenchError::invalid_input(format!("config {}: {e}", path.display())))
    }

    pub fn apply_env(self) -> Self {
        self.apply_env_value(env::var(RESULTS_DIR_ENV).ok().as_deref())
    }

    /// Applies a `RETRACE_RESULTS_DIR` value; blank values are ignored.
    pub fn apply_env_value(self, value: Option<&str>) -> Self {
        match value {
            Some(dir) if !dir.trim().is_empty() => self.override_root(Some(PathBuf::from(dir))),
            _ => self,
        }
    }

    pub fn override_root(mut self, root: Option<PathBuf>) -> Self {
        if let Some(root) = root {
            self.root = root;
        }
        self
    }

    pub fn file_name(&self, slot: ReportSlot) -> &str {
        match slot {
            ReportSlot::InternalBaseline => &self.internal_baseline,
            ReportSlot::InternalTreatment => &self.internal_treatment,
            ReportSlot::ExternalBaseline => &self.external_baseline,
            ReportSlot::ExternalTreatment => &self.external_treatment,
        }
    }

    pub fn report_path(&self, slot: ReportSlot) -> PathBuf {
        self.root.join(self.file_name(slot))
    }
}

/// Knobs for the timed trial runner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunConfig {
    pub repetitions: usize,
    /// Multiplier applied to every suite's nominal iteration count.
    pub scale: f64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            repetitions: DEFAULT_REPETITIONS,
            scale: 1.0,
        }
    }
}

impl RunConfig {
    pub fn with_scale(scale: f64) -> Result<Self, BenchError> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(BenchError::invalid_input(format!(
                "scale must be a positive number, got {scale}"
            )));
        }
        Ok(Self {
            scale,
            ..Self::default()
        })
    }

    pub fn scaled(&self, iterations: u64) -> u64 {
        ((iterations as f64 * self.scale).round() as u64).max(1)
    }

    /// Untimed warm-up length: one percent of the measured loop.
    pub fn warmup_iterations(&self, iterations: u64) -> u64 {
        (iterations / 100).max(1)
    }
}
