use std::{fs, path::Path};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::models::{HarnessState, TestResult};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport<'a> {
    pub base_url: &'a str,
    pub finished_at: DateTime<Utc>,
    pub tests_run: usize,
    pub tests_passed: usize,
    pub success_rate: f64,
    pub results: &'a [TestResult],
}

impl<'a> RunReport<'a> {
    pub fn new(base_url: &'a str, state: &'a HarnessState) -> Self {
        Self {
            base_url,
            finished_at: Utc::now(),
            tests_run: state.tests_run(),
            tests_passed: state.tests_passed(),
            success_rate: state.success_rate(),
            results: state.results(),
        }
    }
}

/// Writes the run as pretty JSON, creating missing parent directories.
pub fn write_report(path: &Path, report: &RunReport<'_>) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating report directory {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(report).context("serializing report")?;
    fs::write(path, json).with_context(|| format!("writing report to {}", path.display()))?;
    Ok(())
}
