//! Export helpers for evaluation reports (JSON) and per-tick traces (CSV).

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

/// Errors raised while writing export artifacts.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to encode CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod report {
    use std::io::Write;
    use std::path::Path;

    use gate_core::outcome::{ExclusionMode, Outcome};
    use serde::Serialize;
    use serde_json::to_writer_pretty;

    use super::{ExportError, writer_for_path};

    /// One condition's state after an evaluation.
    #[derive(Debug, Clone, Serialize)]
    pub struct ConditionReport {
        pub index: usize,
        pub name: String,
        pub restriction: bool,
        pub exclusion: ExclusionMode,
        pub outcome: Outcome,
        pub data_rate_modifier: f64,
        pub maximum_data_modifier: f64,
        pub maximum_data_bonus: f64,
        pub diagnostic: String,
    }

    /// Snapshot of a whole condition set after one evaluation.
    #[derive(Debug, Clone, Serialize)]
    pub struct EvaluationReport {
        pub scenario: String,
        pub generated_at: String,
        pub elapsed_s: f64,
        pub outcome: Outcome,
        pub conditions: Vec<ConditionReport>,
    }

    impl EvaluationReport {
        /// Report stamped with the current UTC time.
        pub fn new(
            scenario: impl Into<String>,
            elapsed_s: f64,
            outcome: Outcome,
            conditions: Vec<ConditionReport>,
        ) -> Self {
            Self {
                scenario: scenario.into(),
                generated_at: chrono::Utc::now().to_rfc3339(),
                elapsed_s,
                outcome,
                conditions,
            }
        }
    }

    /// Write the report as pretty-printed JSON (`-` for stdout).
    pub fn write_report(path: &Path, report: &EvaluationReport) -> Result<(), ExportError> {
        let mut writer = writer_for_path(path)?;
        to_writer_pretty(&mut writer, report)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

pub mod trace {
    use std::path::Path;

    use gate_core::outcome::Outcome;
    use serde::Serialize;

    use super::{ExportError, writer_for_path};

    /// CSV row emitted for one evaluated tick.
    #[derive(Debug, Clone, Serialize)]
    pub struct TraceRecord {
        pub tick: usize,
        pub time_s: f64,
        pub body: String,
        pub apoapsis_m: f64,
        pub periapsis_m: f64,
        pub eccentricity: f64,
        pub inclination_deg: f64,
        pub speed_m_s: f64,
        pub outcome: Outcome,
        /// Per-condition outcomes joined with `;`, in condition order.
        pub condition_outcomes: String,
    }

    impl TraceRecord {
        pub fn join_outcomes(outcomes: &[Outcome]) -> String {
            outcomes
                .iter()
                .map(Outcome::as_str)
                .collect::<Vec<_>>()
                .join(";")
        }
    }

    /// Write trace rows with a header line (`-` for stdout).
    pub fn write_trace(path: &Path, records: &[TraceRecord]) -> Result<(), ExportError> {
        let writer = writer_for_path(path)?;
        let mut csv_writer = csv::Writer::from_writer(writer);
        for record in records {
            csv_writer.serialize(record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}
