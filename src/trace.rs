//! Telemetry files and tick-by-tick replay of a scenario.

use std::fs::File;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use gate_export::trace::TraceRecord;
use gate_orbits::{Telemetry, TelemetrySnapshot};

use crate::scenario::Scenario;

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("failed to read telemetry: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse telemetry YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// One tick of recorded telemetry.
#[derive(Debug, Clone, Deserialize)]
pub struct TraceSample {
    /// Time since the previous sample.
    #[serde(default)]
    pub elapsed_s: f64,
    pub snapshot: TelemetrySnapshot,
}

pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<TelemetrySnapshot, TraceError> {
    let reader = File::open(path)?;
    Ok(serde_yaml::from_reader(reader)?)
}

pub fn load_trace<P: AsRef<Path>>(path: P) -> Result<Vec<TraceSample>, TraceError> {
    let reader = File::open(path)?;
    Ok(serde_yaml::from_reader(reader)?)
}

/// Evaluate the scenario once per sample, in order.
pub fn replay(scenario: &mut Scenario, samples: &[TraceSample]) -> Vec<TraceRecord> {
    let mut time_s = 0.0;
    samples
        .iter()
        .enumerate()
        .map(|(tick, sample)| {
            time_s += sample.elapsed_s;
            let snapshot = &sample.snapshot;
            let outcome = scenario.evaluate(snapshot, sample.elapsed_s);
            TraceRecord {
                tick,
                time_s,
                body: snapshot.body_name.clone(),
                apoapsis_m: snapshot.apoapsis_altitude_m(),
                periapsis_m: snapshot.periapsis_altitude_m(),
                eccentricity: snapshot.eccentricity,
                inclination_deg: snapshot.inclination_deg,
                speed_m_s: snapshot.orbital_speed_m_s,
                outcome,
                condition_outcomes: TraceRecord::join_outcomes(scenario.conditions.outcomes()),
            }
        })
        .collect()
}
