//! Telemetry adapter consumed by gate conditions.
//!
//! The host owns the physics; conditions only read already-derived orbital
//! elements through [`Telemetry`]. [`TelemetrySnapshot`] is an owned
//! implementation for tests, tools, and hosts that copy state once per tick.

use serde::{Deserialize, Serialize};

/// Read-only view of the vessel's current orbit and reference body.
///
/// Distances are metres, speeds metres per second, angles degrees.
pub trait Telemetry {
    /// Name of the body whose sphere of influence the vessel is in.
    fn body_name(&self) -> &str;
    /// Mean radius of the reference body.
    fn body_radius_m(&self) -> f64;
    fn semi_major_axis_m(&self) -> f64;
    fn eccentricity(&self) -> f64;
    fn inclination_deg(&self) -> f64;
    fn orbital_speed_m_s(&self) -> f64;

    /// Apoapsis altitude above the reference body's surface.
    fn apoapsis_altitude_m(&self) -> f64 {
        apoapsis_altitude(
            self.semi_major_axis_m(),
            self.eccentricity(),
            self.body_radius_m(),
        )
    }

    /// Periapsis altitude above the reference body's surface.
    fn periapsis_altitude_m(&self) -> f64 {
        periapsis_altitude(
            self.semi_major_axis_m(),
            self.eccentricity(),
            self.body_radius_m(),
        )
    }
}

/// Owned copy of the telemetry for one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub body_name: String,
    pub body_radius_m: f64,
    pub semi_major_axis_m: f64,
    pub eccentricity: f64,
    pub inclination_deg: f64,
    pub orbital_speed_m_s: f64,
}

impl TelemetrySnapshot {
    /// Copy the current state out of any telemetry source.
    pub fn capture<T: Telemetry + ?Sized>(source: &T) -> Self {
        Self {
            body_name: source.body_name().to_string(),
            body_radius_m: source.body_radius_m(),
            semi_major_axis_m: source.semi_major_axis_m(),
            eccentricity: source.eccentricity(),
            inclination_deg: source.inclination_deg(),
            orbital_speed_m_s: source.orbital_speed_m_s(),
        }
    }

    /// Snapshot whose apsides sit at the given altitudes above a body of radius `body_radius_m`.
    pub fn from_apsides(
        body_name: impl Into<String>,
        body_radius_m: f64,
        apoapsis_altitude_m: f64,
        periapsis_altitude_m: f64,
        inclination_deg: f64,
        orbital_speed_m_s: f64,
    ) -> Self {
        let r_ap = apoapsis_altitude_m + body_radius_m;
        let r_pe = periapsis_altitude_m + body_radius_m;
        let semi_major_axis_m = 0.5 * (r_ap + r_pe);
        let eccentricity = if semi_major_axis_m != 0.0 {
            (r_ap - r_pe) / (r_ap + r_pe)
        } else {
            0.0
        };
        Self {
            body_name: body_name.into(),
            body_radius_m,
            semi_major_axis_m,
            eccentricity,
            inclination_deg,
            orbital_speed_m_s,
        }
    }
}

impl Telemetry for TelemetrySnapshot {
    fn body_name(&self) -> &str {
        &self.body_name
    }

    fn body_radius_m(&self) -> f64 {
        self.body_radius_m
    }

    fn semi_major_axis_m(&self) -> f64 {
        self.semi_major_axis_m
    }

    fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    fn inclination_deg(&self) -> f64 {
        self.inclination_deg
    }

    fn orbital_speed_m_s(&self) -> f64 {
        self.orbital_speed_m_s
    }
}

/// Apoapsis altitude: `a(1 + e) - R`.
#[inline]
pub fn apoapsis_altitude(semi_major_axis_m: f64, eccentricity: f64, body_radius_m: f64) -> f64 {
    semi_major_axis_m * (1.0 + eccentricity) - body_radius_m
}

/// Periapsis altitude: `a(1 - e) - R`.
#[inline]
pub fn periapsis_altitude(semi_major_axis_m: f64, eccentricity: f64, body_radius_m: f64) -> f64 {
    semi_major_axis_m * (1.0 - eccentricity) - body_radius_m
}
