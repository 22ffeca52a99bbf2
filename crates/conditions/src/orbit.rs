//! Condition on the vessel's reference body and orbital elements.

use gate_config::ConfigNode;
use gate_core::bounds::InclusiveRange;
use gate_core::constants::{
    DEFAULT_BODY, ECCENTRICITY_MAX, ECCENTRICITY_MIN, INCLINATION_MAX_DEG, INCLINATION_MIN_DEG,
    SPEED_MIN_M_S, UNBOUNDED_HIGH, UNBOUNDED_LOW,
};
use gate_core::outcome::{Outcome, resolve_outcome};
use gate_orbits::Telemetry;

use crate::condition::{CommonFields, Condition};
use crate::diagnostic::DiagnosticText;

/// Registry tag of [`OrbitCondition`].
pub const ORBIT_TAG: &str = "Orbit";

/// Configuration keys specific to [`OrbitCondition`].
pub mod keys {
    pub const MAIN_BODY: &str = "mainBody";
    pub const ECCENTRICITY_MIN: &str = "eccentricityMin";
    pub const ECCENTRICITY_MAX: &str = "eccentricityMax";
    pub const APOAPSIS_MIN: &str = "apoapsisMin";
    pub const APOAPSIS_MAX: &str = "apoapsisMax";
    pub const PERIAPSIS_MIN: &str = "periapsisMin";
    pub const PERIAPSIS_MAX: &str = "periapsisMax";
    pub const INCLINATION_MIN: &str = "inclinationMin";
    pub const INCLINATION_MAX: &str = "inclinationMax";
    pub const VELOCITY_MIN: &str = "velocityMin";
    pub const VELOCITY_MAX: &str = "velocityMax";
}

/// Satisfied when the vessel orbits `main_body` with every element inside its range.
///
/// All six sub-checks run on every evaluation so the diagnostic text is
/// always complete. Ranges are inclusive; an inverted range is kept as
/// configured and makes its sub-check fail.
#[derive(Debug, Clone)]
pub struct OrbitCondition {
    pub common: CommonFields,
    /// Reference body name, matched case-insensitively.
    pub main_body: String,
    pub eccentricity: InclusiveRange,
    /// Apoapsis altitude above the surface (m).
    pub apoapsis_m: InclusiveRange,
    /// Periapsis altitude above the surface (m).
    pub periapsis_m: InclusiveRange,
    pub inclination_deg: InclusiveRange,
    pub speed_m_s: InclusiveRange,
    diagnostic: DiagnosticText,
}

impl Default for OrbitCondition {
    fn default() -> Self {
        Self {
            common: CommonFields::default(),
            main_body: DEFAULT_BODY.to_string(),
            eccentricity: InclusiveRange::new(ECCENTRICITY_MIN, ECCENTRICITY_MAX),
            apoapsis_m: InclusiveRange::unbounded(),
            periapsis_m: InclusiveRange::unbounded(),
            inclination_deg: InclusiveRange::new(INCLINATION_MIN_DEG, INCLINATION_MAX_DEG),
            speed_m_s: InclusiveRange::new(SPEED_MIN_M_S, UNBOUNDED_HIGH),
            diagnostic: DiagnosticText::default(),
        }
    }
}

impl OrbitCondition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Boxed default instance, the registry constructor for [`ORBIT_TAG`].
    pub fn boxed() -> Box<dyn Condition> {
        Box::new(Self::default())
    }
}

impl Condition for OrbitCondition {
    fn type_tag(&self) -> &'static str {
        ORBIT_TAG
    }

    fn evaluate(&mut self, telemetry: &dyn Telemetry, _elapsed_s: f64) -> Outcome {
        let body = telemetry.body_name();
        let eccentricity = telemetry.eccentricity();
        let inclination = telemetry.inclination_deg();
        let apoapsis = telemetry.apoapsis_altitude_m();
        let periapsis = telemetry.periapsis_altitude_m();
        let speed = telemetry.orbital_speed_m_s();

        let text = &mut self.diagnostic;
        text.begin("Orbit Condition", self.common.restriction, self.common.exclusion);
        text.equals("Craft sphere of influence", &self.main_body, body);
        text.range("Eccentricity", self.eccentricity, eccentricity);
        text.range("Inclination", self.inclination_deg, inclination);
        text.range("Apoapsis", self.apoapsis_m, apoapsis);
        text.range("Periapsis", self.periapsis_m, periapsis);
        text.range("Orbital velocity", self.speed_m_s, speed);

        let checks = [
            names_match(body, &self.main_body),
            self.eccentricity.contains(eccentricity),
            self.inclination_deg.contains(inclination),
            self.apoapsis_m.contains(apoapsis),
            self.periapsis_m.contains(periapsis),
            self.speed_m_s.contains(speed),
        ];
        let satisfied = checks.iter().all(|passed| *passed);

        resolve_outcome(satisfied, self.common.restriction, self.common.exclusion)
    }

    fn load(&mut self, node: &ConfigNode) {
        self.common.load(node);
        node.load_field(keys::MAIN_BODY, &mut self.main_body, DEFAULT_BODY.to_string());
        load_range(
            node,
            (keys::ECCENTRICITY_MIN, keys::ECCENTRICITY_MAX),
            &mut self.eccentricity,
            InclusiveRange::new(ECCENTRICITY_MIN, ECCENTRICITY_MAX),
        );
        load_range(
            node,
            (keys::APOAPSIS_MIN, keys::APOAPSIS_MAX),
            &mut self.apoapsis_m,
            InclusiveRange::new(UNBOUNDED_LOW, UNBOUNDED_HIGH),
        );
        load_range(
            node,
            (keys::PERIAPSIS_MIN, keys::PERIAPSIS_MAX),
            &mut self.periapsis_m,
            InclusiveRange::new(UNBOUNDED_LOW, UNBOUNDED_HIGH),
        );
        load_range(
            node,
            (keys::INCLINATION_MIN, keys::INCLINATION_MAX),
            &mut self.inclination_deg,
            InclusiveRange::new(INCLINATION_MIN_DEG, INCLINATION_MAX_DEG),
        );
        load_range(
            node,
            (keys::VELOCITY_MIN, keys::VELOCITY_MAX),
            &mut self.speed_m_s,
            InclusiveRange::new(SPEED_MIN_M_S, UNBOUNDED_HIGH),
        );
    }

    fn save(&self, node: &mut ConfigNode) {
        self.common.save(ORBIT_TAG, node);
        node.save_field(keys::MAIN_BODY, &self.main_body);
        save_range(node, (keys::ECCENTRICITY_MIN, keys::ECCENTRICITY_MAX), self.eccentricity);
        save_range(node, (keys::APOAPSIS_MIN, keys::APOAPSIS_MAX), self.apoapsis_m);
        save_range(node, (keys::PERIAPSIS_MIN, keys::PERIAPSIS_MAX), self.periapsis_m);
        save_range(node, (keys::INCLINATION_MIN, keys::INCLINATION_MAX), self.inclination_deg);
        save_range(node, (keys::VELOCITY_MIN, keys::VELOCITY_MAX), self.speed_m_s);
    }

    fn common(&self) -> &CommonFields {
        &self.common
    }

    fn diagnostic(&self) -> &str {
        self.diagnostic.as_str()
    }
}

/// Case-insensitive name comparison without allocating.
fn names_match(live: &str, configured: &str) -> bool {
    live.chars()
        .flat_map(char::to_lowercase)
        .eq(configured.chars().flat_map(char::to_lowercase))
}

fn load_range(
    node: &ConfigNode,
    (min_key, max_key): (&str, &str),
    range: &mut InclusiveRange,
    default: InclusiveRange,
) {
    node.load_field(min_key, &mut range.min, default.min);
    node.load_field(max_key, &mut range.max, default.max);
}

fn save_range(node: &mut ConfigNode, (min_key, max_key): (&str, &str), range: InclusiveRange) {
    node.save_field(min_key, &range.min);
    node.save_field(max_key, &range.max);
}
