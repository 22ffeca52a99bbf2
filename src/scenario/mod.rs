use std::path::Path;

use thiserror::Error;

use gate_conditions::{ConditionRegistry, ConditionSet, LoadError};
use gate_config::{ConfigError, ConfigNode, load_node, load_node_dir, save_node};
use gate_core::outcome::Outcome;
use gate_export::report::{ConditionReport, EvaluationReport};
use gate_orbits::Telemetry;

/// Key holding the scenario's display name.
pub const NAME_KEY: &str = "name";

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to load conditions: {0}")]
    Load(#[from] LoadError),
}

/// A named experiment together with the conditions gating it.
///
/// Owned by the host for the lifetime of the activity and passed explicitly
/// to whatever needs it.
#[derive(Debug)]
pub struct Scenario {
    pub name: String,
    pub conditions: ConditionSet,
}

impl Scenario {
    pub fn new(name: impl Into<String>, conditions: ConditionSet) -> Self {
        Self {
            name: name.into(),
            conditions,
        }
    }

    /// Build from a root node: `name` (defaults to the node's own name) plus `CONDITION` children.
    pub fn from_node(node: &ConfigNode, registry: &ConditionRegistry) -> Result<Self, LoadError> {
        let name = node.get_value(NAME_KEY).unwrap_or(node.name()).to_string();
        let conditions = ConditionSet::load(node, registry)?;
        tracing::debug!(scenario = %name, count = conditions.len(), "loaded scenario");
        Ok(Self { name, conditions })
    }

    pub fn to_node(&self) -> ConfigNode {
        let mut node = ConfigNode::new(self.name.clone());
        node.add_value(NAME_KEY, self.name.clone());
        self.conditions.save(&mut node);
        node
    }

    pub fn evaluate(&mut self, telemetry: &dyn Telemetry, elapsed_s: f64) -> Outcome {
        self.conditions.evaluate(telemetry, elapsed_s)
    }

    /// Describe the latest evaluation; `outcome` is the aggregate it returned.
    pub fn report(&self, elapsed_s: f64, outcome: Outcome) -> EvaluationReport {
        let conditions = self
            .conditions
            .iter()
            .zip(self.conditions.outcomes())
            .enumerate()
            .map(|(index, (condition, outcome))| ConditionReport {
                index,
                name: condition.name().to_string(),
                restriction: condition.is_restriction(),
                exclusion: condition.exclusion(),
                outcome: *outcome,
                data_rate_modifier: condition.data_rate_modifier(),
                maximum_data_modifier: condition.maximum_data_modifier(),
                maximum_data_bonus: condition.maximum_data_bonus(),
                diagnostic: condition.diagnostic().to_string(),
            })
            .collect();
        EvaluationReport::new(self.name.clone(), elapsed_s, outcome, conditions)
    }
}

/// Load a scenario from a YAML/TOML file, or from a directory holding one condition per file.
pub fn load_scenario<P: AsRef<Path>>(
    path: P,
    registry: &ConditionRegistry,
) -> Result<Scenario, ScenarioError> {
    let path = path.as_ref();
    let node = if path.is_dir() {
        load_node_dir(path, ConditionSet::NODE_NAME)?
    } else {
        load_node(path)?
    };
    Ok(Scenario::from_node(&node, registry)?)
}

/// Save a scenario as YAML with every condition key written out.
pub fn save_scenario<P: AsRef<Path>>(path: P, scenario: &Scenario) -> Result<(), ScenarioError> {
    save_node(path, &scenario.to_node())?;
    Ok(())
}
