//! Ordered collection of heterogeneous conditions gating one activity.

use gate_config::ConfigNode;
use gate_core::outcome::{Outcome, aggregate};
use gate_orbits::Telemetry;

use crate::condition::Condition;
use crate::registry::{ConditionRegistry, LoadError};

/// Conditions evaluated together each tick.
#[derive(Debug, Default)]
pub struct ConditionSet {
    conditions: Vec<Box<dyn Condition>>,
    outcomes: Vec<Outcome>,
}

impl ConditionSet {
    /// Name of the child nodes holding one condition each.
    pub const NODE_NAME: &'static str = "CONDITION";

    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `CONDITION` child of `node`, in order.
    pub fn load(node: &ConfigNode, registry: &ConditionRegistry) -> Result<Self, LoadError> {
        let conditions = registry.load_list(node.nodes_named(Self::NODE_NAME))?;
        Ok(Self {
            outcomes: Vec::with_capacity(conditions.len()),
            conditions,
        })
    }

    /// Append one `CONDITION` child per condition.
    pub fn save(&self, node: &mut ConfigNode) {
        for condition in &self.conditions {
            let child = node.add_node(ConfigNode::new(Self::NODE_NAME));
            condition.save(child);
        }
    }

    pub fn push(&mut self, condition: Box<dyn Condition>) {
        self.conditions.push(condition);
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Condition> {
        self.conditions.iter().map(|c| &**c as &dyn Condition)
    }

    pub fn get(&self, index: usize) -> Option<&dyn Condition> {
        self.conditions.get(index).map(|c| &**c as &dyn Condition)
    }

    /// Evaluate every condition and return the most severe outcome.
    ///
    /// No condition is skipped, so each one's diagnostic text stays current.
    /// An empty set is `Valid`.
    pub fn evaluate(&mut self, telemetry: &dyn Telemetry, elapsed_s: f64) -> Outcome {
        self.outcomes.clear();
        for condition in &mut self.conditions {
            self.outcomes.push(condition.evaluate(telemetry, elapsed_s));
        }
        aggregate(self.outcomes.iter().copied())
    }

    /// Per-condition outcomes from the latest `evaluate`, in condition order.
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }
}
