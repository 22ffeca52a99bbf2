//! Tag-keyed factory for condition variants.

use std::collections::BTreeMap;

use gate_config::ConfigNode;
use thiserror::Error;

use crate::condition::{Condition, keys};
use crate::orbit::{ORBIT_TAG, OrbitCondition};

/// Zero-argument constructor producing a default instance of one variant.
pub type Constructor = fn() -> Box<dyn Condition>;

/// Errors raised while registering or resolving condition types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("condition type `{0}` is already registered")]
    DuplicateTag(String),
    #[error("unknown condition type `{0}`")]
    UnknownType(String),
}

/// Errors raised while loading an ordered list of conditions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("condition #{index} has unknown type `{tag}`")]
    UnknownType { tag: String, index: usize },
    #[error("condition #{index} is missing `conditionType`")]
    MissingType { index: usize },
}

/// Maps condition type tags to constructors. Lookup ignores ASCII case.
#[derive(Debug, Clone)]
pub struct ConditionRegistry {
    // keyed by lowercased tag; holds the tag as registered
    constructors: BTreeMap<String, (String, Constructor)>,
}

impl Default for ConditionRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

impl ConditionRegistry {
    /// Registry with no variants.
    pub fn empty() -> Self {
        Self {
            constructors: BTreeMap::new(),
        }
    }

    /// Registry with every variant this crate ships.
    pub fn with_builtin() -> Self {
        let orbit: Constructor = OrbitCondition::boxed;
        let mut constructors = BTreeMap::new();
        constructors.insert(ORBIT_TAG.to_ascii_lowercase(), (ORBIT_TAG.to_string(), orbit));
        Self { constructors }
    }

    pub fn register(&mut self, tag: &str, constructor: Constructor) -> Result<(), RegistryError> {
        let tag = tag.trim();
        let key = tag.to_ascii_lowercase();
        if self.constructors.contains_key(&key) {
            return Err(RegistryError::DuplicateTag(tag.to_string()));
        }
        self.constructors.insert(key, (tag.to_string(), constructor));
        Ok(())
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.constructors.contains_key(&tag.trim().to_ascii_lowercase())
    }

    /// Registered tags, sorted case-insensitively.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.constructors.values().map(|(tag, _)| tag.as_str())
    }

    /// Default instance of the variant registered under `tag`.
    pub fn create(&self, tag: &str) -> Result<Box<dyn Condition>, RegistryError> {
        self.constructors
            .get(&tag.trim().to_ascii_lowercase())
            .map(|(_, constructor)| constructor())
            .ok_or_else(|| RegistryError::UnknownType(tag.to_string()))
    }

    /// Instantiate and load one condition per node, preserving order.
    ///
    /// Each node's `conditionType` selects the variant, which then loads the
    /// rest of the node. Any unresolvable entry fails the whole list.
    pub fn load_list<'a, I>(&self, nodes: I) -> Result<Vec<Box<dyn Condition>>, LoadError>
    where
        I: IntoIterator<Item = &'a ConfigNode>,
    {
        let mut conditions = Vec::new();
        for (index, node) in nodes.into_iter().enumerate() {
            let tag = node
                .get_value(keys::CONDITION_TYPE)
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .ok_or(LoadError::MissingType { index })?;
            let mut condition = self.create(tag).map_err(|_| LoadError::UnknownType {
                tag: tag.to_string(),
                index,
            })?;
            condition.load(node);
            tracing::debug!(index, tag = condition.type_tag(), "loaded condition");
            conditions.push(condition);
        }
        Ok(conditions)
    }
}
