//! Configuration tree and loaders for experiment gate conditions.
//!
//! A [`ConfigNode`] is a named node holding ordered `key = value` string
//! pairs (duplicate keys allowed) and ordered child nodes. Every scalar is
//! kept as text; typed access goes through [`ConfigValue`] so that a value
//! which fails to parse falls back to its default instead of aborting the load.

mod fields;
mod files;

pub use fields::{ConfigValue, format_f64};
pub use files::{
    from_toml_str, from_yaml_str, load_node, load_node_dir, save_node, to_yaml_string,
};

use thiserror::Error;

/// Errors that can occur while reading or writing configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("configuration document must be a mapping at the top level")]
    NotAMapping,
    #[error("configuration keys must be scalars (found under `{parent}`)")]
    InvalidKey { parent: String },
}

/// Node of the configuration tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigNode {
    name: String,
    values: Vec<(String, String)>,
    nodes: Vec<ConfigNode>,
}

impl ConfigNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
            nodes: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_value(&self, key: &str) -> bool {
        self.values.iter().any(|(k, _)| k == key)
    }

    /// First value stored under `key`.
    pub fn get_value(&self, key: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value stored under `key`, in insertion order.
    pub fn get_values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.values
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All `(key, value)` pairs in insertion order.
    pub fn values(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Append a value; existing values under the same key are kept.
    pub fn add_value(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.push((key.into(), value.into()));
    }

    /// Replace the first value under `key`, or append it when absent.
    pub fn set_value(&mut self, key: &str, value: impl Into<String>) {
        match self.values.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value.into(),
            None => self.values.push((key.to_string(), value.into())),
        }
    }

    pub fn nodes(&self) -> &[ConfigNode] {
        &self.nodes
    }

    /// Child nodes called `name`, in insertion order.
    pub fn nodes_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ConfigNode> + 'a {
        self.nodes.iter().filter(move |n| n.name == name)
    }

    pub fn add_node(&mut self, node: ConfigNode) -> &mut ConfigNode {
        self.nodes.push(node);
        let last = self.nodes.len() - 1;
        &mut self.nodes[last]
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.nodes.is_empty()
    }

    /// Overwrite `field` from the value under `key`.
    ///
    /// An absent key leaves `field` untouched. A present value that does not
    /// parse resets `field` to `default` and logs a warning; it never aborts
    /// loading of sibling fields.
    pub fn load_field<T: ConfigValue>(&self, key: &str, field: &mut T, default: T) {
        let Some(raw) = self.get_value(key) else {
            return;
        };
        match T::parse_config(raw) {
            Some(value) => *field = value,
            None => {
                tracing::warn!(
                    node = %self.name,
                    key,
                    raw,
                    "unparsable configuration value, falling back to default"
                );
                *field = default;
            }
        }
    }

    /// Append `value` under `key` in the form [`ConfigNode::load_field`] reads back.
    pub fn save_field<T: ConfigValue>(&mut self, key: &str, value: &T) {
        self.add_value(key, value.format_config());
    }
}
