use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value as YamlValue};

use crate::fields::{ConfigValue, format_f64};
use crate::{ConfigError, ConfigNode};

/// Parse a YAML document into a node called `name`. An empty document yields an empty node.
pub fn from_yaml_str(name: &str, contents: &str) -> Result<ConfigNode, ConfigError> {
    let document: YamlValue = serde_yaml::from_str(contents)?;
    match document {
        YamlValue::Null => Ok(ConfigNode::new(name)),
        YamlValue::Mapping(mapping) => from_yaml_mapping(name, &mapping),
        _ => Err(ConfigError::NotAMapping),
    }
}

/// Parse a TOML document into a node called `name`.
pub fn from_toml_str(name: &str, contents: &str) -> Result<ConfigNode, ConfigError> {
    let table: toml::Table = toml::from_str(contents)?;
    Ok(from_toml_table(name, &table))
}

/// Load a single YAML or TOML file, chosen by extension. The node is named after the file stem.
pub fn load_node<P: AsRef<Path>>(path: P) -> Result<ConfigNode, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    if has_extension(path, &["toml"]) {
        from_toml_str(name, &contents)
    } else {
        from_yaml_str(name, &contents)
    }
}

/// Load every `.toml`/`.yaml`/`.yml` file in `dir`, in path order, as children called `child_name`.
pub fn load_node_dir<P: AsRef<Path>>(dir: P, child_name: &str) -> Result<ConfigNode, ConfigError> {
    let dir = dir.as_ref();
    let root_name = dir
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let mut root = ConfigNode::new(root_name);

    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && has_extension(path, &["toml", "yaml", "yml"]))
        .collect();
    entries.sort();

    for path in entries {
        let mut node = load_node(&path)?;
        node.name = child_name.to_string();
        root.add_node(node);
    }
    Ok(root)
}

/// Render a node as a YAML document.
pub fn to_yaml_string(node: &ConfigNode) -> Result<String, ConfigError> {
    Ok(serde_yaml::to_string(&to_yaml_value(node))?)
}

/// Write a node as YAML, creating parent directories as needed.
pub fn save_node<P: AsRef<Path>>(path: P, node: &ConfigNode) -> Result<(), ConfigError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, to_yaml_string(node)?)?;
    Ok(())
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|e| ext.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

fn from_yaml_mapping(name: &str, mapping: &Mapping) -> Result<ConfigNode, ConfigError> {
    let mut node = ConfigNode::new(name);
    for (key, value) in mapping {
        let key = yaml_scalar_text(key).ok_or_else(|| ConfigError::InvalidKey {
            parent: name.to_string(),
        })?;
        append_yaml(&mut node, &key, value)?;
    }
    Ok(node)
}

fn append_yaml(node: &mut ConfigNode, key: &str, value: &YamlValue) -> Result<(), ConfigError> {
    match value {
        YamlValue::Mapping(mapping) => {
            node.add_node(from_yaml_mapping(key, mapping)?);
        }
        YamlValue::Sequence(items) => {
            for item in items {
                append_yaml(node, key, item)?;
            }
        }
        YamlValue::Tagged(tagged) => append_yaml(node, key, &tagged.value)?,
        scalar => {
            let text = yaml_scalar_text(scalar).unwrap_or_default();
            node.add_value(key, text);
        }
    }
    Ok(())
}

fn yaml_scalar_text(value: &YamlValue) -> Option<String> {
    match value {
        YamlValue::Null => Some(String::new()),
        YamlValue::Bool(b) => Some(b.to_string()),
        // Floats go through `format_f64`: YAML spells infinities `.inf`,
        // which the field parsers do not accept.
        YamlValue::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => Some(format_f64(f)),
            _ => Some(n.to_string()),
        },
        YamlValue::String(s) => Some(s.clone()),
        _ => None,
    }
}

fn to_yaml_value(node: &ConfigNode) -> YamlValue {
    let mut mapping = Mapping::new();
    for (key, value) in &node.values {
        push_yaml(&mut mapping, key, yaml_scalar(value));
    }
    for child in &node.nodes {
        push_yaml(&mut mapping, &child.name, to_yaml_value(child));
    }
    YamlValue::Mapping(mapping)
}

/// Typed scalar for `text` when reading it back yields the same text, otherwise a string.
fn yaml_scalar(text: &str) -> YamlValue {
    if let Ok(flag) = text.parse::<bool>() {
        return YamlValue::Bool(flag);
    }
    if let Ok(int) = text.parse::<i64>() {
        if int.to_string() == text {
            return YamlValue::Number(int.into());
        }
    }
    match f64::parse_config(text) {
        Some(float) if format_f64(float) == text => YamlValue::Number(float.into()),
        _ => YamlValue::String(text.to_string()),
    }
}

// Repeated keys collapse into a sequence, which `append_yaml` expands again.
fn push_yaml(mapping: &mut Mapping, key: &str, value: YamlValue) {
    match mapping.get_mut(key) {
        Some(YamlValue::Sequence(items)) => items.push(value),
        Some(existing) => {
            let first = std::mem::take(existing);
            *existing = YamlValue::Sequence(vec![first, value]);
        }
        None => {
            mapping.insert(YamlValue::String(key.to_string()), value);
        }
    }
}

fn from_toml_table(name: &str, table: &toml::Table) -> ConfigNode {
    let mut node = ConfigNode::new(name);
    for (key, value) in table {
        append_toml(&mut node, key, value);
    }
    node
}

fn append_toml(node: &mut ConfigNode, key: &str, value: &toml::Value) {
    match value {
        toml::Value::Table(table) => {
            node.add_node(from_toml_table(key, table));
        }
        toml::Value::Array(items) => {
            for item in items {
                append_toml(node, key, item);
            }
        }
        toml::Value::String(s) => node.add_value(key, s.clone()),
        toml::Value::Integer(i) => node.add_value(key, i.to_string()),
        toml::Value::Float(f) => node.add_value(key, format_f64(*f)),
        toml::Value::Boolean(b) => node.add_value(key, b.to_string()),
        toml::Value::Datetime(dt) => node.add_value(key, dt.to_string()),
    }
}
