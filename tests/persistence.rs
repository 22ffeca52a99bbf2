use experiment_gate::bounds::InclusiveRange;
use experiment_gate::conditions::{
    CommonFields, Condition, ConditionRegistry, ConditionSet, OrbitCondition,
};
use experiment_gate::config::{
    ConfigNode, format_f64, from_toml_str, from_yaml_str, to_yaml_string,
};
use experiment_gate::outcome::ExclusionMode;

fn fully_specified() -> OrbitCondition {
    let mut condition = OrbitCondition::new();
    condition.common = CommonFields {
        restriction: true,
        exclusion: ExclusionMode::Reset,
        data_rate_modifier: 0.75,
        maximum_data_modifier: 1.5,
        maximum_data_bonus: 12.0,
    };
    condition.main_body = "Mun".to_string();
    condition.eccentricity = InclusiveRange::new(0.01, 0.3);
    condition.apoapsis_m = InclusiveRange::new(10_000.0, 2.5e5);
    condition.periapsis_m = InclusiveRange::new(-1.0e3, 1.0e5);
    condition.inclination_deg = InclusiveRange::new(85.0, 95.0);
    condition.speed_m_s = InclusiveRange::new(100.0, 1_000.5);
    condition
}

fn saved(condition: &dyn Condition) -> ConfigNode {
    let mut node = ConfigNode::new(ConditionSet::NODE_NAME);
    condition.save(&mut node);
    node
}

#[test]
fn save_load_save_is_stable() {
    for original in [fully_specified(), OrbitCondition::new()] {
        let first = saved(&original);

        let mut reloaded = OrbitCondition::new();
        reloaded.load(&first);
        let second = saved(&reloaded);

        assert_eq!(first, second);
    }
}

#[test]
fn save_writes_the_full_key_set() {
    let node = saved(&fully_specified());
    let keys: Vec<&str> = node.values().map(|(k, _)| k).collect();
    assert_eq!(
        keys,
        [
            "conditionType",
            "restriction",
            "exclusion",
            "dataRateModifier",
            "maximumDataModifier",
            "maximumDataBonus",
            "mainBody",
            "eccentricityMin",
            "eccentricityMax",
            "apoapsisMin",
            "apoapsisMax",
            "periapsisMin",
            "periapsisMax",
            "inclinationMin",
            "inclinationMax",
            "velocityMin",
            "velocityMax",
        ]
    );
    assert_eq!(node.get_value("conditionType"), Some("Orbit"));
    assert_eq!(node.get_value("exclusion"), Some("reset"));
    assert_eq!(node.get_value("maximumDataBonus"), Some("12"));
}

#[test]
fn unbounded_defaults_survive_round_trip() {
    let node = saved(&OrbitCondition::new());
    assert_eq!(node.get_value("apoapsisMax"), Some(format_f64(f64::MAX).as_str()));
    assert_eq!(node.get_value("apoapsisMin"), Some("-1.7976931348623157e308"));

    let mut reloaded = OrbitCondition::new();
    reloaded.apoapsis_m = InclusiveRange::new(0.0, 0.0);
    reloaded.load(&node);
    assert_eq!(reloaded.apoapsis_m, InclusiveRange::unbounded());
}

#[test]
fn absent_keys_keep_defaults() {
    let mut node = ConfigNode::new(ConditionSet::NODE_NAME);
    node.add_value("conditionType", "Orbit");
    node.add_value("eccentricityMax", "0.25");

    let mut condition = OrbitCondition::new();
    condition.load(&node);

    assert_eq!(condition.eccentricity, InclusiveRange::new(0.0, 0.25));
    assert_eq!(condition.main_body, "kerbin");
    assert_eq!(condition.inclination_deg, InclusiveRange::new(0.0, 180.0));
    assert_eq!(condition.speed_m_s, InclusiveRange::new(0.0, f64::MAX));
    assert_eq!(condition.common, CommonFields::default());
}

#[test]
fn malformed_values_fall_back_without_blocking_siblings() {
    let mut node = ConfigNode::new(ConditionSet::NODE_NAME);
    node.add_value("restriction", "maybe");
    node.add_value("exclusion", "explode");
    node.add_value("dataRateModifier", "fast");
    node.add_value("maximumDataBonus", "");
    node.add_value("eccentricityMin", "0.1");
    node.add_value("eccentricityMax", "abc");
    node.add_value("apoapsisMin", "1e4");
    node.add_value("inclinationMax", " 45 ");
    node.add_value("mainBody", "Minmus");

    let mut condition = fully_specified();
    condition.load(&node);

    assert!(!condition.common.restriction);
    assert_eq!(condition.common.exclusion, ExclusionMode::None);
    assert_eq!(condition.common.data_rate_modifier, 1.0);
    assert_eq!(condition.common.maximum_data_bonus, 0.0);
    // not present in the node: previous value kept
    assert_eq!(condition.common.maximum_data_modifier, 1.5);

    assert_eq!(condition.eccentricity, InclusiveRange::new(0.1, 1.0));
    assert_eq!(condition.apoapsis_m.min, 10_000.0);
    assert_eq!(condition.inclination_deg.max, 45.0);
    assert_eq!(condition.main_body, "Minmus");
}

#[test]
fn booleans_and_modes_parse_case_insensitively() {
    let mut node = ConfigNode::new(ConditionSet::NODE_NAME);
    node.add_value("restriction", "True");
    node.add_value("exclusion", "FAIL");

    let mut condition = OrbitCondition::new();
    condition.load(&node);
    assert!(condition.is_restriction());
    assert_eq!(condition.exclusion(), ExclusionMode::Fail);
}

#[test]
fn inverted_range_is_loaded_as_configured() {
    let mut node = ConfigNode::new(ConditionSet::NODE_NAME);
    node.add_value("periapsisMin", "500");
    node.add_value("periapsisMax", "100");

    let mut condition = OrbitCondition::new();
    condition.load(&node);
    assert_eq!(condition.periapsis_m, InclusiveRange::new(500.0, 100.0));
    assert!(condition.periapsis_m.is_inverted());
}

#[test]
fn yaml_and_toml_documents_load_identically() {
    let yaml = r#"
name: polar
CONDITION:
  - conditionType: Orbit
    restriction: false
    mainBody: Mun
    inclinationMin: 80
    inclinationMax: 100.0
    apoapsisMax: .inf
"#;
    let toml = r#"
name = "polar"

[[CONDITION]]
conditionType = "Orbit"
restriction = false
mainBody = "Mun"
inclinationMin = 80
inclinationMax = 100.0
apoapsisMax = inf
"#;
    let registry = ConditionRegistry::with_builtin();
    let from_yaml =
        ConditionSet::load(&from_yaml_str("polar", yaml).unwrap(), &registry).unwrap();
    let from_toml =
        ConditionSet::load(&from_toml_str("polar", toml).unwrap(), &registry).unwrap();

    let mut yaml_saved = ConfigNode::new("polar");
    from_yaml.save(&mut yaml_saved);
    let mut toml_saved = ConfigNode::new("polar");
    from_toml.save(&mut toml_saved);
    assert_eq!(yaml_saved, toml_saved);

    let condition = yaml_saved.nodes_named(ConditionSet::NODE_NAME).next().unwrap();
    assert_eq!(condition.get_value("inclinationMin"), Some("80"));
    assert_eq!(condition.get_value("apoapsisMax"), Some("inf"));
}

#[test]
fn yaml_text_round_trip_preserves_the_tree() {
    let mut root = ConfigNode::new("survey");
    root.add_value("name", "survey");
    let mut set = ConditionSet::new();
    set.push(Box::new(fully_specified()));
    set.push(Box::new(OrbitCondition::new()));
    set.save(&mut root);

    let text = to_yaml_string(&root).unwrap();
    let reparsed = from_yaml_str("survey", &text).unwrap();
    assert_eq!(reparsed, root);
}

#[test]
fn single_condition_yaml_round_trip() {
    let mut root = ConfigNode::new("solo");
    let child = root.add_node(ConfigNode::new(ConditionSet::NODE_NAME));
    OrbitCondition::new().save(child);

    let reparsed = from_yaml_str("solo", &to_yaml_string(&root).unwrap()).unwrap();
    assert_eq!(reparsed, root);
    assert_eq!(reparsed.nodes_named(ConditionSet::NODE_NAME).count(), 1);
}

#[test]
fn repeated_keys_keep_order() {
    let node = from_yaml_str("tags", "tag: [alpha, beta]\nother: 3\n").unwrap();
    let tags: Vec<&str> = node.get_values("tag").collect();
    assert_eq!(tags, ["alpha", "beta"]);
    assert_eq!(node.get_value("tag"), Some("alpha"));
    assert_eq!(node.get_value("other"), Some("3"));

    let reparsed = from_yaml_str("tags", &to_yaml_string(&node).unwrap()).unwrap();
    assert_eq!(reparsed, node);
}

#[test]
fn non_mapping_documents_are_rejected() {
    assert!(from_yaml_str("bad", "- 1\n- 2\n").is_err());
    assert!(from_yaml_str("scalar", "just text").is_err());
}

#[test]
fn saved_yaml_writes_typed_scalars() {
    let mut root = ConfigNode::new("solo");
    let child = root.add_node(ConfigNode::new(ConditionSet::NODE_NAME));
    fully_specified().save(child);

    let text = to_yaml_string(&root).unwrap();
    assert!(text.contains("restriction: true"));
    assert!(text.contains("dataRateModifier: 0.75"));
    assert!(text.contains("maximumDataBonus: 12"));

    let document: serde_yaml::Value = serde_yaml::from_str(&text).unwrap();
    let condition = &document[ConditionSet::NODE_NAME];
    assert_eq!(condition["restriction"], serde_yaml::Value::Bool(true));
    assert_eq!(condition["maximumDataBonus"].as_i64(), Some(12));
    assert_eq!(condition["apoapsisMax"].as_f64(), Some(2.5e5));
    assert_eq!(condition["periapsisMin"].as_i64(), Some(-1000));
    assert_eq!(condition["velocityMax"].as_f64(), Some(1_000.5));
    assert_eq!(condition["mainBody"].as_str(), Some("Mun"));
    assert_eq!(condition["exclusion"].as_str(), Some("reset"));

    let mut defaults = ConfigNode::new("defaults");
    OrbitCondition::new().save(&mut defaults);
    let document: serde_yaml::Value =
        serde_yaml::from_str(&to_yaml_string(&defaults).unwrap()).unwrap();
    assert_eq!(document["restriction"], serde_yaml::Value::Bool(false));
    assert_eq!(document["velocityMax"].as_f64(), Some(f64::MAX));
    assert_eq!(document["apoapsisMin"].as_f64(), Some(f64::MIN));
}

#[test]
fn numeric_looking_text_stays_text() {
    let mut node = ConfigNode::new("mixed");
    node.add_value("padded", " 45 ");
    node.add_value("trailing_zero", "1.50");
    node.add_value("capitalized", "True");

    let reparsed = from_yaml_str("mixed", &to_yaml_string(&node).unwrap()).unwrap();
    assert_eq!(reparsed, node);
}

#[test]
fn nan_falls_back_to_default() {
    let mut node = ConfigNode::new(ConditionSet::NODE_NAME);
    node.add_value("eccentricityMin", "nan");
    node.add_value("dataRateModifier", "NaN");

    let mut condition = fully_specified();
    condition.load(&node);
    assert_eq!(condition.eccentricity.min, 0.0);
    assert_eq!(condition.common.data_rate_modifier, 1.0);
}
