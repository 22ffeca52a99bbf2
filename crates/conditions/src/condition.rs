//! The contract every condition variant implements.

use std::fmt;

use gate_config::ConfigNode;
use gate_core::constants::{DATA_RATE_MODIFIER, MAXIMUM_DATA_BONUS, MAXIMUM_DATA_MODIFIER};
use gate_core::outcome::{ExclusionMode, Outcome};
use gate_orbits::Telemetry;

/// Configuration keys shared by every variant.
pub mod keys {
    pub const CONDITION_TYPE: &str = "conditionType";
    pub const RESTRICTION: &str = "restriction";
    pub const EXCLUSION: &str = "exclusion";
    pub const DATA_RATE_MODIFIER: &str = "dataRateModifier";
    pub const MAXIMUM_DATA_MODIFIER: &str = "maximumDataModifier";
    pub const MAXIMUM_DATA_BONUS: &str = "maximumDataBonus";
}

/// A configurable rule gating a data-collection activity.
///
/// `evaluate` runs on the host's per-tick path: it must not panic for any
/// telemetry and only refreshes the diagnostic text. `load`/`save` run off
/// the hot path and share one key set, so saving then loading reproduces
/// every configurable field.
pub trait Condition: fmt::Debug + Send {
    /// Tag persisted under `conditionType` and used for registry lookup.
    fn type_tag(&self) -> &'static str;

    /// Evaluate against the current telemetry. `elapsed_s` is the time since
    /// the previous tick, for variants that track dwell time.
    fn evaluate(&mut self, telemetry: &dyn Telemetry, elapsed_s: f64) -> Outcome;

    /// Populate fields from `node`; absent keys keep their value, unparsable ones reset to default.
    fn load(&mut self, node: &ConfigNode);

    /// Write every field `load` reads, under the same keys.
    fn save(&self, node: &mut ConfigNode);

    /// Attributes common to all variants.
    fn common(&self) -> &CommonFields;

    /// Explanation produced by the latest `evaluate`; empty before the first one.
    fn diagnostic(&self) -> &str;

    fn name(&self) -> &str {
        self.type_tag()
    }

    fn is_restriction(&self) -> bool {
        self.common().restriction
    }

    fn exclusion(&self) -> ExclusionMode {
        self.common().exclusion
    }

    fn data_rate_modifier(&self) -> f64 {
        self.common().data_rate_modifier
    }

    fn maximum_data_modifier(&self) -> f64 {
        self.common().maximum_data_modifier
    }

    fn maximum_data_bonus(&self) -> f64 {
        self.common().maximum_data_bonus
    }
}

/// Requirement/restriction flags and host-facing multipliers.
///
/// `exclusion` only matters when `restriction` is set. The three modifiers
/// are passed through to the host untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct CommonFields {
    pub restriction: bool,
    pub exclusion: ExclusionMode,
    pub data_rate_modifier: f64,
    pub maximum_data_modifier: f64,
    pub maximum_data_bonus: f64,
}

impl Default for CommonFields {
    fn default() -> Self {
        Self {
            restriction: false,
            exclusion: ExclusionMode::None,
            data_rate_modifier: DATA_RATE_MODIFIER,
            maximum_data_modifier: MAXIMUM_DATA_MODIFIER,
            maximum_data_bonus: MAXIMUM_DATA_BONUS,
        }
    }
}

impl CommonFields {
    /// A restriction with the given exclusion mode.
    pub fn restriction(exclusion: ExclusionMode) -> Self {
        Self {
            restriction: true,
            exclusion,
            ..Self::default()
        }
    }

    pub fn load(&mut self, node: &ConfigNode) {
        let defaults = Self::default();
        node.load_field(keys::RESTRICTION, &mut self.restriction, defaults.restriction);
        node.load_field(keys::EXCLUSION, &mut self.exclusion, defaults.exclusion);
        node.load_field(
            keys::DATA_RATE_MODIFIER,
            &mut self.data_rate_modifier,
            defaults.data_rate_modifier,
        );
        node.load_field(
            keys::MAXIMUM_DATA_MODIFIER,
            &mut self.maximum_data_modifier,
            defaults.maximum_data_modifier,
        );
        node.load_field(
            keys::MAXIMUM_DATA_BONUS,
            &mut self.maximum_data_bonus,
            defaults.maximum_data_bonus,
        );
    }

    /// Write `type_tag` followed by the common fields.
    pub fn save(&self, type_tag: &str, node: &mut ConfigNode) {
        node.add_value(keys::CONDITION_TYPE, type_tag);
        node.save_field(keys::RESTRICTION, &self.restriction);
        node.save_field(keys::EXCLUSION, &self.exclusion);
        node.save_field(keys::DATA_RATE_MODIFIER, &self.data_rate_modifier);
        node.save_field(keys::MAXIMUM_DATA_MODIFIER, &self.maximum_data_modifier);
        node.save_field(keys::MAXIMUM_DATA_BONUS, &self.maximum_data_bonus);
    }
}
