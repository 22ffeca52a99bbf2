//! Condition contract, registry, and built-in variants.
//!
//! A host loads an ordered list of condition nodes, resolves each through a
//! [`ConditionRegistry`] by its `conditionType` tag, and evaluates the
//! resulting [`ConditionSet`] once per tick.

pub mod condition;
pub mod diagnostic;
pub mod orbit;
pub mod registry;
pub mod set;

pub use condition::{CommonFields, Condition};
pub use diagnostic::DiagnosticText;
pub use orbit::{ORBIT_TAG, OrbitCondition};
pub use registry::{ConditionRegistry, Constructor, LoadError, RegistryError};
pub use set::ConditionSet;
