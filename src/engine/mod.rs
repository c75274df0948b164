pub mod error;
pub mod listener;
pub mod plain;

pub use error::FiringError;
pub use listener::{RuleListener, RulesEngineListener};
pub use plain::PlainRulesEngine;

use std::collections::HashMap;

use crate::facts::Facts;
use crate::rules::Rules;

/// Strategy for running a rule collection against a set of facts.
pub trait RulesEngine: Send + Sync {
    /// Evaluate each rule in order and execute those whose condition holds.
    fn fire(&self, rules: &Rules, facts: &mut Facts) -> Result<(), FiringError>;

    /// Evaluate each rule in order without executing any action.
    ///
    /// Returns the evaluation result keyed by rule name. Vetoed rules are
    /// absent from the map.
    fn check(&self, rules: &Rules, facts: &Facts) -> Result<HashMap<String, bool>, FiringError>;
}
