use std::fmt::Debug;

use crate::facts::Facts;

use super::error::{ActionError, ConditionError};

/// Priority given to rules that do not declare one.
pub const DEFAULT_PRIORITY: i32 = i32::MAX - 1;

/// A named, prioritized (condition, action) pair.
///
/// Rules are fired in ascending priority order: a smaller value runs first.
/// Rules sharing a priority run in the order they were registered.
pub trait Rule: Send + Sync + Debug {
    /// Unique name of this rule within a [`Rules`](super::Rules) collection.
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    fn priority(&self) -> i32 {
        DEFAULT_PRIORITY
    }

    /// Decide whether the rule applies to the given facts.
    ///
    /// Must not modify facts. `Ok(false)` means "does not apply"; an error
    /// means the condition could not be decided.
    fn evaluate(&self, facts: &Facts) -> Result<bool, ConditionError>;

    /// Perform the rule's effect. May mutate facts.
    fn execute(&self, facts: &mut Facts) -> Result<(), ActionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct RainRule;

    impl Rule for RainRule {
        fn name(&self) -> &str {
            "rain"
        }

        fn evaluate(&self, facts: &Facts) -> Result<bool, ConditionError> {
            Ok(facts.get_as::<bool>("rain")?.unwrap_or(false))
        }

        fn execute(&self, facts: &mut Facts) -> Result<(), ActionError> {
            facts.put("umbrella", true);
            Ok(())
        }
    }

    #[test]
    fn test_rule_defaults() {
        let rule = RainRule;

        assert_eq!(rule.name(), "rain");
        assert_eq!(rule.description(), "");
        assert_eq!(rule.priority(), DEFAULT_PRIORITY);
    }

    #[test]
    fn test_rule_trait() {
        let rule = RainRule;
        let mut facts = Facts::new();

        assert!(!rule.evaluate(&facts).unwrap());

        facts.put("rain", true);
        assert!(rule.evaluate(&facts).unwrap());

        rule.execute(&mut facts).unwrap();
        assert_eq!(facts.get_as::<bool>("umbrella").unwrap(), Some(true));
    }

    #[test]
    fn test_malformed_fact_is_an_error() {
        let rule = RainRule;
        let facts: Facts = [("rain", "yes")].into_iter().collect();

        assert!(matches!(rule.evaluate(&facts), Err(ConditionError::Fact(_))));
    }
}
