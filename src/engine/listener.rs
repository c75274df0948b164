use crate::facts::Facts;
use crate::rules::{ActionError, ConditionError, Rule, Rules};

/// Observer of a single rule's lifecycle.
///
/// Every hook has a no-op default so implementors override only what they
/// need. Hooks must not panic: a panicking listener aborts the firing
/// session without the after-session hooks running.
pub trait RuleListener: Send + Sync {
    /// Called before a rule is evaluated.
    ///
    /// Returning `false` vetoes the rule: it is neither evaluated nor
    /// executed, and no further hooks fire for it.
    fn before_evaluate(&self, _rule: &dyn Rule, _facts: &Facts) -> bool {
        true
    }

    /// Called after a rule's condition returned normally.
    fn after_evaluate(&self, _rule: &dyn Rule, _facts: &Facts, _result: bool) {}

    /// Called after a rule's condition returned normally during `check`.
    ///
    /// `after_evaluate` is reserved for firing sessions.
    fn after_check(&self, _rule: &dyn Rule, _facts: &Facts, _result: bool) {}

    /// Called when a rule's condition failed to evaluate.
    fn on_evaluation_error(&self, _rule: &dyn Rule, _facts: &Facts, _error: &ConditionError) {}

    /// Called before a triggered rule's action runs.
    fn before_execute(&self, _rule: &dyn Rule, _facts: &Facts) {}

    /// Called after a rule's action completed.
    fn on_success(&self, _rule: &dyn Rule, _facts: &Facts) {}

    /// Called when a rule's action failed.
    ///
    /// `error` has already had one dispatch wrapper removed, see
    /// [`ActionError::unwrap_invocation`].
    fn on_failure(&self, _rule: &dyn Rule, _facts: &Facts, _error: &ActionError) {}
}

/// Observer of a whole firing or checking session.
///
/// Both hooks fire exactly once per session, including for an empty rule
/// collection and when the session aborts on an error.
pub trait RulesEngineListener: Send + Sync {
    fn before_rules(&self, _rules: &Rules, _facts: &Facts) {}

    fn after_rules(&self, _rules: &Rules, _facts: &Facts) {}
}
