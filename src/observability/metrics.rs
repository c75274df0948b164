use std::sync::atomic::{AtomicU64, Ordering};

use crate::engine::{RuleListener, RulesEngineListener};
use crate::facts::Facts;
use crate::rules::{ActionError, ConditionError, Rule, Rules};

/// Counters for firing and checking sessions.
///
/// Register the same `Arc<MetricsRegistry>` as both a rule listener and an
/// engine listener to collect every counter. Register it first so that a veto
/// from another listener does not hide rules from `rules_considered_total`.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Sessions started (fire or check)
    pub sessions_total: AtomicU64,

    /// Rules offered to listeners for evaluation
    pub rules_considered_total: AtomicU64,

    /// Rule evaluation outcomes
    pub rules_evaluated_total: AtomicU64,
    pub rules_triggered_total: AtomicU64,
    pub evaluation_errors_total: AtomicU64,

    /// Rule execution outcomes
    pub rules_succeeded_total: AtomicU64,
    pub rules_failed_total: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry.
    pub fn new() -> Self {
        MetricsRegistry::default()
    }

    /// Record a rule evaluation.
    pub fn record_rule_evaluation(&self, triggered: bool) {
        self.rules_evaluated_total.fetch_add(1, Ordering::Relaxed);
        if triggered {
            self.rules_triggered_total.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a rule execution.
    pub fn record_rule_execution(&self, success: bool) {
        if success {
            self.rules_succeeded_total.fetch_add(1, Ordering::Relaxed);
        } else {
            self.rules_failed_total.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Export metrics in Prometheus format.
    pub fn to_prometheus(&self) -> String {
        format!(
            r#"# HELP plainrules_sessions_total Total number of firing or checking sessions
# TYPE plainrules_sessions_total counter
plainrules_sessions_total {}

# HELP plainrules_rules_considered_total Rules offered for evaluation
# TYPE plainrules_rules_considered_total counter
plainrules_rules_considered_total {}

# HELP plainrules_rules_evaluated_total Rule conditions evaluated without error
# TYPE plainrules_rules_evaluated_total counter
plainrules_rules_evaluated_total {}

# HELP plainrules_rules_triggered_total Rule conditions that evaluated to true
# TYPE plainrules_rules_triggered_total counter
plainrules_rules_triggered_total {}

# HELP plainrules_evaluation_errors_total Rule conditions that failed to evaluate
# TYPE plainrules_evaluation_errors_total counter
plainrules_evaluation_errors_total {}

# HELP plainrules_rule_executions Rule actions by outcome
# TYPE plainrules_rule_executions counter
plainrules_rule_executions{{outcome="success"}} {}
plainrules_rule_executions{{outcome="failure"}} {}
"#,
            self.sessions_total.load(Ordering::Relaxed),
            self.rules_considered_total.load(Ordering::Relaxed),
            self.rules_evaluated_total.load(Ordering::Relaxed),
            self.rules_triggered_total.load(Ordering::Relaxed),
            self.evaluation_errors_total.load(Ordering::Relaxed),
            self.rules_succeeded_total.load(Ordering::Relaxed),
            self.rules_failed_total.load(Ordering::Relaxed),
        )
    }
}

impl RuleListener for MetricsRegistry {
    fn before_evaluate(&self, _rule: &dyn Rule, _facts: &Facts) -> bool {
        self.rules_considered_total.fetch_add(1, Ordering::Relaxed);
        true
    }

    fn after_evaluate(&self, _rule: &dyn Rule, _facts: &Facts, result: bool) {
        self.record_rule_evaluation(result);
    }

    fn after_check(&self, _rule: &dyn Rule, _facts: &Facts, result: bool) {
        self.record_rule_evaluation(result);
    }

    fn on_evaluation_error(&self, _rule: &dyn Rule, _facts: &Facts, _error: &ConditionError) {
        self.evaluation_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    fn on_success(&self, _rule: &dyn Rule, _facts: &Facts) {
        self.record_rule_execution(true);
    }

    fn on_failure(&self, _rule: &dyn Rule, _facts: &Facts, _error: &ActionError) {
        self.record_rule_execution(false);
    }
}

impl RulesEngineListener for MetricsRegistry {
    fn before_rules(&self, _rules: &Rules, _facts: &Facts) {
        self.sessions_total.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{PlainRulesEngine, RulesEngine};
    use crate::rules::RuleBuilder;
    use std::sync::Arc;

    fn engine_with(metrics: &Arc<MetricsRegistry>) -> PlainRulesEngine {
        let mut engine = PlainRulesEngine::new();
        engine.register_rule_listener(metrics.clone());
        engine.register_rules_engine_listener(metrics.clone());
        engine
    }

    #[test]
    fn test_counts_fire_session() {
        let metrics = Arc::new(MetricsRegistry::new());
        let engine = engine_with(&metrics);

        let mut rules = Rules::new();
        rules
            .register(RuleBuilder::new("yes").priority(1).when(|_| Ok(true)).build())
            .unwrap();
        rules
            .register(RuleBuilder::new("no").priority(2).when(|_| Ok(false)).build())
            .unwrap();

        engine.fire(&rules, &mut Facts::new()).unwrap();

        assert_eq!(metrics.sessions_total.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.rules_considered_total.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.rules_evaluated_total.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.rules_triggered_total.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.rules_succeeded_total.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.rules_failed_total.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_counts_check_session() {
        let metrics = Arc::new(MetricsRegistry::new());
        let engine = engine_with(&metrics);

        let mut rules = Rules::new();
        rules
            .register(RuleBuilder::new("yes").priority(1).when(|_| Ok(true)).build())
            .unwrap();
        rules
            .register(RuleBuilder::new("no").priority(2).when(|_| Ok(false)).build())
            .unwrap();

        let results = engine.check(&rules, &Facts::new()).unwrap();
        assert_eq!(results.len(), 2);

        assert_eq!(metrics.sessions_total.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.rules_considered_total.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.rules_evaluated_total.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.rules_triggered_total.load(Ordering::Relaxed), 1);
        // Nothing executes while checking
        assert_eq!(metrics.rules_succeeded_total.load(Ordering::Relaxed), 0);
        assert_eq!(metrics.rules_failed_total.load(Ordering::Relaxed), 0);

        let output = metrics.to_prometheus();
        assert!(output.contains("plainrules_rules_evaluated_total 2"));
    }

    #[test]
    fn test_counts_failures() {
        let metrics = Arc::new(MetricsRegistry::new());
        let engine = engine_with(&metrics);

        let mut rules = Rules::new();
        rules
            .register(
                RuleBuilder::new("fails")
                    .when(|_| Ok(true))
                    .then(|_| Err(ActionError::failed("boom")))
                    .build(),
            )
            .unwrap();
        assert!(engine.fire(&rules, &mut Facts::new()).is_err());

        let mut rules = Rules::new();
        rules
            .register(
                RuleBuilder::new("broken")
                    .when(|_| Err(ConditionError::failed("bad")))
                    .build(),
            )
            .unwrap();
        assert!(engine.check(&rules, &Facts::new()).is_err());

        assert_eq!(metrics.sessions_total.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.rules_failed_total.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.evaluation_errors_total.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_prometheus_format() {
        let metrics = MetricsRegistry::new();
        metrics.record_rule_evaluation(true);
        metrics.record_rule_execution(true);

        let output = metrics.to_prometheus();

        assert!(output.contains("plainrules_rules_evaluated_total 1"));
        assert!(output.contains("plainrules_rules_triggered_total 1"));
        assert!(output.contains("plainrules_rule_executions{outcome=\"success\"} 1"));
        assert!(output.contains("plainrules_rule_executions{outcome=\"failure\"} 0"));
    }
}
