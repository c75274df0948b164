use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::facts::Facts;
use crate::rules::{ActionError, ConditionError, Rule, Rules};

use super::error::FiringError;
use super::listener::{RuleListener, RulesEngineListener};
use super::RulesEngine;

/// Fail-fast rules engine.
///
/// Rules are processed in priority order. The first rule whose condition
/// fails to evaluate, or whose action fails, aborts the whole session with a
/// [`FiringError`] once listeners have been notified and the after-session
/// hooks have run.
///
/// # Listener registration
///
/// Registration takes `&mut self` and is append-only; duplicates are kept
/// and fire once per registration. Register every listener before the
/// engine is shared. Once it sits behind an `Arc` the listener lists are
/// frozen, and independent sessions (each with its own [`Facts`]) may run
/// concurrently on several threads.
///
/// There is no timeout: a rule that never returns blocks the calling thread.
#[derive(Default)]
pub struct PlainRulesEngine {
    rule_listeners: Vec<Arc<dyn RuleListener>>,
    rules_engine_listeners: Vec<Arc<dyn RulesEngineListener>>,
}

impl PlainRulesEngine {
    /// Create an engine with no listeners.
    pub fn new() -> Self {
        PlainRulesEngine::default()
    }

    /// Append a rule listener. Duplicates are kept and fire once per registration.
    pub fn register_rule_listener(&mut self, listener: Arc<dyn RuleListener>) {
        self.rule_listeners.push(listener);
    }

    /// Append rule listeners in iteration order.
    pub fn register_rule_listeners(
        &mut self,
        listeners: impl IntoIterator<Item = Arc<dyn RuleListener>>,
    ) {
        self.rule_listeners.extend(listeners);
    }

    /// Append an engine listener. Duplicates are kept and fire once per registration.
    pub fn register_rules_engine_listener(&mut self, listener: Arc<dyn RulesEngineListener>) {
        self.rules_engine_listeners.push(listener);
    }

    /// Append engine listeners in iteration order.
    pub fn register_rules_engine_listeners(
        &mut self,
        listeners: impl IntoIterator<Item = Arc<dyn RulesEngineListener>>,
    ) {
        self.rules_engine_listeners.extend(listeners);
    }

    /// Registered rule listeners, in registration order.
    pub fn rule_listeners(&self) -> &[Arc<dyn RuleListener>] {
        &self.rule_listeners
    }

    /// Registered engine listeners, in registration order.
    pub fn rules_engine_listeners(&self) -> &[Arc<dyn RulesEngineListener>] {
        &self.rules_engine_listeners
    }

    fn do_fire(&self, rules: &Rules, facts: &mut Facts) -> Result<(), FiringError> {
        if rules.is_empty() {
            warn!("No rules registered! Nothing to apply");
            return Ok(());
        }

        log_rules(rules);
        log_facts(facts);
        debug!("Rules evaluation started");

        for rule in rules.iter() {
            let rule = rule.as_ref();
            let name = rule.name();

            if !self.should_be_evaluated(rule, facts) {
                debug!(rule = name, "Rule has been skipped before being evaluated");
                continue;
            }

            if !self.evaluate(rule, facts)? {
                debug!(
                    rule = name,
                    "Rule has been evaluated to false, it has not been executed"
                );
                self.trigger_after_evaluate(rule, facts, false);
                continue;
            }

            debug!(rule = name, "Rule triggered");
            self.trigger_after_evaluate(rule, facts, true);
            self.trigger_before_execute(rule, facts);

            match rule.execute(facts) {
                Ok(()) => {
                    debug!(rule = name, "Rule performed successfully");
                    self.trigger_on_success(rule, facts);
                }
                Err(err) => {
                    let err = err.unwrap_invocation();
                    warn!(rule = name, error = %err, "Rule performed with error");
                    self.trigger_on_failure(rule, facts, &err);
                    return Err(FiringError::Execution {
                        rule: name.to_string(),
                        source: err,
                    });
                }
            }
        }

        Ok(())
    }

    fn do_check(&self, rules: &Rules, facts: &Facts) -> Result<HashMap<String, bool>, FiringError> {
        if rules.is_empty() {
            warn!("No rules registered! Nothing to check");
            return Ok(HashMap::new());
        }

        log_rules(rules);
        log_facts(facts);
        debug!("Rules check started");

        let mut results = HashMap::with_capacity(rules.len());
        for rule in rules.iter() {
            let rule = rule.as_ref();

            if !self.should_be_evaluated(rule, facts) {
                debug!(rule = rule.name(), "Rule has been skipped before being checked");
                continue;
            }

            let result = self.evaluate(rule, facts)?;
            debug!(rule = rule.name(), result, "Rule checked");
            self.trigger_after_check(rule, facts, result);
            results.insert(rule.name().to_string(), result);
        }

        Ok(results)
    }

    /// Evaluate a rule, notifying listeners and wrapping the cause on failure.
    fn evaluate(&self, rule: &dyn Rule, facts: &Facts) -> Result<bool, FiringError> {
        rule.evaluate(facts).map_err(|err| {
            error!(rule = rule.name(), error = %err, "Rule evaluated with error");
            self.trigger_on_evaluation_error(rule, facts, &err);
            FiringError::Evaluation {
                rule: rule.name().to_string(),
                source: err,
            }
        })
    }

    /// A rule is evaluated only if every listener agrees.
    fn should_be_evaluated(&self, rule: &dyn Rule, facts: &Facts) -> bool {
        self.rule_listeners
            .iter()
            .all(|listener| listener.before_evaluate(rule, facts))
    }

    fn trigger_after_evaluate(&self, rule: &dyn Rule, facts: &Facts, result: bool) {
        for listener in &self.rule_listeners {
            listener.after_evaluate(rule, facts, result);
        }
    }

    fn trigger_after_check(&self, rule: &dyn Rule, facts: &Facts, result: bool) {
        for listener in &self.rule_listeners {
            listener.after_check(rule, facts, result);
        }
    }

    fn trigger_on_evaluation_error(&self, rule: &dyn Rule, facts: &Facts, error: &ConditionError) {
        for listener in &self.rule_listeners {
            listener.on_evaluation_error(rule, facts, error);
        }
    }

    fn trigger_before_execute(&self, rule: &dyn Rule, facts: &Facts) {
        for listener in &self.rule_listeners {
            listener.before_execute(rule, facts);
        }
    }

    fn trigger_on_success(&self, rule: &dyn Rule, facts: &Facts) {
        for listener in &self.rule_listeners {
            listener.on_success(rule, facts);
        }
    }

    fn trigger_on_failure(&self, rule: &dyn Rule, facts: &Facts, error: &ActionError) {
        for listener in &self.rule_listeners {
            listener.on_failure(rule, facts, error);
        }
    }

    fn trigger_before_rules(&self, rules: &Rules, facts: &Facts) {
        for listener in &self.rules_engine_listeners {
            listener.before_rules(rules, facts);
        }
    }

    fn trigger_after_rules(&self, rules: &Rules, facts: &Facts) {
        for listener in &self.rules_engine_listeners {
            listener.after_rules(rules, facts);
        }
    }
}

impl RulesEngine for PlainRulesEngine {
    fn fire(&self, rules: &Rules, facts: &mut Facts) -> Result<(), FiringError> {
        self.trigger_before_rules(rules, facts);
        let outcome = self.do_fire(rules, facts);
        self.trigger_after_rules(rules, facts);
        debug!(failed = outcome.is_err(), "Rules evaluation ended");
        outcome
    }

    /// Evaluation errors abort the check exactly as they abort `fire`.
    /// After-evaluate hooks are not called while checking; listeners see
    /// each result through `after_check` instead.
    fn check(&self, rules: &Rules, facts: &Facts) -> Result<HashMap<String, bool>, FiringError> {
        self.trigger_before_rules(rules, facts);
        let outcome = self.do_check(rules, facts);
        self.trigger_after_rules(rules, facts);
        debug!(failed = outcome.is_err(), "Rules check ended");
        outcome
    }
}

impl fmt::Debug for PlainRulesEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlainRulesEngine")
            .field("rule_listeners", &self.rule_listeners.len())
            .field("rules_engine_listeners", &self.rules_engine_listeners.len())
            .finish()
    }
}

fn log_rules(rules: &Rules) {
    debug!("Registered rules:");
    for rule in rules.iter() {
        debug!(
            rule = rule.name(),
            description = rule.description(),
            priority = rule.priority(),
            "Rule"
        );
    }
}

fn log_facts(facts: &Facts) {
    debug!("Known facts:");
    for fact in facts {
        debug!("{}", fact);
    }
}
