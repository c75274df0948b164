use std::fmt;

use crate::facts::Facts;

use super::error::{ActionError, ConditionError};
use super::traits::{Rule, DEFAULT_PRIORITY};

type Condition = Box<dyn Fn(&Facts) -> Result<bool, ConditionError> + Send + Sync>;
type Action = Box<dyn Fn(&mut Facts) -> Result<(), ActionError> + Send + Sync>;

/// Rule assembled from closures by [`RuleBuilder`].
///
/// Actions run in the order they were added. A failing action is wrapped in
/// [`ActionError::Invocation`] carrying its step index.
pub struct FnRule {
    name: String,
    description: String,
    priority: i32,
    condition: Condition,
    actions: Vec<Action>,
}

impl Rule for FnRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn evaluate(&self, facts: &Facts) -> Result<bool, ConditionError> {
        (self.condition)(facts)
    }

    fn execute(&self, facts: &mut Facts) -> Result<(), ActionError> {
        for (step, action) in self.actions.iter().enumerate() {
            action(facts).map_err(|err| ActionError::Invocation {
                rule: self.name.clone(),
                step,
                cause: Box::new(err),
            })?;
        }
        Ok(())
    }
}

impl fmt::Debug for FnRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnRule")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("priority", &self.priority)
            .field("actions", &self.actions.len())
            .finish()
    }
}

fn never(_: &Facts) -> Result<bool, ConditionError> {
    Ok(false)
}

/// Fluent builder for closure-based rules.
///
/// ```
/// use plainrules::rules::RuleBuilder;
///
/// let rule = RuleBuilder::new("weather")
///     .description("if it rains then take an umbrella")
///     .priority(1)
///     .when(|facts| Ok(facts.get_as::<bool>("rain")?.unwrap_or(false)))
///     .then(|facts| {
///         facts.put("umbrella", true);
///         Ok(())
///     })
///     .build();
/// ```
pub struct RuleBuilder {
    name: String,
    description: String,
    priority: i32,
    condition: Option<Condition>,
    actions: Vec<Action>,
}

impl RuleBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        RuleBuilder {
            name: name.into(),
            description: String::new(),
            priority: DEFAULT_PRIORITY,
            condition: None,
            actions: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Set the condition. Without one the rule never applies.
    pub fn when<F>(mut self, condition: F) -> Self
    where
        F: Fn(&Facts) -> Result<bool, ConditionError> + Send + Sync + 'static,
    {
        self.condition = Some(Box::new(condition));
        self
    }

    /// Append an action.
    pub fn then<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut Facts) -> Result<(), ActionError> + Send + Sync + 'static,
    {
        self.actions.push(Box::new(action));
        self
    }

    pub fn build(self) -> FnRule {
        FnRule {
            name: self.name,
            description: self.description,
            priority: self.priority,
            condition: self.condition.unwrap_or_else(|| Box::new(never)),
            actions: self.actions,
        }
    }
}
