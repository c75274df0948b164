use crate::facts::Facts;
use crate::rules::error::{ActionError, ConditionError};
use crate::rules::traits::Rule;

/// Denies alcohol to anyone not marked as adult.
///
/// Relies on [`AdultRule`](super::AdultRule) having run first.
#[derive(Debug, Default)]
pub struct AlcoholRule;

impl Rule for AlcoholRule {
    fn name(&self) -> &str {
        "alcohol rule"
    }

    fn description(&self) -> &str {
        "children are not allowed to buy alcohol"
    }

    fn priority(&self) -> i32 {
        2
    }

    fn evaluate(&self, facts: &Facts) -> Result<bool, ConditionError> {
        let adult = facts.get_as::<bool>("adult")?.unwrap_or(false);
        Ok(!adult)
    }

    fn execute(&self, facts: &mut Facts) -> Result<(), ActionError> {
        facts.put("alcohol_denied", true);
        Ok(())
    }
}
