use crate::facts::Facts;
use crate::rules::error::{ActionError, ConditionError};
use crate::rules::traits::Rule;

/// Marks a person as adult once they reach the age of majority.
#[derive(Debug)]
pub struct AdultRule {
    /// Age of majority (inclusive)
    majority: u32,
}

impl AdultRule {
    pub fn new(majority: u32) -> Self {
        AdultRule { majority }
    }
}

impl Default for AdultRule {
    fn default() -> Self {
        AdultRule::new(18)
    }
}

impl Rule for AdultRule {
    fn name(&self) -> &str {
        "adult rule"
    }

    fn description(&self) -> &str {
        "when age is greater than or equal to 18, then mark as adult"
    }

    fn priority(&self) -> i32 {
        1
    }

    fn evaluate(&self, facts: &Facts) -> Result<bool, ConditionError> {
        // A missing or non-numeric age cannot be decided either way
        let age: u32 = facts.require("age")?;
        Ok(age >= self.majority)
    }

    fn execute(&self, facts: &mut Facts) -> Result<(), ActionError> {
        facts.put("adult", true);
        Ok(())
    }
}
