//! Sample rule pack used by the `plainrules` binary.
//!
//! Expects an `age` fact (non-negative integer) and derives `adult`,
//! `alcohol_denied` and `discount` from it.

mod adult;
mod alcohol;

pub use adult::AdultRule;
pub use alcohol::AlcoholRule;

use super::{FnRule, RuleBuilder, Rules, RulesError};

/// Age from which the senior discount applies.
pub const SENIOR_AGE: u32 = 65;

/// Discount percentage granted to seniors.
pub const SENIOR_DISCOUNT: u32 = 10;

/// Senior discount rule, built from closures.
pub fn senior_discount_rule() -> FnRule {
    RuleBuilder::new("senior discount rule")
        .description("when age is at least 65, then grant a 10% discount")
        .priority(3)
        .when(|facts| Ok(facts.require::<u32>("age")? >= SENIOR_AGE))
        .then(|facts| {
            facts.put("discount", SENIOR_DISCOUNT);
            Ok(())
        })
        .build()
}

/// Build the full shop pack in firing order.
pub fn rules() -> Result<Rules, RulesError> {
    let mut rules = Rules::new();
    rules.register(AdultRule::default())?;
    rules.register(AlcoholRule::default())?;
    rules.register(senior_discount_rule())?;
    Ok(rules)
}
