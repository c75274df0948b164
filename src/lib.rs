//! Fail-fast business rules engine.
//!
//! Rules are fired in priority order against a set of named [`Facts`].
//! Listeners observe every step and may veto a rule before it is evaluated.
//! The first rule that fails to evaluate or execute aborts the session with a
//! [`FiringError`].

pub mod config;
pub mod engine;
pub mod facts;
pub mod observability;
pub mod rules;

pub use config::Config;
pub use engine::{FiringError, PlainRulesEngine, RuleListener, RulesEngine, RulesEngineListener};
pub use facts::{Fact, Facts};
pub use rules::{Rule, RuleBuilder, Rules};
