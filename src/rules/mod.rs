pub mod builder;
pub mod error;
pub mod shop;
pub mod traits;

pub use builder::{FnRule, RuleBuilder};
pub use error::{ActionError, BoxError, ConditionError};
pub use traits::{Rule, DEFAULT_PRIORITY};

use std::sync::Arc;
use thiserror::Error;

/// Errors raised while assembling a rule collection.
#[derive(Error, Debug)]
pub enum RulesError {
    #[error("Duplicate rule name: {0}")]
    DuplicateRule(String),
}

struct Entry {
    seq: u64,
    rule: Arc<dyn Rule>,
}

/// Ordered collection of distinct rules.
///
/// Iteration yields rules by ascending `(priority, registration order)`.
/// Names are unique within a collection.
#[derive(Default)]
pub struct Rules {
    entries: Vec<Entry>,
    next_seq: u64,
}

impl Rules {
    /// Create an empty collection.
    pub fn new() -> Self {
        Rules::default()
    }

    /// Register a rule.
    pub fn register(&mut self, rule: impl Rule + 'static) -> Result<(), RulesError> {
        self.register_arc(Arc::new(rule))
    }

    /// Register a shared rule.
    pub fn register_arc(&mut self, rule: Arc<dyn Rule>) -> Result<(), RulesError> {
        if self.get(rule.name()).is_some() {
            return Err(RulesError::DuplicateRule(rule.name().to_string()));
        }

        let seq = self.next_seq;
        self.next_seq += 1;

        // Entries stay sorted by (priority, seq).
        let key = (rule.priority(), seq);
        let idx = self
            .entries
            .partition_point(|entry| (entry.rule.priority(), entry.seq) < key);
        self.entries.insert(idx, Entry { seq, rule });
        Ok(())
    }

    /// Remove a rule by name.
    pub fn unregister(&mut self, name: &str) -> Option<Arc<dyn Rule>> {
        let idx = self.entries.iter().position(|e| e.rule.name() == name)?;
        Some(self.entries.remove(idx).rule)
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Rule>> {
        self.entries
            .iter()
            .find(|e| e.rule.name() == name)
            .map(|e| &e.rule)
    }

    /// Iterate rules in firing order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Rule>> {
        self.entries.iter().map(|e| &e.rule)
    }

    /// Rule names in firing order.
    pub fn names(&self) -> Vec<&str> {
        self.iter().map(|rule| rule.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl std::fmt::Debug for Rules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|e| (e.seq, &e.rule)))
            .finish()
    }
}
