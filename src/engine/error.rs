use thiserror::Error;

use crate::rules::{ActionError, ConditionError};

/// Terminal failure of a firing or checking session.
#[derive(Error, Debug)]
pub enum FiringError {
    /// A rule's condition could not be evaluated.
    #[error("Rule '{rule}' evaluated with error: {source}")]
    Evaluation {
        rule: String,
        #[source]
        source: ConditionError,
    },

    /// A triggered rule's action failed.
    #[error("Rule '{rule}' performed with error: {source}")]
    Execution {
        rule: String,
        #[source]
        source: ActionError,
    },
}

impl FiringError {
    /// Name of the rule that aborted the session.
    pub fn rule(&self) -> &str {
        match self {
            FiringError::Evaluation { rule, .. } | FiringError::Execution { rule, .. } => rule,
        }
    }

    pub fn is_evaluation(&self) -> bool {
        matches!(self, FiringError::Evaluation { .. })
    }

    pub fn is_execution(&self) -> bool {
        matches!(self, FiringError::Execution { .. })
    }
}
