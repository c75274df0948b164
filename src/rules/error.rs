use thiserror::Error;

use crate::facts::FactError;

/// Boxed error used for causes reported by user code.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure raised while evaluating a rule's condition.
///
/// A condition that simply does not hold returns `Ok(false)`; this type is
/// for conditions that cannot be decided at all.
#[derive(Error, Debug)]
pub enum ConditionError {
    #[error(transparent)]
    Fact(#[from] FactError),

    #[error("{0}")]
    Failed(#[source] BoxError),
}

impl ConditionError {
    pub fn failed(cause: impl Into<BoxError>) -> Self {
        ConditionError::Failed(cause.into())
    }
}

/// Failure raised while executing a rule's action.
#[derive(Error, Debug)]
pub enum ActionError {
    #[error(transparent)]
    Fact(#[from] FactError),

    /// Failure reported by the action body itself.
    #[error("{0}")]
    Failed(#[source] BoxError),

    /// Failure recorded by the layer that dispatches a rule's actions.
    ///
    /// When `cause` is itself an `ActionError` it is the original domain
    /// failure and [`ActionError::unwrap_invocation`] recovers it.
    #[error("action #{step} of rule '{rule}' failed: {cause}")]
    Invocation {
        rule: String,
        step: usize,
        #[source]
        cause: BoxError,
    },
}

impl ActionError {
    pub fn failed(cause: impl Into<BoxError>) -> Self {
        ActionError::Failed(cause.into())
    }

    /// Strip exactly one `Invocation` layer if it wraps another `ActionError`.
    ///
    /// Any other error, including an `Invocation` whose cause is a foreign
    /// error type, is returned unchanged.
    pub fn unwrap_invocation(self) -> ActionError {
        match self {
            ActionError::Invocation { rule, step, cause } => match cause.downcast::<ActionError>() {
                Ok(inner) => *inner,
                Err(cause) => ActionError::Invocation { rule, step, cause },
            },
            other => other,
        }
    }

    /// Returns true if this error is a dispatch-layer wrapper.
    pub fn is_invocation(&self) -> bool {
        matches!(self, ActionError::Invocation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn wrapped(inner: ActionError) -> ActionError {
        ActionError::Invocation {
            rule: "r".to_string(),
            step: 0,
            cause: Box::new(inner),
        }
    }

    #[test]
    fn test_unwrap_recovers_domain_failure() {
        let err = wrapped(ActionError::failed("out of stock")).unwrap_invocation();

        assert!(matches!(err, ActionError::Failed(_)));
        assert_eq!(err.to_string(), "out of stock");
    }

    #[test]
    fn test_unwrap_removes_single_layer() {
        let err = wrapped(wrapped(ActionError::failed("boom"))).unwrap_invocation();

        assert!(err.is_invocation());
        assert_eq!(err.unwrap_invocation().to_string(), "boom");
    }

    #[test]
    fn test_unwrap_keeps_foreign_cause() {
        let err = ActionError::Invocation {
            rule: "r".to_string(),
            step: 2,
            cause: Box::new(io::Error::other("disk")),
        };

        let err = err.unwrap_invocation();
        assert!(err.is_invocation());
        assert_eq!(err.to_string(), "action #2 of rule 'r' failed: disk");
    }

    #[test]
    fn test_unwrap_is_noop_for_plain_failure() {
        let err = ActionError::failed("plain").unwrap_invocation();
        assert!(matches!(err, ActionError::Failed(_)));
    }

    #[test]
    fn test_fact_errors_convert() {
        let err: ConditionError = FactError::Missing("age".to_string()).into();
        assert_eq!(err.to_string(), "fact 'age' is not defined");

        let err: ActionError = FactError::Missing("age".to_string()).into();
        assert!(matches!(err, ActionError::Fact(_)));
    }
}
