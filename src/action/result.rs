use std::time::Duration;
use thiserror::Error;

/// Coarse classification of an [`ActionError`], used by harnesses to report
/// failures without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The action was invoked incorrectly (wrong context type, unknown name).
    Usage,
    /// The target property could not be resolved.
    Resolution,
    /// The resolved element has the wrong shape for the action.
    Precondition,
    /// A bounded wait gave up, either at its deadline or on cancellation.
    Timeout,
    /// The action's own interaction with the page failed.
    ActionSpecific,
}

/// Cause carried by a failed [`ActionResult`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("invalid use of '{action}': {reason}")]
    Usage { action: String, reason: String },

    #[error("property '{property}' was not found on the page")]
    ElementNotFound { property: String },

    #[error("property '{property}' is not a list and cannot be used in this wait")]
    NotAList { property: String },

    #[error("property '{property}' did not reach {requirement} after {timeout:?}")]
    Timeout {
        property: String,
        timeout: Duration,
        requirement: String,
    },

    #[error("wait on property '{property}' for {requirement} was cancelled")]
    Interrupted {
        property: String,
        requirement: String,
    },

    #[error("{action} failed on property '{property}': {message}")]
    Failed {
        action: String,
        property: String,
        message: String,
    },
}

impl ActionError {
    /// Classify this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Usage { .. } => FailureKind::Usage,
            Self::ElementNotFound { .. } => FailureKind::Resolution,
            Self::NotAList { .. } => FailureKind::Precondition,
            Self::Timeout { .. } | Self::Interrupted { .. } => FailureKind::Timeout,
            Self::Failed { .. } => FailureKind::ActionSpecific,
        }
    }

    /// Property the failure refers to, when there is one.
    pub fn property(&self) -> Option<&str> {
        match self {
            Self::Usage { .. } => None,
            Self::ElementNotFound { property }
            | Self::NotAList { property }
            | Self::Timeout { property, .. }
            | Self::Interrupted { property, .. }
            | Self::Failed { property, .. } => Some(property),
        }
    }
}

/// Outcome of one action execution.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    Success,
    Failure(ActionError),
}

impl ActionResult {
    pub fn success() -> Self {
        Self::Success
    }

    pub fn failure(cause: ActionError) -> Self {
        Self::Failure(cause)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// The failure cause, if any.
    pub fn error(&self) -> Option<&ActionError> {
        match self {
            Self::Success => None,
            Self::Failure(cause) => Some(cause),
        }
    }

    pub fn into_result(self) -> Result<(), ActionError> {
        match self {
            Self::Success => Ok(()),
            Self::Failure(cause) => Err(cause),
        }
    }
}

impl From<Result<(), ActionError>> for ActionResult {
    fn from(result: Result<(), ActionError>) -> Self {
        match result {
            Ok(()) => Self::Success,
            Err(cause) => Self::Failure(cause),
        }
    }
}
