use crate::action::{Action, ActionContext, ActionError, ActionResult, ActionScope, Context, Named};
use crate::config::PipelineConfig;
use crate::wait::{check_timeout, poll_until, PollError, PollOptions};
use crate::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// State an element is waited into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementCondition {
    #[default]
    Exists,
    NotExists,
}

impl fmt::Display for ElementCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exists => write!(f, "existing"),
            Self::NotExists => write!(f, "not existing"),
        }
    }
}

/// Waits until an element appears on, or disappears from, the page.
#[derive(Debug, Clone, Default)]
pub struct WaitForElementAction {
    poll: PollOptions,
}

impl WaitForElementAction {
    pub const NAME: &'static str = "WaitForElementAction";

    pub fn new(poll: PollOptions) -> Self {
        Self { poll }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.wait.poll_options())
    }
}

impl Named for WaitForElementAction {
    fn name(&self) -> &str {
        Self::NAME
    }
}

#[async_trait]
impl Action for WaitForElementAction {
    type Context = WaitForElementContext;

    async fn execute(&self, scope: &ActionScope<'_>, context: &WaitForElementContext) -> ActionResult {
        let property = context.property_name();
        let element = match scope.locator().property(property).await {
            Ok(element) => element,
            Err(err) => return ActionResult::failure(err),
        };

        let condition = context.condition();
        let timeout = context.timeout().unwrap_or(self.poll.timeout);
        let name = property.to_string();
        let probe = move |_attempt: u32| {
            let element = Arc::clone(&element);
            let name = name.clone();
            async move {
                let present = element.exists().await;
                let satisfied = match condition {
                    ElementCondition::Exists => present,
                    ElementCondition::NotExists => !present,
                };
                if !satisfied {
                    debug!("Element '{}' is not yet {}, waiting...", name, condition);
                }
                satisfied
            }
        };

        match poll_until(self.poll.with_timeout(timeout), scope.cancellation(), probe).await {
            Ok(_) => ActionResult::Success,
            Err(PollError::Elapsed { .. }) => ActionResult::failure(ActionError::Timeout {
                property: property.to_string(),
                timeout,
                requirement: condition.to_string(),
            }),
            Err(PollError::Cancelled { .. }) => ActionResult::failure(ActionError::Interrupted {
                property: property.to_string(),
                requirement: condition.to_string(),
            }),
        }
    }
}

/// Context for [`WaitForElementAction`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitForElementContext {
    target: ActionContext,
    condition: ElementCondition,
    timeout: Option<Duration>,
}

impl WaitForElementContext {
    pub fn new(
        property_name: impl Into<String>,
        condition: ElementCondition,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        Ok(Self {
            target: ActionContext::new(property_name)?,
            condition,
            timeout: check_timeout(timeout)?,
        })
    }

    pub fn condition(&self) -> ElementCondition {
        self.condition
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl Context for WaitForElementContext {
    fn target(&self) -> &ActionContext {
        &self.target
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_condition_defaults_to_exists() {
        assert_eq!(ElementCondition::default(), ElementCondition::Exists);
        assert_eq!(ElementCondition::NotExists.to_string(), "not existing");
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err =
            WaitForElementContext::new("Spinner", ElementCondition::NotExists, Some(Duration::ZERO))
                .unwrap_err();
        assert!(matches!(err, Error::OutOfRange { name: "timeout", .. }));

        let err =
            WaitForElementContext::new("Spinner", ElementCondition::Exists, Some(Duration::MAX))
                .unwrap_err();
        assert!(matches!(err, Error::OutOfRange { name: "timeout", .. }));
    }

    #[test]
    fn test_timeout_kept() {
        let ctx = WaitForElementContext::new(
            "Spinner",
            ElementCondition::Exists,
            Some(Duration::from_millis(1500)),
        )
        .unwrap();
        assert_eq!(ctx.timeout(), Some(Duration::from_millis(1500)));
        assert_eq!(ctx.property_name(), "Spinner");
    }
}
