use crate::action::{Action, ActionContext, ActionError, ActionResult, ActionScope, Context, Named};
use crate::config::PipelineConfig;
use crate::wait::{check_timeout, poll_until, PollError, PollOptions};
use crate::{Error, Result};
use async_trait::async_trait;
use std::any::Any;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Waits until a list property contains at least a given number of items.
#[derive(Debug, Clone, Default)]
pub struct WaitForListItemsAction {
    poll: PollOptions,
}

impl WaitForListItemsAction {
    pub const NAME: &'static str = "WaitForListItemsAction";

    pub fn new(poll: PollOptions) -> Self {
        Self { poll }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.wait.poll_options())
    }
}

impl Named for WaitForListItemsAction {
    fn name(&self) -> &str {
        Self::NAME
    }
}

#[async_trait]
impl Action for WaitForListItemsAction {
    type Context = WaitForListItemsContext;

    async fn execute(
        &self,
        scope: &ActionScope<'_>,
        context: &WaitForListItemsContext,
    ) -> ActionResult {
        let property = context.property_name();
        let element = match scope.locator().property(property).await {
            Ok(element) => element,
            Err(err) => return ActionResult::failure(err),
        };

        if !element.is_list() {
            return ActionResult::failure(ActionError::NotAList {
                property: property.to_string(),
            });
        }

        let timeout = context.timeout().unwrap_or(self.poll.timeout);
        let required = context.item_count();
        let requirement = describe(required);

        let name = property.to_string();
        let probe = move |_attempt: u32| {
            let element = Arc::clone(&element);
            let name = name.clone();
            async move {
                if element.item_at(required - 1).await.is_some() {
                    return true;
                }
                debug!(
                    "List '{}' did not contain at least {} items, waiting...",
                    name, required
                );
                false
            }
        };

        match poll_until(self.poll.with_timeout(timeout), scope.cancellation(), probe).await {
            Ok(_) => ActionResult::Success,
            Err(PollError::Elapsed { .. }) => ActionResult::failure(ActionError::Timeout {
                property: property.to_string(),
                timeout,
                requirement,
            }),
            Err(PollError::Cancelled { .. }) => ActionResult::failure(ActionError::Interrupted {
                property: property.to_string(),
                requirement,
            }),
        }
    }
}

fn describe(items: usize) -> String {
    if items == 1 {
        "at least 1 item".to_string()
    } else {
        format!("at least {} items", items)
    }
}

/// Context for [`WaitForListItemsAction`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitForListItemsContext {
    target: ActionContext,
    timeout: Option<Duration>,
    item_count: usize,
}

impl WaitForListItemsContext {
    /// Wait for the list to contain at least one item.
    pub fn new(property_name: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        Ok(Self {
            target: ActionContext::new(property_name)?,
            timeout: check_timeout(timeout)?,
            item_count: 1,
        })
    }

    /// Wait for the list to contain at least `item_count` items.
    pub fn with_item_count(
        property_name: impl Into<String>,
        timeout: Option<Duration>,
        item_count: usize,
    ) -> Result<Self> {
        if item_count < 1 {
            return Err(Error::OutOfRange {
                name: "item_count",
                reason: "the number of items should be 1 or greater".into(),
            });
        }
        let mut context = Self::new(property_name, timeout)?;
        context.item_count = item_count;
        Ok(context)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }
}

impl Context for WaitForListItemsContext {
    fn target(&self) -> &ActionContext {
        &self.target
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
