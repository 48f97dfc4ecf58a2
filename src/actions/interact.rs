//! Actions that interact with a single element.

use crate::action::{Action, ActionContext, ActionError, ActionResult, ActionScope, Context, Named};
use crate::locator::HandleError;
use crate::Result;
use async_trait::async_trait;
use std::any::Any;
use tracing::info;

fn interaction_failed(action: &str, property: &str, err: HandleError) -> ActionResult {
    ActionResult::failure(ActionError::Failed {
        action: action.to_string(),
        property: property.to_string(),
        message: err.to_string(),
    })
}

/// Clicks a property.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClickItemAction;

impl ClickItemAction {
    pub const NAME: &'static str = "ClickItemAction";
}

impl Named for ClickItemAction {
    fn name(&self) -> &str {
        Self::NAME
    }
}

#[async_trait]
impl Action for ClickItemAction {
    type Context = ActionContext;

    async fn execute(&self, scope: &ActionScope<'_>, context: &ActionContext) -> ActionResult {
        let property = context.property_name();
        let element = match scope.locator().property(property).await {
            Ok(element) => element,
            Err(err) => return ActionResult::failure(err),
        };
        info!("click: {}", property);
        match element.click().await {
            Ok(()) => ActionResult::Success,
            Err(err) => interaction_failed(Self::NAME, property, err),
        }
    }
}

/// Enters text into a property.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnterDataAction;

impl EnterDataAction {
    pub const NAME: &'static str = "EnterDataAction";
}

impl Named for EnterDataAction {
    fn name(&self) -> &str {
        Self::NAME
    }
}

#[async_trait]
impl Action for EnterDataAction {
    type Context = EnterDataContext;

    async fn execute(&self, scope: &ActionScope<'_>, context: &EnterDataContext) -> ActionResult {
        let property = context.property_name();
        let element = match scope.locator().property(property).await {
            Ok(element) => element,
            Err(err) => return ActionResult::failure(err),
        };
        info!("enter data: {} = '{}'", property, context.data());
        match element.fill(context.data()).await {
            Ok(()) => ActionResult::Success,
            Err(err) => interaction_failed(Self::NAME, property, err),
        }
    }
}

/// Context for [`EnterDataAction`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnterDataContext {
    target: ActionContext,
    data: String,
}

impl EnterDataContext {
    pub fn new(property_name: impl Into<String>, data: impl Into<String>) -> Result<Self> {
        Ok(Self {
            target: ActionContext::new(property_name)?,
            data: data.into(),
        })
    }

    pub fn data(&self) -> &str {
        &self.data
    }
}

impl Context for EnterDataContext {
    fn target(&self) -> &ActionContext {
        &self.target
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
