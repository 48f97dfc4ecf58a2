mod context;
mod result;

pub use context::{ActionContext, Context};
pub use result::{ActionError, ActionResult, FailureKind};

use crate::locator::{ElementLocator, PropertyHandle};
use crate::scenario::ScenarioContext;
use async_trait::async_trait;
use std::any::type_name;
use tokio_util::sync::CancellationToken;

/// Anything registered in the action catalog has a stable name.
pub trait Named {
    fn name(&self) -> &str;
}

/// What an executing action may consult.
#[derive(Clone, Copy)]
pub struct ActionScope<'a> {
    locator: &'a dyn ElementLocator,
    scenario: &'a ScenarioContext,
    cancel: &'a CancellationToken,
}

impl<'a> ActionScope<'a> {
    pub fn new(
        locator: &'a dyn ElementLocator,
        scenario: &'a ScenarioContext,
        cancel: &'a CancellationToken,
    ) -> Self {
        Self {
            locator,
            scenario,
            cancel,
        }
    }

    pub fn locator(&self) -> &'a dyn ElementLocator {
        self.locator
    }

    pub fn scenario(&self) -> &'a ScenarioContext {
        self.scenario
    }

    /// Token that aborts in-flight waits for this invocation.
    pub fn cancellation(&self) -> &'a CancellationToken {
        self.cancel
    }
}

/// An ordinary action.
///
/// Expected failures (missing element, wrong element kind, timeout) must be
/// returned as [`ActionResult::Failure`]; parameter validation belongs in the
/// context's constructor.
#[async_trait]
pub trait Action: Named + Send + Sync + 'static {
    type Context: Context;

    async fn execute(&self, scope: &ActionScope<'_>, context: &Self::Context) -> ActionResult;
}

/// Object-safe form of [`Action`], used for name-based dispatch.
#[async_trait]
pub trait DynAction: Named + Send + Sync {
    async fn execute_dyn(&self, scope: &ActionScope<'_>, context: &dyn Context) -> ActionResult;
}

#[async_trait]
impl<A> DynAction for A
where
    A: Action,
{
    async fn execute_dyn(&self, scope: &ActionScope<'_>, context: &dyn Context) -> ActionResult {
        match context.as_any().downcast_ref::<A::Context>() {
            Some(typed) => self.execute(scope, typed).await,
            None => ActionResult::failure(ActionError::Usage {
                action: self.name().to_string(),
                reason: format!("expected a {} context", type_name::<A::Context>()),
            }),
        }
    }
}

/// Hook run before every ordinary action. A failure aborts the invocation.
#[async_trait]
pub trait PreAction: Named + Send + Sync {
    async fn before(
        &self,
        action: &str,
        context: &dyn Context,
        scope: &ActionScope<'_>,
    ) -> ActionResult;
}

/// Hook run after an ordinary action succeeded. A failure becomes the
/// invocation's result.
#[async_trait]
pub trait PostAction: Named + Send + Sync {
    async fn after(
        &self,
        action: &str,
        context: &dyn Context,
        scope: &ActionScope<'_>,
    ) -> ActionResult;
}

/// Hook observing every property resolution made through the pipeline's locator.
#[async_trait]
pub trait LocatorAction: Named + Send + Sync {
    /// Called before `property_name` is resolved.
    async fn on_locate(&self, _property_name: &str) -> Result<(), ActionError> {
        Ok(())
    }

    /// Called once `property_name` resolved to `handle`.
    async fn on_located(
        &self,
        _property_name: &str,
        _handle: &dyn PropertyHandle,
    ) -> Result<(), ActionError> {
        Ok(())
    }
}
