//! The pipeline driver.

use crate::action::{Action, ActionError, ActionResult, ActionScope, Context, DynAction};
use crate::locator::{ElementLocator, HookedLocator};
use crate::repository::ActionRepository;
use crate::scenario::ScenarioContext;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Runs actions wrapped in the repository's hooks.
///
/// For one invocation: every pre-action, then the action, then every
/// post-action, strictly in sequence. The first failure ends the invocation
/// and is returned as-is; nothing after it runs.
pub struct ActionPipeline {
    repository: Arc<ActionRepository>,
    locator: Arc<dyn ElementLocator>,
}

impl ActionPipeline {
    pub fn new(repository: Arc<ActionRepository>, locator: Arc<dyn ElementLocator>) -> Self {
        Self {
            repository,
            locator,
        }
    }

    pub fn repository(&self) -> &Arc<ActionRepository> {
        &self.repository
    }

    /// Perform a typed action.
    pub async fn perform<A: Action>(
        &self,
        action: &A,
        context: &A::Context,
        scenario: &ScenarioContext,
        cancel: &CancellationToken,
    ) -> ActionResult {
        self.run(action, context, scenario, cancel).await
    }

    /// Perform the ordinary action registered as `name`.
    pub async fn perform_named(
        &self,
        name: &str,
        context: &dyn Context,
        scenario: &ScenarioContext,
        cancel: &CancellationToken,
    ) -> ActionResult {
        let Some(action) = self.repository.action(name) else {
            return ActionResult::failure(ActionError::Usage {
                action: name.to_string(),
                reason: "no such action is registered".into(),
            });
        };
        self.run(action.as_ref(), context, scenario, cancel).await
    }

    async fn run(
        &self,
        action: &dyn DynAction,
        context: &dyn Context,
        scenario: &ScenarioContext,
        cancel: &CancellationToken,
    ) -> ActionResult {
        let locator = HookedLocator::new(self.locator.as_ref(), &self.repository);
        let scope = ActionScope::new(&locator, scenario, cancel);
        let name = action.name();
        debug!(action = name, property = context.property_name(), "performing action");

        for hook in self.repository.pre_actions() {
            let result = hook.before(name, context, &scope).await;
            if let Some(err) = result.error() {
                warn!("pre-action {} failed before {}: {}", hook.name(), name, err);
                return result;
            }
        }

        let result = action.execute_dyn(&scope, context).await;
        if let Some(err) = result.error() {
            warn!("{} failed: {}", name, err);
            return result;
        }

        for hook in self.repository.post_actions() {
            let result = hook.after(name, context, &scope).await;
            if let Some(err) = result.error() {
                warn!("post-action {} failed after {}: {}", hook.name(), name, err);
                return result;
            }
        }

        ActionResult::Success
    }
}
