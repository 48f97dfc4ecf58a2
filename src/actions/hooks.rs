//! Built-in pre-, post- and locator hooks.

use crate::action::{
    ActionError, ActionResult, ActionScope, Context, LocatorAction, Named, PostAction, PreAction,
};
use crate::locator::PropertyHandle;
use crate::scenario::LastAction;
use async_trait::async_trait;
use tracing::debug;

/// Logs every action before it runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracePreAction;

impl Named for TracePreAction {
    fn name(&self) -> &str {
        "TracePreAction"
    }
}

#[async_trait]
impl PreAction for TracePreAction {
    async fn before(
        &self,
        action: &str,
        context: &dyn Context,
        scope: &ActionScope<'_>,
    ) -> ActionResult {
        debug!(
            scenario = scope.scenario().title(),
            action,
            property = context.property_name(),
            "starting action"
        );
        ActionResult::Success
    }
}

/// Logs every action that completed successfully.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracePostAction;

impl Named for TracePostAction {
    fn name(&self) -> &str {
        "TracePostAction"
    }
}

#[async_trait]
impl PostAction for TracePostAction {
    async fn after(
        &self,
        action: &str,
        context: &dyn Context,
        scope: &ActionScope<'_>,
    ) -> ActionResult {
        debug!(
            scenario = scope.scenario().title(),
            action,
            property = context.property_name(),
            "action completed"
        );
        ActionResult::Success
    }
}

/// Logs every property resolution.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceLocatorAction;

impl Named for TraceLocatorAction {
    fn name(&self) -> &str {
        "TraceLocatorAction"
    }
}

#[async_trait]
impl LocatorAction for TraceLocatorAction {
    async fn on_locate(&self, property_name: &str) -> Result<(), ActionError> {
        debug!(property = property_name, "locating property");
        Ok(())
    }

    async fn on_located(
        &self,
        property_name: &str,
        handle: &dyn PropertyHandle,
    ) -> Result<(), ActionError> {
        debug!(property = property_name, list = handle.is_list(), "located property");
        Ok(())
    }
}

/// Stores the last successful action in the scenario under [`LastAction::KEY`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordLastActionPostAction;

impl Named for RecordLastActionPostAction {
    fn name(&self) -> &str {
        "RecordLastActionPostAction"
    }
}

#[async_trait]
impl PostAction for RecordLastActionPostAction {
    async fn after(
        &self,
        action: &str,
        context: &dyn Context,
        scope: &ActionScope<'_>,
    ) -> ActionResult {
        scope.scenario().set(
            LastAction::KEY,
            LastAction {
                action: action.to_string(),
                property: context.property_name().to_string(),
            },
        );
        ActionResult::Success
    }
}
