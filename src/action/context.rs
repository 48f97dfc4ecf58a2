use crate::{Error, Result};
use std::any::Any;
use std::fmt;

/// Input shared by every action context: the page property the action targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionContext {
    property_name: String,
}

impl ActionContext {
    /// Create a context targeting `property_name`. Blank names are rejected.
    pub fn new(property_name: impl Into<String>) -> Result<Self> {
        let property_name = property_name.into();
        if property_name.trim().is_empty() {
            return Err(Error::InvalidArgument {
                name: "property_name",
                reason: "a property name is required".into(),
            });
        }
        Ok(Self { property_name })
    }

    pub fn property_name(&self) -> &str {
        &self.property_name
    }
}

/// An action-specific context.
///
/// Each action declares its own context type; hooks only see it through this
/// trait, which exposes the common target and allows the erased dispatch path
/// to recover the concrete type.
pub trait Context: Any + Send + Sync + fmt::Debug {
    /// The common target every context embeds.
    fn target(&self) -> &ActionContext;

    fn as_any(&self) -> &dyn Any;

    fn property_name(&self) -> &str {
        self.target().property_name()
    }
}

impl Context for ActionContext {
    fn target(&self) -> &ActionContext {
        self
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
