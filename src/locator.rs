//! Capabilities the pipeline consumes from the page layer.

use crate::action::ActionError;
use crate::repository::ActionRepository;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Failure reported by a driver-backed [`PropertyHandle`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandleError {
    #[error("'{0}' is not supported by this element")]
    Unsupported(&'static str),

    #[error("{0}")]
    Driver(String),
}

/// A resolved page element.
///
/// Handles are resolved per invocation and never cached: the page may change
/// between calls.
#[async_trait]
pub trait PropertyHandle: Send + Sync {
    fn property_name(&self) -> &str;

    fn is_list(&self) -> bool;

    /// Zero-based item lookup on a list. Out-of-range or not-yet-rendered
    /// items are `None`, never an error.
    async fn item_at(&self, index: usize) -> Option<Arc<dyn PropertyHandle>>;

    /// Whether the element is currently present on the page.
    async fn exists(&self) -> bool {
        true
    }

    async fn click(&self) -> Result<(), HandleError> {
        Err(HandleError::Unsupported("click"))
    }

    async fn fill(&self, _value: &str) -> Result<(), HandleError> {
        Err(HandleError::Unsupported("fill"))
    }
}

/// Resolves property names to handles.
#[async_trait]
pub trait ElementLocator: Send + Sync {
    /// Fails with [`ActionError::ElementNotFound`] for unknown names.
    async fn property(&self, name: &str) -> Result<Arc<dyn PropertyHandle>, ActionError>;
}

/// Locator wrapper that runs the repository's locator actions around every
/// resolution.
pub struct HookedLocator<'a> {
    inner: &'a dyn ElementLocator,
    repository: &'a ActionRepository,
}

impl<'a> HookedLocator<'a> {
    pub fn new(inner: &'a dyn ElementLocator, repository: &'a ActionRepository) -> Self {
        Self { inner, repository }
    }
}

#[async_trait]
impl ElementLocator for HookedLocator<'_> {
    async fn property(&self, name: &str) -> Result<Arc<dyn PropertyHandle>, ActionError> {
        for hook in self.repository.locator_actions() {
            hook.on_locate(name).await?;
        }

        let handle = self.inner.property(name).await?;
        debug!(property = name, list = handle.is_list(), "resolved property");

        for hook in self.repository.locator_actions() {
            hook.on_located(name, handle.as_ref()).await?;
        }
        Ok(handle)
    }
}
