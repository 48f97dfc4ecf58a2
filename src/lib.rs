//! # pagebind
//!
//! Action pipeline for page-object automation. Actions are typed units of work
//! that resolve a named page property through an [`ElementLocator`], run with a
//! uniform [`ActionResult`] contract, and are wrapped by pre-, post- and
//! locator hooks registered in an [`ActionRepository`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use pagebind::actions::{WaitForListItemsAction, WaitForListItemsContext};
//! use pagebind::{ActionPipeline, ActionRepository, ElementLocator, PipelineConfig, ScenarioContext};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run(locator: Arc<dyn ElementLocator>) -> pagebind::Result<()> {
//! let config = PipelineConfig::default();
//! let repository = Arc::new(ActionRepository::standard(&config)?);
//! let pipeline = ActionPipeline::new(repository, locator);
//!
//! let action = WaitForListItemsAction::from_config(&config);
//! let context = WaitForListItemsContext::with_item_count(
//!     "ResultsList",
//!     Some(Duration::from_secs(2)),
//!     3,
//! )?;
//! let scenario = ScenarioContext::new("Search returns results");
//! let result = pipeline
//!     .perform(&action, &context, &scenario, &CancellationToken::new())
//!     .await;
//! println!("Success: {}", result.is_success());
//! # Ok(())
//! # }
//! ```

mod action;
pub mod actions;
mod config;
mod locator;
mod pipeline;
mod repository;
mod scenario;
pub mod wait;

pub use action::{
    Action, ActionContext, ActionError, ActionResult, ActionScope, Context, DynAction,
    FailureKind, LocatorAction, Named, PostAction, PreAction,
};
pub use config::{HookConfig, PipelineConfig, WaitConfig};
pub use locator::{ElementLocator, HandleError, HookedLocator, PropertyHandle};
pub use pipeline::ActionPipeline;
pub use repository::{ActionRepository, ActionRepositoryBuilder, CatalogEntry, Role};
pub use scenario::{LastAction, ScenarioContext};

/// Result type for pagebind construction and configuration.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised before an action ever runs: invalid context parameters,
/// catalog registration problems and configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid argument '{name}': {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    #[error("argument '{name}' out of range: {reason}")]
    OutOfRange { name: &'static str, reason: String },

    #[error("registration error: {0}")]
    Registration(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("yaml parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
