//! # pagebind-runner
//!
//! Scenario runner for pagebind. Describe a page and a list of steps in YAML,
//! then run the steps through the action pipeline.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pagebind_runner::{FixturePage, Runner, Scenario};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> pagebind_runner::Result<()> {
//! let scenario = Scenario::load("scenarios/search.yaml")?;
//! let page = FixturePage::new(&scenario.page);
//! let runner = Runner::new(Arc::new(page), &scenario.settings)?;
//! let result = runner.run(&scenario).await?;
//! println!("Success: {}", result.success);
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "browser")]
mod browser;
mod config;
mod fixture;
mod runner;

#[cfg(feature = "browser")]
pub use browser::{BrowserLocator, BrowserSession};
pub use config::{BrowserTarget, Scenario, SelectorDef, Step};
pub use fixture::{FixturePage, Growth, Interaction, PageFixture, PropertyFixture};
pub use runner::{prepare, PreparedStep, RunResult, Runner};

/// Result type for pagebind-runner operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or running a scenario.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("yaml parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Pipeline(#[from] pagebind::Error),

    #[cfg(feature = "browser")]
    #[error("browser error: {0}")]
    Browser(#[from] eoka::Error),
}
