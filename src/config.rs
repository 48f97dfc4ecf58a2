use crate::wait::PollOptions;
use crate::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Pipeline-wide settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PipelineConfig {
    /// Defaults for wait-style actions.
    #[serde(default)]
    pub wait: WaitConfig,

    /// Which built-in hooks are registered.
    #[serde(default)]
    pub hooks: HookConfig,
}

impl PipelineConfig {
    /// Load config from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse config from a YAML string.
    pub fn parse(yaml: &str) -> Result<Self> {
        let config: PipelineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.wait.poll_interval_ms == 0 {
            return Err(Error::Config(
                "wait.poll_interval_ms must be at least 1".into(),
            ));
        }
        if self.wait.timeout_ms == 0 {
            return Err(Error::Config("wait.timeout_ms must be at least 1".into()));
        }
        Ok(())
    }
}

fn default_timeout_ms() -> u64 {
    20_000
}
fn default_poll_interval_ms() -> u64 {
    500
}
fn default_true() -> bool {
    true
}

/// Timing used when a wait context does not carry its own timeout.
#[derive(Debug, Clone, Deserialize)]
pub struct WaitConfig {
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl WaitConfig {
    pub fn poll_options(&self) -> PollOptions {
        PollOptions::new(
            Duration::from_millis(self.timeout_ms),
            Duration::from_millis(self.poll_interval_ms),
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HookConfig {
    /// Register the tracing pre/post/locator hooks.
    #[serde(default = "default_true")]
    pub trace: bool,
    /// Record the last successful action into the scenario context.
    #[serde(default = "default_true")]
    pub record_last_action: bool,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            trace: true,
            record_last_action: true,
        }
    }
}
