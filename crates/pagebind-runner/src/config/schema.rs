use super::Step;
use crate::fixture::PageFixture;
use crate::runner::prepare;
use crate::{Error, Result};
use pagebind::PipelineConfig;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Top-level scenario file.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    /// Name of this scenario.
    pub name: String,

    /// Scenario tags, visible to hooks.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Tags of the enclosing feature.
    #[serde(default)]
    pub feature_tags: Vec<String>,

    /// Pipeline settings (wait defaults, hooks).
    #[serde(default)]
    pub settings: PipelineConfig,

    /// In-memory page the steps run against.
    #[serde(default)]
    pub page: PageFixture,

    /// Real browser page to run against instead of the fixture.
    pub browser: Option<BrowserTarget>,

    /// Steps to execute, in order.
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Scenario {
    /// Load a scenario from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse a scenario from a YAML string.
    pub fn parse(yaml: &str) -> Result<Self> {
        let scenario: Scenario = serde_yaml::from_str(yaml)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Validate the scenario, including every step's parameters.
    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Config("name is required".into()));
        }
        self.settings.validate()?;
        if self.page.properties.keys().any(|k| k.trim().is_empty()) {
            return Err(Error::Config("page property names must not be empty".into()));
        }
        if let Some(ref browser) = self.browser {
            if browser.url.is_empty() {
                return Err(Error::Config("browser.url is required".into()));
            }
        }
        prepare(&self.steps)?;
        Ok(())
    }
}

/// Browser page to resolve properties against (requires the `browser` feature).
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserTarget {
    /// URL to open.
    pub url: String,

    /// Run in headless mode.
    #[serde(default)]
    pub headless: bool,

    /// Property name to CSS selector mapping.
    #[serde(default)]
    pub properties: HashMap<String, SelectorDef>,
}

/// How a property is found in the DOM.
#[derive(Debug, Clone, Deserialize)]
pub struct SelectorDef {
    /// CSS selector.
    pub selector: String,

    /// Whether every match is an item of a list property.
    #[serde(default)]
    pub list: bool,
}
