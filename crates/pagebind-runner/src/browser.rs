//! Property resolution against a live page driven by eoka.

use crate::config::{BrowserTarget, SelectorDef};
use crate::Result;
use async_trait::async_trait;
use eoka::{Browser, Page};
use pagebind::{ActionError, ElementLocator, HandleError, PropertyHandle};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Quote a string as a JS literal.
fn js_str(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}

fn driver(e: eoka::Error) -> HandleError {
    HandleError::Driver(e.to_string())
}

/// A launched browser with the scenario's page open.
pub struct BrowserSession {
    browser: Browser,
    page: Arc<Page>,
}

impl BrowserSession {
    /// Launch the browser and navigate to `target.url`.
    pub async fn launch(target: &BrowserTarget) -> Result<Self> {
        let stealth = eoka::StealthConfig {
            headless: target.headless,
            ..Default::default()
        };
        debug!("Launching browser (headless: {})", target.headless);
        let browser = Browser::launch_with_config(stealth).await?;
        let page = browser.new_page(&target.url).await?;
        Ok(Self {
            browser,
            page: Arc::new(page),
        })
    }

    /// Locator resolving `target.properties` on this session's page.
    pub fn locator(&self, target: &BrowserTarget) -> BrowserLocator {
        BrowserLocator {
            page: Arc::clone(&self.page),
            properties: target.properties.clone(),
        }
    }

    /// Close the browser.
    pub async fn close(self) -> Result<()> {
        self.browser.close().await?;
        Ok(())
    }
}

/// [`ElementLocator`] mapping property names to CSS selectors.
pub struct BrowserLocator {
    page: Arc<Page>,
    properties: HashMap<String, SelectorDef>,
}

#[async_trait]
impl ElementLocator for BrowserLocator {
    async fn property(&self, name: &str) -> std::result::Result<Arc<dyn PropertyHandle>, ActionError> {
        let Some(def) = self.properties.get(name) else {
            return Err(ActionError::ElementNotFound {
                property: name.to_string(),
            });
        };
        Ok(Arc::new(BrowserHandle {
            name: name.to_string(),
            page: Arc::clone(&self.page),
            selector: def.selector.clone(),
            list: def.list,
            index: None,
        }))
    }
}

struct BrowserHandle {
    name: String,
    page: Arc<Page>,
    selector: String,
    list: bool,
    /// Position among the selector's matches, for list items.
    index: Option<usize>,
}

impl BrowserHandle {
    /// JS expression evaluating to the element, or `undefined`.
    fn element_js(&self) -> String {
        format!(
            "document.querySelectorAll({})[{}]",
            js_str(&self.selector),
            self.index.unwrap_or(0)
        )
    }
}

#[async_trait]
impl PropertyHandle for BrowserHandle {
    fn property_name(&self) -> &str {
        &self.name
    }

    fn is_list(&self) -> bool {
        self.list && self.index.is_none()
    }

    async fn item_at(&self, index: usize) -> Option<Arc<dyn PropertyHandle>> {
        if !self.is_list() {
            return None;
        }
        let js = format!(
            "document.querySelectorAll({}).length",
            js_str(&self.selector)
        );
        let count: usize = match self.page.evaluate(&js).await {
            Ok(count) => count,
            Err(e) => {
                debug!("Counting '{}' failed: {}", self.name, e);
                return None;
            }
        };
        (index < count).then(|| {
            Arc::new(BrowserHandle {
                name: format!("{}[{}]", self.name, index),
                page: Arc::clone(&self.page),
                selector: self.selector.clone(),
                list: false,
                index: Some(index),
            }) as Arc<dyn PropertyHandle>
        })
    }

    async fn exists(&self) -> bool {
        let js = format!("!!{}", self.element_js());
        self.page.evaluate(&js).await.unwrap_or(false)
    }

    async fn click(&self) -> std::result::Result<(), HandleError> {
        match self.index {
            None => self.page.click(&self.selector).await.map_err(driver),
            Some(_) => {
                let js = format!("{}?.click()", self.element_js());
                self.page.execute(&js).await.map_err(driver)
            }
        }
    }

    async fn fill(&self, value: &str) -> std::result::Result<(), HandleError> {
        if self.index.is_some() {
            return Err(HandleError::Unsupported("fill"));
        }
        self.page.fill(&self.selector, value).await.map_err(driver)
    }
}
