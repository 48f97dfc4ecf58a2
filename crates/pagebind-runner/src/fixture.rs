//! In-memory page described in the scenario file.
//!
//! Properties can be plain elements or lists. Lists grow on a schedule
//! measured from when the page was opened, and elements can appear or vanish
//! after a delay, which is enough to exercise every wait path without a
//! browser.

use async_trait::async_trait;
use pagebind::{ActionError, ElementLocator, HandleError, PropertyHandle};
use parking_lot::Mutex;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Page description.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageFixture {
    /// Properties by name.
    #[serde(default)]
    pub properties: HashMap<String, PropertyFixture>,
}

/// One page property.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertyFixture {
    /// Whether the property is a list.
    #[serde(default)]
    pub list: bool,

    /// Items present when the page opens.
    #[serde(default)]
    pub items: usize,

    /// Later item counts.
    #[serde(default)]
    pub grow: Vec<Growth>,

    /// Element is absent until this delay has passed.
    pub appears_after_ms: Option<u64>,

    /// Element is gone once this delay has passed.
    pub vanishes_after_ms: Option<u64>,

    /// Clicks and fills fail with this driver message.
    pub error: Option<String>,
}

/// Item count reached once `after_ms` has passed.
#[derive(Debug, Clone, Deserialize)]
pub struct Growth {
    pub after_ms: u64,
    pub items: usize,
}

impl PropertyFixture {
    fn items_at(&self, elapsed: Duration) -> usize {
        self.grow
            .iter()
            .filter(|g| elapsed >= Duration::from_millis(g.after_ms))
            .max_by_key(|g| g.after_ms)
            .map(|g| g.items)
            .unwrap_or(self.items)
    }

    fn present_at(&self, elapsed: Duration) -> bool {
        let appeared = self
            .appears_after_ms
            .map_or(true, |ms| elapsed >= Duration::from_millis(ms));
        let vanished = self
            .vanishes_after_ms
            .is_some_and(|ms| elapsed >= Duration::from_millis(ms));
        appeared && !vanished
    }
}

/// Interaction recorded by the fixture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    Click { property: String },
    Fill { property: String, value: String },
}

struct PageState {
    opened: Instant,
    properties: HashMap<String, PropertyFixture>,
    interactions: Mutex<Vec<Interaction>>,
}

/// [`ElementLocator`] over a [`PageFixture`].
#[derive(Clone)]
pub struct FixturePage {
    state: Arc<PageState>,
}

impl FixturePage {
    /// Open the page; schedules are measured from now.
    pub fn new(fixture: &PageFixture) -> Self {
        Self {
            state: Arc::new(PageState {
                opened: Instant::now(),
                properties: fixture.properties.clone(),
                interactions: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Interactions performed so far, in order.
    pub fn interactions(&self) -> Vec<Interaction> {
        self.state.interactions.lock().clone()
    }
}

#[async_trait]
impl ElementLocator for FixturePage {
    async fn property(&self, name: &str) -> Result<Arc<dyn PropertyHandle>, ActionError> {
        if !self.state.properties.contains_key(name) {
            return Err(ActionError::ElementNotFound {
                property: name.to_string(),
            });
        }
        Ok(Arc::new(FixtureHandle {
            name: name.to_string(),
            state: Arc::clone(&self.state),
        }))
    }
}

struct FixtureHandle {
    name: String,
    state: Arc<PageState>,
}

impl FixtureHandle {
    fn fixture(&self) -> Option<&PropertyFixture> {
        self.state.properties.get(&self.name)
    }

    fn ensure_interactable(&self) -> Result<(), HandleError> {
        let Some(fixture) = self.fixture() else {
            return Err(HandleError::Driver(format!("'{}' is gone", self.name)));
        };
        if !fixture.present_at(self.state.opened.elapsed()) {
            return Err(HandleError::Driver(format!(
                "'{}' is not present on the page",
                self.name
            )));
        }
        if let Some(ref message) = fixture.error {
            return Err(HandleError::Driver(message.clone()));
        }
        Ok(())
    }
}

#[async_trait]
impl PropertyHandle for FixtureHandle {
    fn property_name(&self) -> &str {
        &self.name
    }

    fn is_list(&self) -> bool {
        self.fixture().is_some_and(|f| f.list)
    }

    async fn item_at(&self, index: usize) -> Option<Arc<dyn PropertyHandle>> {
        let fixture = self.fixture().filter(|f| f.list)?;
        let count = fixture.items_at(self.state.opened.elapsed());
        debug!(property = %self.name, index, count, "fixture item lookup");
        if index < count {
            Some(Arc::new(FixtureItem {
                name: format!("{}[{}]", self.name, index),
            }))
        } else {
            None
        }
    }

    async fn exists(&self) -> bool {
        self.fixture()
            .is_some_and(|f| f.present_at(self.state.opened.elapsed()))
    }

    async fn click(&self) -> Result<(), HandleError> {
        self.ensure_interactable()?;
        self.state.interactions.lock().push(Interaction::Click {
            property: self.name.clone(),
        });
        Ok(())
    }

    async fn fill(&self, value: &str) -> Result<(), HandleError> {
        self.ensure_interactable()?;
        self.state.interactions.lock().push(Interaction::Fill {
            property: self.name.clone(),
            value: value.to_string(),
        });
        Ok(())
    }
}

/// Item of a fixture list.
struct FixtureItem {
    name: String,
}

#[async_trait]
impl PropertyHandle for FixtureItem {
    fn property_name(&self) -> &str {
        &self.name
    }

    fn is_list(&self) -> bool {
        false
    }

    async fn item_at(&self, _index: usize) -> Option<Arc<dyn PropertyHandle>> {
        None
    }
}
