//! The action catalog.

use crate::action::{Action, DynAction, LocatorAction, Named, PostAction, PreAction};
use crate::actions::{
    ClickItemAction, EnterDataAction, RecordLastActionPostAction, TraceLocatorAction,
    TracePostAction, TracePreAction, WaitForElementAction, WaitForListItemsAction,
};
use crate::config::PipelineConfig;
use crate::{Error, Result};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Role an action plays in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Pre,
    Post,
    Locator,
    Ordinary,
}

/// One registered action; the variant is its role.
#[derive(Clone)]
pub enum CatalogEntry {
    Pre(Arc<dyn PreAction>),
    Post(Arc<dyn PostAction>),
    Locator(Arc<dyn LocatorAction>),
    Action(Arc<dyn DynAction>),
}

impl CatalogEntry {
    pub fn name(&self) -> &str {
        match self {
            Self::Pre(a) => a.name(),
            Self::Post(a) => a.name(),
            Self::Locator(a) => a.name(),
            Self::Action(a) => a.name(),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Self::Pre(_) => Role::Pre,
            Self::Post(_) => Role::Post,
            Self::Locator(_) => Role::Locator,
            Self::Action(_) => Role::Ordinary,
        }
    }
}

impl fmt::Debug for CatalogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogEntry")
            .field("name", &self.name())
            .field("role", &self.role())
            .finish()
    }
}

/// Collects catalog entries; [`build`](Self::build) validates names.
#[derive(Default)]
pub struct ActionRepositoryBuilder {
    entries: Vec<CatalogEntry>,
}

impl ActionRepositoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn action<A: Action>(self, action: A) -> Self {
        self.entry(CatalogEntry::Action(Arc::new(action)))
    }

    pub fn pre_action(self, action: impl PreAction + 'static) -> Self {
        self.entry(CatalogEntry::Pre(Arc::new(action)))
    }

    pub fn post_action(self, action: impl PostAction + 'static) -> Self {
        self.entry(CatalogEntry::Post(Arc::new(action)))
    }

    pub fn locator_action(self, action: impl LocatorAction + 'static) -> Self {
        self.entry(CatalogEntry::Locator(Arc::new(action)))
    }

    pub fn entry(mut self, entry: CatalogEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Freeze the catalog. Empty or duplicate names are rejected.
    pub fn build(self) -> Result<ActionRepository> {
        let mut seen = HashSet::new();
        for entry in &self.entries {
            let name = entry.name();
            if name.trim().is_empty() {
                return Err(Error::Registration(format!(
                    "{:?} action registered without a name",
                    entry.role()
                )));
            }
            if !seen.insert(name) {
                return Err(Error::Registration(format!(
                    "action '{}' registered more than once",
                    name
                )));
            }
        }
        Ok(ActionRepository {
            entries: self.entries,
        })
    }
}

/// Read-only catalog of registered actions, classified by role.
///
/// Built once and shared behind an `Arc`; every accessor returns a fresh
/// iterator in registration order.
#[derive(Debug)]
pub struct ActionRepository {
    entries: Vec<CatalogEntry>,
}

impl ActionRepository {
    pub fn builder() -> ActionRepositoryBuilder {
        ActionRepositoryBuilder::new()
    }

    /// The built-in catalog, with hooks enabled per `config.hooks`.
    pub fn standard(config: &PipelineConfig) -> Result<Self> {
        config.validate()?;
        let mut builder = Self::builder()
            .action(WaitForListItemsAction::from_config(config))
            .action(WaitForElementAction::from_config(config))
            .action(ClickItemAction)
            .action(EnterDataAction);

        if config.hooks.trace {
            builder = builder
                .pre_action(TracePreAction)
                .post_action(TracePostAction)
                .locator_action(TraceLocatorAction);
        }
        if config.hooks.record_last_action {
            builder = builder.post_action(RecordLastActionPostAction);
        }
        builder.build()
    }

    pub fn pre_actions(&self) -> impl Iterator<Item = &Arc<dyn PreAction>> + '_ {
        self.entries.iter().filter_map(|entry| match entry {
            CatalogEntry::Pre(a) => Some(a),
            _ => None,
        })
    }

    pub fn post_actions(&self) -> impl Iterator<Item = &Arc<dyn PostAction>> + '_ {
        self.entries.iter().filter_map(|entry| match entry {
            CatalogEntry::Post(a) => Some(a),
            _ => None,
        })
    }

    pub fn locator_actions(&self) -> impl Iterator<Item = &Arc<dyn LocatorAction>> + '_ {
        self.entries.iter().filter_map(|entry| match entry {
            CatalogEntry::Locator(a) => Some(a),
            _ => None,
        })
    }

    /// Look up an ordinary action by name.
    pub fn action(&self, name: &str) -> Option<&Arc<dyn DynAction>> {
        self.entries.iter().find_map(|entry| match entry {
            CatalogEntry::Action(a) if a.name() == name => Some(a),
            _ => None,
        })
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
