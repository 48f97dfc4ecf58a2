//! Per-scenario state passed explicitly through every pipeline invocation.

use parking_lot::RwLock;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

type Value = Arc<dyn Any + Send + Sync>;

/// Tags and shared values for one running scenario.
///
/// Values sit behind a lock so hooks can record into the scenario through a
/// shared reference.
#[derive(Default)]
pub struct ScenarioContext {
    title: String,
    tags: Vec<String>,
    feature_tags: Vec<String>,
    values: RwLock<HashMap<String, Value>>,
}

impl ScenarioContext {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_feature_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.feature_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Case-insensitive tag check on the scenario.
    pub fn contains_tag(&self, tag: &str) -> bool {
        find_tag(&self.tags, tag)
    }

    /// Case-insensitive tag check on the enclosing feature.
    pub fn feature_contains_tag(&self, tag: &str) -> bool {
        find_tag(&self.feature_tags, tag)
    }

    /// Fetch a value. Missing keys and values of another type yield `None`.
    pub fn get<T>(&self, key: &str) -> Option<T>
    where
        T: Any + Send + Sync + Clone,
    {
        self.values
            .read()
            .get(key)
            .and_then(|value| value.downcast_ref::<T>())
            .cloned()
    }

    pub fn set<T>(&self, key: impl Into<String>, value: T)
    where
        T: Any + Send + Sync,
    {
        self.values.write().insert(key.into(), Arc::new(value));
    }
}

impl std::fmt::Debug for ScenarioContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScenarioContext")
            .field("title", &self.title)
            .field("tags", &self.tags)
            .field("feature_tags", &self.feature_tags)
            .field("values", &self.values.read().len())
            .finish()
    }
}

fn find_tag(tags: &[String], search: &str) -> bool {
    let search = search.to_lowercase();
    tags.iter().any(|t| t.to_lowercase() == search)
}

/// The most recent action that completed successfully in a scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastAction {
    pub action: String,
    pub property: String,
}

impl LastAction {
    /// Scenario key under which [`RecordLastActionPostAction`](crate::actions::RecordLastActionPostAction) stores it.
    pub const KEY: &'static str = "pagebind.last_action";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_are_case_insensitive() {
        let scenario = ScenarioContext::new("Search")
            .with_tags(["Smoke", "slow"])
            .with_feature_tags(["SEARCH"]);
        assert!(scenario.contains_tag("smoke"));
        assert!(scenario.contains_tag("SLOW"));
        assert!(!scenario.contains_tag("search"));
        assert!(scenario.feature_contains_tag("search"));
        assert!(!scenario.feature_contains_tag("smoke"));
    }

    #[test]
    fn test_values_are_typed() {
        let scenario = ScenarioContext::new("Values");
        scenario.set("count", 3usize);
        assert_eq!(scenario.get::<usize>("count"), Some(3));
        assert_eq!(scenario.get::<String>("count"), None);
        assert_eq!(scenario.get::<usize>("missing"), None);

        scenario.set("count", 4usize);
        assert_eq!(scenario.get::<usize>("count"), Some(4));
    }
}
