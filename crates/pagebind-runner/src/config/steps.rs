use pagebind::actions::ElementCondition;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// One step of a scenario: a single action invocation.
#[derive(Debug, Clone)]
pub enum Step {
    WaitForListItems(WaitForListItemsStep),
    WaitForElement(WaitForElementStep),
    Click(TargetStep),
    EnterData(EnterDataStep),
}

impl Step {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::WaitForListItems(_) => "wait_for_list_items",
            Self::WaitForElement(_) => "wait_for_element",
            Self::Click(_) => "click",
            Self::EnterData(_) => "enter_data",
        }
    }

    /// Property the step targets.
    pub fn property(&self) -> &str {
        match self {
            Self::WaitForListItems(s) => &s.property,
            Self::WaitForElement(s) => &s.property,
            Self::Click(s) => &s.property,
            Self::EnterData(s) => &s.property,
        }
    }
}

const STEP_NAMES: &[&str] = &[
    "wait_for_list_items",
    "wait_for_element",
    "click",
    "enter_data",
];

impl<'de> Deserialize<'de> for Step {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(StepVisitor)
    }
}

struct StepVisitor;

impl<'de> Visitor<'de> for StepVisitor {
    type Value = Step;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a step (map with a single step-type key)")
    }

    fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let key: String = map
            .next_key()?
            .ok_or_else(|| de::Error::custom("expected step type key"))?;

        let step = match key.as_str() {
            "wait_for_list_items" => Step::WaitForListItems(map.next_value()?),
            "wait_for_element" => Step::WaitForElement(map.next_value()?),
            "click" => Step::Click(map.next_value()?),
            "enter_data" => Step::EnterData(map.next_value()?),
            other => return Err(de::Error::unknown_variant(other, STEP_NAMES)),
        };

        if let Some(extra) = map.next_key::<String>()? {
            return Err(de::Error::custom(format!(
                "step '{}' has an unexpected second key '{}'",
                key, extra
            )));
        }
        Ok(step)
    }
}

// --- Step payloads ---

fn default_count() -> usize {
    1
}

#[derive(Debug, Clone, Deserialize)]
pub struct WaitForListItemsStep {
    pub property: String,
    /// Minimum number of items; validated when the step is prepared.
    #[serde(default = "default_count")]
    pub count: usize,
    /// Falls back to `settings.wait.timeout_ms` when absent.
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WaitForElementStep {
    pub property: String,
    #[serde(default)]
    pub condition: ElementCondition,
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TargetStep {
    pub property: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnterDataStep {
    pub property: String,
    pub value: String,
}
