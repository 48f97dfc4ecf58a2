use crate::config::Step;
use crate::{Error, Result};
use pagebind::actions::{
    ClickItemAction, EnterDataAction, EnterDataContext, WaitForElementAction,
    WaitForElementContext, WaitForListItemsAction, WaitForListItemsContext,
};
use pagebind::{ActionContext, Context};
use std::time::Duration;

/// A step turned into a catalog lookup plus its validated context.
#[derive(Debug)]
pub struct PreparedStep {
    /// Name of the registered action to perform.
    pub action: &'static str,
    pub context: Box<dyn Context>,
}

/// Build the context of every step, failing on the first invalid one.
pub fn prepare(steps: &[Step]) -> Result<Vec<PreparedStep>> {
    steps
        .iter()
        .enumerate()
        .map(|(i, step)| {
            prepare_step(step).map_err(|e| {
                Error::Config(format!("step {} ({}): {}", i + 1, step.name(), e))
            })
        })
        .collect()
}

fn prepare_step(step: &Step) -> pagebind::Result<PreparedStep> {
    let prepared = match step {
        Step::WaitForListItems(s) => PreparedStep {
            action: WaitForListItemsAction::NAME,
            context: Box::new(WaitForListItemsContext::with_item_count(
                s.property.as_str(),
                s.timeout_ms.map(Duration::from_millis),
                s.count,
            )?),
        },
        Step::WaitForElement(s) => PreparedStep {
            action: WaitForElementAction::NAME,
            context: Box::new(WaitForElementContext::new(
                s.property.as_str(),
                s.condition,
                s.timeout_ms.map(Duration::from_millis),
            )?),
        },
        Step::Click(s) => PreparedStep {
            action: ClickItemAction::NAME,
            context: Box::new(ActionContext::new(s.property.as_str())?),
        },
        Step::EnterData(s) => PreparedStep {
            action: EnterDataAction::NAME,
            context: Box::new(EnterDataContext::new(s.property.as_str(), s.value.as_str())?),
        },
    };
    Ok(prepared)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steps(yaml: &str) -> Vec<Step> {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_prepare_maps_steps_to_actions() {
        let prepared = prepare(&steps(
            r#"
- enter_data:
    property: SearchBox
    value: rust
- click:
    property: SearchButton
- wait_for_list_items:
    property: ResultsList
    count: 3
    timeout_ms: 2000
- wait_for_element:
    property: Spinner
    condition: not_exists
"#,
        ))
        .unwrap();

        let actions: Vec<_> = prepared.iter().map(|p| p.action).collect();
        assert_eq!(
            actions,
            vec![
                EnterDataAction::NAME,
                ClickItemAction::NAME,
                WaitForListItemsAction::NAME,
                WaitForElementAction::NAME,
            ]
        );

        let wait = prepared[2]
            .context
            .as_any()
            .downcast_ref::<WaitForListItemsContext>()
            .unwrap();
        assert_eq!(wait.property_name(), "ResultsList");
        assert_eq!(wait.item_count(), 3);
        assert_eq!(wait.timeout(), Some(Duration::from_secs(2)));
    }

    #[test]
    fn test_prepare_rejects_zero_count() {
        let err = prepare(&steps(
            r#"
- click:
    property: SearchButton
- wait_for_list_items:
    property: ResultsList
    count: 0
"#,
        ))
        .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("step 2 (wait_for_list_items)"));
        assert!(message.contains("1 or greater"));
    }

    #[test]
    fn test_prepare_rejects_blank_property() {
        let err = prepare(&steps(
            r#"
- click:
    property: "  "
"#,
        ))
        .unwrap_err();
        assert!(err.to_string().contains("step 1 (click)"));
    }

    #[test]
    fn test_prepare_rejects_zero_timeout() {
        let err = prepare(&steps(
            r#"
- wait_for_element:
    property: Spinner
    timeout_ms: 0
"#,
        ))
        .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("step 1 (wait_for_element)"));
        assert!(message.contains("'timeout'"));

        let err = prepare(&steps(
            r#"
- wait_for_list_items:
    property: ResultsList
    timeout_ms: 0
"#,
        ))
        .unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn test_omitted_timeout_is_left_to_the_action() {
        let prepared = prepare(&steps(
            r#"
- wait_for_list_items:
    property: ResultsList
"#,
        ))
        .unwrap();
        let wait = prepared[0]
            .context
            .as_any()
            .downcast_ref::<WaitForListItemsContext>()
            .unwrap();
        assert_eq!(wait.item_count(), 1);
        assert_eq!(wait.timeout(), None);
    }
}
