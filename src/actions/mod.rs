//! Built-in actions and hooks.

mod hooks;
mod interact;
mod wait_for_element;
mod wait_for_list_items;

pub use hooks::{RecordLastActionPostAction, TraceLocatorAction, TracePostAction, TracePreAction};
pub use interact::{ClickItemAction, EnterDataAction, EnterDataContext};
pub use wait_for_element::{ElementCondition, WaitForElementAction, WaitForElementContext};
pub use wait_for_list_items::{WaitForListItemsAction, WaitForListItemsContext};
