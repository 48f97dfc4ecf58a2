pub mod schema;
pub mod steps;

pub use schema::{BrowserTarget, Scenario, SelectorDef};
pub use steps::Step;
