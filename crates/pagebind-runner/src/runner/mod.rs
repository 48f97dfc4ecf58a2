mod executor;

pub use executor::{prepare, PreparedStep};

use crate::config::Scenario;
use crate::Result;
use pagebind::{
    ActionPipeline, ActionRepository, ElementLocator, FailureKind, LastAction, PipelineConfig,
    ScenarioContext,
};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Result of running a scenario.
#[derive(Debug)]
pub struct RunResult {
    /// Whether every step succeeded.
    pub success: bool,
    /// Error message of the failing step.
    pub error: Option<String>,
    /// Category of the failure, if any.
    pub failure_kind: Option<FailureKind>,
    /// Number of steps that completed successfully.
    pub steps_executed: usize,
    /// Total duration in milliseconds.
    pub duration_ms: u64,
    /// Last successful action, as recorded by the scenario hooks.
    pub last_action: Option<LastAction>,
}

/// Executes scenarios against one page.
pub struct Runner {
    pipeline: ActionPipeline,
    cancel: Mutex<CancellationToken>,
}

impl Runner {
    /// Create a runner with the standard catalog configured by `config`.
    pub fn new(locator: Arc<dyn ElementLocator>, config: &PipelineConfig) -> Result<Self> {
        let repository = ActionRepository::standard(config)?;
        debug!("Catalog has {} entries", repository.len());
        Ok(Self {
            pipeline: ActionPipeline::new(Arc::new(repository), locator),
            cancel: Mutex::new(CancellationToken::new()),
        })
    }

    /// Token that aborts the current run when cancelled.
    ///
    /// Once a cancelled run returns, the runner switches to a fresh token, so
    /// fetch it again before the next run.
    pub fn cancellation(&self) -> CancellationToken {
        self.cancel.lock().clone()
    }

    /// Run every step of the scenario, stopping at the first failure.
    pub async fn run(&self, scenario: &Scenario) -> Result<RunResult> {
        let steps = prepare(&scenario.steps)?;
        let context = ScenarioContext::new(scenario.name.as_str())
            .with_tags(scenario.tags.iter().cloned())
            .with_feature_tags(scenario.feature_tags.iter().cloned());

        let cancel = self.cancellation();
        let start = Instant::now();
        let mut steps_executed = 0;
        let mut failure = None;

        for (i, step) in steps.iter().enumerate() {
            info!(
                "Step {}: {} on '{}'",
                i + 1,
                step.action,
                step.context.property_name()
            );
            let result = self
                .pipeline
                .perform_named(step.action, step.context.as_ref(), &context, &cancel)
                .await;
            if let Some(err) = result.error() {
                warn!("Step {} failed: {}", i + 1, err);
                failure = Some(err.clone());
                break;
            }
            steps_executed += 1;
        }

        if cancel.is_cancelled() {
            debug!("Run was cancelled, replacing the cancellation token");
            *self.cancel.lock() = CancellationToken::new();
        }

        Ok(RunResult {
            success: failure.is_none(),
            failure_kind: failure.as_ref().map(|e| e.kind()),
            error: failure.map(|e| e.to_string()),
            steps_executed,
            duration_ms: start.elapsed().as_millis() as u64,
            last_action: context.get::<LastAction>(LastAction::KEY),
        })
    }
}
