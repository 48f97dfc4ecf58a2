use clap::Parser;
use pagebind::ElementLocator;
use pagebind_runner::{FixturePage, Runner, Scenario};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "pagebind-runner")]
#[command(about = "Run page-object scenarios through the action pipeline")]
#[command(version)]
struct Cli {
    /// Scenario file to run
    scenario: PathBuf,

    /// Default wait timeout in milliseconds (overrides settings)
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Run the browser in headless mode (overrides scenario)
    #[arg(long)]
    headless: bool,

    /// Verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Validate scenario without running
    #[arg(long)]
    check: bool,

    /// Quiet mode (only errors)
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> pagebind_runner::Result<()> {
    let cli = Cli::parse();

    let level = if cli.quiet {
        Level::ERROR
    } else {
        match cli.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            _ => Level::DEBUG,
        }
    };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    let mut scenario = Scenario::load(&cli.scenario)?;

    if let Some(ms) = cli.timeout_ms {
        scenario.settings.wait.timeout_ms = ms;
        scenario.settings.validate()?;
    }

    if cli.check {
        println!("Scenario valid: {}", scenario.name);
        match scenario.browser {
            Some(ref browser) => println!("  Target: {}", browser.url),
            None => println!("  Page: {} fixture properties", scenario.page.properties.len()),
        }
        println!("  Steps: {}", scenario.steps.len());
        for (i, step) in scenario.steps.iter().enumerate() {
            println!("    {}. {} '{}'", i + 1, step.name(), step.property());
        }
        println!("  Wait timeout: {}ms", scenario.settings.wait.timeout_ms);
        return Ok(());
    }

    if cli.headless {
        if let Some(ref mut browser) = scenario.browser {
            browser.headless = true;
        }
    }

    println!("Running: {}", scenario.name);

    #[cfg(feature = "browser")]
    let session = match scenario.browser {
        Some(ref target) => Some(pagebind_runner::BrowserSession::launch(target).await?),
        None => None,
    };

    #[cfg(feature = "browser")]
    let locator: Arc<dyn ElementLocator> = match (&session, &scenario.browser) {
        (Some(session), Some(target)) => Arc::new(session.locator(target)),
        _ => Arc::new(FixturePage::new(&scenario.page)),
    };

    #[cfg(not(feature = "browser"))]
    let locator: Arc<dyn ElementLocator> = {
        if scenario.browser.is_some() {
            warn!("Built without the `browser` feature; running against the page fixture");
        }
        Arc::new(FixturePage::new(&scenario.page))
    };

    let runner = Runner::new(locator, &scenario.settings)?;

    let cancel = runner.cancellation();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling run");
            cancel.cancel();
        }
    });

    let result = runner.run(&scenario).await?;

    println!();
    if result.success {
        println!("✓ Success");
    } else {
        println!("✗ Failed");
        if let Some(ref error) = result.error {
            println!("  Error: {}", error);
        }
        if let Some(kind) = result.failure_kind {
            println!("  Kind: {:?}", kind);
        }
    }
    println!("  Steps: {}/{}", result.steps_executed, scenario.steps.len());
    println!("  Duration: {}ms", result.duration_ms);
    if let Some(ref last) = result.last_action {
        println!("  Last action: {} on '{}'", last.action, last.property);
    }

    #[cfg(feature = "browser")]
    if let Some(session) = session {
        session.close().await?;
    }

    if !result.success {
        std::process::exit(1);
    }

    Ok(())
}
