//! Browser-driven verification entry point
//!
//! This binary boots the app, loads the page in a real browser, and
//! asserts every recorded identifier resolves to a live element.
//! Run with: cargo test --package propflow-e2e --test e2e

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info, warn};

use propflow_common::assemble::assemble;
use propflow_common::catalog;
use propflow_e2e::{
    AppHarness, BrowserSession, E2eResult, HarnessConfig, MatrixSpec, Verifier, VerifyOptions,
};
use propflow_web::AppDefinition;

#[derive(Parser, Debug)]
#[command(name = "propflow-e2e")]
#[command(about = "Browser verification for Propflow")]
struct Args {
    /// Path to a matrix spec YAML (defaults to the built-in showcase)
    #[arg(short, long)]
    spec: Option<PathBuf>,

    /// Browser to use (chromium, firefox, webkit)
    #[arg(long, default_value = "chromium")]
    browser: propflow_e2e::browser::Browser,

    /// Also compare construction params against rendered attributes
    #[arg(long)]
    verify_attributes: bool,

    /// Output directory for results and browser artifacts
    #[arg(short, long, default_value = "test-results")]
    output: PathBuf,

    /// Timeout for app startup, in seconds
    #[arg(long, default_value = "30")]
    startup_timeout: u64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let rt = tokio::runtime::Runtime::new().expect("failed to create tokio runtime");
    match rt.block_on(run(args)) {
        Ok(true) => std::process::exit(0),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}

async fn run(args: Args) -> E2eResult<bool> {
    if BrowserSession::check_playwright_installed().is_err() {
        warn!("Playwright not installed; skipping browser verification");
        return Ok(true);
    }

    let matrix = match &args.spec {
        Some(path) => {
            let spec = MatrixSpec::from_file(path)?;
            info!("using matrix spec '{}' ({})", spec.name, spec.description);
            spec.into_matrix()
        }
        None => catalog::showcase_matrix(),
    };

    let harness_config = HarnessConfig {
        root: args.output.clone(),
        startup_timeout: Duration::from_secs(args.startup_timeout),
        browser: args.browser,
    };
    let harness = AppHarness::create(harness_config, move || {
        let registry = catalog::registry();
        let assembly = assemble(&registry, &matrix);
        for failure in &assembly.report.failures {
            warn!(component = %failure.component, error = %failure.error, "component skipped");
        }
        Ok(AppDefinition {
            page: assembly.page,
            context: assembly.context,
        })
    })
    .await?;

    let session = harness.frontend()?;
    let verifier = Verifier::with_options(VerifyOptions {
        verify_attributes: args.verify_attributes,
    });

    match verifier.verify(harness.app_instance(), &session) {
        Ok(report) => {
            let path = report.write(&args.output)?;
            info!(
                "✓ {} element(s) verified in {} ms (results: {})",
                report.total,
                report.duration_ms,
                path.display()
            );
            Ok(true)
        }
        Err(e) => {
            error!("✗ verification failed: {}", e);
            Ok(false)
        }
    }
}
