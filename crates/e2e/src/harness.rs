//! App harness - scoped acquisition of a running application
//!
//! The harness serves the app on an OS-assigned port for the duration of
//! one test and tears it down on all exit paths, including assertion
//! failure. The typed test context stays readable on `AppInstance` the
//! whole time.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{info, warn};

use propflow_common::assemble::TestContext;
use propflow_web::{App, AppDefinition};

use crate::browser::{Browser, BrowserConfig, BrowserSession};
use crate::error::{E2eError, E2eResult};

/// Configuration for creating a harness
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Root directory for browser artifacts
    pub root: PathBuf,

    /// Timeout for app startup
    pub startup_timeout: Duration,

    /// Browser used by [`AppHarness::frontend`]
    pub browser: Browser,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("test-results"),
            startup_timeout: Duration::from_secs(30),
            browser: Browser::default(),
        }
    }
}

/// The started application, as visible to the test
#[derive(Debug, Clone)]
pub struct AppInstance {
    pub session_token: String,
    pub context: TestContext,
}

/// Handle to a running app, scoped to one test
pub struct AppHarness {
    app_instance: Option<AppInstance>,
    base_url: String,
    port: u16,
    server: JoinHandle<std::io::Result<()>>,
    config: HarnessConfig,
}

impl AppHarness {
    /// Invoke the app factory and serve the result until the harness is
    /// dropped. Returns once the app answers health checks.
    pub async fn create<F>(config: HarnessConfig, factory: F) -> E2eResult<Self>
    where
        F: FnOnce() -> propflow_common::Result<AppDefinition>,
    {
        let definition = factory().map_err(|e| E2eError::AppStartup(e.to_string()))?;
        let app = App::new(definition);
        let instance = AppInstance {
            session_token: app.session_token().to_string(),
            context: app.context().clone(),
        };

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let port = listener.local_addr()?.port();
        let base_url = format!("http://127.0.0.1:{}", port);

        info!("starting app on port {}", port);
        let server = tokio::spawn(propflow_web::serve(listener, Arc::new(app)));

        let mut harness = Self {
            app_instance: None,
            base_url,
            port,
            server,
            config,
        };
        harness.wait_for_healthy().await?;
        harness.app_instance = Some(instance);

        info!("app is healthy at {}", harness.base_url);
        Ok(harness)
    }

    /// Wait for the app to respond to health checks
    async fn wait_for_healthy(&self) -> E2eResult<()> {
        let health_url = format!("{}/health", self.base_url);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(2))
            .build()?;

        let start = std::time::Instant::now();
        let mut attempts = 0;

        while start.elapsed() < self.config.startup_timeout {
            attempts += 1;

            match client.get(&health_url).send().await {
                Ok(resp) if resp.status().is_success() => {
                    return Ok(());
                }
                Ok(resp) => {
                    warn!("health check returned {}", resp.status());
                }
                Err(e) => {
                    if attempts == 1 {
                        info!("waiting for app to start...");
                    }
                    // connection refused is expected while the server task spins up
                    if !e.is_connect() {
                        warn!("health check error: {}", e);
                    }
                }
            }

            sleep(Duration::from_millis(100)).await;
        }

        Err(E2eError::HealthCheck(attempts))
    }

    /// The running app, if startup completed
    pub fn app_instance(&self) -> Option<&AppInstance> {
        self.app_instance.as_ref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Browser session bound to this harness
    pub fn frontend(&self) -> E2eResult<BrowserSession> {
        BrowserSession::new(BrowserConfig {
            base_url: self.base_url.clone(),
            artifact_dir: self.config.root.join("browser"),
            browser: self.config.browser,
            ..BrowserConfig::default()
        })
    }

    /// Stop the app
    pub fn stop(&mut self) {
        if self.app_instance.take().is_some() {
            info!("stopping app on port {}", self.port);
        }
        self.server.abort();
    }
}

impl Drop for AppHarness {
    fn drop(&mut self) {
        self.stop();
    }
}
