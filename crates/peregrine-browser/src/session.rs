use crate::collector::{INSTALL_OBSERVERS_JS, TELEMETRY_SNAPSHOT_JS, TelemetryCollector};
use crate::{ChromeFinder, Error, Result};
use async_trait::async_trait;
use chromiumoxide::Page;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::emulation::SetUserAgentOverrideParams;
use chromiumoxide::cdp::browser_protocol::page::AddScriptToEvaluateOnNewDocumentParams;
use chromiumoxide::handler::viewport::Viewport;
use futures::StreamExt;
use peregrine_core::telemetry::RawTelemetry;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;
use tokio::task::JoinHandle;
use url::Url;

/// Desktop Chrome user agent presented to analyzed pages.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const DEFAULT_VIEWPORT_WIDTH: u32 = 1920;
const DEFAULT_VIEWPORT_HEIGHT: u32 = 1080;
const DEFAULT_NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(2);
const DEFAULT_LAUNCH_TIMEOUT: Duration = Duration::from_secs(60);

/// How a browser session is launched and how long each phase may take.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub user_agent: String,
    /// Explicit browser binary. When unset the finder probes PATH and
    /// platform defaults.
    pub chrome_path: Option<PathBuf>,
    pub navigation_timeout: Duration,
    /// Extra wait after the load event so late paints and shifts land.
    pub settle_delay: Duration,
    pub launch_timeout: Duration,
    pub no_sandbox: bool,
    pub headed: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            chrome_path: None,
            navigation_timeout: DEFAULT_NAVIGATION_TIMEOUT,
            settle_delay: DEFAULT_SETTLE_DELAY,
            launch_timeout: DEFAULT_LAUNCH_TIMEOUT,
            no_sandbox: true,
            headed: false,
        }
    }
}

/// One launched Chrome with a single prepared page.
///
/// The temp profile lives as long as the session. Dropping the session
/// kills the browser process through the underlying handle, so an
/// aborted analysis cannot leak a Chrome.
pub struct ChromeSession {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
    config: SessionConfig,
    _profile_dir: TempDir,
    closed: bool,
}

impl ChromeSession {
    /// Launch a fresh browser and prepare a page with the analysis
    /// viewport, user agent and telemetry observers applied.
    pub async fn launch(config: SessionConfig) -> Result<Self> {
        let chrome_path = ChromeFinder::new(config.chrome_path.clone()).find()?;
        tracing::info!("Launching browser: {}", chrome_path.display());

        let profile_dir = tempfile::tempdir()?;

        let mut builder = BrowserConfig::builder()
            .chrome_executable(&chrome_path)
            .window_size(config.viewport_width, config.viewport_height)
            .viewport(Viewport {
                width: config.viewport_width,
                height: config.viewport_height,
                ..Default::default()
            })
            .user_data_dir(profile_dir.path())
            .launch_timeout(config.launch_timeout)
            .arg("--disable-dev-shm-usage");

        if config.no_sandbox {
            builder = builder.no_sandbox();
        }
        if config.headed {
            builder = builder.with_head();
        }

        let browser_config = builder.build().map_err(Error::Browser)?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| Error::Browser(format!("Failed to launch Chrome: {}", e)))?;

        // The handler must be polled for any browser command to make
        // progress.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("Browser handler event error (continuing): {}", e);
                }
            }
        });

        let page = browser.new_page("about:blank").await?;

        page.execute(SetUserAgentOverrideParams::new(config.user_agent.clone()))
            .await?;
        page.execute(AddScriptToEvaluateOnNewDocumentParams::new(
            INSTALL_OBSERVERS_JS,
        ))
        .await?;

        tracing::info!("Browser session ready");

        Ok(Self {
            browser,
            page,
            handler_task,
            config,
            _profile_dir: profile_dir,
            closed: false,
        })
    }
}

#[async_trait]
impl TelemetryCollector for ChromeSession {
    async fn collect(&mut self, url: &Url) -> Result<RawTelemetry> {
        tracing::info!("Navigating to {}", url);

        let navigation = async {
            self.page.goto(url.as_str()).await?;
            self.page.wait_for_navigation().await?;
            Ok::<_, chromiumoxide::error::CdpError>(())
        };

        match tokio::time::timeout(self.config.navigation_timeout, navigation).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(classify_navigation_failure(&e.to_string())),
            Err(_) => {
                return Err(Error::NavigationTimeout(
                    self.config.navigation_timeout.as_millis() as u64,
                ));
            }
        }

        tracing::debug!(
            "Load event fired, settling for {} ms",
            self.config.settle_delay.as_millis()
        );
        tokio::time::sleep(self.config.settle_delay).await;

        let snapshot = self
            .page
            .evaluate(TELEMETRY_SNAPSHOT_JS)
            .await
            .map_err(|e| Error::Evaluation(format!("Telemetry snapshot failed: {}", e)))?;

        let telemetry: RawTelemetry = snapshot.into_value().map_err(|e| {
            Error::Evaluation(format!("Telemetry snapshot had unexpected shape: {}", e))
        })?;

        tracing::info!(
            "Collected telemetry with {} resource entries",
            telemetry.resources.len()
        );

        Ok(telemetry)
    }

    async fn shutdown(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        tracing::debug!("Closing browser session");

        match self.browser.close().await {
            Ok(_) => {
                if let Err(e) = self.browser.wait().await {
                    tracing::warn!("Browser did not exit cleanly: {}", e);
                }
            }
            Err(e) => {
                tracing::warn!("Browser close failed, killing process: {}", e);
                if let Some(Err(e)) = self.browser.kill().await {
                    tracing::warn!("Browser kill failed: {}", e);
                }
            }
        }

        self.handler_task.abort();
        Ok(())
    }
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        self.handler_task.abort();
    }
}

/// Network-level failures mean the URL itself was unreachable. Anything
/// else is reported as a load failure with the protocol message attached.
fn classify_navigation_failure(message: &str) -> Error {
    if message.contains("ERR_NAME_NOT_RESOLVED") || message.contains("ERR_CONNECTION_REFUSED") {
        Error::Unreachable
    } else {
        Error::Navigation(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_session_config() {
        let config = SessionConfig::default();
        assert_eq!(config.viewport_width, 1920);
        assert_eq!(config.viewport_height, 1080);
        assert_eq!(config.navigation_timeout, Duration::from_secs(30));
        assert_eq!(config.settle_delay, Duration::from_secs(2));
        assert_eq!(config.launch_timeout, Duration::from_secs(60));
        assert!(config.no_sandbox);
        assert!(!config.headed);
        assert!(config.user_agent.contains("Chrome/120"));
    }

    #[test]
    fn test_dns_failure_is_unreachable() {
        let err = classify_navigation_failure("net::ERR_NAME_NOT_RESOLVED at https://nope.test");
        assert_eq!(err.to_string(), "Could not reach the specified URL");
    }

    #[test]
    fn test_refused_connection_is_unreachable() {
        let err = classify_navigation_failure("net::ERR_CONNECTION_REFUSED");
        assert_eq!(err.to_string(), "Could not reach the specified URL");
    }

    #[test]
    fn test_other_failures_keep_the_protocol_message() {
        let err = classify_navigation_failure("net::ERR_CERT_AUTHORITY_INVALID");
        assert_eq!(
            err.to_string(),
            "Failed to load URL: net::ERR_CERT_AUTHORITY_INVALID"
        );
    }
}
