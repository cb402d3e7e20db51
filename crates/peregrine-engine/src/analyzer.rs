use crate::request::AnalysisRequest;
use crate::session::collect_with_teardown;
use crate::{Error, Result};
use async_trait::async_trait;
use peregrine_advisor::SuggestionEngine;
use peregrine_browser::{ChromeSession, SessionConfig};
use peregrine_core::metrics::MetricsNormalizer;
use peregrine_core::report::AnalysisReport;
use peregrine_core::resource::{ResourceSummary, classify_entries};
use peregrine_core::telemetry::RawTelemetry;
use std::time::{Duration, Instant};

const DEFAULT_DEADLINE: Duration = Duration::from_secs(60);

/// Limits for one full analysis.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub session: SessionConfig,
    /// Cap on browser launch plus collection. Teardown runs outside it.
    pub deadline: Duration,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            deadline: DEFAULT_DEADLINE,
        }
    }
}

/// Anything that can turn a validated request into a report. The pool is
/// generic over this, and tests substitute a fake.
#[async_trait]
pub trait UrlAnalyzer: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisReport>;
}

/// The real analyzer. Each request gets a fresh browser so page state
/// can never bleed between analyses.
pub struct PageAnalyzer {
    config: AnalyzerConfig,
}

impl PageAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisReport> {
        tracing::info!("Starting analysis of {}", request.as_str());
        let started = Instant::now();
        let deadline = self.config.deadline;

        let session = tokio::time::timeout(
            deadline,
            ChromeSession::launch(self.config.session.clone()),
        )
        .await
        .map_err(|_| Error::Deadline {
            url: request.as_str().to_string(),
            limit_secs: deadline.as_secs(),
        })?
        .map_err(|e| Error::Session {
            url: request.as_str().to_string(),
            source: e,
        })?;

        // Collection gets whatever the launch left of the budget. The
        // deadline error reports the full configured limit either way.
        let remaining = deadline.saturating_sub(started.elapsed());
        let telemetry = collect_with_teardown(session, request.url(), remaining)
            .await
            .map_err(|e| match e {
                Error::Deadline { url, .. } => Error::Deadline {
                    url,
                    limit_secs: deadline.as_secs(),
                },
                other => other,
            })?;

        let report = build_report(request, &telemetry);
        tracing::info!(
            "Analysis of {} produced {} suggestions",
            request.as_str(),
            report.suggestions.len()
        );

        Ok(report)
    }
}

#[async_trait]
impl UrlAnalyzer for PageAnalyzer {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisReport> {
        PageAnalyzer::analyze(self, request).await
    }
}

/// Pure assembly from snapshot to report. Deterministic given the
/// telemetry, which keeps the whole derivation testable without a
/// browser.
pub fn build_report(request: &AnalysisRequest, telemetry: &RawTelemetry) -> AnalysisReport {
    let mut resources = classify_entries(&telemetry.resources);
    resources.sort_by_key(|entry| entry.start_time);

    let summary = ResourceSummary::from_entries(&resources);
    let metrics = MetricsNormalizer::normalize(telemetry, summary);
    let suggestions = SuggestionEngine::generate(&metrics);

    AnalysisReport::new(request.as_str(), metrics, resources, suggestions)
}
