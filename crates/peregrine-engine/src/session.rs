use crate::{Error, Result};
use peregrine_browser::TelemetryCollector;
use peregrine_core::telemetry::RawTelemetry;
use std::time::Duration;
use url::Url;

/// Run the collection phase under a time budget, then shut the collector
/// down exactly once before surfacing the outcome.
///
/// The shutdown is unconditional: a page that timed out or errored still
/// has a live browser behind it, and that browser must not outlive the
/// analysis.
pub async fn collect_with_teardown<C>(
    mut collector: C,
    url: &Url,
    budget: Duration,
) -> Result<RawTelemetry>
where
    C: TelemetryCollector + Send,
{
    let outcome = tokio::time::timeout(budget, collector.collect(url)).await;

    if let Err(e) = collector.shutdown().await {
        tracing::warn!("Browser teardown for {} failed: {}", url, e);
    }

    match outcome {
        Ok(Ok(telemetry)) => Ok(telemetry),
        Ok(Err(e)) => Err(Error::Session {
            url: url.to_string(),
            source: e,
        }),
        Err(_) => Err(Error::Deadline {
            url: url.to_string(),
            limit_secs: budget.as_secs(),
        }),
    }
}
