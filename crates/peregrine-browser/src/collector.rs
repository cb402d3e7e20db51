use crate::Result;
use async_trait::async_trait;
use peregrine_core::telemetry::RawTelemetry;
use url::Url;

/// Installed on every new document before any page script runs. Buffers
/// the observer-only entry types into a window global so the snapshot can
/// read them after the load finishes.
pub const INSTALL_OBSERVERS_JS: &str = r#"
(() => {
  window.__peregrine = { lcp: null, layoutShifts: [] };
  try {
    new PerformanceObserver((list) => {
      const entries = list.getEntries();
      if (entries.length > 0) {
        window.__peregrine.lcp = entries[entries.length - 1].startTime;
      }
    }).observe({ type: 'largest-contentful-paint', buffered: true });
  } catch (e) {}
  try {
    new PerformanceObserver((list) => {
      for (const entry of list.getEntries()) {
        window.__peregrine.layoutShifts.push({
          value: entry.value,
          hadRecentInput: entry.hadRecentInput,
        });
      }
    }).observe({ type: 'layout-shift', buffered: true });
  } catch (e) {}
})();
"#;

/// Evaluated once after the load settles. Returns the raw telemetry
/// snapshot in the shape `RawTelemetry` deserializes from.
pub const TELEMETRY_SNAPSHOT_JS: &str = r#"
(() => {
  const timing = performance.timing;
  const store = window.__peregrine || { lcp: null, layoutShifts: [] };

  let lcp = null;
  const lcpEntries = performance.getEntriesByType('largest-contentful-paint');
  if (lcpEntries.length > 0) {
    lcp = lcpEntries[lcpEntries.length - 1].startTime;
  } else if (store.lcp !== null) {
    lcp = store.lcp;
  }

  const paints = performance.getEntriesByType('paint');
  const fcpEntry = paints.find((p) => p.name === 'first-contentful-paint');

  return {
    navigation: {
      navigationStart: timing.navigationStart,
      requestStart: timing.requestStart,
      responseStart: timing.responseStart,
      responseEnd: timing.responseEnd,
      domainLookupStart: timing.domainLookupStart,
      domainLookupEnd: timing.domainLookupEnd,
      connectStart: timing.connectStart,
      connectEnd: timing.connectEnd,
      secureConnectionStart: timing.secureConnectionStart,
      domInteractive: timing.domInteractive,
      domContentLoadedEventEnd: timing.domContentLoadedEventEnd,
      loadEventEnd: timing.loadEventEnd,
    },
    firstContentfulPaint: fcpEntry ? fcpEntry.startTime : null,
    largestContentfulPaint: lcp,
    layoutShifts: store.layoutShifts,
    resources: performance.getEntriesByType('resource').map((r) => ({
      name: r.name,
      initiatorType: r.initiatorType,
      startTime: Math.round(r.startTime),
      duration: Math.round(r.duration),
      transferSize: r.transferSize || 0,
    })),
  };
})()
"#;

/// Drives a browser and pulls one telemetry snapshot per page load.
///
/// The two operations are split so callers can bound the collection
/// phase with a deadline while still guaranteeing the shutdown runs.
#[async_trait]
pub trait TelemetryCollector {
    /// Navigate to the URL, wait out the load, and extract the raw
    /// telemetry snapshot from the page.
    async fn collect(&mut self, url: &Url) -> Result<RawTelemetry>;

    /// Release the underlying browser. Safe to call more than once.
    async fn shutdown(&mut self) -> Result<()>;
}
