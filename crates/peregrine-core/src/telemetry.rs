use serde::{Deserialize, Serialize};

/// Snapshot of a page's own performance telemetry, read once from inside
/// the browser's JavaScript context after the load event has fired.
///
/// Field names mirror the in-page snapshot object, so this deserializes
/// directly from the evaluation result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTelemetry {
    pub navigation: RawNavigationTiming,
    /// `first-contentful-paint` paint entry, ms since navigation start.
    pub first_contentful_paint: Option<f64>,
    /// The last largest-contentful-paint candidate, ms since navigation
    /// start. `None` when the browser reported no candidates.
    pub largest_contentful_paint: Option<f64>,
    #[serde(default)]
    pub layout_shifts: Vec<RawLayoutShift>,
    #[serde(default)]
    pub resources: Vec<RawResourceEntry>,
}

/// Legacy `performance.timing` milestones, in epoch milliseconds.
///
/// The browser reports `0` for milestones that never occurred, so derived
/// durations must treat a zero operand as "unavailable".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNavigationTiming {
    pub navigation_start: u64,
    pub request_start: u64,
    pub response_start: u64,
    pub response_end: u64,
    pub domain_lookup_start: u64,
    pub domain_lookup_end: u64,
    pub connect_start: u64,
    pub connect_end: u64,
    pub secure_connection_start: u64,
    pub dom_interactive: u64,
    pub dom_content_loaded_event_end: u64,
    pub load_event_end: u64,
}

/// One layout-shift entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLayoutShift {
    pub value: f64,
    /// Shifts caused by recent user input are excluded from CLS.
    pub had_recent_input: bool,
}

/// One resource-timing entry as reported by the browser, prior to
/// scheme filtering and classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawResourceEntry {
    pub name: String,
    pub initiator_type: String,
    /// Ms since navigation start, rounded in-page.
    pub start_time: u64,
    /// Ms, rounded in-page.
    pub duration: u64,
    /// Transferred bytes; `0` when the browser could not attribute a size.
    pub transfer_size: u64,
}
