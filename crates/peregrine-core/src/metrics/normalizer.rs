use crate::metrics::{
    AdditionalMetrics, CoreWebVitals, Metrics, NavigationTiming, RatedMetric, WebVital,
};
use crate::resource::ResourceSummary;
use crate::telemetry::RawTelemetry;

/// Estimated main-thread quiet window after interactivity, ms. Used by the
/// blocking-time approximation below.
const BLOCKING_TIME_ALLOWANCE: f64 = 50.0;

/// Turns a raw telemetry snapshot into graded, navigation-relative metrics.
pub struct MetricsNormalizer;

impl MetricsNormalizer {
    pub fn normalize(telemetry: &RawTelemetry, resources: ResourceSummary) -> Metrics {
        let nav = &telemetry.navigation;
        let start = nav.navigation_start;

        let navigation = NavigationTiming {
            // First-byte wait starts when the request goes out, not at
            // navigation start.
            ttfb: elapsed_between(nav.request_start, nav.response_start),
            dom_content_loaded: elapsed_between(start, nav.dom_content_loaded_event_end),
            load_complete: elapsed_between(start, nav.load_event_end),
            dom_interactive: elapsed_between(start, nav.dom_interactive),
        };

        let fcp = telemetry.first_contentful_paint;

        // Pages without image or text content never emit an LCP candidate.
        // Treat the full load as the largest paint in that case rather
        // than reporting nothing for a page that did render.
        let lcp = telemetry
            .largest_contentful_paint
            .or(navigation.load_complete.map(|ms| ms as f64));

        let cls = cumulative_layout_shift(telemetry);

        let tti = navigation.dom_interactive;
        let tbt = match (tti, fcp) {
            (Some(tti), Some(fcp)) => {
                Some((tti as f64 - fcp - BLOCKING_TIME_ALLOWANCE).max(0.0))
            }
            _ => None,
        };
        let speed_index = match (fcp, navigation.load_complete) {
            (Some(fcp), Some(load)) => Some((fcp + (load as f64 - fcp) * 0.5).round() as u64),
            _ => None,
        };

        let additional = AdditionalMetrics {
            fcp,
            tti,
            tbt,
            speed_index,
            server_response_time: elapsed_between(nav.request_start, nav.response_end),
            dns_lookup_time: elapsed_between(nav.domain_lookup_start, nav.domain_lookup_end),
            tcp_connection_time: elapsed_between(nav.connect_start, nav.connect_end),
            tls_negotiation_time: tls_negotiation_time(
                nav.secure_connection_start,
                nav.connect_end,
            ),
        };

        tracing::debug!(
            "Normalized metrics: lcp={:?} cls={:?} load_complete={:?}",
            lcp,
            cls,
            navigation.load_complete
        );

        Metrics {
            core_web_vitals: CoreWebVitals {
                lcp: RatedMetric::new(WebVital::Lcp, lcp),
                // First Input Delay needs a real user interaction, which a
                // synthetic load never produces.
                fid: RatedMetric::new(WebVital::Fid, None),
                cls: RatedMetric::new(WebVital::Cls, cls),
            },
            navigation,
            additional,
            resources,
        }
    }
}

/// Difference between two epoch timestamps. A zero operand means the
/// browser never recorded that mark, and an end before its start means
/// the pair is unusable. Both produce `None`.
fn elapsed_between(start: u64, end: u64) -> Option<u64> {
    if start == 0 || end == 0 {
        return None;
    }
    end.checked_sub(start)
}

/// Shift sum over the observed window, excluding shifts caused by recent
/// user input. An empty observation list means the observer never ran,
/// which is distinct from a page that measurably did not shift.
fn cumulative_layout_shift(telemetry: &RawTelemetry) -> Option<f64> {
    if telemetry.layout_shifts.is_empty() {
        return None;
    }

    Some(
        telemetry
            .layout_shifts
            .iter()
            .filter(|shift| !shift.had_recent_input)
            .map(|shift| shift.value)
            .sum(),
    )
}

/// A `secureConnectionStart` of zero means no TLS handshake happened,
/// which is a measured zero, not a missing value.
fn tls_negotiation_time(secure_connection_start: u64, connect_end: u64) -> Option<u64> {
    if secure_connection_start == 0 {
        return Some(0);
    }
    connect_end.checked_sub(secure_connection_start)
}
