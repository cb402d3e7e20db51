pub mod normalizer;

pub use normalizer::MetricsNormalizer;

use crate::resource::ResourceSummary;
use serde::{Deserialize, Serialize};

/// The Core Web Vitals thresholds. Values strictly below the first bound
/// are good, strictly below the second need improvement, anything else is
/// poor.
#[derive(Debug, Clone, Copy)]
pub enum WebVital {
    /// Largest Contentful Paint, ms.
    Lcp,
    /// First Input Delay, ms.
    Fid,
    /// Cumulative Layout Shift, unitless.
    Cls,
}

impl WebVital {
    fn thresholds(&self) -> (f64, f64) {
        match self {
            WebVital::Lcp => (2500.0, 4000.0),
            WebVital::Fid => (100.0, 300.0),
            WebVital::Cls => (0.1, 0.25),
        }
    }
}

/// Qualitative grade for a measured vital.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rating {
    Good,
    NeedsImprovement,
    Poor,
    Unknown,
}

impl Rating {
    /// Grade a measurement against a vital's thresholds. A missing
    /// measurement is `Unknown`, never guessed.
    pub fn grade(vital: WebVital, value: Option<f64>) -> Self {
        let Some(value) = value else {
            return Rating::Unknown;
        };

        let (good, needs_improvement) = vital.thresholds();
        if value < good {
            Rating::Good
        } else if value < needs_improvement {
            Rating::NeedsImprovement
        } else {
            Rating::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Good => "good",
            Rating::NeedsImprovement => "needs-improvement",
            Rating::Poor => "poor",
            Rating::Unknown => "unknown",
        }
    }
}

/// A vital's measured value paired with its grade.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RatedMetric {
    pub value: Option<f64>,
    pub rating: Rating,
}

impl RatedMetric {
    pub fn new(vital: WebVital, value: Option<f64>) -> Self {
        RatedMetric {
            value,
            rating: Rating::grade(vital, value),
        }
    }
}

/// The three Core Web Vitals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreWebVitals {
    pub lcp: RatedMetric,
    pub fid: RatedMetric,
    pub cls: RatedMetric,
}

/// Durations derived from the navigation-timing phases, all ms relative
/// to navigation start. `None` marks a phase the browser did not report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationTiming {
    pub ttfb: Option<u64>,
    pub dom_content_loaded: Option<u64>,
    pub load_complete: Option<u64>,
    pub dom_interactive: Option<u64>,
}

/// Supplementary paint, interactivity and connection metrics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalMetrics {
    pub fcp: Option<f64>,
    pub tti: Option<u64>,
    pub tbt: Option<f64>,
    pub speed_index: Option<u64>,
    pub server_response_time: Option<u64>,
    pub dns_lookup_time: Option<u64>,
    pub tcp_connection_time: Option<u64>,
    pub tls_negotiation_time: Option<u64>,
}

/// The complete derived-metrics block of a report. The serialized member
/// names are the dashboard contract and stay spelled out in full.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub core_web_vitals: CoreWebVitals,
    #[serde(rename = "navigationTiming")]
    pub navigation: NavigationTiming,
    #[serde(rename = "additionalMetrics")]
    pub additional: AdditionalMetrics,
    #[serde(rename = "resourceSummary")]
    pub resources: ResourceSummary,
}
