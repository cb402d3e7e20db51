pub mod reader;
pub mod writer;

pub use reader::ReportReader;
pub use writer::ReportWriter;

use crate::metrics::Metrics;
use crate::resource::ResourceEntry;
use crate::suggestion::Suggestion;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A complete analysis document for one page load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub url: String,
    /// RFC 3339 UTC timestamp with millisecond precision.
    pub timestamp: String,
    pub metrics: Metrics,
    pub resources: Vec<ResourceEntry>,
    pub suggestions: Vec<Suggestion>,
}

impl AnalysisReport {
    /// Assemble a report stamped with the current time.
    pub fn new(
        url: impl Into<String>,
        metrics: Metrics,
        resources: Vec<ResourceEntry>,
        suggestions: Vec<Suggestion>,
    ) -> Self {
        AnalysisReport {
            url: url.into(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            metrics,
            resources,
            suggestions,
        }
    }
}

#[cfg(test)]
pub(crate) const SAMPLE_REPORT_JSON: &str = r#"{
    "url": "https://example.com",
    "timestamp": "2026-08-22T10:00:00.000Z",
    "metrics": {
        "coreWebVitals": {
            "lcp": {"value": 1400.0, "rating": "good"},
            "fid": {"value": null, "rating": "unknown"},
            "cls": {"value": 0.02, "rating": "good"}
        },
        "navigationTiming": {
            "ttfb": 160,
            "domContentLoaded": 1100,
            "loadComplete": 2000,
            "domInteractive": 900
        },
        "additionalMetrics": {
            "fcp": 650.0,
            "tti": 900,
            "tbt": 200.0,
            "speedIndex": 1325,
            "serverResponseTime": 210,
            "dnsLookupTime": 10,
            "tcpConnectionTime": 8,
            "tlsNegotiationTime": 5
        },
        "resourceSummary": {
            "totalRequests": 1,
            "totalSize": 1000,
            "byType": {
                "script": {"count": 1, "size": 1000},
                "stylesheet": {"count": 0, "size": 0},
                "image": {"count": 0, "size": 0},
                "font": {"count": 0, "size": 0},
                "other": {"count": 0, "size": 0}
            }
        }
    },
    "resources": [
        {"name": "https://example.com/app.js", "type": "script", "startTime": 10, "duration": 25, "size": 1000}
    ],
    "suggestions": [
        {"type": "success", "category": "Overall", "message": "Great performance! Your site loads quickly."}
    ]
}"#;
