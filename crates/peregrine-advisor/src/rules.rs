use peregrine_core::metrics::Metrics;
use peregrine_core::suggestion::{Category, Severity, Suggestion};

/// Script payload above this many transferred bytes warrants splitting.
const SCRIPT_WEIGHT_LIMIT: u64 = 500_000;
/// Request count above this suggests bundling.
const REQUEST_COUNT_LIMIT: usize = 50;
/// Time to first byte above this many ms points at the server.
const TTFB_LIMIT_MS: u64 = 600;
/// Image payload above this many transferred bytes warrants optimization.
const IMAGE_WEIGHT_LIMIT: u64 = 1_000_000;
/// LCP above this many ms is outside the good band.
const LCP_LIMIT_MS: f64 = 2500.0;
/// CLS above this is outside the good band.
const CLS_LIMIT: f64 = 0.1;
/// Stylesheet count above this suggests combining.
const STYLESHEET_COUNT_LIMIT: usize = 5;
/// A full load under this many ms earns the all-clear note.
const FAST_LOAD_MS: u64 = 3000;

pub struct SuggestionEngine;

impl SuggestionEngine {
    /// Evaluate every rule against the derived metrics.
    ///
    /// Rules whose inputs were never measured stay silent. When nothing
    /// fires and the page demonstrably loaded fast, a single all-clear
    /// note is emitted instead of an empty list.
    pub fn generate(metrics: &Metrics) -> Vec<Suggestion> {
        let mut suggestions = Vec::new();
        let breakdown = &metrics.resources.by_type;

        if breakdown.script.size > SCRIPT_WEIGHT_LIMIT {
            suggestions.push(Suggestion::new(
                Severity::Warning,
                Category::JavaScript,
                format!(
                    "Large JavaScript files detected ({:.2} MB). Consider code splitting and lazy loading.",
                    megabytes(breakdown.script.size)
                ),
            ));
        }

        if metrics.resources.total_requests > REQUEST_COUNT_LIMIT {
            suggestions.push(Suggestion::new(
                Severity::Warning,
                Category::Network,
                format!(
                    "High number of requests ({}). Consider bundling resources or using HTTP/2.",
                    metrics.resources.total_requests
                ),
            ));
        }

        if let Some(ttfb) = metrics.navigation.ttfb {
            if ttfb > TTFB_LIMIT_MS {
                suggestions.push(Suggestion::new(
                    Severity::Warning,
                    Category::Server,
                    format!(
                        "Slow server response time ({} ms). Optimize server-side processing or consider a CDN.",
                        ttfb
                    ),
                ));
            }
        }

        if breakdown.image.size > IMAGE_WEIGHT_LIMIT {
            suggestions.push(Suggestion::new(
                Severity::Warning,
                Category::Images,
                format!(
                    "Large image files detected ({:.2} MB). Use image optimization and modern formats like WebP.",
                    megabytes(breakdown.image.size)
                ),
            ));
        }

        if let Some(lcp) = metrics.core_web_vitals.lcp.value {
            if lcp > LCP_LIMIT_MS {
                suggestions.push(Suggestion::new(
                    Severity::Error,
                    Category::CoreWebVitals,
                    format!(
                        "Largest Contentful Paint is slow ({:.2} s). Optimize loading of largest visible element.",
                        lcp / 1000.0
                    ),
                ));
            }
        }

        if let Some(cls) = metrics.core_web_vitals.cls.value {
            if cls > CLS_LIMIT {
                suggestions.push(Suggestion::new(
                    Severity::Error,
                    Category::CoreWebVitals,
                    format!(
                        "Cumulative Layout Shift is high ({:.3}). Reserve space for images and ads to prevent layout shifts.",
                        cls
                    ),
                ));
            }
        }

        if breakdown.stylesheet.count > STYLESHEET_COUNT_LIMIT {
            suggestions.push(Suggestion::new(
                Severity::Info,
                Category::Css,
                format!(
                    "Multiple CSS files ({}). Consider combining stylesheets.",
                    breakdown.stylesheet.count
                ),
            ));
        }

        if suggestions.is_empty() {
            if let Some(load_complete) = metrics.navigation.load_complete {
                if load_complete < FAST_LOAD_MS {
                    suggestions.push(Suggestion::new(
                        Severity::Success,
                        Category::Overall,
                        "Great performance! Your site loads quickly.",
                    ));
                }
            }
        }

        // Stable sort: severities group up, rule order holds within each.
        suggestions.sort_by_key(|suggestion| suggestion.severity);

        tracing::debug!("Generated {} suggestions", suggestions.len());

        suggestions
    }
}

fn megabytes(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}
