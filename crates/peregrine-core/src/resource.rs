use crate::telemetry::RawResourceEntry;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

lazy_static! {
    static ref FONT_EXTENSION: Regex = Regex::new(r"(?i)\.(woff2?|ttf|otf)$").unwrap();
}

/// Schemes that never correspond to network fetches and are dropped
/// before classification.
const NON_NETWORK_SCHEMES: &[&str] = &["data:", "chrome-extension://", "moz-extension://"];

/// Semantic category of a loaded resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Script,
    Stylesheet,
    Image,
    Font,
    Xhr,
    Document,
    Other,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Script => "script",
            ResourceKind::Stylesheet => "stylesheet",
            ResourceKind::Image => "image",
            ResourceKind::Font => "font",
            ResourceKind::Xhr => "xhr",
            ResourceKind::Document => "document",
            ResourceKind::Other => "other",
        }
    }

    /// Map a raw initiator category that directly names one of the kinds.
    /// Unrecognized categories default to `Other`.
    pub fn from_initiator(initiator: &str) -> Self {
        match initiator {
            "script" => ResourceKind::Script,
            "stylesheet" => ResourceKind::Stylesheet,
            "image" => ResourceKind::Image,
            "font" => ResourceKind::Font,
            "xhr" => ResourceKind::Xhr,
            "document" => ResourceKind::Document,
            _ => ResourceKind::Other,
        }
    }
}

/// A classified network resource, ready for summary and waterfall display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    /// Ms since navigation start.
    pub start_time: u64,
    /// Ms.
    pub duration: u64,
    /// Transferred bytes.
    pub size: u64,
}

/// Classify a single raw resource-timing record.
///
/// Returns `None` for entries with a non-network scheme (embedded data
/// URIs, browser-extension resources).
pub fn classify(entry: &RawResourceEntry) -> Option<ResourceEntry> {
    if !is_network_url(&entry.name) {
        return None;
    }

    Some(ResourceEntry {
        name: entry.name.clone(),
        kind: classify_kind(&entry.initiator_type, &entry.name),
        start_time: entry.start_time,
        duration: entry.duration,
        size: entry.transfer_size,
    })
}

/// Filter and classify a batch of raw resource-timing records.
pub fn classify_entries(entries: &[RawResourceEntry]) -> Vec<ResourceEntry> {
    tracing::debug!("Classifying {} raw resource entries", entries.len());

    let classified: Vec<ResourceEntry> = entries.iter().filter_map(classify).collect();

    tracing::debug!(
        "Classification kept {} of {} entries",
        classified.len(),
        entries.len()
    );

    classified
}

fn is_network_url(name: &str) -> bool {
    !NON_NETWORK_SCHEMES
        .iter()
        .any(|scheme| name.starts_with(scheme))
}

/// Classification precedence mirrors how browsers report initiators:
/// stylesheet links first, then the explicit initiator categories, then a
/// font-extension check that catches fonts regardless of initiator, then
/// XHR/fetch, then passthrough.
fn classify_kind(initiator: &str, name: &str) -> ResourceKind {
    let path = url_path(name);

    if initiator == "link" && path.to_ascii_lowercase().ends_with(".css") {
        return ResourceKind::Stylesheet;
    }

    match initiator {
        "script" => ResourceKind::Script,
        "img" => ResourceKind::Image,
        "css" => ResourceKind::Stylesheet,
        _ if FONT_EXTENSION.is_match(&path) => ResourceKind::Font,
        "xmlhttprequest" | "fetch" => ResourceKind::Xhr,
        other => ResourceKind::from_initiator(other),
    }
}

/// Extension checks run against the URL path so query strings and
/// fragments cannot defeat them.
fn url_path(name: &str) -> String {
    match Url::parse(name) {
        Ok(url) => url.path().to_string(),
        Err(_) => {
            let end = name.find(|c| c == '?' || c == '#').unwrap_or(name.len());
            name[..end].to_string()
        }
    }
}

/// Per-category count and size totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeStat {
    pub count: usize,
    pub size: u64,
}

/// The fixed set of summary buckets. XHR and document requests are
/// classified per entry but fold into `other` here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeBreakdown {
    pub script: TypeStat,
    pub stylesheet: TypeStat,
    pub image: TypeStat,
    pub font: TypeStat,
    pub other: TypeStat,
}

/// Aggregate statistics over the classified resource list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSummary {
    pub total_requests: usize,
    pub total_size: u64,
    pub by_type: TypeBreakdown,
}

impl ResourceSummary {
    pub fn from_entries(entries: &[ResourceEntry]) -> Self {
        let mut summary = ResourceSummary {
            total_requests: entries.len(),
            ..Default::default()
        };

        for entry in entries {
            summary.total_size += entry.size;

            let bucket = match entry.kind {
                ResourceKind::Script => &mut summary.by_type.script,
                ResourceKind::Stylesheet => &mut summary.by_type.stylesheet,
                ResourceKind::Image => &mut summary.by_type.image,
                ResourceKind::Font => &mut summary.by_type.font,
                ResourceKind::Xhr | ResourceKind::Document | ResourceKind::Other => {
                    &mut summary.by_type.other
                }
            };
            bucket.count += 1;
            bucket.size += entry.size;
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str, initiator: &str, size: u64) -> RawResourceEntry {
        RawResourceEntry {
            name: name.to_string(),
            initiator_type: initiator.to_string(),
            start_time: 10,
            duration: 25,
            transfer_size: size,
        }
    }

    #[test]
    fn test_link_with_css_extension_is_stylesheet() {
        let entry = raw("https://example.com/styles/main.css", "link", 100);
        assert_eq!(classify(&entry).unwrap().kind, ResourceKind::Stylesheet);
    }

    #[test]
    fn test_link_with_css_extension_and_query_string() {
        let entry = raw("https://example.com/main.css?v=3", "link", 100);
        assert_eq!(classify(&entry).unwrap().kind, ResourceKind::Stylesheet);
    }

    #[test]
    fn test_link_without_css_extension_is_other() {
        // Preload links for non-CSS assets keep their raw category.
        let entry = raw("https://example.com/hero.jpg", "link", 100);
        assert_eq!(classify(&entry).unwrap().kind, ResourceKind::Other);
    }

    #[test]
    fn test_explicit_initiators() {
        assert_eq!(
            classify(&raw("https://e.com/app.js", "script", 1)).unwrap().kind,
            ResourceKind::Script
        );
        assert_eq!(
            classify(&raw("https://e.com/logo.png", "img", 1)).unwrap().kind,
            ResourceKind::Image
        );
        assert_eq!(
            classify(&raw("https://e.com/bg.png", "css", 1)).unwrap().kind,
            ResourceKind::Stylesheet
        );
    }

    #[test]
    fn test_font_extension_wins_over_xhr_initiator() {
        let entry = raw("https://e.com/fonts/inter.woff2?cache=1", "fetch", 1);
        assert_eq!(classify(&entry).unwrap().kind, ResourceKind::Font);
    }

    #[test]
    fn test_font_extensions() {
        for ext in ["woff", "woff2", "ttf", "otf"] {
            let entry = raw(&format!("https://e.com/f.{ext}"), "other", 1);
            assert_eq!(classify(&entry).unwrap().kind, ResourceKind::Font, "{ext}");
        }
    }

    #[test]
    fn test_fetch_and_xhr_initiators() {
        assert_eq!(
            classify(&raw("https://api.e.com/data", "fetch", 1)).unwrap().kind,
            ResourceKind::Xhr
        );
        assert_eq!(
            classify(&raw("https://api.e.com/data", "xmlhttprequest", 1))
                .unwrap()
                .kind,
            ResourceKind::Xhr
        );
    }

    #[test]
    fn test_unrecognized_initiator_defaults_to_other() {
        let entry = raw("https://e.com/frame.html", "iframe", 1);
        assert_eq!(classify(&entry).unwrap().kind, ResourceKind::Other);
    }

    #[test]
    fn test_document_initiator_passes_through() {
        let entry = raw("https://e.com/page.html", "document", 1);
        assert_eq!(classify(&entry).unwrap().kind, ResourceKind::Document);
    }

    #[test]
    fn test_data_uri_and_extension_urls_are_dropped() {
        assert!(classify(&raw("data:image/png;base64,AAAA", "img", 1)).is_none());
        assert!(classify(&raw("chrome-extension://abcdef/content.js", "script", 1)).is_none());
        assert!(classify(&raw("moz-extension://abcdef/content.js", "script", 1)).is_none());
    }

    #[test]
    fn test_classify_entries_filters_before_counting() {
        let entries = vec![
            raw("https://e.com/app.js", "script", 1000),
            raw("data:image/gif;base64,R0lGOD", "img", 9999),
            raw("https://e.com/pic.png", "img", 500),
        ];

        let classified = classify_entries(&entries);
        assert_eq!(classified.len(), 2);

        let summary = ResourceSummary::from_entries(&classified);
        assert_eq!(summary.total_requests, 2);
        assert_eq!(summary.total_size, 1500);
    }

    #[test]
    fn test_summary_partitions_counts_and_sizes() {
        let entries = vec![
            raw("https://e.com/a.js", "script", 100),
            raw("https://e.com/b.js", "script", 200),
            raw("https://e.com/main.css", "link", 50),
            raw("https://e.com/pic.png", "img", 400),
            raw("https://e.com/f.woff2", "other", 80),
        ];

        let summary = ResourceSummary::from_entries(&classify_entries(&entries));
        assert_eq!(summary.by_type.script, TypeStat { count: 2, size: 300 });
        assert_eq!(summary.by_type.stylesheet, TypeStat { count: 1, size: 50 });
        assert_eq!(summary.by_type.image, TypeStat { count: 1, size: 400 });
        assert_eq!(summary.by_type.font, TypeStat { count: 1, size: 80 });
        assert_eq!(summary.by_type.other, TypeStat { count: 0, size: 0 });
        assert_eq!(summary.total_size, 830);
    }

    #[test]
    fn test_xhr_and_document_fold_into_other() {
        let entries = vec![
            raw("https://api.e.com/v1/user", "fetch", 300),
            raw("https://api.e.com/v1/feed", "xmlhttprequest", 200),
            raw("https://e.com/embed.html", "document", 100),
        ];

        let classified = classify_entries(&entries);
        // Per-entry taxonomy keeps the distinction...
        assert_eq!(classified[0].kind, ResourceKind::Xhr);
        assert_eq!(classified[2].kind, ResourceKind::Document);

        // ...while the summary folds both into `other`.
        let summary = ResourceSummary::from_entries(&classified);
        assert_eq!(summary.by_type.other, TypeStat { count: 3, size: 600 });
        assert_eq!(summary.by_type.script.count, 0);
        assert_eq!(summary.total_requests, 3);
    }

    #[test]
    fn test_empty_resource_list() {
        let summary = ResourceSummary::from_entries(&[]);
        assert_eq!(summary.total_requests, 0);
        assert_eq!(summary.total_size, 0);
        assert_eq!(summary.by_type.script, TypeStat::default());
    }

    #[test]
    fn test_resource_entry_serializes_with_type_key() {
        let entry = ResourceEntry {
            name: "https://e.com/app.js".to_string(),
            kind: ResourceKind::Script,
            start_time: 12,
            duration: 34,
            size: 56,
        };

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains(r#""type":"script""#));
        assert!(json.contains(r#""startTime":12"#));
    }
}
