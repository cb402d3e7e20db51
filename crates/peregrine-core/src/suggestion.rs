use serde::{Deserialize, Serialize};

/// Severity of a finding. The derived ordering is display order: errors
/// sort ahead of warnings, warnings ahead of info, info ahead of the
/// all-clear note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
    Success,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Success => "success",
        }
    }
}

/// Which part of the page a suggestion concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    JavaScript,
    Network,
    Server,
    Images,
    #[serde(rename = "Core Web Vitals")]
    CoreWebVitals,
    #[serde(rename = "CSS")]
    Css,
    Overall,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::JavaScript => "JavaScript",
            Category::Network => "Network",
            Category::Server => "Server",
            Category::Images => "Images",
            Category::CoreWebVitals => "Core Web Vitals",
            Category::Css => "CSS",
            Category::Overall => "Overall",
        }
    }
}

/// A single actionable finding attached to a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub severity: Severity,
    pub category: Category,
    pub message: String,
}

impl Suggestion {
    pub fn new(severity: Severity, category: Category, message: impl Into<String>) -> Self {
        Suggestion {
            severity,
            category,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_display_order() {
        assert!(Severity::Error < Severity::Warning);
        assert!(Severity::Warning < Severity::Info);
        assert!(Severity::Info < Severity::Success);
    }

    #[test]
    fn test_suggestion_serializes_with_type_key() {
        let suggestion = Suggestion::new(
            Severity::Error,
            Category::CoreWebVitals,
            "Largest Contentful Paint is slow (5.20 s). Optimize loading of largest visible element.",
        );

        let json = serde_json::to_string(&suggestion).unwrap();
        assert!(json.contains(r#""type":"error""#));
        assert!(json.contains(r#""category":"Core Web Vitals""#));
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(Category::Css.as_str(), "CSS");
        assert_eq!(Category::JavaScript.as_str(), "JavaScript");
        assert_eq!(
            serde_json::to_string(&Category::Overall).unwrap(),
            r#""Overall""#
        );
    }
}
