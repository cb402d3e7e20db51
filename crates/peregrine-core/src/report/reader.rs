use super::AnalysisReport;
use crate::{Error, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub struct ReportReader;

impl ReportReader {
    /// Read and parse a report file from the given path
    pub fn from_file(path: &Path) -> Result<AnalysisReport> {
        tracing::debug!("Reading report from: {}", path.display());

        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let report: AnalysisReport = serde_json::from_reader(reader)?;

        tracing::info!(
            "Successfully parsed report for {} with {} resources",
            report.url,
            report.resources.len()
        );

        Ok(report)
    }

    /// Parse a report from a JSON string
    pub fn from_str(content: &str) -> Result<AnalysisReport> {
        tracing::debug!("Parsing report from string");

        let report: AnalysisReport = serde_json::from_str(content)?;

        tracing::info!(
            "Successfully parsed report for {} with {} resources",
            report.url,
            report.resources.len()
        );

        Ok(report)
    }

    /// Validate that a report is well-formed
    pub fn validate(report: &AnalysisReport) -> Result<()> {
        tracing::debug!("Validating report structure");

        if report.url.is_empty() {
            return Err(Error::InvalidStructure("Missing report URL".to_string()));
        }

        if report.timestamp.is_empty() {
            return Err(Error::InvalidStructure(
                "Missing report timestamp".to_string(),
            ));
        }

        for (idx, resource) in report.resources.iter().enumerate() {
            if resource.name.is_empty() {
                return Err(Error::InvalidStructure(format!(
                    "Resource {} has empty URL",
                    idx
                )));
            }
        }

        tracing::debug!("Report structure is valid");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::SAMPLE_REPORT_JSON as SAMPLE_REPORT;

    #[test]
    fn test_parse_report_json() {
        let report = ReportReader::from_str(SAMPLE_REPORT).unwrap();
        assert_eq!(report.url, "https://example.com");
        assert_eq!(report.metrics.core_web_vitals.lcp.value, Some(1400.0));
        assert_eq!(report.metrics.navigation.load_complete, Some(2000));
        assert_eq!(report.resources.len(), 1);
        assert_eq!(report.suggestions.len(), 1);
    }

    #[test]
    fn test_validate_well_formed_report() {
        let report = ReportReader::from_str(SAMPLE_REPORT).unwrap();
        assert!(ReportReader::validate(&report).is_ok());
    }

    #[test]
    fn test_validate_empty_url() {
        let mut report = ReportReader::from_str(SAMPLE_REPORT).unwrap();
        report.url = String::new();
        assert!(ReportReader::validate(&report).is_err());
    }

    #[test]
    fn test_validate_empty_timestamp() {
        let mut report = ReportReader::from_str(SAMPLE_REPORT).unwrap();
        report.timestamp = String::new();
        assert!(ReportReader::validate(&report).is_err());
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        let result = ReportReader::from_str("{not json");
        assert!(result.is_err());
    }
}
