use super::AnalysisReport;
use crate::Result;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

pub struct ReportWriter;

impl ReportWriter {
    /// Write a report to a file
    pub fn to_file(report: &AnalysisReport, path: &Path) -> Result<()> {
        tracing::debug!("Writing report to: {}", path.display());

        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, report)?;

        tracing::info!(
            "Successfully wrote report for {} to {}",
            report.url,
            path.display()
        );

        Ok(())
    }

    /// Convert a report to a JSON string
    pub fn to_string(report: &AnalysisReport) -> Result<String> {
        let json = serde_json::to_string_pretty(report)?;
        Ok(json)
    }

    /// Convert a report to a compact JSON string
    pub fn to_string_compact(report: &AnalysisReport) -> Result<String> {
        let json = serde_json::to_string(report)?;
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::reader::ReportReader;
    use crate::report::SAMPLE_REPORT_JSON as SAMPLE_REPORT;

    #[test]
    fn test_write_and_read_back() {
        let report = ReportReader::from_str(SAMPLE_REPORT).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        ReportWriter::to_file(&report, &path).unwrap();

        let restored = ReportReader::from_file(&path).unwrap();
        assert_eq!(restored.url, report.url);
        assert_eq!(restored.timestamp, report.timestamp);
        assert_eq!(restored.resources.len(), report.resources.len());
    }

    #[test]
    fn test_to_string_uses_wire_keys() {
        let report = ReportReader::from_str(SAMPLE_REPORT).unwrap();
        let json = ReportWriter::to_string(&report).unwrap();
        assert!(json.contains("\"coreWebVitals\""));
        assert!(json.contains("\"navigationTiming\""));
        assert!(json.contains("\"additionalMetrics\""));
        assert!(json.contains("\"resourceSummary\""));
        assert!(json.contains("\"loadComplete\""));
        assert!(json.contains("\"totalRequests\""));
    }

    #[test]
    fn test_compact_string_has_no_newlines() {
        let report = ReportReader::from_str(SAMPLE_REPORT).unwrap();
        let json = ReportWriter::to_string_compact(&report).unwrap();
        assert!(!json.contains('\n'));
    }
}
