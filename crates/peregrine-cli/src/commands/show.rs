use crate::OutputFormat;
use crate::commands::render;
use anyhow::Result;
use peregrine_core::report::{AnalysisReport, ReportReader};
use std::path::Path;

/// Load and validate a saved analysis report
pub fn load_report(file: &Path) -> Result<AnalysisReport> {
    tracing::info!("Loading report from {}", file.display());

    let report = ReportReader::from_file(file)?;
    ReportReader::validate(&report)?;

    Ok(report)
}

/// Execute the show command - renders a previously saved report
pub fn execute(file: &Path, resources: bool, format: OutputFormat) -> Result<()> {
    let report = load_report(file)?;

    render::render_report(&report, format, resources)?;

    Ok(())
}
