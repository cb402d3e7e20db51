use crate::OutputFormat;
use crate::commands::render;
use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use peregrine_browser::SessionConfig;
use peregrine_core::report::{AnalysisReport, ReportWriter};
use peregrine_engine::{AnalysisPool, AnalysisRequest, AnalyzerConfig, PageAnalyzer};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Execute the analyze command
#[allow(clippy::too_many_arguments)]
pub fn execute(
    urls: Vec<String>,
    output: Option<PathBuf>,
    chrome_path: Option<PathBuf>,
    concurrency: usize,
    timeout: u64,
    settle_ms: u64,
    headed: bool,
    resources: bool,
    format: OutputFormat,
) -> Result<()> {
    // Every URL is validated before the first browser launches, so a
    // typo at the end of the list fails fast instead of after minutes.
    let requests = urls
        .iter()
        .map(|url| AnalysisRequest::parse(url))
        .collect::<peregrine_engine::Result<Vec<_>>>()?;

    let session = SessionConfig {
        chrome_path,
        settle_delay: Duration::from_millis(settle_ms),
        headed,
        ..SessionConfig::default()
    };
    let config = AnalyzerConfig {
        session,
        deadline: Duration::from_secs(timeout),
    };

    tracing::info!(
        "Analyzing {} URL(s) with concurrency {}",
        requests.len(),
        concurrency
    );

    // Create tokio runtime for async operations
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let show_progress = format == OutputFormat::Pretty;
    let outcomes = runtime.block_on(run_analyses(requests, config, concurrency, show_progress));

    let mut reports = Vec::new();
    let mut failures = 0usize;

    for (url, outcome) in outcomes {
        match outcome {
            Ok(report) => {
                render::render_report(&report, format, resources)?;
                reports.push(report);
            }
            Err(e) => {
                failures += 1;
                eprintln!("{} {}: {}", style("✗").red(), url, e);
            }
        }
    }

    if let Some(ref path) = output {
        write_reports(&reports, path, urls.len() > 1)?;
        if format == OutputFormat::Pretty && !reports.is_empty() {
            println!(
                "{} Report written to {}",
                style("✓").green(),
                path.display()
            );
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} analyses failed", failures, urls.len());
    }

    Ok(())
}

/// Run the requested analyses through a bounded pool, preserving the
/// order URLs were given on the command line.
async fn run_analyses(
    requests: Vec<AnalysisRequest>,
    config: AnalyzerConfig,
    concurrency: usize,
    show_progress: bool,
) -> Vec<(String, peregrine_engine::Result<AnalysisReport>)> {
    let pool = AnalysisPool::new(PageAnalyzer::new(config), concurrency);

    let progress = if show_progress {
        let bar = ProgressBar::new(requests.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} [{pos}/{len}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.set_message("analyzing...");
        bar.enable_steady_tick(Duration::from_millis(120));
        Some(bar)
    } else {
        None
    };

    let mut handles = Vec::new();
    for request in requests {
        let pool = pool.clone();
        let url = request.as_str().to_string();
        handles.push((url, tokio::spawn(async move { pool.run(request).await })));
    }

    let mut outcomes = Vec::new();
    for (url, handle) in handles {
        let outcome = match handle.await {
            Ok(result) => result,
            Err(e) => Err(peregrine_engine::Error::Unexpected {
                url: url.clone(),
                reason: format!("analysis task failed: {}", e),
            }),
        };

        if let Some(bar) = &progress {
            bar.inc(1);
        }

        outcomes.push((url, outcome));
    }

    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    outcomes
}

/// Write collected reports to disk. A single URL produces one report
/// object; multiple URLs produce a JSON array even when some failed.
fn write_reports(reports: &[AnalysisReport], path: &Path, multiple: bool) -> Result<()> {
    if multiple {
        let json = serde_json::to_string_pretty(reports)?;
        std::fs::write(path, json)?;
        tracing::info!("Wrote {} report(s) to {}", reports.len(), path.display());
    } else if let Some(report) = reports.first() {
        ReportWriter::to_file(report, path)?;
    }
    Ok(())
}
