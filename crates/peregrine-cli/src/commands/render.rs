use crate::OutputFormat;
use anyhow::Result;
use console::style;
use peregrine_core::metrics::{RatedMetric, Rating};
use peregrine_core::report::AnalysisReport;
use peregrine_core::suggestion::Severity;

/// Render one report in the requested format.
pub fn render_report(
    report: &AnalysisReport,
    format: OutputFormat,
    show_resources: bool,
) -> Result<()> {
    match format {
        OutputFormat::Json => output_json(report),
        OutputFormat::Table => output_table(report),
        OutputFormat::Pretty => output_pretty(report, show_resources),
    }
}

fn output_pretty(report: &AnalysisReport, show_resources: bool) -> Result<()> {
    println!(
        "\n{}",
        style(format!("Page Load Analysis: {}", report.url))
            .bold()
            .cyan()
    );
    println!("  Analyzed: {}", report.timestamp);

    let vitals = &report.metrics.core_web_vitals;
    println!("\n{}", style("Core Web Vitals").bold());
    println!("  LCP:  {}", vital_display(&vitals.lcp));
    println!("  FID:  {}", vital_display(&vitals.fid));
    println!("  CLS:  {}", cls_display(&vitals.cls));

    let navigation = &report.metrics.navigation;
    println!("\n{}", style("Navigation Timing").bold());
    println!("  TTFB:               {}", format_millis(navigation.ttfb));
    println!(
        "  DOM Interactive:    {}",
        format_millis(navigation.dom_interactive)
    );
    println!(
        "  DOM Content Loaded: {}",
        format_millis(navigation.dom_content_loaded)
    );
    println!(
        "  Load Complete:      {}",
        format_millis(navigation.load_complete)
    );

    let additional = &report.metrics.additional;
    println!("\n{}", style("Additional Metrics").bold());
    println!(
        "  First Contentful Paint: {}",
        format_millis_f(additional.fcp)
    );
    println!(
        "  Time to Interactive:    {}",
        format_millis(additional.tti)
    );
    println!(
        "  Total Blocking Time:    {}",
        format_millis_f(additional.tbt)
    );
    println!(
        "  Speed Index:            {}",
        format_millis(additional.speed_index)
    );
    println!(
        "  Server Response:        {}",
        format_millis(additional.server_response_time)
    );
    println!(
        "  DNS Lookup:             {}",
        format_millis(additional.dns_lookup_time)
    );
    println!(
        "  TCP Connect:            {}",
        format_millis(additional.tcp_connection_time)
    );
    println!(
        "  TLS Negotiation:        {}",
        format_millis(additional.tls_negotiation_time)
    );

    let resources = &report.metrics.resources;
    println!("\n{}", style("Resources").bold());
    println!(
        "  Requests: {} ({})",
        style(resources.total_requests).yellow(),
        format_size(resources.total_size)
    );
    println!(
        "  Scripts:      {:>3}  {:>10}",
        resources.by_type.script.count,
        format_size(resources.by_type.script.size)
    );
    println!(
        "  Stylesheets:  {:>3}  {:>10}",
        resources.by_type.stylesheet.count,
        format_size(resources.by_type.stylesheet.size)
    );
    println!(
        "  Images:       {:>3}  {:>10}",
        resources.by_type.image.count,
        format_size(resources.by_type.image.size)
    );
    println!(
        "  Fonts:        {:>3}  {:>10}",
        resources.by_type.font.count,
        format_size(resources.by_type.font.size)
    );
    println!(
        "  Other:        {:>3}  {:>10}",
        resources.by_type.other.count,
        format_size(resources.by_type.other.size)
    );

    if show_resources && !report.resources.is_empty() {
        println!("\n{}", style("Waterfall").bold());
        println!(
            "  {:>8}  {:>8}  {:>10}  {:<10}  {}",
            "start", "duration", "size", "type", "url"
        );
        for entry in &report.resources {
            println!(
                "  {:>5} ms  {:>5} ms  {:>10}  {:<10}  {}",
                entry.start_time,
                entry.duration,
                format_size(entry.size),
                entry.kind.as_str(),
                truncate_url(&entry.name, 60)
            );
        }
    }

    if !report.suggestions.is_empty() {
        println!("\n{}", style("Suggestions").bold());
        for suggestion in &report.suggestions {
            println!(
                "  {} [{}] {}",
                severity_mark(suggestion.severity),
                suggestion.category.as_str(),
                suggestion.message
            );
        }
    }

    println!(); // trailing newline
    Ok(())
}

fn output_json(report: &AnalysisReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{}", json);
    Ok(())
}

fn output_table(report: &AnalysisReport) -> Result<()> {
    // Simple table format
    println!("Metric,Value");
    println!("URL,{}", report.url);
    println!("Timestamp,{}", report.timestamp);

    let vitals = &report.metrics.core_web_vitals;
    println!("LCP (ms),{}", csv_f64(vitals.lcp.value));
    println!("LCP Rating,{}", vitals.lcp.rating.as_str());
    println!("FID (ms),{}", csv_f64(vitals.fid.value));
    println!("FID Rating,{}", vitals.fid.rating.as_str());
    println!("CLS,{}", csv_f64(vitals.cls.value));
    println!("CLS Rating,{}", vitals.cls.rating.as_str());

    let navigation = &report.metrics.navigation;
    println!("TTFB (ms),{}", csv_u64(navigation.ttfb));
    println!(
        "DOM Content Loaded (ms),{}",
        csv_u64(navigation.dom_content_loaded)
    );
    println!("Load Complete (ms),{}", csv_u64(navigation.load_complete));

    println!("Total Requests,{}", report.metrics.resources.total_requests);
    println!(
        "Total Size (bytes),{}",
        report.metrics.resources.total_size
    );
    println!("Suggestions,{}", report.suggestions.len());

    Ok(())
}

fn vital_display(metric: &RatedMetric) -> String {
    match metric.value {
        Some(value) => format!("{:.0} ms  ({})", value, rating_display(metric.rating)),
        None => format!("not measured  ({})", rating_display(metric.rating)),
    }
}

fn cls_display(metric: &RatedMetric) -> String {
    match metric.value {
        Some(value) => format!("{:.3}  ({})", value, rating_display(metric.rating)),
        None => format!("not measured  ({})", rating_display(metric.rating)),
    }
}

fn rating_display(rating: Rating) -> console::StyledObject<&'static str> {
    match rating {
        Rating::Good => style("good").green(),
        Rating::NeedsImprovement => style("needs-improvement").yellow(),
        Rating::Poor => style("poor").red(),
        Rating::Unknown => style("unknown").dim(),
    }
}

fn severity_mark(severity: Severity) -> console::StyledObject<&'static str> {
    match severity {
        Severity::Error => style("✗").red(),
        Severity::Warning => style("⚠").yellow(),
        Severity::Info => style("ℹ").cyan(),
        Severity::Success => style("✓").green(),
    }
}

fn format_millis(value: Option<u64>) -> String {
    match value {
        Some(ms) => format!("{} ms", ms),
        None => "n/a".to_string(),
    }
}

fn format_millis_f(value: Option<f64>) -> String {
    match value {
        Some(ms) => format!("{:.0} ms", ms),
        None => "n/a".to_string(),
    }
}

/// Human-readable byte count
fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = 1024.0 * 1024.0;

    let value = bytes as f64;
    if value >= MB {
        format!("{:.1} MB", value / MB)
    } else if value >= KB {
        format!("{:.1} KB", value / KB)
    } else {
        format!("{} B", bytes)
    }
}

fn csv_u64(value: Option<u64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn csv_f64(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn truncate_url(url: &str, max: usize) -> String {
    if url.chars().count() <= max {
        url.to_string()
    } else {
        let truncated: String = url.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}
