//! Markdown summary generation
//!
//! This module renders a finished crawl as a markdown site map: run
//! information, overall statistics, per-worker job counts and one table row
//! per page.

use crate::crawler::CrawlOutcome;
use crate::output::stats::CrawlStatistics;
use crate::output::OutputResult;
use chrono::{DateTime, Utc};
use std::fmt::Write as _;
use std::path::Path;

/// Writes a markdown summary of the crawl to `output_path`
pub fn generate_markdown_summary(outcome: &CrawlOutcome, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_summary(outcome, Utc::now())?;
    std::fs::write(output_path, markdown)?;
    Ok(())
}

/// Formats a crawl as markdown
///
/// # Arguments
///
/// * `outcome` - The finished crawl
/// * `generated_at` - Timestamp written into the report header
pub fn format_markdown_summary(
    outcome: &CrawlOutcome,
    generated_at: DateTime<Utc>,
) -> OutputResult<String> {
    let stats = CrawlStatistics::from_outcome(outcome);
    let mut md = String::new();

    writeln!(md, "# Sitewalk Crawl Summary\n")?;

    writeln!(md, "## Run Information\n")?;
    writeln!(md, "- **Seed**: {}", outcome.seed)?;
    writeln!(md, "- **Generated**: {}", generated_at.to_rfc3339())?;
    writeln!(
        md,
        "- **Duration**: {:.2} seconds\n",
        stats.elapsed.as_secs_f64()
    )?;

    writeln!(md, "## Overall Statistics\n")?;
    writeln!(md, "- **Pages Crawled**: {}", stats.total_pages)?;
    writeln!(md, "- **Untitled Pages**: {}", stats.untitled_pages)?;
    writeln!(md, "- **Total Links**: {}", stats.total_links)?;
    writeln!(md, "- **Distinct Links**: {}", stats.distinct_links)?;
    writeln!(md, "- **External Links**: {}", stats.external_links)?;
    writeln!(
        md,
        "- **Throughput**: {:.2} pages/sec\n",
        stats.pages_per_second()
    )?;

    writeln!(md, "## Workers\n")?;
    writeln!(md, "| Worker | Jobs |")?;
    writeln!(md, "|--------|------|")?;
    for worker in &stats.workers {
        writeln!(md, "| {} | {} |", worker.id, worker.jobs)?;
    }
    md.push('\n');

    writeln!(md, "## Pages\n")?;
    writeln!(md, "| Address | Title | Outgoing Links |")?;
    writeln!(md, "|---------|-------|----------------|")?;
    for page in outcome.pages() {
        writeln!(
            md,
            "| {} | {} | {} |",
            page.address(),
            escape_cell(page.title()),
            page.outgoing_links().len()
        )?;
    }

    Ok(md)
}

/// Keeps a title from breaking the table layout
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\n', '\r'], " ")
}
