//! Statistics for a finished crawl
//!
//! This module derives summary numbers from a [`CrawlOutcome`] and prints
//! them, together with the page list, for the command-line front end.

use crate::crawler::{CrawlOutcome, WorkerSummary};
use std::collections::HashSet;
use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlStatistics {
    /// Number of completed pages
    pub total_pages: usize,

    /// Outgoing links across all pages, duplicates included
    pub total_links: usize,

    /// Distinct link targets across all pages
    pub distinct_links: usize,

    /// Distinct link targets that fell outside the origin prefix
    pub external_links: usize,

    /// Pages without a title
    pub untitled_pages: usize,

    /// Jobs per worker, ordered by worker id
    pub workers: Vec<WorkerSummary>,

    /// Wall-clock duration of the crawl
    pub elapsed: Duration,
}

impl CrawlStatistics {
    /// Computes statistics from a finished crawl
    pub fn from_outcome(outcome: &CrawlOutcome) -> Self {
        let prefix = crate::url::OriginPrefix::from_seed(&outcome.seed);
        let pages = outcome.pages();

        let mut distinct = HashSet::new();
        let mut total_links = 0;
        let mut untitled_pages = 0;
        for page in &pages {
            total_links += page.outgoing_links().len();
            distinct.extend(page.outgoing_links().iter());
            if page.title().is_empty() {
                untitled_pages += 1;
            }
        }

        Self {
            total_pages: pages.len(),
            total_links,
            distinct_links: distinct.len(),
            external_links: distinct.iter().filter(|a| !prefix.contains(a)).count(),
            untitled_pages,
            workers: outcome.workers.clone(),
            elapsed: outcome.elapsed,
        }
    }

    /// Pages completed per second of wall-clock time
    pub fn pages_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.total_pages as f64 / secs
        } else {
            0.0
        }
    }

    /// Sum of jobs across workers; exceeds `total_pages` when pages were fetched twice
    pub fn total_jobs(&self) -> usize {
        self.workers.iter().map(|w| w.jobs).sum()
    }
}

/// Prints every completed page as `address - title`, ordered by address
pub fn print_pages(outcome: &CrawlOutcome) {
    for page in outcome.pages() {
        if page.title().is_empty() {
            println!("{}", page.address());
        } else {
            println!("{} - {}", page.address(), page.title());
        }
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Pages crawled: {}", stats.total_pages);
    println!("  Untitled pages: {}", stats.untitled_pages);
    println!(
        "  Links found: {} ({} distinct, {} outside the site)",
        stats.total_links, stats.distinct_links, stats.external_links
    );
    println!(
        "  Duration: {:.2?} ({:.2} pages/sec)",
        stats.elapsed,
        stats.pages_per_second()
    );
    println!();

    println!("Workers:");
    for worker in &stats.workers {
        println!("  Worker {}: {} jobs", worker.id, worker.jobs);
    }

    let duplicates = stats.total_jobs().saturating_sub(stats.total_pages);
    if duplicates > 0 {
        println!("  ({} pages fetched more than once)", duplicates);
    }
}
