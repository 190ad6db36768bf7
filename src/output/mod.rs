//! Output module for crawl reports
//!
//! This module handles:
//! - Computing crawl statistics from a finished crawl
//! - Printing statistics and the page list to stdout
//! - Writing a markdown site map of the crawl

mod markdown;
pub mod stats;

pub use markdown::{format_markdown_summary, generate_markdown_summary};
pub use stats::{print_pages, print_statistics, CrawlStatistics};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to format output: {0}")]
    Format(#[from] std::fmt::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
