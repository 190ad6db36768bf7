//! Crawler module for concurrent site crawling
//!
//! This module contains the crawl orchestration core, including:
//! - The shared frontier of queued and in-flight addresses
//! - The result store of completed pages
//! - The page fetcher seam and its HTTP implementation
//! - HTML title and link extraction
//! - The worker loop and the coordinator that runs a pool of workers

mod coordinator;
mod fetcher;
mod frontier;
mod parser;
mod results;
mod worker;

pub use coordinator::{crawl, CrawlHandle, CrawlOutcome, Crawler};
pub use fetcher::{build_http_client, HttpFetcher, PageFetcher};
pub use frontier::{DedupPolicy, Frontier};
pub use parser::{parse_html, ParsedPage};
pub use results::{Page, ResultStore};
pub use worker::WorkerSummary;
