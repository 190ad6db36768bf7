//! The per-worker crawl loop
//!
//! Every worker runs the same loop against the shared [`Frontier`] and
//! [`ResultStore`]: claim an address, fetch it, queue its unseen same-site
//! links, record the page, release the address. Links are always queued
//! before the address is released, so the frontier can only look exhausted
//! once no finished page has work left to hand over.

use crate::crawler::fetcher::PageFetcher;
use crate::crawler::{Frontier, ResultStore};
use crate::url::{Address, OriginPrefix};
use crate::FetchError;
use std::collections::HashSet;
use std::sync::Arc;

/// How often (in completed pages) progress is logged
const PROGRESS_INTERVAL: usize = 10;

/// What one worker did over the course of a crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerSummary {
    pub id: usize,
    /// Pages this worker fetched and recorded
    pub jobs: usize,
}

/// State shared by every worker of one crawl
pub(crate) struct WorkerContext {
    pub frontier: Arc<Frontier>,
    pub results: ResultStore,
    pub fetcher: Arc<dyn PageFetcher>,
    pub prefix: OriginPrefix,
}

/// Runs one worker until the frontier is exhausted or closed
///
/// A fetch failure releases the address, closes the frontier so the other
/// workers stop claiming, and is returned to the orchestrator.
pub(crate) async fn run_worker(
    id: usize,
    ctx: Arc<WorkerContext>,
) -> Result<WorkerSummary, FetchError> {
    let mut jobs = 0;

    while let Some(address) = ctx.frontier.next().await {
        tracing::debug!("Worker {} claimed {}", id, address);

        let page = match ctx.fetcher.fetch(&address).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Worker {} failed to fetch {}: {}", id, address, e);
                ctx.frontier.release(&address);
                ctx.frontier.close();
                return Err(e);
            }
        };

        let seen = ctx.results.snapshot_keys();
        let candidates = eligible_links(page.outgoing_links(), &ctx.prefix, &seen);
        let queued = ctx.frontier.add(candidates);
        tracing::trace!("Worker {} queued {} new links from {}", id, queued, address);

        ctx.results.put(page);
        ctx.frontier.release(&address);
        jobs += 1;

        let completed = ctx.results.len();
        if completed % PROGRESS_INTERVAL == 0 {
            tracing::info!(
                "Progress: {} pages crawled, {} queued, {} in flight",
                completed,
                ctx.frontier.queued_len(),
                ctx.frontier.in_flight_len()
            );
        }
    }

    tracing::info!("Worker {} finished after {} jobs", id, jobs);
    Ok(WorkerSummary { id, jobs })
}

/// Links under the origin prefix that have not completed yet
fn eligible_links(
    links: &[Address],
    prefix: &OriginPrefix,
    seen: &HashSet<Address>,
) -> Vec<Address> {
    links
        .iter()
        .filter(|link| prefix.contains(link))
        .filter(|link| !seen.contains(*link))
        .cloned()
        .collect()
}
