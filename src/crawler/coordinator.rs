//! Crawler coordinator - crawl orchestration
//!
//! This module starts a fixed pool of workers against a fresh frontier and
//! result store, waits for every one of them to exit, and reports either the
//! completed pages or the first fetch failure.

use crate::config::Config;
use crate::crawler::fetcher::{HttpFetcher, PageFetcher};
use crate::crawler::worker::{run_worker, WorkerContext, WorkerSummary};
use crate::crawler::{DedupPolicy, Frontier, Page, ResultStore};
use crate::url::{Address, OriginPrefix};
use crate::{ConfigError, CrawlError, FetchError, OrchestrationError};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;

/// Result of a crawl that ran to completion
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    /// The normalized seed the crawl started from
    pub seed: Address,

    /// Every completed page
    pub results: ResultStore,

    /// Per-worker job counts, ordered by worker id
    pub workers: Vec<WorkerSummary>,

    /// Wall-clock time from start to the last worker exiting
    pub elapsed: Duration,
}

impl CrawlOutcome {
    /// Completed pages ordered by address
    pub fn pages(&self) -> Vec<Page> {
        self.results.pages()
    }

    /// The address to page mapping
    pub fn into_map(self) -> HashMap<Address, Page> {
        self.results.to_map()
    }
}

/// Launches crawls with a fixed worker pool
#[derive(Clone)]
pub struct Crawler {
    fetcher: Arc<dyn PageFetcher>,
    workers: usize,
    dedup: DedupPolicy,
}

impl Crawler {
    /// Creates a crawler around any page fetcher
    pub fn new<F>(fetcher: F, workers: usize) -> Self
    where
        F: PageFetcher + 'static,
    {
        Self {
            fetcher: Arc::new(fetcher),
            workers,
            dedup: DedupPolicy::default(),
        }
    }

    /// Creates an HTTP crawler from configuration
    pub fn from_config(config: &Config) -> Result<Self, CrawlError> {
        let fetcher = HttpFetcher::from_config(&config.user_agent, &config.http)?;
        Ok(Self::new(fetcher, config.crawler.workers).with_dedup(config.crawler.dedup))
    }

    pub fn with_dedup(mut self, dedup: DedupPolicy) -> Self {
        self.dedup = dedup;
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn dedup(&self) -> DedupPolicy {
        self.dedup
    }

    /// Starts a crawl and returns immediately
    ///
    /// Must be called from within a Tokio runtime. The returned handle gives
    /// live access to the result store while workers run.
    pub fn start(&self, seed: &str) -> Result<CrawlHandle, CrawlError> {
        if self.workers == 0 {
            return Err(ConfigError::Validation("workers must be at least 1".to_string()).into());
        }

        let seed = Address::parse(seed)?;
        let frontier = Arc::new(Frontier::new(self.dedup));
        let results = ResultStore::new();
        frontier.add([seed.clone()]);

        tracing::info!(
            "Starting crawl of {} with {} workers ({:?} dedup)",
            seed,
            self.workers,
            self.dedup
        );

        let ctx = Arc::new(WorkerContext {
            frontier: Arc::clone(&frontier),
            results: results.clone(),
            fetcher: Arc::clone(&self.fetcher),
            prefix: OriginPrefix::from_seed(&seed),
        });

        let mut tasks = JoinSet::new();
        for id in 0..self.workers {
            let ctx = Arc::clone(&ctx);
            tasks.spawn(async move { (id, run_worker(id, ctx).await) });
        }

        Ok(CrawlHandle {
            seed,
            frontier,
            results,
            tasks,
            started: Instant::now(),
        })
    }

    /// Runs a crawl to completion
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sitewalk::config::Config;
    /// use sitewalk::crawler::Crawler;
    ///
    /// # async fn example() -> Result<(), sitewalk::CrawlError> {
    /// let crawler = Crawler::from_config(&Config::default())?;
    /// let outcome = crawler.crawl("http://localhost:8000/").await?;
    /// for page in outcome.pages() {
    ///     println!("{} - {}", page.address(), page.title());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn crawl(&self, seed: &str) -> Result<CrawlOutcome, CrawlError> {
        Ok(self.start(seed)?.wait().await?)
    }
}

/// A running crawl
pub struct CrawlHandle {
    seed: Address,
    frontier: Arc<Frontier>,
    results: ResultStore,
    tasks: JoinSet<(usize, Result<WorkerSummary, FetchError>)>,
    started: Instant,
}

impl CrawlHandle {
    pub fn seed(&self) -> &Address {
        &self.seed
    }

    /// Live view of the pages completed so far
    pub fn results(&self) -> &ResultStore {
        &self.results
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// Waits for every worker to exit
    ///
    /// On failure the first fetch error is returned together with the pages
    /// recorded before the crawl wound down.
    pub async fn wait(mut self) -> Result<CrawlOutcome, OrchestrationError> {
        let mut summaries = Vec::with_capacity(self.tasks.len());
        let mut first_error: Option<(usize, FetchError)> = None;
        let mut panic = None;

        while let Some(joined) = self.tasks.join_next().await {
            match joined {
                Ok((_, Ok(summary))) => summaries.push(summary),
                Ok((id, Err(e))) => {
                    if first_error.is_none() {
                        tracing::error!("Crawl aborted by worker {}: {}", id, e);
                        first_error = Some((id, e));
                    } else {
                        tracing::debug!("Worker {} also failed: {}", id, e);
                    }
                }
                Err(join_error) => {
                    // A lost worker never releases its address, so the rest
                    // would wait forever unless the frontier is closed.
                    self.frontier.close();
                    if join_error.is_panic() && panic.is_none() {
                        panic = Some(join_error.into_panic());
                    }
                }
            }
        }

        if let Some(payload) = panic {
            std::panic::resume_unwind(payload);
        }

        let elapsed = self.started.elapsed();

        if let Some((worker, source)) = first_error {
            return Err(OrchestrationError::new(worker, source, self.results));
        }

        summaries.sort_by_key(|s| s.id);
        tracing::info!(
            "Crawl completed: {} pages crawled in {:?}",
            self.results.len(),
            elapsed
        );

        Ok(CrawlOutcome {
            seed: self.seed,
            results: self.results,
            workers: summaries,
            elapsed,
        })
    }
}

/// Crawls a site over HTTP with default settings
///
/// # Returns
///
/// * `Ok(HashMap<Address, Page>)` - Every page reachable from the seed under its prefix
/// * `Err(CrawlError)` - Invalid seed or worker count, or the first fetch failure
///
/// # Example
///
/// ```no_run
/// # async fn example() -> Result<(), sitewalk::CrawlError> {
/// let pages = sitewalk::crawl("http://localhost:8000/", 4).await?;
/// println!("{} pages", pages.len());
/// # Ok(())
/// # }
/// ```
pub async fn crawl(seed: &str, worker_count: usize) -> Result<HashMap<Address, Page>, CrawlError> {
    let mut config = Config::default();
    config.crawler.workers = worker_count;
    let outcome = Crawler::from_config(&config)?.crawl(seed).await?;
    Ok(outcome.into_map())
}
