//! Crawl results
//!
//! [`ResultStore`] maps each completed address to its [`Page`]. It doubles as
//! the crawl-scope "already done" set that workers consult before queueing
//! newly discovered links, and as the observation point for progress.

use crate::url::Address;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::watch;

/// A fetched page
///
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    address: Address,
    title: String,
    outgoing_links: Vec<Address>,
}

impl Page {
    pub fn new(address: Address, title: impl Into<String>, outgoing_links: Vec<Address>) -> Self {
        Self {
            address,
            title: title.into(),
            outgoing_links,
        }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    /// The page title, empty if the page had none
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Absolute, normalized link targets in document order
    pub fn outgoing_links(&self) -> &[Address] {
        &self.outgoing_links
    }
}

#[derive(Debug)]
struct Inner {
    pages: RwLock<HashMap<Address, Page>>,
    completed: watch::Sender<usize>,
}

/// Map from address to page, shared by every worker of one crawl
///
/// Cloning yields another handle to the same store. Entries are only ever
/// added.
#[derive(Debug, Clone)]
pub struct ResultStore {
    inner: Arc<Inner>,
}

impl Default for ResultStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultStore {
    pub fn new() -> Self {
        let (completed, _) = watch::channel(0);
        Self {
            inner: Arc::new(Inner {
                pages: RwLock::new(HashMap::new()),
                completed,
            }),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<Address, Page>> {
        self.inner
            .pages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<Address, Page>> {
        self.inner
            .pages
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Records a page under its own address
    ///
    /// A second page for the same address replaces the first.
    pub fn put(&self, page: Page) {
        let count = {
            let mut pages = self.write();
            if let Some(previous) = pages.insert(page.address.clone(), page) {
                tracing::debug!("Replaced result for {}", previous.address);
            }
            pages.len()
        };
        self.inner.completed.send_replace(count);
    }

    /// Point-in-time set of completed addresses
    pub fn snapshot_keys(&self) -> HashSet<Address> {
        self.read().keys().cloned().collect()
    }

    /// Returns true if the address has a recorded page
    pub fn contains(&self, address: &Address) -> bool {
        self.read().contains_key(address)
    }

    pub fn get(&self, address: &Address) -> Option<Page> {
        self.read().get(address).cloned()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Snapshot of all pages, ordered by address
    pub fn pages(&self) -> Vec<Page> {
        let mut pages: Vec<Page> = self.read().values().cloned().collect();
        pages.sort_by(|a, b| a.address.cmp(&b.address));
        pages
    }

    /// Snapshot of the whole map
    pub fn to_map(&self) -> HashMap<Address, Page> {
        self.read().clone()
    }

    /// Receiver that observes the running completed-page count
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.inner.completed.subscribe()
    }
}
