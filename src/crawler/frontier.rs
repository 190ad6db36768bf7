//! Shared work frontier
//!
//! The frontier owns the set of discovered-but-unclaimed addresses and the
//! set of addresses a worker is currently processing. Every operation takes
//! the same lock, so two workers discovering one address at nearly the same
//! time cannot both observe it as new.
//!
//! Idle workers do not poll: [`Frontier::next`] parks on a [`Notify`] that
//! is signalled whenever work is queued, released, or the frontier closes.

use crate::url::Address;
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::Notify;

/// How newly discovered links are checked before they are queued
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DedupPolicy {
    /// Links are filtered against completed pages only. A page that
    /// completes between a worker's snapshot and its enqueue can be
    /// fetched a second time.
    #[default]
    Completed,

    /// The frontier additionally ignores any address it has ever handed
    /// out, so every address is fetched at most once.
    Strict,
}

#[derive(Debug, Default)]
struct FrontierState {
    queued: HashSet<Address>,
    in_flight: HashSet<Address>,
    /// Every address ever claimed; only populated under `DedupPolicy::Strict`
    claimed: HashSet<Address>,
    closed: bool,
}

impl FrontierState {
    fn is_exhausted(&self) -> bool {
        self.queued.is_empty() && self.in_flight.is_empty()
    }
}

/// Pending and in-progress work for one crawl
#[derive(Debug)]
pub struct Frontier {
    state: Mutex<FrontierState>,
    policy: DedupPolicy,
    changed: Notify,
}

impl Default for Frontier {
    fn default() -> Self {
        Self::new(DedupPolicy::default())
    }
}

impl Frontier {
    pub fn new(policy: DedupPolicy) -> Self {
        Self {
            state: Mutex::new(FrontierState::default()),
            policy,
            changed: Notify::new(),
        }
    }

    pub fn policy(&self) -> DedupPolicy {
        self.policy
    }

    fn lock(&self) -> MutexGuard<'_, FrontierState> {
        // No operation leaves the sets half-updated, so a poisoned lock is
        // still consistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queues addresses, returning how many were newly queued
    ///
    /// Repeat adds of a queued address are no-ops. An address currently in
    /// flight is never queued, so no address sits in both sets at once.
    pub fn add<I>(&self, addresses: I) -> usize
    where
        I: IntoIterator<Item = Address>,
    {
        let added = {
            let mut state = self.lock();
            let mut added = 0;
            for address in addresses {
                if state.in_flight.contains(&address) {
                    continue;
                }
                if self.policy == DedupPolicy::Strict && state.claimed.contains(&address) {
                    continue;
                }
                if state.queued.insert(address.clone()) {
                    tracing::trace!("Queued {}", address);
                    added += 1;
                }
            }
            added
        };

        if added > 0 {
            self.changed.notify_waiters();
        }
        added
    }

    /// Moves one queued address to in-flight and returns it
    ///
    /// Makes no promise about which queued address is chosen.
    pub fn claim(&self) -> Option<Address> {
        let mut state = self.lock();
        if state.closed {
            return None;
        }

        let address = state.queued.iter().next().cloned()?;
        state.queued.remove(&address);
        state.in_flight.insert(address.clone());
        if self.policy == DedupPolicy::Strict {
            state.claimed.insert(address.clone());
        }
        Some(address)
    }

    /// Marks an in-flight address as finished, successfully or not
    pub fn release(&self, address: &Address) {
        let removed = self.lock().in_flight.remove(address);
        if !removed {
            tracing::warn!("Released {} which was not in flight", address);
        }
        self.changed.notify_waiters();
    }

    /// True iff nothing is queued and nothing is in flight
    pub fn is_exhausted(&self) -> bool {
        self.lock().is_exhausted()
    }

    /// Stops handing out work and wakes every waiting worker
    ///
    /// Addresses already in flight may still be released afterwards.
    pub fn close(&self) {
        self.lock().closed = true;
        self.changed.notify_waiters();
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// Number of queued addresses
    pub fn queued_len(&self) -> usize {
        self.lock().queued.len()
    }

    /// Number of in-flight addresses
    pub fn in_flight_len(&self) -> usize {
        self.lock().in_flight.len()
    }

    /// Waits until an address can be claimed
    ///
    /// Returns `None` once the frontier is exhausted or closed. An empty
    /// queue alone is not enough to stop: another worker's in-flight page
    /// may still enqueue more work, so the caller parks until something
    /// changes.
    pub async fn next(&self) -> Option<Address> {
        loop {
            let notified = self.changed.notified();
            tokio::pin!(notified);
            // Register before inspecting the state so a wake-up between the
            // check and the await is not lost.
            notified.as_mut().enable();

            {
                let state = self.lock();
                if state.closed || state.is_exhausted() {
                    return None;
                }
            }

            if let Some(address) = self.claim() {
                return Some(address);
            }

            notified.await;
        }
    }
}
