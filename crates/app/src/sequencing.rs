//! Request sequencing
//!
//! A screen that can re-fetch while an earlier fetch is still in flight must only apply
//! the response to the most recent request. Each fetch takes a [`Ticket`] from the slot's
//! [`RequestSequencer`]; a response whose ticket is no longer current is dropped.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use jam3a::deals::Deal;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::deals::{DealFilter, DealsService, DealsServiceError};

/// Issued when a fetch starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Latest-request tracker for one fetch slot.
#[derive(Debug)]
pub struct RequestSequencer {
    slot: &'static str,
    latest: AtomicU64,
}

impl RequestSequencer {
    /// Sequencer for the slot named `slot`.
    #[must_use]
    pub const fn new(slot: &'static str) -> Self {
        Self {
            slot,
            latest: AtomicU64::new(0),
        }
    }

    /// Start a request, superseding every earlier ticket.
    pub fn issue(&self) -> Ticket {
        let previous = self.latest.fetch_add(1, Ordering::AcqRel);

        Ticket(previous.wrapping_add(1))
    }

    /// Whether `ticket` belongs to the most recent request.
    #[must_use]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }

    /// `value` if `ticket` is still current, otherwise `None`.
    pub fn accept<T>(&self, ticket: Ticket, value: T) -> Option<T> {
        if self.is_current(ticket) {
            return Some(value);
        }

        debug!(
            slot = self.slot,
            ticket = ticket.0,
            latest = self.latest.load(Ordering::Acquire),
            "discarding stale response"
        );

        None
    }
}

/// Deal list that only ever shows the answer to the latest fetch.
pub struct DealsFeed {
    deals: Arc<dyn DealsService>,
    sequencer: RequestSequencer,
    current: RwLock<Vec<Deal>>,
}

impl std::fmt::Debug for DealsFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DealsFeed")
            .field("sequencer", &self.sequencer)
            .finish_non_exhaustive()
    }
}

impl DealsFeed {
    /// Empty feed over `deals`.
    #[must_use]
    pub fn new(deals: Arc<dyn DealsService>) -> Self {
        Self {
            deals,
            sequencer: RequestSequencer::new("deals"),
            current: RwLock::new(Vec::new()),
        }
    }

    /// Fetch with `filter` and apply the result if no newer fetch started meanwhile.
    ///
    /// Returns whether the result was applied. A stale failure is dropped like a stale
    /// success.
    ///
    /// # Errors
    ///
    /// Returns the service error of a current fetch; the shown deals are left unchanged.
    pub async fn refresh(&self, filter: DealFilter) -> Result<bool, DealsServiceError> {
        let ticket = self.sequencer.issue();
        let result = self.deals.list_deals(filter).await;

        let Some(result) = self.sequencer.accept(ticket, result) else {
            return Ok(false);
        };

        *self.current.write().await = result?;

        Ok(true)
    }

    /// Deals currently shown.
    pub async fn snapshot(&self) -> Vec<Deal> {
        self.current.read().await.clone()
    }
}
