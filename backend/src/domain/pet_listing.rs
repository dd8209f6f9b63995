//! Stateful pet listing view.
//!
//! [`PetListing`] owns the list a screen shows along with its loading and
//! error flags. Fetch failures never escape: the list is cleared and the error
//! message recorded instead.
//!
//! Overlapping fetches are not cancelled. Each fetch draws a ticket and only
//! the most recently issued ticket may publish its result, so a slow, stale
//! response cannot overwrite a newer one.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::warn;

use crate::domain::ports::PetRepository;
use crate::domain::{Pet, PetCatalogue, PetFilter};

/// Point-in-time copy of the listing state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingSnapshot {
    pub pets: Vec<Pet>,
    /// A filtered fetch is in flight.
    pub loading: bool,
    /// A pull-to-refresh is in flight.
    pub refreshing: bool,
    /// Message from the latest failed fetch, cleared on the next success.
    pub error: Option<String>,
    /// Filter the list was, or is being, fetched with.
    pub filter: PetFilter,
}

#[derive(Debug, Default)]
struct ListingState {
    snapshot: ListingSnapshot,
    /// Filter of the most recently issued fetch; `None` until the first one.
    fetched_filter: Option<PetFilter>,
    latest_ticket: u64,
}

/// Listing state for one screen or consumer, backed by a [`PetCatalogue`].
pub struct PetListing<R: ?Sized> {
    catalogue: PetCatalogue<R>,
    state: RwLock<ListingState>,
}

impl<R> PetListing<R>
where
    R: PetRepository + ?Sized,
{
    /// Empty listing with an unrestricted filter. Nothing is fetched yet.
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            catalogue: PetCatalogue::new(repo),
            state: RwLock::new(ListingState::default()),
        }
    }

    /// Run the query for `filter` and replace the list with its result.
    pub async fn fetch(&self, filter: PetFilter) {
        let ticket = {
            let mut state = self.state.write().await;
            state.snapshot.filter = filter.clone();
            state.fetched_filter = Some(filter.clone());
            state.snapshot.loading = true;
            state.latest_ticket += 1;
            state.latest_ticket
        };
        self.complete(ticket, &filter).await;
    }

    /// Re-run the current filter, flagging `refreshing` until it settles.
    pub async fn refresh(&self) {
        let (ticket, filter) = {
            let mut state = self.state.write().await;
            state.snapshot.loading = true;
            state.snapshot.refreshing = true;
            state.fetched_filter = Some(state.snapshot.filter.clone());
            state.latest_ticket += 1;
            (state.latest_ticket, state.snapshot.filter.clone())
        };
        self.complete(ticket, &filter).await;
    }

    /// Switch filters, fetching only if `filter` differs from the last one
    /// fetched. The first call always fetches.
    ///
    /// Returns whether a fetch ran.
    pub async fn set_filter(&self, filter: PetFilter) -> bool {
        if self.state.read().await.fetched_filter.as_ref() == Some(&filter) {
            return false;
        }
        self.fetch(filter).await;
        true
    }

    /// Copy of the current list, flags and filter.
    pub async fn snapshot(&self) -> ListingSnapshot {
        self.state.read().await.snapshot.clone()
    }

    async fn complete(&self, ticket: u64, filter: &PetFilter) {
        let result = self.catalogue.fetch_pets(filter).await;

        let mut state = self.state.write().await;
        if state.latest_ticket != ticket {
            return;
        }
        let snapshot = &mut state.snapshot;
        snapshot.loading = false;
        snapshot.refreshing = false;
        match result {
            Ok(pets) => {
                snapshot.pets = pets;
                snapshot.error = None;
            }
            Err(error) => {
                warn!(%error, "pet listing fetch failed");
                snapshot.pets.clear();
                snapshot.error = Some(error.to_string());
            }
        }
    }
}
