use crate::{Card, CardId, CardService, CardUpdate, CoreError, NewCard};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Error shown when the card list could not be loaded.
pub const FETCH_FAILED: &str = "Failed to fetch cards";

#[derive(Default)]
struct State {
    cards: Vec<Card>,
    error: Option<String>,
    in_flight: usize,
    issued: u64,
    applied: u64,
}

/// Client-side copy of the full card list.
///
/// The list is only ever replaced whole by `fetch_all`; mutators go to the
/// service and then refetch. Fetches are ticketed so a response that
/// resolves after a newer one has been applied is dropped.
pub struct CardStore {
    service: Arc<dyn CardService>,
    state: RwLock<State>,
}

/// Keeps `loading()` true for as long as it is alive.
struct InFlight<'a>(&'a RwLock<State>);

impl<'a> InFlight<'a> {
    fn begin(state: &'a RwLock<State>) -> Self {
        state.write().in_flight += 1;
        Self(state)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut s = self.0.write();
        s.in_flight = s.in_flight.saturating_sub(1);
    }
}

impl CardStore {
    pub fn new(service: Arc<dyn CardService>) -> Self {
        Self {
            service,
            state: RwLock::new(State::default()),
        }
    }

    pub fn cards(&self) -> Vec<Card> {
        self.state.read().cards.clone()
    }

    pub fn loading(&self) -> bool {
        self.state.read().in_flight > 0
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    pub fn get(&self, id: CardId) -> Option<Card> {
        self.state.read().cards.iter().find(|c| c.id == id).cloned()
    }

    pub async fn fetch_all(&self) {
        let ticket = {
            let mut s = self.state.write();
            s.issued += 1;
            s.issued
        };
        let _loading = InFlight::begin(&self.state);

        let result = self.service.list_cards().await;
        self.apply(ticket, result);
    }

    fn apply(&self, ticket: u64, result: Result<Vec<Card>, CoreError>) {
        let mut s = self.state.write();
        if ticket < s.applied {
            debug!(ticket, applied = s.applied, "dropping stale card list");
            return;
        }
        s.applied = ticket;
        match result {
            Ok(cards) => {
                debug!(count = cards.len(), "card list refreshed");
                s.cards = cards;
                s.error = None;
            }
            Err(e) => {
                error!(error = %e, "failed to fetch cards");
                s.error = Some(FETCH_FAILED.to_string());
            }
        }
    }

    /// Creates a card and refetches. Failures are logged only and leave
    /// the store error untouched.
    pub async fn add(&self, front: &str, back: &str, deck_name: &str) -> Option<CardId> {
        self.add_card(NewCard::new(front, back, deck_name)).await
    }

    pub async fn add_card(&self, card: NewCard) -> Option<CardId> {
        match self.service.create_card(&card).await {
            Ok(id) => {
                info!(id, "card created");
                self.fetch_all().await;
                Some(id)
            }
            Err(e) => {
                error!(error = %e, "failed to create card");
                None
            }
        }
    }

    /// Same contract as [`CardStore::add`], for one existing card.
    pub async fn update(&self, id: CardId, front: &str, back: &str, tags: Option<Vec<String>>) -> bool {
        let update = CardUpdate {
            front: front.to_string(),
            back: back.to_string(),
            tags,
        };
        match self.service.update_card(id, &update).await {
            Ok(()) => {
                info!(id, "card updated");
                self.fetch_all().await;
                true
            }
            Err(e) => {
                error!(id, error = %e, "failed to update card");
                false
            }
        }
    }

    pub async fn remove(&self, id: CardId) -> bool {
        match self.service.delete_card(id).await {
            Ok(()) => {
                info!(id, "card deleted");
                self.fetch_all().await;
                true
            }
            Err(e) => {
                error!(id, error = %e, "failed to delete card");
                false
            }
        }
    }
}
