use crate::{Card, CardId, CardUpdate, CoreError, NewCard};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

/// In-process stand-in for the remote card service.
///
/// Cards keep insertion order. `set_failing(true)` makes every call fail
/// with a transport error, which is how the store's error paths are driven
/// without a network.
pub struct MemoryCardService {
    cards: RwLock<Vec<Card>>,
    next_id: RwLock<CardId>,
    failing: AtomicBool,
}

impl Default for MemoryCardService {
    fn default() -> Self {
        Self {
            cards: RwLock::new(Vec::new()),
            next_id: RwLock::new(1),
            failing: AtomicBool::new(false),
        }
    }
}

impl MemoryCardService {
    pub fn with_cards(cards: Vec<Card>) -> Self {
        let next = cards.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        Self {
            cards: RwLock::new(cards),
            next_id: RwLock::new(next),
            failing: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), CoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(CoreError::Transport("connection refused".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl crate::service::CardService for MemoryCardService {
    async fn list_cards(&self) -> Result<Vec<Card>, CoreError> {
        self.check()?;
        Ok(self.cards.read().clone())
    }

    async fn create_card(&self, card: &NewCard) -> Result<CardId, CoreError> {
        self.check()?;
        let id = {
            let mut next = self.next_id.write();
            let id = *next;
            *next += 1;
            id
        };
        let created = Card::new(id, &card.front, &card.back, &card.deck_name)
            .with_tags(card.tags.clone().unwrap_or_default());
        self.cards.write().push(created);
        Ok(id)
    }

    async fn update_card(&self, id: CardId, update: &CardUpdate) -> Result<(), CoreError> {
        self.check()?;
        let mut m = self.cards.write();
        let Some(card) = m.iter_mut().find(|c| c.id == id) else {
            return Err(CoreError::NotFound("card"));
        };
        card.front = update.front.clone();
        card.back = update.back.clone();
        if let Some(tags) = &update.tags {
            card.tags = tags.clone();
        }
        Ok(())
    }

    async fn delete_card(&self, id: CardId) -> Result<(), CoreError> {
        self.check()?;
        let mut m = self.cards.write();
        let before = m.len();
        m.retain(|c| c.id != id);
        if m.len() == before {
            return Err(CoreError::NotFound("card"));
        }
        Ok(())
    }
}
