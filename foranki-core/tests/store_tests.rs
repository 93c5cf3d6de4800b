use async_trait::async_trait;
use foranki_core::memory::MemoryCardService;
use foranki_core::{Card, CardId, CardService, CardStore, CardUpdate, CoreError, NewCard, FETCH_FAILED};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::oneshot;

fn store_with(cards: Vec<Card>) -> (Arc<MemoryCardService>, CardStore) {
    let svc = Arc::new(MemoryCardService::with_cards(cards));
    let store = CardStore::new(svc.clone());
    (svc, store)
}

#[tokio::test]
async fn starts_empty_until_fetched() {
    let (_svc, store) = store_with(vec![Card::new(7, "q", "a", "Default")]);
    assert!(store.cards().is_empty());
    assert!(!store.loading());
    assert_eq!(store.error(), None);

    store.fetch_all().await;
    assert_eq!(store.cards().len(), 1);
    assert_eq!(store.get(7).map(|c| c.front), Some("q".to_string()));
}

#[tokio::test]
async fn failed_fetch_sets_error_and_recovery_clears_it() {
    let (svc, store) = store_with(vec![Card::new(1, "q", "a", "Default")]);
    svc.set_failing(true);

    store.fetch_all().await;
    assert!(!store.loading());
    let err = store.error().expect("error after failed fetch");
    assert!(!err.is_empty());
    assert_eq!(err, FETCH_FAILED);
    assert!(store.cards().is_empty());

    svc.set_failing(false);
    store.fetch_all().await;
    assert_eq!(store.error(), None);
    assert_eq!(store.cards().len(), 1);
}

#[tokio::test]
async fn add_refetches_and_shows_new_card() {
    let (_svc, store) = store_with(vec![]);
    store.fetch_all().await;

    let id = store.add("capital of France", "Paris", "Geo").await;
    let id = id.expect("card created");

    let cards = store.cards();
    let card = cards.iter().find(|c| c.id == id).expect("new card listed");
    assert_eq!(card.front, "capital of France");
    assert_eq!(card.back, "Paris");
    assert_eq!(card.deck_name, "Geo");
}

#[tokio::test]
async fn add_with_tags_keeps_them() {
    let (_svc, store) = store_with(vec![]);
    let mut new = NewCard::new("f", "b", "d");
    new.tags = Some(vec!["x".into(), "y".into()]);
    let id = store.add_card(new).await.expect("created");
    assert_eq!(store.get(id).map(|c| c.tags), Some(vec!["x".to_string(), "y".to_string()]));
}

#[tokio::test]
async fn failed_add_is_silent_and_leaves_list_alone() {
    let (svc, store) = store_with(vec![Card::new(1, "q", "a", "Default")]);
    store.fetch_all().await;

    svc.set_failing(true);
    assert_eq!(store.add("f", "b", "d").await, None);
    assert_eq!(store.error(), None);
    assert_eq!(store.cards().len(), 1);
    assert!(!store.loading());
}

#[tokio::test]
async fn update_replaces_fields_and_tags() {
    let (_svc, store) = store_with(vec![Card::new(3, "old", "old", "Default").with_tags(["t"])]);
    store.fetch_all().await;

    assert!(store.update(3, "new front", "new back", Some(vec!["u".into()])).await);
    let card = store.get(3).expect("still listed");
    assert_eq!(card.front, "new front");
    assert_eq!(card.back, "new back");
    assert_eq!(card.tags, vec!["u"]);

    assert!(store.update(3, "again", "again", None).await);
    assert_eq!(store.get(3).map(|c| c.tags), Some(vec!["u".to_string()]));
}

#[tokio::test]
async fn update_of_unknown_card_is_silent() {
    let (_svc, store) = store_with(vec![]);
    assert!(!store.update(99, "f", "b", None).await);
    assert_eq!(store.error(), None);
}

#[tokio::test]
async fn remove_refetches() {
    let (_svc, store) = store_with(vec![
        Card::new(1, "a", "a", "d"),
        Card::new(2, "b", "b", "d"),
    ]);
    store.fetch_all().await;
    assert!(store.remove(1).await);
    assert_eq!(store.cards().iter().map(|c| c.id).collect::<Vec<_>>(), vec![2]);
    assert!(!store.remove(1).await);
}

/// Hands out list responses only when the test releases them.
struct GatedService {
    gates: Mutex<VecDeque<oneshot::Receiver<Vec<Card>>>>,
}

#[async_trait]
impl CardService for GatedService {
    async fn list_cards(&self) -> Result<Vec<Card>, CoreError> {
        let gate = self.gates.lock().pop_front().ok_or(CoreError::Unknown)?;
        gate.await.map_err(|_| CoreError::Unknown)
    }

    async fn create_card(&self, _card: &NewCard) -> Result<CardId, CoreError> {
        Err(CoreError::Unknown)
    }

    async fn update_card(&self, _id: CardId, _update: &CardUpdate) -> Result<(), CoreError> {
        Err(CoreError::Unknown)
    }

    async fn delete_card(&self, _id: CardId) -> Result<(), CoreError> {
        Err(CoreError::Unknown)
    }
}

#[tokio::test]
async fn older_fetch_resolving_late_is_dropped() {
    let (first_tx, first_rx) = oneshot::channel();
    let (second_tx, second_rx) = oneshot::channel();
    let svc = Arc::new(GatedService {
        gates: Mutex::new(VecDeque::from([first_rx, second_rx])),
    });
    let store = CardStore::new(svc);

    let release = async {
        second_tx.send(vec![Card::new(2, "new", "new", "d")]).ok();
        tokio::task::yield_now().await;
        first_tx.send(vec![Card::new(1, "stale", "stale", "d")]).ok();
    };

    tokio::join!(store.fetch_all(), store.fetch_all(), release);

    let cards = store.cards();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].front, "new");
    assert!(!store.loading());
}

#[tokio::test]
async fn loading_holds_while_fetch_is_outstanding() {
    let (tx, rx) = oneshot::channel();
    let svc = Arc::new(GatedService {
        gates: Mutex::new(VecDeque::from([rx])),
    });
    let store = CardStore::new(svc);
    assert!(!store.loading());

    let check = async {
        assert!(store.loading());
        assert!(store.cards().is_empty());
        tx.send(vec![Card::new(1, "q", "a", "d")]).ok();
    };

    tokio::join!(store.fetch_all(), check);

    assert!(!store.loading());
    assert_eq!(store.cards().len(), 1);
}
