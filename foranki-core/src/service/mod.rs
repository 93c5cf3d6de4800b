use crate::{Card, CardId, CardUpdate, CoreError, Generation, Modified, ModifyRequest, NewCard};
use async_trait::async_trait;

pub mod memory;

/// Remote card storage: `/cards` and `/cards/{id}`.
#[async_trait]
pub trait CardService: Send + Sync {
    async fn list_cards(&self) -> Result<Vec<Card>, CoreError>;
    async fn create_card(&self, card: &NewCard) -> Result<CardId, CoreError>;
    async fn update_card(&self, id: CardId, update: &CardUpdate) -> Result<(), CoreError>;
    async fn delete_card(&self, id: CardId) -> Result<(), CoreError>;
}

/// Remote AI assistance: `/generate` and `/generate/modify`.
#[async_trait]
pub trait GenerationService: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<Generation, CoreError>;
    async fn modify(&self, request: &ModifyRequest) -> Result<Modified, CoreError>;
}
