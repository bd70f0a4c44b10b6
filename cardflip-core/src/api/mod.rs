use crate::{ApiError, CardId, Flashcard, FlashcardDraft, FlashcardPatch, Topic, TopicId};
use async_trait::async_trait;

pub mod memory;

pub use memory::MemoryApi;

/// One operation per (resource, verb) pair against the remote API. No retries
/// here; every failure is returned to the caller unchanged.
#[async_trait]
pub trait ApiClient: Send + Sync {
    // Cards
    async fn list_cards(&self) -> Result<Vec<Flashcard>, ApiError>;
    async fn create_card(&self, draft: &FlashcardDraft) -> Result<Flashcard, ApiError>;
    async fn update_card(&self, id: CardId, patch: &FlashcardPatch) -> Result<Flashcard, ApiError>;
    async fn delete_card(&self, id: CardId) -> Result<(), ApiError>;

    // Topics
    async fn list_topics(&self) -> Result<Vec<Topic>, ApiError>;
    async fn get_topic(&self, id: TopicId) -> Result<Topic, ApiError>;
    async fn create_topic(&self, name: &str) -> Result<Topic, ApiError>;
    async fn delete_topic(&self, id: TopicId) -> Result<(), ApiError>;
}
