use crate::{ApiError, CardId, Flashcard, FlashcardDraft, FlashcardPatch, Topic, TopicId};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

/// In-process stand-in for the remote API. Behaves like the real server:
/// assigns ids, rejects cards for unknown topics, cascades topic deletion.
pub struct MemoryApi {
    cards: RwLock<HashMap<CardId, Flashcard>>,
    topics: RwLock<HashMap<TopicId, Topic>>,
    next_id: AtomicI64,
}

impl MemoryApi {
    pub fn new() -> Self {
        Self {
            cards: RwLock::new(HashMap::new()),
            topics: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    fn assign_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Seed a topic directly, bypassing the API surface. Test setup helper.
    pub fn seed_topic(&self, name: &str) -> Topic {
        let topic = Topic {
            id: self.assign_id(),
            name: name.to_string(),
        };
        self.topics.write().insert(topic.id, topic.clone());
        topic
    }
}

impl Default for MemoryApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl crate::api::ApiClient for MemoryApi {
    async fn list_cards(&self) -> Result<Vec<Flashcard>, ApiError> {
        let mut v: Vec<Flashcard> = self.cards.read().values().cloned().collect();
        v.sort_by_key(|c| c.id);
        Ok(v)
    }

    async fn create_card(&self, draft: &FlashcardDraft) -> Result<Flashcard, ApiError> {
        if !self.topics.read().contains_key(&draft.topic_id) {
            return Err(ApiError::NotFound("topic"));
        }
        let card = draft.clone().into_card(self.assign_id());
        self.cards.write().insert(card.id, card.clone());
        Ok(card)
    }

    async fn update_card(&self, id: CardId, patch: &FlashcardPatch) -> Result<Flashcard, ApiError> {
        if let Some(topic_id) = patch.topic_id {
            if !self.topics.read().contains_key(&topic_id) {
                return Err(ApiError::NotFound("topic"));
            }
        }
        let mut m = self.cards.write();
        let Some(card) = m.get_mut(&id) else {
            return Err(ApiError::NotFound("card"));
        };
        if let Some(question) = &patch.question {
            card.question = question.clone();
        }
        if let Some(answer) = &patch.answer {
            card.answer = answer.clone();
        }
        if let Some(topic_id) = patch.topic_id {
            card.topic_id = topic_id;
        }
        if let Some(difficulty) = patch.difficulty {
            card.difficulty = difficulty;
        }
        Ok(card.clone())
    }

    async fn delete_card(&self, id: CardId) -> Result<(), ApiError> {
        self.cards
            .write()
            .remove(&id)
            .map(|_| ())
            .ok_or(ApiError::NotFound("card"))
    }

    async fn list_topics(&self) -> Result<Vec<Topic>, ApiError> {
        let mut v: Vec<Topic> = self.topics.read().values().cloned().collect();
        v.sort_by_key(|t| t.id);
        Ok(v)
    }

    async fn get_topic(&self, id: TopicId) -> Result<Topic, ApiError> {
        self.topics
            .read()
            .get(&id)
            .cloned()
            .ok_or(ApiError::NotFound("topic"))
    }

    async fn create_topic(&self, name: &str) -> Result<Topic, ApiError> {
        if name.trim().is_empty() {
            return Err(ApiError::rejected("topic name cannot be empty"));
        }
        let topic = Topic {
            id: self.assign_id(),
            name: name.to_string(),
        };
        self.topics.write().insert(topic.id, topic.clone());
        Ok(topic)
    }

    async fn delete_topic(&self, id: TopicId) -> Result<(), ApiError> {
        self.topics
            .write()
            .remove(&id)
            .ok_or(ApiError::NotFound("topic"))?;
        // Cascade: the server deletes cards that referenced the topic.
        let mut cards = self.cards.write();
        let ids: Vec<CardId> = cards
            .values()
            .filter(|c| c.topic_id == id)
            .map(|c| c.id)
            .collect();
        for cid in ids {
            cards.remove(&cid);
        }
        Ok(())
    }
}
