use serde::{Deserialize, Serialize};

pub type CardId = i64;
pub type TopicId = i64;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "EASY" => Some(Difficulty::Easy),
            "MEDIUM" => Some(Difficulty::Medium),
            "HARD" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub id: CardId,
    pub question: String,
    pub answer: String,
    pub topic_id: TopicId,
    pub difficulty: Difficulty,
}

/// A flashcard pending creation; the server assigns the id.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardDraft {
    pub question: String,
    pub answer: String,
    pub topic_id: TopicId,
    pub difficulty: Difficulty,
}

impl FlashcardDraft {
    pub fn into_card(self, id: CardId) -> Flashcard {
        Flashcard {
            id,
            question: self.question,
            answer: self.answer,
            topic_id: self.topic_id,
            difficulty: self.difficulty,
        }
    }
}

/// Partial update for `PATCH /cards/{id}`; absent fields are left untouched.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_id: Option<TopicId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
}

impl From<FlashcardDraft> for FlashcardPatch {
    fn from(draft: FlashcardDraft) -> Self {
        Self {
            question: Some(draft.question),
            answer: Some(draft.answer),
            topic_id: Some(draft.topic_id),
            difficulty: Some(draft.difficulty),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Topic {
    pub id: TopicId,
    pub name: String,
}
