use crate::{Flashcard, TopicId};

/// The topic filter selection as it comes from the UI: "All" or a topic id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TopicSelection {
    All,
    Topic(TopicId),
}

impl TopicSelection {
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Some(TopicSelection::All);
        }
        s.parse::<TopicId>().ok().map(TopicSelection::Topic)
    }
}

/// Pure derived view over the cached list; preserves order, never mutates.
pub fn filter_by_topic(cards: &[Flashcard], selection: &TopicSelection) -> Vec<Flashcard> {
    match selection {
        TopicSelection::All => cards.to_vec(),
        TopicSelection::Topic(id) => cards
            .iter()
            .filter(|c| c.topic_id == *id)
            .cloned()
            .collect(),
    }
}
