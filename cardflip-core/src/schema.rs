use crate::{Difficulty, FieldErrors, FlashcardDraft, Topic, TopicId};

pub const QUESTION_MIN: usize = 5;
pub const QUESTION_MAX: usize = 255;
pub const ANSWER_MAX: usize = 255;

/// Raw form input, as typed; `validate` turns it into a well-formed draft.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlashcardForm {
    pub question: String,
    pub answer: String,
    pub topic_id: TopicId,
    pub difficulty: String,
}

/// Checks every rule and reports all failures together, keyed by wire field
/// name. Evaluated at the form boundary and again at the mutation boundary.
pub fn validate(form: &FlashcardForm, topics: &[Topic]) -> Result<FlashcardDraft, FieldErrors> {
    let mut errors = FieldErrors::default();

    let question_len = form.question.chars().count();
    if question_len < QUESTION_MIN {
        errors.push(
            "question",
            format!("question should have at least {QUESTION_MIN} characters"),
        );
    }
    if question_len > QUESTION_MAX {
        errors.push(
            "question",
            format!("question cannot exceed {QUESTION_MAX} characters"),
        );
    }
    if !form.question.trim().ends_with('?') {
        errors.push("question", "question must end with a '?'");
    }

    let answer_len = form.answer.chars().count();
    if answer_len < 1 {
        errors.push("answer", "answer should have at least one character");
    }
    if answer_len > ANSWER_MAX {
        errors.push("answer", format!("answer cannot exceed {ANSWER_MAX} characters"));
    }

    let difficulty = Difficulty::parse(&form.difficulty);
    if difficulty.is_none() {
        errors.push("difficulty", "difficulty must be one of EASY, MEDIUM or HARD");
    }

    if form.topic_id < 1 {
        errors.push("topicId", "topic is required");
    } else if !topics.iter().any(|t| t.id == form.topic_id) {
        errors.push("topicId", "unknown topic");
    }

    match (difficulty, errors.is_empty()) {
        (Some(difficulty), true) => Ok(FlashcardDraft {
            question: form.question.clone(),
            answer: form.answer.clone(),
            topic_id: form.topic_id,
            difficulty,
        }),
        _ => Err(errors),
    }
}

pub fn validate_topic_name(name: &str) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    if name.trim().is_empty() {
        errors.push("name", "topic name cannot be empty");
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
