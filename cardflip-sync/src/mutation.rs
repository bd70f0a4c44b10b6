use crate::cache::SyncClient;
use crate::keys::{delete_dependents, CacheKey, Resource};
use cardflip_core::{
    schema, ApiError, CardId, Flashcard, FlashcardDraft, FlashcardForm, FlashcardPatch, Topic,
    TopicId,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// A user intent against the remote API. Each operation declares which
/// resources it invalidates on success, so invalidation rules are data.
#[derive(Clone, Debug)]
pub enum MutationOp {
    CreateCard(FlashcardForm),
    UpdateCard { id: CardId, form: FlashcardForm },
    DeleteCard(CardId),
    CreateTopic { name: String },
    DeleteTopic(TopicId),
}

impl MutationOp {
    pub fn resource(&self) -> Resource {
        match self {
            MutationOp::CreateCard(_)
            | MutationOp::UpdateCard { .. }
            | MutationOp::DeleteCard(_) => Resource::Cards,
            MutationOp::CreateTopic { .. } | MutationOp::DeleteTopic(_) => Resource::Topics,
        }
    }

    pub fn invalidates(&self) -> Vec<Resource> {
        let mut out = vec![self.resource()];
        if matches!(self, MutationOp::DeleteCard(_) | MutationOp::DeleteTopic(_)) {
            out.extend(delete_dependents(self.resource()));
        }
        out
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MutationOutcome {
    Card(Flashcard),
    Topic(Topic),
    Deleted,
}

impl MutationOutcome {
    pub fn card(&self) -> Option<&Flashcard> {
        match self {
            MutationOutcome::Card(c) => Some(c),
            _ => None,
        }
    }

    pub fn topic(&self) -> Option<&Topic> {
        match self {
            MutationOutcome::Topic(t) => Some(t),
            _ => None,
        }
    }
}

impl SyncClient {
    /// Exactly one network call, no auto-retry. Success invalidates the
    /// resources the operation declares; failure leaves the cache untouched,
    /// except `NotFound`, which invalidates the mutated resource so stale
    /// rows disappear on the next read.
    pub async fn mutate(&self, op: MutationOp) -> Result<MutationOutcome, ApiError> {
        let result = self.execute(&op).await;
        match &result {
            Ok(_) => {
                for resource in op.invalidates() {
                    debug!(?resource, "mutation succeeded, invalidating");
                    self.invalidate(resource);
                }
            }
            Err(ApiError::NotFound(_)) => {
                debug!(resource = ?op.resource(), "mutation target vanished, invalidating");
                self.invalidate(op.resource());
            }
            Err(_) => {}
        }
        result
    }

    async fn execute(&self, op: &MutationOp) -> Result<MutationOutcome, ApiError> {
        match op {
            MutationOp::CreateCard(form) => {
                let draft = self.validated(form).await?;
                self.api().create_card(&draft).await.map(MutationOutcome::Card)
            }
            MutationOp::UpdateCard { id, form } => {
                let patch = FlashcardPatch::from(self.validated(form).await?);
                self.api()
                    .update_card(*id, &patch)
                    .await
                    .map(MutationOutcome::Card)
            }
            MutationOp::DeleteCard(id) => self
                .api()
                .delete_card(*id)
                .await
                .map(|_| MutationOutcome::Deleted),
            MutationOp::CreateTopic { name } => {
                schema::validate_topic_name(name).map_err(ApiError::Validation)?;
                self.api()
                    .create_topic(name)
                    .await
                    .map(MutationOutcome::Topic)
            }
            MutationOp::DeleteTopic(id) => self
                .api()
                .delete_topic(*id)
                .await
                .map(|_| MutationOutcome::Deleted),
        }
    }

    /// Schema check at the mutation boundary; a failing form never reaches
    /// the network. Topic existence is checked against the cached topic list.
    async fn validated(&self, form: &FlashcardForm) -> Result<FlashcardDraft, ApiError> {
        let observation = self.observe(CacheKey::Topics).await;
        let topics: Option<Vec<Topic>> = observation.topics().map(<[Topic]>::to_vec);
        match topics {
            Some(topics) => schema::validate(form, &topics).map_err(ApiError::Validation),
            None => Err(observation
                .error
                .unwrap_or_else(|| ApiError::Network("topics unavailable".into()))),
        }
    }
}

/// Tracks whether a mutation for one interactive unit is still settling, so
/// the view can refuse duplicate submissions.
///
/// A long-lived view holds one tracker per submit surface (e.g. the create
/// form and each row's delete button get their own), clones it into the
/// submit handler, and calls [`begin`](MutationTracker::begin) there: `None`
/// means a previous submission is still in flight and the intent is dropped;
/// otherwise the guard is held across the `mutate` await and clears the flag
/// when it drops. A one-shot caller like the CLI has nothing to debounce and
/// skips the tracker entirely.
#[derive(Clone, Default)]
pub struct MutationTracker {
    pending: Arc<AtomicBool>,
}

impl MutationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst)
    }

    /// Returns `None` while a previous submission is still pending.
    pub fn begin(&self) -> Option<PendingGuard> {
        self.pending
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| PendingGuard {
                flag: Arc::clone(&self.pending),
            })
    }
}

/// Clears the pending flag when dropped, i.e. when the mutation settles.
pub struct PendingGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}
