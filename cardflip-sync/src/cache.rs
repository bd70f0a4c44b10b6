use crate::keys::{CacheKey, Resource};
use cardflip_core::{ApiClient, ApiError, Flashcard, Topic};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// Last-known value for a cache key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Snapshot {
    Cards(Vec<Flashcard>),
    Topics(Vec<Topic>),
    Topic(Topic),
}

impl Snapshot {
    pub fn as_cards(&self) -> Option<&[Flashcard]> {
        match self {
            Snapshot::Cards(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_topics(&self) -> Option<&[Topic]> {
        match self {
            Snapshot::Topics(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_topic(&self) -> Option<&Topic> {
        match self {
            Snapshot::Topic(t) => Some(t),
            _ => None,
        }
    }
}

/// What an observer sees for a key: the last successful value (if any) plus
/// in-flight and error status.
#[derive(Clone, Debug)]
pub struct Observation {
    pub data: Option<Arc<Snapshot>>,
    pub is_loading: bool,
    pub is_error: bool,
    pub error: Option<ApiError>,
}

impl Observation {
    pub fn cards(&self) -> Option<&[Flashcard]> {
        self.data.as_deref().and_then(Snapshot::as_cards)
    }

    pub fn topics(&self) -> Option<&[Topic]> {
        self.data.as_deref().and_then(Snapshot::as_topics)
    }

    pub fn topic(&self) -> Option<&Topic> {
        self.data.as_deref().and_then(Snapshot::as_topic)
    }
}

#[derive(Default)]
struct Entry {
    value: Option<Arc<Snapshot>>,
    error: Option<ApiError>,
    stale: bool,
    // Generation of the most recently started fetch and of the response
    // currently applied. A response is applied only if newer than `applied`,
    // so an out-of-order arrival for a superseded request is dropped.
    started: u64,
    applied: u64,
    inflight: Option<watch::Receiver<bool>>,
}

type Entries = Arc<Mutex<HashMap<CacheKey, Entry>>>;

/// Cached, deduplicated read model over an [`ApiClient`].
///
/// Reads share one in-flight request per key (single-flight); a fresh value
/// is served immediately while a re-fetch runs in the background; an
/// invalidated entry forces the next observation to wait for a fresh
/// response. Dropping an `observe` future stops that observer but never
/// aborts the shared fetch, which still updates the cache.
pub struct SyncClient {
    api: Arc<dyn ApiClient>,
    entries: Entries,
}

impl SyncClient {
    pub fn new(api: Arc<dyn ApiClient>) -> Self {
        Self {
            api,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn api(&self) -> &Arc<dyn ApiClient> {
        &self.api
    }

    pub async fn observe(&self, key: CacheKey) -> Observation {
        loop {
            let mut rx = {
                let mut entries = self.entries.lock();
                let entry = entries.entry(key).or_default();
                let needs_fetch = entry.stale
                    || (entry.value.is_none()
                        && entry.error.is_none()
                        && entry.inflight.is_none());
                if needs_fetch {
                    self.start_fetch(key, entry);
                } else if let Some(value) = &entry.value {
                    return Observation {
                        data: Some(Arc::clone(value)),
                        is_loading: entry.inflight.is_some(),
                        is_error: entry.error.is_some(),
                        error: entry.error.clone(),
                    };
                } else if entry.inflight.is_none() {
                    // A previous fetch failed before any value existed;
                    // surface the failure, retry only on explicit refetch.
                    return Observation {
                        data: None,
                        is_loading: false,
                        is_error: true,
                        error: entry.error.clone(),
                    };
                }
                match entry.inflight.clone() {
                    Some(rx) => rx,
                    None => continue,
                }
            };
            let _ = rx.changed().await;
        }
    }

    /// Marks every entry of the resource family stale. The re-fetch happens
    /// on the next observation, not here.
    pub fn invalidate(&self, resource: Resource) {
        let mut entries = self.entries.lock();
        for (key, entry) in entries.iter_mut() {
            if key.resource() == resource {
                debug!(key = %key, "cache entry invalidated");
                entry.stale = true;
            }
        }
    }

    /// Explicit retry path: force one key stale and observe it.
    pub async fn refetch(&self, key: CacheKey) -> Observation {
        {
            let mut entries = self.entries.lock();
            entries.entry(key).or_default().stale = true;
        }
        self.observe(key).await
    }

    fn start_fetch(&self, key: CacheKey, entry: &mut Entry) {
        entry.started += 1;
        entry.stale = false;
        let generation = entry.started;
        let (tx, rx) = watch::channel(false);
        entry.inflight = Some(rx);
        debug!(key = %key, generation, "fetch started");

        let api = Arc::clone(&self.api);
        let entries = Arc::clone(&self.entries);
        tokio::spawn(async move {
            let result = fetch(api.as_ref(), key).await;
            {
                let mut entries = entries.lock();
                if let Some(entry) = entries.get_mut(&key) {
                    if generation > entry.applied {
                        entry.applied = generation;
                        match result {
                            Ok(snapshot) => {
                                debug!(key = %key, generation, "fetch applied");
                                entry.value = Some(Arc::new(snapshot));
                                entry.error = None;
                            }
                            Err(err) => {
                                // Keep the previous value; a transient
                                // failure must not blank a populated list.
                                debug!(key = %key, generation, error = %err, "fetch failed");
                                entry.error = Some(err);
                            }
                        }
                    } else {
                        debug!(key = %key, generation, "superseded response dropped");
                    }
                    if generation == entry.started {
                        entry.inflight = None;
                    }
                }
            }
            let _ = tx.send(true);
        });
    }
}

async fn fetch(api: &dyn ApiClient, key: CacheKey) -> Result<Snapshot, ApiError> {
    match key {
        CacheKey::Cards => api.list_cards().await.map(Snapshot::Cards),
        CacheKey::Topics => api.list_topics().await.map(Snapshot::Topics),
        CacheKey::Topic(id) => api.get_topic(id).await.map(Snapshot::Topic),
    }
}
