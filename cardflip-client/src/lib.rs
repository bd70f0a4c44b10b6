use async_trait::async_trait;
use cardflip_core::{
    ApiClient, ApiError, CardId, Flashcard, FlashcardDraft, FlashcardPatch, Topic, TopicId,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Where the backend lives in its default dev setup.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Fixed configuration for the remote API; base URL is not runtime input.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Reqwest-backed [`ApiClient`]. Pure request/response; no retries, no cache.
pub struct HttpApi {
    http: reqwest::Client,
    base: String,
}

impl HttpApi {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

#[derive(Serialize)]
struct TopicIn<'a> {
    name: &'a str,
}

/// Error body shape of the backend: `{ status, message }`, parsed leniently.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

fn transport(err: reqwest::Error) -> ApiError {
    ApiError::Network(err.to_string())
}

async fn check(
    resp: reqwest::Response,
    target: &'static str,
) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = resp
        .json::<ErrorBody>()
        .await
        .map(|b| b.message)
        .unwrap_or_default();
    debug!(status = status.as_u16(), %message, "request rejected");
    match status.as_u16() {
        404 => Err(ApiError::NotFound(target)),
        400..=499 => Err(ApiError::rejected(message)),
        code => Err(ApiError::Server {
            status: code,
            message,
        }),
    }
}

#[async_trait]
impl ApiClient for HttpApi {
    async fn list_cards(&self) -> Result<Vec<Flashcard>, ApiError> {
        let resp = self
            .http
            .get(self.url("/cards"))
            .send()
            .await
            .map_err(transport)?;
        check(resp, "card").await?.json().await.map_err(transport)
    }

    async fn create_card(&self, draft: &FlashcardDraft) -> Result<Flashcard, ApiError> {
        let resp = self
            .http
            .post(self.url("/cards"))
            .json(draft)
            .send()
            .await
            .map_err(transport)?;
        check(resp, "card").await?.json().await.map_err(transport)
    }

    async fn update_card(&self, id: CardId, patch: &FlashcardPatch) -> Result<Flashcard, ApiError> {
        let resp = self
            .http
            .patch(self.url(&format!("/cards/{id}")))
            .json(patch)
            .send()
            .await
            .map_err(transport)?;
        check(resp, "card").await?.json().await.map_err(transport)
    }

    async fn delete_card(&self, id: CardId) -> Result<(), ApiError> {
        let resp = self
            .http
            .delete(self.url(&format!("/cards/{id}")))
            .send()
            .await
            .map_err(transport)?;
        check(resp, "card").await.map(|_| ())
    }

    async fn list_topics(&self) -> Result<Vec<Topic>, ApiError> {
        let resp = self
            .http
            .get(self.url("/topics"))
            .send()
            .await
            .map_err(transport)?;
        check(resp, "topic").await?.json().await.map_err(transport)
    }

    async fn get_topic(&self, id: TopicId) -> Result<Topic, ApiError> {
        let resp = self
            .http
            .get(self.url(&format!("/topics/{id}")))
            .send()
            .await
            .map_err(transport)?;
        check(resp, "topic").await?.json().await.map_err(transport)
    }

    async fn create_topic(&self, name: &str) -> Result<Topic, ApiError> {
        let resp = self
            .http
            .post(self.url("/topics"))
            .json(&TopicIn { name })
            .send()
            .await
            .map_err(transport)?;
        check(resp, "topic").await?.json().await.map_err(transport)
    }

    async fn delete_topic(&self, id: TopicId) -> Result<(), ApiError> {
        let resp = self
            .http
            .delete(self.url(&format!("/topics/{id}")))
            .send()
            .await
            .map_err(transport)?;
        check(resp, "topic").await.map(|_| ())
    }
}
