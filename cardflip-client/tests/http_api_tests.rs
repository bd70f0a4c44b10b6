use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use cardflip_client::{ApiConfig, HttpApi, DEFAULT_BASE_URL};
use cardflip_core::{
    ApiClient, ApiError, Difficulty, Flashcard, FlashcardDraft, FlashcardPatch, MemoryApi, Topic,
};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Mock REST server backed by MemoryApi, speaking the backend's wire shapes.
struct MockServer {
    api: MemoryApi,
    fail_cards: AtomicBool,
}

#[derive(Serialize)]
struct ErrorOut {
    status: u16,
    message: String,
}

#[derive(Deserialize)]
struct TopicIn {
    name: String,
}

type Rejection = (StatusCode, Json<ErrorOut>);

fn reject(err: ApiError) -> Rejection {
    let (status, message) = match &err {
        ApiError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{what} not found")),
        ApiError::Validation(errors) => (StatusCode::BAD_REQUEST, errors.to_string()),
        ApiError::Server { message, .. } => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()),
        ApiError::Network(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
    };
    (
        status,
        Json(ErrorOut {
            status: status.as_u16(),
            message,
        }),
    )
}

async fn list_cards(State(st): State<Arc<MockServer>>) -> Result<Json<Vec<Flashcard>>, Rejection> {
    if st.fail_cards.load(Ordering::SeqCst) {
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorOut {
                status: 500,
                message: "boom".into(),
            }),
        ));
    }
    st.api.list_cards().await.map(Json).map_err(reject)
}

async fn create_card(
    State(st): State<Arc<MockServer>>,
    Json(draft): Json<FlashcardDraft>,
) -> Result<Json<Flashcard>, Rejection> {
    st.api.create_card(&draft).await.map(Json).map_err(reject)
}

async fn update_card(
    State(st): State<Arc<MockServer>>,
    Path(id): Path<i64>,
    Json(patch): Json<FlashcardPatch>,
) -> Result<Json<Flashcard>, Rejection> {
    st.api.update_card(id, &patch).await.map(Json).map_err(reject)
}

async fn delete_card(
    State(st): State<Arc<MockServer>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, Rejection> {
    st.api
        .delete_card(id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(reject)
}

async fn list_topics(State(st): State<Arc<MockServer>>) -> Result<Json<Vec<Topic>>, Rejection> {
    st.api.list_topics().await.map(Json).map_err(reject)
}

async fn get_topic(
    State(st): State<Arc<MockServer>>,
    Path(id): Path<i64>,
) -> Result<Json<Topic>, Rejection> {
    st.api.get_topic(id).await.map(Json).map_err(reject)
}

async fn create_topic(
    State(st): State<Arc<MockServer>>,
    Json(body): Json<TopicIn>,
) -> Result<Json<Topic>, Rejection> {
    st.api.create_topic(&body.name).await.map(Json).map_err(reject)
}

async fn delete_topic(
    State(st): State<Arc<MockServer>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, Rejection> {
    st.api
        .delete_topic(id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(reject)
}

async fn spawn_server() -> (String, Arc<MockServer>) {
    let state = Arc::new(MockServer {
        api: MemoryApi::new(),
        fail_cards: AtomicBool::new(false),
    });
    let app = Router::new()
        .route("/api/cards", get(list_cards).post(create_card))
        .route("/api/cards/:id", patch(update_card).delete(delete_card))
        .route("/api/topics", get(list_topics).post(create_topic))
        .route("/api/topics/:id", get(get_topic).delete(delete_topic))
        .with_state(Arc::clone(&state));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service()).await.unwrap();
    });
    (format!("http://{addr}/api"), state)
}

#[tokio::test(flavor = "multi_thread")]
async fn full_round_trip() {
    let (base_url, _state) = spawn_server().await;
    let api = HttpApi::new(ApiConfig { base_url });

    let topic = api.create_topic("Math").await.unwrap();
    assert_eq!(api.list_topics().await.unwrap(), vec![topic.clone()]);
    assert_eq!(api.get_topic(topic.id).await.unwrap(), topic);

    let created = api
        .create_card(&FlashcardDraft {
            question: "What is 2+2?".into(),
            answer: "4".into(),
            topic_id: topic.id,
            difficulty: Difficulty::Easy,
        })
        .await
        .unwrap();
    assert!(created.id > 0);

    let listed = api.list_cards().await.unwrap();
    assert_eq!(listed, vec![created.clone()]);

    let patched = api
        .update_card(
            created.id,
            &FlashcardPatch {
                answer: Some("four".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(patched.answer, "four");
    assert_eq!(patched.question, created.question);

    api.delete_card(created.id).await.unwrap();
    assert!(api.list_cards().await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn not_found_mapping() {
    let (base_url, _state) = spawn_server().await;
    let api = HttpApi::new(ApiConfig { base_url });

    let err = api.delete_card(42).await.unwrap_err();
    assert_eq!(err, ApiError::NotFound("card"));

    let err = api.get_topic(42).await.unwrap_err();
    assert_eq!(err, ApiError::NotFound("topic"));
}

#[tokio::test(flavor = "multi_thread")]
async fn second_delete_surfaces_not_found() {
    let (base_url, _state) = spawn_server().await;
    let api = HttpApi::new(ApiConfig { base_url });

    let topic = api.create_topic("Math").await.unwrap();
    assert!(api.delete_topic(topic.id).await.is_ok());
    let err = api.delete_topic(topic.id).await.unwrap_err();
    assert_eq!(err, ApiError::NotFound("topic"));
}

#[tokio::test(flavor = "multi_thread")]
async fn server_rejection_is_surfaced_verbatim() {
    let (base_url, _state) = spawn_server().await;
    let api = HttpApi::new(ApiConfig { base_url });

    let err = api.create_topic("   ").await.unwrap_err();
    let ApiError::Validation(errors) = err else {
        panic!("expected validation error");
    };
    assert_eq!(errors.get("server").len(), 1);
    assert!(errors.get("server")[0].contains("empty"));
}

#[tokio::test(flavor = "multi_thread")]
async fn five_hundred_maps_to_server_error() {
    let (base_url, state) = spawn_server().await;
    let api = HttpApi::new(ApiConfig { base_url });

    state.fail_cards.store(true, Ordering::SeqCst);
    let err = api.list_cards().await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Server {
            status: 500,
            message: "boom".into()
        }
    );
}

#[test]
fn default_config_uses_the_shared_base_url() {
    assert_eq!(ApiConfig::default().base_url, DEFAULT_BASE_URL);
}

#[tokio::test(flavor = "multi_thread")]
async fn transport_failure_maps_to_network_error() {
    // nothing listens here
    let api = HttpApi::new(ApiConfig {
        base_url: "http://127.0.0.1:9".into(),
    });
    let err = api.list_cards().await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}
