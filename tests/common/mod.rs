// Mock completion API for integration tests
#![allow(dead_code)]

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use autoanosis_ai_backend::{
    config::Config,
    routes::create_router,
    state::AppState,
};
use axum::{
    Json, Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Response, StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

/// How the mock answers `/v1/chat/completions`.
#[derive(Clone)]
pub enum Behavior {
    Reply(String),
    Fail { status: StatusCode, body: String },
    NoChoices,
    Delay(Duration),
}

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct MockState {
    behavior: Behavior,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

pub struct MockUpstream {
    pub base_url: String,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl MockUpstream {
    pub async fn start(behavior: Behavior) -> Self {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            behavior,
            captured: captured.clone(),
        };

        let app = Router::new()
            .route("/v1/chat/completions", post(completions))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}/v1"),
            captured,
        }
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.captured.lock().unwrap().clone()
    }
}

async fn completions(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> axum::response::Response {
    state.captured.lock().unwrap().push(CapturedRequest {
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });

    match state.behavior {
        Behavior::Reply(text) => Json(completion(&text)).into_response(),
        Behavior::Fail { status, body } => (status, body).into_response(),
        Behavior::NoChoices => Json(json!({ "id": "chatcmpl-test", "choices": [] })).into_response(),
        Behavior::Delay(delay) => {
            tokio::time::sleep(delay).await;
            Json(completion("too late")).into_response()
        }
    }
}

fn completion(text: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": text },
            "finish_reason": "stop"
        }]
    })
}

pub fn config_for(base_url: &str) -> Config {
    let base_url = base_url.to_string();
    Config::from_lookup(move |key| match key {
        "OPENAI_API_KEY" => Some("sk-test".to_string()),
        "OPENAI_BASE_URL" => Some(base_url.clone()),
        _ => None,
    })
    .unwrap()
}

pub fn app_with(config: &Config) -> Router {
    let state = Arc::new(AppState::new(config).unwrap());
    create_router(&config.allowed_origins).with_state(state)
}

/// Base URL nothing is listening on.
pub fn dead_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}/v1")
}

pub async fn read_json<T: DeserializeOwned>(response: Response<Body>) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn read_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
