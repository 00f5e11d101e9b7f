//! Mock NovelGPT upstream for integration tests
//!
//! Serves canned chat completions, either buffered or streamed as `data:`
//! lines, and records what the proxy sent.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

/// Text produced by a successful completion
pub const COMPLETION_TEXT: &str = "Once upon a time";

/// Content deltas produced by a successful stream, in order
pub const STREAM_DELTAS: [&str; 3] = ["Once", " upon", " a time"];

/// How the mock answers chat completion requests
#[derive(Clone)]
enum Behavior {
    Reply,
    ReplyWith(Value),
    Fail { status: StatusCode, body: String },
    MalformedStream,
}

/// Mock upstream that returns predictable responses
pub struct MockUpstream {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockUpstreamState>,
}

struct MockUpstreamState {
    behavior: Behavior,
    request_count: AtomicU32,
    last_body: Mutex<Option<Value>>,
    last_authorization: Mutex<Option<String>>,
}

impl MockUpstream {
    /// Start a mock that answers every request successfully
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(Behavior::Reply).await
    }

    /// Start a mock that answers non-streaming requests with `body`
    pub async fn start_with_body(body: Value) -> anyhow::Result<Self> {
        Self::start_inner(Behavior::ReplyWith(body)).await
    }

    /// Start a mock that answers every request with `status` and `body`
    pub async fn start_failing(status: u16, body: &str) -> anyhow::Result<Self> {
        let status = StatusCode::from_u16(status)?;
        Self::start_inner(Behavior::Fail {
            status,
            body: body.to_owned(),
        })
        .await
    }

    /// Start a mock whose stream breaks after the first chunk
    pub async fn start_malformed_stream() -> anyhow::Result<Self> {
        Self::start_inner(Behavior::MalformedStream).await
    }

    async fn start_inner(behavior: Behavior) -> anyhow::Result<Self> {
        let state = Arc::new(MockUpstreamState {
            behavior,
            request_count: AtomicU32::new(0),
            last_body: Mutex::new(None),
            last_authorization: Mutex::new(None),
        });

        let app = Router::new()
            .route("/v1/chat/completions", routing::post(handle_chat_completions))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring the mock as the upstream
    ///
    /// Includes `/v1` since the client appends `/chat/completions`
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Number of completion requests received
    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::Relaxed)
    }

    /// JSON body of the most recent request
    pub fn last_body(&self) -> Option<Value> {
        self.state.last_body.lock().expect("lock not poisoned").clone()
    }

    /// `Authorization` header of the most recent request
    pub fn last_authorization(&self) -> Option<String> {
        self.state.last_authorization.lock().expect("lock not poisoned").clone()
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Body returned for a successful non-streaming request
pub fn completion_body() -> Value {
    json!({
        "id": "chatcmpl-mock",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "nalang-xl",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": COMPLETION_TEXT},
            "finish_reason": "stop",
            "logprobs": null
        }],
        "usage": {"prompt_tokens": 12, "completion_tokens": 4, "total_tokens": 16},
        "system_fingerprint": null
    })
}

fn chunk(delta: &Value, finish_reason: Option<&str>) -> String {
    let chunk = json!({
        "id": "chatcmpl-mock-stream",
        "object": "chat.completion.chunk",
        "created": 1_700_000_000,
        "model": "nalang-xl",
        "choices": [{"index": 0, "delta": delta, "finish_reason": finish_reason}]
    });
    format!("data: {chunk}\n\n")
}

fn streaming_body() -> String {
    let mut body = chunk(&json!({"role": "assistant", "content": ""}), None);
    body.push_str(": keep-alive\n\n");

    for delta in STREAM_DELTAS {
        body.push_str(&chunk(&json!({"content": delta}), None));
        body.push('\n');
    }

    body.push_str(&chunk(&json!({}), Some("stop")));
    body.push_str("data: [DONE]\n\n");
    body
}

fn malformed_stream_body() -> String {
    let mut body = chunk(&json!({"role": "assistant", "content": "Once"}), None);
    body.push_str("data: {\"id\": \"broken\n\n");
    body.push_str(&chunk(&json!({"content": "never sent"}), None));
    body.push_str("data: [DONE]\n\n");
    body
}

fn event_stream(body: String) -> Response {
    ([(header::CONTENT_TYPE, "text/event-stream")], body).into_response()
}

async fn handle_chat_completions(
    State(state): State<Arc<MockUpstreamState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.request_count.fetch_add(1, Ordering::Relaxed);

    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(ToOwned::to_owned);
    *state.last_authorization.lock().expect("lock not poisoned") = authorization;

    let stream = body["stream"].as_bool().unwrap_or(false);
    *state.last_body.lock().expect("lock not poisoned") = Some(body);

    match &state.behavior {
        Behavior::Fail { status, body } => (*status, body.clone()).into_response(),
        Behavior::Reply if stream => event_stream(streaming_body()),
        Behavior::Reply => Json(completion_body()).into_response(),
        Behavior::ReplyWith(body) => Json(body.clone()).into_response(),
        Behavior::MalformedStream => event_stream(malformed_stream_body()),
    }
}
