//! Mock Gemini backend for integration tests
//!
//! Implements the one `generateContent` route the proxy calls, returning
//! canned inline PCM or a configured failure status.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router, routing};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use tokio_util::sync::CancellationToken;

/// What the mock answers with
enum MockReply {
    /// Inline audio payload carrying these PCM bytes
    Audio(Vec<u8>),
    /// A bare HTTP failure status
    Status(u16),
    /// A well-formed response with no audio payload
    Empty,
}

struct MockGeminiState {
    request_count: AtomicU32,
    last_voice: Mutex<Option<String>>,
    reply: MockReply,
}

/// Mock Gemini backend that returns predictable responses
pub struct MockGemini {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockGeminiState>,
}

impl MockGemini {
    /// Start a mock that answers with 100 ms of silence
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(MockReply::Audio(vec![0u8; 4800])).await
    }

    /// Start a mock that answers with the given PCM payload
    pub async fn start_with_pcm(pcm: Vec<u8>) -> anyhow::Result<Self> {
        Self::start_inner(MockReply::Audio(pcm)).await
    }

    /// Start a mock that fails every request with the given status
    pub async fn start_failing(status: u16) -> anyhow::Result<Self> {
        Self::start_inner(MockReply::Status(status)).await
    }

    /// Start a mock whose responses carry no audio payload
    pub async fn start_empty() -> anyhow::Result<Self> {
        Self::start_inner(MockReply::Empty).await
    }

    async fn start_inner(reply: MockReply) -> anyhow::Result<Self> {
        let state = Arc::new(MockGeminiState {
            request_count: AtomicU32::new(0),
            last_voice: Mutex::new(None),
            reply,
        });

        let app = Router::new()
            .route("/v1beta/models/{model_call}", routing::post(handle_generate))
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
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of generation requests received
    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::Relaxed)
    }

    /// Voice name carried by the most recent request
    pub fn last_voice(&self) -> Option<String> {
        self.state.last_voice.lock().unwrap().clone()
    }
}

impl Drop for MockGemini {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_generate(
    State(state): State<Arc<MockGeminiState>>,
    Json(body): Json<serde_json::Value>,
) -> axum::response::Response {
    state.request_count.fetch_add(1, Ordering::Relaxed);

    let voice = body
        .pointer("/generationConfig/speechConfig/voiceConfig/prebuiltVoiceConfig/voiceName")
        .and_then(serde_json::Value::as_str);
    if let Some(voice) = voice {
        *state.last_voice.lock().unwrap() = Some(voice.to_owned());
    }

    match &state.reply {
        MockReply::Audio(pcm) => Json(serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [{
                        "inlineData": {
                            "mimeType": "audio/L16;codec=pcm;rate=24000",
                            "data": BASE64.encode(pcm),
                        }
                    }]
                }
            }]
        }))
        .into_response(),
        MockReply::Status(status) => (
            StatusCode::from_u16(*status).expect("mock status is valid"),
            Json(serde_json::json!({
                "error": {"message": "mock upstream failure", "status": status}
            })),
        )
            .into_response(),
        MockReply::Empty => Json(serde_json::json!({"candidates": []})).into_response(),
    }
}
