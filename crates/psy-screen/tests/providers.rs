//! HTTP-level scenarios for the provider clients and the remote client.
//!
//! Fake Gemini, Groq and interpretation endpoints run on an ephemeral local
//! port; each counts the requests it receives.

mod common {
    use axum::Router;
    use psy_screen::catalog::{Catalog, TestDefinition};
    use psy_screen::config::ProviderSettings;
    use psy_screen::scoring::{score, AnswerSet, TestResult};
    use std::net::SocketAddr;

    pub(super) async fn spawn(router: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("fake server runs");
        });
        addr
    }

    pub(super) fn settings(addr: SocketAddr, model: &str) -> ProviderSettings {
        ProviderSettings::new("fake-provider-key-0001", model, format!("http://{addr}"))
            .expect("valid settings")
    }

    pub(super) fn scored(id: &str) -> (TestResult, TestDefinition) {
        let definition = Catalog::builtin().get(id).expect("builtin test").clone();
        let answers: AnswerSet = definition.questions.iter().map(|q| (q.id, 2)).collect();
        (score(&definition, &answers, chrono::Utc::now()), definition)
    }
}

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use common::{scored, settings, spawn};
use psy_screen::interpretation::{
    build_prompt, degraded_notice, GeminiClient, GroqClient, InterpretationCascade,
    InterpretationProvider, InterpretationSource, ProviderError, RemoteInterpretationClient,
    RetryPolicy,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

type Hits = Arc<AtomicUsize>;

fn gemini_rate_limited(hits: Hits) -> Router {
    Router::new()
        .route(
            "/v1beta/models/:model_action",
            post(|State(hits): State<Hits>| async move {
                hits.fetch_add(1, Ordering::SeqCst);
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    Json(json!({ "error": { "code": 429, "status": "RESOURCE_EXHAUSTED" } })),
                )
            }),
        )
        .with_state(hits)
}

fn groq_ok(hits: Hits) -> Router {
    Router::new()
        .route(
            "/chat/completions",
            post(
                |State(hits): State<Hits>, headers: HeaderMap, Json(body): Json<Value>| async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    let authorized = headers
                        .get("authorization")
                        .and_then(|value| value.to_str().ok())
                        == Some("Bearer fake-provider-key-0001");
                    if !authorized || body["messages"][0]["role"] != "system" {
                        return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "bad request" })));
                    }
                    (
                        StatusCode::OK,
                        Json(json!({
                            "choices": [{ "message": { "role": "assistant", "content": "## From Groq" } }]
                        })),
                    )
                },
            ),
        )
        .with_state(hits)
}

#[tokio::test]
async fn two_rate_limits_move_cascade_to_groq_without_third_gemini_call() {
    let gemini_hits = Hits::default();
    let groq_hits = Hits::default();
    let gemini_addr = spawn(gemini_rate_limited(gemini_hits.clone())).await;
    let groq_addr = spawn(groq_ok(groq_hits.clone())).await;

    let http = reqwest::Client::new();
    let providers: Vec<Arc<dyn InterpretationProvider>> = vec![
        Arc::new(GeminiClient::new(http.clone(), settings(gemini_addr, "gemini-test"))),
        Arc::new(GroqClient::new(http, settings(groq_addr, "llama-test"))),
    ];
    let cascade = InterpretationCascade::new(
        providers,
        RetryPolicy::default().with_backoff(Duration::from_millis(10)),
    );

    let (result, definition) = scored("gad-7");
    let interpretation = cascade.interpret(&result, &definition).await;

    assert_eq!(interpretation.source, InterpretationSource::Groq);
    assert_eq!(interpretation.text, "## From Groq");
    assert_eq!(gemini_hits.load(Ordering::SeqCst), 2);
    assert_eq!(groq_hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn gemini_client_sends_key_header_and_joins_parts() {
    let hits = Hits::default();
    let router = Router::new()
        .route(
            "/v1beta/models/:model_action",
            post(
                |State(hits): State<Hits>, headers: HeaderMap, Json(body): Json<Value>| async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    let keyed = headers
                        .get("x-goog-api-key")
                        .and_then(|value| value.to_str().ok())
                        == Some("fake-provider-key-0001");
                    if !keyed || body["systemInstruction"]["parts"][0]["text"].is_null() {
                        return (StatusCode::FORBIDDEN, Json(json!({})));
                    }
                    (
                        StatusCode::OK,
                        Json(json!({
                            "candidates": [{ "content": { "parts": [{ "text": "Part one. " }, { "text": "Part two." }] } }]
                        })),
                    )
                },
            ),
        )
        .with_state(hits.clone());
    let addr = spawn(router).await;

    let client = GeminiClient::new(reqwest::Client::new(), settings(addr, "gemini-test"));
    let (result, definition) = scored("phq-9");
    let text = client
        .generate(&build_prompt(&result, &definition))
        .await
        .expect("fake gemini answers");

    assert_eq!(text, "Part one. Part two.");
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn rejected_credentials_are_permanent_errors() {
    let router = Router::new().route(
        "/chat/completions",
        post(|| async { (StatusCode::UNAUTHORIZED, "invalid api key") }),
    );
    let addr = spawn(router).await;

    let client = GroqClient::new(reqwest::Client::new(), settings(addr, "llama-test"));
    let (result, definition) = scored("bai");
    let err = client
        .generate(&build_prompt(&result, &definition))
        .await
        .expect_err("401 surfaces as error");

    assert_eq!(
        err,
        ProviderError::Rejected {
            status: 401,
            body: "invalid api key".to_string()
        }
    );
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn remote_client_returns_service_text() {
    let router = Router::new().route(
        "/api/generate",
        post(|Json(body): Json<Value>| async move {
            let score = body["result"]["totalScore"].clone();
            Json(json!({ "text": format!("Remote interpretation for {score}") }))
        }),
    );
    let addr = spawn(router).await;

    let client = RemoteInterpretationClient::new(&format!("http://{addr}"), Duration::from_secs(5))
        .expect("client builds");
    let (result, definition) = scored("phq-9");
    let text = client.interpret(&result, &definition).await;

    assert_eq!(text, "Remote interpretation for 9");
}

#[tokio::test]
async fn remote_client_degrades_on_service_error() {
    let router = Router::new().route(
        "/api/generate",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "API key not configured on server" })),
            )
        }),
    );
    let addr = spawn(router).await;

    let client = RemoteInterpretationClient::new(&format!("http://{addr}"), Duration::from_secs(5))
        .expect("client builds");
    let (result, definition) = scored("gad-7");

    let err = client
        .try_interpret(&result, &definition)
        .await
        .expect_err("500 surfaces as error");
    assert!(err.to_string().contains("API key not configured on server"));

    let text = client.interpret(&result, &definition).await;
    assert_eq!(text, degraded_notice(&result));
    assert!(text.contains(&format!("{} out of {}", result.total_score, result.max_possible_score)));
}

#[tokio::test]
async fn remote_client_degrades_when_service_is_down() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let client = RemoteInterpretationClient::new(&format!("http://{addr}"), Duration::from_secs(2))
        .expect("client builds");
    let (result, definition) = scored("bai");

    assert_eq!(
        client.interpret(&result, &definition).await,
        degraded_notice(&result)
    );
}
