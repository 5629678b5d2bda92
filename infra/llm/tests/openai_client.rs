use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tscope_llm::{ChatModel, ChatRequest, LlmError, OpenAiClient};

async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/v1")
}

async fn echo_completion(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some("Bearer sk-test") {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "bad key" })));
    }
    let last = body["messages"].as_array().and_then(|m| m.last()).cloned().unwrap_or_default();
    let reply = format!("  {} says: {}  ", body["model"].as_str().unwrap_or("?"), last["content"]);
    (StatusCode::OK, Json(json!({ "choices": [{ "message": { "role": "assistant", "content": reply } }] })))
}

#[tokio::test]
async fn reply_text_is_returned_verbatim() {
    let base = spawn(Router::new().route("/v1/chat/completions", post(echo_completion))).await;
    let client = OpenAiClient::builder("sk-test").base_url(base).build().unwrap();

    let reply = client
        .complete(&ChatRequest::new("gpt-4o-mini").system("sys").user("ping").max_tokens(16))
        .await
        .unwrap();

    assert_eq!(reply, "  gpt-4o-mini says: \"ping\"  ");
}

#[tokio::test]
async fn non_success_status_is_an_api_error() {
    let base = spawn(Router::new().route("/v1/chat/completions", post(echo_completion))).await;
    let client = OpenAiClient::builder("sk-wrong").base_url(base).build().unwrap();

    let err = client.complete(&ChatRequest::new("gpt-4o-mini").user("ping")).await.unwrap_err();

    match err {
        LlmError::Api { status, body, .. } => {
            assert_eq!(status, 401);
            assert!(body.contains("bad key"));
        },
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn empty_choices_is_reported() {
    let router = Router::new()
        .route("/v1/chat/completions", post(|| async { Json(json!({ "choices": [] })) }));
    let base = spawn(router).await;
    let client = OpenAiClient::builder("sk-test").base_url(base).build().unwrap();

    let err = client.complete(&ChatRequest::new("gpt-4o-mini").user("ping")).await.unwrap_err();
    assert!(matches!(err, LlmError::EmptyResponse { .. }));
}
