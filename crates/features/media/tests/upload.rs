#![cfg(feature = "server")]

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use std::path::Path;
use tower::ServiceExt;
use tscope_domain::config::ApiConfig;
use tscope_kernel::domain::registry::InitializedSlice;
use tscope_kernel::server::ApiState;

const BOUNDARY: &str = "tscope-boundary";
const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

fn app(upload_dir: &Path, max_upload_bytes: usize) -> axum::Router {
    let mut cfg = ApiConfig::default();
    cfg.media.upload_dir = upload_dir.to_path_buf();
    cfg.media.processing_delay_ms = 0;
    cfg.media.max_upload_bytes = max_upload_bytes;

    let media = tscope_media::build(&cfg.media).unwrap();
    let state =
        ApiState::builder().config(cfg).register_slice(InitializedSlice::new(media)).build().unwrap();
    let (router, _) = tscope_media::router(max_upload_bytes).with_state(state).split_for_parts();
    router
}

fn multipart(field: &str, file_name: Option<&str>, contents: &[u8]) -> Body {
    let disposition = match file_name {
        Some(name) => format!("form-data; name=\"{field}\"; filename=\"{name}\""),
        None => format!("form-data; name=\"{field}\""),
    };
    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: {disposition}\r\nContent-Type: application/octet-stream\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    Body::from(body)
}

async fn upload(router: axum::Router, body: Body) -> (StatusCode, Value) {
    let request = Request::post("/upload")
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(body)
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn valid_image_is_stored_and_passes_inspection() {
    let dir = tempfile::tempdir().unwrap();

    let (status, body) = upload(app(dir.path(), 1 << 20), multipart("file", Some("holiday photo.PNG"), PNG)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "verdict": "Real", "confidence": 0.95, "details": "Frames analyzed; no tampering detected." })
    );
    let stored: Vec<_> = std::fs::read_dir(dir.path()).unwrap().map(|e| e.unwrap().file_name()).collect();
    assert_eq!(stored.len(), 1);
    assert!(stored[0].to_str().unwrap().ends_with("-holiday_photo.PNG"));
}

#[tokio::test]
async fn mismatched_contents_are_flagged() {
    let dir = tempfile::tempdir().unwrap();

    let (status, body) = upload(app(dir.path(), 1 << 20), multipart("file", Some("clip.mp4"), PNG)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["verdict"], "Fake/Manipulated");
    assert_eq!(body["confidence"], 0.65);
    assert!(body["details"].as_str().unwrap().starts_with("Error during analysis: "));
}

#[tokio::test]
async fn dataset_names_are_classified_by_prefix() {
    let dir = tempfile::tempdir().unwrap();

    let (_, body) = upload(app(dir.path(), 1 << 20), multipart("file", Some("videos_fake_17.mp4"), b"x")).await;
    assert_eq!(body["verdict"], "Fake");
    assert_eq!(body["confidence"], 0.98);
}

#[tokio::test]
async fn missing_or_invalid_files_are_rejected() {
    let dir = tempfile::tempdir().unwrap();

    let (status, body) = upload(app(dir.path(), 1 << 20), multipart("other", Some("a.png"), PNG)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "No file uploaded" }));

    let (status, body) = upload(app(dir.path(), 1 << 20), multipart("file", Some("script.sh"), b"#!")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid file type" }));

    let (status, body) = upload(app(dir.path(), 1 << 20), multipart("file", None, PNG)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid file type" }));

    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0, "rejected uploads are not stored");
}

#[tokio::test]
async fn oversized_bodies_are_refused() {
    let dir = tempfile::tempdir().unwrap();

    let (status, _) = upload(app(dir.path(), 64), multipart("file", Some("big.png"), &[0_u8; 1024])).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
