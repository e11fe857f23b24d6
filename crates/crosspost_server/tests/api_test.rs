use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use crosspost_client::{Payload, PayloadPart, RawResponse, Transport, UploadClient};
use crosspost_error::{GenerateError, TransportError, TransportErrorKind};
use crosspost_generate::TextGenerator;
use crosspost_server::{AppState, router};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tower::ServiceExt;

const BOUNDARY: &str = "crosspost-test-boundary";

/// Transport that answers with a fixed result and remembers each payload.
struct StubTransport {
    reply: Result<RawResponse, TransportErrorKind>,
    seen: Mutex<Vec<Payload>>,
    // Staged files observed while the request was in flight
    staged: Mutex<Vec<(PathBuf, bool)>>,
}

impl StubTransport {
    fn new(reply: Result<&str, TransportErrorKind>) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.map(|body| RawResponse::new(200, body)),
            seen: Mutex::new(Vec::new()),
            staged: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn send(&self, payload: &Payload) -> Result<RawResponse, TransportError> {
        for path in payload.file_paths() {
            self.staged
                .lock()
                .unwrap()
                .push((path.to_path_buf(), path.exists()));
        }
        self.seen.lock().unwrap().push(payload.clone());
        self.reply.clone().map_err(TransportError::new)
    }
}

struct EchoGenerator;

#[async_trait]
impl TextGenerator for EchoGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        Ok(format!("generated: {prompt}"))
    }

    fn model_name(&self) -> &str {
        "echo"
    }
}

fn state_with(stub: &Arc<StubTransport>, dir: &TempDir) -> AppState {
    AppState::new(dir.path(), 16 * 1024 * 1024)
        .with_uploader(UploadClient::with_shared_transport(stub.clone()))
}

/// Hand-built multipart body with text `fields` and `(name, file_name, content)` files.
fn multipart(fields: &[(&str, &str)], files: &[(&str, &str, &str)]) -> Request<Body> {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    for (name, file_name, content) in files {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n{content}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));

    Request::builder()
        .method("POST")
        .uri("/api/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn send(state: AppState, request: Request<Body>) -> (StatusCode, Value) {
    let response = router(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn staging_is_empty(dir: &TempDir) -> bool {
    std::fs::read_dir(dir.path()).unwrap().next().is_none()
}

#[tokio::test]
async fn platforms_table_is_served_verbatim() {
    let dir = TempDir::new().unwrap();
    let (status, body) = send(AppState::new(dir.path(), 1024), get("/api/platforms")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "video": ["tiktok", "instagram", "linkedin", "youtube", "facebook", "x", "threads", "pinterest"],
            "photos": ["tiktok", "instagram", "linkedin", "facebook", "x", "threads", "pinterest"],
            "text": ["linkedin", "x", "facebook", "threads"]
        })
    );
}

#[tokio::test]
async fn status_reports_capabilities() {
    let dir = TempDir::new().unwrap();
    let state = AppState::new(dir.path(), 1024).with_generator(EchoGenerator);

    let (status, body) = send(state, get("/api/status")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["upload_available"], false);
    assert_eq!(body["generate_available"], true);
    assert_eq!(body["model"], "echo");
}

#[tokio::test]
async fn unknown_route_is_json_404() {
    let dir = TempDir::new().unwrap();
    let (status, body) = send(AppState::new(dir.path(), 1024), get("/nope")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Endpoint not found");
}

#[tokio::test]
async fn upload_without_credential_is_unavailable() {
    let dir = TempDir::new().unwrap();
    let request = multipart(&[("type", "text"), ("platforms[]", "x")], &[]);

    let (status, body) = send(AppState::new(dir.path(), 1024 * 1024), request).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn text_upload_succeeds() {
    let dir = TempDir::new().unwrap();
    let stub = StubTransport::new(Ok(r#"{"success": true, "results": {"x": {"success": true}}}"#));
    let request = multipart(
        &[
            ("type", "text"),
            ("title", "Hello world"),
            ("platforms[]", "x"),
        ],
        &[],
    );

    let (status, body) = send(state_with(&stub, &dir), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["platforms"]["x"]["status"], "success");

    let seen = stub.seen.lock().unwrap();
    assert_eq!(seen[0].endpoint(), "upload_text");
    assert_eq!(seen[0].text_values("user"), vec!["default_user"]);
}

#[tokio::test]
async fn invalid_platform_is_400_without_upstream_call() {
    let dir = TempDir::new().unwrap();
    let stub = StubTransport::new(Ok(r#"{"success": true}"#));
    let request = multipart(
        &[
            ("type", "text"),
            ("title", "Hello"),
            ("platforms[]", "instagram"),
        ],
        &[],
    );

    let (status, body) = send(state_with(&stub, &dir), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("instagram"));
    assert!(stub.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn missing_platforms_and_bad_type_are_400() {
    let dir = TempDir::new().unwrap();
    let stub = StubTransport::new(Ok(r#"{"success": true}"#));

    let (status, _) = send(
        state_with(&stub, &dir),
        multipart(&[("type", "text"), ("title", "Hello")], &[]),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        state_with(&stub, &dir),
        multipart(&[("type", "podcast"), ("platforms[]", "x")], &[]),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid upload type");
    assert!(stub.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn video_file_is_staged_then_removed() {
    let dir = TempDir::new().unwrap();
    let stub = StubTransport::new(Ok(r#"{"success": true}"#));
    let request = multipart(
        &[
            ("title", "My clip"),
            ("user", "brand"),
            ("platforms[]", "tiktok"),
            ("platforms[]", "youtube"),
        ],
        &[("file", "clip.mp4", "fake video bytes")],
    );

    let (status, _) = send(state_with(&stub, &dir), request).await;

    assert_eq!(status, StatusCode::OK);
    let staged = stub.staged.lock().unwrap();
    assert_eq!(staged.len(), 1);
    assert!(staged[0].0.ends_with("clip.mp4"));
    assert!(staged[0].1, "file must exist while the upload is in flight");
    assert!(staging_is_empty(&dir));
}

#[tokio::test]
async fn wrong_video_extension_is_400_and_cleaned_up() {
    let dir = TempDir::new().unwrap();
    let stub = StubTransport::new(Ok(r#"{"success": true}"#));
    let request = multipart(
        &[
            ("title", "My clip"),
            ("platforms[]", "tiktok"),
        ],
        &[("file", "notes.txt", "plain text")],
    );

    let (status, body) = send(state_with(&stub, &dir), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid file type");
    assert!(staging_is_empty(&dir));
}

#[tokio::test]
async fn photos_skip_unsupported_files() {
    let dir = TempDir::new().unwrap();
    let stub = StubTransport::new(Ok(r#"{"success": true}"#));
    let request = multipart(
        &[
            ("type", "photos"),
            ("title", "Album"),
            ("caption", "Weekend"),
            ("platforms[]", "instagram"),
            ("urls[]", "https://cdn.example.com/c.jpg"),
        ],
        &[
            ("files[]", "a.png", "png"),
            ("files[]", "b.exe", "exe"),
        ],
    );

    let (status, _) = send(state_with(&stub, &dir), request).await;

    assert_eq!(status, StatusCode::OK);
    let seen = stub.seen.lock().unwrap();
    let photos: Vec<_> = seen[0]
        .parts()
        .iter()
        .filter(|part| part.name() == "photos[]")
        .collect();
    assert_eq!(photos.len(), 2);
    assert!(matches!(photos[0], PayloadPart::File { file_name, .. } if file_name == "a.png"));
    assert_eq!(seen[0].text_values("caption"), vec!["Weekend"]);
}

#[tokio::test]
async fn photos_without_valid_images_are_400() {
    let dir = TempDir::new().unwrap();
    let stub = StubTransport::new(Ok(r#"{"success": true}"#));
    let request = multipart(
        &[
            ("type", "photos"),
            ("title", "Album"),
            ("platforms[]", "instagram"),
        ],
        &[("files[]", "b.exe", "exe")],
    );

    let (status, body) = send(state_with(&stub, &dir), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No valid image files provided");
}

#[tokio::test]
async fn url_field_never_reads_server_files() {
    let dir = TempDir::new().unwrap();
    let private = TempDir::new().unwrap();
    let secret = private.path().join("server-secret.txt");
    std::fs::write(&secret, "do not publish").unwrap();
    let stub = StubTransport::new(Ok(r#"{"success": true}"#));

    let request = multipart(
        &[
            ("type", "video"),
            ("title", "My clip"),
            ("url", secret.to_str().unwrap()),
            ("platforms[]", "tiktok"),
        ],
        &[],
    );
    let (status, body) = send(state_with(&stub, &dir), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("server-secret.txt"));
    assert!(stub.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn photo_urls_that_are_paths_are_dropped() {
    let dir = TempDir::new().unwrap();
    let private = TempDir::new().unwrap();
    let secret = private.path().join("id_rsa.png");
    std::fs::write(&secret, "key material").unwrap();
    let stub = StubTransport::new(Ok(r#"{"success": true}"#));

    let request = multipart(
        &[
            ("type", "photos"),
            ("title", "Album"),
            ("platforms[]", "instagram"),
            ("urls[]", secret.to_str().unwrap()),
            ("urls[]", "https://cdn.example.com/ok.jpg"),
        ],
        &[],
    );
    let (status, _) = send(state_with(&stub, &dir), request).await;

    assert_eq!(status, StatusCode::OK);
    let seen = stub.seen.lock().unwrap();
    assert!(seen[0].file_paths().is_empty());
    assert_eq!(
        seen[0].text_values("photos[]"),
        vec!["https://cdn.example.com/ok.jpg"]
    );
}

#[tokio::test]
async fn partial_failure_is_207() {
    let dir = TempDir::new().unwrap();
    let stub = StubTransport::new(Ok(
        r#"{"success": true, "results": {"linkedin": {"success": true}, "x": {"success": false, "error": "duplicate"}}}"#,
    ));
    let request = multipart(
        &[
            ("type", "text"),
            ("title", "Hello"),
            ("platforms[]", "linkedin"),
            ("platforms", "x"),
        ],
        &[],
    );

    let (status, body) = send(state_with(&stub, &dir), request).await;

    assert_eq!(status, StatusCode::MULTI_STATUS);
    assert_eq!(body["success"], false);
    assert_eq!(body["partial"], true);
    assert_eq!(body["failed"], json!(["x"]));
}

#[tokio::test]
async fn upstream_rejection_is_400_and_network_failure_is_500() {
    let dir = TempDir::new().unwrap();
    let text = [("type", "text"), ("title", "Hello"), ("platforms[]", "x")];

    let rejected = StubTransport::new(Err(TransportErrorKind::Auth("bad key".into())));
    let (status, body) = send(state_with(&rejected, &dir), multipart(&text, &[])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let unreachable = StubTransport::new(Err(TransportErrorKind::Network("refused".into())));
    let (status, _) = send(state_with(&unreachable, &dir), multipart(&text, &[])).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn oversized_body_is_json_413() {
    let dir = TempDir::new().unwrap();
    let stub = StubTransport::new(Ok(r#"{"success": true}"#));
    let state = AppState::new(dir.path(), 1024)
        .with_uploader(UploadClient::with_shared_transport(stub.clone()));
    let big = "a".repeat(64 * 1024);
    let request = multipart(&[("platforms[]", "tiktok")], &[("file", "clip.mp4", &big)]);

    let (status, body) = send(state, request).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(body["error"].as_str().unwrap().starts_with("File too large"));
    assert!(stub.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn generate_uses_configured_generator() {
    let dir = TempDir::new().unwrap();
    let state = AppState::new(dir.path(), 1024).with_generator(EchoGenerator);
    let request = Request::builder()
        .method("POST")
        .uri("/api/generate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"type": "content_ideas", "prompt": "hiking"}"#))
        .unwrap();

    let (status, body) = send(state, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["content"].as_str().unwrap().contains("content ideas for: hiking"));
}

#[tokio::test]
async fn generate_status_codes() {
    let dir = TempDir::new().unwrap();
    let json_request = |body: &'static str| {
        Request::builder()
            .method("POST")
            .uri("/api/generate")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    };

    let (status, _) = send(
        AppState::new(dir.path(), 1024),
        json_request(r#"{"prompt": "hiking"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, body) = send(
        AppState::new(dir.path(), 1024).with_generator(EchoGenerator),
        json_request(r#"{"prompt": "  "}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No prompt provided");
}
