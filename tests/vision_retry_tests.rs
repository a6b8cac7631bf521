// Retry behaviour of the HTTP vision engine against a local stub server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use serde_json::json;
use shift_receipts::shared::infrastructure::vision::http::{HttpVisionEngine, VisionConfig};
use shift_receipts::shared::infrastructure::vision::{ReceiptImage, VisionEngine, VisionError};

#[derive(Clone)]
enum Reply {
    Status(StatusCode),
    Stall(Duration),
}

#[derive(Clone)]
struct Stub {
    calls: Arc<AtomicUsize>,
    script: Vec<Reply>,
}

async fn completions(State(stub): State<Stub>) -> impl IntoResponse {
    let call = stub.calls.fetch_add(1, Ordering::SeqCst);
    match stub.script.get(call) {
        Some(Reply::Status(status)) => {
            return (*status, Json(json!({"error": {"message": "nope"}}))).into_response();
        }
        Some(Reply::Stall(delay)) => tokio::time::sleep(*delay).await,
        None => {}
    }
    Json(json!({
        "choices": [{"message": {"content": "{\"rapportnr\": \"R7\"}"}}]
    }))
    .into_response()
}

async fn serve(script: Vec<Reply>) -> (SocketAddr, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/v1/chat/completions", post(completions))
        .with_state(Stub {
            calls: calls.clone(),
            script,
        });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, calls)
}

fn config(addr: SocketAddr) -> VisionConfig {
    VisionConfig {
        api_key: "test-key".into(),
        endpoint: format!("http://{addr}/v1/chat/completions"),
        retry_delay: Duration::from_millis(5),
        timeout: Duration::from_secs(5),
        ..VisionConfig::default()
    }
}

fn engine(addr: SocketAddr) -> HttpVisionEngine {
    HttpVisionEngine::new(config(addr)).unwrap()
}

fn impatient_engine(addr: SocketAddr) -> HttpVisionEngine {
    HttpVisionEngine::new(VisionConfig {
        timeout: Duration::from_millis(100),
        ..config(addr)
    })
    .unwrap()
}

fn status(code: StatusCode) -> Reply {
    Reply::Status(code)
}

fn image() -> ReceiptImage {
    ReceiptImage::from_base64("image/png", "iVBORw0KGgo=").unwrap()
}

#[tokio::test]
async fn retries_after_rate_limiting() {
    let (addr, calls) = serve(vec![status(StatusCode::TOO_MANY_REQUESTS)]).await;

    let text = engine(addr).read_receipt(&image()).await.unwrap();

    assert_eq!(text, "{\"rapportnr\": \"R7\"}");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn gives_up_once_retries_are_exhausted() {
    let (addr, calls) = serve(vec![status(StatusCode::TOO_MANY_REQUESTS); 5]).await;

    let result = engine(addr).read_receipt(&image()).await;

    assert_eq!(result, Err(VisionError::RateLimited));
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn does_not_retry_a_denied_request() {
    let (addr, calls) = serve(vec![status(StatusCode::FORBIDDEN)]).await;

    let result = engine(addr).read_receipt(&image()).await;

    assert_eq!(result, Err(VisionError::AccessDenied));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn reports_the_upstream_error_message() {
    let (addr, calls) = serve(vec![status(StatusCode::BAD_REQUEST)]).await;

    let result = engine(addr).read_receipt(&image()).await;

    assert_eq!(
        result,
        Err(VisionError::Upstream {
            status: 400,
            message: "nope".into()
        })
    );
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn retries_after_a_timed_out_attempt() {
    let (addr, calls) = serve(vec![Reply::Stall(Duration::from_millis(500))]).await;

    let text = impatient_engine(addr).read_receipt(&image()).await.unwrap();

    assert_eq!(text, "{\"rapportnr\": \"R7\"}");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn reports_a_timeout_once_every_attempt_stalls() {
    let (addr, calls) = serve(vec![Reply::Stall(Duration::from_millis(500)); 5]).await;

    let result = impatient_engine(addr).read_receipt(&image()).await;

    assert_eq!(result, Err(VisionError::Timeout));
    assert_eq!(
        calls.load(Ordering::SeqCst),
        VisionConfig::default().max_retries + 1
    );
}
