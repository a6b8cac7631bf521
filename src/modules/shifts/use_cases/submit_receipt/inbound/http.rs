use axum::{
    Json, extract::State, extract::rejection::JsonRejection, http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::modules::shifts::core::corrections::Correction;
use crate::modules::shifts::core::extraction::RawExtraction;
use crate::modules::shifts::core::normalize::NormalizationReport;
use crate::modules::shifts::use_cases::submit_receipt::command::SubmitReceipt;
use crate::modules::shifts::use_cases::submit_receipt::errors::SubmissionError;
use crate::shell::http::ErrorBody;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct SubmitReceiptBody {
    #[serde(default)]
    pub extraction: RawExtraction,
    #[serde(default)]
    pub corrections: Vec<Correction>,
}

#[derive(Serialize)]
pub struct SubmitReceiptResponse {
    pub shift_id: String,
    pub normalization: NormalizationReport,
}

pub fn status_for(err: &SubmissionError) -> StatusCode {
    match err {
        SubmissionError::Unreadable => StatusCode::BAD_REQUEST,
        SubmissionError::Invalid(_) | SubmissionError::Correction(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        SubmissionError::NotFound { .. } => StatusCode::NOT_FOUND,
        SubmissionError::Duplicate { .. } => StatusCode::CONFLICT,
        SubmissionError::Persistence(_) | SubmissionError::PartiallyStored { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

pub async fn handle(
    State(state): State<AppState>,
    body: Result<Json<SubmitReceiptBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    let command = SubmitReceipt {
        extraction: body.extraction,
        corrections: body.corrections,
        received_at: Utc::now().naive_utc(),
    };

    match state.submit_handler.handle(command).await {
        Ok(submitted) => (
            StatusCode::CREATED,
            Json(SubmitReceiptResponse {
                shift_id: submitted.shift.id.to_string(),
                normalization: submitted.report,
            }),
        )
            .into_response(),
        Err(err) => (
            status_for(&err),
            Json(ErrorBody {
                message: err.user_message(),
                fields: err.fields(),
            }),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod submit_receipt_http_inbound_tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::post,
    };
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::modules::shifts::adapters::outbound::shift_store_in_memory::InMemoryShiftStore;
    use crate::shell::state::AppState;
    use crate::tests::fixtures::extractions::ReceiptExtractionBuilder;
    use crate::tests::fixtures::state::make_test_state;

    use super::handle;

    fn app(state: AppState) -> Router {
        Router::new().route("/shifts", post(handle)).with_state(state)
    }

    async fn post_json(state: AppState, body: String) -> (StatusCode, Value) {
        let response = app(state)
            .oneshot(
                Request::post("/shifts")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn it_should_return_201_with_the_shift_id() {
        let body = json!({"extraction": ReceiptExtractionBuilder::new().to_value()});

        let (status, json) = post_json(make_test_state(InMemoryShiftStore::new()), body.to_string()).await;

        assert_eq!(status, StatusCode::CREATED);
        assert!(json.get("shift_id").is_some());
        assert_eq!(json["normalization"]["status"], "complete");
    }

    #[tokio::test]
    async fn it_should_return_409_for_a_duplicate_submission() {
        let state = make_test_state(InMemoryShiftStore::new());
        let body = json!({"extraction": ReceiptExtractionBuilder::new().to_value()}).to_string();
        let (first, _) = post_json(state.clone(), body.clone()).await;
        assert_eq!(first, StatusCode::CREATED);

        let (status, json) = post_json(state, body).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(
            json["message"],
            "Ett skift med samma information finns redan registrerat"
        );
    }

    #[tokio::test]
    async fn it_should_return_422_with_fields_for_a_rule_violation() {
        let extraction = ReceiptExtractionBuilder::new().with("turer", json!(40)).to_value();
        let body = json!({"extraction": extraction});

        let (status, json) = post_json(make_test_state(InMemoryShiftStore::new()), body.to_string()).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["fields"], json!(["turer"]));
    }

    #[tokio::test]
    async fn it_should_return_400_for_an_unreadable_extraction() {
        let (status, _) = post_json(
            make_test_state(InMemoryShiftStore::new()),
            json!({"extraction": "???"}).to_string(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn it_should_return_404_for_an_unknown_company() {
        let extraction = ReceiptExtractionBuilder::new()
            .with("org_nr", json!("999999-9999"))
            .to_value();

        let (status, json) = post_json(
            make_test_state(InMemoryShiftStore::new()),
            json!({"extraction": extraction}).to_string(),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Företag med org.nr 999999-9999 hittades inte");
    }

    #[tokio::test]
    async fn it_should_return_422_on_invalid_json() {
        let (status, _) = post_json(make_test_state(InMemoryShiftStore::new()), "not-json".into()).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn it_should_return_500_when_the_store_is_offline() {
        let mut store = InMemoryShiftStore::new();
        store.toggle_offline();
        let body = json!({"extraction": ReceiptExtractionBuilder::new().to_value()});

        let (status, json) = post_json(make_test_state(store), body.to_string()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!json["message"].as_str().unwrap_or_default().contains("offline"));
    }
}
