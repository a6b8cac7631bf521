use axum::{
    Json, extract::State, extract::rejection::JsonRejection, http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::modules::shifts::core::normalize::NormalizationReport;
use crate::modules::shifts::core::record::CanonicalShiftRecord;
use crate::shared::infrastructure::vision::{ReceiptImage, VisionError};
use crate::shell::http::ErrorBody;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct ExtractReceiptBody {
    pub mime_type: String,
    pub image_base64: String,
}

#[derive(Serialize)]
pub struct ExtractReceiptResponse {
    pub record: CanonicalShiftRecord,
    pub normalization: NormalizationReport,
}

pub fn status_for(err: &VisionError) -> StatusCode {
    match err {
        VisionError::InvalidImage(_) => StatusCode::BAD_REQUEST,
        VisionError::Timeout => StatusCode::GATEWAY_TIMEOUT,
        VisionError::RateLimited => StatusCode::SERVICE_UNAVAILABLE,
        VisionError::AccessDenied | VisionError::Upstream { .. } | VisionError::Transport(_) => {
            StatusCode::BAD_GATEWAY
        }
    }
}

fn error_response(err: VisionError) -> axum::response::Response {
    (
        status_for(&err),
        Json(ErrorBody {
            message: err.user_message().to_string(),
            fields: Vec::new(),
        }),
    )
        .into_response()
}

pub async fn handle(
    State(state): State<AppState>,
    body: Result<Json<ExtractReceiptBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    let image = match ReceiptImage::from_base64(&body.mime_type, &body.image_base64) {
        Ok(image) => image,
        Err(problem) => return error_response(problem.into()),
    };

    match state
        .extract_handler
        .handle(image, Utc::now().naive_utc())
        .await
    {
        Ok(normalization) => (
            StatusCode::OK,
            Json(ExtractReceiptResponse {
                record: normalization.record,
                normalization: normalization.report,
            }),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}
