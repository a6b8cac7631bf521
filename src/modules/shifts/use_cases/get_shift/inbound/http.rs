use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::error;
use uuid::Uuid;

use crate::modules::shifts::core::shift::ShiftId;
use crate::shell::state::AppState;

pub async fn handle(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    match state.queries.get_shift(ShiftId(id)).await {
        Ok(Some(shift)) => Json(shift).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(err) => {
            error!(error = %err, shift_id = %id, "reading shift failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
