use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::{error, warn};
use uuid::Uuid;

use crate::modules::shifts::core::shift::{CompanyId, DriverId};
use crate::modules::shifts::use_cases::list_shifts::period::ShiftPeriod;
use crate::modules::shifts::use_cases::list_shifts::summary::ShiftListing;
use crate::shell::http::ErrorBody;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct ListShiftsParams {
    pub company_id: Uuid,
    pub from: Option<String>,
    pub to: Option<String>,
    pub driver_id: Option<Uuid>,
}

fn error_body(status: StatusCode, message: &str) -> axum::response::Response {
    (
        status,
        Json(ErrorBody {
            message: message.to_string(),
            fields: Vec::new(),
        }),
    )
        .into_response()
}

pub async fn handle(
    State(state): State<AppState>,
    Query(params): Query<ListShiftsParams>,
) -> impl IntoResponse {
    let period = match ShiftPeriod::parse(
        params.from.as_deref(),
        params.to.as_deref(),
        Utc::now().date_naive(),
    ) {
        Ok(period) => period,
        Err(err) => {
            warn!(error = %err, "rejected shift listing period");
            return error_body(StatusCode::BAD_REQUEST, "Ogiltigt datumintervall");
        }
    };

    match state
        .queries
        .list_shifts(
            CompanyId(params.company_id),
            period,
            params.driver_id.map(DriverId),
        )
        .await
    {
        Ok(shifts) => Json(ShiftListing::from(shifts)).into_response(),
        Err(err) => {
            error!(error = %err, "listing shifts failed");
            error_body(StatusCode::INTERNAL_SERVER_ERROR, "Kunde inte hämta skift")
        }
    }
}
