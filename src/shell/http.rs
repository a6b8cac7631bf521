use axum::{
    Extension, Router,
    routing::{get, post},
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::modules::shifts::use_cases::extract_receipt::inbound::http as extract_http;
use crate::modules::shifts::use_cases::get_shift::inbound::http as get_shift_http;
use crate::modules::shifts::use_cases::list_shifts::inbound::http as list_shifts_http;
use crate::modules::shifts::use_cases::submit_receipt::inbound::http as submit_http;
use crate::shell::graphql::{build_schema, graphiql, graphql};
use crate::shell::state::AppState;

/// Error payload returned by every inbound HTTP adapter.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<&'static str>,
}

pub fn router(state: AppState) -> Router {
    let schema = build_schema(state.clone());
    Router::new()
        .route(
            "/shifts",
            get(list_shifts_http::handle).post(submit_http::handle),
        )
        .route("/shifts/{id}", get(get_shift_http::handle))
        .route("/receipts/extract", post(extract_http::handle))
        .route("/gql", get(graphiql).post(graphql))
        .layer(Extension(schema))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
