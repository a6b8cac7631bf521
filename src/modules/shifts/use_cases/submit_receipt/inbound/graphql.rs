use async_graphql::{Context, ID, Json, Object, Result as GqlResult};
use chrono::Utc;
use serde_json::Value;

use crate::modules::shifts::core::corrections::Correction;
use crate::modules::shifts::core::extraction::RawExtraction;
use crate::modules::shifts::use_cases::submit_receipt::command::SubmitReceipt;
use crate::shell::state::AppState;

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn submit_receipt(
        &self,
        context: &Context<'_>,
        extraction: Json<Value>,
        corrections: Option<Json<Vec<Correction>>>,
    ) -> GqlResult<ID> {
        let state = context.data_unchecked::<AppState>();

        let command = SubmitReceipt {
            extraction: RawExtraction::new(extraction.0),
            corrections: corrections.map(|c| c.0).unwrap_or_default(),
            received_at: Utc::now().naive_utc(),
        };

        let submitted = state
            .submit_handler
            .handle(command)
            .await
            .map_err(|e| async_graphql::Error::new(e.user_message()))?;

        Ok(ID(submitted.shift.id.to_string()))
    }
}
