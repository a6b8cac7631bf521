use std::sync::Arc;

use crate::modules::shifts::adapters::outbound::shift_store_in_memory::InMemoryShiftStore;
use crate::modules::shifts::use_cases::submit_receipt::handler::PipelineConfig;
use crate::shell::state::AppState;
use crate::tests::fixtures::master_data::seeded_master_data;
use crate::tests::fixtures::vision::CannedVisionEngine;

/// Default pipeline over the seeded master data and the given store. The
/// vision engine answers with an empty object.
pub fn make_test_state(store: InMemoryShiftStore) -> AppState {
    let (master_data, _) = seeded_master_data();
    AppState::in_memory(
        PipelineConfig::default(),
        master_data,
        store,
        Arc::new(CannedVisionEngine::answering("{}")),
    )
}
