use crate::modules::shifts::adapters::outbound::master_data_in_memory::InMemoryMasterData;
use crate::modules::shifts::adapters::outbound::shift_store_in_memory::InMemoryShiftStore;
use crate::modules::shifts::use_cases::extract_receipt::handler::ExtractReceiptHandler;
use crate::modules::shifts::use_cases::get_shift::queries_port::ShiftQueries;
use crate::modules::shifts::use_cases::submit_receipt::handler::{
    PipelineConfig, SubmitReceiptHandler,
};
use crate::shared::infrastructure::vision::VisionEngine;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub queries: Arc<dyn ShiftQueries + Send + Sync>,
    pub submit_handler: Arc<SubmitReceiptHandler<InMemoryMasterData, InMemoryShiftStore>>,
    pub extract_handler: Arc<ExtractReceiptHandler>,
}

impl AppState {
    /// Wires the handlers over in-memory master data and shift storage.
    pub fn in_memory(
        pipeline: PipelineConfig,
        master_data: InMemoryMasterData,
        store: InMemoryShiftStore,
        engine: Arc<dyn VisionEngine>,
    ) -> Self {
        let store = Arc::new(store);
        let submit_handler = Arc::new(SubmitReceiptHandler::new(
            pipeline,
            Arc::new(master_data),
            store.clone(),
        ));
        Self {
            queries: store,
            submit_handler,
            extract_handler: Arc::new(ExtractReceiptHandler::new(engine)),
        }
    }
}
