use crate::modules::shifts::adapters::outbound::shift_store_in_memory::InMemoryShiftStore;
use crate::modules::shifts::core::shift::PaymentChannel;
use crate::modules::shifts::core::vat::VatRate;
use crate::modules::shifts::use_cases::get_shift::queries_port::ShiftQueries;
use crate::modules::shifts::use_cases::submit_receipt::errors::SubmissionError;
use crate::modules::shifts::use_cases::submit_receipt::handler::{
    PipelineConfig, SubmitReceiptHandler,
};
use crate::tests::fixtures::commands::submit_receipt::SubmitReceiptBuilder;
use crate::tests::fixtures::master_data::seeded_master_data;
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn submits_a_receipt_and_reads_the_shift_back() {
    let (master_data, seeded) = seeded_master_data();
    let store = Arc::new(InMemoryShiftStore::new());
    let handler =
        SubmitReceiptHandler::new(PipelineConfig::default(), Arc::new(master_data), store.clone());

    let submitted = handler
        .handle(SubmitReceiptBuilder::new().build())
        .await
        .unwrap();

    let loaded = store.get_shift(submitted.shift.id).await.unwrap().unwrap();

    assert_eq!(loaded.shift, submitted.shift);
    assert_eq!(loaded.shift.shift.company_id, seeded.company_id);
    assert_eq!(loaded.shift.shift.car_id, seeded.car_id);
    assert_eq!(loaded.shift.shift.driver_id, seeded.driver_id);
    assert_eq!(loaded.vat_details.len(), 4);
    assert_eq!(loaded.total_collected_details.len(), 2);
    assert_eq!(loaded.cancelled_details.len(), 2);

    let credit_standard = loaded
        .vat_details
        .iter()
        .find(|row| row.channel == PaymentChannel::Credit && row.rate == VatRate::Standard)
        .unwrap();
    assert_eq!(credit_standard.gross, 100.0);
    assert_eq!(credit_standard.tax, 20.0);
}

#[tokio::test]
async fn the_same_report_for_another_company_is_not_a_duplicate() {
    let (master_data, seeded) = seeded_master_data();
    let store = Arc::new(InMemoryShiftStore::new());
    let handler =
        SubmitReceiptHandler::new(PipelineConfig::default(), Arc::new(master_data), store.clone());

    handler
        .handle(SubmitReceiptBuilder::new().build())
        .await
        .unwrap();
    let repeated = handler.handle(SubmitReceiptBuilder::new().build()).await;
    let other = handler
        .handle(
            SubmitReceiptBuilder::new()
                .with_field("org_nr", json!("112233-4455"))
                .build(),
        )
        .await
        .unwrap();

    assert!(matches!(repeated, Err(SubmissionError::Duplicate { .. })));
    assert_eq!(other.shift.shift.company_id, seeded.other_company_id);
    assert_eq!(store.shift_count().await, 2);
}
