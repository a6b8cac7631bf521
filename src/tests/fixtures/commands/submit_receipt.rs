use crate::modules::shifts::core::corrections::Correction;
use crate::modules::shifts::core::extraction::RawExtraction;
use crate::modules::shifts::use_cases::submit_receipt::command::SubmitReceipt;
use crate::tests::fixtures::extractions::ReceiptExtractionBuilder;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

pub struct SubmitReceiptBuilder {
    extraction: ReceiptExtractionBuilder,
    replacement: Option<RawExtraction>,
    corrections: Vec<Correction>,
    received_at: NaiveDateTime,
}

impl Default for SubmitReceiptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmitReceiptBuilder {
    pub fn new() -> Self {
        Self {
            extraction: ReceiptExtractionBuilder::new(),
            replacement: None,
            corrections: Vec::new(),
            received_at: NaiveDate::from_ymd_opt(2024, 3, 2)
                .and_then(|d| d.and_hms_opt(9, 30, 0))
                .unwrap_or_default(),
        }
    }

    pub fn with_field(mut self, key: &str, value: Value) -> Self {
        self.extraction = self.extraction.with(key, value);
        self
    }

    pub fn with_extraction(mut self, extraction: RawExtraction) -> Self {
        self.replacement = Some(extraction);
        self
    }

    pub fn with_correction(mut self, correction: Correction) -> Self {
        self.corrections.push(correction);
        self
    }

    pub fn build(self) -> SubmitReceipt {
        SubmitReceipt {
            extraction: self
                .replacement
                .unwrap_or_else(|| self.extraction.build()),
            corrections: self.corrections,
            received_at: self.received_at,
        }
    }
}
