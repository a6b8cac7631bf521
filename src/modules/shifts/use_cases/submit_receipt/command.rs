use crate::modules::shifts::core::corrections::Correction;
use crate::modules::shifts::core::extraction::RawExtraction;
use chrono::NaiveDateTime;

#[derive(Debug, Clone, PartialEq)]
pub struct SubmitReceipt {
    pub extraction: RawExtraction,
    pub corrections: Vec<Correction>,
    /// UTC instant the receipt was handed in; default timestamps derive from it.
    pub received_at: NaiveDateTime,
}
