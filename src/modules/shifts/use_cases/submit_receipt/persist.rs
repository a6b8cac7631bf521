use crate::modules::shifts::adapters::outbound::shift_store::{
    InsertOutcome, ShiftStore, StoreError,
};
use crate::modules::shifts::core::record::{CanonicalShiftRecord, VatSection};
use crate::modules::shifts::core::shift::{
    CancelledRow, DetailBatch, NewShift, PaymentChannel, ResolvedRefs, ShiftId, ShiftRecord,
    TotalCollectedRow, VatDetailRow,
};
use serde::Serialize;
use tracing::{debug, error, info};

/// One dependent write that follows the root insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailStep {
    CashVat,
    CreditVat,
    TotalCollected,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PersistOutcome {
    Committed(ShiftRecord),
    Conflict(ShiftId),
    PartiallyFailed {
        shift_id: ShiftId,
        failed: Vec<DetailStep>,
        rolled_back: bool,
    },
}

/// Detail batches to write for a freshly inserted shift, in order.
///
/// Sections without anything worth storing produce no batch.
pub fn plan_detail_batches(
    record: &CanonicalShiftRecord,
    shift_id: ShiftId,
) -> Vec<(DetailStep, DetailBatch)> {
    let mut batches = Vec::new();

    for (step, channel, section) in [
        (DetailStep::CashVat, PaymentChannel::Cash, &record.cash_vat),
        (DetailStep::CreditVat, PaymentChannel::Credit, &record.credit_vat),
    ] {
        if section.has_nonzero_entry() {
            batches.push((step, DetailBatch::Vat(vat_rows(shift_id, channel, section))));
        }
    }

    if let Some(section) = record.total_collected.as_ref().filter(|s| s.amount > 0.0) {
        let rows = section
            .details
            .iter()
            .map(|detail| TotalCollectedRow {
                shift_id,
                total_collected: section.amount,
                rate: detail.rate,
                gross: detail.gross,
                net: detail.net,
                tax: detail.tax,
            })
            .collect();
        batches.push((DetailStep::TotalCollected, DetailBatch::TotalCollected(rows)));
    }

    if let Some(section) = record.cancelled.as_ref().filter(|s| s.has_nonzero_entry()) {
        let rows = section
            .details
            .iter()
            .map(|detail| CancelledRow {
                shift_id,
                rate: detail.rate,
                gross: detail.gross,
                net: detail.net,
                tax: detail.tax,
            })
            .collect();
        batches.push((DetailStep::Cancelled, DetailBatch::Cancelled(rows)));
    }

    batches
}

fn vat_rows(shift_id: ShiftId, channel: PaymentChannel, section: &VatSection) -> Vec<VatDetailRow> {
    section
        .details
        .iter()
        .map(|detail| VatDetailRow {
            shift_id,
            channel,
            rate: detail.rate,
            gross: detail.gross,
            net: detail.net,
            tax: detail.tax,
        })
        .collect()
}

/// Inserts the root shift, then every detail batch.
///
/// All batches are attempted. If any of them fails the root shift and its
/// rows are discarded again. `Err` means nothing was written.
pub async fn persist_shift(
    store: &impl ShiftStore,
    record: &CanonicalShiftRecord,
    refs: &ResolvedRefs,
) -> Result<PersistOutcome, StoreError> {
    let shift = match store.insert_shift(NewShift::from_record(record, refs)).await? {
        InsertOutcome::Inserted(shift) => shift,
        InsertOutcome::Conflict(existing) => {
            info!(%existing, "insert lost the race for the composite key");
            return Ok(PersistOutcome::Conflict(existing));
        }
    };

    let mut failed = Vec::new();
    for (step, batch) in plan_detail_batches(record, shift.id) {
        match store.insert_details(batch).await {
            Ok(rows) => debug!(shift_id = %shift.id, ?step, rows, "detail batch stored"),
            Err(err) => {
                error!(shift_id = %shift.id, ?step, error = %err, "detail batch failed");
                failed.push(step);
            }
        }
    }

    if failed.is_empty() {
        info!(shift_id = %shift.id, "shift committed");
        return Ok(PersistOutcome::Committed(shift));
    }

    let rolled_back = match store.discard_shift(shift.id).await {
        Ok(()) => true,
        Err(err) => {
            error!(shift_id = %shift.id, error = %err, "compensating discard failed");
            false
        }
    };
    Ok(PersistOutcome::PartiallyFailed {
        shift_id: shift.id,
        failed,
        rolled_back,
    })
}
