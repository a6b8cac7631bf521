use crate::modules::shifts::adapters::outbound::shift_store::{
    InsertOutcome, ShiftStore, StoreError,
};
use crate::modules::shifts::core::shift::{
    CancelledRow, CompanyId, CompositeDuplicateKey, DetailBatch, DetailCollection, DriverId,
    NewShift, ShiftId, ShiftRecord, ShiftWithDetails, TotalCollectedRow, VatDetailRow,
};
use crate::modules::shifts::use_cases::get_shift::queries_port::ShiftQueries;
use crate::modules::shifts::use_cases::list_shifts::period::ShiftPeriod;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Default)]
struct Tables {
    shifts: HashMap<ShiftId, ShiftRecord>,
    keys: HashMap<CompositeDuplicateKey, ShiftId>,
    vat_details: Vec<VatDetailRow>,
    total_collected_details: Vec<TotalCollectedRow>,
    cancelled_details: Vec<CancelledRow>,
}

#[derive(Default)]
pub struct InMemoryShiftStore {
    tables: RwLock<Tables>,
    is_offline: bool,
    failing: HashSet<DetailCollection>,
    insert_delay_ms: AtomicU64,
    insert_calls: AtomicUsize,
}

impl InMemoryShiftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    /// Makes every batch written to `collection` fail.
    pub fn fail_collection(&mut self, collection: DetailCollection) {
        self.failing.insert(collection);
    }

    /// Delays root inserts so concurrent submissions interleave.
    pub fn set_delay_insert_ms(&self, ms: u64) {
        self.insert_delay_ms.store(ms, Ordering::SeqCst);
    }

    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    pub async fn shift_count(&self) -> usize {
        self.tables.read().await.shifts.len()
    }

    pub async fn detail_row_count(&self) -> usize {
        let tables = self.tables.read().await;
        tables.vat_details.len()
            + tables.total_collected_details.len()
            + tables.cancelled_details.len()
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.is_offline {
            return Err(StoreError::Backend("Shift store offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ShiftStore for InMemoryShiftStore {
    async fn exists(&self, key: &CompositeDuplicateKey) -> Result<bool, StoreError> {
        self.ensure_online()?;
        Ok(self.tables.read().await.keys.contains_key(key))
    }

    async fn insert_shift(&self, shift: NewShift) -> Result<InsertOutcome, StoreError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        self.ensure_online()?;

        let delay = self.insert_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        let key = shift.duplicate_key();
        let mut tables = self.tables.write().await;
        if let Some(existing) = tables.keys.get(&key) {
            return Ok(InsertOutcome::Conflict(*existing));
        }
        let record = ShiftRecord {
            id: ShiftId::generate(),
            shift,
            created_at: Utc::now().timestamp_millis(),
        };
        tables.keys.insert(key, record.id);
        tables.shifts.insert(record.id, record.clone());
        debug!(shift_id = %record.id, "shift inserted");
        Ok(InsertOutcome::Inserted(record))
    }

    async fn insert_details(&self, batch: DetailBatch) -> Result<usize, StoreError> {
        self.ensure_online()?;
        let collection = batch.collection();
        if self.failing.contains(&collection) {
            return Err(StoreError::Rejected {
                collection,
                reason: "write refused".into(),
            });
        }

        let mut tables = self.tables.write().await;
        if let Some(orphan) = batch
            .shift_ids()
            .into_iter()
            .find(|id| !tables.shifts.contains_key(id))
        {
            return Err(StoreError::Rejected {
                collection,
                reason: format!("unknown shift {orphan}"),
            });
        }
        let count = batch.len();
        match batch {
            DetailBatch::Vat(rows) => tables.vat_details.extend(rows),
            DetailBatch::TotalCollected(rows) => tables.total_collected_details.extend(rows),
            DetailBatch::Cancelled(rows) => tables.cancelled_details.extend(rows),
        }
        Ok(count)
    }

    async fn discard_shift(&self, id: ShiftId) -> Result<(), StoreError> {
        self.ensure_online()?;
        let mut tables = self.tables.write().await;
        if let Some(record) = tables.shifts.remove(&id) {
            tables.keys.remove(&record.shift.duplicate_key());
        }
        tables.vat_details.retain(|row| row.shift_id != id);
        tables.total_collected_details.retain(|row| row.shift_id != id);
        tables.cancelled_details.retain(|row| row.shift_id != id);
        Ok(())
    }
}

impl Tables {
    fn with_details(&self, shift: &ShiftRecord) -> ShiftWithDetails {
        let id = shift.id;
        ShiftWithDetails {
            shift: shift.clone(),
            vat_details: self
                .vat_details
                .iter()
                .filter(|row| row.shift_id == id)
                .cloned()
                .collect(),
            total_collected_details: self
                .total_collected_details
                .iter()
                .filter(|row| row.shift_id == id)
                .cloned()
                .collect(),
            cancelled_details: self
                .cancelled_details
                .iter()
                .filter(|row| row.shift_id == id)
                .cloned()
                .collect(),
        }
    }
}

#[async_trait]
impl ShiftQueries for InMemoryShiftStore {
    async fn get_shift(&self, id: ShiftId) -> anyhow::Result<Option<ShiftWithDetails>> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        Ok(tables.shifts.get(&id).map(|shift| tables.with_details(shift)))
    }

    async fn list_shifts(
        &self,
        company_id: CompanyId,
        period: ShiftPeriod,
        driver_id: Option<DriverId>,
    ) -> anyhow::Result<Vec<ShiftWithDetails>> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        let mut matching: Vec<&ShiftRecord> = tables
            .shifts
            .values()
            .filter(|record| record.shift.company_id == company_id)
            .filter(|record| driver_id.is_none_or(|driver| record.shift.driver_id == driver))
            .filter(|record| period.contains(&record.shift))
            .collect();
        // Canonical timestamps sort chronologically as text.
        matching.sort_by(|a, b| {
            b.shift
                .start_time
                .cmp(&a.shift.start_time)
                .then(b.created_at.cmp(&a.created_at))
        });
        Ok(matching
            .into_iter()
            .map(|record| tables.with_details(record))
            .collect())
    }
}
