use crate::modules::shifts::core::shift::{
    CompositeDuplicateKey, DetailBatch, DetailCollection, NewShift, ShiftId, ShiftRecord,
};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("backend error: {0}")]
    Backend(String),

    #[error("{collection:?} rejected the batch: {reason}")]
    Rejected {
        collection: DetailCollection,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum InsertOutcome {
    Inserted(ShiftRecord),
    /// A shift with the same composite key already exists.
    Conflict(ShiftId),
}

/// Root shift collection plus its three detail collections.
#[async_trait]
pub trait ShiftStore: Send + Sync {
    async fn exists(&self, key: &CompositeDuplicateKey) -> Result<bool, StoreError>;

    /// Atomic with respect to the composite key uniqueness constraint.
    async fn insert_shift(&self, shift: NewShift) -> Result<InsertOutcome, StoreError>;

    async fn insert_details(&self, batch: DetailBatch) -> Result<usize, StoreError>;

    /// Removes a shift and every detail row pointing at it.
    async fn discard_shift(&self, id: ShiftId) -> Result<(), StoreError>;
}
