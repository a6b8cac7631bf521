use crate::modules::shifts::adapters::outbound::master_data::{
    EntityKind, MasterDataLookup, NaturalKey,
};
use crate::modules::shifts::adapters::outbound::shift_store::StoreError;
use crate::modules::shifts::core::record::CanonicalShiftRecord;
use crate::modules::shifts::core::shift::{CarId, CompanyId, DriverId, ResolvedRefs};
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("{entity:?} not found for {key}")]
    NotFound { entity: EntityKind, key: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Resolves company, then car and driver within that company.
///
/// Stops at the first key that does not resolve.
pub async fn resolve_references(
    lookup: &impl MasterDataLookup,
    record: &CanonicalShiftRecord,
) -> Result<ResolvedRefs, ResolveError> {
    let company_id = CompanyId(
        required(
            lookup,
            NaturalKey::Company {
                org_nr: &record.org_nr,
            },
        )
        .await?,
    );
    let car_id = CarId(
        required(
            lookup,
            NaturalKey::Car {
                company_id,
                registration: &record.registration,
                slot: &record.car_slot,
            },
        )
        .await?,
    );
    let driver_id = DriverId(
        required(
            lookup,
            NaturalKey::Driver {
                company_id,
                driver_ref: &record.driver_ref,
            },
        )
        .await?,
    );
    debug!(%company_id, %car_id, %driver_id, "references resolved");
    Ok(ResolvedRefs {
        company_id,
        car_id,
        driver_id,
    })
}

async fn required(
    lookup: &impl MasterDataLookup,
    key: NaturalKey<'_>,
) -> Result<Uuid, ResolveError> {
    lookup.resolve(key).await?.ok_or_else(|| {
        warn!(entity = ?key.kind(), key = %key.label(), "master data not found");
        ResolveError::NotFound {
            entity: key.kind(),
            key: key.label(),
        }
    })
}
