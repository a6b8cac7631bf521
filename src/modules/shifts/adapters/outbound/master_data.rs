use crate::modules::shifts::adapters::outbound::shift_store::StoreError;
use crate::modules::shifts::core::shift::CompanyId;
use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Company,
    Car,
    Driver,
}

/// Natural key of a master data entity. Cars and drivers are company scoped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NaturalKey<'a> {
    Company {
        org_nr: &'a str,
    },
    Car {
        company_id: CompanyId,
        registration: &'a str,
        slot: &'a str,
    },
    Driver {
        company_id: CompanyId,
        driver_ref: &'a str,
    },
}

impl NaturalKey<'_> {
    pub fn kind(&self) -> EntityKind {
        match self {
            NaturalKey::Company { .. } => EntityKind::Company,
            NaturalKey::Car { .. } => EntityKind::Car,
            NaturalKey::Driver { .. } => EntityKind::Driver,
        }
    }

    /// The part of the key a user would recognise.
    pub fn label(&self) -> String {
        match self {
            NaturalKey::Company { org_nr } => (*org_nr).to_string(),
            NaturalKey::Car { registration, .. } => (*registration).to_string(),
            NaturalKey::Driver { driver_ref, .. } => (*driver_ref).to_string(),
        }
    }
}

#[async_trait]
pub trait MasterDataLookup: Send + Sync {
    async fn resolve(&self, key: NaturalKey<'_>) -> Result<Option<Uuid>, StoreError>;
}
