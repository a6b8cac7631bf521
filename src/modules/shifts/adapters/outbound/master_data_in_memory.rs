use crate::modules::shifts::adapters::outbound::master_data::{MasterDataLookup, NaturalKey};
use crate::modules::shifts::adapters::outbound::shift_store::StoreError;
use crate::modules::shifts::core::shift::{CarId, CompanyId, DriverId};
use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Shape of the JSON file used to seed the directory for local runs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MasterDataSeed {
    #[serde(default)]
    pub companies: Vec<CompanySeed>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompanySeed {
    pub org_nr: String,
    #[serde(default)]
    pub cars: Vec<CarSeed>,
    #[serde(default)]
    pub drivers: Vec<DriverSeed>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CarSeed {
    pub regnr: String,
    pub drosknr: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DriverSeed {
    pub forarid: String,
}

struct Car {
    id: CarId,
    company_id: CompanyId,
    registration: String,
    slot: String,
}

struct Driver {
    id: DriverId,
    company_id: CompanyId,
    driver_ref: String,
}

#[derive(Default)]
struct Directory {
    companies: Vec<(CompanyId, String)>,
    cars: Vec<Car>,
    drivers: Vec<Driver>,
}

#[derive(Default)]
pub struct InMemoryMasterData {
    directory: RwLock<Directory>,
    is_offline: bool,
}

impl InMemoryMasterData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: MasterDataSeed) -> Self {
        let mut master_data = Self::new();
        for company in seed.companies {
            let company_id = master_data.add_company(&company.org_nr);
            for car in company.cars {
                master_data.add_car(company_id, &car.regnr, &car.drosknr);
            }
            for driver in company.drivers {
                master_data.add_driver(company_id, &driver.forarid);
            }
        }
        master_data
    }

    pub fn from_seed_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading master data seed {}", path.display()))?;
        let seed: MasterDataSeed = serde_json::from_str(&raw)
            .with_context(|| format!("parsing master data seed {}", path.display()))?;
        Ok(Self::from_seed(seed))
    }

    pub fn add_company(&mut self, org_nr: &str) -> CompanyId {
        let id = CompanyId(Uuid::now_v7());
        self.directory
            .get_mut()
            .companies
            .push((id, org_nr.trim().to_string()));
        id
    }

    pub fn add_car(&mut self, company_id: CompanyId, registration: &str, slot: &str) -> CarId {
        let id = CarId(Uuid::now_v7());
        self.directory.get_mut().cars.push(Car {
            id,
            company_id,
            registration: registration.trim().to_uppercase(),
            slot: slot.trim().to_string(),
        });
        id
    }

    pub fn add_driver(&mut self, company_id: CompanyId, driver_ref: &str) -> DriverId {
        let id = DriverId(Uuid::now_v7());
        self.directory.get_mut().drivers.push(Driver {
            id,
            company_id,
            driver_ref: driver_ref.trim().to_string(),
        });
        id
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }
}

#[async_trait]
impl MasterDataLookup for InMemoryMasterData {
    async fn resolve(&self, key: NaturalKey<'_>) -> Result<Option<Uuid>, StoreError> {
        if self.is_offline {
            return Err(StoreError::Backend("Master data offline".into()));
        }
        let directory = self.directory.read().await;
        let found = match key {
            NaturalKey::Company { org_nr } => directory
                .companies
                .iter()
                .find(|(_, known)| known == org_nr)
                .map(|(id, _)| id.0),
            NaturalKey::Car {
                company_id,
                registration,
                slot,
            } => directory
                .cars
                .iter()
                .find(|car| {
                    car.company_id == company_id
                        && car.registration.eq_ignore_ascii_case(registration)
                        && car.slot == slot
                })
                .map(|car| car.id.0),
            NaturalKey::Driver {
                company_id,
                driver_ref,
            } => directory
                .drivers
                .iter()
                .find(|driver| driver.company_id == company_id && driver.driver_ref == driver_ref)
                .map(|driver| driver.id.0),
        };
        Ok(found)
    }
}

#[cfg(test)]
mod in_memory_master_data_tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn it_should_scope_cars_and_drivers_to_their_company() {
        let mut master_data = InMemoryMasterData::new();
        let first = master_data.add_company("556677-8899");
        let second = master_data.add_company("112233-4455");
        let first_car = master_data.add_car(first, "ABC123", "1234");
        let second_car = master_data.add_car(second, "ABC123", "1234");
        let second_driver = master_data.add_driver(second, "4711");

        let car = master_data
            .resolve(NaturalKey::Car {
                company_id: second,
                registration: "abc123",
                slot: "1234",
            })
            .await
            .unwrap();
        let driver = master_data
            .resolve(NaturalKey::Driver {
                company_id: first,
                driver_ref: "4711",
            })
            .await
            .unwrap();

        assert_eq!(car, Some(second_car.0));
        assert_ne!(car, Some(first_car.0));
        assert_eq!(driver, None);
        assert_ne!(driver, Some(second_driver.0));
    }

    #[tokio::test]
    async fn it_should_require_the_slot_to_match() {
        let mut master_data = InMemoryMasterData::new();
        let company = master_data.add_company("556677-8899");
        master_data.add_car(company, "ABC123", "1234");

        let car = master_data
            .resolve(NaturalKey::Car {
                company_id: company,
                registration: "ABC123",
                slot: "9999",
            })
            .await
            .unwrap();

        assert_eq!(car, None);
    }

    #[tokio::test]
    async fn it_should_load_a_seed_document() {
        let seed: MasterDataSeed = serde_json::from_value(json!({
            "companies": [{
                "org_nr": "556677-8899",
                "cars": [{"regnr": "ABC123", "drosknr": "1234"}],
                "drivers": [{"forarid": "4711"}]
            }]
        }))
        .unwrap();
        let master_data = InMemoryMasterData::from_seed(seed);

        let company = master_data
            .resolve(NaturalKey::Company {
                org_nr: "556677-8899",
            })
            .await
            .unwrap();

        assert!(company.is_some());
    }

    #[tokio::test]
    async fn it_should_fail_while_offline() {
        let mut master_data = InMemoryMasterData::new();
        master_data.toggle_offline();

        let result = master_data
            .resolve(NaturalKey::Company { org_nr: "556677-8899" })
            .await;

        assert!(result.is_err());
    }
}
