use crate::modules::shifts::adapters::outbound::master_data_in_memory::InMemoryMasterData;
use crate::modules::shifts::core::shift::{CarId, CompanyId, DriverId};

#[derive(Debug, Clone, Copy)]
pub struct SeededMasterData {
    pub company_id: CompanyId,
    pub car_id: CarId,
    pub driver_id: DriverId,
    pub other_company_id: CompanyId,
}

/// The company, car and driver named by `ReceiptExtractionBuilder`, plus a
/// second company reusing the same registration and driver id.
pub fn seeded_master_data() -> (InMemoryMasterData, SeededMasterData) {
    let mut master_data = InMemoryMasterData::new();
    let company_id = master_data.add_company("556677-8899");
    let car_id = master_data.add_car(company_id, "ABC123", "1234");
    let driver_id = master_data.add_driver(company_id, "4711");

    let other_company_id = master_data.add_company("112233-4455");
    master_data.add_car(other_company_id, "ABC123", "1234");
    master_data.add_driver(other_company_id, "4711");

    (
        master_data,
        SeededMasterData {
            company_id,
            car_id,
            driver_id,
            other_company_id,
        },
    )
}
