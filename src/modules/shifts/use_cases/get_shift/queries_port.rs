use crate::modules::shifts::core::shift::{CompanyId, DriverId, ShiftId, ShiftWithDetails};
use crate::modules::shifts::use_cases::list_shifts::period::ShiftPeriod;
use async_trait::async_trait;

#[async_trait]
pub trait ShiftQueries {
    async fn get_shift(&self, id: ShiftId) -> anyhow::Result<Option<ShiftWithDetails>>;

    /// Shifts of one company inside `period`, newest start first.
    async fn list_shifts(
        &self,
        company_id: CompanyId,
        period: ShiftPeriod,
        driver_id: Option<DriverId>,
    ) -> anyhow::Result<Vec<ShiftWithDetails>>;
}
