use async_graphql::{Context, ID, Object, Result as GqlResult};
use chrono::Utc;
use tracing::{error, warn};
use uuid::Uuid;

use crate::modules::shifts::core::shift::{CompanyId, DriverId};
use crate::modules::shifts::use_cases::get_shift::inbound::graphql::{GqlShift, READ_FAILED};
use crate::modules::shifts::use_cases::list_shifts::period::ShiftPeriod;
use crate::modules::shifts::use_cases::list_shifts::summary::{ShiftListing, ShiftSummary};
use crate::shell::state::AppState;

#[derive(async_graphql::SimpleObject, Clone)]
pub struct GqlShiftSummary {
    pub shift_count: i32,
    pub income: f64,
    pub trips: i64,
    pub taxi_km: f64,
    pub paid_km: f64,
    pub wage_base: f64,
}

impl From<ShiftSummary> for GqlShiftSummary {
    fn from(summary: ShiftSummary) -> Self {
        Self {
            shift_count: i32::try_from(summary.shift_count).unwrap_or(i32::MAX),
            income: summary.income,
            trips: summary.trips,
            taxi_km: summary.taxi_km,
            paid_km: summary.paid_km,
            wage_base: summary.wage_base,
        }
    }
}

#[derive(async_graphql::SimpleObject, Clone)]
pub struct GqlShiftListing {
    pub shifts: Vec<GqlShift>,
    pub summary: GqlShiftSummary,
}

impl From<ShiftListing> for GqlShiftListing {
    fn from(listing: ShiftListing) -> Self {
        Self {
            shifts: listing.shifts.into_iter().map(GqlShift::from).collect(),
            summary: listing.summary.into(),
        }
    }
}

fn parse_id(id: &ID) -> GqlResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| async_graphql::Error::new("Ogiltigt ID"))
}

#[derive(Default)]
pub struct ShiftsQuery;

#[Object]
impl ShiftsQuery {
    /// `from` and `to` are `YYYY-MM-DD`, both inclusive; they default to the
    /// current month up to today.
    async fn shifts(
        &self,
        context: &Context<'_>,
        company_id: ID,
        from: Option<String>,
        to: Option<String>,
        driver_id: Option<ID>,
    ) -> GqlResult<GqlShiftListing> {
        let state = context.data_unchecked::<AppState>();
        let company_id = CompanyId(parse_id(&company_id)?);
        let driver_id = driver_id.as_ref().map(parse_id).transpose()?.map(DriverId);
        let period = ShiftPeriod::parse(from.as_deref(), to.as_deref(), Utc::now().date_naive())
            .map_err(|err| {
                warn!(error = %err, "rejected shift listing period");
                async_graphql::Error::new("Ogiltigt datumintervall")
            })?;

        let shifts = state
            .queries
            .list_shifts(company_id, period, driver_id)
            .await
            .map_err(|err| {
                error!(error = %err, "listing shifts failed");
                async_graphql::Error::new(READ_FAILED)
            })?;
        Ok(ShiftListing::from(shifts).into())
    }
}

#[cfg(test)]
mod list_shifts_graphql_tests {
    use async_graphql::{Request, Variables};
    use chrono::Utc;
    use serde_json::json;

    use crate::modules::shifts::adapters::outbound::shift_store_in_memory::InMemoryShiftStore;
    use crate::modules::shifts::use_cases::submit_receipt::command::SubmitReceipt;
    use crate::shell::graphql::build_schema;
    use crate::tests::fixtures::extractions::ReceiptExtractionBuilder;
    use crate::tests::fixtures::state::make_test_state;

    const QUERY: &str = "query($c: ID!, $from: String, $to: String, $d: ID) { \
        shifts(companyId: $c, from: $from, to: $to, driverId: $d) { \
        shifts { reportNr } summary { shiftCount trips income } } }";

    #[tokio::test]
    async fn it_should_list_a_drivers_shifts_with_totals() {
        let state = make_test_state(InMemoryShiftStore::new());
        let submitted = state
            .submit_handler
            .handle(SubmitReceipt {
                extraction: ReceiptExtractionBuilder::new().build(),
                corrections: Vec::new(),
                received_at: Utc::now().naive_utc(),
            })
            .await
            .unwrap();
        let shift = &submitted.shift.shift;
        let request = Request::new(QUERY).variables(Variables::from_json(json!({
            "c": shift.company_id.to_string(),
            "from": "2024-03-01",
            "to": "2024-03-01",
            "d": shift.driver_id.to_string(),
        })));

        let response = build_schema(state).execute(request).await;

        assert!(response.errors.is_empty(), "{:?}", response.errors);
        assert_eq!(
            response.data.into_json().unwrap(),
            json!({"shifts": {
                "shifts": [{"reportNr": "R100"}],
                "summary": {"shiftCount": 1, "trips": 12, "income": 2300.0}
            }})
        );
    }

    #[tokio::test]
    async fn it_should_not_leak_store_errors() {
        let mut store = InMemoryShiftStore::new();
        store.toggle_offline();
        let request = Request::new(QUERY).variables(Variables::from_json(json!({
            "c": "0190f5c2-7c1a-7000-8000-000000000000",
            "from": "2024-03-01",
            "to": "2024-03-31",
        })));

        let response = build_schema(make_test_state(store)).execute(request).await;

        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].message, "Kunde inte hämta skift");
    }
}
