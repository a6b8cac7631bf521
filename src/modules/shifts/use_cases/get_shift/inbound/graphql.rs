use async_graphql::{Context, ID, Object, Result as GqlResult};
use tracing::error;
use uuid::Uuid;

use crate::modules::shifts::core::shift::{
    CancelledRow, ShiftId, ShiftWithDetails, TotalCollectedRow, VatDetailRow,
};
use crate::shell::state::AppState;

pub const READ_FAILED: &str = "Kunde inte hämta skift";

#[derive(async_graphql::SimpleObject, Clone)]
pub struct GqlVatDetail {
    pub channel: String,
    pub rate: i32,
    pub gross: f64,
    pub net: f64,
    pub tax: f64,
}

impl From<VatDetailRow> for GqlVatDetail {
    fn from(row: VatDetailRow) -> Self {
        Self {
            channel: row.channel.as_str().to_string(),
            rate: i32::from(row.rate.percent()),
            gross: row.gross,
            net: row.net,
            tax: row.tax,
        }
    }
}

#[derive(async_graphql::SimpleObject, Clone)]
pub struct GqlTotalCollectedDetail {
    pub total_collected: f64,
    pub rate: i32,
    pub gross: f64,
    pub net: f64,
    pub tax: f64,
}

impl From<TotalCollectedRow> for GqlTotalCollectedDetail {
    fn from(row: TotalCollectedRow) -> Self {
        Self {
            total_collected: row.total_collected,
            rate: i32::from(row.rate.percent()),
            gross: row.gross,
            net: row.net,
            tax: row.tax,
        }
    }
}

#[derive(async_graphql::SimpleObject, Clone)]
pub struct GqlCancelledDetail {
    pub rate: i32,
    pub gross: f64,
    pub net: f64,
    pub tax: f64,
}

impl From<CancelledRow> for GqlCancelledDetail {
    fn from(row: CancelledRow) -> Self {
        Self {
            rate: i32::from(row.rate.percent()),
            gross: row.gross,
            net: row.net,
            tax: row.tax,
        }
    }
}

#[derive(async_graphql::SimpleObject, Clone)]
pub struct GqlShift {
    pub id: ID,
    pub company_id: String,
    pub car_id: String,
    pub driver_id: String,
    pub report_nr: String,
    pub start_time: String,
    pub end_time: String,
    pub taxi_km: f64,
    pub paid_km: f64,
    pub trips: i64,
    pub cash: f64,
    pub total_credit: f64,
    pub tip_credit: f64,
    pub to_report: f64,
    pub wage_base: f64,
    pub total_collected: Option<f64>,
    pub vat_details: Vec<GqlVatDetail>,
    pub total_collected_details: Vec<GqlTotalCollectedDetail>,
    pub cancelled_details: Vec<GqlCancelledDetail>,
    pub created_at: i64,
}

impl From<ShiftWithDetails> for GqlShift {
    fn from(v: ShiftWithDetails) -> Self {
        let shift = v.shift.shift;
        Self {
            id: ID(v.shift.id.to_string()),
            company_id: shift.company_id.to_string(),
            car_id: shift.car_id.to_string(),
            driver_id: shift.driver_id.to_string(),
            report_nr: shift.report_nr,
            start_time: shift.start_time,
            end_time: shift.end_time,
            taxi_km: shift.taxi_km,
            paid_km: shift.paid_km,
            trips: shift.trips,
            cash: shift.cash,
            total_credit: shift.total_credit,
            tip_credit: shift.tip_credit,
            to_report: shift.to_report,
            wage_base: shift.wage_base,
            total_collected: v
                .total_collected_details
                .first()
                .map(|row| row.total_collected),
            vat_details: v.vat_details.into_iter().map(GqlVatDetail::from).collect(),
            total_collected_details: v
                .total_collected_details
                .into_iter()
                .map(GqlTotalCollectedDetail::from)
                .collect(),
            cancelled_details: v
                .cancelled_details
                .into_iter()
                .map(GqlCancelledDetail::from)
                .collect(),
            created_at: v.shift.created_at,
        }
    }
}

#[derive(Default)]
pub struct ShiftQuery;

#[Object]
impl ShiftQuery {
    async fn shift(&self, context: &Context<'_>, id: ID) -> GqlResult<Option<GqlShift>> {
        let state = context.data_unchecked::<AppState>();
        let id = Uuid::parse_str(&id).map_err(|_| async_graphql::Error::new("Ogiltigt skift-ID"))?;
        let found = state.queries.get_shift(ShiftId(id)).await.map_err(|err| {
            error!(error = %err, shift_id = %id, "reading shift failed");
            async_graphql::Error::new(READ_FAILED)
        })?;
        Ok(found.map(GqlShift::from))
    }
}
