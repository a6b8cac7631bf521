use crate::modules::shifts::core::record::CanonicalShiftRecord;
use crate::modules::shifts::core::vat::VatRate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! entity_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

entity_id!(CompanyId);
entity_id!(CarId);
entity_id!(DriverId);
entity_id!(ShiftId);

impl ShiftId {
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }
}

/// Internal ids of the master data a shift refers to, all within one company.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRefs {
    pub company_id: CompanyId,
    pub car_id: CarId,
    pub driver_id: DriverId,
}

/// Identifies a shift. At most one stored shift per key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompositeDuplicateKey {
    pub car_id: CarId,
    pub driver_id: DriverId,
    pub start_time: String,
    pub end_time: String,
    pub report_nr: String,
}

impl CompositeDuplicateKey {
    pub fn for_record(record: &CanonicalShiftRecord, refs: &ResolvedRefs) -> Self {
        Self {
            car_id: refs.car_id,
            driver_id: refs.driver_id,
            start_time: record.start_time.clone(),
            end_time: record.end_time.clone(),
            report_nr: record.report_nr.clone(),
        }
    }
}

/// Root shift row before the store assigns it an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewShift {
    pub company_id: CompanyId,
    pub car_id: CarId,
    pub driver_id: DriverId,
    pub start_time: String,
    pub end_time: String,
    pub taxi_km: f64,
    pub paid_km: f64,
    pub trips: i64,
    pub report_nr: String,
    pub cash: f64,
    pub to_report: f64,
    pub total_credit: f64,
    pub tip_credit: f64,
    pub wage_base: f64,
}

impl NewShift {
    pub fn from_record(record: &CanonicalShiftRecord, refs: &ResolvedRefs) -> Self {
        Self {
            company_id: refs.company_id,
            car_id: refs.car_id,
            driver_id: refs.driver_id,
            start_time: record.start_time.clone(),
            end_time: record.end_time.clone(),
            taxi_km: record.taxi_km,
            paid_km: record.paid_km,
            trips: record.trips,
            report_nr: record.report_nr.clone(),
            cash: record.cash,
            to_report: record.to_report,
            total_credit: record.total_credit,
            tip_credit: record.tip_credit,
            wage_base: record.wage_base,
        }
    }

    pub fn duplicate_key(&self) -> CompositeDuplicateKey {
        CompositeDuplicateKey {
            car_id: self.car_id,
            driver_id: self.driver_id,
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            report_nr: self.report_nr.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftRecord {
    pub id: ShiftId,
    #[serde(flatten)]
    pub shift: NewShift,
    pub created_at: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentChannel {
    Cash,
    Credit,
}

impl PaymentChannel {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentChannel::Cash => "kontant",
            PaymentChannel::Credit => "kredit",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VatDetailRow {
    pub shift_id: ShiftId,
    pub channel: PaymentChannel,
    pub rate: VatRate,
    pub gross: f64,
    pub net: f64,
    pub tax: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalCollectedRow {
    pub shift_id: ShiftId,
    pub total_collected: f64,
    pub rate: VatRate,
    pub gross: f64,
    pub net: f64,
    pub tax: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelledRow {
    pub shift_id: ShiftId,
    pub rate: VatRate,
    pub gross: f64,
    pub net: f64,
    pub tax: f64,
}

/// The three detail collections hanging off a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailCollection {
    VatDetails,
    TotalCollectedDetails,
    CancelledDetails,
}

/// Rows written to one detail collection in a single call.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailBatch {
    Vat(Vec<VatDetailRow>),
    TotalCollected(Vec<TotalCollectedRow>),
    Cancelled(Vec<CancelledRow>),
}

impl DetailBatch {
    pub fn collection(&self) -> DetailCollection {
        match self {
            DetailBatch::Vat(_) => DetailCollection::VatDetails,
            DetailBatch::TotalCollected(_) => DetailCollection::TotalCollectedDetails,
            DetailBatch::Cancelled(_) => DetailCollection::CancelledDetails,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            DetailBatch::Vat(rows) => rows.len(),
            DetailBatch::TotalCollected(rows) => rows.len(),
            DetailBatch::Cancelled(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn shift_ids(&self) -> Vec<ShiftId> {
        match self {
            DetailBatch::Vat(rows) => rows.iter().map(|r| r.shift_id).collect(),
            DetailBatch::TotalCollected(rows) => rows.iter().map(|r| r.shift_id).collect(),
            DetailBatch::Cancelled(rows) => rows.iter().map(|r| r.shift_id).collect(),
        }
    }
}

/// A stored shift and every detail row that references it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShiftWithDetails {
    pub shift: ShiftRecord,
    pub vat_details: Vec<VatDetailRow>,
    pub total_collected_details: Vec<TotalCollectedRow>,
    pub cancelled_details: Vec<CancelledRow>,
}
