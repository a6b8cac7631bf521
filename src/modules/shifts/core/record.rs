use crate::modules::shifts::core::vat::{VatDetail, VatRate, reconcile};
use crate::shared::core::timestamps::format_timestamp;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One VAT breakdown of a receipt plus the aggregate printed next to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VatSection {
    pub amount: f64,
    #[serde(rename = "moms_details")]
    pub details: Vec<VatDetail>,
}

impl VatSection {
    pub fn new(amount: f64, details: impl IntoIterator<Item = VatDetail>) -> Self {
        Self {
            amount,
            details: reconcile(details),
        }
    }

    pub fn empty(amount: f64) -> Self {
        Self::new(amount, [])
    }

    pub fn has_nonzero_entry(&self) -> bool {
        self.details.iter().any(|d| !d.is_zero())
    }

    pub fn detail_mut(&mut self, rate: VatRate) -> Option<&mut VatDetail> {
        self.details.iter_mut().find(|d| d.rate == rate)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VatSectionKind {
    Cash,
    Credit,
    TotalCollected,
    Cancelled,
}

impl VatSectionKind {
    pub const ALL: [VatSectionKind; 4] = [
        VatSectionKind::Cash,
        VatSectionKind::Credit,
        VatSectionKind::TotalCollected,
        VatSectionKind::Cancelled,
    ];

    /// Key of the section in a raw extraction.
    pub fn field_name(self) -> &'static str {
        match self {
            VatSectionKind::Cash => "kontant_details",
            VatSectionKind::Credit => "kredit_details",
            VatSectionKind::TotalCollected => "total_inkort_details",
            VatSectionKind::Cancelled => "varav_bom_avbest_details",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            VatSectionKind::Cash => "kontant",
            VatSectionKind::Credit => "kredit",
            VatSectionKind::TotalCollected => "total inkört",
            VatSectionKind::Cancelled => "varav bom/avbeställt",
        }
    }
}

/// A fully populated shift receipt, ready for validation.
///
/// Serialized with the same keys the extraction uses, so a reviewed record can
/// be submitted again as a raw extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalShiftRecord {
    pub org_nr: String,
    #[serde(rename = "regnr")]
    pub registration: String,
    #[serde(rename = "forarid")]
    pub driver_ref: String,
    #[serde(rename = "drosknr")]
    pub car_slot: String,
    #[serde(rename = "rapportnr")]
    pub report_nr: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(rename = "taxitrafik_km")]
    pub taxi_km: f64,
    #[serde(rename = "betalda_km")]
    pub paid_km: f64,
    #[serde(rename = "turer")]
    pub trips: i64,
    #[serde(rename = "kontant")]
    pub cash: f64,
    #[serde(rename = "total_kredit")]
    pub total_credit: f64,
    #[serde(rename = "drikskredit")]
    pub tip_credit: f64,
    #[serde(rename = "att_redovisa")]
    pub to_report: f64,
    #[serde(rename = "lonegr_ex_moms")]
    pub wage_base: f64,
    #[serde(rename = "kontant_details")]
    pub cash_vat: VatSection,
    #[serde(rename = "kredit_details")]
    pub credit_vat: VatSection,
    #[serde(
        rename = "total_inkort_details",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub total_collected: Option<VatSection>,
    #[serde(
        rename = "varav_bom_avbest_details",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub cancelled: Option<VatSection>,
}

impl CanonicalShiftRecord {
    pub fn section(&self, kind: VatSectionKind) -> Option<&VatSection> {
        match kind {
            VatSectionKind::Cash => Some(&self.cash_vat),
            VatSectionKind::Credit => Some(&self.credit_vat),
            VatSectionKind::TotalCollected => self.total_collected.as_ref(),
            VatSectionKind::Cancelled => self.cancelled.as_ref(),
        }
    }

    pub fn section_mut(&mut self, kind: VatSectionKind) -> Option<&mut VatSection> {
        match kind {
            VatSectionKind::Cash => Some(&mut self.cash_vat),
            VatSectionKind::Credit => Some(&mut self.credit_vat),
            VatSectionKind::TotalCollected => self.total_collected.as_mut(),
            VatSectionKind::Cancelled => self.cancelled.as_mut(),
        }
    }

    /// Present sections, in persistence order.
    pub fn sections(&self) -> impl Iterator<Item = (VatSectionKind, &VatSection)> {
        VatSectionKind::ALL
            .into_iter()
            .filter_map(|kind| self.section(kind).map(|section| (kind, section)))
    }
}

/// Values substituted for anything an extraction leaves out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftDefaults {
    pub org_nr: String,
    pub registration: String,
    pub driver_ref: String,
    pub car_slot: String,
    pub report_nr: String,
    pub start_time: String,
    pub end_time: String,
}

impl ShiftDefaults {
    /// Placeholder identifiers with both timestamps at `now`.
    pub fn at(now: NaiveDateTime) -> Self {
        let stamp = format_timestamp(now);
        Self {
            org_nr: "000000-0000".into(),
            registration: "ABC123".into(),
            driver_ref: "00000".into(),
            car_slot: "0000".into(),
            report_nr: "00000".into(),
            start_time: stamp.clone(),
            end_time: stamp,
        }
    }

    pub fn template(&self) -> CanonicalShiftRecord {
        CanonicalShiftRecord {
            org_nr: self.org_nr.clone(),
            registration: self.registration.clone(),
            driver_ref: self.driver_ref.clone(),
            car_slot: self.car_slot.clone(),
            report_nr: self.report_nr.clone(),
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            taxi_km: 0.0,
            paid_km: 0.0,
            trips: 0,
            cash: 0.0,
            total_credit: 0.0,
            tip_credit: 0.0,
            to_report: 0.0,
            wage_base: 0.0,
            cash_vat: VatSection::empty(0.0),
            credit_vat: VatSection::empty(0.0),
            total_collected: None,
            cancelled: None,
        }
    }
}
