use crate::modules::shifts::core::record::{CanonicalShiftRecord, VatSectionKind};
use crate::modules::shifts::core::vat::VatRate;
use crate::shared::core::numbers::parse_number_text;
use crate::shared::core::timestamps::normalize_timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VatComponent {
    Gross,
    Net,
    Tax,
}

/// Addressable field of a [`CanonicalShiftRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum RecordField {
    OrgNr,
    Registration,
    DriverRef,
    CarSlot,
    ReportNr,
    StartTime,
    EndTime,
    TaxiKm,
    PaidKm,
    Trips,
    Cash,
    TotalCredit,
    TipCredit,
    ToReport,
    WageBase,
    SectionAmount {
        section: VatSectionKind,
    },
    Vat {
        section: VatSectionKind,
        rate: VatRate,
        component: VatComponent,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

/// A reviewer's edit to one field of a normalized record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correction {
    pub field: RecordField,
    pub value: FieldValue,
}

impl Correction {
    pub fn new(field: RecordField, value: FieldValue) -> Self {
        Self { field, value }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CorrectionError {
    #[error("{field:?} expects {expected}")]
    WrongKind {
        field: RecordField,
        expected: &'static str,
    },

    #[error("section {0:?} is not present on the record")]
    MissingSection(VatSectionKind),
}

pub fn apply_corrections(
    record: &mut CanonicalShiftRecord,
    corrections: &[Correction],
) -> Result<(), CorrectionError> {
    corrections
        .iter()
        .try_for_each(|correction| apply_correction(record, correction))
}

pub fn apply_correction(
    record: &mut CanonicalShiftRecord,
    correction: &Correction,
) -> Result<(), CorrectionError> {
    let field = correction.field;
    match field {
        RecordField::StartTime | RecordField::EndTime => {
            let stamp = as_text(&correction.value)
                .as_deref()
                .and_then(normalize_timestamp)
                .ok_or(CorrectionError::WrongKind {
                    field,
                    expected: "a timestamp",
                })?;
            if field == RecordField::StartTime {
                record.start_time = stamp;
            } else {
                record.end_time = stamp;
            }
        }
        RecordField::Trips => {
            record.trips = as_number(field, &correction.value)?.round() as i64;
        }
        _ => {
            if let Some(slot) = text_slot(record, field) {
                let text = as_text(&correction.value).ok_or(CorrectionError::WrongKind {
                    field,
                    expected: "text",
                })?;
                *slot = if field == RecordField::Registration {
                    text.to_uppercase()
                } else {
                    text
                };
            } else {
                let value = as_number(field, &correction.value)?;
                *number_slot(record, field)? = value;
            }
        }
    }
    Ok(())
}

fn text_slot(record: &mut CanonicalShiftRecord, field: RecordField) -> Option<&mut String> {
    match field {
        RecordField::OrgNr => Some(&mut record.org_nr),
        RecordField::Registration => Some(&mut record.registration),
        RecordField::DriverRef => Some(&mut record.driver_ref),
        RecordField::CarSlot => Some(&mut record.car_slot),
        RecordField::ReportNr => Some(&mut record.report_nr),
        _ => None,
    }
}

fn number_slot(
    record: &mut CanonicalShiftRecord,
    field: RecordField,
) -> Result<&mut f64, CorrectionError> {
    let slot = match field {
        RecordField::TaxiKm => &mut record.taxi_km,
        RecordField::PaidKm => &mut record.paid_km,
        RecordField::Cash => &mut record.cash,
        RecordField::TotalCredit => &mut record.total_credit,
        RecordField::TipCredit => &mut record.tip_credit,
        RecordField::ToReport => &mut record.to_report,
        RecordField::WageBase => &mut record.wage_base,
        RecordField::SectionAmount { section } => {
            &mut record
                .section_mut(section)
                .ok_or(CorrectionError::MissingSection(section))?
                .amount
        }
        RecordField::Vat {
            section,
            rate,
            component,
        } => {
            let detail = record
                .section_mut(section)
                .ok_or(CorrectionError::MissingSection(section))?
                .detail_mut(rate)
                .ok_or(CorrectionError::MissingSection(section))?;
            match component {
                VatComponent::Gross => &mut detail.gross,
                VatComponent::Net => &mut detail.net,
                VatComponent::Tax => &mut detail.tax,
            }
        }
        _ => {
            return Err(CorrectionError::WrongKind {
                field,
                expected: "text",
            });
        }
    };
    Ok(slot)
}

fn as_text(value: &FieldValue) -> Option<String> {
    let text = match value {
        FieldValue::Text(text) => text.trim().to_string(),
        FieldValue::Number(number) => number.to_string(),
    };
    (!text.is_empty()).then_some(text)
}

fn as_number(field: RecordField, value: &FieldValue) -> Result<f64, CorrectionError> {
    let number = match value {
        FieldValue::Number(number) => Some(*number),
        FieldValue::Text(text) => parse_number_text(text),
    };
    number
        .filter(|v| v.is_finite())
        .ok_or(CorrectionError::WrongKind {
            field,
            expected: "a number",
        })
}
