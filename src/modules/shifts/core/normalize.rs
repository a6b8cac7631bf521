use crate::modules::shifts::core::extraction::{RawExtraction, first_present};
use crate::modules::shifts::core::record::{
    CanonicalShiftRecord, ShiftDefaults, VatSection, VatSectionKind,
};
use crate::modules::shifts::core::vat::reconcile_raw;
use crate::shared::core::numbers::parse_number;
use crate::shared::core::timestamps::normalize_timestamp;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

/// How much of a record came from the extraction itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "fields", rename_all = "snake_case")]
pub enum NormalizationReport {
    Complete,
    DefaultsApplied(Vec<&'static str>),
    Uninterpretable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Normalization {
    pub record: CanonicalShiftRecord,
    pub report: NormalizationReport,
}

/// Turns an extraction into a complete record. Never fails.
///
/// Missing or unparsable fields take their value from `defaults` (or zero) and
/// are listed in the report. Input that is not an object at all yields the
/// untouched default template.
pub fn normalize(raw: &RawExtraction, defaults: &ShiftDefaults) -> Normalization {
    let Some(fields) = raw.as_object() else {
        warn!("extraction is not an object, falling back to the default template");
        return Normalization {
            record: defaults.template(),
            report: NormalizationReport::Uninterpretable,
        };
    };

    let mut reader = FieldReader {
        fields,
        defaulted: Vec::new(),
    };

    let top_level = |key: &str| first_present(fields, &[key]).and_then(parse_number);
    let cash_vat = section(fields, VatSectionKind::Cash, &["kontant", "amount"], top_level("kontant"));
    let credit_vat = section(
        fields,
        VatSectionKind::Credit,
        &["kredit", "amount"],
        top_level("total_kredit"),
    );
    let total_collected = section(
        fields,
        VatSectionKind::TotalCollected,
        &["total_inkort", "amount"],
        None,
    );
    let cancelled = section(fields, VatSectionKind::Cancelled, &["amount"], None);

    let cash = reader.number("kontant", &["kontant"], cash_vat.as_ref().map(|s| s.amount));
    let total_credit = reader.number(
        "total_kredit",
        &["total_kredit"],
        credit_vat.as_ref().map(|s| s.amount),
    );

    let record = CanonicalShiftRecord {
        org_nr: reader.text("org_nr", &["org_nr"], &defaults.org_nr),
        registration: reader
            .text("regnr", &["regnr"], &defaults.registration)
            .to_uppercase(),
        driver_ref: reader.text("forarid", &["forarid"], &defaults.driver_ref),
        car_slot: reader.text("drosknr", &["drosknr"], &defaults.car_slot),
        report_nr: reader.text("rapportnr", &["rapportnr"], &defaults.report_nr),
        start_time: reader.timestamp("start_time", &["starttid", "start_time"], &defaults.start_time),
        end_time: reader.timestamp("end_time", &["sluttid", "end_time"], &defaults.end_time),
        taxi_km: reader.number("taxitrafik_km", &["taxitrafik_km"], None),
        paid_km: reader.number("betalda_km", &["betalda_km"], None),
        trips: reader.number("turer", &["turer"], None).round() as i64,
        cash,
        total_credit,
        tip_credit: reader.number("drikskredit", &["drikskredit"], None),
        to_report: reader.number("att_redovisa", &["att_redovisa"], None),
        wage_base: reader.number("lonegr_ex_moms", &["lonegr_ex_moms"], None),
        cash_vat: cash_vat.unwrap_or_else(|| VatSection::empty(cash)),
        credit_vat: credit_vat.unwrap_or_else(|| VatSection::empty(total_credit)),
        total_collected,
        cancelled,
    };

    let report = if reader.defaulted.is_empty() {
        NormalizationReport::Complete
    } else {
        warn!(fields = ?reader.defaulted, "extraction incomplete, defaults applied");
        NormalizationReport::DefaultsApplied(reader.defaulted)
    };

    Normalization { record, report }
}

/// Normalizes free-form model text, see [`RawExtraction::from_model_text`].
pub fn normalize_model_text(text: &str, defaults: &ShiftDefaults) -> Normalization {
    normalize(&RawExtraction::from_model_text(text), defaults)
}

struct FieldReader<'a> {
    fields: &'a Map<String, Value>,
    defaulted: Vec<&'static str>,
}

impl FieldReader<'_> {
    fn text(&mut self, name: &'static str, keys: &[&str], fallback: &str) -> String {
        let value = match first_present(self.fields, keys) {
            Some(Value::String(text)) => Some(text.trim().to_string()),
            Some(Value::Number(number)) => Some(number.to_string()),
            _ => None,
        };
        match value.filter(|text| !text.is_empty()) {
            Some(text) => text,
            None => {
                self.defaulted.push(name);
                fallback.to_string()
            }
        }
    }

    fn timestamp(&mut self, name: &'static str, keys: &[&str], fallback: &str) -> String {
        match first_present(self.fields, keys)
            .and_then(Value::as_str)
            .and_then(normalize_timestamp)
        {
            Some(stamp) => stamp,
            None => {
                self.defaulted.push(name);
                fallback.to_string()
            }
        }
    }

    fn number(&mut self, name: &'static str, keys: &[&str], fallback: Option<f64>) -> f64 {
        match first_present(self.fields, keys).and_then(parse_number).or(fallback) {
            Some(value) => value,
            None => {
                self.defaulted.push(name);
                0.0
            }
        }
    }
}

fn section(
    fields: &Map<String, Value>,
    kind: VatSectionKind,
    amount_keys: &[&str],
    fallback: Option<f64>,
) -> Option<VatSection> {
    let section = fields.get(kind.field_name())?.as_object()?;
    let details = section
        .get("moms_details")
        .and_then(Value::as_array)
        .map(|entries| reconcile_raw(entries))
        .unwrap_or_else(|| reconcile_raw(&[]));
    let amount = first_present(section, amount_keys)
        .and_then(parse_number)
        .or(fallback)
        .unwrap_or(0.0);
    Some(VatSection { amount, details })
}
