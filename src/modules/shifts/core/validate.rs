use crate::modules::shifts::core::record::CanonicalShiftRecord;
use crate::modules::shifts::core::vat::ALLOWED_RATES;
use crate::shared::core::timestamps::parse_timestamp;
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRules {
    pub min_trips: i64,
    pub max_trips: i64,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            min_trips: 1,
            max_trips: 35,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub message: String,
    pub missing_fields: Vec<&'static str>,
}

impl ValidationReport {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            message: String::new(),
            missing_fields: Vec::new(),
        }
    }

    fn invalid(message: impl Into<String>, fields: Vec<&'static str>) -> Self {
        Self {
            is_valid: false,
            message: message.into(),
            missing_fields: fields,
        }
    }
}

/// Checks the business rules in order and reports the first violation.
///
/// A trip count above the allowed range is reset to 0 on the record.
pub fn validate(record: &mut CanonicalShiftRecord, rules: &ValidationRules) -> ValidationReport {
    let report = check(record, rules);
    if !report.is_valid {
        warn!(
            fields = ?report.missing_fields,
            message = %report.message,
            "shift record rejected"
        );
    }
    report
}

fn check(record: &mut CanonicalShiftRecord, rules: &ValidationRules) -> ValidationReport {
    let required = [
        ("org_nr", record.org_nr.as_str()),
        ("regnr", record.registration.as_str()),
        ("forarid", record.driver_ref.as_str()),
        ("drosknr", record.car_slot.as_str()),
        ("rapportnr", record.report_nr.as_str()),
        ("start_time", record.start_time.as_str()),
        ("end_time", record.end_time.as_str()),
    ];
    let missing: Vec<&'static str> = required
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();
    if !missing.is_empty() {
        return ValidationReport::invalid(
            format!("Saknade obligatoriska fält: {}", missing.join(", ")),
            missing,
        );
    }

    let numeric = [
        ("taxitrafik_km", record.taxi_km),
        ("betalda_km", record.paid_km),
        ("kontant", record.cash),
        ("total_kredit", record.total_credit),
        ("drikskredit", record.tip_credit),
        ("att_redovisa", record.to_report),
        ("lonegr_ex_moms", record.wage_base),
    ];
    if let Some((name, _)) = numeric.iter().find(|(_, value)| !value.is_finite()) {
        return ValidationReport::invalid(
            format!("Ogiltigt värde för {name}: måste vara ett nummer"),
            vec![*name],
        );
    }

    if record.taxi_km < record.paid_km {
        return ValidationReport::invalid(
            format!(
                "Ogiltig data: Taxitrafik KM ({}) måste vara större än Betalda KM ({})",
                record.taxi_km, record.paid_km
            ),
            vec!["taxitrafik_km", "betalda_km"],
        );
    }

    let trips_message = format!(
        "Antal turer måste vara mellan {} och {}",
        rules.min_trips, rules.max_trips
    );
    if record.trips > rules.max_trips {
        warn!(trips = record.trips, "trip count out of range, reset to 0");
        record.trips = 0;
        return ValidationReport::invalid(trips_message, vec!["turer"]);
    }
    if record.trips < rules.min_trips {
        return ValidationReport::invalid(trips_message, vec!["turer"]);
    }

    let start = parse_timestamp(&record.start_time);
    let end = parse_timestamp(&record.end_time);
    for (name, parsed) in [("start_time", start), ("end_time", end)] {
        if parsed.is_none() {
            return ValidationReport::invalid(
                format!("Ogiltigt datumformat för {name}, förväntat ÅÅÅÅ-MM-DD TT:MM"),
                vec![name],
            );
        }
    }
    if let (Some(start), Some(end)) = (start, end)
        && end < start
    {
        return ValidationReport::invalid(
            "Sluttid kan inte vara före starttid",
            vec!["start_time", "end_time"],
        );
    }

    for (kind, section) in record.sections() {
        let complete = section.details.len() == ALLOWED_RATES.len()
            && section
                .details
                .iter()
                .zip(ALLOWED_RATES)
                .all(|(detail, rate)| detail.rate == rate);
        let well_formed = section.amount.is_finite()
            && section.details.iter().all(|detail| detail.is_well_formed());
        if !complete || !well_formed {
            return ValidationReport::invalid(
                format!("Ogiltiga momsuppgifter för {}", kind.display_name()),
                vec![kind.field_name()],
            );
        }
    }

    ValidationReport::valid()
}
