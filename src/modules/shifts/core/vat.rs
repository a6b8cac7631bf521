use crate::shared::core::numbers::parse_number;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

const RATE_KEYS: &[&str] = &["moms_percentage", "rate", "vat_rate"];
const GROSS_KEYS: &[&str] = &["brutto", "gross"];
const NET_KEYS: &[&str] = &["netto", "net"];
const TAX_KEYS: &[&str] = &["moms_kr", "tax", "vat_amount"];

const RATE_TOLERANCE: f64 = 1e-9;

/// Statutory Swedish VAT rates a receipt may break down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum VatRate {
    Reduced,
    Standard,
}

/// Every reconciled section carries exactly one entry per rate, in this order.
pub const ALLOWED_RATES: [VatRate; 2] = [VatRate::Reduced, VatRate::Standard];

impl VatRate {
    pub fn percent(self) -> u8 {
        match self {
            VatRate::Reduced => 6,
            VatRate::Standard => 25,
        }
    }

    pub fn from_percent(value: f64) -> Option<Self> {
        ALLOWED_RATES
            .into_iter()
            .find(|rate| (f64::from(rate.percent()) - value).abs() < RATE_TOLERANCE)
    }
}

impl From<VatRate> for u8 {
    fn from(rate: VatRate) -> Self {
        rate.percent()
    }
}

impl TryFrom<u8> for VatRate {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        VatRate::from_percent(f64::from(value)).ok_or_else(|| format!("unsupported VAT rate {value}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VatDetail {
    #[serde(rename = "moms_percentage")]
    pub rate: VatRate,
    #[serde(rename = "brutto")]
    pub gross: f64,
    #[serde(rename = "netto")]
    pub net: f64,
    #[serde(rename = "moms_kr")]
    pub tax: f64,
}

impl VatDetail {
    pub fn zero(rate: VatRate) -> Self {
        Self {
            rate,
            gross: 0.0,
            net: 0.0,
            tax: 0.0,
        }
    }

    /// At least one amount is strictly positive.
    pub fn is_significant(&self) -> bool {
        self.gross > 0.0 || self.net > 0.0 || self.tax > 0.0
    }

    pub fn is_zero(&self) -> bool {
        self.gross == 0.0 && self.net == 0.0 && self.tax == 0.0
    }

    pub fn is_well_formed(&self) -> bool {
        [self.gross, self.net, self.tax]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }
}

/// Reconciles an untyped `moms_details` array coming straight from an extraction.
pub fn reconcile_raw(entries: &[Value]) -> Vec<VatDetail> {
    let coerced: Vec<VatDetail> = entries.iter().filter_map(coerce).collect();
    if coerced.len() < entries.len() {
        debug!(
            discarded = entries.len() - coerced.len(),
            "dropped VAT entries with an unknown rate"
        );
    }
    reconcile(coerced)
}

/// Returns exactly one entry per allowed rate, ascending by rate.
///
/// Entries without a positive amount are noise. The first surviving entry for
/// a rate wins and missing rates are filled with zero rows.
pub fn reconcile(details: impl IntoIterator<Item = VatDetail>) -> Vec<VatDetail> {
    complete_rates(filter_significant(details))
}

pub(crate) fn filter_significant(details: impl IntoIterator<Item = VatDetail>) -> Vec<VatDetail> {
    let mut kept: Vec<VatDetail> = Vec::with_capacity(ALLOWED_RATES.len());
    for detail in details {
        if !detail.is_significant() || kept.iter().any(|k| k.rate == detail.rate) {
            continue;
        }
        kept.push(detail);
    }
    kept
}

pub(crate) fn complete_rates(kept: Vec<VatDetail>) -> Vec<VatDetail> {
    ALLOWED_RATES
        .iter()
        .map(|rate| {
            kept.iter()
                .find(|d| d.rate == *rate)
                .copied()
                .unwrap_or_else(|| VatDetail::zero(*rate))
        })
        .collect()
}

fn coerce(entry: &Value) -> Option<VatDetail> {
    let fields = entry.as_object()?;
    let rate = first_number(fields, RATE_KEYS).and_then(VatRate::from_percent)?;
    Some(VatDetail {
        rate,
        gross: first_number(fields, GROSS_KEYS).unwrap_or(0.0),
        net: first_number(fields, NET_KEYS).unwrap_or(0.0),
        tax: first_number(fields, TAX_KEYS).unwrap_or(0.0),
    })
}

fn first_number(fields: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|key| fields.get(*key).and_then(parse_number))
}
