use crate::modules::shifts::core::extraction::RawExtraction;
use serde_json::{Value, json};

/// A realistic, complete vision-engine extraction for one shift.
pub struct ReceiptExtractionBuilder {
    value: Value,
}

impl Default for ReceiptExtractionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReceiptExtractionBuilder {
    pub fn new() -> Self {
        Self {
            value: json!({
                "org_nr": "556677-8899",
                "regnr": "abc123 ",
                "forarid": "4711",
                "drosknr": "1234",
                "rapportnr": "R100",
                "starttid": "2024-03-01 08:00",
                "sluttid": "2024-03-01 16:00",
                "taxitrafik_km": "152,3",
                "betalda_km": 98.5,
                "turer": 12,
                "kontant": "1 250,00 kr",
                "total_kredit": 2300,
                "drikskredit": 50,
                "att_redovisa": 1250,
                "lonegr_ex_moms": 3000,
                "kontant_details": {
                    "kontant": 1250,
                    "moms_details": [
                        {"moms_percentage": 6, "brutto": 1250, "netto": 1179.25, "moms_kr": 70.75},
                        {"moms_percentage": 25, "brutto": 0, "netto": 0, "moms_kr": 0}
                    ]
                },
                "kredit_details": {
                    "kredit": 2300,
                    "moms_details": [
                        {"moms_percentage": 6, "brutto": 2200, "netto": 2075.47, "moms_kr": 124.53},
                        {"moms_percentage": 25, "brutto": 100, "netto": 80, "moms_kr": 20}
                    ]
                },
                "total_inkort_details": {
                    "total_inkort": 3550,
                    "moms_details": [
                        {"moms_percentage": 6, "brutto": 3550, "netto": 3349.06, "moms_kr": 200.94}
                    ]
                },
                "varav_bom_avbest_details": {
                    "moms_details": [
                        {"moms_percentage": 25, "brutto": 100, "netto": 80, "moms_kr": 20}
                    ]
                }
            }),
        }
    }

    pub fn with(mut self, key: &str, value: Value) -> Self {
        if let Some(fields) = self.value.as_object_mut() {
            fields.insert(key.to_string(), value);
        }
        self
    }

    pub fn without(mut self, key: &str) -> Self {
        if let Some(fields) = self.value.as_object_mut() {
            fields.remove(key);
        }
        self
    }

    pub fn to_value(&self) -> Value {
        self.value.clone()
    }

    pub fn build(self) -> RawExtraction {
        RawExtraction::new(self.value)
    }
}
