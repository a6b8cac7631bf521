/// Instructions sent with every receipt image.
pub const RECEIPT_PROMPT: &str = r#"Du läser ett kvitto från en taxiskiftsrapport. Svara ENDAST med ett JSON-objekt med följande fält:
{
  "org_nr": "organisationsnummer, t.ex. 556677-8899",
  "regnr": "bilens registreringsnummer",
  "forarid": "förarens ID",
  "drosknr": "droskans nummer",
  "rapportnr": "rapportens nummer",
  "starttid": "YYYY-MM-DD HH:mm",
  "sluttid": "YYYY-MM-DD HH:mm",
  "taxitrafik_km": 0,
  "betalda_km": 0,
  "turer": 0,
  "lonegr_ex_moms": 0,
  "kontant": 0,
  "total_kredit": 0,
  "drikskredit": 0,
  "att_redovisa": 0,
  "kontant_details": {"kontant": 0, "moms_details": [{"moms_percentage": 6, "brutto": 0, "netto": 0, "moms_kr": 0}, {"moms_percentage": 25, "brutto": 0, "netto": 0, "moms_kr": 0}]},
  "kredit_details": {"kredit": 0, "moms_details": [{"moms_percentage": 6, "brutto": 0, "netto": 0, "moms_kr": 0}, {"moms_percentage": 25, "brutto": 0, "netto": 0, "moms_kr": 0}]},
  "total_inkort_details": {"total_inkort": 0, "moms_details": [{"moms_percentage": 6, "brutto": 0, "netto": 0, "moms_kr": 0}, {"moms_percentage": 25, "brutto": 0, "netto": 0, "moms_kr": 0}]},
  "varav_bom_avbest_details": {"moms_details": [{"moms_percentage": 6, "brutto": 0, "netto": 0, "moms_kr": 0}, {"moms_percentage": 25, "brutto": 0, "netto": 0, "moms_kr": 0}]}
}
Belopp anges som tal. Fält som inte syns på kvittot utelämnas."#;
