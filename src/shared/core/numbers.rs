use serde_json::Value;

/// Coerces a loosely typed extraction value into a finite number.
///
/// JSON numbers pass through, strings go through [`parse_number_text`], and
/// every other shape yields `None`.
pub fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64().filter(|v| v.is_finite()),
        Value::String(text) => parse_number_text(text),
        _ => None,
    }
}

/// Parses receipt-style numeric text such as `"1 234,50 kr"` or `"12.5 km"`.
///
/// A lone comma is a decimal separator. When both separators occur, whichever
/// comes last is the decimal one and the other is dropped as a thousands
/// separator.
pub fn parse_number_text(text: &str) -> Option<f64> {
    let compact: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
        .replace("kr", "");

    let decimal = match (compact.rfind(','), compact.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => compact.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => compact.replace(',', ""),
        (Some(_), None) => compact.replace(',', "."),
        _ => compact,
    };

    let cleaned: String = decimal
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}
