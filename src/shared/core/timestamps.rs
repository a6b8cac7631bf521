use chrono::NaiveDateTime;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Canonical receipt timestamp layout, `YYYY-MM-DD HH:mm`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

static CANONICAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}$").expect("canonical timestamp pattern")
});

#[derive(Clone, Copy)]
enum FieldOrder {
    YearFirst,
    DayFirst,
}

static ALTERNATIVES: LazyLock<Vec<(Regex, FieldOrder)>> = LazyLock::new(|| {
    [
        (
            r"^(\d{4})-(\d{1,2})-(\d{1,2})(?:\s+|T)(\d{1,2}):(\d{1,2})(?::\d{2}(?:\.\d+)?)?(?:Z|[+-]\d{2}:?\d{2})?$",
            FieldOrder::YearFirst,
        ),
        (
            r"^(\d{1,2})/(\d{1,2})/(\d{4})\s+(\d{1,2}):(\d{1,2})$",
            FieldOrder::DayFirst,
        ),
        (
            r"^(\d{1,2})-(\d{1,2})-(\d{4})\s+(\d{1,2}):(\d{1,2})$",
            FieldOrder::DayFirst,
        ),
        (
            r"^(\d{4})(\d{2})(\d{2})\s+(\d{2})(\d{2})$",
            FieldOrder::YearFirst,
        ),
    ]
    .into_iter()
    .map(|(pattern, order)| (Regex::new(pattern).expect("timestamp pattern"), order))
    .collect()
});

/// Rewrites a receipt timestamp into `YYYY-MM-DD HH:mm`.
///
/// Returns `None` when the text matches none of the known layouts or does not
/// name a real calendar minute.
pub fn normalize_timestamp(text: &str) -> Option<String> {
    let text = text.trim();
    if parse_timestamp(text).is_some() {
        return Some(text.to_string());
    }
    ALTERNATIVES.iter().find_map(|(pattern, order)| {
        let captures = pattern.captures(text)?;
        let candidate = assemble(&captures, *order);
        parse_timestamp(&candidate).map(format_timestamp)
    })
}

/// Parses a canonical timestamp. Anything off-pattern is rejected.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    if !CANONICAL.is_match(text) {
        return None;
    }
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).ok()
}

pub fn format_timestamp(value: NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

fn assemble(captures: &Captures<'_>, order: FieldOrder) -> String {
    let part = |index: usize| captures.get(index).map_or("", |m| m.as_str());
    let (year, month, day) = match order {
        FieldOrder::YearFirst => (part(1), part(2), part(3)),
        FieldOrder::DayFirst => (part(3), part(2), part(1)),
    };
    format!(
        "{year}-{month:0>2}-{day:0>2} {hour:0>2}:{minute:0>2}",
        hour = part(4),
        minute = part(5)
    )
}

#[cfg(test)]
mod timestamp_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("2024-03-01 08:00", "2024-03-01 08:00")]
    #[case(" 2024-03-01 08:00 ", "2024-03-01 08:00")]
    #[case("2024-3-1 8:5", "2024-03-01 08:05")]
    #[case("01/03/2024 16:30", "2024-03-01 16:30")]
    #[case("01-03-2024 16:30", "2024-03-01 16:30")]
    #[case("20240301 0800", "2024-03-01 08:00")]
    #[case("2024-03-01T08:00:00Z", "2024-03-01 08:00")]
    #[case("2024-03-01T08:00:00.000+01:00", "2024-03-01 08:00")]
    fn it_should_canonicalise_known_layouts(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_timestamp(input).as_deref(), Some(expected));
    }

    #[rstest]
    #[case("")]
    #[case("igår kväll")]
    #[case("2024-13-01 08:00")]
    #[case("31/02/2024 08:00")]
    fn it_should_reject_unknown_or_impossible_timestamps(#[case] input: &str) {
        assert_eq!(normalize_timestamp(input), None);
    }

    #[test]
    fn it_should_only_parse_the_canonical_layout() {
        assert!(parse_timestamp("2024-03-01 08:00").is_some());
        assert!(parse_timestamp("2024-03-01T08:00").is_none());
        assert!(parse_timestamp("2024-02-30 08:00").is_none());
    }
}
