use crate::modules::shifts::core::shift::NewShift;
use crate::shared::core::timestamps::parse_timestamp;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PeriodError {
    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("period ends ({to}) before it starts ({from})")]
    Reversed { from: NaiveDate, to: NaiveDate },
}

/// Whole calendar days, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftPeriod {
    from: NaiveDate,
    to: NaiveDate,
}

impl ShiftPeriod {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, PeriodError> {
        if to < from {
            return Err(PeriodError::Reversed { from, to });
        }
        Ok(Self { from, to })
    }

    /// From the first of `today`'s month up to and including `today`.
    pub fn month_to_date(today: NaiveDate) -> Self {
        Self {
            from: today.with_day(1).unwrap_or(today),
            to: today,
        }
    }

    /// Parses optional `YYYY-MM-DD` bounds, filling gaps from the month to date.
    pub fn parse(from: Option<&str>, to: Option<&str>, today: NaiveDate) -> Result<Self, PeriodError> {
        let default = Self::month_to_date(today);
        let from = from.map(parse_date).transpose()?.unwrap_or(default.from);
        let to = to.map(parse_date).transpose()?.unwrap_or(default.to);
        Self::new(from, to)
    }

    pub fn from(&self) -> NaiveDate {
        self.from
    }

    pub fn to(&self) -> NaiveDate {
        self.to
    }

    /// A shift belongs to the period when it starts on or after the first day
    /// and ends no later than the last day.
    pub fn contains(&self, shift: &NewShift) -> bool {
        match (parse_timestamp(&shift.start_time), parse_timestamp(&shift.end_time)) {
            (Some(start), Some(end)) => start >= self.start() && end <= self.end(),
            _ => false,
        }
    }

    fn start(&self) -> NaiveDateTime {
        self.from.and_time(NaiveTime::MIN)
    }

    fn end(&self) -> NaiveDateTime {
        self.to.and_hms_opt(23, 59, 59).unwrap_or(self.to.and_time(NaiveTime::MIN))
    }
}

fn parse_date(text: &str) -> Result<NaiveDate, PeriodError> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|_| PeriodError::InvalidDate(text.to_string()))
}
