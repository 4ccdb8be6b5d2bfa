use chrono::NaiveDate;
use diesel::pg::data_types::PgInterval;
use diesel::prelude::*;
use std::fmt;
use std::str::FromStr;

/// Date format accepted for `flight_date` parameters, e.g. `2084-06-12`.
pub const FLIGHT_DATE_FORMAT: &str = "%Y-%m-%d";

/// A scheduled flight to a planet.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = crate::schema::flight)]
#[diesel(belongs_to(crate::planets::Planet))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Flight {
    pub id: i32,
    pub date: NaiveDate,
    pub planet_id: i32,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::flight)]
pub struct NewFlight {
    pub date: NaiveDate,
    pub planet_id: i32,
}

/// One row of the flight listing: a flight joined with its planet.
#[derive(Debug, Clone, PartialEq, Eq, Queryable)]
pub struct FlightListing {
    pub flight_id: i32,
    pub flight_date: NaiveDate,
    pub planet_name: String,
    pub planet_id: i32,
}

/// Parse a `yyyy-MM-dd` date.
pub fn parse_flight_date(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(raw.trim(), FLIGHT_DATE_FORMAT)
}

/// A calendar interval used to shift flight dates.
///
/// Accepts one or more `<integer><unit>` terms, e.g. `1day`, `2weeks`,
/// `1 year 2 months`, `-3 days`. Weeks are folded into days and years into
/// months. Sub-day units are not accepted because flights carry a date only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateInterval {
    pub months: i32,
    pub days: i32,
}

impl DateInterval {
    pub fn from_days(days: i32) -> Self {
        Self { months: 0, days }
    }

    /// The interval that undoes this one.
    pub fn negated(self) -> Self {
        Self {
            months: -self.months,
            days: -self.days,
        }
    }
}

impl From<DateInterval> for PgInterval {
    fn from(interval: DateInterval) -> Self {
        PgInterval::new(0, interval.days, interval.months)
    }
}

impl fmt::Display for DateInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.months, self.days) {
            (0, days) => write!(f, "{} days", days),
            (months, 0) => write!(f, "{} months", months),
            (months, days) => write!(f, "{} months {} days", months, days),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntervalParseError {
    Empty,
    MissingAmount(String),
    MissingUnit(String),
    UnknownUnit(String),
    Overflow,
}

impl fmt::Display for IntervalParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "interval is empty"),
            Self::MissingAmount(at) => write!(f, "expected a number at '{}'", at),
            Self::MissingUnit(amount) => write!(f, "missing unit after '{}'", amount),
            Self::UnknownUnit(unit) => write!(
                f,
                "unknown unit '{}' (expected day, week, month or year)",
                unit
            ),
            Self::Overflow => write!(f, "interval is too large"),
        }
    }
}

impl std::error::Error for IntervalParseError {}

enum Unit {
    Day,
    Week,
    Month,
    Year,
}

fn parse_unit(unit: &str) -> Option<Unit> {
    match unit {
        "d" | "day" | "days" => Some(Unit::Day),
        "w" | "week" | "weeks" => Some(Unit::Week),
        "mon" | "mons" | "month" | "months" => Some(Unit::Month),
        "y" | "year" | "years" => Some(Unit::Year),
        _ => None,
    }
}

impl FromStr for DateInterval {
    type Err = IntervalParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let input = raw.trim().to_ascii_lowercase();
        if input.is_empty() {
            return Err(IntervalParseError::Empty);
        }

        let mut interval = DateInterval::default();
        let mut rest = input.as_str();

        while !rest.is_empty() {
            let sign_len = usize::from(rest.starts_with(['+', '-']));
            let digits_len = rest[sign_len..]
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(rest.len() - sign_len);
            if digits_len == 0 {
                return Err(IntervalParseError::MissingAmount(rest.to_string()));
            }
            let (amount_text, after_amount) = rest.split_at(sign_len + digits_len);
            let amount: i32 = amount_text
                .parse()
                .map_err(|_| IntervalParseError::Overflow)?;

            let after_amount = after_amount.trim_start();
            let unit_len = after_amount
                .find(|c: char| !c.is_ascii_alphabetic())
                .unwrap_or(after_amount.len());
            if unit_len == 0 {
                return Err(IntervalParseError::MissingUnit(amount_text.to_string()));
            }
            let (unit_text, after_unit) = after_amount.split_at(unit_len);
            let unit = parse_unit(unit_text)
                .ok_or_else(|| IntervalParseError::UnknownUnit(unit_text.to_string()))?;

            let (days, months) = match unit {
                Unit::Day => (Some(amount), Some(0)),
                Unit::Week => (amount.checked_mul(7), Some(0)),
                Unit::Month => (Some(0), Some(amount)),
                Unit::Year => (Some(0), amount.checked_mul(12)),
            };
            interval.days = days
                .and_then(|d| interval.days.checked_add(d))
                .ok_or(IntervalParseError::Overflow)?;
            interval.months = months
                .and_then(|m| interval.months.checked_add(m))
                .ok_or(IntervalParseError::Overflow)?;

            rest = after_unit.trim_start();
        }

        Ok(interval)
    }
}
