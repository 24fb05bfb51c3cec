//! Resolves loosely-typed transactions into a uniform shape for aggregation.
//!
//! Records from the store are not consistent: the date may live in one of
//! several fields, amounts may be strings and categories may be blank. This
//! stage never fails, every malformed value is resolved with a default.

use std::fmt::Display;

use serde::Serialize;
use time::{
    Date, OffsetDateTime, PrimitiveDateTime, UtcOffset,
    format_description::{BorrowedFormatItem, well_known::Rfc3339},
    macros::format_description,
};
use time_tz::{TimeZone, Tz};

use crate::{
    timezone::get_offset_at,
    transaction::{RawAmount, Transaction, TransactionKind},
};

/// The category given to transactions without one.
pub const DEFAULT_CATEGORY: &str = "Other";

/// A field of [Transaction] that may hold the effective date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    /// `occurred_at`, when the transaction happened.
    OccurredAt,
    /// `date`, a generic date field used by older records.
    Date,
    /// `created_at`, when the transaction was recorded.
    CreatedAt,
}

impl DateField {
    /// Read this field from `transaction`.
    pub fn read(self, transaction: &Transaction) -> Option<&str> {
        match self {
            DateField::OccurredAt => transaction.occurred_at.as_deref(),
            DateField::Date => transaction.date.as_deref(),
            DateField::CreatedAt => transaction.created_at.as_deref(),
        }
    }
}

/// The order in which date fields are tried, first match wins.
pub const DEFAULT_DATE_FIELDS: &[DateField] =
    &[DateField::OccurredAt, DateField::Date, DateField::CreatedAt];

/// Identifies the calendar month a transaction is grouped under.
///
/// Normally `YYYY-MM`, which sorts chronologically as a string. Dates that
/// cannot be parsed keep their raw text as the key so that they still group
/// together.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct MonthKey(String);

impl MonthKey {
    /// The `YYYY-MM` key for the month containing `date`.
    pub fn from_date(date: Date) -> Self {
        Self(format!("{:04}-{:02}", date.year(), u8::from(date.month())))
    }

    /// A key that is exactly `raw`, used for dates that could not be parsed.
    pub fn raw(raw: &str) -> Self {
        Self(raw.to_owned())
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0)
    }
}

/// A transaction reduced to what the aggregator needs.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTransaction {
    /// The month the transaction is grouped under.
    pub month: MonthKey,
    /// The absolute amount, never negative.
    pub amount: f64,
    /// Whether the amount is income or expense.
    pub kind: TransactionKind,
    /// The trimmed category, or [DEFAULT_CATEGORY].
    pub category: String,
}

/// Turns raw [Transaction]s into [NormalizedTransaction]s.
///
/// The date field precedence and the timezone used to decide which month a
/// timestamp falls in are configurable; [Normalizer::default] uses
/// [DEFAULT_DATE_FIELDS] and UTC.
#[derive(Clone, Copy)]
pub struct Normalizer<'a> {
    date_fields: &'a [DateField],
    timezone: Option<&'static Tz>,
}

impl std::fmt::Debug for Normalizer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer")
            .field("date_fields", &self.date_fields)
            .field("timezone", &self.timezone.map(|timezone| timezone.name()))
            .finish()
    }
}

impl Default for Normalizer<'static> {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_FIELDS)
    }
}

impl<'a> Normalizer<'a> {
    /// Create a normalizer that reads the effective date from `date_fields`,
    /// in order.
    pub fn new(date_fields: &'a [DateField]) -> Self {
        Self {
            date_fields,
            timezone: None,
        }
    }

    /// Convert timestamps with an offset into `timezone` before taking their
    /// month. Without a timezone, UTC is used.
    pub fn timezone(mut self, timezone: &'static Tz) -> Self {
        self.timezone = Some(timezone);
        self
    }

    /// Normalize a single transaction.
    pub fn normalize(&self, transaction: &Transaction) -> NormalizedTransaction {
        NormalizedTransaction {
            month: self.month_key(self.effective_date(transaction)),
            amount: resolve_amount(&transaction.amount),
            kind: TransactionKind::from_raw(transaction.kind.as_deref()),
            category: resolve_category(transaction.topic.as_deref()),
        }
    }

    /// The value of the first non-empty date field, or `""` if there is none.
    pub fn effective_date<'t>(&self, transaction: &'t Transaction) -> &'t str {
        self.date_fields
            .iter()
            .find_map(|field| field.read(transaction).filter(|value| !value.is_empty()))
            .unwrap_or("")
    }

    /// The month key for a raw date string.
    ///
    /// Unparseable dates are passed through verbatim.
    pub fn month_key(&self, raw_date: &str) -> MonthKey {
        match parse_calendar_date(raw_date, self.timezone) {
            Some(date) => MonthKey::from_date(date),
            None => MonthKey::raw(raw_date),
        }
    }
}

type FormatDescription = &'static [BorrowedFormatItem<'static>];

// Offsets may be written "+05:30", "+0530" or "+05".
const OFFSET_DATE_TIME: FormatDescription = format_description!(
    "[year]-[month]-[day]T[hour]:[minute][optional [:[second][optional [.[subsecond]]]]][offset_hour sign:mandatory][optional [:]][optional [[offset_minute]]]"
);
// Postgres style, e.g. "2024-01-05 10:00:00+05:30" or "2024-01-05 10:00:00+00".
const OFFSET_DATE_TIME_SPACED: FormatDescription = format_description!(
    "[year]-[month]-[day] [hour]:[minute][optional [:[second][optional [.[subsecond]]]]][offset_hour sign:mandatory][optional [:]][optional [[offset_minute]]]"
);
const LOCAL_DATE_TIME: FormatDescription = format_description!(
    "[year]-[month]-[day]T[hour]:[minute][optional [:[second][optional [.[subsecond]]]]]"
);
const LOCAL_DATE_TIME_SPACED: FormatDescription = format_description!(
    "[year]-[month]-[day] [hour]:[minute][optional [:[second][optional [.[subsecond]]]]]"
);

/// Calendar date layouts, tried in order.
const DATE_FORMATS: &[FormatDescription] = &[
    // "2024-01-05" and "2024-1-5"
    format_description!("[year]-[month padding:none]-[day padding:none]"),
    // "2024/01/05"
    format_description!("[year]/[month padding:none]/[day padding:none]"),
    // "01/05/2024", month first
    format_description!("[month padding:none]/[day padding:none]/[year]"),
    // "January 5, 2024" and "Jan 5, 2024"
    format_description!("[month repr:long case_sensitive:false] [day padding:none], [year]"),
    format_description!("[month repr:short case_sensitive:false] [day padding:none], [year]"),
    // "5 January 2024" and "5 Jan 2024"
    format_description!("[day padding:none] [month repr:long case_sensitive:false] [year]"),
    format_description!("[day padding:none] [month repr:short case_sensitive:false] [year]"),
];

/// Parse the calendar date of a raw date string.
///
/// Timestamps with an offset are converted into `timezone` (UTC when `None`)
/// first. Timestamps without an offset and plain dates are taken as written.
/// A bare year or year and month, e.g. "2024" or "2024-03", is the first day
/// of that period. Returns `None` for anything that is not a valid date.
pub fn parse_calendar_date(raw: &str, timezone: Option<&Tz>) -> Option<Date> {
    let text = raw.trim();

    if let Ok(date_time) = OffsetDateTime::parse(text, &Rfc3339)
        .or_else(|_| OffsetDateTime::parse(text, OFFSET_DATE_TIME))
        .or_else(|_| OffsetDateTime::parse(text, OFFSET_DATE_TIME_SPACED))
    {
        let offset = timezone.map_or(UtcOffset::UTC, |timezone| {
            get_offset_at(timezone, date_time)
        });
        return date_time
            .checked_to_offset(offset)
            .map(|date_time| date_time.date());
    }

    if let Ok(date_time) = PrimitiveDateTime::parse(text, LOCAL_DATE_TIME)
        .or_else(|_| PrimitiveDateTime::parse(text, LOCAL_DATE_TIME_SPACED))
    {
        return Some(date_time.date());
    }

    if let Some(date) = parse_date(text) {
        return Some(date);
    }

    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit() || b == b'-' || b == b'/') {
        return None;
    }

    // Partial dates start on the first of the period: "2024-03", "2024/3" or "2024".
    [
        format!("{text}-01"),
        format!("{text}/01"),
        format!("{text}-01-01"),
    ]
    .iter()
    .find_map(|completed| parse_date(completed))
}

fn parse_date(text: &str) -> Option<Date> {
    DATE_FORMATS
        .iter()
        .find_map(|format| Date::parse(text, format).ok())
}

/// Resolve a raw amount to a non-negative number.
///
/// Numeric strings are parsed, anything that is not a finite number counts
/// as zero. The sign is dropped: the direction of money comes from the
/// transaction kind.
pub fn resolve_amount(amount: &RawAmount) -> f64 {
    let value = match amount {
        RawAmount::Number(number) => *number,
        RawAmount::Text(text) => text.trim().parse().unwrap_or(0.0),
        RawAmount::Missing => 0.0,
    };

    if value.is_finite() { value.abs() } else { 0.0 }
}

/// Trim a raw category, substituting [DEFAULT_CATEGORY] when it is missing or blank.
pub fn resolve_category(topic: Option<&str>) -> String {
    topic
        .map(str::trim)
        .filter(|topic| !topic.is_empty())
        .unwrap_or(DEFAULT_CATEGORY)
        .to_owned()
}
