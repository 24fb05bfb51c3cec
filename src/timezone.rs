//! Timezone lookup for deciding which calendar month a timestamp falls in.

use time::{OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone, Tz};

use crate::Error;

/// Look up a timezone by its canonical name, e.g. "Asia/Kolkata".
///
/// # Errors
/// Returns [Error::InvalidTimezone] if `canonical_timezone` is not a known timezone.
pub fn get_timezone(canonical_timezone: &str) -> Result<&'static Tz, Error> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .ok_or_else(|| Error::InvalidTimezone(canonical_timezone.to_owned()))
}

/// The UTC offset of `timezone` at the instant `date_time`.
///
/// The offset is taken at `date_time` rather than now so that timestamps on
/// either side of a daylight saving change land in the right day.
pub fn get_offset_at(timezone: &Tz, date_time: OffsetDateTime) -> UtcOffset {
    timezone.get_offset_utc(&date_time).to_utc()
}
