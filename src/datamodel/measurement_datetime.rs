pub type MeasurementDateTime = hifitime::Epoch;

use crate::error::DashboardError;
use hifitime::Unit;

pub trait MeasurementDateTimeExt: Sized {
    fn from_calendar_minute(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
    ) -> Result<Self, DashboardError>;
    fn to_datetime_string(&self) -> String;
    fn to_date_string(&self) -> String;
}

impl MeasurementDateTimeExt for MeasurementDateTime {
    fn from_calendar_minute(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
    ) -> Result<Self, DashboardError> {
        let raw = format!(
            "{:04}-{:02}-{:02} {:02}:{:02}",
            year, month, day, hour, minute
        );
        // hifitime rolls hour 24 over to the next day
        if hour > 23 || minute > 59 {
            return Err(DashboardError::invalid_datetime(
                &raw,
                "hour must be below 24 and minute below 60",
            ));
        }
        Self::maybe_from_gregorian_utc(year, month, day, hour, minute, 0, 0)
            .map_err(|err| DashboardError::invalid_datetime(&raw, err))
    }

    fn to_datetime_string(&self) -> String {
        let (year, month, day, hour, minute, second, _) = self.to_gregorian_utc();
        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            year, month, day, hour, minute, second
        )
    }

    fn to_date_string(&self) -> String {
        let (year, month, day, ..) = self.to_gregorian_utc();
        format!("{:04}-{:02}-{:02}", year, month, day)
    }
}

/// Which side of an inclusive range a user supplied value is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSide {
    Start,
    End,
}

/// Parse a datetime coming from the date-range picker.
///
/// Accepts ISO 8601 datetimes (`2023-01-01T00:05:00`, with an optional
/// offset, or `2023-01-01 00:05:00`) and plain dates (`2023-01-01`). A plain
/// date used as the end of a range covers the whole day.
pub fn parse_range_value(
    value: &str,
    side: RangeSide,
) -> Result<MeasurementDateTime, DashboardError> {
    let raw = value.trim();
    let normalized = raw.replacen(' ', "T", 1);
    let value = normalized.as_str();
    if let Ok(date) = iso8601::date(value) {
        if !value.contains('T') {
            let midnight = from_iso8601(
                raw,
                iso8601::DateTime {
                    date,
                    time: iso8601::Time {
                        hour: 0,
                        minute: 0,
                        second: 0,
                        millisecond: 0,
                        tz_offset_hours: 0,
                        tz_offset_minutes: 0,
                    },
                },
            )?;
            return Ok(match side {
                RangeSide::Start => midnight,
                RangeSide::End => midnight + Unit::Day * 1_i64 - Unit::Nanosecond * 1_i64,
            });
        }
    }

    let datetime =
        iso8601::datetime(value).map_err(|err| DashboardError::invalid_datetime(raw, err))?;
    from_iso8601(raw, datetime)
}

/// Same as [`parse_range_value`], with missing or blank values meaning "unset".
pub fn parse_optional_range_value(
    value: Option<&str>,
    side: RangeSide,
) -> Result<Option<MeasurementDateTime>, DashboardError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_range_value(value, side).map(Some),
    }
}

fn from_iso8601(
    raw: &str,
    datetime: iso8601::DateTime,
) -> Result<MeasurementDateTime, DashboardError> {
    let iso8601::DateTime { date, time } = datetime;
    let (year, month, day) = match date {
        iso8601::Date::YMD { year, month, day } => (year, month as u8, day as u8),
        iso8601::Date::Week { .. } | iso8601::Date::Ordinal { .. } => {
            return Err(DashboardError::invalid_datetime(
                raw,
                "only calendar dates (YYYY-MM-DD) are supported",
            ));
        }
    };
    let iso8601::Time {
        hour,
        minute,
        second,
        millisecond,
        tz_offset_hours,
        tz_offset_minutes,
    } = time;
    if hour > 23 || minute > 59 || second > 59 {
        return Err(DashboardError::invalid_datetime(raw, "time of day out of range"));
    }

    let mut epoch = MeasurementDateTime::maybe_from_gregorian_utc(
        year,
        month,
        day,
        hour as u8,
        minute as u8,
        second as u8,
        millisecond * 1_000_000_u32,
    )
    .map_err(|err| DashboardError::invalid_datetime(raw, err))?;

    // Shift local time back to UTC
    if tz_offset_hours != 0 {
        epoch = epoch - Unit::Hour * tz_offset_hours as i64;
    }
    if tz_offset_minutes != 0 {
        epoch = epoch - Unit::Minute * tz_offset_minutes as i64;
    }

    Ok(epoch)
}
