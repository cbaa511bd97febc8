//! Decode the time coordinate of ERA5 files.
//!
//! ERA5 netCDF files store time as an integer number of hours since 1900-01-01 00:00:00.
use crate::error::{InvalidInputError, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime};

// Bound on offsets before they are handed to chrono, whose `Duration` constructors panic on
// overflow. Anything this large is outside the calendar range anyway.
const MAX_HOURS: i64 = 2_000_000_000;

/// The reference time of the ERA5 time coordinate.
pub fn era5_epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1900, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Convert an offset in hours from the ERA5 epoch into a timestamp.
///
/// Fractional offsets are truncated toward zero to whole hours.
pub fn era5_datetime(hours: f64) -> Result<NaiveDateTime> {
    decode_one(0, hours)
}

/// Convert a whole time axis. Fails on the first offset that can't be converted.
pub fn decode_time_axis(hours: &[f64]) -> Result<Vec<NaiveDateTime>> {
    hours
        .iter()
        .enumerate()
        .map(|(index, &hrs)| decode_one(index, hrs))
        .collect()
}

fn decode_one(index: usize, hours: f64) -> Result<NaiveDateTime> {
    let out_of_range = InvalidInputError::TimeOutOfRange { index, hours };

    let whole = hours.trunc();
    if !whole.is_finite() || whole.abs() > MAX_HOURS as f64 {
        return Err(out_of_range);
    }

    era5_epoch()
        .checked_add_signed(Duration::hours(whole as i64))
        .ok_or(out_of_range)
}
