use chrono::NaiveDate;

/// Converts a (year, day-of-year) pair into a calendar date.
/// Returns `None` when the day-of-year is outside the year's range.
pub fn date_from_doy(year: i32, doy: u32) -> Option<NaiveDate> {
    NaiveDate::from_yo_opt(year, doy)
}
