//! Calendar to Julian Day conversion.

use chrono::{DateTime, Datelike, Timelike, Utc};

/// Julian Day of the J2000.0 epoch (2000-01-01 12:00 TT).
pub const J2000: f64 = 2_451_545.0;
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// Julian Day for a Gregorian calendar date, `day` carrying the fraction of the day.
pub fn julian_day_from_calendar(year: i32, month: u32, day: f64) -> f64 {
    let (mut y, mut m) = (year as f64, month as f64);
    if month <= 2 {
        y -= 1.0;
        m += 12.0;
    }
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day + b - 1524.5
}

/// Convert a UTC instant to Julian Day.
pub fn julian_day(dt: DateTime<Utc>) -> f64 {
    let seconds = dt.hour() as f64 * 3600.0
        + dt.minute() as f64 * 60.0
        + dt.second() as f64
        + dt.nanosecond() as f64 / 1e9;
    let day = dt.day() as f64 + seconds / 86_400.0;
    julian_day_from_calendar(dt.year(), dt.month(), day)
}

/// Julian centuries elapsed since J2000.
pub fn julian_centuries(jd: f64) -> f64 {
    (jd - J2000) / DAYS_PER_JULIAN_CENTURY
}
