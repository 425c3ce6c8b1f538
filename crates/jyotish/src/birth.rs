//! Birth input helpers: wall-clock to UTC conversion and sanity checks.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::ephemeris::types::GeoLocation;
use crate::error::{JyotishError, Result};

pub const MIN_BIRTH_YEAR: i32 = 1900;

/// Treat a wall-clock reading as local mean time at `lon` (4 minutes per
/// degree, east positive) and convert it to UTC, rounded to the minute.
pub fn local_mean_time_to_utc(
    date: NaiveDate,
    time: NaiveTime,
    lon: f64,
) -> Result<DateTime<Utc>> {
    GeoLocation { lat: 0.0, lon }.validate()?;
    let offset_minutes = (lon * 4.0).round() as i64;
    let local = date.and_time(time);
    let utc = local
        .checked_sub_signed(Duration::minutes(offset_minutes))
        .ok_or_else(|| JyotishError::InvalidBirthTime {
            reason: format!("{local} at longitude {lon} is outside the supported date range"),
        })?;
    Ok(Utc.from_utc_datetime(&utc))
}

/// Convert a wall-clock reading in a fixed UTC offset (e.g. IST = +330 minutes).
pub fn fixed_offset_to_utc(
    date: NaiveDate,
    time: NaiveTime,
    offset_minutes: i32,
) -> Result<DateTime<Utc>> {
    let offset = offset_minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| JyotishError::InvalidBirthTime {
            reason: format!("UTC offset of {offset_minutes} minutes is out of range"),
        })?;
    offset
        .from_local_datetime(&date.and_time(time))
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| JyotishError::InvalidBirthTime {
            reason: format!("{date} {time} does not exist at offset {offset}"),
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BirthDetails {
    pub instant: DateTime<Utc>,
    pub location: GeoLocation,
}

impl BirthDetails {
    pub fn new(instant: DateTime<Utc>, location: GeoLocation) -> Self {
        Self { instant, location }
    }

    /// Reject births before 1900 or after `now`, and out-of-range coordinates.
    pub fn validate(&self, now: DateTime<Utc>) -> Result<()> {
        self.location.validate()?;
        let earliest = Utc
            .with_ymd_and_hms(MIN_BIRTH_YEAR, 1, 1, 0, 0, 0)
            .single()
            .ok_or_else(|| JyotishError::InvalidBirthTime {
                reason: "cannot build the earliest supported date".to_string(),
            })?;
        if self.instant < earliest {
            return Err(JyotishError::InvalidBirthTime {
                reason: format!("{} is before {MIN_BIRTH_YEAR}", self.instant),
            });
        }
        if self.instant > now {
            return Err(JyotishError::InvalidBirthTime {
                reason: format!("{} is in the future", self.instant),
            });
        }
        Ok(())
    }
}
