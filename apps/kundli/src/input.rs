use anyhow::Context;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::Args;
use jyotish::birth::{fixed_offset_to_utc, local_mean_time_to_utc, BirthDetails};
use jyotish::ephemeris::GeoLocation;

#[derive(Args, Debug, Clone)]
pub(crate) struct BirthArgs {
    /// Birth instant in RFC 3339 (e.g. 1989-04-04T21:04:00+05:30).
    #[arg(long, conflicts_with_all = ["date", "time"], required_unless_present = "date")]
    pub datetime: Option<String>,

    /// Local birth date, YYYY-MM-DD. Requires --time.
    #[arg(long, requires = "time")]
    pub date: Option<String>,

    /// Local birth time, HH:MM or HH:MM:SS. Requires --date.
    #[arg(long, requires = "date")]
    pub time: Option<String>,

    /// UTC offset in minutes for --date/--time (330 for IST). When omitted the
    /// wall clock is read as local mean time at --lon.
    #[arg(long, allow_hyphen_values = true)]
    pub utc_offset_minutes: Option<i32>,

    /// Latitude in degrees, north positive.
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// Longitude in degrees, east positive.
    #[arg(long, allow_hyphen_values = true)]
    pub lon: f64,
}

pub(crate) fn parse_instant(text: &str) -> anyhow::Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(text)
        .with_context(|| format!("Invalid RFC 3339 datetime: {text}"))?;
    Ok(parsed.with_timezone(&Utc))
}

fn parse_time(text: &str) -> anyhow::Result<NaiveTime> {
    NaiveTime::parse_from_str(text, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M:%S"))
        .with_context(|| format!("Invalid time (expected HH:MM): {text}"))
}

impl BirthArgs {
    pub(crate) fn resolve(&self, now: DateTime<Utc>) -> anyhow::Result<BirthDetails> {
        let location = GeoLocation::new(self.lat, self.lon)?;
        let instant = match (&self.datetime, &self.date, &self.time) {
            (Some(datetime), _, _) => parse_instant(datetime)?,
            (None, Some(date), Some(time)) => {
                let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
                    .with_context(|| format!("Invalid date (expected YYYY-MM-DD): {date}"))?;
                let time = parse_time(time)?;
                match self.utc_offset_minutes {
                    Some(offset) => fixed_offset_to_utc(date, time, offset)?,
                    None => local_mean_time_to_utc(date, time, self.lon)?,
                }
            }
            _ => anyhow::bail!("Provide either --datetime or both --date and --time"),
        };

        let details = BirthDetails::new(instant, location);
        details.validate(now)?;
        log::debug!("birth resolved to {} at {:?}", details.instant, details.location);
        Ok(details)
    }
}
