//! Vimshottari dasha calculations for Vedic astrology.
//!
//! Dashas are time periods ruled by planets, calculated based on the Moon's nakshatra.
//! The first mahadasha belongs to the lord of the birth nakshatra and only its
//! untraversed fraction remains at birth; every later period runs in full.
//! Each period divides into nine sub-periods in the same proportions, starting
//! with its own lord.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::ephemeris::types::{ChartSnapshot, Graha};
use crate::error::{JyotishError, Result};
use crate::vedic::nakshatra::resolve_nakshatra;

pub const VIMSHOTTARI_TOTAL_YEARS: f64 = 120.0;
/// Dasha years are fixed-length years of 365.25 days.
pub const VIMSHOTTARI_YEAR_DAYS: f64 = 365.25;
const MILLIS_PER_DAY: f64 = 86_400_000.0;
// About 30ms; absorbs float noise when comparing against the 120-year mark.
const YEAR_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashaLevel {
    Mahadasha,
    #[default]
    Antardasha,
    Pratyantardasha,
}

impl DashaLevel {
    pub fn child_level(self) -> Option<DashaLevel> {
        match self {
            DashaLevel::Mahadasha => Some(DashaLevel::Antardasha),
            DashaLevel::Antardasha => Some(DashaLevel::Pratyantardasha),
            DashaLevel::Pratyantardasha => None,
        }
    }
}

/// What happens to the period that crosses the 120-year mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleBoundary {
    /// Keep appending whole periods while the running total is below 120 years.
    /// With a partially elapsed birth nakshatra this yields ten periods and the
    /// birth lord appears again at the end.
    #[default]
    CompletePeriods,
    /// Cut the crossing period so the timeline spans exactly 120 years.
    Truncate,
}

type PlanetYears = (Graha, f64);

pub const VIMSHOTTARI_SEQUENCE: [PlanetYears; 9] = [
    (Graha::Ketu, 7.0),
    (Graha::Venus, 20.0),
    (Graha::Sun, 6.0),
    (Graha::Moon, 10.0),
    (Graha::Mars, 7.0),
    (Graha::Rahu, 18.0),
    (Graha::Jupiter, 16.0),
    (Graha::Saturn, 19.0),
    (Graha::Mercury, 17.0),
];

/// Position of a graha in the Vimshottari cycle.
pub fn sequence_index(graha: Graha) -> usize {
    match graha {
        Graha::Ketu => 0,
        Graha::Venus => 1,
        Graha::Sun => 2,
        Graha::Moon => 3,
        Graha::Mars => 4,
        Graha::Rahu => 5,
        Graha::Jupiter => 6,
        Graha::Saturn => 7,
        Graha::Mercury => 8,
    }
}

fn cycle_entry(index: usize) -> PlanetYears {
    VIMSHOTTARI_SEQUENCE[index % VIMSHOTTARI_SEQUENCE.len()]
}

/// Nominal mahadasha length of a graha, in years.
pub fn vimshottari_years(graha: Graha) -> f64 {
    VIMSHOTTARI_SEQUENCE[sequence_index(graha)].1
}

pub fn years_to_duration(years: f64) -> Duration {
    Duration::milliseconds((years * VIMSHOTTARI_YEAR_DAYS * MILLIS_PER_DAY).round() as i64)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashaSettings {
    /// Deepest level materialized when the timeline is built
    pub depth: DashaLevel,
    pub cycle_boundary: CycleBoundary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashaPeriod {
    pub body: Graha,
    pub level: DashaLevel,
    #[serde(rename = "startDate")]
    pub start: DateTime<Utc>,
    #[serde(rename = "endDate")]
    pub end: DateTime<Utc>,
    /// Length in dasha years (the remaining fraction for the birth mahadasha)
    pub years: f64,
    #[serde(rename = "subPeriods", default, skip_serializing_if = "Vec::is_empty")]
    pub sub_periods: Vec<DashaPeriod>,
}

impl DashaPeriod {
    /// Half-open containment: `start <= at < end`.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }

    pub fn overlaps(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> bool {
        self.start < to && self.end > from
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Build the nine sub-periods of this period, regardless of what is
    /// already stored in `sub_periods`. Empty for pratyantardashas.
    pub fn build_sub_periods(&self) -> Vec<DashaPeriod> {
        match self.level.child_level() {
            Some(level) => build_children(self, level),
            None => Vec::new(),
        }
    }

    /// Stored sub-periods, or freshly built ones when the timeline was
    /// materialized at a shallower depth.
    pub fn sub_periods_or_build(&self) -> Vec<DashaPeriod> {
        if self.sub_periods.is_empty() {
            self.build_sub_periods()
        } else {
            self.sub_periods.clone()
        }
    }

    /// Copy of this period without nested levels.
    pub fn summary(&self) -> DashaPeriod {
        DashaPeriod {
            sub_periods: Vec::new(),
            ..self.clone()
        }
    }
}

fn build_children(parent: &DashaPeriod, level: DashaLevel) -> Vec<DashaPeriod> {
    let start_index = sequence_index(parent.body);
    let mut children = Vec::with_capacity(VIMSHOTTARI_SEQUENCE.len());
    let mut cumulative_years = 0.0;
    let mut child_start = parent.start;

    for offset in 0..VIMSHOTTARI_SEQUENCE.len() {
        let (body, nominal) = cycle_entry(start_index + offset);
        let years = parent.years * nominal / VIMSHOTTARI_TOTAL_YEARS;
        cumulative_years += years;
        // The last child closes exactly on the parent's boundary.
        let child_end = if offset + 1 == VIMSHOTTARI_SEQUENCE.len() {
            parent.end
        } else {
            parent
                .start
                .checked_add_signed(years_to_duration(cumulative_years))
                .map_or(parent.end, |end| end.min(parent.end))
        };
        children.push(DashaPeriod {
            body,
            level,
            start: child_start,
            end: child_end,
            years,
            sub_periods: Vec::new(),
        });
        child_start = child_end;
    }
    children
}

fn populate(period: &mut DashaPeriod, depth: DashaLevel) {
    if period.level >= depth {
        return;
    }
    period.sub_periods = period.build_sub_periods();
    for child in &mut period.sub_periods {
        populate(child, depth);
    }
}

/// Mahadasha lords and lengths in years, starting with the birth lord.
fn mahadasha_spans(lord: Graha, progress: f64, boundary: CycleBoundary) -> Vec<PlanetYears> {
    let start_index = sequence_index(lord);
    let first_years = vimshottari_years(lord) * (1.0 - progress);
    let mut spans = vec![(lord, first_years)];
    let mut total = first_years;

    let mut offset = 1;
    while total < VIMSHOTTARI_TOTAL_YEARS - YEAR_EPSILON {
        let (body, nominal) = cycle_entry(start_index + offset);
        let years = match boundary {
            CycleBoundary::CompletePeriods => nominal,
            CycleBoundary::Truncate => nominal.min(VIMSHOTTARI_TOTAL_YEARS - total),
        };
        spans.push((body, years));
        total += years;
        offset += 1;
    }
    spans
}

/// A computed Vimshottari timeline anchored at birth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashaTimeline {
    #[serde(rename = "birthDateTime")]
    pub birth: DateTime<Utc>,
    #[serde(rename = "moonLongitude")]
    pub moon_longitude: f64,
    #[serde(rename = "cycleBoundary")]
    pub cycle_boundary: CycleBoundary,
    pub depth: DashaLevel,
    pub periods: Vec<DashaPeriod>,
}

/// Compute Vimshottari dasha periods based on the Moon's sidereal longitude.
pub fn compute_vimshottari_dasha(
    birth_datetime: DateTime<Utc>,
    moon_longitude: f64,
    settings: &DashaSettings,
) -> Result<DashaTimeline> {
    let moon = resolve_nakshatra(moon_longitude)?;
    let spans = mahadasha_spans(moon.lord, moon.progress, settings.cycle_boundary);

    let mut periods = Vec::with_capacity(spans.len());
    let mut cumulative_years = 0.0;
    let mut start = birth_datetime;
    for (body, years) in spans {
        cumulative_years += years;
        let end = birth_datetime
            .checked_add_signed(years_to_duration(cumulative_years))
            .ok_or_else(|| JyotishError::InvalidBirthTime {
                reason: format!(
                    "{birth_datetime} plus {cumulative_years:.2} dasha years is out of range"
                ),
            })?;
        let mut period = DashaPeriod {
            body,
            level: DashaLevel::Mahadasha,
            start,
            end,
            years,
            sub_periods: Vec::new(),
        };
        populate(&mut period, settings.depth);
        periods.push(period);
        start = end;
    }

    log::debug!(
        "vimshottari: moon {:.4} in {} (lord {}, progress {:.4}), \
         {} mahadashas over {:.4} years, {:?}",
        moon_longitude,
        moon.record().name,
        moon.lord,
        moon.progress,
        periods.len(),
        cumulative_years,
        settings.cycle_boundary
    );

    Ok(DashaTimeline {
        birth: birth_datetime,
        moon_longitude,
        cycle_boundary: settings.cycle_boundary,
        depth: settings.depth,
        periods,
    })
}

/// Maha, antar and pratyantar periods active at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentDashaInfo {
    pub maha: DashaPeriod,
    pub antar: DashaPeriod,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub pratyantar: Option<DashaPeriod>,
}

/// Find the period containing `at`. When `closes_timeline` is set, the final
/// period's end instant also resolves to it.
fn locate(
    periods: &[DashaPeriod],
    at: DateTime<Utc>,
    closes_timeline: bool,
) -> Option<&DashaPeriod> {
    periods
        .iter()
        .find(|p| p.contains(at))
        .or_else(|| periods.last().filter(|last| closes_timeline && last.end == at))
}

fn is_last(periods: &[DashaPeriod], period: &DashaPeriod) -> bool {
    periods.last().map_or(false, |last| std::ptr::eq(last, period))
}

/// The mahadasha containing `at`, or `None` outside the timeline.
pub fn current_maha(periods: &[DashaPeriod], at: DateTime<Utc>) -> Option<&DashaPeriod> {
    locate(periods, at, true)
}

/// The antardasha containing `at`, built on demand if the timeline is shallow.
pub fn current_antar(periods: &[DashaPeriod], at: DateTime<Utc>) -> Option<DashaPeriod> {
    let maha = current_maha(periods, at)?;
    let antars = maha.sub_periods_or_build();
    locate(&antars, at, is_last(periods, maha)).cloned()
}

pub fn current_dasha_info(
    periods: &[DashaPeriod],
    at: DateTime<Utc>,
) -> Option<CurrentDashaInfo> {
    let maha = current_maha(periods, at)?;
    let closes_timeline = is_last(periods, maha);
    let antars = maha.sub_periods_or_build();
    let antar = locate(&antars, at, closes_timeline)?;
    let pratyantars = antar.sub_periods_or_build();
    let pratyantar = locate(&pratyantars, at, closes_timeline && is_last(&antars, antar));

    Some(CurrentDashaInfo {
        maha: maha.summary(),
        antar: antar.summary(),
        pratyantar: pratyantar.map(DashaPeriod::summary),
    })
}

impl DashaTimeline {
    /// Build the timeline from a chart's Moon.
    pub fn from_chart(chart: &ChartSnapshot, settings: &DashaSettings) -> Result<Self> {
        let moon = chart.require(Graha::Moon)?;
        compute_vimshottari_dasha(chart.instant, moon.sidereal_longitude, settings)
    }

    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.periods.first().map(|p| p.start)
    }

    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.periods.last().map(|p| p.end)
    }

    pub fn total_years(&self) -> f64 {
        self.periods.iter().map(|p| p.years).sum()
    }

    pub fn current_maha(&self, at: DateTime<Utc>) -> Option<&DashaPeriod> {
        current_maha(&self.periods, at)
    }

    pub fn current_antar(&self, at: DateTime<Utc>) -> Option<DashaPeriod> {
        current_antar(&self.periods, at)
    }

    pub fn current_dasha_info(&self, at: DateTime<Utc>) -> Option<CurrentDashaInfo> {
        current_dasha_info(&self.periods, at)
    }

    /// Mahadashas intersecting `[from, to)`, each carrying only the
    /// antardashas that also intersect the window.
    pub fn periods_overlapping(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Vec<DashaPeriod> {
        self.periods
            .iter()
            .filter(|maha| maha.overlaps(from, to))
            .map(|maha| DashaPeriod {
                sub_periods: maha
                    .sub_periods_or_build()
                    .into_iter()
                    .filter(|antar| antar.overlaps(from, to))
                    .map(|antar| antar.summary())
                    .collect(),
                ..maha.summary()
            })
            .collect()
    }

    /// [`DashaTimeline::periods_overlapping`] for one calendar year in UTC.
    pub fn periods_in_year(&self, year: i32) -> Vec<DashaPeriod> {
        let from = Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).single();
        let to = year
            .checked_add(1)
            .and_then(|next| Utc.with_ymd_and_hms(next, 1, 1, 0, 0, 0).single());
        match (from, to) {
            (Some(from), Some(to)) => self.periods_overlapping(from, to),
            _ => Vec::new(),
        }
    }

    /// Up to `count` mahadashas that had ended by `at`, oldest first.
    pub fn previous_mahas(&self, at: DateTime<Utc>, count: usize) -> Vec<&DashaPeriod> {
        let ended: Vec<&DashaPeriod> =
            self.periods.iter().filter(|p| p.end <= at).collect();
        let skip = ended.len().saturating_sub(count);
        ended.into_iter().skip(skip).collect()
    }
}
