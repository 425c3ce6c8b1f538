pub mod birth;
pub mod ephemeris;
pub mod error;
pub mod vedic;

pub use error::{JyotishError, Result};

use chrono::{DateTime, Utc};
use crate::ephemeris::{ChartCalculator, ChartSettings, ChartSnapshot, GeoLocation};
use crate::vedic::{DashaSettings, DashaTimeline};

/// Chart plus its Vimshottari timeline for one birth.
pub fn compute_kundli(
    birth: DateTime<Utc>,
    location: GeoLocation,
    chart_settings: &ChartSettings,
    dasha_settings: &DashaSettings,
) -> Result<(ChartSnapshot, DashaTimeline)> {
    let calculator = ChartCalculator::new(chart_settings.clone())?;
    let chart = calculator.calc_chart(birth, location)?;
    let timeline = DashaTimeline::from_chart(&chart, dasha_settings)?;
    Ok((chart, timeline))
}
