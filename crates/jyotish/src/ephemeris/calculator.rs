use chrono::{DateTime, Utc};

use crate::ephemeris::ascendant::tropical_ascendant;
use crate::ephemeris::ayanamsa::to_sidereal;
use crate::ephemeris::bodies::tropical_longitude;
use crate::ephemeris::time::julian_day;
use crate::ephemeris::types::{
    Ascendant, BodyPosition, ChartSettings, ChartSnapshot, GeoLocation, Graha,
};
use crate::error::Result;
use crate::vedic::nakshatra::{normalize_degrees, resolve_nakshatra};
use crate::vedic::rashi::resolve_sign;

/// Sidereal chart calculator backed by the closed-form theories in
/// [`crate::ephemeris::bodies`]. Holds no state beyond its settings, so one
/// instance can serve any number of threads.
#[derive(Debug, Clone, Default)]
pub struct ChartCalculator {
    settings: ChartSettings,
}

impl ChartCalculator {
    pub fn new(settings: ChartSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    /// Calculate the ascendant and all nine bodies for one instant and place.
    pub fn calc_chart(
        &self,
        dt_utc: DateTime<Utc>,
        location: GeoLocation,
    ) -> Result<ChartSnapshot> {
        location.validate()?;
        let jd = julian_day(dt_utc);
        let ayanamsa = self.settings.ayanamsa.degrees(jd);
        log::debug!(
            "calc_chart: {} jd={:.6} ayanamsa={:.6} lat={} lon={}",
            dt_utc,
            jd,
            ayanamsa,
            location.lat,
            location.lon
        );

        let ascendant = self.calc_ascendant(jd, location, ayanamsa)?;
        let bodies = Graha::ALL
            .iter()
            .map(|&graha| self.calc_body_position(graha, jd, ayanamsa))
            .collect::<Result<Vec<_>>>()?;

        Ok(ChartSnapshot {
            instant: dt_utc,
            location,
            julian_day: jd,
            ayanamsa,
            ascendant,
            bodies,
        })
    }

    /// Calculate the sidereal placement of a single body
    pub fn calc_body_position(&self, graha: Graha, jd: f64, ayanamsa: f64) -> Result<BodyPosition> {
        let tropical = tropical_longitude(graha, jd);
        let sidereal = to_sidereal(tropical, ayanamsa);
        let sign = resolve_sign(sidereal)?;
        let nakshatra = resolve_nakshatra(sidereal)?;
        let is_retrograde = is_retrograde(graha, jd, self.settings.retrograde_step_days);
        log::trace!(
            "{graha}: tropical={tropical:.4} sidereal={sidereal:.4} retrograde={is_retrograde}"
        );

        Ok(BodyPosition {
            body: graha,
            tropical_longitude: tropical,
            sidereal_longitude: sidereal,
            sign_index: sign.index,
            degree_in_sign: sign.degree_in_sign,
            nakshatra_index: nakshatra.index,
            pada: nakshatra.pada,
            nakshatra_progress: nakshatra.progress,
            is_retrograde,
        })
    }

    pub fn calc_ascendant(
        &self,
        jd: f64,
        location: GeoLocation,
        ayanamsa: f64,
    ) -> Result<Ascendant> {
        let tropical = tropical_ascendant(jd, location.lat, location.lon);
        let sidereal = to_sidereal(tropical, ayanamsa);
        let sign = resolve_sign(sidereal)?;
        let nakshatra = resolve_nakshatra(sidereal)?;
        Ok(Ascendant {
            longitude: sidereal,
            tropical_longitude: tropical,
            sign_index: sign.index,
            degree_in_sign: sign.degree_in_sign,
            nakshatra_index: nakshatra.index,
            pada: nakshatra.pada,
        })
    }
}

/// Shortest signed arc from `from` to `to`, in (-180, 180].
pub fn signed_arc(from: f64, to: f64) -> f64 {
    let diff = normalize_degrees(to - from);
    if diff > 180.0 {
        diff - 360.0
    } else {
        diff
    }
}

/// True when the body's longitude decreases over the next `step_days`.
/// The mean nodes always move backward.
pub fn is_retrograde(graha: Graha, jd: f64, step_days: f64) -> bool {
    if graha.is_node() {
        return true;
    }
    let now = tropical_longitude(graha, jd);
    let later = tropical_longitude(graha, jd + step_days);
    signed_arc(now, later) < 0.0
}
