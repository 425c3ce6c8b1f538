use serde::{Deserialize, Serialize};

use crate::ephemeris::time::J2000;
use crate::vedic::nakshatra::normalize_degrees;

/// Lahiri value at J2000, in degrees.
pub const LAHIRI_AT_J2000: f64 = 23.85;
/// Precession rate in arcseconds per year.
pub const LAHIRI_RATE_ARCSEC_PER_YEAR: f64 = 50.29;

/// Sidereal zodiac offset system. Only Lahiri is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ayanamsa {
    #[default]
    Lahiri,
}

impl Ayanamsa {
    /// Offset between the tropical and sidereal zodiacs at `jd`, in degrees.
    pub fn degrees(self, jd: f64) -> f64 {
        match self {
            Ayanamsa::Lahiri => {
                let years = (jd - J2000) / 365.25;
                LAHIRI_AT_J2000 + LAHIRI_RATE_ARCSEC_PER_YEAR / 3600.0 * years
            }
        }
    }
}

pub fn ayanamsa_deg(system: Ayanamsa, jd: f64) -> f64 {
    system.degrees(jd)
}

/// Subtract the ayanamsa and normalize into [0, 360).
pub fn to_sidereal(tropical: f64, ayanamsa: f64) -> f64 {
    normalize_degrees(tropical - ayanamsa)
}
