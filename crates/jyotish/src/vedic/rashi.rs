//! The twelve sidereal signs (rashis) and their lords.

use serde::Serialize;

use crate::ephemeris::types::Graha;
use crate::error::Result;
use crate::vedic::nakshatra::checked_longitude;

pub const SIGN_COUNT: usize = 12;
pub const SIGN_SPAN: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rashi {
    pub index: usize,
    pub name: &'static str,
    #[serde(rename = "westernName")]
    pub western_name: &'static str,
    pub lord: Graha,
}

const fn rashi(index: usize, name: &'static str, western_name: &'static str, lord: Graha) -> Rashi {
    Rashi {
        index,
        name,
        western_name,
        lord,
    }
}

pub const RASHIS: [Rashi; SIGN_COUNT] = [
    rashi(0, "Mesha", "Aries", Graha::Mars),
    rashi(1, "Vrishabha", "Taurus", Graha::Venus),
    rashi(2, "Mithuna", "Gemini", Graha::Mercury),
    rashi(3, "Karka", "Cancer", Graha::Moon),
    rashi(4, "Simha", "Leo", Graha::Sun),
    rashi(5, "Kanya", "Virgo", Graha::Mercury),
    rashi(6, "Tula", "Libra", Graha::Venus),
    rashi(7, "Vrishchika", "Scorpio", Graha::Mars),
    rashi(8, "Dhanu", "Sagittarius", Graha::Jupiter),
    rashi(9, "Makara", "Capricorn", Graha::Saturn),
    rashi(10, "Kumbha", "Aquarius", Graha::Saturn),
    rashi(11, "Meena", "Pisces", Graha::Jupiter),
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SignPlacement {
    pub index: usize,
    /// Degrees past the start of the sign, in [0, 30)
    #[serde(rename = "degreeInSign")]
    pub degree_in_sign: f64,
}

impl SignPlacement {
    pub fn rashi(&self) -> &'static Rashi {
        &RASHIS[self.index]
    }
}

/// Resolve the sign of a sidereal longitude.
pub fn resolve_sign(longitude: f64) -> Result<SignPlacement> {
    let lon = checked_longitude(longitude)?;
    let index = ((lon / SIGN_SPAN).floor() as usize).min(SIGN_COUNT - 1);
    Ok(SignPlacement {
        index,
        degree_in_sign: (lon - index as f64 * SIGN_SPAN).max(0.0),
    })
}
