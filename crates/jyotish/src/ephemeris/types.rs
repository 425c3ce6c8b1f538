use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ephemeris::ayanamsa::Ayanamsa;
use crate::error::{JyotishError, Result};

/// Geographic location coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude in degrees, north positive
    pub lat: f64,
    /// Longitude in degrees, east positive
    pub lon: f64,
}

impl GeoLocation {
    /// Build a location, rejecting coordinates outside the valid ranges.
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        let location = Self { lat, lon };
        location.validate()?;
        Ok(location)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(JyotishError::InvalidLocation {
                field: "latitude",
                value: self.lat,
                expected: "-90 to 90 degrees",
            });
        }
        if !self.lon.is_finite() || !(-180.0..=180.0).contains(&self.lon) {
            return Err(JyotishError::InvalidLocation {
                field: "longitude",
                value: self.lon,
                expected: "-180 to 180 degrees",
            });
        }
        Ok(())
    }
}

/// The nine bodies of a Vedic chart.
///
/// Rahu is the mean ascending lunar node; Ketu sits exactly opposite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Graha {
    Sun,
    Moon,
    Mars,
    Mercury,
    Jupiter,
    Venus,
    Saturn,
    Rahu,
    Ketu,
}

impl Graha {
    /// Chart order used for every serialized body list.
    pub const ALL: [Graha; 9] = [
        Graha::Sun,
        Graha::Moon,
        Graha::Mars,
        Graha::Mercury,
        Graha::Jupiter,
        Graha::Venus,
        Graha::Saturn,
        Graha::Rahu,
        Graha::Ketu,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Graha::Sun => "Sun",
            Graha::Moon => "Moon",
            Graha::Mars => "Mars",
            Graha::Mercury => "Mercury",
            Graha::Jupiter => "Jupiter",
            Graha::Venus => "Venus",
            Graha::Saturn => "Saturn",
            Graha::Rahu => "Rahu",
            Graha::Ketu => "Ketu",
        }
    }

    /// Numeric body id used by kundli summary consumers.
    pub fn id(self) -> u32 {
        match self {
            Graha::Sun => 0,
            Graha::Moon => 1,
            Graha::Mars => 2,
            Graha::Mercury => 3,
            Graha::Jupiter => 4,
            Graha::Venus => 5,
            Graha::Saturn => 6,
            Graha::Rahu => 101,
            Graha::Ketu => 102,
        }
    }

    pub fn is_node(self) -> bool {
        matches!(self, Graha::Rahu | Graha::Ketu)
    }
}

impl std::fmt::Display for Graha {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Sidereal placement of one body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    pub body: Graha,
    #[serde(rename = "tropicalLongitude")]
    pub tropical_longitude: f64,
    #[serde(rename = "siderealLongitude")]
    pub sidereal_longitude: f64,
    #[serde(rename = "signIndex")]
    pub sign_index: usize,
    #[serde(rename = "degreeInSign")]
    pub degree_in_sign: f64,
    #[serde(rename = "nakshatraIndex")]
    pub nakshatra_index: usize,
    /// 1..=4
    pub pada: u8,
    /// Fraction of the nakshatra already traversed, in [0, 1)
    #[serde(rename = "nakshatraProgress")]
    pub nakshatra_progress: f64,
    #[serde(rename = "isRetrograde")]
    pub is_retrograde: bool,
}

/// Rising degree of the chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ascendant {
    /// Sidereal longitude in degrees
    pub longitude: f64,
    #[serde(rename = "tropicalLongitude")]
    pub tropical_longitude: f64,
    #[serde(rename = "signIndex")]
    pub sign_index: usize,
    #[serde(rename = "degreeInSign")]
    pub degree_in_sign: f64,
    #[serde(rename = "nakshatraIndex")]
    pub nakshatra_index: usize,
    pub pada: u8,
}

/// Complete sidereal chart for one instant and place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub instant: DateTime<Utc>,
    pub location: GeoLocation,
    #[serde(rename = "julianDay")]
    pub julian_day: f64,
    pub ayanamsa: f64,
    pub ascendant: Ascendant,
    pub bodies: Vec<BodyPosition>,
}

impl ChartSnapshot {
    pub fn body(&self, graha: Graha) -> Option<&BodyPosition> {
        self.bodies.iter().find(|b| b.body == graha)
    }

    /// Like [`ChartSnapshot::body`], but a missing body is an error.
    pub fn require(&self, graha: Graha) -> Result<&BodyPosition> {
        self.body(graha)
            .ok_or(JyotishError::MissingBodyPosition { body: graha })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Settings for chart calculations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub ayanamsa: Ayanamsa,
    /// Look-ahead used to decide the direction of apparent motion
    pub retrograde_step_days: f64,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            ayanamsa: Ayanamsa::Lahiri,
            retrograde_step_days: 1.0,
        }
    }
}

impl ChartSettings {
    pub fn validate(&self) -> Result<()> {
        if !self.retrograde_step_days.is_finite() || self.retrograde_step_days <= 0.0 {
            return Err(JyotishError::InvalidSettings {
                message: format!(
                    "retrograde_step_days must be a positive number of days, got {}",
                    self.retrograde_step_days
                ),
            });
        }
        Ok(())
    }
}
