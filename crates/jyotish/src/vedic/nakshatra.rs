//! Nakshatra utilities for Vedic astrology.
//!
//! Nakshatras are 27 lunar mansions, each spanning 13°20' (360/27 degrees).
//! Each nakshatra is divided into 4 padas (quarters).

use serde::Serialize;

use crate::ephemeris::types::Graha;
use crate::error::{JyotishError, Result};

pub const NAKSHATRA_COUNT: usize = 27;
pub const NAKSHATRA_SEGMENT_SIZE: f64 = 360.0 / 27.0;
pub const PADA_SIZE: f64 = NAKSHATRA_SEGMENT_SIZE / 4.0;

// (slug, display_name, lord, deity, animal)
pub const NAKSHATRA_ORDER: &[(&str, &str, Graha, &str, &str)] = &[
    ("ashwini", "Ashwini", Graha::Ketu, "Ashwini Kumaras", "Horse"),
    ("bharani", "Bharani", Graha::Venus, "Yama", "Elephant"),
    ("krittika", "Krittika", Graha::Sun, "Agni", "Sheep"),
    ("rohini", "Rohini", Graha::Moon, "Brahma", "Serpent"),
    ("mrigashira", "Mrigashira", Graha::Mars, "Soma", "Serpent"),
    ("ardra", "Ardra", Graha::Rahu, "Rudra", "Dog"),
    ("punarvasu", "Punarvasu", Graha::Jupiter, "Aditi", "Cat"),
    ("pushya", "Pushya", Graha::Saturn, "Brihaspati", "Sheep"),
    ("ashlesha", "Ashlesha", Graha::Mercury, "Nagas", "Cat"),
    ("magha", "Magha", Graha::Ketu, "Pitris", "Rat"),
    ("purva_phalguni", "Purva Phalguni", Graha::Venus, "Bhaga", "Rat"),
    ("uttara_phalguni", "Uttara Phalguni", Graha::Sun, "Aryaman", "Cow"),
    ("hasta", "Hasta", Graha::Moon, "Savitar", "Buffalo"),
    ("chitra", "Chitra", Graha::Mars, "Vishvakarma", "Tiger"),
    ("swati", "Swati", Graha::Rahu, "Vayu", "Buffalo"),
    ("vishakha", "Vishakha", Graha::Jupiter, "Indra-Agni", "Tiger"),
    ("anuradha", "Anuradha", Graha::Saturn, "Mitra", "Deer"),
    ("jyeshtha", "Jyeshtha", Graha::Mercury, "Indra", "Deer"),
    ("mula", "Mula", Graha::Ketu, "Nirriti", "Dog"),
    ("purva_ashadha", "Purva Ashadha", Graha::Venus, "Apas", "Monkey"),
    ("uttara_ashadha", "Uttara Ashadha", Graha::Sun, "Vishvadevas", "Mongoose"),
    ("shravana", "Shravana", Graha::Moon, "Vishnu", "Monkey"),
    ("dhanishta", "Dhanishta", Graha::Mars, "Vasus", "Lion"),
    ("shatabhisha", "Shatabhisha", Graha::Rahu, "Varuna", "Horse"),
    ("purva_bhadrapada", "Purva Bhadrapada", Graha::Jupiter, "Aja Ekapada", "Lion"),
    ("uttara_bhadrapada", "Uttara Bhadrapada", Graha::Saturn, "Ahir Budhnya", "Cow"),
    ("revati", "Revati", Graha::Mercury, "Pushan", "Elephant"),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NakshatraRecord {
    pub id: &'static str,
    pub name: &'static str,
    pub lord: Graha,
    pub deity: &'static str,
    pub animal: &'static str,
    pub start: f64,
    pub end: f64,
    pub index: usize,
}

/// Where a longitude falls inside the nakshatra belt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NakshatraPlacement {
    pub index: usize,
    pub lord: Graha,
    /// Degrees past the start of the nakshatra
    pub offset: f64,
    /// offset / NAKSHATRA_SEGMENT_SIZE, in [0, 1)
    pub progress: f64,
    /// 1..=4
    pub pada: u8,
}

impl NakshatraPlacement {
    pub fn record(&self) -> &'static NakshatraRecord {
        &NAKSHATRA_TABLE[self.index]
    }
}

fn build_nakshatra_table() -> Vec<NakshatraRecord> {
    let mut table = Vec::with_capacity(NAKSHATRA_COUNT);
    for (idx, &(slug, display_name, lord, deity, animal)) in NAKSHATRA_ORDER.iter().enumerate() {
        let start = idx as f64 * NAKSHATRA_SEGMENT_SIZE;
        table.push(NakshatraRecord {
            id: slug,
            name: display_name,
            lord,
            deity,
            animal,
            start,
            end: start + NAKSHATRA_SEGMENT_SIZE,
            index: idx,
        });
    }
    table
}

lazy_static::lazy_static! {
    static ref NAKSHATRA_TABLE: Vec<NakshatraRecord> = build_nakshatra_table();
}

pub fn nakshatras() -> &'static [NakshatraRecord] {
    &NAKSHATRA_TABLE
}

pub fn nakshatra(index: usize) -> Option<&'static NakshatraRecord> {
    NAKSHATRA_TABLE.get(index)
}

/// Normalize degrees to [0, 360).
pub fn normalize_degrees(value: f64) -> f64 {
    let normalized = value.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Normalize and reject anything that still is not a usable angle (NaN, ±inf).
pub(crate) fn checked_longitude(longitude: f64) -> Result<f64> {
    let lon = normalize_degrees(longitude);
    if (0.0..360.0).contains(&lon) {
        Ok(lon)
    } else {
        Err(JyotishError::InvalidAngle { value: longitude })
    }
}

/// Resolve the nakshatra, pada and progress for a sidereal longitude.
pub fn resolve_nakshatra(longitude: f64) -> Result<NakshatraPlacement> {
    let lon = checked_longitude(longitude)?;
    let index = ((lon / NAKSHATRA_SEGMENT_SIZE).floor() as usize).min(NAKSHATRA_COUNT - 1);
    let entry = &NAKSHATRA_TABLE[index];

    let offset = (lon - entry.start).max(0.0);
    let progress = (offset / NAKSHATRA_SEGMENT_SIZE).min(1.0 - f64::EPSILON);
    let pada_index = ((offset / PADA_SIZE).floor() as u8).min(3);

    Ok(NakshatraPlacement {
        index,
        lord: entry.lord,
        offset,
        progress,
        pada: pada_index + 1,
    })
}
