//! Flat kundli summary for downstream consumers.
//!
//! Ids in this projection are 1-based; everything else in the crate is 0-based.

use serde::Serialize;

use crate::ephemeris::types::{ChartSnapshot, Graha};
use crate::error::Result;
use crate::vedic::nakshatra::resolve_nakshatra;
use crate::vedic::rashi::{RASHIS, SIGN_COUNT};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LordInfo {
    pub id: u32,
    pub name: &'static str,
}

impl From<Graha> for LordInfo {
    fn from(graha: Graha) -> Self {
        Self {
            id: graha.id(),
            name: graha.name(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NakshatraInfo {
    pub id: usize,
    pub name: &'static str,
    pub pada: u8,
    pub lord: LordInfo,
    pub deity: &'static str,
    pub animal: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RashiInfo {
    pub id: usize,
    pub name: &'static str,
    #[serde(rename = "westernName")]
    pub western_name: &'static str,
    pub lord: LordInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanetRow {
    pub id: u32,
    pub name: &'static str,
    pub longitude: f64,
    #[serde(rename = "isRetrograde")]
    pub is_retrograde: bool,
    pub rasi: RashiInfo,
    pub nakshatra: NakshatraInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KundliSummary {
    #[serde(rename = "nakshatraDetails")]
    pub nakshatra: NakshatraInfo,
    #[serde(rename = "chandraRasi")]
    pub moon_sign: RashiInfo,
    #[serde(rename = "sooryaRasi")]
    pub sun_sign: RashiInfo,
    pub lagna: RashiInfo,
    pub planets: Vec<PlanetRow>,
}

fn rashi_info(index: usize) -> RashiInfo {
    let index = index % SIGN_COUNT;
    let rashi = &RASHIS[index];
    RashiInfo {
        id: index + 1,
        name: rashi.name,
        western_name: rashi.western_name,
        lord: rashi.lord.into(),
    }
}

fn nakshatra_info(longitude: f64) -> Result<NakshatraInfo> {
    let placement = resolve_nakshatra(longitude)?;
    let record = placement.record();
    Ok(NakshatraInfo {
        id: record.index + 1,
        name: record.name,
        pada: placement.pada,
        lord: record.lord.into(),
        deity: record.deity,
        animal: record.animal,
    })
}

impl KundliSummary {
    pub fn from_chart(chart: &ChartSnapshot) -> Result<Self> {
        let moon = chart.require(Graha::Moon)?;
        let sun = chart.require(Graha::Sun)?;

        let planets = chart
            .bodies
            .iter()
            .map(|body| {
                Ok(PlanetRow {
                    id: body.body.id(),
                    name: body.body.name(),
                    longitude: body.sidereal_longitude,
                    is_retrograde: body.is_retrograde,
                    rasi: rashi_info(body.sign_index),
                    nakshatra: nakshatra_info(body.sidereal_longitude)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            nakshatra: nakshatra_info(moon.sidereal_longitude)?,
            moon_sign: rashi_info(moon.sign_index),
            sun_sign: rashi_info(sun.sign_index),
            lagna: rashi_info(chart.ascendant.sign_index),
            planets,
        })
    }
}
