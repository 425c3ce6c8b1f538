//! Ascendant (lagna) from sidereal time and the mean obliquity.

use crate::ephemeris::ayanamsa::{to_sidereal, Ayanamsa};
use crate::ephemeris::time::{J2000, DAYS_PER_JULIAN_CENTURY};
use crate::vedic::nakshatra::normalize_degrees;

/// Greenwich mean sidereal time in degrees (IAU 1982).
pub fn greenwich_mean_sidereal_time(jd: f64) -> f64 {
    let days = jd - J2000;
    let t = days / DAYS_PER_JULIAN_CENTURY;
    normalize_degrees(
        280.460_618_37 + 360.985_647_366_29 * days + 0.000_387_933 * t * t
            - t * t * t / 38_710_000.0,
    )
}

/// Mean obliquity of the ecliptic in degrees.
pub fn mean_obliquity(jd: f64) -> f64 {
    let t = (jd - J2000) / DAYS_PER_JULIAN_CENTURY;
    23.439_291 - 0.013_004_2 * t
}

/// Tropical ascendant for an observer at `lat`/`lon` (degrees, east positive).
pub fn tropical_ascendant(jd: f64, lat: f64, lon: f64) -> f64 {
    let lst = normalize_degrees(greenwich_mean_sidereal_time(jd) + lon).to_radians();
    let obliquity = mean_obliquity(jd).to_radians();
    let phi = lat.to_radians();

    let y = lst.cos();
    let x = -(lst.sin() * obliquity.cos() + phi.tan() * obliquity.sin());
    normalize_degrees(y.atan2(x).to_degrees())
}

pub fn sidereal_ascendant(jd: f64, lat: f64, lon: f64, system: Ayanamsa) -> f64 {
    to_sidereal(tropical_ascendant(jd, lat, lon), system.degrees(jd))
}
