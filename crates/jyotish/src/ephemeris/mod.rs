pub mod ascendant;
pub mod ayanamsa;
pub mod bodies;
pub mod calculator;
pub mod time;
pub mod types;

pub use ascendant::{sidereal_ascendant, tropical_ascendant};
pub use ayanamsa::{ayanamsa_deg, to_sidereal, Ayanamsa};
pub use bodies::tropical_longitude;
pub use calculator::{is_retrograde, ChartCalculator};
pub use time::{julian_day, julian_day_from_calendar, J2000};
pub use types::{Ascendant, BodyPosition, ChartSettings, ChartSnapshot, GeoLocation, Graha};
