pub mod dashas;
pub mod nakshatra;
pub mod rashi;
pub mod types;

pub use dashas::{
    compute_vimshottari_dasha, current_antar, current_dasha_info, current_maha, CurrentDashaInfo,
    CycleBoundary, DashaLevel, DashaPeriod, DashaSettings, DashaTimeline,
};
pub use nakshatra::{normalize_degrees, resolve_nakshatra, NakshatraPlacement, NakshatraRecord};
pub use rashi::{resolve_sign, Rashi, SignPlacement, RASHIS};
pub use types::KundliSummary;
