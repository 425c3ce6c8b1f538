use anyhow::Context;
use jyotish::ephemeris::{Ayanamsa, ChartSettings};
use jyotish::vedic::{CycleBoundary, DashaLevel, DashaSettings};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Relative locations tried when no explicit config path is given.
pub const CONFIG_SEARCH_PATHS: [&str; 2] =
    ["configs/jyotish.toml", "../../configs/jyotish.toml"];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JyotishSettings {
    pub chart: ChartSettings,
    pub dasha: DashaSettings,
}

#[derive(Debug, Clone, Deserialize)]
struct ChartToml {
    #[serde(default)]
    ayanamsa: Ayanamsa,
    #[serde(default = "default_retrograde_step_days")]
    retrograde_step_days: f64,
}

fn default_retrograde_step_days() -> f64 {
    1.0
}

#[derive(Debug, Clone, Default, Deserialize)]
struct DashaToml {
    #[serde(default)]
    depth: DashaLevel,
    #[serde(default)]
    cycle_boundary: CycleBoundary,
}

#[derive(Debug, Clone, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    chart: Option<ChartToml>,
    #[serde(default)]
    dasha: Option<DashaToml>,
}

/// First existing file among [`CONFIG_SEARCH_PATHS`].
pub fn find_config_path() -> Option<PathBuf> {
    CONFIG_SEARCH_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_file())
}

pub fn parse_settings(text: &str) -> anyhow::Result<JyotishSettings> {
    let root: RootConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse jyotish settings: {e}"))?;

    let chart = match root.chart {
        Some(ChartToml {
            ayanamsa,
            retrograde_step_days,
        }) => ChartSettings {
            ayanamsa,
            retrograde_step_days,
        },
        None => ChartSettings::default(),
    };
    chart.validate().context("Invalid [chart] section")?;

    let DashaToml {
        depth,
        cycle_boundary,
    } = root.dasha.unwrap_or_default();

    Ok(JyotishSettings {
        chart,
        dasha: DashaSettings {
            depth,
            cycle_boundary,
        },
    })
}

pub fn load_settings_from(path: &Path) -> anyhow::Result<JyotishSettings> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    parse_settings(&text).with_context(|| format!("Invalid config {}", path.display()))
}

/// Load settings from `path`, else from the search paths, else defaults.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<JyotishSettings> {
    match path {
        Some(path) => load_settings_from(path),
        None => match find_config_path() {
            Some(found) => load_settings_from(&found),
            None => Ok(JyotishSettings::default()),
        },
    }
}
