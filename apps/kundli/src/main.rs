mod input;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use jyotish::ephemeris::{ChartCalculator, ChartSnapshot};
use jyotish::vedic::{
    CurrentDashaInfo, CycleBoundary, DashaLevel, DashaPeriod, DashaTimeline, KundliSummary,
};
use serde::Serialize;
use std::path::PathBuf;

use crate::input::{parse_instant, BirthArgs};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Depth {
    Maha,
    Antar,
    Pratyantar,
}

impl From<Depth> for DashaLevel {
    fn from(depth: Depth) -> Self {
        match depth {
            Depth::Maha => DashaLevel::Mahadasha,
            Depth::Antar => DashaLevel::Antardasha,
            Depth::Pratyantar => DashaLevel::Pratyantardasha,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Boundary {
    /// Keep whole periods past the 120-year mark.
    Complete,
    /// Cut the timeline at exactly 120 years.
    Truncate,
}

impl From<Boundary> for CycleBoundary {
    fn from(boundary: Boundary) -> Self {
        match boundary {
            Boundary::Complete => CycleBoundary::CompletePeriods,
            Boundary::Truncate => CycleBoundary::Truncate,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Settings file (default: configs/jyotish.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sidereal chart: ascendant and the nine grahas.
    Chart {
        #[command(flatten)]
        birth: BirthArgs,

        /// Append the flat kundli summary (1-based ids, names, lords).
        #[arg(long)]
        summary: bool,
    },
    /// Vimshottari dasha timeline.
    Dasha {
        #[command(flatten)]
        birth: BirthArgs,

        /// Deepest level to include (overrides the config file).
        #[arg(long, value_enum)]
        depth: Option<Depth>,

        /// Treatment of the 120-year mark (overrides the config file).
        #[arg(long, value_enum)]
        cycle_boundary: Option<Boundary>,

        /// Only the periods running during this calendar year.
        #[arg(long, conflicts_with = "previous")]
        year: Option<i32>,

        /// Only the last N mahadashas that have already ended.
        #[arg(long)]
        previous: Option<usize>,
    },
    /// Maha, antar and pratyantar dasha running at an instant.
    Current {
        #[command(flatten)]
        birth: BirthArgs,

        /// Instant to query in RFC 3339 (default: now).
        #[arg(long)]
        at: Option<String>,
    },
}

#[derive(Serialize)]
struct ChartReport<'a> {
    chart: &'a ChartSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<KundliSummary>,
}

#[derive(Serialize)]
struct YearReport {
    year: i32,
    periods: Vec<DashaPeriod>,
}

#[derive(Serialize)]
struct PreviousReport<'a> {
    #[serde(rename = "asOf")]
    as_of: DateTime<Utc>,
    periods: Vec<&'a DashaPeriod>,
}

#[derive(Serialize)]
struct CurrentReport {
    at: DateTime<Utc>,
    current: Option<CurrentDashaInfo>,
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let settings = jyotish_config::load_settings(args.config.as_deref())?;
    log::debug!("settings: {:?}", settings);

    let now = Utc::now();
    let calculator = ChartCalculator::new(settings.chart.clone())?;

    match args.command {
        Command::Chart { birth, summary } => {
            let birth = birth.resolve(now)?;
            let chart = calculator.calc_chart(birth.instant, birth.location)?;
            let summary = if summary {
                Some(KundliSummary::from_chart(&chart)?)
            } else {
                None
            };
            print_json(&ChartReport {
                chart: &chart,
                summary,
            })
        }
        Command::Dasha {
            birth,
            depth,
            cycle_boundary,
            year,
            previous,
        } => {
            let birth = birth.resolve(now)?;
            let mut dasha_settings = settings.dasha;
            if let Some(depth) = depth {
                dasha_settings.depth = depth.into();
            }
            if let Some(boundary) = cycle_boundary {
                dasha_settings.cycle_boundary = boundary.into();
            }

            let chart = calculator.calc_chart(birth.instant, birth.location)?;
            let timeline = DashaTimeline::from_chart(&chart, &dasha_settings)?;
            match (year, previous) {
                (Some(year), _) => print_json(&YearReport {
                    year,
                    periods: timeline.periods_in_year(year),
                }),
                (None, Some(count)) => print_json(&PreviousReport {
                    as_of: now,
                    periods: timeline.previous_mahas(now, count),
                }),
                (None, None) => print_json(&timeline),
            }
        }
        Command::Current { birth, at } => {
            let birth = birth.resolve(now)?;
            let at = match at {
                Some(text) => parse_instant(&text)?,
                None => now,
            };
            let chart = calculator.calc_chart(birth.instant, birth.location)?;
            let timeline = DashaTimeline::from_chart(&chart, &settings.dasha)?;
            let current = timeline.current_dasha_info(at);
            if current.is_none() {
                log::warn!("No dasha period contains {at}");
            }
            print_json(&CurrentReport { at, current })
        }
    }
}
