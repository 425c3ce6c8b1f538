use chrono::{DateTime, Duration, TimeZone, Utc};
use jyotish::ephemeris::{ChartCalculator, GeoLocation, Graha};
use jyotish::vedic::dashas::*;
use jyotish::vedic::nakshatra::NAKSHATRA_SEGMENT_SIZE;
use jyotish::JyotishError;

fn birth() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(1985, 7, 12, 6, 30, 0).unwrap()
}

fn deep() -> DashaSettings {
    DashaSettings {
        depth: DashaLevel::Pratyantardasha,
        cycle_boundary: CycleBoundary::CompletePeriods,
    }
}

fn assert_contiguous(periods: &[DashaPeriod]) {
    for pair in periods.windows(2) {
        assert_eq!(pair[0].end, pair[1].start, "{:?} -> {:?}", pair[0].body, pair[1].body);
    }
    for period in periods {
        assert!(period.start <= period.end);
    }
}

fn assert_children_fill_parent(parent: &DashaPeriod) {
    if parent.sub_periods.is_empty() {
        return;
    }
    assert_eq!(parent.sub_periods.len(), 9);
    assert_eq!(parent.sub_periods[0].body, parent.body);
    assert_eq!(parent.sub_periods.first().unwrap().start, parent.start);
    assert_eq!(parent.sub_periods.last().unwrap().end, parent.end);
    assert_contiguous(&parent.sub_periods);

    let years: f64 = parent.sub_periods.iter().map(|c| c.years).sum();
    assert!((years - parent.years).abs() < 1e-6);

    let duration = parent
        .sub_periods
        .iter()
        .fold(Duration::zero(), |acc, c| acc + c.duration());
    assert_eq!(duration, parent.duration());

    for child in &parent.sub_periods {
        assert_children_fill_parent(child);
    }
}

#[test]
fn test_moon_at_zero_starts_with_full_ketu() {
    let timeline = compute_vimshottari_dasha(birth(), 0.0, &DashaSettings::default()).unwrap();
    let first = &timeline.periods[0];
    assert_eq!(first.body, Graha::Ketu);
    assert_eq!(first.start, birth());
    assert_eq!(first.end, birth() + Duration::milliseconds(7 * 36_525 * 86_400_000 / 100));
    assert_eq!(timeline.periods[1].body, Graha::Venus);
    assert_eq!(timeline.periods[1].years, 20.0);
    assert_eq!(timeline.periods.len(), 9);
}

#[test]
fn test_moon_mid_ashwini_leaves_half_of_ketu() {
    let lon = NAKSHATRA_SEGMENT_SIZE / 2.0;
    let timeline = compute_vimshottari_dasha(birth(), lon, &DashaSettings::default()).unwrap();
    let first = &timeline.periods[0];
    assert_eq!(first.body, Graha::Ketu);
    assert!((first.years - 3.5).abs() < 1e-9);
    assert_eq!(first.duration(), years_to_duration(3.5));
}

#[test]
fn test_lord_follows_moon_nakshatra() {
    // Rohini (Moon), Magha (Ketu), Revati (Mercury)
    for (lon, lord) in [(45.0, Graha::Moon), (121.0, Graha::Ketu), (350.0, Graha::Mercury)] {
        let timeline = compute_vimshottari_dasha(birth(), lon, &DashaSettings::default()).unwrap();
        assert_eq!(timeline.periods[0].body, lord);
        assert_eq!(timeline.periods[0].start, birth());
    }
}

#[test]
fn test_structure_holds_at_every_level() {
    for lon in [0.0, 7.3, 40.0, 101.25, 199.99, 280.0, 359.9] {
        let timeline = compute_vimshottari_dasha(birth(), lon, &deep()).unwrap();
        assert_contiguous(&timeline.periods);
        for maha in &timeline.periods {
            assert_eq!(maha.level, DashaLevel::Mahadasha);
            assert_children_fill_parent(maha);
        }
    }
}

#[test]
fn test_full_mahas_follow_cycle_order() {
    let timeline = compute_vimshottari_dasha(birth(), 200.0, &DashaSettings::default()).unwrap();
    let start = sequence_index(timeline.periods[0].body);
    for (offset, maha) in timeline.periods.iter().enumerate() {
        let (graha, years) = VIMSHOTTARI_SEQUENCE[(start + offset) % 9];
        assert_eq!(maha.body, graha);
        if offset > 0 {
            assert_eq!(maha.years, years);
        }
    }
}

#[test]
fn test_cycle_boundary_at_120_years() {
    // Vishakha, partially elapsed
    let lon = 205.0;
    let complete = compute_vimshottari_dasha(
        birth(),
        lon,
        &DashaSettings {
            depth: DashaLevel::Mahadasha,
            cycle_boundary: CycleBoundary::CompletePeriods,
        },
    )
    .unwrap();
    let truncated = compute_vimshottari_dasha(
        birth(),
        lon,
        &DashaSettings {
            depth: DashaLevel::Mahadasha,
            cycle_boundary: CycleBoundary::Truncate,
        },
    )
    .unwrap();

    assert_eq!(complete.periods.len(), 10);
    assert_eq!(truncated.periods.len(), 10);
    assert_eq!(complete.periods[9].body, complete.periods[0].body);
    assert!(complete.total_years() > 120.0);
    assert!((truncated.total_years() - 120.0).abs() < 1e-9);

    let end = truncated.end().unwrap();
    let expected = birth() + years_to_duration(120.0);
    assert!((end - expected).num_milliseconds().abs() <= 1);

    // Everything before the final period is identical under both policies.
    assert_eq!(&complete.periods[..9], &truncated.periods[..9]);
}

#[test]
fn test_point_queries() {
    let timeline = compute_vimshottari_dasha(birth(), 0.0, &DashaSettings::default()).unwrap();

    let maha = timeline.current_maha(birth()).unwrap();
    assert_eq!(maha.body, Graha::Ketu);

    // A boundary instant belongs to the period that starts there.
    let venus_start = timeline.periods[1].start;
    assert_eq!(timeline.current_maha(venus_start).unwrap().body, Graha::Venus);
    assert_eq!(
        timeline.current_maha(venus_start - Duration::milliseconds(1)).unwrap().body,
        Graha::Ketu
    );

    let antar = timeline.current_antar(venus_start).unwrap();
    assert_eq!(antar.body, Graha::Venus);
    assert_eq!(antar.level, DashaLevel::Antardasha);

    let info = timeline.current_dasha_info(birth() + Duration::days(400)).unwrap();
    assert_eq!(info.maha.body, Graha::Ketu);
    assert!(info.antar.contains(birth() + Duration::days(400)));
    let pratyantar = info.pratyantar.unwrap();
    assert_eq!(pratyantar.level, DashaLevel::Pratyantardasha);
    assert!(pratyantar.contains(birth() + Duration::days(400)));
}

#[test]
fn test_queries_outside_timeline_return_none() {
    let timeline = compute_vimshottari_dasha(birth(), 77.7, &DashaSettings::default()).unwrap();
    let before = birth() - Duration::days(1);
    let after = timeline.end().unwrap() + Duration::days(1);
    assert!(timeline.current_maha(before).is_none());
    assert!(timeline.current_antar(before).is_none());
    assert!(timeline.current_dasha_info(before).is_none());
    assert!(timeline.current_maha(after).is_none());
    assert!(timeline.current_dasha_info(after).is_none());
    assert!(current_maha(&[], birth()).is_none());
}

#[test]
fn test_final_instant_resolves_to_last_periods() {
    let timeline = compute_vimshottari_dasha(birth(), 77.7, &DashaSettings::default()).unwrap();
    let end = timeline.end().unwrap();
    let last = timeline.periods.last().unwrap();
    let info = timeline.current_dasha_info(end).unwrap();
    assert_eq!(info.maha.body, last.body);
    assert_eq!(info.antar.end, end);
    assert_eq!(info.pratyantar.unwrap().end, end);
}

#[test]
fn test_shallow_timeline_builds_children_on_demand() {
    let shallow = compute_vimshottari_dasha(
        birth(),
        150.0,
        &DashaSettings {
            depth: DashaLevel::Mahadasha,
            cycle_boundary: CycleBoundary::CompletePeriods,
        },
    )
    .unwrap();
    let full = compute_vimshottari_dasha(birth(), 150.0, &deep()).unwrap();

    let at = birth() + Duration::days(9_000);
    assert_eq!(
        shallow.current_antar(at).map(|p| p.summary()),
        full.current_antar(at).map(|p| p.summary())
    );
    assert_eq!(shallow.current_dasha_info(at), full.current_dasha_info(at));
}

#[test]
fn test_periods_in_year() {
    let timeline = compute_vimshottari_dasha(birth(), 0.0, &DashaSettings::default()).unwrap();
    // Ketu runs 1985-07-12 to 1992-07-11, so 1992 crosses into Venus.
    let year = timeline.periods_in_year(1992);
    assert_eq!(year.len(), 2);
    assert_eq!(year[0].body, Graha::Ketu);
    assert_eq!(year[1].body, Graha::Venus);
    assert!(!year[1].sub_periods.is_empty());

    let from = Utc.with_ymd_and_hms(1992, 1, 1, 0, 0, 0).unwrap();
    let to = Utc.with_ymd_and_hms(1993, 1, 1, 0, 0, 0).unwrap();
    for maha in &year {
        for antar in &maha.sub_periods {
            assert!(antar.overlaps(from, to));
        }
    }

    assert!(timeline.periods_in_year(1900).is_empty());
}

#[test]
fn test_previous_mahas() {
    let timeline = compute_vimshottari_dasha(birth(), 0.0, &DashaSettings::default()).unwrap();
    let at = timeline.periods[5].start + Duration::days(10);
    let previous = timeline.previous_mahas(at, 3);
    let bodies: Vec<Graha> = previous.iter().map(|p| p.body).collect();
    assert_eq!(bodies, vec![Graha::Sun, Graha::Moon, Graha::Mars]);
    assert_eq!(timeline.previous_mahas(at, 10).len(), 5);
    assert!(timeline.previous_mahas(birth(), 3).is_empty());
}

#[test]
fn test_missing_moon() {
    let calculator = ChartCalculator::default();
    let location = GeoLocation::new(17.385, 78.4867).unwrap();
    let mut chart = calculator.calc_chart(birth(), location).unwrap();
    chart.bodies.retain(|b| b.body != Graha::Moon);

    let err = DashaTimeline::from_chart(&chart, &DashaSettings::default()).unwrap_err();
    assert_eq!(err, JyotishError::MissingBodyPosition { body: Graha::Moon });
}

#[test]
fn test_invalid_moon_longitude() {
    let err = compute_vimshottari_dasha(birth(), f64::NAN, &DashaSettings::default()).unwrap_err();
    assert!(matches!(err, JyotishError::InvalidAngle { .. }));
}

#[test]
fn test_deterministic() {
    let a = compute_vimshottari_dasha(birth(), 123.456, &deep()).unwrap();
    let b = compute_vimshottari_dasha(birth(), 123.456, &deep()).unwrap();
    assert_eq!(a, b);
    assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
}

#[test]
fn test_serialized_shape() {
    let timeline = compute_vimshottari_dasha(birth(), 0.0, &DashaSettings::default()).unwrap();
    let value = serde_json::to_value(&timeline).unwrap();
    assert_eq!(value["cycleBoundary"], "complete_periods");
    let first = &value["periods"][0];
    assert_eq!(first["body"], "Ketu");
    assert_eq!(first["level"], "mahadasha");
    assert!(first["startDate"].is_string());
    assert_eq!(first["subPeriods"].as_array().unwrap().len(), 9);
    assert!(first["subPeriods"][0].get("subPeriods").is_none());
}
