use jyotish::ephemeris::Graha;
use jyotish::vedic::nakshatra::{
    nakshatra, nakshatras, resolve_nakshatra, NAKSHATRA_COUNT, NAKSHATRA_SEGMENT_SIZE, PADA_SIZE,
};
use jyotish::JyotishError;

#[test]
fn test_index_law_and_pada_range() {
    let mut lon = 0.0;
    while lon < 360.0 {
        let placement = resolve_nakshatra(lon).unwrap();
        assert_eq!(placement.index, (lon / NAKSHATRA_SEGMENT_SIZE).floor() as usize);
        assert!((1..=4).contains(&placement.pada));
        assert!(placement.progress >= 0.0 && placement.progress < 1.0);
        lon += 0.29;
    }
}

#[test]
fn test_every_boundary_starts_a_new_nakshatra() {
    for k in 0..NAKSHATRA_COUNT {
        let placement = resolve_nakshatra(k as f64 * NAKSHATRA_SEGMENT_SIZE).unwrap();
        assert_eq!(placement.index, k);
        assert_eq!(placement.pada, 1);
        assert!(placement.progress < 1e-12);
    }
}

#[test]
fn test_pada_boundaries() {
    let start = 3.0 * NAKSHATRA_SEGMENT_SIZE;
    assert_eq!(resolve_nakshatra(start + 0.5 * PADA_SIZE).unwrap().pada, 1);
    assert_eq!(resolve_nakshatra(start + 1.5 * PADA_SIZE).unwrap().pada, 2);
    assert_eq!(resolve_nakshatra(start + 2.5 * PADA_SIZE).unwrap().pada, 3);
    assert_eq!(resolve_nakshatra(start + 3.5 * PADA_SIZE).unwrap().pada, 4);
}

#[test]
fn test_records() {
    assert_eq!(nakshatras().len(), 27);
    let rohini = nakshatra(3).unwrap();
    assert_eq!(rohini.name, "Rohini");
    assert_eq!(rohini.lord, Graha::Moon);
    assert_eq!(rohini.deity, "Brahma");
    assert_eq!(rohini.animal, "Serpent");
    assert!(nakshatra(27).is_none());

    let revati = resolve_nakshatra(355.0).unwrap().record();
    assert_eq!(revati.name, "Revati");
    assert_eq!(revati.lord, Graha::Mercury);
}

#[test]
fn test_invalid_angle() {
    let err = resolve_nakshatra(f64::NAN).unwrap_err();
    assert!(matches!(err, JyotishError::InvalidAngle { .. }));
}
