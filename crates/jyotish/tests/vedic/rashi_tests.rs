use jyotish::ephemeris::Graha;
use jyotish::vedic::rashi::{resolve_sign, RASHIS, SIGN_SPAN};

#[test]
fn test_sign_index_law() {
    let mut lon = 0.0;
    while lon < 360.0 {
        let placement = resolve_sign(lon).unwrap();
        assert_eq!(placement.index, (lon / SIGN_SPAN).floor() as usize);
        assert!(placement.degree_in_sign >= 0.0 && placement.degree_in_sign < SIGN_SPAN);
        lon += 0.37;
    }
}

#[test]
fn test_boundary_degree_starts_next_sign() {
    for k in 1..12 {
        let placement = resolve_sign(k as f64 * SIGN_SPAN).unwrap();
        assert_eq!(placement.index, k);
        assert_eq!(placement.degree_in_sign, 0.0);
    }
}

#[test]
fn test_sign_lords() {
    let lords: Vec<Graha> = RASHIS.iter().map(|r| r.lord).collect();
    assert_eq!(
        lords,
        vec![
            Graha::Mars,
            Graha::Venus,
            Graha::Mercury,
            Graha::Moon,
            Graha::Sun,
            Graha::Mercury,
            Graha::Venus,
            Graha::Mars,
            Graha::Jupiter,
            Graha::Saturn,
            Graha::Saturn,
            Graha::Jupiter,
        ]
    );
    assert_eq!(RASHIS[6].name, "Tula");
    assert_eq!(RASHIS[6].western_name, "Libra");
}
