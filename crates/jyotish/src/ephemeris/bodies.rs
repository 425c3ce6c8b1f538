//! Closed-form tropical longitudes for the nine grahas.
//!
//! Sun: low-accuracy solar theory (Meeus ch. 25).
//! Moon: mean elements plus the principal periodic terms in longitude (Meeus ch. 47).
//! Mercury..Saturn: mean orbital elements with the equation of center, projected
//! onto the ecliptic and made geocentric by subtracting Earth's heliocentric vector.
//! Rahu: mean ascending node. Ketu: Rahu + 180°.
//!
//! Accuracy is a fraction of a degree for the luminaries and about a degree for
//! the planets, which is enough to resolve signs and nakshatras.

use crate::ephemeris::time::julian_centuries;
use crate::ephemeris::types::Graha;
use crate::vedic::nakshatra::normalize_degrees;

/// Mean orbital elements at J2000 with per-century rates.
#[derive(Debug, Clone, Copy)]
struct OrbitalElements {
    mean_longitude: f64,
    mean_motion: f64,
    semi_major_axis: f64,
    eccentricity: f64,
    eccentricity_rate: f64,
    perihelion: f64,
    perihelion_rate: f64,
}

const MERCURY: OrbitalElements = OrbitalElements {
    mean_longitude: 252.25084,
    mean_motion: 149_472.67411,
    semi_major_axis: 0.387_098_93,
    eccentricity: 0.205_630_69,
    eccentricity_rate: 0.000_021_23,
    perihelion: 77.45645,
    perihelion_rate: 0.16047,
};

const VENUS: OrbitalElements = OrbitalElements {
    mean_longitude: 181.97973,
    mean_motion: 58_517.81539,
    semi_major_axis: 0.723_331_99,
    eccentricity: 0.006_773_23,
    eccentricity_rate: -0.000_049_38,
    perihelion: 131.53298,
    perihelion_rate: 0.00869,
};

const MARS: OrbitalElements = OrbitalElements {
    mean_longitude: 355.45332,
    mean_motion: 19_140.30268,
    semi_major_axis: 1.523_662_31,
    eccentricity: 0.093_412_33,
    eccentricity_rate: 0.000_119_02,
    perihelion: 336.04084,
    perihelion_rate: 0.44326,
};

const JUPITER: OrbitalElements = OrbitalElements {
    mean_longitude: 34.40438,
    mean_motion: 3_034.74612,
    semi_major_axis: 5.203_363_01,
    eccentricity: 0.048_392_66,
    eccentricity_rate: -0.000_128_80,
    perihelion: 14.75385,
    perihelion_rate: 0.16483,
};

const SATURN: OrbitalElements = OrbitalElements {
    mean_longitude: 49.94432,
    mean_motion: 1_222.49362,
    semi_major_axis: 9.537_070_32,
    eccentricity: 0.054_150_60,
    eccentricity_rate: -0.000_367_62,
    perihelion: 92.43194,
    perihelion_rate: 0.87401,
};

/// Periodic terms for the Moon's longitude: multiples of D, M, M', F and the
/// coefficient in millionths of a degree.
const MOON_LONGITUDE_TERMS: [(i8, i8, i8, i8, f64); 59] = [
    (0, 0, 1, 0, 6_288_774.0),
    (2, 0, -1, 0, 1_274_027.0),
    (2, 0, 0, 0, 658_314.0),
    (0, 0, 2, 0, 213_618.0),
    (0, 1, 0, 0, -185_116.0),
    (0, 0, 0, 2, -114_332.0),
    (2, 0, -2, 0, 58_793.0),
    (2, -1, -1, 0, 57_066.0),
    (2, 0, 1, 0, 53_322.0),
    (2, -1, 0, 0, 45_758.0),
    (0, 1, -1, 0, -40_923.0),
    (1, 0, 0, 0, -34_720.0),
    (0, 1, 1, 0, -30_383.0),
    (2, 0, 0, -2, 15_327.0),
    (0, 0, 1, 2, -12_528.0),
    (0, 0, 1, -2, 10_980.0),
    (4, 0, -1, 0, 10_675.0),
    (0, 0, 3, 0, 10_034.0),
    (4, 0, -2, 0, 8_548.0),
    (2, 1, -1, 0, -7_888.0),
    (2, 1, 0, 0, -6_766.0),
    (1, 0, -1, 0, -5_163.0),
    (1, 1, 0, 0, 4_987.0),
    (2, -1, 1, 0, 4_036.0),
    (2, 0, 2, 0, 3_994.0),
    (4, 0, 0, 0, 3_861.0),
    (2, 0, -3, 0, 3_665.0),
    (0, 1, -2, 0, -2_689.0),
    (2, 0, -1, 2, -2_602.0),
    (2, -1, -2, 0, 2_390.0),
    (1, 0, 1, 0, -2_348.0),
    (2, -2, 0, 0, 2_236.0),
    (0, 1, 2, 0, -2_120.0),
    (0, 2, 0, 0, -2_069.0),
    (2, -2, -1, 0, 2_048.0),
    (2, 0, 1, -2, -1_773.0),
    (2, 0, 0, 2, -1_595.0),
    (4, -1, -1, 0, 1_215.0),
    (0, 0, 2, 2, -1_110.0),
    (3, 0, -1, 0, -892.0),
    (2, 1, 1, 0, -810.0),
    (4, -1, -2, 0, 759.0),
    (0, 2, -1, 0, -713.0),
    (2, 2, -1, 0, -700.0),
    (2, 1, -2, 0, 691.0),
    (2, -1, 0, -2, 596.0),
    (4, 0, 1, 0, 549.0),
    (0, 0, 4, 0, 537.0),
    (4, -1, 0, 0, 520.0),
    (1, 0, -2, 0, -487.0),
    (2, 1, 0, -2, -399.0),
    (0, 0, 2, -2, -381.0),
    (1, 1, 1, 0, 351.0),
    (3, 0, -2, 0, -340.0),
    (4, 0, -3, 0, 330.0),
    (2, -1, 2, 0, 327.0),
    (0, 2, 1, 0, -323.0),
    (1, 1, -1, 0, 299.0),
    (2, 0, 3, 0, 294.0),
];

/// Tropical ecliptic longitude of `graha` at Julian Day `jd`, in [0, 360).
pub fn tropical_longitude(graha: Graha, jd: f64) -> f64 {
    let t = julian_centuries(jd);
    match graha {
        Graha::Sun => solar_coordinates(t).0,
        Graha::Moon => moon_longitude(t),
        Graha::Mercury => geocentric_longitude(&MERCURY, t),
        Graha::Venus => geocentric_longitude(&VENUS, t),
        Graha::Mars => geocentric_longitude(&MARS, t),
        Graha::Jupiter => geocentric_longitude(&JUPITER, t),
        Graha::Saturn => geocentric_longitude(&SATURN, t),
        Graha::Rahu => mean_node_longitude(t),
        Graha::Ketu => normalize_degrees(mean_node_longitude(t) + 180.0),
    }
}

/// Geometric longitude of the Sun (mean equinox of date) and the Earth-Sun distance in AU.
fn solar_coordinates(t: f64) -> (f64, f64) {
    let mean_longitude = 280.46646 + 36_000.76983 * t + 0.000_303_2 * t * t;
    let mean_anomaly = (357.52911 + 35_999.05029 * t - 0.000_153_7 * t * t).to_radians();
    let e = 0.016_708_634 - 0.000_042_037 * t - 0.000_000_126_7 * t * t;

    let center = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * mean_anomaly.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * mean_anomaly).sin()
        + 0.000_289 * (3.0 * mean_anomaly).sin();

    let true_anomaly = mean_anomaly + center.to_radians();
    let radius = 1.000_001_018 * (1.0 - e * e) / (1.0 + e * true_anomaly.cos());
    (normalize_degrees(mean_longitude + center), radius)
}

fn moon_longitude(t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    let mean_longitude = 218.316_447_7 + 481_267.881_234_21 * t - 0.001_578_6 * t2
        + t3 / 538_841.0
        - t4 / 65_194_000.0;
    let elongation = 297.850_192_1 + 445_267.111_403_4 * t - 0.001_881_9 * t2
        + t3 / 545_868.0
        - t4 / 113_065_000.0;
    let sun_anomaly = 357.529_109_2 + 35_999.050_290_9 * t - 0.000_153_6 * t2 + t3 / 24_490_000.0;
    let moon_anomaly = 134.963_396_4 + 477_198.867_505_5 * t + 0.008_741_4 * t2 + t3 / 69_699.0
        - t4 / 14_712_000.0;
    let latitude_argument = 93.272_095_0 + 483_202.017_523_3 * t - 0.003_653_9 * t2
        - t3 / 3_526_000.0
        + t4 / 863_310_000.0;
    let a1 = 119.75 + 131.849 * t;
    let a2 = 53.09 + 479_264.290 * t;
    // Decreasing eccentricity of Earth's orbit
    let e = 1.0 - 0.002_516 * t - 0.000_007_4 * t2;

    let (d, m, mp, f) = (
        elongation.to_radians(),
        sun_anomaly.to_radians(),
        moon_anomaly.to_radians(),
        latitude_argument.to_radians(),
    );

    let mut sum: f64 = MOON_LONGITUDE_TERMS
        .iter()
        .map(|&(cd, cm, cmp, cf, coefficient)| {
            let argument = cd as f64 * d + cm as f64 * m + cmp as f64 * mp + cf as f64 * f;
            let damping = e.powi(cm.unsigned_abs() as i32);
            coefficient * damping * argument.sin()
        })
        .sum();

    sum += 3958.0 * a1.to_radians().sin()
        + 1962.0 * (mean_longitude - latitude_argument).to_radians().sin()
        + 318.0 * a2.to_radians().sin();

    normalize_degrees(mean_longitude + sum / 1_000_000.0)
}

fn mean_node_longitude(t: f64) -> f64 {
    let t2 = t * t;
    normalize_degrees(
        125.044_547_9 - 1_934.136_289_1 * t + 0.002_075_4 * t2 + t2 * t / 467_441.0
            - t2 * t2 / 60_616_000.0,
    )
}

/// Heliocentric ecliptic longitude (degrees) and radius (AU) from mean elements.
fn heliocentric_coordinates(elements: &OrbitalElements, t: f64) -> (f64, f64) {
    let mean_longitude = elements.mean_longitude + elements.mean_motion * t;
    let e = elements.eccentricity + elements.eccentricity_rate * t;
    let perihelion = elements.perihelion + elements.perihelion_rate * t;
    let mean_anomaly = normalize_degrees(mean_longitude - perihelion).to_radians();

    let e2 = e * e;
    let e3 = e2 * e;
    let center = (2.0 * e - e3 / 4.0) * mean_anomaly.sin()
        + 1.25 * e2 * (2.0 * mean_anomaly).sin()
        + 13.0 / 12.0 * e3 * (3.0 * mean_anomaly).sin();

    let true_anomaly = mean_anomaly + center;
    let radius = elements.semi_major_axis * (1.0 - e2) / (1.0 + e * true_anomaly.cos());
    (normalize_degrees(mean_longitude + center.to_degrees()), radius)
}

fn geocentric_longitude(elements: &OrbitalElements, t: f64) -> f64 {
    let (planet_lon, planet_r) = heliocentric_coordinates(elements, t);
    let (sun_lon, earth_r) = solar_coordinates(t);
    let earth_lon = (sun_lon + 180.0).to_radians();
    let planet_lon = planet_lon.to_radians();

    let x = planet_r * planet_lon.cos() - earth_r * earth_lon.cos();
    let y = planet_r * planet_lon.sin() - earth_r * earth_lon.sin();
    normalize_degrees(y.atan2(x).to_degrees())
}
