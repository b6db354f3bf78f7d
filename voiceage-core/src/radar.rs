//! Five-axis radar normalization and the two headline scores
//!
//! Every radar value is clamped to [10, 100] and truncated toward zero.
//! A NaN axis score maps to the neutral value 50; infinities saturate.

use serde::Serialize;

use crate::config::{StabilityCalibration, UniquenessFormula};
use crate::features::FeatureVector;

pub const RADAR_MIN: f64 = 10.0;
pub const RADAR_MAX: f64 = 100.0;
/// Substituted for an axis whose raw score is NaN
pub const RADAR_NEUTRAL: f64 = 50.0;

pub const ATTRACTION_RANGE: (i32, i32) = (60, 99);
pub const SPREAD_UNIQUENESS_RANGE: (f64, f64) = (60.0, 99.0);
pub const DEVIATION_UNIQUENESS_RANGE: (f64, f64) = (50.0, 99.0);

/// Stability scores at each calibration breakpoint
const STABILITY_SCORES: [f64; 3] = [90.0, 50.0, 10.0];
/// Hz breakpoints used when the cents dispersion is missing
const STABILITY_HZ_BREAKPOINTS: [f64; 3] = [5.0, 20.0, 40.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadarAxis {
    Pitch,
    Energy,
    Tempo,
    Clarity,
    Stability,
}

impl RadarAxis {
    /// Display order
    pub const ALL: [RadarAxis; 5] = [
        RadarAxis::Pitch,
        RadarAxis::Energy,
        RadarAxis::Tempo,
        RadarAxis::Clarity,
        RadarAxis::Stability,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RadarAxis::Pitch => "높이",
            RadarAxis::Energy => "에너지",
            RadarAxis::Tempo => "속도",
            RadarAxis::Clarity => "맑음",
            RadarAxis::Stability => "안정감",
        }
    }

    /// Unclamped axis score
    fn raw_score(&self, features: &FeatureVector, calibration: StabilityCalibration) -> f64 {
        match self {
            RadarAxis::Pitch => (features.pitch_hz - 80.0) / 170.0 * 100.0,
            RadarAxis::Energy => features.energy * 100.0,
            RadarAxis::Tempo => (features.speaking_rate - 70.0) / 110.0 * 100.0,
            RadarAxis::Clarity => features.harmonicity_db * 2.5 + 50.0,
            RadarAxis::Stability => match features.pitch_std_cents {
                Some(cents) => interpolate(cents, &calibration.cents_breakpoints(), &STABILITY_SCORES),
                None => interpolate(features.pitch_std_hz, &STABILITY_HZ_BREAKPOINTS, &STABILITY_SCORES),
            },
        }
    }
}

/// One radar point as sent to the front end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RadarEntry {
    pub feature: &'static str,
    pub value: i32,
}

/// Piecewise-linear interpolation, flat outside the breakpoints
fn interpolate(x: f64, xs: &[f64; 3], ys: &[f64; 3]) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x <= xs[0] {
        return ys[0];
    }
    for i in 1..xs.len() {
        if x <= xs[i] {
            let t = (x - xs[i - 1]) / (xs[i] - xs[i - 1]);
            return ys[i - 1] + t * (ys[i] - ys[i - 1]);
        }
    }
    ys[ys.len() - 1]
}

fn to_radar_value(raw: f64) -> i32 {
    let raw = if raw.is_nan() { RADAR_NEUTRAL } else { raw };
    raw.clamp(RADAR_MIN, RADAR_MAX).trunc() as i32
}

/// Map the feature vector onto the five radar axes
pub fn normalize_radar(features: &FeatureVector, calibration: StabilityCalibration) -> [RadarEntry; 5] {
    RadarAxis::ALL.map(|axis| RadarEntry {
        feature: axis.label(),
        value: to_radar_value(axis.raw_score(features, calibration)),
    })
}

/// Headline attraction score in [60, 99]
///
/// Rewards a high radar mean, a balanced shape and every axis landing in
/// [40, 85].
pub fn calculate_attraction(radar: &[RadarEntry]) -> i32 {
    if radar.is_empty() {
        return ATTRACTION_RANGE.0;
    }
    let n = radar.len() as f64;
    let mean = radar.iter().map(|e| e.value as f64).sum::<f64>() / n;
    let variance = radar
        .iter()
        .map(|e| (e.value as f64 - mean).powi(2))
        .sum::<f64>()
        / n;
    let std = variance.sqrt();

    let balanced = radar.iter().all(|e| (40..=85).contains(&e.value));
    let bonus = if balanced { 10.0 } else { 0.0 };

    let score = 60.0 + (mean - 50.0) * 0.5 + (25.0 - std).max(0.0) + bonus;
    (score.trunc() as i32).clamp(ATTRACTION_RANGE.0, ATTRACTION_RANGE.1)
}

/// Headline uniqueness score
pub fn calculate_uniqueness(
    features: &FeatureVector,
    radar: &[RadarEntry],
    formula: UniquenessFormula,
) -> i32 {
    match formula {
        UniquenessFormula::FeatureSpread => {
            let cents = features
                .pitch_std_cents
                .filter(|c| c.is_finite())
                .unwrap_or(80.0);
            let energy = finite_or(features.energy, 0.5);
            let hnr = finite_or(features.harmonicity_db, 5.0);
            let score = 65.0 + 0.2 * cents + 25.0 * (energy - 0.5).abs() + 1.5 * (hnr - 5.0).abs();
            score
                .clamp(SPREAD_UNIQUENESS_RANGE.0, SPREAD_UNIQUENESS_RANGE.1)
                .trunc() as i32
        }
        UniquenessFormula::RadarDeviation => {
            if radar.is_empty() {
                return DEVIATION_UNIQUENESS_RANGE.0 as i32;
            }
            let deviation = radar
                .iter()
                .map(|e| (e.value as f64 - 50.0).abs())
                .sum::<f64>()
                / radar.len() as f64;
            (50.0 + deviation)
                .clamp(DEVIATION_UNIQUENESS_RANGE.0, DEVIATION_UNIQUENESS_RANGE.1)
                .trunc() as i32
        }
    }
}

fn finite_or(value: f64, neutral: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(radar: &[RadarEntry]) -> Vec<i32> {
        radar.iter().map(|e| e.value).collect()
    }

    #[test]
    fn test_neutral_voice_radar() {
        let f = FeatureVector::default();
        let radar = normalize_radar(&f, StabilityCalibration::Lenient);
        let labels: Vec<_> = radar.iter().map(|e| e.feature).collect();
        assert_eq!(labels, vec!["높이", "에너지", "속도", "맑음", "안정감"]);
        assert_eq!(values(&radar), vec![41, 50, 36, 62, 70]);

        assert_eq!(calculate_attraction(&radar), 73);
        assert_eq!(
            calculate_uniqueness(&f, &radar, UniquenessFormula::FeatureSpread),
            81
        );
    }

    #[test]
    fn test_strict_calibration_scores_lower_stability() {
        let f = FeatureVector::default();
        let lenient = normalize_radar(&f, StabilityCalibration::Lenient);
        let strict = normalize_radar(&f, StabilityCalibration::Strict);
        assert_eq!(lenient[4].value, 70);
        assert_eq!(strict[4].value, 30);
    }

    #[test]
    fn test_stability_uses_hz_when_cents_missing() {
        let f = FeatureVector {
            pitch_std_cents: None,
            pitch_std_hz: 20.0,
            ..FeatureVector::default()
        };
        assert_eq!(normalize_radar(&f, StabilityCalibration::Lenient)[4].value, 50);

        let steady = FeatureVector { pitch_std_hz: 1.0, ..f };
        assert_eq!(normalize_radar(&steady, StabilityCalibration::Lenient)[4].value, 90);
    }

    #[test]
    fn test_interpolate_is_flat_outside_breakpoints() {
        let xs = [40.0, 120.0, 200.0];
        assert_eq!(interpolate(0.0, &xs, &STABILITY_SCORES), 90.0);
        assert_eq!(interpolate(500.0, &xs, &STABILITY_SCORES), 10.0);
        assert_eq!(interpolate(160.0, &xs, &STABILITY_SCORES), 30.0);
        assert!(interpolate(f64::NAN, &xs, &STABILITY_SCORES).is_nan());
    }

    #[test]
    fn test_nan_features_map_to_neutral() {
        let f = FeatureVector {
            pitch_hz: f64::NAN,
            pitch_std_hz: f64::NAN,
            pitch_std_cents: Some(f64::NAN),
            energy: f64::NAN,
            speaking_rate: f64::NAN,
            harmonicity_db: f64::NAN,
            spectral_centroid_hz: f64::NAN,
        };
        let radar = normalize_radar(&f, StabilityCalibration::Lenient);
        assert_eq!(values(&radar), vec![50; 5]);
        // Balanced shape: 60 + 0 + 25 + 10
        assert_eq!(calculate_attraction(&radar), 95);
        assert_eq!(
            calculate_uniqueness(&f, &radar, UniquenessFormula::FeatureSpread),
            81
        );
        assert_eq!(
            calculate_uniqueness(&f, &radar, UniquenessFormula::RadarDeviation),
            50
        );
    }

    #[test]
    fn test_infinite_features_saturate() {
        let f = FeatureVector {
            pitch_hz: f64::INFINITY,
            energy: f64::NEG_INFINITY,
            speaking_rate: f64::INFINITY,
            harmonicity_db: f64::NEG_INFINITY,
            pitch_std_cents: Some(f64::INFINITY),
            ..FeatureVector::default()
        };
        let radar = normalize_radar(&f, StabilityCalibration::Lenient);
        assert_eq!(values(&radar), vec![100, 10, 100, 10, 10]);
        let u = calculate_uniqueness(&f, &radar, UniquenessFormula::FeatureSpread);
        assert!((60..=99).contains(&u));
    }

    #[test]
    fn test_scores_stay_in_range_across_grid() {
        let extremes = [
            f64::NEG_INFINITY,
            -1e9,
            -20.0,
            0.0,
            0.5,
            1.0,
            7.0,
            150.0,
            2093.0,
            1e9,
            f64::INFINITY,
            f64::NAN,
        ];
        for &a in &extremes {
            for &b in &extremes {
                let f = FeatureVector {
                    pitch_hz: a,
                    pitch_std_hz: b,
                    pitch_std_cents: if b.is_sign_negative() { None } else { Some(a) },
                    energy: b,
                    speaking_rate: a,
                    harmonicity_db: b,
                    spectral_centroid_hz: a,
                };
                for calibration in [StabilityCalibration::Lenient, StabilityCalibration::Strict] {
                    let radar = normalize_radar(&f, calibration);
                    for entry in &radar {
                        assert!((10..=100).contains(&entry.value), "{:?}", entry);
                    }
                    let attraction = calculate_attraction(&radar);
                    assert!((60..=99).contains(&attraction));
                    let spread = calculate_uniqueness(&f, &radar, UniquenessFormula::FeatureSpread);
                    assert!((60..=99).contains(&spread));
                    let deviation =
                        calculate_uniqueness(&f, &radar, UniquenessFormula::RadarDeviation);
                    assert!((50..=99).contains(&deviation));
                }
            }
        }
    }

    #[test]
    fn test_attraction_balanced_bonus() {
        let balanced: Vec<_> = [60, 60, 60, 60, 60]
            .iter()
            .map(|&value| RadarEntry { feature: "x", value })
            .collect();
        // 60 + 5 + 25 + 10
        assert_eq!(calculate_attraction(&balanced), 99);

        let skewed: Vec<_> = [10, 100, 10, 100, 10]
            .iter()
            .map(|&value| RadarEntry { feature: "x", value })
            .collect();
        // mean 46, std ~44: 60 - 2 + 0 + 0
        assert_eq!(calculate_attraction(&skewed), 60);
    }
}
