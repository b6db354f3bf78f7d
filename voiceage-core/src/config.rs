//! Scoring calibration switches
//!
//! Two revisions of the radar stability mapping and of the uniqueness score
//! exist in the field. Both stay selectable so old reports can be reproduced;
//! the defaults are the later revisions.

use serde::{Deserialize, Serialize};

/// Cents-to-stability mapping revision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StabilityCalibration {
    /// Breakpoints [40, 120, 200] cents
    #[default]
    Lenient,
    /// Breakpoints [20, 60, 100] cents
    Strict,
}

impl StabilityCalibration {
    /// Cent breakpoints mapped to stability scores 90, 50, 10
    pub fn cents_breakpoints(&self) -> [f64; 3] {
        match self {
            StabilityCalibration::Lenient => [40.0, 120.0, 200.0],
            StabilityCalibration::Strict => [20.0, 60.0, 100.0],
        }
    }
}

/// Uniqueness score revision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UniquenessFormula {
    /// Distance of the raw features from a neutral voice, range [60, 99]
    #[default]
    FeatureSpread,
    /// Mean radar deviation from 50, range [50, 99]
    RadarDeviation,
}

/// Scoring configuration (`[scoring]` TOML section)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoringProfile {
    #[serde(default, rename = "stability_calibration")]
    pub stability: StabilityCalibration,
    #[serde(default, rename = "uniqueness_formula")]
    pub uniqueness: UniquenessFormula,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_later_revisions() {
        let profile = ScoringProfile::default();
        assert_eq!(profile.stability, StabilityCalibration::Lenient);
        assert_eq!(profile.uniqueness, UniquenessFormula::FeatureSpread);
    }

    #[test]
    fn test_deserialize_scoring_section() {
        let profile: ScoringProfile = serde_json::from_str(
            r#"{"stability_calibration":"strict","uniqueness_formula":"radar_deviation"}"#,
        )
        .unwrap();
        assert_eq!(profile.stability, StabilityCalibration::Strict);
        assert_eq!(profile.uniqueness, UniquenessFormula::RadarDeviation);

        let partial: ScoringProfile = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(partial, ScoringProfile::default());
    }

    #[test]
    fn test_unknown_variant_is_rejected() {
        let result: Result<ScoringProfile, _> =
            serde_json::from_str(r#"{"stability_calibration":"loose"}"#);
        assert!(result.is_err());
    }
}
