//! Gender-conditioned age bracket estimation
//!
//! Pitch walks down a descending threshold ladder; the first rung it clears
//! picks the bracket. Two rungs split further: the fourth on energy, the
//! fifth on spectral centroid.

use serde::Serialize;
use std::fmt;

/// Energy above this picks the younger half of the fourth rung
pub const AGE_ENERGY_SPLIT: f64 = 0.5;

/// Caller-asserted gender. Anything other than `"female"` takes the
/// non-female ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Female,
    Other,
}

impl Gender {
    /// Parse the form value sent by the front end
    pub fn from_form(value: &str) -> Self {
        if value == "female" {
            Gender::Female
        } else {
            Gender::Other
        }
    }
}

/// Eight ordered brackets, youngest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum AgeBracket {
    #[serde(rename = "10s")]
    Teens,
    #[serde(rename = "20s_early")]
    TwentiesEarly,
    #[serde(rename = "20s_late")]
    TwentiesLate,
    #[serde(rename = "30s_early")]
    ThirtiesEarly,
    #[serde(rename = "30s_late")]
    ThirtiesLate,
    #[serde(rename = "40s_early")]
    FortiesEarly,
    #[serde(rename = "40s_late")]
    FortiesLate,
    #[serde(rename = "50s_plus")]
    FiftiesPlus,
}

impl AgeBracket {
    pub const ALL: [AgeBracket; 8] = [
        AgeBracket::Teens,
        AgeBracket::TwentiesEarly,
        AgeBracket::TwentiesLate,
        AgeBracket::ThirtiesEarly,
        AgeBracket::ThirtiesLate,
        AgeBracket::FortiesEarly,
        AgeBracket::FortiesLate,
        AgeBracket::FiftiesPlus,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            AgeBracket::Teens => "10s",
            AgeBracket::TwentiesEarly => "20s_early",
            AgeBracket::TwentiesLate => "20s_late",
            AgeBracket::ThirtiesEarly => "30s_early",
            AgeBracket::ThirtiesLate => "30s_late",
            AgeBracket::FortiesEarly => "40s_early",
            AgeBracket::FortiesLate => "40s_late",
            AgeBracket::FiftiesPlus => "50s_plus",
        }
    }
}

impl fmt::Display for AgeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Pitch cutoffs (Hz, strictly greater-than) for one gender
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgeLadder {
    pub teens: f64,
    pub twenties_early: f64,
    pub twenties_late: f64,
    /// Above this: 30s, split on energy
    pub thirties: f64,
    /// Above this: 40s, split on spectral centroid
    pub forties: f64,
    /// Centroid above this picks `40s_early`
    pub centroid_split_hz: f64,
}

pub const FEMALE_LADDER: AgeLadder = AgeLadder {
    teens: 245.0,
    twenties_early: 220.0,
    twenties_late: 200.0,
    thirties: 185.0,
    forties: 170.0,
    centroid_split_hz: 2200.0,
};

pub const NON_FEMALE_LADDER: AgeLadder = AgeLadder {
    teens: 165.0,
    twenties_early: 140.0,
    twenties_late: 125.0,
    thirties: 110.0,
    forties: 95.0,
    centroid_split_hz: 1800.0,
};

impl AgeLadder {
    pub fn for_gender(gender: Gender) -> &'static AgeLadder {
        match gender {
            Gender::Female => &FEMALE_LADDER,
            Gender::Other => &NON_FEMALE_LADDER,
        }
    }

    pub fn bracket(&self, pitch_hz: f64, spectral_centroid_hz: f64, energy: f64) -> AgeBracket {
        if pitch_hz > self.teens {
            AgeBracket::Teens
        } else if pitch_hz > self.twenties_early {
            AgeBracket::TwentiesEarly
        } else if pitch_hz > self.twenties_late {
            AgeBracket::TwentiesLate
        } else if pitch_hz > self.thirties {
            if energy > AGE_ENERGY_SPLIT {
                AgeBracket::ThirtiesEarly
            } else {
                AgeBracket::ThirtiesLate
            }
        } else if pitch_hz > self.forties {
            if spectral_centroid_hz > self.centroid_split_hz {
                AgeBracket::FortiesEarly
            } else {
                AgeBracket::FortiesLate
            }
        } else {
            AgeBracket::FiftiesPlus
        }
    }
}

/// Estimate the age bracket for a voice
pub fn estimate_age(
    pitch_hz: f64,
    spectral_centroid_hz: f64,
    energy: f64,
    gender: Gender,
) -> AgeBracket {
    AgeLadder::for_gender(gender).bracket(pitch_hz, spectral_centroid_hz, energy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_parsing() {
        assert_eq!(Gender::from_form("female"), Gender::Female);
        assert_eq!(Gender::from_form("male"), Gender::Other);
        assert_eq!(Gender::from_form("Female"), Gender::Other);
        assert_eq!(Gender::from_form(""), Gender::Other);
    }

    #[test]
    fn test_non_female_ladder() {
        let g = Gender::Other;
        assert_eq!(estimate_age(170.0, 2000.0, 0.5, g), AgeBracket::Teens);
        assert_eq!(estimate_age(165.0, 2000.0, 0.5, g), AgeBracket::TwentiesEarly);
        assert_eq!(estimate_age(150.0, 2000.0, 0.5, g), AgeBracket::TwentiesEarly);
        assert_eq!(estimate_age(130.0, 2000.0, 0.5, g), AgeBracket::TwentiesLate);
        assert_eq!(estimate_age(115.0, 2000.0, 0.6, g), AgeBracket::ThirtiesEarly);
        assert_eq!(estimate_age(115.0, 2000.0, 0.5, g), AgeBracket::ThirtiesLate);
        assert_eq!(estimate_age(100.0, 1900.0, 0.5, g), AgeBracket::FortiesEarly);
        assert_eq!(estimate_age(100.0, 1800.0, 0.5, g), AgeBracket::FortiesLate);
        assert_eq!(estimate_age(95.0, 3000.0, 0.9, g), AgeBracket::FiftiesPlus);
    }

    #[test]
    fn test_female_ladder() {
        let g = Gender::Female;
        assert_eq!(estimate_age(250.0, 2000.0, 0.5, g), AgeBracket::Teens);
        assert_eq!(estimate_age(230.0, 2000.0, 0.5, g), AgeBracket::TwentiesEarly);
        assert_eq!(estimate_age(210.0, 2000.0, 0.5, g), AgeBracket::TwentiesLate);
        assert_eq!(estimate_age(190.0, 2000.0, 0.7, g), AgeBracket::ThirtiesEarly);
        assert_eq!(estimate_age(190.0, 2000.0, 0.3, g), AgeBracket::ThirtiesLate);
        assert_eq!(estimate_age(175.0, 2300.0, 0.5, g), AgeBracket::FortiesEarly);
        assert_eq!(estimate_age(175.0, 2100.0, 0.5, g), AgeBracket::FortiesLate);
        assert_eq!(estimate_age(150.0, 2000.0, 0.5, g), AgeBracket::FiftiesPlus);
    }

    #[test]
    fn test_nan_pitch_is_oldest_bracket() {
        assert_eq!(
            estimate_age(f64::NAN, 2000.0, 0.5, Gender::Other),
            AgeBracket::FiftiesPlus
        );
    }

    #[test]
    fn test_brackets_are_ordered() {
        let mut sorted = AgeBracket::ALL;
        sorted.sort();
        assert_eq!(sorted, AgeBracket::ALL);
        assert_eq!(AgeBracket::ALL[7].key(), "50s_plus");
    }
}
