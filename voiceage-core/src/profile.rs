//! Tone profile classification
//!
//! Buckets each scalar feature into one label per axis. The cut points are
//! hand-tuned and kept as named constants so they can be recalibrated
//! without touching the algorithm.

use serde::Serialize;
use std::fmt;

use crate::features::FeatureVector;

/// Pitch above this is `high_pitch` (Hz)
pub const HIGH_PITCH_HZ: f64 = 180.0;
/// Pitch below this is `low_pitch` (Hz)
pub const LOW_PITCH_HZ: f64 = 130.0;
/// Energy above this is `high_energy`
pub const HIGH_ENERGY: f64 = 0.75;
/// Energy below this is `low_energy`
pub const LOW_ENERGY: f64 = 0.30;
/// Harmonicity above this is `clear_voice` (dB)
pub const CLEAR_HARMONICITY_DB: f64 = 7.0;
/// Harmonicity below this is `husky_voice` (dB)
pub const HUSKY_HARMONICITY_DB: f64 = 3.0;
/// Pitch dispersion above this is `dynamic_tone` (cents)
pub const DYNAMIC_STD_CENTS: f64 = 110.0;
/// Hz fallback for dispersion when cents are unavailable
pub const DYNAMIC_STD_HZ: f64 = 35.0;

/// Pitch axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PitchBand {
    Low,
    Mid,
    High,
}

/// Energy axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnergyBand {
    Low,
    Mid,
    High,
}

/// Clarity axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Clarity {
    Clear,
    Soft,
    Husky,
}

/// Stability axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stability {
    Stable,
    Dynamic,
}

/// Flat label vocabulary used by rule tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToneLabel {
    LowPitch,
    MidPitch,
    HighPitch,
    LowEnergy,
    MidEnergy,
    HighEnergy,
    ClearVoice,
    SoftVoice,
    HuskyVoice,
    StableTone,
    DynamicTone,
}

impl ToneLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToneLabel::LowPitch => "low_pitch",
            ToneLabel::MidPitch => "mid_pitch",
            ToneLabel::HighPitch => "high_pitch",
            ToneLabel::LowEnergy => "low_energy",
            ToneLabel::MidEnergy => "mid_energy",
            ToneLabel::HighEnergy => "high_energy",
            ToneLabel::ClearVoice => "clear_voice",
            ToneLabel::SoftVoice => "soft_voice",
            ToneLabel::HuskyVoice => "husky_voice",
            ToneLabel::StableTone => "stable_tone",
            ToneLabel::DynamicTone => "dynamic_tone",
        }
    }
}

impl fmt::Display for ToneLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Categorical fingerprint of a voice: exactly one label per axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToneProfile {
    pub pitch: PitchBand,
    pub energy: EnergyBand,
    pub clarity: Clarity,
    pub stability: Stability,
}

impl ToneProfile {
    /// The four labels of this profile, in axis order
    pub fn labels(&self) -> [ToneLabel; 4] {
        let pitch = match self.pitch {
            PitchBand::Low => ToneLabel::LowPitch,
            PitchBand::Mid => ToneLabel::MidPitch,
            PitchBand::High => ToneLabel::HighPitch,
        };
        let energy = match self.energy {
            EnergyBand::Low => ToneLabel::LowEnergy,
            EnergyBand::Mid => ToneLabel::MidEnergy,
            EnergyBand::High => ToneLabel::HighEnergy,
        };
        let clarity = match self.clarity {
            Clarity::Clear => ToneLabel::ClearVoice,
            Clarity::Soft => ToneLabel::SoftVoice,
            Clarity::Husky => ToneLabel::HuskyVoice,
        };
        let stability = match self.stability {
            Stability::Stable => ToneLabel::StableTone,
            Stability::Dynamic => ToneLabel::DynamicTone,
        };
        [pitch, energy, clarity, stability]
    }

    pub fn contains(&self, label: ToneLabel) -> bool {
        self.labels().contains(&label)
    }

    /// True when every label in `required` is part of this profile
    pub fn contains_all(&self, required: &[ToneLabel]) -> bool {
        required.iter().all(|label| self.contains(*label))
    }
}

impl fmt::Display for ToneProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [p, e, c, s] = self.labels();
        write!(f, "{{{}, {}, {}, {}}}", p, e, c, s)
    }
}

/// Derive the tone profile of a feature vector
///
/// Total: NaN inputs fail every comparison and land in the middle band
/// (or `stable_tone`).
pub fn classify(features: &FeatureVector) -> ToneProfile {
    let pitch = if features.pitch_hz > HIGH_PITCH_HZ {
        PitchBand::High
    } else if features.pitch_hz < LOW_PITCH_HZ {
        PitchBand::Low
    } else {
        PitchBand::Mid
    };

    let energy = if features.energy > HIGH_ENERGY {
        EnergyBand::High
    } else if features.energy < LOW_ENERGY {
        EnergyBand::Low
    } else {
        EnergyBand::Mid
    };

    let clarity = if features.harmonicity_db > CLEAR_HARMONICITY_DB {
        Clarity::Clear
    } else if features.harmonicity_db < HUSKY_HARMONICITY_DB {
        Clarity::Husky
    } else {
        Clarity::Soft
    };

    let dynamic = match features.pitch_std_cents {
        Some(cents) => cents > DYNAMIC_STD_CENTS,
        None => features.pitch_std_hz > DYNAMIC_STD_HZ,
    };
    let stability = if dynamic {
        Stability::Dynamic
    } else {
        Stability::Stable
    };

    ToneProfile {
        pitch,
        energy,
        clarity,
        stability,
    }
}
