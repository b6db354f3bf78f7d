//! Acoustic feature vector consumed by every classification step
//!
//! Produced once per request by the feature-extraction collaborator and never
//! mutated afterwards.

use serde::{Deserialize, Serialize};

/// Median pitch substituted when pitch tracking finds no voiced frames
pub const FALLBACK_PITCH_HZ: f64 = 150.0;

/// Pitch dispersion (Hz) substituted when fewer than two voiced frames exist
pub const FALLBACK_PITCH_STD_HZ: f64 = 15.0;

/// Pitch dispersion (cents) substituted when fewer than two voiced frames exist
pub const FALLBACK_PITCH_STD_CENTS: f64 = 80.0;

/// Lower end of the speaking-rate proxy scale
pub const SPEAKING_RATE_MIN: f64 = 70.0;

/// Upper end of the speaking-rate proxy scale
pub const SPEAKING_RATE_MAX: f64 = 180.0;

/// Harmonicity clamp range in dB
pub const HARMONICITY_RANGE_DB: (f64, f64) = (-20.0, 20.0);

/// Scalar acoustic measurements for one recording
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Median fundamental frequency in Hz
    pub pitch_hz: f64,
    /// Standard deviation of the f0 track in Hz
    pub pitch_std_hz: f64,
    /// Standard deviation of the f0 track in cents (pitch invariant).
    /// Preferred over `pitch_std_hz` whenever present.
    pub pitch_std_cents: Option<f64>,
    /// Loudness level normalized to [0, 1]
    pub energy: f64,
    /// Speaking-rate proxy on the [70, 180] scale
    pub speaking_rate: f64,
    /// Harmonic-to-percussive energy ratio in dB, [-20, 20]
    pub harmonicity_db: f64,
    /// Mean spectral centroid in Hz
    pub spectral_centroid_hz: f64,
}

impl FeatureVector {
    /// Pitch statistics used when the pitch tracker yields nothing usable
    pub fn fallback_pitch() -> (f64, f64, f64) {
        (
            FALLBACK_PITCH_HZ,
            FALLBACK_PITCH_STD_HZ,
            FALLBACK_PITCH_STD_CENTS,
        )
    }
}

impl Default for FeatureVector {
    /// Neutral mid-range voice
    fn default() -> Self {
        Self {
            pitch_hz: FALLBACK_PITCH_HZ,
            pitch_std_hz: FALLBACK_PITCH_STD_HZ,
            pitch_std_cents: Some(FALLBACK_PITCH_STD_CENTS),
            energy: 0.5,
            speaking_rate: 110.0,
            harmonicity_db: 5.0,
            spectral_centroid_hz: 2000.0,
        }
    }
}
