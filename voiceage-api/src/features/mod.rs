//! Acoustic feature extraction
//!
//! Turns a conditioned mono waveform into the [`FeatureVector`] the
//! classifier consumes. Pure CPU work; callers run it off the async
//! executor.

pub mod centroid;
pub mod energy;
pub mod harmonicity;
pub mod pitch;
pub mod rate;
pub mod stft;

pub use centroid::spectral_centroid;
pub use energy::energy;
pub use harmonicity::harmonicity;
pub use pitch::{pitch_stats, track_f0, PitchStats};
pub use rate::speaking_rate;
pub use stft::{magnitude_stft, Spectrogram};

use anyhow::Result;
use tracing::debug;
use voiceage_core::FeatureVector;

/// STFT size shared by the harmonicity and centroid measurements
pub const N_FFT: usize = 2048;
pub const HOP_LENGTH: usize = 512;

/// Measure every feature of one waveform
pub fn extract_features(samples: &[f32], sample_rate: u32) -> Result<FeatureVector> {
    let pitch = pitch_stats(&track_f0(samples, sample_rate)?);
    let spectrogram = magnitude_stft(samples, N_FFT, HOP_LENGTH)?;

    let features = FeatureVector {
        pitch_hz: pitch.median_hz,
        pitch_std_hz: pitch.std_hz,
        pitch_std_cents: Some(pitch.std_cents),
        energy: energy(samples),
        speaking_rate: speaking_rate(samples)?,
        harmonicity_db: harmonicity(&spectrogram),
        spectral_centroid_hz: spectral_centroid(&spectrogram, sample_rate),
    };

    debug!(
        pitch_hz = features.pitch_hz,
        pitch_std_cents = pitch.std_cents,
        energy = features.energy,
        speaking_rate = features.speaking_rate,
        harmonicity_db = features.harmonicity_db,
        centroid_hz = features.spectral_centroid_hz,
        "Extracted features"
    );

    Ok(features)
}
