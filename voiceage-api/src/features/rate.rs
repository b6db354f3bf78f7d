//! Speaking-rate proxy
//!
//! Blend of zero-crossing rate and positive spectral flux over the
//! non-silent material. Not a syllable count.

use anyhow::Result;
use voiceage_core::diagnostics::{split_nonsilent, SPLIT_TOP_DB};
use voiceage_core::features::{SPEAKING_RATE_MAX, SPEAKING_RATE_MIN};

use super::stft::{magnitude_stft, num_frames};

const FRAME_LENGTH: usize = 1024;
const HOP_LENGTH: usize = 256;

const ZCR_WEIGHT: f64 = 0.85;
const FLUX_WEIGHT: f64 = 0.15;
/// Proxy range mapped onto the rate scale
const PROXY_RANGE: (f64, f64) = (0.03, 0.18);

/// Concatenate the non-silent intervals; the whole signal if none
pub fn voiced_material(samples: &[f32]) -> Vec<f32> {
    let intervals = split_nonsilent(samples, SPLIT_TOP_DB);
    if intervals.is_empty() {
        return samples.to_vec();
    }
    intervals
        .iter()
        .flat_map(|&(start, end)| samples[start..end].iter().copied())
        .collect()
}

/// Mean zero-crossing rate over edge-padded centered frames
pub fn zero_crossing_rate(samples: &[f32]) -> f64 {
    let count = num_frames(samples.len(), HOP_LENGTH);
    if count == 0 {
        return 0.0;
    }
    let half = FRAME_LENGTH / 2;
    let last = samples.len() - 1;
    // Edge padding; near-zero samples count as positive
    let sign_at = |pos: isize| -> bool {
        let idx = pos.clamp(0, last as isize) as usize;
        let s = samples[idx];
        s.abs() > 1e-10 && s < 0.0
    };

    let total: f64 = (0..count)
        .map(|t| {
            let start = (t * HOP_LENGTH) as isize - half as isize;
            let crossings = (1..FRAME_LENGTH as isize)
                .filter(|&i| sign_at(start + i) != sign_at(start + i - 1))
                .count();
            crossings as f64 / FRAME_LENGTH as f64
        })
        .sum();
    total / count as f64
}

/// Mean positive spectral flux and mean magnitude
fn spectral_flux(samples: &[f32]) -> Result<(f64, f64)> {
    let spec = magnitude_stft(samples, FRAME_LENGTH, HOP_LENGTH)?;
    let mean_magnitude = spec.mean_magnitude();
    if spec.num_frames() < 2 {
        return Ok((0.0, mean_magnitude));
    }

    let bins = spec.num_bins() as f64;
    let flux: f64 = spec
        .frames
        .windows(2)
        .map(|pair| {
            pair[1]
                .iter()
                .zip(&pair[0])
                .map(|(now, before)| ((now - before) as f64).max(0.0))
                .sum::<f64>()
                / bins
        })
        .sum::<f64>()
        / (spec.num_frames() - 1) as f64;

    Ok((flux, mean_magnitude))
}

/// Speaking-rate proxy on the [70, 180] scale
pub fn speaking_rate(samples: &[f32]) -> Result<f64> {
    let voiced = voiced_material(samples);
    let zcr = zero_crossing_rate(&voiced);
    let (flux, mean_magnitude) = spectral_flux(&voiced)?;

    let proxy = ZCR_WEIGHT * zcr + FLUX_WEIGHT * (flux / mean_magnitude.max(1e-6));
    let clipped = proxy.clamp(PROXY_RANGE.0, PROXY_RANGE.1);
    Ok(SPEAKING_RATE_MIN
        + (clipped - PROXY_RANGE.0) / (PROXY_RANGE.1 - PROXY_RANGE.0)
            * (SPEAKING_RATE_MAX - SPEAKING_RATE_MIN))
}
