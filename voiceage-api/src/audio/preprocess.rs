//! Waveform conditioning before feature extraction

use voiceage_core::diagnostics::{split_nonsilent, SPLIT_TOP_DB};

/// Scale so the loudest sample has magnitude 1.0
///
/// An all-zero (or non-finite) peak leaves the signal untouched.
pub fn peak_normalize(samples: &mut [f32]) {
    let peak = samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()));
    if peak > 0.0 && peak.is_finite() {
        for s in samples.iter_mut() {
            *s /= peak;
        }
    }
}

/// Drop leading and trailing material more than `top_db` below the loudest
/// frame
pub fn trim_silence(samples: &[f32], top_db: f64) -> &[f32] {
    let intervals = split_nonsilent(samples, top_db);
    match (intervals.first(), intervals.last()) {
        (Some(&(start, _)), Some(&(_, end))) => &samples[start..end],
        _ => &samples[..0],
    }
}

/// Outcome of the length guard
#[derive(Debug, Clone, PartialEq)]
pub enum LengthCheck {
    Ok(Vec<f32>),
    /// Carries the trimmed duration in seconds
    TooShort(f64),
}

/// Normalize, trim, then enforce the duration window
///
/// Audio shorter than `min_seconds` after trimming is rejected; audio longer
/// than `max_seconds` is truncated.
pub fn condition(
    mut samples: Vec<f32>,
    sample_rate: u32,
    min_seconds: f64,
    max_seconds: f64,
) -> LengthCheck {
    peak_normalize(&mut samples);
    let trimmed = trim_silence(&samples, SPLIT_TOP_DB);

    let min_len = (min_seconds * sample_rate as f64) as usize;
    let max_len = (max_seconds * sample_rate as f64) as usize;
    if trimmed.len() < min_len {
        return LengthCheck::TooShort(trimmed.len() as f64 / sample_rate.max(1) as f64);
    }
    LengthCheck::Ok(trimmed[..trimmed.len().min(max_len)].to_vec())
}
