//! Audio ingestion: decode, resample, condition
//!
//! Turns uploaded bytes into the mono waveform at the analysis sample rate
//! that feature extraction and quality checks consume.

pub mod decoder;
pub mod preprocess;
pub mod resampler;

pub use decoder::{decode_bytes, DecodedAudio};
pub use preprocess::{condition, LengthCheck};
pub use resampler::resample_mono;

use tracing::{debug, warn};

use crate::config::LimitsConfig;
use crate::error::{ApiError, ApiResult};

pub const UNRECOGNIZED_FORMAT_MESSAGE: &str =
    "오디오 포맷을 인식할 수 없습니다. WAV/MP3 등 표준 포맷을 사용해 주세요.";

/// Waveform ready for analysis
#[derive(Debug, Clone)]
pub struct Waveform {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

/// Decode, resample and condition an upload
pub fn load_waveform(bytes: &[u8], limits: &LimitsConfig) -> ApiResult<Waveform> {
    let decoded = decode_bytes(bytes).map_err(|e| {
        warn!(error = %e, size = bytes.len(), "Undecodable upload");
        ApiError::BadRequest(UNRECOGNIZED_FORMAT_MESSAGE.to_string())
    })?;

    debug!(
        source_rate = decoded.sample_rate,
        channels = decoded.channels,
        duration_secs = decoded.duration_seconds(),
        "Decoded upload"
    );

    let sample_rate = limits.target_sample_rate;
    let resampled = resample_mono(&decoded.samples, decoded.sample_rate, sample_rate)?;

    match condition(resampled, sample_rate, limits.min_seconds, limits.max_seconds) {
        LengthCheck::Ok(samples) => Ok(Waveform {
            samples,
            sample_rate,
        }),
        LengthCheck::TooShort(seconds) => Err(ApiError::BadRequest(format!(
            "오디오 길이가 너무 짧습니다(≥{:.1}초 필요, {:.2}초 감지).",
            limits.min_seconds, seconds
        ))),
    }
}
