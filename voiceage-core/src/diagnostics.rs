//! Recording quality diagnostics
//!
//! Three independent checks on the preprocessed waveform. Each one can only
//! add an advisory warning; none of them fails the analysis.
//!
//! Frame energy uses 2048-sample frames with a 512-sample hop, centered with
//! zero padding, so frame `i` covers samples around `i * 512`.

use serde::Serialize;
use tracing::debug;

use crate::catalog::{WARN_CLIPPED, WARN_NOISY, WARN_SILENT};

pub const FRAME_LENGTH: usize = 2048;
pub const HOP_LENGTH: usize = 512;

/// Silence threshold below the loudest frame, in dB
pub const SPLIT_TOP_DB: f64 = 30.0;

/// Warn below this SNR estimate (dB)
pub const MIN_SNR_DB: f64 = 10.0;
/// Samples louder than this count as clipped
pub const CLIP_LEVEL: f32 = 0.98;
/// Warn above this fraction of clipped samples
pub const MAX_CLIPPING_RATIO: f64 = 0.02;
/// Warn below this fraction of voiced samples
pub const MIN_VOICED_RATIO: f64 = 0.4;

/// Floor for power-to-dB conversion
const AMIN: f64 = 1e-10;
const SNR_EPSILON: f64 = 1e-8;

/// Per-frame RMS
pub fn frame_rms(samples: &[f32]) -> Vec<f64> {
    if samples.is_empty() {
        return Vec::new();
    }
    let half = (FRAME_LENGTH / 2) as isize;
    let n_frames = 1 + samples.len() / HOP_LENGTH;
    let len = samples.len() as isize;

    (0..n_frames)
        .map(|i| {
            let center = (i * HOP_LENGTH) as isize;
            let start = (center - half).max(0) as usize;
            let end = (center + half).min(len) as usize;
            let energy: f64 = samples[start..end]
                .iter()
                .map(|&s| (s as f64) * (s as f64))
                .sum();
            (energy / FRAME_LENGTH as f64).sqrt()
        })
        .collect()
}

/// Sample ranges `[start, end)` whose frame power is within `top_db` of the
/// loudest frame
pub fn split_nonsilent(samples: &[f32], top_db: f64) -> Vec<(usize, usize)> {
    let rms = frame_rms(samples);
    let power: Vec<f64> = rms.iter().map(|r| r * r).collect();
    let reference = power.iter().cloned().fold(0.0_f64, f64::max);
    let ref_db = 10.0 * reference.max(AMIN).log10();

    let mut intervals = Vec::new();
    let mut run_start: Option<usize> = None;
    for (i, p) in power.iter().enumerate() {
        let db = 10.0 * p.max(AMIN).log10() - ref_db;
        let voiced = db > -top_db;
        match (voiced, run_start) {
            (true, None) => run_start = Some(i),
            (false, Some(start)) => {
                intervals.push(frames_to_range(start, i, samples.len()));
                run_start = None;
            }
            _ => {}
        }
    }
    if let Some(start) = run_start {
        intervals.push(frames_to_range(start, power.len(), samples.len()));
    }
    intervals
}

fn frames_to_range(start_frame: usize, end_frame: usize, len: usize) -> (usize, usize) {
    (
        (start_frame * HOP_LENGTH).min(len),
        (end_frame * HOP_LENGTH).min(len),
    )
}

/// Median frame RMS over 10th-percentile frame RMS, in dB
pub fn estimate_snr(samples: &[f32]) -> f64 {
    let mut rms = frame_rms(samples);
    if rms.is_empty() {
        return 0.0;
    }
    rms.sort_by(|a, b| a.total_cmp(b));
    let median = percentile(&rms, 50.0);
    let noise = percentile(&rms, 10.0);
    20.0 * ((median + SNR_EPSILON) / (noise + SNR_EPSILON)).log10()
}

/// Linear-interpolated percentile of sorted data
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let position = q / 100.0 * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Fraction of samples with magnitude above [`CLIP_LEVEL`]
pub fn clipping_ratio(samples: &[f32]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let clipped = samples.iter().filter(|s| s.abs() > CLIP_LEVEL).count();
    clipped as f64 / samples.len() as f64
}

/// Fraction of samples inside non-silent intervals
pub fn voiced_ratio(samples: &[f32]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let voiced: usize = split_nonsilent(samples, SPLIT_TOP_DB)
        .iter()
        .map(|(start, end)| end - start)
        .sum();
    voiced as f64 / samples.len() as f64
}

/// Raw quality measurements for one waveform
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QualityReport {
    pub snr_db: f64,
    pub clipping_ratio: f64,
    pub voiced_ratio: f64,
}

impl QualityReport {
    pub fn measure(samples: &[f32]) -> Self {
        Self {
            snr_db: estimate_snr(samples),
            clipping_ratio: clipping_ratio(samples),
            voiced_ratio: voiced_ratio(samples),
        }
    }

    /// Advisory texts, in noise, clipping, silence order
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.snr_db < MIN_SNR_DB {
            warnings.push(WARN_NOISY.to_string());
        }
        if self.clipping_ratio > MAX_CLIPPING_RATIO {
            warnings.push(WARN_CLIPPED.to_string());
        }
        if self.voiced_ratio < MIN_VOICED_RATIO {
            warnings.push(WARN_SILENT.to_string());
        }
        warnings
    }
}

/// Run every quality check and collect the warnings
pub fn diagnose(samples: &[f32], sample_rate: u32) -> Vec<String> {
    let report = QualityReport::measure(samples);
    debug!(
        duration_secs = samples.len() as f64 / sample_rate.max(1) as f64,
        snr_db = report.snr_db,
        clipping_ratio = report.clipping_ratio,
        voiced_ratio = report.voiced_ratio,
        "Measured recording quality"
    );
    report.warnings()
}
