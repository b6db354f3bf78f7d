//! Level-insensitive loudness

use voiceage_core::diagnostics::frame_rms;

/// Floor of the amplitude-to-dB conversion
const AMIN: f64 = 1e-5;
/// Frames are clamped to this far below the loudest frame
const TOP_DB: f64 = 80.0;
/// Mean dB mapped onto [0, 1] from this range
const FLOOR_DB: f64 = -60.0;

/// Mean frame level relative to the loudest frame, mapped from [-60, 0] dB
/// onto [0, 1]
///
/// All-zero input is 0.
pub fn energy(samples: &[f32]) -> f64 {
    let rms = frame_rms(samples);
    if rms.iter().all(|&r| r == 0.0) {
        return 0.0;
    }
    let reference = rms.iter().cloned().fold(0.0f64, f64::max);
    let ref_db = 20.0 * reference.max(AMIN).log10();

    let mean_db = rms
        .iter()
        .map(|r| (20.0 * r.max(AMIN).log10() - ref_db).max(-TOP_DB))
        .sum::<f64>()
        / rms.len() as f64;

    ((mean_db - FLOOR_DB) / -FLOOR_DB).clamp(0.0, 1.0)
}
