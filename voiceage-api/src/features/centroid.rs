//! Spectral brightness

use super::stft::Spectrogram;

/// Mean over frames of the magnitude-weighted mean frequency
///
/// Silent frames contribute 0.
pub fn spectral_centroid(spec: &Spectrogram, sample_rate: u32) -> f64 {
    if spec.num_frames() == 0 {
        return 0.0;
    }
    let total: f64 = spec
        .frames
        .iter()
        .map(|frame| {
            let (weighted, mass) = frame.iter().enumerate().fold(
                (0.0f64, 0.0f64),
                |(weighted, mass), (bin, &m)| {
                    let m = m as f64;
                    (weighted + spec.bin_frequency(bin, sample_rate) * m, mass + m)
                },
            );
            if mass > 0.0 {
                weighted / mass
            } else {
                0.0
            }
        })
        .sum();
    total / spec.num_frames() as f64
}
