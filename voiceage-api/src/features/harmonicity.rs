//! Harmonic-to-percussive ratio
//!
//! Median-filter source separation on the magnitude spectrogram: filtering
//! along time keeps sustained partials, filtering along frequency keeps
//! broadband transients. Soft masks split each bin's energy between the
//! two, and the ratio of the masked energies is reported in dB.

use voiceage_core::features::HARMONICITY_RANGE_DB;

use super::stft::Spectrogram;

/// Median kernel length in both directions
pub const KERNEL: usize = 31;

const ENERGY_EPSILON: f64 = 1e-12;

/// Map an out-of-range index back in by half-sample symmetric reflection
fn reflect(idx: isize, len: usize) -> usize {
    let n = len as isize;
    let mut i = idx;
    loop {
        if i < 0 {
            i = -i - 1;
        } else if i >= n {
            i = 2 * n - i - 1;
        } else {
            return i as usize;
        }
    }
}

fn median_of(window: &mut [f32]) -> f32 {
    let mid = window.len() / 2;
    let (_, m, _) = window.select_nth_unstable_by(mid, |a, b| a.total_cmp(b));
    *m
}

/// Median along time for every bin (harmonic estimate)
fn median_over_time(spec: &Spectrogram, kernel: usize) -> Vec<Vec<f32>> {
    let frames = spec.num_frames();
    let half = (kernel / 2) as isize;
    let mut window = vec![0.0f32; kernel];
    let mut out = vec![vec![0.0f32; spec.num_bins()]; frames];
    for bin in 0..spec.num_bins() {
        for t in 0..frames {
            for (k, slot) in window.iter_mut().enumerate() {
                let src = reflect(t as isize + k as isize - half, frames);
                *slot = spec.frames[src][bin];
            }
            out[t][bin] = median_of(&mut window);
        }
    }
    out
}

/// Median along frequency for every frame (percussive estimate)
fn median_over_frequency(spec: &Spectrogram, kernel: usize) -> Vec<Vec<f32>> {
    let bins = spec.num_bins();
    let half = (kernel / 2) as isize;
    let mut window = vec![0.0f32; kernel];
    spec.frames
        .iter()
        .map(|frame| {
            (0..bins)
                .map(|bin| {
                    for (k, slot) in window.iter_mut().enumerate() {
                        *slot = frame[reflect(bin as isize + k as isize - half, bins)];
                    }
                    median_of(&mut window)
                })
                .collect()
        })
        .collect()
}

/// Harmonic and percussive energies of a magnitude spectrogram
pub fn separated_energies(spec: &Spectrogram) -> (f64, f64) {
    if spec.num_frames() == 0 {
        return (0.0, 0.0);
    }
    let harmonic = median_over_time(spec, KERNEL);
    let percussive = median_over_frequency(spec, KERNEL);

    let mut e_harmonic = 0.0f64;
    let mut e_percussive = 0.0f64;
    for (t, frame) in spec.frames.iter().enumerate() {
        for (bin, &s) in frame.iter().enumerate() {
            let h = (harmonic[t][bin] as f64).powi(2);
            let p = (percussive[t][bin] as f64).powi(2);
            let total = h + p;
            if total <= f64::MIN_POSITIVE {
                continue;
            }
            let power = (s as f64).powi(2);
            e_harmonic += power * (h / total).powi(2);
            e_percussive += power * (p / total).powi(2);
        }
    }
    (e_harmonic, e_percussive)
}

/// Harmonic-to-percussive energy ratio in dB, clamped to [-20, 20]
pub fn harmonicity(spec: &Spectrogram) -> f64 {
    let (e_harmonic, e_percussive) = separated_energies(spec);
    let ratio = (e_harmonic + ENERGY_EPSILON) / (e_percussive + ENERGY_EPSILON);
    (10.0 * ratio.log10()).clamp(HARMONICITY_RANGE_DB.0, HARMONICITY_RANGE_DB.1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::stft::magnitude_stft;

    const SR: usize = 22050;

    #[test]
    fn test_reflect() {
        assert_eq!(reflect(-1, 5), 0);
        assert_eq!(reflect(-3, 5), 2);
        assert_eq!(reflect(5, 5), 4);
        assert_eq!(reflect(7, 5), 2);
        assert_eq!(reflect(-4, 2), 0);
        assert_eq!(reflect(3, 5), 3);
    }

    #[test]
    fn test_sustained_tone_is_harmonic() {
        let samples: Vec<f32> = (0..2 * SR)
            .map(|i| 0.5 * (2.0 * std::f32::consts::PI * 220.0 * i as f32 / SR as f32).sin())
            .collect();
        let spec = magnitude_stft(&samples, 2048, 512).unwrap();
        assert!(harmonicity(&spec) > 10.0);
    }

    #[test]
    fn test_sparse_clicks_are_percussive() {
        let mut samples = vec![0.0f32; 3 * SR];
        for i in (SR / 4..samples.len()).step_by(SR / 2) {
            samples[i] = 0.9;
        }
        let spec = magnitude_stft(&samples, 2048, 512).unwrap();
        assert!(harmonicity(&spec) < -10.0);
    }

    #[test]
    fn test_silence_is_balanced() {
        let spec = magnitude_stft(&vec![0.0; SR], 2048, 512).unwrap();
        assert_eq!(harmonicity(&spec), 0.0);
    }

    #[test]
    fn test_clamped() {
        let samples: Vec<f32> = (0..SR)
            .map(|i| (2.0 * std::f32::consts::PI * 440.0 * i as f32 / SR as f32).sin())
            .collect();
        let spec = magnitude_stft(&samples, 2048, 512).unwrap();
        let hnr = harmonicity(&spec);
        assert!((-20.0..=20.0).contains(&hnr));
    }
}
