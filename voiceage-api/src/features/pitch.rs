//! Fundamental frequency tracking and pitch statistics
//!
//! Per frame: the cumulative-mean-normalized difference function (YIN) over
//! the lag range of C2..C7, with the cross-correlation term computed by FFT.
//! The first lag whose normalized difference dips below the voicing
//! threshold (refined to its local minimum and parabolically interpolated)
//! gives f0. Frames far below the loudest frame are unvoiced.

use anyhow::{anyhow, Result};
use realfft::num_complex::Complex;
use realfft::RealFftPlanner;
use voiceage_core::features::FeatureVector;

use super::stft::{centered_frame, num_frames};

pub const FRAME_LENGTH: usize = 1024;
pub const HOP_LENGTH: usize = 256;

/// C2
pub const FMIN_HZ: f64 = 65.41;
/// C7
pub const FMAX_HZ: f64 = 2093.0;

/// Normalized-difference dip that counts as periodic
const VOICING_THRESHOLD: f32 = 0.15;
/// Frames quieter than this below the loudest frame are unvoiced (dB)
const SILENCE_GATE_DB: f32 = 40.0;

const MEDIAN_KERNEL: usize = 5;

/// Summary of the voiced f0 track
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchStats {
    pub median_hz: f64,
    pub std_hz: f64,
    pub std_cents: f64,
}

/// Per-frame f0 estimates, `None` for unvoiced frames
pub fn track_f0(samples: &[f32], sample_rate: u32) -> Result<Vec<Option<f64>>> {
    let sr = sample_rate as f64;
    let min_lag = ((sr / FMAX_HZ).floor() as usize).max(2);
    let max_lag = ((sr / FMIN_HZ).ceil() as usize).min(FRAME_LENGTH / 2);
    if min_lag >= max_lag {
        return Err(anyhow!("Sample rate {} too low for pitch range", sample_rate));
    }
    let window_len = FRAME_LENGTH - max_lag;

    let fft_len = 2 * FRAME_LENGTH;
    let mut planner = RealFftPlanner::<f32>::new();
    let forward = planner.plan_fft_forward(fft_len);
    let inverse = planner.plan_fft_inverse(fft_len);
    let mut scratch_fwd = forward.make_scratch_vec();
    let mut scratch_inv = inverse.make_scratch_vec();

    let count = num_frames(samples.len(), HOP_LENGTH);
    let mut frame = vec![0.0f32; FRAME_LENGTH];
    let mut padded = vec![0.0f32; fft_len];
    let mut head = vec![0.0f32; fft_len];
    let mut frame_spec = forward.make_output_vec();
    let mut head_spec = forward.make_output_vec();
    let mut product: Vec<Complex<f32>> = inverse.make_input_vec();
    let mut correlation = vec![0.0f32; fft_len];
    let mut diff = vec![0.0f32; max_lag + 1];

    // Loudest frame energy for the silence gate
    let mut energies = Vec::with_capacity(count);
    for t in 0..count {
        centered_frame(samples, t, HOP_LENGTH, &mut frame);
        energies.push(frame.iter().map(|x| x * x).sum::<f32>());
    }
    let max_energy = energies.iter().cloned().fold(0.0f32, f32::max);
    let gate = max_energy * 10f32.powf(-SILENCE_GATE_DB / 10.0);

    let mut track = Vec::with_capacity(count);
    for t in 0..count {
        if energies[t] <= gate || energies[t] == 0.0 {
            track.push(None);
            continue;
        }
        centered_frame(samples, t, HOP_LENGTH, &mut frame);

        // r(tau) = sum_{j < W} x[j] * x[j + tau]
        padded.iter_mut().for_each(|v| *v = 0.0);
        padded[..FRAME_LENGTH].copy_from_slice(&frame);
        head.iter_mut().for_each(|v| *v = 0.0);
        head[..window_len].copy_from_slice(&frame[..window_len]);

        forward
            .process_with_scratch(&mut padded, &mut frame_spec, &mut scratch_fwd)
            .map_err(|e| anyhow!("FFT failed: {:?}", e))?;
        forward
            .process_with_scratch(&mut head, &mut head_spec, &mut scratch_fwd)
            .map_err(|e| anyhow!("FFT failed: {:?}", e))?;
        for ((p, x), a) in product.iter_mut().zip(&frame_spec).zip(&head_spec) {
            *p = a.conj() * x;
        }
        // Imaginary parts of DC/Nyquist must be zero for the inverse
        if let Some(first) = product.first_mut() {
            first.im = 0.0;
        }
        if let Some(last) = product.last_mut() {
            last.im = 0.0;
        }
        inverse
            .process_with_scratch(&mut product, &mut correlation, &mut scratch_inv)
            .map_err(|e| anyhow!("Inverse FFT failed: {:?}", e))?;
        let scale = 1.0 / fft_len as f32;

        // d(tau) = e(0) + e(tau) - 2 r(tau), e(tau) = sum_{j < W} x[j + tau]^2
        let mut prefix = Vec::with_capacity(FRAME_LENGTH + 1);
        prefix.push(0.0f32);
        for x in &frame {
            let last = prefix[prefix.len() - 1];
            prefix.push(last + x * x);
        }
        let e0 = prefix[window_len];
        for (tau, d) in diff.iter_mut().enumerate() {
            let e_tau = prefix[tau + window_len] - prefix[tau];
            *d = (e0 + e_tau - 2.0 * correlation[tau] * scale).max(0.0);
        }

        track.push(pick_lag(&diff, min_lag, max_lag).map(|lag| sr / lag));
    }

    Ok(track)
}

/// YIN lag selection on a raw difference function
fn pick_lag(diff: &[f32], min_lag: usize, max_lag: usize) -> Option<f64> {
    let mut cmnd = vec![1.0f32; max_lag + 1];
    let mut running = 0.0f32;
    for tau in 1..=max_lag {
        running += diff[tau];
        if running <= 0.0 {
            return None;
        }
        cmnd[tau] = diff[tau] * tau as f32 / running;
    }

    let mut tau = min_lag;
    while tau <= max_lag {
        if cmnd[tau] < VOICING_THRESHOLD {
            while tau < max_lag && cmnd[tau + 1] < cmnd[tau] {
                tau += 1;
            }
            return Some(refine(&cmnd, tau, min_lag, max_lag));
        }
        tau += 1;
    }
    None
}

/// Parabolic interpolation around a local minimum
fn refine(values: &[f32], tau: usize, min_lag: usize, max_lag: usize) -> f64 {
    if tau <= min_lag || tau >= max_lag {
        return tau as f64;
    }
    let (a, b, c) = (values[tau - 1] as f64, values[tau] as f64, values[tau + 1] as f64);
    let denom = a - 2.0 * b + c;
    if denom.abs() < f64::EPSILON {
        return tau as f64;
    }
    tau as f64 + 0.5 * (a - c) / denom
}

/// Median filter with edge padding; sequences shorter than `k` pass through
pub fn median_filter(values: &[f64], k: usize) -> Vec<f64> {
    if values.len() < k {
        return values.to_vec();
    }
    let pad = k / 2;
    let last = values.len() - 1;
    let mut window = Vec::with_capacity(k);
    (0..values.len())
        .map(|i| {
            window.clear();
            for offset in 0..k {
                let idx = (i + offset).saturating_sub(pad).min(last);
                window.push(values[idx]);
            }
            median(&mut window)
        })
        .collect()
}

/// Median (mean of the two middle values for even lengths)
pub fn median(values: &mut [f64]) -> f64 {
    values.sort_by(|a, b| a.total_cmp(b));
    let n = values.len();
    if n == 0 {
        return f64::NAN;
    }
    if n % 2 == 1 {
        values[n / 2]
    } else {
        (values[n / 2 - 1] + values[n / 2]) / 2.0
    }
}

fn std_dev(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt()
}

/// Median, spread in Hz and spread in cents of the voiced track
///
/// No voiced frames gives the fallback triple; a single voiced frame keeps
/// its value but takes the fallback spreads.
pub fn pitch_stats(track: &[Option<f64>]) -> PitchStats {
    let (fallback_hz, fallback_std_hz, fallback_cents) = FeatureVector::fallback_pitch();
    let voiced: Vec<f64> = track.iter().flatten().copied().filter(|f| f.is_finite() && *f > 0.0).collect();
    if voiced.is_empty() {
        return PitchStats {
            median_hz: fallback_hz,
            std_hz: fallback_std_hz,
            std_cents: fallback_cents,
        };
    }

    let smoothed = median_filter(&voiced, MEDIAN_KERNEL);
    let median_hz = median(&mut smoothed.clone());
    if smoothed.len() == 1 {
        return PitchStats {
            median_hz,
            std_hz: fallback_std_hz,
            std_cents: fallback_cents,
        };
    }

    let cents: Vec<f64> = smoothed.iter().map(|f| (f / median_hz).log2()).collect();
    PitchStats {
        median_hz,
        std_hz: std_dev(&smoothed),
        std_cents: 1200.0 * std_dev(&cents),
    }
}
