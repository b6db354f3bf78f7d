//! Magnitude short-time Fourier transform
//!
//! Frames are centered: the signal is zero-padded by `n_fft / 2` on both
//! sides, so frame `t` is centered on sample `t * hop`. Periodic Hann window,
//! no normalization.

use anyhow::{anyhow, Result};
use realfft::RealFftPlanner;

/// Magnitude spectrogram, one `Vec` of `n_fft / 2 + 1` bins per frame
#[derive(Debug, Clone)]
pub struct Spectrogram {
    pub n_fft: usize,
    pub hop: usize,
    pub frames: Vec<Vec<f32>>,
}

impl Spectrogram {
    pub fn num_bins(&self) -> usize {
        self.n_fft / 2 + 1
    }

    pub fn num_frames(&self) -> usize {
        self.frames.len()
    }

    /// Center frequency of `bin` in Hz
    pub fn bin_frequency(&self, bin: usize, sample_rate: u32) -> f64 {
        bin as f64 * sample_rate as f64 / self.n_fft as f64
    }

    /// Mean magnitude over every bin of every frame
    pub fn mean_magnitude(&self) -> f64 {
        let count = self.num_frames() * self.num_bins();
        if count == 0 {
            return 0.0;
        }
        let total: f64 = self
            .frames
            .iter()
            .flat_map(|frame| frame.iter())
            .map(|&m| m as f64)
            .sum();
        total / count as f64
    }
}

pub fn hann_window(n: usize) -> Vec<f32> {
    (0..n)
        .map(|i| {
            let phase = 2.0 * std::f32::consts::PI * i as f32 / n as f32;
            0.5 * (1.0 - phase.cos())
        })
        .collect()
}

/// Number of centered frames for a signal of `len` samples
pub fn num_frames(len: usize, hop: usize) -> usize {
    if len == 0 {
        0
    } else {
        1 + len / hop
    }
}

/// Copy the centered frame `index` of `signal` into `out` (zero outside)
pub fn centered_frame(signal: &[f32], index: usize, hop: usize, out: &mut [f32]) {
    let n = out.len();
    let start = (index * hop) as isize - (n / 2) as isize;
    for (i, slot) in out.iter_mut().enumerate() {
        let pos = start + i as isize;
        *slot = if pos >= 0 && (pos as usize) < signal.len() {
            signal[pos as usize]
        } else {
            0.0
        };
    }
}

/// Compute the magnitude STFT of a mono signal
pub fn magnitude_stft(signal: &[f32], n_fft: usize, hop: usize) -> Result<Spectrogram> {
    let mut planner = RealFftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(n_fft);

    let window = hann_window(n_fft);
    let mut scratch = fft.make_scratch_vec();
    let mut frame_buf = vec![0.0f32; n_fft];
    let mut spectrum = fft.make_output_vec();

    let count = num_frames(signal.len(), hop);
    let mut frames = Vec::with_capacity(count);
    for t in 0..count {
        centered_frame(signal, t, hop, &mut frame_buf);
        for (sample, w) in frame_buf.iter_mut().zip(&window) {
            *sample *= w;
        }

        fft.process_with_scratch(&mut frame_buf, &mut spectrum, &mut scratch)
            .map_err(|e| anyhow!("FFT failed: {:?}", e))?;

        frames.push(spectrum.iter().map(|c| c.norm()).collect());
    }

    Ok(Spectrogram { n_fft, hop, frames })
}
