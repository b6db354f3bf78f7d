//! Mono resampling using rubato

use anyhow::{anyhow, Result};
use rubato::{FastFixedIn, PolynomialDegree, Resampler as RubatoResampler};
use tracing::debug;

/// Resample mono audio to `output_rate`
///
/// If the input is already at the output rate, returns a copy.
pub fn resample_mono(input: &[f32], input_rate: u32, output_rate: u32) -> Result<Vec<f32>> {
    if input_rate == output_rate || input.is_empty() {
        return Ok(input.to_vec());
    }
    if input_rate == 0 {
        return Err(anyhow!("Input sample rate is zero"));
    }

    debug!(input_rate, output_rate, frames = input.len(), "Resampling");

    // Whole signal as one chunk
    let mut resampler = FastFixedIn::<f32>::new(
        output_rate as f64 / input_rate as f64,
        1.0,
        PolynomialDegree::Septic,
        input.len(),
        1,
    )
    .map_err(|e| anyhow!("Failed to create resampler: {}", e))?;

    let planar_input = vec![input.to_vec()];
    let mut planar_output = resampler
        .process(&planar_input, None)
        .map_err(|e| anyhow!("Resampling failed: {}", e))?;

    let output = planar_output.pop().unwrap_or_default();
    debug!(output_frames = output.len(), "Resampled");
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_same_rate_is_copy() {
        let input = vec![0.1, 0.2, 0.3];
        assert_eq!(resample_mono(&input, 22050, 22050).unwrap(), input);
    }

    #[test]
    fn test_downsample_length() {
        let input: Vec<f32> = (0..44100)
            .map(|i| 0.5 * (2.0 * PI * 440.0 * i as f32 / 44100.0).sin())
            .collect();
        let output = resample_mono(&input, 44100, 22050).unwrap();
        let expected = 22050.0;
        assert!(
            (output.len() as f64 - expected).abs() / expected < 0.02,
            "got {} samples",
            output.len()
        );
        assert!(output.iter().all(|s| s.abs() <= 0.6));
    }

    #[test]
    fn test_upsample_length() {
        let input = vec![0.0f32; 8000];
        let output = resample_mono(&input, 8000, 22050).unwrap();
        assert!((output.len() as i64 - 22050).abs() < 500);
    }
}
