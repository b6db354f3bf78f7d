//! In-memory WAV synthesis for upload tests

use std::io::Cursor;

/// Configuration for a generated tone
#[derive(Debug, Clone)]
pub struct ToneConfig {
    pub frequency_hz: f32,
    pub amplitude: f32,
    pub duration_seconds: f64,
    pub sample_rate: u32,
    pub channels: u16,
    /// Silence before the tone starts
    pub lead_in_seconds: f64,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            frequency_hz: 200.0,
            amplitude: 0.5,
            duration_seconds: 2.0,
            sample_rate: 44100,
            channels: 1,
            lead_in_seconds: 0.0,
        }
    }
}

/// Encode a sine tone as 16-bit PCM WAV bytes
pub fn tone_wav(config: &ToneConfig) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: config.channels,
        sample_rate: config.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut bytes = Vec::new();
    {
        let mut writer = hound::WavWriter::new(Cursor::new(&mut bytes), spec).unwrap();
        let lead_in = (config.lead_in_seconds * config.sample_rate as f64) as usize;
        let tone = (config.duration_seconds * config.sample_rate as f64) as usize;

        for i in 0..lead_in + tone {
            let sample = if i < lead_in {
                0
            } else {
                let t = (i - lead_in) as f32 / config.sample_rate as f32;
                let value = config.amplitude * (2.0 * std::f32::consts::PI * config.frequency_hz * t).sin();
                (value * i16::MAX as f32) as i16
            };
            for _ in 0..config.channels {
                writer.write_sample(sample).unwrap();
            }
        }
        writer.finalize().unwrap();
    }
    bytes
}
