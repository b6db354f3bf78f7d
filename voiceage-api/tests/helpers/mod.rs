//! Test Helper Utilities
//!
//! Shared utilities for testing voiceage-api

#![allow(dead_code)]

pub mod audio_generator;
pub mod multipart;

pub use audio_generator::{tone_wav, ToneConfig};
pub use multipart::{analyze_request, MultipartBody};
