//! voiceage-api library interface
//!
//! HTTP front end for the voice personality classifier: upload handling,
//! audio decoding, feature extraction and the JSON surface. Exposed as a
//! library so integration tests can drive the router in-process.

pub mod api;
pub mod audio;
pub mod config;
pub mod error;
pub mod features;

pub use crate::error::{ApiError, ApiResult};

use axum::{extract::DefaultBodyLimit, Router};
use chrono::{DateTime, Utc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use voiceage_core::VoiceAnalyzer;

use crate::config::{Config, CorsConfig, LimitsConfig};

/// Room for multipart boundaries and the gender field on top of the audio
/// size limit
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub analyzer: VoiceAnalyzer,
    pub limits: LimitsConfig,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(analyzer: VoiceAnalyzer, limits: LimitsConfig) -> Self {
        Self {
            analyzer,
            limits,
            startup_time: Utc::now(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(VoiceAnalyzer::new(config.scoring), config.limits)
    }
}

/// Build application router
pub fn build_router(state: AppState, cors: &CorsConfig) -> Router {
    let body_limit = state.limits.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    let router = Router::new()
        .merge(api::health_routes())
        .merge(api::analyze_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if cors.allow_any_origin {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
