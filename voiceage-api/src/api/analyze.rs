//! Voice analysis endpoint
//!
//! POST /api/analyze accepts a multipart form with a `gender` text field and
//! an `audio` file part. Decoding and feature extraction are CPU-bound and
//! run on the blocking pool.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{debug, info, warn};
use voiceage_core::{AnalysisInput, AnalysisResult, Gender};

use crate::{
    audio::load_waveform,
    error::{ApiError, ApiResult},
    features::extract_features,
    AppState,
};

pub const EMPTY_UPLOAD_MESSAGE: &str = "오디오 파일이 비어 있습니다.";
pub const MISSING_GENDER_MESSAGE: &str = "성별(gender) 값이 필요합니다.";

/// Uploaded form fields
#[derive(Debug, Default)]
struct AnalyzeForm {
    gender: Option<Gender>,
    audio: Option<Vec<u8>>,
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(err.body_text())
    } else {
        ApiError::BadRequest(err.body_text())
    }
}

/// Accept `audio/*`, `application/octet-stream`, or no declared type
fn check_content_type(content_type: Option<&str>) -> ApiResult<()> {
    match content_type {
        None => Ok(()),
        Some(ct) if ct.starts_with("audio/") || ct == "application/octet-stream" => Ok(()),
        Some(ct) => Err(ApiError::UnsupportedMedia(format!(
            "지원하지 않는 콘텐츠 타입입니다: {}",
            ct
        ))),
    }
}

async fn read_form(mut multipart: Multipart) -> ApiResult<AnalyzeForm> {
    let mut form = AnalyzeForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "gender" => {
                let value = field.text().await.map_err(multipart_error)?;
                form.gender = Some(Gender::from_form(value.trim()));
            }
            "audio" => {
                check_content_type(field.content_type())?;
                let bytes = field.bytes().await.map_err(multipart_error)?;
                form.audio = Some(bytes.to_vec());
            }
            other => debug!(field = other, "Ignoring unknown form field"),
        }
    }

    Ok(form)
}

/// POST /api/analyze
pub async fn analyze_voice(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Json<AnalysisResult>> {
    let form = read_form(multipart).await?;

    let gender = form
        .gender
        .ok_or_else(|| ApiError::BadRequest(MISSING_GENDER_MESSAGE.to_string()))?;
    let audio = match form.audio {
        Some(bytes) if !bytes.is_empty() => bytes,
        _ => return Err(ApiError::BadRequest(EMPTY_UPLOAD_MESSAGE.to_string())),
    };

    let limit = state.limits.max_upload_bytes;
    if audio.len() > limit {
        warn!(size = audio.len(), limit, "Upload over size limit");
        return Err(ApiError::PayloadTooLarge(format!(
            "파일이 너무 큽니다(≤ {}MB).",
            limit / (1024 * 1024)
        )));
    }

    info!(size = audio.len(), gender = ?gender, "Analyzing upload");

    let analyzer = state.analyzer;
    let limits = state.limits;
    let result = tokio::task::spawn_blocking(move || -> ApiResult<AnalysisResult> {
        let waveform = load_waveform(&audio, &limits)?;
        let features = extract_features(&waveform.samples, waveform.sample_rate)?;
        let input = AnalysisInput {
            features,
            samples: &waveform.samples,
            sample_rate: waveform.sample_rate,
            raw_bytes: &audio,
            gender,
        };
        Ok(analyzer.analyze(&input)?)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Analysis task failed: {}", e)))??;

    Ok(Json(result))
}

/// Build analysis routes
pub fn analyze_routes() -> Router<AppState> {
    Router::new().route("/api/analyze", post(analyze_voice))
}
