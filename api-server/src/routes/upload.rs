//! Image upload endpoint

use axum::{extract::State, routing::post, Json, Router};
use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};
use serde::Serialize;
use tg_core::object::Upload;

use crate::error::ApiError;
use crate::payload::FormPayload;
use crate::state::AppState;

/// Standard alphabet, padding optional
const IMAGE_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub filename: String,
}

fn upload_from_payload(payload: FormPayload) -> Result<Upload, ApiError> {
    if let Some(file) = payload.file {
        return Ok(file);
    }

    let image = payload
        .field("image")
        .ok_or_else(|| ApiError::bad_request("No image provided"))?;
    let bytes = IMAGE_BASE64
        .decode(image.trim())
        .map_err(|e| ApiError::bad_request(format!("Invalid base64 image: {e}")))?;
    Ok(Upload::new(None, bytes))
}

/// POST /upload - Store a multipart `file` or a base64 `image`
async fn upload(
    State(state): State<AppState>,
    payload: FormPayload,
) -> Result<Json<UploadResponse>, ApiError> {
    let upload = upload_from_payload(payload)?;
    let filename = state
        .gateway()
        .upload(upload)
        .await
        .map_err(ApiError::from_core)?;

    Ok(Json(UploadResponse {
        message: "Upload successful".to_string(),
        filename,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/upload", post(upload))
}
