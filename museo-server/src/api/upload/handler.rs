//! Image Upload Handler
//!
//! Accepts room images from authenticated users. Uploads are validated by
//! decoding, recompressed to JPEG and stored under a generated name.

use axum::Json;
use axum::extract::{Extension, Multipart, State};
use serde::Serialize;
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// Maximum file size (5MB)
const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Supported image formats
const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// JPEG quality for stored room images
const JPEG_QUALITY: u8 = 85;

/// Upload response
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub file_id: String,
    pub filename: String,
    pub original_name: String,
    pub size: usize,
    pub format: String,
    pub url: String,
}

/// Validate an uploaded image
fn validate_image(data: &[u8], ext: &str) -> Result<(), AppError> {
    if data.len() > MAX_FILE_SIZE {
        return Err(AppError::validation(format!(
            "File too large. Maximum size is {} bytes ({}MB)",
            MAX_FILE_SIZE,
            MAX_FILE_SIZE / 1024 / 1024
        )));
    }

    let ext_lower = ext.to_lowercase();
    if !SUPPORTED_FORMATS.contains(&ext_lower.as_str()) {
        return Err(AppError::validation(format!(
            "Unsupported file format '{}'. Supported: {}",
            ext_lower,
            SUPPORTED_FORMATS.join(", ")
        )));
    }

    // Verify it is actually an image by trying to decode it
    if let Err(e) = image::load_from_memory(data) {
        return Err(AppError::validation(format!(
            "Invalid image file ({}): {}",
            ext_lower, e
        )));
    }

    Ok(())
}

/// Recompress the image as JPEG
fn compress_image(data: &[u8]) -> Result<Vec<u8>, AppError> {
    let img = image::load_from_memory(data)
        .map_err(|e| AppError::validation(format!("Invalid image: {}", e)))?;

    let mut buffer = Vec::new();
    {
        let mut cursor = Cursor::new(&mut buffer);
        let rgb_img = img.to_rgb8();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
        rgb_img
            .write_with_encoder(encoder)
            .map_err(|e| AppError::internal(format!("Failed to compress image: {}", e)))?;
    }

    Ok(buffer)
}

/// POST /api/image/upload - upload a room image
pub async fn upload(
    State(state): State<ServerState>,
    Extension(_current_user): Extension<CurrentUser>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let images_dir = state.uploads_dir();
    fs::create_dir_all(&images_dir)
        .map_err(|e| AppError::internal(format!("Failed to create images directory: {}", e)))?;

    // Find the file field
    let mut field_data: Option<Vec<u8>> = None;
    let mut original_filename = None;

    while let Some(f) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart request: {}", e)))?
    {
        let name = f.name().map(|s| s.to_string());
        if name.as_deref() == Some("file") || name.as_deref() == Some("") {
            original_filename = f.file_name().map(|s| s.to_string());
            field_data = Some(
                f.bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Multipart error: {}", e)))?
                    .to_vec(),
            );
            break;
        }
    }

    let data = field_data.ok_or_else(|| {
        AppError::validation("No 'file' field found. Field name must be 'file'".to_string())
    })?;

    let filename = original_filename
        .ok_or_else(|| AppError::validation("No filename provided in file field".to_string()))?;

    if data.is_empty() {
        return Err(AppError::validation("Empty file provided".to_string()));
    }

    let ext = PathBuf::from(&filename)
        .extension()
        .and_then(|ext| ext.to_str().map(|s| s.to_string()))
        .ok_or_else(|| AppError::validation(format!("Invalid file extension for: {}", filename)))?;

    validate_image(&data, &ext)?;

    let compressed_data = compress_image(&data)?;

    // Generate a unique filename
    let file_id = Uuid::new_v4().to_string();
    let new_filename = format!("{}.jpg", file_id);
    let file_path = images_dir.join(&new_filename);

    fs::write(&file_path, &compressed_data)
        .map_err(|e| AppError::internal(format!("Failed to save file: {}", e)))?;

    tracing::info!(
        original_name = %filename,
        size = %compressed_data.len(),
        "Image uploaded successfully"
    );

    let url = format!("/api/image/{}", new_filename);
    let response = UploadResponse {
        file_id,
        filename: new_filename,
        original_name: filename,
        size: compressed_data.len(),
        format: "jpg".to_string(),
        url,
    };

    Ok(Json(response))
}
