//! Reference-image upload endpoint
//!
//! Validates size and content type, persists the file under a random unique
//! name, and returns the public URL the chat request can reference later.

use super::{bad_request, internal_error};
use crate::models::UploadResponse;
use crate::server::ServerAppState;
use axum::{
    extract::{Multipart, State},
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

/// 10 MiB upload ceiling; bytes are read fully into memory before the write
const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

const ALLOWED_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/svg+xml",
];

pub async fn upload_handler(
    State(state): State<ServerAppState>,
    mut multipart: Multipart,
) -> Response {
    let mut file: Option<(String, String, Vec<u8>)> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return bad_request(format!("Malformed multipart field: {}", e)),
        };

        if field.name() != Some("file") {
            continue;
        }

        let name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let data = match field.bytes().await {
            Ok(data) => data.to_vec(),
            Err(e) => return bad_request(format!("Unreadable file field: {}", e)),
        };

        file = Some((name, content_type, data));
        break;
    }

    let Some((name, content_type, data)) = file else {
        return bad_request("No file found");
    };

    if data.len() > MAX_FILE_SIZE {
        return bad_request("File size too large. Maximum size is 10MB");
    }

    if !ALLOWED_TYPES.contains(&content_type.as_str()) {
        return bad_request("Invalid file type. Only images are allowed");
    }

    let extension = name.rsplit('.').next().filter(|ext| !ext.is_empty() && *ext != name).unwrap_or("png");
    let unique_name = format!("{}.{}", Uuid::new_v4(), extension);
    let file_path = state.config.upload_dir.join(&unique_name);

    if let Err(e) = tokio::fs::create_dir_all(&state.config.upload_dir).await {
        log::error!("Failed to create upload directory: {}", e);
        return internal_error("Failed to upload file", e.to_string());
    }

    if let Err(e) = tokio::fs::write(&file_path, &data).await {
        log::error!("Failed to write upload {:?}: {}", file_path, e);
        return internal_error("Failed to upload file", e.to_string());
    }

    log::info!("File uploaded: {} ({} bytes)", unique_name, data.len());

    let url = format!(
        "{}/uploads/{}",
        state.config.public_base_url.trim_end_matches('/'),
        unique_name
    );

    Json(UploadResponse {
        message: "File uploaded successfully".to_string(),
        url,
        name,
        content_type,
        size: data.len(),
        ready: true,
    })
    .into_response()
}
