//! Single-asset image regeneration endpoint
//!
//! Forwards a constrained "regenerate exactly one asset" instruction as a
//! continuation of the existing backend session.

use super::{bad_request, internal_error};
use crate::models::RegenerateRequest;
use crate::pipeline::prompt::compose_regeneration;
use crate::server::ServerAppState;
use crate::providers::SiteGenerator;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};

pub async fn regenerate_handler(
    State(state): State<ServerAppState>,
    Json(body): Json<RegenerateRequest>,
) -> Response {
    let (Some(chat_id), Some(file_path), Some(prompt)) = (
        body.chat_id.filter(|v| !v.is_empty()),
        body.file_path.filter(|v| !v.is_empty()),
        body.prompt.filter(|v| !v.is_empty()),
    ) else {
        return bad_request("chatId, filePath, and prompt are required");
    };

    let size = body.size.unwrap_or_else(|| "1024x1024".to_string());
    let format = body.format.unwrap_or_else(|| "png".to_string());

    let message = compose_regeneration(&file_path, &prompt, &size, &format);
    log::info!("Regenerating asset {} in chat {}", file_path, chat_id);

    match state
        .generator
        .send_message(&chat_id, &message, &state.config.model_config)
        .await
    {
        Ok(response) => Json(response).into_response(),
        Err(err) => {
            log::error!("Asset regeneration failed: {}", err);
            internal_error("Failed to regenerate image", err.to_string())
        }
    }
}
