//! Chat endpoint: one full store-generation turn
//!
//! Accepts either `application/json` `{message, chatId?, attachments?}` or
//! `multipart/form-data` with `message`, `chatId`, and repeated `files`
//! fields. Both shapes collapse to the same turn input before the pipeline
//! runs.

use super::{bad_request, internal_error};
use crate::models::ChatRequest;
use crate::pipeline::{self, AttachmentInput};
use crate::server::ServerAppState;
use crate::templates;
use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
    Json,
};

/// Canonical turn input after content-type branching
struct TurnInput {
    message: String,
    chat_id: Option<String>,
    attachments: Vec<AttachmentInput>,
}

pub async fn chat_handler(State(state): State<ServerAppState>, request: Request) -> Response {
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|ct| ct.starts_with("multipart/form-data"))
        .unwrap_or(false);

    let turn = if is_multipart {
        match parse_multipart(request).await {
            Ok(turn) => turn,
            Err(response) => return response,
        }
    } else {
        match Json::<ChatRequest>::from_request(request, &()).await {
            Ok(Json(body)) => TurnInput {
                message: body.message.unwrap_or_default(),
                chat_id: body.chat_id.filter(|id| !id.is_empty()),
                attachments: body
                    .attachments
                    .unwrap_or_default()
                    .into_iter()
                    .map(AttachmentInput::Record)
                    .collect(),
            },
            Err(e) => return bad_request(format!("Invalid request body: {}", e)),
        }
    };

    if turn.message.trim().is_empty() && turn.attachments.is_empty() {
        return bad_request("Message is required");
    }

    log::info!(
        "Chat turn: {} chars, chat_id={:?}, {} attachment(s)",
        turn.message.len(),
        turn.chat_id,
        turn.attachments.len()
    );

    match pipeline::run_turn(
        state.catalogue_model.as_ref(),
        state.image_model.as_ref(),
        state.generator.as_ref(),
        &state.config.model_config,
        &turn.message,
        turn.chat_id.as_deref(),
        &turn.attachments,
    )
    .await
    {
        Ok(response) => Json(response).into_response(),
        Err(err) => {
            log::error!("Store generation failed: {}", err);
            internal_error(templates::GENERATION_FAILED_MESSAGE, err.to_string())
        }
    }
}

async fn parse_multipart(request: Request) -> Result<TurnInput, Response> {
    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|e| bad_request(format!("Invalid multipart body: {}", e)))?;

    let mut message = String::new();
    let mut chat_id: Option<String> = None;
    let mut attachments = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(format!("Malformed multipart field: {}", e)))?
    {
        match field.name().unwrap_or_default() {
            "message" => {
                message = field
                    .text()
                    .await
                    .map_err(|e| bad_request(format!("Unreadable message field: {}", e)))?;
            }
            "chatId" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| bad_request(format!("Unreadable chatId field: {}", e)))?;
                if !value.is_empty() {
                    chat_id = Some(value);
                }
            }
            "files" => {
                let name = field.file_name().unwrap_or("attachment").to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| bad_request(format!("Unreadable file field: {}", e)))?;
                attachments.push(AttachmentInput::Bytes {
                    data: data.to_vec(),
                    content_type,
                    name,
                });
            }
            other => {
                log::debug!("Ignoring unknown multipart field {:?}", other);
            }
        }
    }

    Ok(TurnInput {
        message,
        chat_id,
        attachments,
    })
}
