//! Code-generation backend client
//!
//! Thin wrapper over the hosted site-generation API. The only local logic is
//! choosing between the "create chat" and "continue chat" operations and
//! normalizing the response into `{id, demo, files[]}`.

use super::{ProviderError, SiteGenerator};
use crate::models::{ChatResponse, ModelConfig, RawGeneratedFile};
use serde_json::{json, Value};

/// Client for the external code-generation backend
#[derive(Debug, Clone)]
pub struct SiteGenClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl SiteGenClient {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url,
        }
    }

    async fn post_chat(&self, url: &str, body: Value) -> Result<ChatResponse, ProviderError> {
        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(ProviderError::transport)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api { status, message });
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        parse_chat_response(&payload)
    }
}

impl SiteGenerator for SiteGenClient {
    async fn create_chat(
        &self,
        system: Option<&str>,
        message: &str,
        model_config: &ModelConfig,
    ) -> Result<ChatResponse, ProviderError> {
        let url = format!("{}/chats", self.base_url.trim_end_matches('/'));

        let mut body = json!({
            "message": message,
            "modelConfiguration": model_config,
        });
        if let Some(system) = system {
            body["system"] = json!(system);
        }

        self.post_chat(&url, body).await
    }

    async fn send_message(
        &self,
        chat_id: &str,
        message: &str,
        model_config: &ModelConfig,
    ) -> Result<ChatResponse, ProviderError> {
        let url = format!(
            "{}/chats/{}/messages",
            self.base_url.trim_end_matches('/'),
            chat_id
        );

        let body = json!({
            "message": message,
            "modelConfiguration": model_config,
        });

        self.post_chat(&url, body).await
    }
}

/// Normalize a backend chat payload into `ChatResponse`.
///
/// The demo URL arrives as either `demo` or `demoUrl`; `files` may be absent.
pub fn parse_chat_response(payload: &Value) -> Result<ChatResponse, ProviderError> {
    let id = payload["id"]
        .as_str()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ProviderError::MalformedResponse("chat response has no id".to_string()))?
        .to_string();

    let demo = payload["demo"]
        .as_str()
        .or_else(|| payload["demoUrl"].as_str())
        .unwrap_or("")
        .to_string();

    let files: Vec<RawGeneratedFile> = match payload.get("files") {
        Some(files_value) if !files_value.is_null() => {
            serde_json::from_value(files_value.clone())
                .map_err(|e| ProviderError::MalformedResponse(format!("bad files list: {}", e)))?
        }
        _ => Vec::new(),
    };

    Ok(ChatResponse { id, demo, files })
}
