//! Schema-constrained text/vision inference client
//!
//! Speaks an OpenAI-compatible chat-completions API and extracts a JSON array
//! of product entries from the completion text. The completion may wrap the
//! array in a markdown code fence or surrounding prose; extraction is lenient.

use super::{CatalogueModel, ProviderError};
use crate::models::ProductDescriptor;
use regex::Regex;
use serde_json::{json, Value};

/// Client for the catalogue-inference model
#[derive(Debug, Clone)]
pub struct InferenceClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl InferenceClient {
    pub fn new(api_key: String, base_url: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url,
            model,
        }
    }

    fn build_user_content(instruction: &str, image: Option<&str>) -> Value {
        match image {
            Some(image_ref) => json!([
                { "type": "text", "text": instruction },
                { "type": "image_url", "image_url": { "url": image_ref } },
            ]),
            None => json!(instruction),
        }
    }
}

impl CatalogueModel for InferenceClient {
    async fn infer_products(
        &self,
        instruction: &str,
        image: Option<&str>,
    ) -> Result<Vec<ProductDescriptor>, ProviderError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));

        let body = json!({
            "model": self.model,
            "messages": [
                {
                    "role": "system",
                    "content": "You output only JSON. Respond with a JSON array of product objects and nothing else.",
                },
                {
                    "role": "user",
                    "content": Self::build_user_content(instruction, image),
                },
            ],
            "temperature": 0.7,
        });

        let response = self
            .client
            .post(&url)
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

        let content = payload["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                ProviderError::MalformedResponse("completion has no text content".to_string())
            })?;

        parse_product_array(content)
    }
}

/// Extract and deserialize the first JSON array found in completion text.
///
/// Accepts a bare array, an array inside a ```json fence, or an array embedded
/// in prose. Anything else is a malformed response.
pub fn parse_product_array(content: &str) -> Result<Vec<ProductDescriptor>, ProviderError> {
    let trimmed = content.trim();

    if let Ok(products) = serde_json::from_str::<Vec<ProductDescriptor>>(trimmed) {
        return Ok(products);
    }

    let fence = Regex::new(r"```(?:json)?\s*\n([\s\S]*?)```").unwrap();
    if let Some(captures) = fence.captures(trimmed) {
        let block = captures.get(1).map(|m| m.as_str().trim()).unwrap_or("");
        if let Ok(products) = serde_json::from_str::<Vec<ProductDescriptor>>(block) {
            return Ok(products);
        }
    }

    if let (Some(start), Some(end)) = (trimmed.find('['), trimmed.rfind(']')) {
        if start < end {
            if let Ok(products) =
                serde_json::from_str::<Vec<ProductDescriptor>>(&trimmed[start..=end])
            {
                return Ok(products);
            }
        }
    }

    Err(ProviderError::MalformedResponse(
        "completion does not contain a product array".to_string(),
    ))
}
