//! Image-synthesis provider client
//!
//! Calls a Replicate-style prediction API synchronously (Prefer: wait) and
//! normalizes the loosely-shaped `output` field into a single image URL.

use super::{ImageModel, ProviderError};
use serde_json::{json, Value};

/// Client for the image-synthesis provider
#[derive(Debug, Clone)]
pub struct ReplicateClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl ReplicateClient {
    pub fn new(api_key: String, base_url: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url,
            model,
        }
    }
}

impl ImageModel for ReplicateClient {
    async fn generate_image(
        &self,
        prompt: &str,
        conditioning_image: Option<&str>,
    ) -> Result<String, ProviderError> {
        let url = format!(
            "{}/v1/models/{}/predictions",
            self.base_url.trim_end_matches('/'),
            self.model
        );

        let mut input = json!({
            "prompt": prompt,
            "num_outputs": 1,
            "aspect_ratio": "1:1",
            "output_format": "webp",
        });
        if let Some(image_ref) = conditioning_image {
            input["image"] = json!(image_ref);
        }

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Prefer", "wait")
            .json(&json!({ "input": input }))
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

        normalize_image_output(&payload["output"]).ok_or_else(|| {
            ProviderError::MalformedResponse("prediction output has no image reference".to_string())
        })
    }
}

/// Normalize the provider's output field into one image reference.
///
/// Accepted shapes: an array (first element is taken), a bare string, or an
/// object exposing `url` or `data`.
pub fn normalize_image_output(output: &Value) -> Option<String> {
    match output {
        Value::Array(items) => items.first().and_then(normalize_image_output),
        Value::String(url) if !url.is_empty() => Some(url.clone()),
        Value::Object(map) => map
            .get("url")
            .or_else(|| map.get("data"))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_array_takes_first() {
        let output = json!(["https://img.test/a.webp", "https://img.test/b.webp"]);
        assert_eq!(
            normalize_image_output(&output).as_deref(),
            Some("https://img.test/a.webp")
        );
    }

    #[test]
    fn test_normalize_bare_string() {
        let output = json!("https://img.test/solo.webp");
        assert_eq!(
            normalize_image_output(&output).as_deref(),
            Some("https://img.test/solo.webp")
        );
    }

    #[test]
    fn test_normalize_object_url() {
        let output = json!({"url": "https://img.test/obj.webp"});
        assert_eq!(
            normalize_image_output(&output).as_deref(),
            Some("https://img.test/obj.webp")
        );
    }

    #[test]
    fn test_normalize_object_data_fallback() {
        let output = json!({"data": "data:image/webp;base64,AAAA"});
        assert_eq!(
            normalize_image_output(&output).as_deref(),
            Some("data:image/webp;base64,AAAA")
        );
    }

    #[test]
    fn test_normalize_rejects_empty_shapes() {
        assert!(normalize_image_output(&json!(null)).is_none());
        assert!(normalize_image_output(&json!([])).is_none());
        assert!(normalize_image_output(&json!("")).is_none());
        assert!(normalize_image_output(&json!({"other": 1})).is_none());
    }

    #[test]
    fn test_normalize_nested_array_of_objects() {
        let output = json!([{"url": "https://img.test/nested.webp"}]);
        assert_eq!(
            normalize_image_output(&output).as_deref(),
            Some("https://img.test/nested.webp")
        );
    }
}
