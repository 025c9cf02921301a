//! Core data model for the storefront generation pipeline
//!
//! Wire formats are camelCase to match the browser client and the
//! code-generation backend; internal fields follow Rust naming.

use serde::{Deserialize, Serialize};

/// A single product entry in the synthesized catalogue
///
/// Immutable once created, except for `image_url` which is attached by the
/// image synthesizer. `id` is the 1-based position in the catalogue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDescriptor {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub estimated_price: String,
    #[serde(default)]
    pub image_prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// The product catalogue for one store-generation turn
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalogue {
    pub products: Vec<ProductDescriptor>,
    pub total_products: usize,
    pub categories: Vec<String>,
}

impl Catalogue {
    /// Build a catalogue from a product list.
    ///
    /// `total_products` always equals the product count; the category taxonomy
    /// is not used downstream, so every catalogue carries the single "Custom"
    /// category.
    pub fn new(products: Vec<ProductDescriptor>) -> Self {
        let total_products = products.len();
        Self {
            products,
            total_products,
            categories: vec!["Custom".to_string()],
        }
    }
}

/// Fixed model configuration forwarded to the code-generation backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfig {
    pub model_id: String,
    pub image_generations: bool,
    pub thinking: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_id: "v0-gpt-5".to_string(),
            image_generations: true,
            thinking: false,
        }
    }
}

/// One outbound generation turn
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Present => continuation of an existing backend session
    pub chat_id: Option<String>,
    pub user_message: String,
    /// Fully composed message (template + catalogue + user request)
    pub composed_prompt: String,
    /// System persona; only sent when opening a new session
    pub system: Option<String>,
    pub model_config: ModelConfig,
}

/// A generated file record as returned by the code-generation backend.
///
/// The backend emits two shapes: `{path, content, lang}` for source files and
/// `{meta: {file, url}, source}` for binary assets. Every field is optional
/// and must be resolved defensively (see `artifacts`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawGeneratedFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<FileMeta>,
}

/// Metadata block on asset-shaped file records
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Normalized response from the code-generation backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub id: String,
    pub demo: String,
    #[serde(default)]
    pub files: Vec<RawGeneratedFile>,
}

/// Body of `POST /api/chat` (JSON variant)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub chat_id: Option<String>,
    #[serde(default)]
    pub attachments: Option<Vec<AttachmentRecord>>,
}

/// A previously uploaded attachment referenced from a JSON chat request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentRecord {
    pub url: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub content_type: String,
}

/// Response of `POST /api/files/upload`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: String,
    pub url: String,
    pub name: String,
    pub content_type: String,
    pub size: usize,
    /// Ready for product generation when the chat message is sent
    pub ready: bool,
}

/// Body of `POST /api/images/regenerate`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegenerateRequest {
    #[serde(default)]
    pub chat_id: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
}

/// Generic error body returned by all endpoints
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}
