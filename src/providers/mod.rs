// External service clients: catalogue inference, image synthesis, and the
// code-generation backend.

mod inference;
mod replicate;
mod sitegen;

pub use inference::InferenceClient;
pub use replicate::{normalize_image_output, ReplicateClient};
pub use sitegen::SiteGenClient;

use crate::models::{ChatResponse, ModelConfig, ProductDescriptor};

/// Error raised by any of the external providers
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("provider API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
}

impl ProviderError {
    pub fn transport(err: reqwest::Error) -> Self {
        ProviderError::Transport(err.to_string())
    }
}

/// Schema-constrained catalogue inference seam
#[allow(async_fn_in_trait)]
pub trait CatalogueModel {
    /// Request a JSON array of product entries for the given instruction,
    /// optionally conditioned on a reference image (URL or data URL).
    async fn infer_products(
        &self,
        instruction: &str,
        image: Option<&str>,
    ) -> Result<Vec<ProductDescriptor>, ProviderError>;
}

/// Image synthesis seam
#[allow(async_fn_in_trait)]
pub trait ImageModel {
    /// Generate one image for the prompt, returning a dereferenceable URL
    /// (or data URL), optionally conditioned on a reference image.
    async fn generate_image(
        &self,
        prompt: &str,
        conditioning_image: Option<&str>,
    ) -> Result<String, ProviderError>;
}

/// Code-generation backend seam
#[allow(async_fn_in_trait)]
pub trait SiteGenerator {
    /// Open a new backend session with the system persona and first message
    async fn create_chat(
        &self,
        system: Option<&str>,
        message: &str,
        model_config: &ModelConfig,
    ) -> Result<ChatResponse, ProviderError>;

    /// Continue an existing backend session
    async fn send_message(
        &self,
        chat_id: &str,
        message: &str,
        model_config: &ModelConfig,
    ) -> Result<ChatResponse, ProviderError>;
}
