//! The store-generation pipeline
//!
//! One chat turn flows attachment normalization -> catalogue synthesis ->
//! image synthesis -> catalogue serialization -> prompt composition -> the
//! code-generation backend. Provider failures in the catalogue and image
//! stages are absorbed by fallbacks; only the final generation call can fail.

pub mod attachments;
pub mod catalogue;
pub mod images;
pub mod prompt;
pub mod serializer;

pub use attachments::{normalize_attachments, AttachmentInput};
pub use catalogue::Synthesized;
pub use prompt::ComposedPrompt;

use crate::models::{ChatResponse, GenerationRequest, ModelConfig};
use crate::providers::{CatalogueModel, ImageModel, ProviderError, SiteGenerator};

/// Dispatch a generation request to the backend, choosing create vs continue
/// on chat-id presence
pub async fn generate<G: SiteGenerator>(
    generator: &G,
    request: &GenerationRequest,
) -> Result<ChatResponse, ProviderError> {
    match request.chat_id.as_deref() {
        Some(chat_id) => {
            generator
                .send_message(chat_id, &request.composed_prompt, &request.model_config)
                .await
        }
        None => {
            generator
                .create_chat(
                    request.system.as_deref(),
                    &request.composed_prompt,
                    &request.model_config,
                )
                .await
        }
    }
}

/// Run one full store-generation turn.
///
/// The catalogue and image stages never fail; the backend generation call is
/// the one stage with no fallback and its error is surfaced to the caller.
pub async fn run_turn<C, I, G>(
    catalogue_model: &C,
    image_model: &I,
    generator: &G,
    model_config: &ModelConfig,
    user_message: &str,
    chat_id: Option<&str>,
    attachment_inputs: &[AttachmentInput],
) -> Result<ChatResponse, ProviderError>
where
    C: CatalogueModel,
    I: ImageModel,
    G: SiteGenerator,
{
    let image_ref = normalize_attachments(attachment_inputs);

    let synthesized = catalogue::synthesize(catalogue_model, user_message, image_ref.as_deref()).await;
    if synthesized.is_fallback() {
        log::info!("Turn continues with the fallback catalogue");
    }
    let products = synthesized.into_inner();

    let catalogue = images::synthesize_images(image_model, products, image_ref.as_deref()).await;
    log::info!(
        "Catalogue ready: {} products, {} with generated imagery",
        catalogue.total_products,
        catalogue
            .products
            .iter()
            .filter(|p| p.image_url.as_deref() != Some(crate::templates::PLACEHOLDER_IMAGE_URL))
            .count()
    );

    let serialized = serializer::serialize_catalogue(&catalogue);
    let composed = prompt::compose(user_message, &serialized, chat_id.is_some());

    let request = GenerationRequest {
        chat_id: chat_id.map(|s| s.to_string()),
        user_message: user_message.to_string(),
        composed_prompt: composed.message,
        system: composed.system,
        model_config: model_config.clone(),
    };

    let response = generate(generator, &request).await?;
    log::info!(
        "Generation complete: chat {} with {} files",
        response.id,
        response.files.len()
    );
    Ok(response)
}
