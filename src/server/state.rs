//! Server application state shared across handlers

use crate::config::ServerConfig;
use crate::providers::{InferenceClient, ReplicateClient, SiteGenClient};
use std::sync::Arc;

/// Shared state for the server: the loaded configuration plus one client per
/// external provider, constructed once at startup.
#[derive(Clone)]
pub struct ServerAppState {
    pub config: Arc<ServerConfig>,

    /// Catalogue-inference client
    pub catalogue_model: Arc<InferenceClient>,

    /// Image-synthesis client
    pub image_model: Arc<ReplicateClient>,

    /// Code-generation backend client
    pub generator: Arc<SiteGenClient>,
}

impl ServerAppState {
    pub fn new(config: ServerConfig) -> Self {
        let catalogue_model = Arc::new(InferenceClient::new(
            config.inference_api_key.clone(),
            config.inference_base_url.clone(),
            config.inference_model.clone(),
        ));
        let image_model = Arc::new(ReplicateClient::new(
            config.replicate_api_key.clone(),
            config.replicate_base_url.clone(),
            config.image_model.clone(),
        ));
        let generator = Arc::new(SiteGenClient::new(
            config.sitegen_api_key.clone(),
            config.sitegen_base_url.clone(),
        ));

        Self {
            config: Arc::new(config),
            catalogue_model,
            image_model,
            generator,
        }
    }
}
