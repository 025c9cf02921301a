// Process-wide configuration, loaded once at startup
//
// Provider credentials come from environment variables first, with a
// fallback to ~/.trendpop/secrets.toml (global only, not project-level).
// Templates and the model configuration are fixed at startup and never
// re-derived per request.

use crate::models::ModelConfig;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Secrets stored in ~/.trendpop/secrets.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SecretsConfig {
    /// API tokens indexed by provider ID (e.g., "replicate" -> "r8_...")
    #[serde(default)]
    pub api_tokens: HashMap<String, String>,
}

impl SecretsConfig {
    /// Get the secrets file path (~/.trendpop/secrets.toml)
    pub fn get_secrets_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".trendpop").join("secrets.toml"))
    }

    /// Load secrets from disk; missing file is not an error
    pub fn load() -> Result<Self> {
        let path =
            Self::get_secrets_path().ok_or_else(|| anyhow!("Could not determine home directory"))?;
        Self::load_from(&path)
    }

    /// Load secrets from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read secrets file '{}': {}", path.display(), e))?;

        let config: SecretsConfig = toml::from_str(&contents)
            .map_err(|e| anyhow!("Failed to parse secrets file '{}': {}", path.display(), e))?;

        Ok(config)
    }
}

/// Runtime configuration for the server and all provider clients
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Catalogue-inference provider (OpenAI-compatible chat completions)
    pub inference_api_key: String,
    pub inference_base_url: String,
    pub inference_model: String,

    /// Image-synthesis provider
    pub replicate_api_key: String,
    pub replicate_base_url: String,
    pub image_model: String,

    /// Code-generation backend
    pub sitegen_api_key: String,
    pub sitegen_base_url: String,

    /// Directory uploaded reference images are persisted under
    pub upload_dir: PathBuf,
    /// Base URL uploaded files are served from
    pub public_base_url: String,

    /// Fixed model configuration forwarded to the backend
    pub model_config: ModelConfig,
}

impl ServerConfig {
    /// Load configuration from the environment, falling back to secrets.toml
    /// for provider credentials. Missing credentials are tolerated at startup
    /// (the corresponding provider calls will fail and be absorbed by the
    /// pipeline's fallbacks where those exist).
    pub fn load() -> Result<Self> {
        let secrets = match SecretsConfig::load() {
            Ok(secrets) => secrets,
            Err(e) => {
                log::warn!("Could not load secrets file: {}", e);
                SecretsConfig::default()
            }
        };

        let token = |env_name: &str, secret_id: &str| -> String {
            env::var(env_name)
                .ok()
                .filter(|v| !v.is_empty())
                .or_else(|| secrets.api_tokens.get(secret_id).cloned())
                .unwrap_or_else(|| {
                    log::warn!(
                        "No credential for provider {:?} ({} unset and not in secrets.toml)",
                        secret_id,
                        env_name
                    );
                    String::new()
                })
        };

        Ok(Self {
            inference_api_key: token("INFERENCE_API_KEY", "inference"),
            inference_base_url: env_or("INFERENCE_BASE_URL", "https://api.openai.com/v1"),
            inference_model: env_or("INFERENCE_MODEL", "gpt-4o-mini"),

            replicate_api_key: token("REPLICATE_API_KEY", "replicate"),
            replicate_base_url: env_or("REPLICATE_BASE_URL", "https://api.replicate.com"),
            image_model: env_or("IMAGE_MODEL", "black-forest-labs/flux-schnell"),

            sitegen_api_key: token("V0_API_KEY", "v0"),
            sitegen_base_url: env_or("V0_BASE_URL", "https://api.v0.dev/v1"),

            upload_dir: PathBuf::from(env_or("UPLOAD_DIR", "public/uploads")),
            public_base_url: env_or("PUBLIC_BASE_URL", "http://localhost:3000"),

            model_config: ModelConfig::default(),
        })
    }
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}
