use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;
use thiserror::Error;

/// Default directory for uploaded documents.
pub const DEFAULT_UPLOAD_FOLDER: &str = "uploads";
/// Default pretrained summarization model.
pub const DEFAULT_SUMMARIZATION_MODEL: &str = "sshleifer/distilbart-cnn-12-6";
/// Revision pin applied to the default model.
pub const DEFAULT_SUMMARIZATION_MODEL_REVISION: &str = "a4f8f3e";
/// Default Hugging Face inference endpoint.
pub const DEFAULT_HF_INFERENCE_URL: &str = "https://api-inference.huggingface.co";
/// Default local Ollama runtime.
pub const DEFAULT_OLLAMA_URL: &str = "http://127.0.0.1:11434";

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

/// Runtime configuration for the Rusty Summary server.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Directory that receives uploaded PDFs.
    pub upload_folder: PathBuf,
    /// Backend used to run the summarization model.
    pub summarization_provider: SummarizationProvider,
    /// Model identifier passed to the provider.
    pub summarization_model: String,
    /// Optional revision pin for the model.
    pub summarization_model_revision: Option<String>,
    /// Base URL of the Hugging Face compatible inference endpoint.
    pub hf_inference_url: String,
    /// Optional bearer token for the inference endpoint.
    pub hf_api_token: Option<String>,
    /// Base URL of the Ollama runtime.
    pub ollama_url: String,
    /// Optional override for the HTTP server port.
    pub server_port: Option<u16>,
    /// Optional cap on the request body size; unlimited when absent.
    pub max_upload_bytes: Option<usize>,
}

/// Supported summarization backends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummarizationProvider {
    /// Hugging Face inference API (or a self-hosted server speaking the same protocol).
    HuggingFace,
    /// Local Ollama runtime.
    Ollama,
}

impl Config {
    /// Load configuration from environment variables, performing validation along the way.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            upload_folder: load_env_optional("UPLOAD_FOLDER")
                .unwrap_or_else(|| DEFAULT_UPLOAD_FOLDER.to_string())
                .into(),
            summarization_provider: load_env_optional("SUMMARIZATION_PROVIDER")
                .map(|value| {
                    value.parse().map_err(|()| {
                        ConfigError::InvalidValue("SUMMARIZATION_PROVIDER".to_string())
                    })
                })
                .transpose()?
                .unwrap_or(SummarizationProvider::HuggingFace),
            summarization_model: load_env_optional("SUMMARIZATION_MODEL")
                .unwrap_or_else(|| DEFAULT_SUMMARIZATION_MODEL.to_string()),
            summarization_model_revision: match env::var("SUMMARIZATION_MODEL_REVISION") {
                // An explicitly empty value removes the pin.
                Ok(value) if value.trim().is_empty() => None,
                Ok(value) => Some(value.trim().to_string()),
                Err(_) => Some(DEFAULT_SUMMARIZATION_MODEL_REVISION.to_string()),
            },
            hf_inference_url: load_env_optional("HF_INFERENCE_URL")
                .unwrap_or_else(|| DEFAULT_HF_INFERENCE_URL.to_string()),
            hf_api_token: load_env_optional("HF_API_TOKEN"),
            ollama_url: load_env_optional("OLLAMA_URL")
                .unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string()),
            server_port: parse_optional("SERVER_PORT")?,
            max_upload_bytes: parse_optional("MAX_UPLOAD_BYTES")?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            upload_folder: DEFAULT_UPLOAD_FOLDER.into(),
            summarization_provider: SummarizationProvider::HuggingFace,
            summarization_model: DEFAULT_SUMMARIZATION_MODEL.to_string(),
            summarization_model_revision: Some(DEFAULT_SUMMARIZATION_MODEL_REVISION.to_string()),
            hf_inference_url: DEFAULT_HF_INFERENCE_URL.to_string(),
            hf_api_token: None,
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            server_port: None,
            max_upload_bytes: None,
        }
    }
}

fn load_env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_optional<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    load_env_optional(key)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(key.to_string()))
        })
        .transpose()
}

impl std::str::FromStr for SummarizationProvider {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "huggingface" | "hf" => Ok(Self::HuggingFace),
            "ollama" => Ok(Self::Ollama),
            _ => Err(()),
        }
    }
}

/// Global configuration cache populated during process start.
pub static CONFIG: OnceLock<Config> = OnceLock::new();

/// Retrieve the loaded configuration, panicking if initialization has not occurred.
pub fn get_config() -> &'static Config {
    CONFIG.get().expect("Config not initialized")
}

/// Load configuration from the environment and install it in the global cache.
pub fn init_config() {
    dotenvy::dotenv().ok();
    let config = Config::from_env().expect("Failed to load config from environment");
    tracing::debug!(
        upload_folder = %config.upload_folder.display(),
        provider = ?config.summarization_provider,
        model = %config.summarization_model,
        revision = ?config.summarization_model_revision,
        server_port = ?config.server_port,
        "Loaded configuration"
    );
    CONFIG.set(config).expect("Failed to set config");
}
