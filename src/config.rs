//! Configuration management for the Document Q&A server

use std::env;

/// Display name used in the startup banner and the welcome payload
pub const APP_NAME: &str = "AI Document Q&A Service";

/// Service version reported by `/` and `/health`
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Value shipped in `.env.example`; never a real credential
pub const PLACEHOLDER_API_KEY: &str = "your_groq_api_key_here";

const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_MAX_FILE_SIZE_MB: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub inference: InferenceConfig,
    pub upload: UploadConfig,
    /// Expose internal error details in response bodies
    pub debug: bool,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct InferenceConfig {
    /// `None` when unset or empty
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub max_file_size_mb: u64,
}

impl UploadConfig {
    /// Upper bound accepted by `validate`, in bytes
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb * 1024 * 1024
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: DEFAULT_PORT,
            },
            inference: InferenceConfig {
                api_key: None,
                model: DEFAULT_MODEL.to_string(),
                base_url: DEFAULT_BASE_URL.to_string(),
            },
            upload: UploadConfig {
                max_file_size_mb: DEFAULT_MAX_FILE_SIZE_MB,
            },
            debug: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_or("SERVER_PORT", DEFAULT_PORT),
            },
            inference: InferenceConfig {
                api_key: env::var("GROQ_API_KEY")
                    .ok()
                    .filter(|key| !key.trim().is_empty()),
                model: env::var("GROQ_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
                base_url: env::var("GROQ_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            },
            upload: UploadConfig {
                max_file_size_mb: parse_or("MAX_FILE_SIZE_MB", DEFAULT_MAX_FILE_SIZE_MB),
            },
            debug: env::var("DEBUG")
                .map(|v| parse_bool(&v))
                .unwrap_or(false),
        }
    }
}

fn parse_or<T: std::str::FromStr + std::fmt::Display>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid value for {}: {:?}, using {}", name, raw, default);
            default
        }),
        Err(_) => default,
    }
}

fn parse_bool(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("true")
}
