use anyhow::{Context, Result};

const DEFAULT_EXTRACTION_SERVICE_URL: &str = "http://localhost:5001";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    /// Override for the Gemini endpoint (proxies, local mocks).
    pub gemini_base_url: Option<String>,
    pub jwt_secret: String,
    pub extraction_service_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            gemini_base_url: std::env::var("GEMINI_BASE_URL").ok(),
            jwt_secret: require_env("JWT_SECRET")?,
            extraction_service_url: std::env::var("EXTRACTION_SERVICE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_EXTRACTION_SERVICE_URL.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
