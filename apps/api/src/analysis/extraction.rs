//! Skill Extraction Client: asks the extraction service which skills a resume shows.
//!
//! The service owns PDF/DOCX parsing and skill matching; this side only speaks its JSON
//! contract. Failures are terminal for the request: there is no partial result and no retry.

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const EXTRACT_SKILLS_ENDPOINT: &str = "/extract_skills";

/// What the user submitted for analysis.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionInput {
    Text(String),
    /// Raw document bytes. `filename` is only a format hint for the service.
    Document { bytes: Vec<u8>, filename: String },
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("extraction service returned {status}: {message}")]
    Service { status: u16, message: String },
}

#[async_trait]
pub trait SkillExtractor: Send + Sync {
    async fn extract(
        &self,
        input: &ExtractionInput,
        target_role: &str,
    ) -> Result<Vec<String>, ExtractionError>;
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ExtractRequest<'a> {
    #[serde(rename_all = "camelCase")]
    Text {
        resume_text: &'a str,
        target_role: &'a str,
    },
    #[serde(rename_all = "camelCase")]
    Document {
        file_buffer: String,
        filename: &'a str,
        target_role: &'a str,
    },
}

#[derive(Debug, Deserialize)]
struct ExtractResponse {
    skills: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    error: String,
}

/// HTTP client for the extraction microservice.
#[derive(Clone)]
pub struct HttpSkillExtractor {
    client: Client,
    base_url: String,
}

impl HttpSkillExtractor {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl SkillExtractor for HttpSkillExtractor {
    async fn extract(
        &self,
        input: &ExtractionInput,
        target_role: &str,
    ) -> Result<Vec<String>, ExtractionError> {
        let body = match input {
            ExtractionInput::Text(text) => ExtractRequest::Text {
                resume_text: text,
                target_role,
            },
            ExtractionInput::Document { bytes, filename } => ExtractRequest::Document {
                file_buffer: STANDARD.encode(bytes),
                filename,
                target_role,
            },
        };

        let url = format!("{}{}", self.base_url, EXTRACT_SKILLS_ENDPOINT);
        debug!("Calling skill extraction service: {url}");

        let response = self.client.post(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ServiceErrorBody>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(ExtractionError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let response: ExtractResponse = response.json().await?;
        Ok(response.skills.unwrap_or_default())
    }
}
