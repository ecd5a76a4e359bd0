//! Gemini provider implementation for StudyScout
//!
//! This module implements the Provider trait against Google's Gemini
//! `generateContent` REST endpoint. Conversations are sent in full on every
//! call with the tutor framing as `systemInstruction`; structured requests
//! set `responseMimeType` to `application/json`.

use crate::config::GeminiConfig;
use crate::error::{Result, StudyScoutError};
use crate::providers::{
    CompletionResponse, GenerationRequest, Message, Provider, ResponseFormat, TokenUsage,
};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Header carrying the API key
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini API provider
///
/// # Examples
///
/// ```no_run
/// use studyscout::config::GeminiConfig;
/// use studyscout::providers::{GeminiProvider, GenerationRequest, Provider};
///
/// # async fn example() -> studyscout::error::Result<()> {
/// let config = GeminiConfig {
///     api_key: Some("secret".to_string()),
///     ..GeminiConfig::default()
/// };
/// let provider = GeminiProvider::new(config)?;
/// let response = provider.generate(&GenerationRequest::prompt("Hello!")).await?;
/// # Ok(())
/// # }
/// ```
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    config: GeminiConfig,
}

/// Request body for `generateContent`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
}

/// Response body from `generateContent`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: Option<usize>,
    #[serde(default)]
    candidates_token_count: Option<usize>,
}

impl GeminiProvider {
    /// Create a new Gemini provider instance
    ///
    /// # Errors
    ///
    /// Returns `StudyScoutError::MissingCredentials` when no API key is
    /// configured, or a provider error if HTTP client initialization fails
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| StudyScoutError::MissingCredentials("gemini".to_string()))?
            .to_string();

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("studyscout/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                StudyScoutError::Provider(format!("Failed to create HTTP client: {}", e))
            })?;

        tracing::info!(
            "Initialized Gemini provider: api_base={}, model={}",
            config.api_base,
            config.model
        );

        Ok(Self {
            client,
            api_key,
            config,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        )
    }

    fn convert_message(message: &Message) -> Content {
        Content {
            role: Some(message.role.as_str().to_string()),
            parts: vec![Part {
                text: Some(message.content.clone()),
            }],
        }
    }

    fn build_request(request: &GenerationRequest) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: request.messages.iter().map(Self::convert_message).collect(),
            system_instruction: request.system_instruction.as_ref().map(|s| Content {
                role: None,
                parts: vec![Part {
                    text: Some(s.clone()),
                }],
            }),
            generation_config: match request.format {
                ResponseFormat::Json => Some(GenerationConfig {
                    response_mime_type: "application/json".to_string(),
                }),
                ResponseFormat::Text => None,
            },
        }
    }

    /// Concatenates the text parts of the first candidate
    fn extract_text(response: &GenerateContentResponse) -> Option<String> {
        let content = response.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    async fn generate(&self, request: &GenerationRequest) -> Result<CompletionResponse> {
        let body = Self::build_request(request);

        tracing::debug!(
            "Sending Gemini request: model={}, {} turns, json={}",
            self.config.model,
            body.contents.len(),
            body.generation_config.is_some()
        );

        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gemini request failed: {}", e);
                StudyScoutError::Http(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini returned error {}: {}", status, error_text);
            return Err(StudyScoutError::Provider(format!(
                "Gemini returned error {}: {}",
                status, error_text
            ))
            .into());
        }

        let api_response: GenerateContentResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}", e);
            StudyScoutError::Provider(format!("Failed to parse Gemini response: {}", e))
        })?;

        if let Some(reason) = api_response
            .candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref())
        {
            if reason == "SAFETY" {
                return Err(StudyScoutError::Provider(
                    "Gemini blocked the response for safety reasons".to_string(),
                )
                .into());
            }
            tracing::debug!("Gemini finish reason: {}", reason);
        }

        let mut completion = CompletionResponse {
            text: Self::extract_text(&api_response),
            usage: None,
        };
        if let Some(usage) = api_response.usage_metadata {
            completion = completion.with_usage(TokenUsage::new(
                usage.prompt_token_count.unwrap_or(0),
                usage.candidates_token_count.unwrap_or(0),
            ));
        }

        Ok(completion)
    }

    fn model(&self) -> String {
        self.config.model.clone()
    }
}
