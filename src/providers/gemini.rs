use std::time::Duration;
use serde::{Serialize, Deserialize};
use async_trait::async_trait;
use reqwest::Client;
use log::error;

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Gemini client for the generateContent API
#[derive(Debug)]
pub struct Gemini {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to the public API)
    endpoint: String,
}

/// Gemini generateContent request
#[derive(Debug, Serialize)]
pub struct GeminiRequest {
    /// The model to use; part of the URL, not the body
    #[serde(skip)]
    model: String,

    /// The conversation contents
    contents: Vec<GeminiContent>,

    /// Generation parameters
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

/// One content block of a Gemini conversation
#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiContent {
    /// Role of the content producer (user, model)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Text parts of the content
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

/// A single text part
#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiPart {
    /// The actual text
    pub text: String,
}

/// Generation tuning parameters
#[derive(Debug, Serialize)]
pub struct GeminiGenerationConfig {
    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Maximum number of tokens to generate
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

/// Token usage information
#[derive(Debug, Deserialize)]
pub struct GeminiUsage {
    /// Number of prompt tokens
    #[serde(rename = "promptTokenCount", default)]
    pub prompt_token_count: u32,

    /// Number of generated tokens
    #[serde(rename = "candidatesTokenCount", default)]
    pub candidates_token_count: u32,
}

/// Gemini response
#[derive(Debug, Deserialize)]
pub struct GeminiResponse {
    /// Generated candidates; the first one carries the passage
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,

    /// Token usage information
    #[serde(rename = "usageMetadata")]
    pub usage_metadata: Option<GeminiUsage>,
}

/// One generated candidate
#[derive(Debug, Deserialize)]
pub struct GeminiCandidate {
    /// Generated content
    pub content: Option<GeminiContent>,

    /// Why generation stopped
    #[serde(rename = "finishReason")]
    pub finish_reason: Option<String>,
}

impl GeminiRequest {
    /// Create a new request for the given model
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            contents: Vec::new(),
            generation_config: None,
        }
    }

    /// Add a user prompt to the request
    pub fn add_prompt(mut self, text: impl Into<String>) -> Self {
        self.contents.push(GeminiContent {
            role: Some("user".to_string()),
            parts: vec![GeminiPart { text: text.into() }],
        });
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.config_mut().temperature = Some(temperature);
        self
    }

    /// Set the output token limit
    pub fn max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.config_mut().max_output_tokens = Some(max_output_tokens);
        self
    }

    /// Model this request targets
    pub fn model(&self) -> &str {
        &self.model
    }

    fn config_mut(&mut self) -> &mut GeminiGenerationConfig {
        self.generation_config.get_or_insert(GeminiGenerationConfig {
            temperature: None,
            max_output_tokens: None,
        })
    }
}

impl Gemini {
    /// Create a new Gemini client
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::with_timeout(api_key, endpoint, Duration::from_secs(60))
    }

    /// Create a new Gemini client with an explicit request timeout
    pub fn with_timeout(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    /// True when an API key is configured
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    fn request_url(&self, model: &str) -> String {
        let base = if self.endpoint.is_empty() {
            "https://generativelanguage.googleapis.com"
        } else {
            self.endpoint.trim_end_matches('/')
        };
        format!("{}/v1beta/models/{}:generateContent", base, model)
    }
}

#[async_trait]
impl Provider for Gemini {
    type Request = GeminiRequest;
    type Response = GeminiResponse;

    /// Complete a generateContent request
    async fn complete(&self, request: GeminiRequest) -> Result<GeminiResponse, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::AuthenticationError(
                "No API key configured (set GOOGLE_API_KEY or generation.api_key)".to_string(),
            ));
        }

        let api_url = self.request_url(request.model());

        let response = self.client.post(&api_url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(
                format!("Failed to send request to Gemini API: {}", e)
            ))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Gemini API error ({}): {}", status, error_text);
            if status.as_u16() == 401 || status.as_u16() == 403 {
                return Err(ProviderError::AuthenticationError(error_text));
            }
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        response.json::<GeminiResponse>().await
            .map_err(|e| ProviderError::ParseError(
                format!("Failed to parse Gemini API response: {}", e)
            ))
    }

    /// Test the connection to the Gemini API
    async fn test_connection(&self) -> Result<(), ProviderError> {
        let request = GeminiRequest::new("gemini-2.5-flash")
            .add_prompt("Hello")
            .max_output_tokens(10);

        self.complete(request).await?;
        Ok(())
    }

    /// Extract the generated text from a Gemini response
    fn extract_text(response: &GeminiResponse) -> String {
        response.candidates.first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content.parts.iter()
                    .map(|p| p.text.as_str())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}
