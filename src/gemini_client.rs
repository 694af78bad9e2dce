use std::env;

use async_trait::async_trait;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, error};

const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const MODEL: &str = "gemini-2.5-flash";
const TEMPERATURE: f64 = 0.7;

/// Reply shown when no API key is configured. No network call is made.
pub const DEMO_MODE_REPLY: &str =
    "Demo Mode: API Key missing. Please configure your environment to use the live AI Expert.";

/// Reply substituted when the service returns a success with no usable text.
pub const EMPTY_PAYLOAD_REPLY: &str =
    "I apologize, I am processing complex market data and cannot respond at this moment.";

/// Reply substituted when the request fails for any reason.
pub const HIGH_DEMAND_REPLY: &str =
    "Nexus AI System is currently experiencing high demand. Please try again shortly.";

const SYSTEM_INSTRUCTION: &str = r#"You are the "Nexus AI Expert", a specialized financial AI assistant for the Nexus Wealth Management Operating System.

Your Tone:
- Professional, sophisticated, Wall Street rigor meets Silicon Valley innovation.
- Concise and high-level.
- Use terms like "Alpha", "Exposure", "Risk-adjusted", "Omnibus", "Family Office".

Your Goal:
- Explain how Nexus helps EAMs (External Asset Managers) and Family Offices.
- If asked about assets, mention we have access to Sequoia, Blackstone, Millennium, etc.
- If asked about features, mention our "Hunter" (Lead Gen), "Guardian" (Risk/Comms), and "Expert" (Research) modules.

Do not give specific financial advice (e.g., "buy this stock now"). Instead, provide strategic rationale or explain how the Nexus platform facilitates the investment process."#;

/// Internal failure taxonomy. None of these cross the [`CompletionClient`]
/// boundary; they exist so the diagnostic log line can say what went wrong.
#[derive(Debug, Error)]
enum CompletionError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API request failed with status {status}: {body}")]
    Api { status: u16, body: String },
}

/// The seam between the chat flow and the generative-language service.
///
/// The contract is total: every call resolves to a non-empty string. Failures
/// are converted to fixed fallback replies inside the implementation, so the
/// conversation layer never sees an error value.
#[async_trait]
pub trait CompletionClient {
    async fn complete(&self, prompt: &str) -> String;
}

/// Client for the Nexus AI Expert persona on Gemini's `generateContent`
/// endpoint. Each call is single-turn: only the current prompt is sent,
/// together with the fixed system instruction and sampling temperature.
pub struct ExpertClient {
    api_key: Option<String>,
    base_url: String,
    client: reqwest::Client,
}

impl ExpertClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(api_key, API_BASE_URL)
    }

    /// Reads the credential from `GEMINI_API_KEY`, falling back to `API_KEY`.
    /// A missing credential is not an error: the client runs in demo mode.
    pub fn from_env() -> Self {
        let api_key = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("API_KEY"))
            .ok()
            .filter(|key| !key.is_empty());
        Self::new(api_key)
    }

    pub fn with_base_url(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn is_demo_mode(&self) -> bool {
        self.api_key.is_none()
    }

    async fn generate_content(
        &self,
        api_key: &str,
        prompt: &str,
    ) -> Result<String, CompletionError> {
        let api_url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, MODEL, api_key
        );

        let request_body = json!({
            "systemInstruction": {
                "parts": [
                    {
                        "text": SYSTEM_INSTRUCTION
                    }
                ]
            },
            "contents": [
                {
                    "role": "user",
                    "parts": [
                        {
                            "text": prompt
                        }
                    ]
                }
            ],
            "generationConfig": {
                "temperature": TEMPERATURE
            }
        });

        debug!("Sending request to Gemini API: {}", request_body);

        let response = self.client.post(&api_url).json(&request_body).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api { status, body });
        }

        let response_json: Value = response.json().await?;

        debug!("Received response from Gemini API: {}", response_json);

        Ok(extract_text(&response_json))
    }
}

#[async_trait]
impl CompletionClient for ExpertClient {
    async fn complete(&self, prompt: &str) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            return DEMO_MODE_REPLY.to_string();
        };

        match self.generate_content(api_key, prompt).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => EMPTY_PAYLOAD_REPLY.to_string(),
            Err(e) => {
                error!("Gemini API error: {}", e);
                HIGH_DEMAND_REPLY.to_string()
            }
        }
    }
}

/// Concatenates the text parts of the first candidate. A response without
/// candidates (a safety-blocked prompt returns only `promptFeedback`) yields
/// an empty string; the caller maps every empty result to the fixed
/// empty-payload reply.
fn extract_text(response: &Value) -> String {
    let mut result = String::new();

    if let Some(parts) = response
        .get("candidates")
        .and_then(|c| c.as_array())
        .and_then(|c| c.first())
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
    {
        for part in parts {
            if let Some(text) = part.get("text").and_then(|t| t.as_str()) {
                result.push_str(text);
            }
        }
    }

    result
}
