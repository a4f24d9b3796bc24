/// LLM Client: the single point of entry for all reasoning-service calls in uWork.
///
/// ARCHITECTURAL RULE: No other module may call the Anthropic API directly.
/// Scoring, skill extraction and advice all go through `ReasoningService`,
/// which is constructed once in `main` and injected via `AppState`.
///
/// Calls are single-shot: one attempt under the client timeout, no retries.
/// Callers treat every `LlmError` as "use the fallback".
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all LLM calls in uWork.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 1024;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("reasoning service is not configured")]
    NotConfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("LLM response field '{0}' is missing or invalid")]
    InvalidField(&'static str),
}

/// Which path produced an AI-feature result. Surfaced in responses and stored
/// with matches so degraded answers stay observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultSource {
    Llm,
    Fallback,
}

impl ResultSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultSource::Llm => "llm",
            ResultSource::Fallback => "fallback",
        }
    }
}

/// The external reasoning service, as seen by the matching, skills and advice modules.
///
/// Implemented by `LlmClient` in production and by in-process fakes in tests.
#[async_trait]
pub trait ReasoningService: Send + Sync {
    /// `false` when the service lacks credentials. Callers check this first
    /// and skip straight to their fallback without attempting a call.
    fn is_configured(&self) -> bool {
        true
    }

    /// Sends one prompt and returns the raw text of the reply.
    async fn complete(&self, prompt: &str, system: &str) -> Result<String, LlmError>;
}

/// Calls the service and deserializes the text reply as JSON.
/// The prompt must instruct the model to return valid JSON.
pub async fn complete_json<T: DeserializeOwned>(
    llm: &dyn ReasoningService,
    prompt: &str,
    system: &str,
) -> Result<T, LlmError> {
    if !llm.is_configured() {
        return Err(LlmError::NotConfigured);
    }

    let text = llm.complete(prompt, system).await?;
    serde_json::from_str(strip_json_fences(&text)).map_err(LlmError::Parse)
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text content from the first text block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// Anthropic Messages API client.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: Option<String>,
}

impl LlmClient {
    /// Builds a client whose every request is bounded by `timeout`.
    /// A timed-out request surfaces as `LlmError::Http`.
    pub fn new(api_key: Option<String>, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
        })
    }

    /// Makes a raw call to the Messages API, returning the full response object.
    pub async fn call(&self, prompt: &str, system: &str) -> Result<LlmResponse, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::NotConfigured)?;

        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<AnthropicError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let llm_response: LlmResponse = response.json().await?;

        debug!(
            "LLM call succeeded: input_tokens={}, output_tokens={}",
            llm_response.usage.input_tokens, llm_response.usage.output_tokens
        );

        Ok(llm_response)
    }
}

#[async_trait]
impl ReasoningService for LlmClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let response = self.call(prompt, system).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

/// In-process stand-ins for the reasoning service, shared by the module tests.
#[cfg(test)]
pub mod fake {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;

    /// What the fake does when called.
    ///
    /// Both failures are upstream HTTP statuses. A client-side timeout in
    /// `LlmClient` surfaces as `LlmError::Http` instead; callers treat every
    /// `LlmError` alike, so these two stand in for it.
    pub enum Reply {
        Text(String),
        GatewayTimeout,
        ServerError,
    }

    pub struct FakeReasoning {
        configured: bool,
        reply: Reply,
        calls: AtomicUsize,
        pub last_prompt: Mutex<Option<String>>,
    }

    impl FakeReasoning {
        pub fn replying(text: &str) -> Self {
            Self::with(Reply::Text(text.to_string()), true)
        }

        pub fn failing(reply: Reply) -> Self {
            Self::with(reply, true)
        }

        pub fn unconfigured() -> Self {
            Self::with(Reply::Text("{}".to_string()), false)
        }

        fn with(reply: Reply, configured: bool) -> Self {
            Self {
                configured,
                reply,
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ReasoningService for FakeReasoning {
        fn is_configured(&self) -> bool {
            self.configured
        }

        async fn complete(&self, prompt: &str, _system: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            match &self.reply {
                Reply::Text(text) => Ok(text.clone()),
                Reply::GatewayTimeout => Err(LlmError::Api {
                    status: 504,
                    message: "simulated gateway timeout".to_string(),
                }),
                Reply::ServerError => Err(LlmError::Api {
                    status: 500,
                    message: "simulated outage".to_string(),
                }),
            }
        }
    }
}
