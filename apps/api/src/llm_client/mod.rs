//! LLM Client: the single point of entry for all Gemini calls in the portfolio API.
//!
//! ARCHITECTURAL RULE: No other module may call the generative-text API directly.
//! Controllers depend on the `CompletionClient` trait, never on `GeminiClient`.
//!
//! One request per call with no retry: a failed attempt
//! is final and surfaces to callers only as `CompletionResult::Unavailable`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

pub mod prompts;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
/// The model used for all completions.
/// Hardcoded so the chat and fit prompts are always tuned against the same model.
pub const MODEL: &str = "gemini-2.5-flash-preview-09-2025";

/// Outcome of a single completion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionResult {
    Success(String),
    /// Network error, non-2xx status, or an unusable body. Deliberately carries no detail.
    Unavailable,
}

impl CompletionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, CompletionResult::Success(_))
    }
}

/// A prompt plus system instruction, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub system_instruction: String,
}

/// The seam between the controllers and the generative-text service.
///
/// Implementations must not panic or return errors: every failure becomes
/// `CompletionResult::Unavailable`.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str, system_instruction: &str) -> CompletionResult;

    async fn execute(&self, request: &CompletionRequest) -> CompletionResult {
        self.complete(&request.prompt, &request.system_instruction)
            .await
    }
}

/// Internal failure causes. Logged, then collapsed into `Unavailable`.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Response contained no candidates")]
    NoCandidates,

    /// Also raised for a whitespace-only text part, which would otherwise
    /// render as an empty assistant bubble.
    #[error("First candidate contained no text")]
    EmptyContent,
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    system_instruction: RequestContent<'a>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

impl<'a> RequestContent<'a> {
    fn text(text: &'a str) -> Self {
        Self {
            parts: vec![RequestPart { text }],
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate.
    pub fn first_text(&self) -> Result<&str, LlmError> {
        let candidate = self.candidates.first().ok_or(LlmError::NoCandidates)?;
        candidate
            .content
            .as_ref()
            .and_then(|c| c.parts.first())
            .and_then(|p| p.text.as_deref())
            .filter(|t| !t.trim().is_empty())
            .ok_or(LlmError::EmptyContent)
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// GeminiClient
// ────────────────────────────────────────────────────────────────────────────

/// `CompletionClient` backed by the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(api_key: String, api_base: &str, timeout: Duration) -> Result<Self, LlmError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key,
            endpoint: format!(
                "{}/v1beta/models/{MODEL}:generateContent",
                api_base.trim_end_matches('/')
            ),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Makes one raw call and returns the parsed response or the failure cause.
    pub async fn call(
        &self,
        prompt: &str,
        system_instruction: &str,
    ) -> Result<GenerateContentResponse, LlmError> {
        let body = GenerateContentRequest {
            contents: vec![RequestContent::text(prompt)],
            system_instruction: RequestContent::text(system_instruction),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let raw = response.text().await?;
        let parsed: GenerateContentResponse = serde_json::from_str(&raw)?;

        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                "Gemini call succeeded: prompt_tokens={}, candidate_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        Ok(parsed)
    }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    async fn complete(&self, prompt: &str, system_instruction: &str) -> CompletionResult {
        let text = self
            .call(prompt, system_instruction)
            .await
            .and_then(|r| r.first_text().map(str::to_string));

        match text {
            Ok(text) => CompletionResult::Success(text),
            Err(e) => {
                error!("Gemini error: {e}");
                CompletionResult::Unavailable
            }
        }
    }
}

/// Test doubles shared by the controller and handler tests.
#[cfg(test)]
pub mod testing {
    use std::sync::Mutex;
    use std::time::Duration;

    use super::*;

    /// Returns a canned result and records every request it receives.
    pub struct FakeClient {
        result: CompletionResult,
        delay: Option<Duration>,
        calls: Mutex<Vec<CompletionRequest>>,
    }

    impl FakeClient {
        pub fn replying(text: &str) -> Self {
            Self::with_result(CompletionResult::Success(text.to_string()))
        }

        pub fn failing() -> Self {
            Self::with_result(CompletionResult::Unavailable)
        }

        pub fn with_result(result: CompletionResult) -> Self {
            Self {
                result,
                delay: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Sleeps for `delay` before answering.
        pub fn delayed(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        pub fn calls(&self) -> Vec<CompletionRequest> {
            self.calls.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CompletionClient for FakeClient {
        async fn complete(&self, prompt: &str, system_instruction: &str) -> CompletionResult {
            self.calls.lock().unwrap().push(CompletionRequest {
                prompt: prompt.to_string(),
                system_instruction: system_instruction.to_string(),
            });
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.result.clone()
        }
    }
}
