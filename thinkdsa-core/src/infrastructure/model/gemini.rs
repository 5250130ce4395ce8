//! Gemini client implementation

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::retry::{Delay, FailureKind, RetryPolicy, TokioDelay, classify, run_with_retry};
use super::traits::ModelClient;
use super::transport::{HttpReply, HttpTransport, ReqwestTransport};
use super::types::{ModelError, ModelRequest, ModelResponse};
use crate::config::AppConfig;
use crate::constants::{
    DEFAULT_GEMINI_API_PATH, DEFAULT_GEMINI_ENDPOINT, DEFAULT_MODEL,
    GENERATION_MAX_OUTPUT_TOKENS, GENERATION_TEMPERATURE,
};

const PROVIDER_ID: &str = "gemini";

/// Gemini client for Google AI
#[derive(Clone)]
pub struct GeminiClient {
    endpoint: String,
    api_path: String,
    model: String,
    transport: Arc<dyn HttpTransport>,
    delay: Arc<dyn Delay>,
    policy: RetryPolicy,
}

impl GeminiClient {
    pub fn new(
        endpoint: impl Into<String>,
        api_path: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_path: api_path.into(),
            model: model.into(),
            transport: Arc::new(ReqwestTransport::new(PROVIDER_ID)),
            delay: Arc::new(TokioDelay),
            policy: RetryPolicy::default(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.endpoint.clone(),
            config.api_path.clone(),
            config.model.clone(),
        )
    }

    pub fn with_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = transport;
        self
    }

    pub fn with_delay(mut self, delay: Arc<dyn Delay>) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn build_model_url(&self) -> String {
        let base = self.endpoint.trim_end_matches('/');
        let path = self.api_path.trim_matches('/');
        format!("{base}/{path}/{}:generateContent", self.model)
    }

    /// Request body with the fixed generation parameters.
    pub fn build_payload(prompt: &str) -> Value {
        json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature": GENERATION_TEMPERATURE,
                "maxOutputTokens": GENERATION_MAX_OUTPUT_TOKENS
            }
        })
    }

    async fn attempt(
        &self,
        url: &str,
        api_key: &str,
        payload: &Value,
        attempt: u32,
    ) -> Result<String, ModelError> {
        debug!(attempt, model = self.model.as_str(), "Calling Gemini");
        let reply = self.transport.post_json(url, api_key, payload).await?;

        if !reply.is_success() {
            return Err(error_from_reply(&reply, attempt));
        }

        extract_text(&reply.body)
    }
}

impl Default for GeminiClient {
    fn default() -> Self {
        Self::new(DEFAULT_GEMINI_ENDPOINT, DEFAULT_GEMINI_API_PATH, DEFAULT_MODEL)
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    fn id(&self) -> &str {
        PROVIDER_ID
    }

    async fn generate(&self, request: ModelRequest) -> Result<ModelResponse, ModelError> {
        if request.api_key.trim().is_empty() {
            return Err(ModelError::missing_api_key(PROVIDER_ID));
        }

        let url = self.build_model_url();
        let payload = Self::build_payload(&request.prompt);

        info!(
            provider = PROVIDER_ID,
            model = self.model.as_str(),
            request_id = %request.request_id,
            prompt_chars = request.prompt.len(),
            "Sending request to Gemini"
        );

        let outcome = run_with_retry(&self.policy, self.delay.as_ref(), |attempt| {
            self.attempt(&url, &request.api_key, &payload, attempt)
        })
        .await;

        match outcome {
            Ok((text, attempts)) => {
                debug!(request_id = %request.request_id, attempts, "Received response from Gemini");
                Ok(ModelResponse::new(text, attempts))
            }
            Err(err) => {
                warn!(request_id = %request.request_id, error = %err, "Gemini call failed");
                Err(err)
            }
        }
    }
}

/// Turn a non-success reply into a transient or fatal error.
fn error_from_reply(reply: &HttpReply, attempt: u32) -> ModelError {
    let message = error_message(reply);
    match classify(reply.status, &message) {
        FailureKind::Transient => ModelError::transient(PROVIDER_ID, reply.status, message, attempt),
        FailureKind::Fatal => ModelError::api(PROVIDER_ID, reply.status, message),
    }
}

/// `error.message` from the body, or the status line when the body has none.
fn error_message(reply: &HttpReply) -> String {
    serde_json::from_str::<GeminiErrorBody>(&reply.body)
        .ok()
        .and_then(|body| body.error)
        .and_then(|detail| detail.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| {
            let reason = reqwest::StatusCode::from_u16(reply.status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("Unknown status");
            format!("HTTP {} {reason}", reply.status)
        })
}

/// First candidate's first text part, trimmed and non-empty.
fn extract_text(body: &str) -> Result<String, ModelError> {
    let response: GeminiResponse = serde_json::from_str(body)
        .map_err(|e| ModelError::invalid_response(PROVIDER_ID, e.to_string()))?;

    let first = response.candidates.as_ref().and_then(|c| c.first());
    let text = first
        .and_then(|c| c.content.as_ref())
        .and_then(|c| c.parts.as_ref())
        .and_then(|parts| parts.first())
        .and_then(|p| p.text.as_deref())
        .map(str::trim)
        .filter(|t| !t.is_empty());

    match text {
        Some(text) => Ok(text.to_string()),
        None => Err(ModelError::unexpected_format(
            PROVIDER_ID,
            response.prompt_feedback.and_then(|f| f.block_reason),
            first.and_then(|c| c.finish_reason.clone()),
        )),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct GeminiContent {
    parts: Option<Vec<GeminiPart>>,
}

#[derive(Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct GeminiErrorBody {
    error: Option<GeminiErrorDetail>,
}

#[derive(Deserialize)]
struct GeminiErrorDetail {
    message: Option<String>,
}
