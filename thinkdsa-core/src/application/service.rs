//! Hint service: prompt -> Gemini (with retry) -> score extraction.
//!
//! The service holds no per-call state and is safe to share across tasks.
//! Each call runs its own [`HintRequest`]; two calls for the same problem run
//! independently and both resolve, so any one-at-a-time discipline belongs
//! to the caller.

use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::prompt::{PromptMode, build_prompt};
use super::scoring::extract_score;
use crate::config::AppConfig;
use crate::domain::types::{HintResult, ProblemContext};
use crate::infrastructure::model::{GeminiClient, ModelClient, ModelError, ModelRequest};

/// Lifecycle of a single hint request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintState {
    Idle,
    Requesting,
    Completed,
    Failed,
}

/// One invocation of the hint exchange.
#[derive(Debug, Clone)]
pub struct HintRequest {
    id: Uuid,
    context: ProblemContext,
    state: HintState,
}

impl HintRequest {
    pub fn new(context: ProblemContext) -> Self {
        Self {
            id: Uuid::new_v4(),
            context,
            state: HintState::Idle,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn context(&self) -> &ProblemContext {
        &self.context
    }

    pub fn state(&self) -> HintState {
        self.state
    }

    /// Run the exchange once. A request that has already left `Idle` fails
    /// without touching the network.
    pub async fn execute(&mut self, client: &dyn ModelClient, credential: &str) -> HintResult {
        if self.state != HintState::Idle {
            return HintResult::failure(format!(
                "hint request {} has already been executed",
                self.id
            ));
        }

        let credential = credential.trim();
        if credential.is_empty() {
            self.state = HintState::Failed;
            warn!(request_id = %self.id, "No API key configured");
            return HintResult::failure(ModelError::missing_api_key(client.id()).user_message());
        }

        self.state = HintState::Requesting;
        let mode = PromptMode::for_context(&self.context);
        info!(
            request_id = %self.id,
            title = self.context.title.as_str(),
            language = self.context.language.as_str(),
            mode = mode.as_str(),
            "Requesting hint"
        );

        let prompt = build_prompt(&self.context);
        let request = ModelRequest::new(prompt, credential).with_request_id(self.id);

        match client.generate(request).await {
            Ok(response) => {
                let extraction = extract_score(&response.text);
                self.state = HintState::Completed;
                debug!(
                    request_id = %self.id,
                    attempts = response.attempts,
                    score_source = ?extraction.source,
                    "Hint ready"
                );
                HintResult::success(extraction.hint, extraction.score)
            }
            Err(err) => {
                self.state = HintState::Failed;
                warn!(request_id = %self.id, error = %err, "Hint request failed");
                HintResult::failure(err.user_message())
            }
        }
    }
}

/// Stateless, re-entrant entry point used by the page collaborator.
#[derive(Clone)]
pub struct HintService {
    client: Arc<dyn ModelClient>,
}

impl HintService {
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self { client }
    }

    /// Service backed by the Gemini client described in `config`.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(Arc::new(GeminiClient::from_config(config)))
    }

    pub async fn request_hint(&self, context: &ProblemContext, credential: &str) -> HintResult {
        let mut request = HintRequest::new(context.clone());
        request.execute(self.client.as_ref(), credential).await
    }
}
