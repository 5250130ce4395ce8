//! Model types - Request, Response, and Error types

use thiserror::Error;
use uuid::Uuid;

/// One generation request: the fully rendered prompt and the credential.
#[derive(Debug, Clone)]
pub struct ModelRequest {
    pub request_id: Uuid,
    pub prompt: String,
    pub api_key: String,
}

impl ModelRequest {
    pub fn new(prompt: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            prompt: prompt.into(),
            api_key: api_key.into(),
        }
    }

    pub fn with_request_id(mut self, request_id: Uuid) -> Self {
        self.request_id = request_id;
        self
    }
}

/// Text produced by the model, already trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelResponse {
    pub text: String,
    /// Attempts it took, counting the successful one.
    pub attempts: u32,
}

impl ModelResponse {
    pub fn new(text: impl Into<String>, attempts: u32) -> Self {
        Self {
            text: text.into(),
            attempts,
        }
    }
}

/// Model errors
///
/// The `Display` output is what ends up in front of the user, so the remote
/// variants keep the wording of the provider's own message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("API Key not found. Please set it in the ThinkDSA settings.")]
    MissingApiKey { provider: String },

    /// Rate limited or overloaded; eligible for another attempt.
    #[error("API Error: {message} (attempt {attempt})")]
    Transient {
        provider: String,
        status: u16,
        message: String,
        attempt: u32,
    },

    #[error("API Error: {message}")]
    Api {
        provider: String,
        status: u16,
        message: String,
    },

    #[error("network error calling provider '{provider}': {reason}")]
    Network { provider: String, reason: String },

    #[error(
        "Unexpected response format. Block Reason: {}. Finish Reason: {}.",
        or_not_available(.block_reason),
        or_not_available(.finish_reason)
    )]
    UnexpectedFormat {
        provider: String,
        block_reason: Option<String>,
        finish_reason: Option<String>,
    },

    #[error("provider '{provider}' returned invalid response: {reason}")]
    InvalidResponse { provider: String, reason: String },
}

fn or_not_available(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(crate::constants::NOT_AVAILABLE)
}

impl ModelError {
    pub fn missing_api_key(provider: impl Into<String>) -> Self {
        Self::MissingApiKey {
            provider: provider.into(),
        }
    }

    pub fn transient(
        provider: impl Into<String>,
        status: u16,
        message: impl Into<String>,
        attempt: u32,
    ) -> Self {
        Self::Transient {
            provider: provider.into(),
            status,
            message: message.into(),
            attempt,
        }
    }

    pub fn api(provider: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            provider: provider.into(),
            status,
            message: message.into(),
        }
    }

    pub fn network(provider: impl Into<String>, reason: impl ToString) -> Self {
        Self::Network {
            provider: provider.into(),
            reason: reason.to_string(),
        }
    }

    pub fn unexpected_format(
        provider: impl Into<String>,
        block_reason: Option<String>,
        finish_reason: Option<String>,
    ) -> Self {
        Self::UnexpectedFormat {
            provider: provider.into(),
            block_reason,
            finish_reason,
        }
    }

    pub fn invalid_response(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            provider: provider.into(),
            reason: reason.into(),
        }
    }

    /// Only transient failures are retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, ModelError::Transient { .. })
    }

    /// HTTP status that produced this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ModelError::Transient { status, .. } | ModelError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// A configuration problem on our side rather than a remote failure.
    pub fn is_configuration(&self) -> bool {
        matches!(self, ModelError::MissingApiKey { .. })
    }

    /// Message handed across the service boundary.
    ///
    /// Configuration errors pass through verbatim; everything that happened
    /// talking to the provider is prefixed so the caller can tell them apart.
    pub fn user_message(&self) -> String {
        if self.is_configuration() {
            self.to_string()
        } else {
            format!("Failed to get response from AI. {self}")
        }
    }
}
