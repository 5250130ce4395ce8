//! Model traits

use super::types::{ModelError, ModelRequest, ModelResponse};
use async_trait::async_trait;

/// A remote text-generation backend.
///
/// Implementations own their retry policy; `generate` resolves once the
/// final attempt has finished.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Get the client ID
    fn id(&self) -> &str;

    /// Generate text for a fully rendered prompt
    async fn generate(&self, request: ModelRequest) -> Result<ModelResponse, ModelError>;
}
