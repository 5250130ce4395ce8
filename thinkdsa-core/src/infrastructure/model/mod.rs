//! Model infrastructure module
//!
//! # Structure
//! - `types` - Request, Response, Error types
//! - `traits` - ModelClient trait
//! - `transport` - HTTP transport seam
//! - `retry` - retry policy, state and delay seam
//! - `gemini` - Gemini `generateContent` client

pub mod gemini;
pub mod retry;
pub mod traits;
pub mod transport;
pub mod types;

// Re-exports for convenience
pub use gemini::GeminiClient;
pub use retry::{Delay, RetryPolicy, TokioDelay};
pub use traits::ModelClient;
pub use transport::{HttpReply, HttpTransport, ReqwestTransport};
pub use types::{ModelError, ModelRequest, ModelResponse};
