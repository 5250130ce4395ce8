//! Application constants
//!
//! Single source of truth for paths, endpoints and generation parameters.

use std::time::Duration;

/// Default configuration file path
pub const CONFIG_PATH: &str = "config/thinkdsa.toml";

/// Default environment file path
pub const ENV_PATH: &str = "config/.env";

/// Default Gemini endpoint
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Default Gemini API path (fallback when not specified in config)
pub const DEFAULT_GEMINI_API_PATH: &str = "v1beta/models";

/// Default model used for hints
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";

/// Environment variable holding the Gemini API key
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Default score store location
pub const DEFAULT_SCORE_STORE: &str = "data/scores.json";

/// Sampling temperature sent with every request
pub const GENERATION_TEMPERATURE: f32 = 0.5;

/// Output token cap sent with every request
pub const GENERATION_MAX_OUTPUT_TOKENS: u32 = 1024;

/// Retries after the first attempt (3 attempts total)
pub const MAX_RETRIES: u32 = 2;

/// Linear backoff step, multiplied by the attempt number
pub const RETRY_BASE_DELAY: Duration = Duration::from_millis(1500);

/// Sentinel used when a page field is unavailable
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder used when the description could not be extracted
pub const MISSING_DESCRIPTION: &str = "Could not find description.";

/// Marker that introduces the model's score block
pub const SCORE_MARKER: &str = "SCORE_ASSESSMENT:";
