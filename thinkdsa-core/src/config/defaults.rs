pub use crate::constants::{
    DEFAULT_API_KEY_ENV, DEFAULT_GEMINI_API_PATH, DEFAULT_GEMINI_ENDPOINT, DEFAULT_MODEL,
    DEFAULT_SCORE_STORE,
};

/// No settings popup exists here, so a fresh install starts enabled.
pub const DEFAULT_ENABLED: bool = true;
