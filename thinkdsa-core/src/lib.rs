//! ThinkDSA AI hint service.
//!
//! Turns a coding problem (and optionally the user's code) into a tutoring
//! prompt, sends it to Gemini with bounded retries, and splits the reply into
//! hint text and an understanding score.

pub mod application;
pub mod config;
pub mod constants;
pub mod domain;
pub mod infrastructure;

pub use application::{prompt, scoring, service};
pub use config::{AppConfig, ConfigError};
pub use domain::types;
pub use infrastructure::{model, store};

pub use application::service::HintService;
pub use domain::types::{HintResult, ProblemContext, ScoreAssessment, ScoreBand, ScoreBreakdown};
