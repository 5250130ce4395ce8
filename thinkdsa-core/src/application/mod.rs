pub mod prompt;
pub mod scoring;
pub mod service;
