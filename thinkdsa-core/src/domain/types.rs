use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{MISSING_DESCRIPTION, NOT_AVAILABLE, SCORE_MARKER};

/// Everything the tutor knows about the problem the user is looking at.
///
/// Built fresh for every request and never retained. `title`, `description`
/// and `language` are always present, falling back to sentinels when the page
/// could not provide them. An empty `user_code` selects the initial-hint
/// prompt instead of code feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemContext {
    pub title: String,
    pub description: String,
    pub language: String,
    #[serde(default)]
    pub user_code: String,
}

impl ProblemContext {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            language: language.into(),
            user_code: String::new(),
        }
    }

    /// Build a context from fields scraped off the page, substituting the
    /// sentinels for anything missing or blank.
    pub fn from_page(
        title: Option<&str>,
        description: Option<&str>,
        language: Option<&str>,
    ) -> Self {
        let present = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        Self::new(
            present(title).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            present(description).unwrap_or_else(|| MISSING_DESCRIPTION.to_string()),
            // Language buttons render "Python3\n<chevron>"; only the first line is the label.
            present(language)
                .and_then(|l| l.lines().next().map(|line| line.trim().to_string()))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        )
    }

    pub fn with_user_code(mut self, code: impl Into<String>) -> Self {
        self.user_code = code.into();
        self
    }

    pub fn has_user_code(&self) -> bool {
        !self.user_code.trim().is_empty()
    }

    pub fn has_language(&self) -> bool {
        !self.language.trim().is_empty() && self.language != NOT_AVAILABLE
    }

    /// Tag used on the code fence, e.g. `Python3` -> `python3`.
    pub fn language_tag(&self) -> String {
        self.language.to_lowercase()
    }
}

/// Per-dimension understanding, each in `0..=25`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub conceptual: u32,
    pub implementation: u32,
    pub optimization: u32,
    pub testing: u32,
}

impl ScoreBreakdown {
    pub const MAX_COMPONENT: u32 = 25;

    pub fn total(&self) -> u32 {
        self.conceptual + self.implementation + self.optimization + self.testing
    }

    pub fn is_within_range(&self) -> bool {
        [
            self.conceptual,
            self.implementation,
            self.optimization,
            self.testing,
        ]
        .iter()
        .all(|v| *v <= Self::MAX_COMPONENT)
    }
}

/// The model's self-reported assessment of the user's understanding.
///
/// `overall` is meant to equal the breakdown total, but the model is not held
/// to that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreAssessment {
    pub overall: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<ScoreBreakdown>,
}

impl ScoreAssessment {
    pub const MAX_OVERALL: u32 = 100;

    pub fn overall_only(overall: u32) -> Self {
        Self {
            overall,
            breakdown: None,
        }
    }

    pub fn with_breakdown(overall: u32, breakdown: ScoreBreakdown) -> Self {
        Self {
            overall,
            breakdown: Some(breakdown),
        }
    }

    /// Accepted scores keep `overall` in `0..=100` and every breakdown
    /// component in `0..=25`.
    pub fn is_within_range(&self) -> bool {
        self.overall <= Self::MAX_OVERALL
            && self.breakdown.is_none_or(|b| b.is_within_range())
    }

    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_overall(self.overall)
    }

    /// Render the block in the one-line shape the model is asked to emit.
    /// An overall-only score leaves `breakdown` out.
    pub fn to_block(&self) -> String {
        let json = serde_json::to_string(self).unwrap_or_else(|_| {
            format!("{{\"overall\": {}}}", self.overall)
        });
        format!("{SCORE_MARKER} {json}")
    }
}

/// Coarse rating shown next to the numeric badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Strong,
    Fair,
    Developing,
    NeedsWork,
}

impl ScoreBand {
    pub fn from_overall(overall: u32) -> Self {
        match overall {
            80.. => ScoreBand::Strong,
            60..=79 => ScoreBand::Fair,
            40..=59 => ScoreBand::Developing,
            _ => ScoreBand::NeedsWork,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreBand::Strong => "Strong",
            ScoreBand::Fair => "Fair",
            ScoreBand::Developing => "Developing",
            ScoreBand::NeedsWork => "Needs work",
        }
    }

    /// Badge colour as a CSS hex string.
    pub fn color(self) -> &'static str {
        match self {
            ScoreBand::Strong => "#10B981",
            ScoreBand::Fair => "#F59E0B",
            ScoreBand::Developing => "#F97316",
            ScoreBand::NeedsWork => "#EF4444",
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of one hint request. Exactly one of hint or error, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum HintResult {
    Success {
        #[serde(rename = "hint")]
        hint_text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        score: Option<ScoreAssessment>,
    },
    Failure {
        #[serde(rename = "error")]
        error_message: String,
    },
}

impl HintResult {
    pub fn success(hint_text: impl Into<String>, score: Option<ScoreAssessment>) -> Self {
        Self::Success {
            hint_text: hint_text.into(),
            score,
        }
    }

    pub fn failure(error_message: impl Into<String>) -> Self {
        Self::Failure {
            error_message: error_message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, HintResult::Success { .. })
    }

    pub fn hint(&self) -> Option<&str> {
        match self {
            HintResult::Success { hint_text, .. } => Some(hint_text),
            HintResult::Failure { .. } => None,
        }
    }

    pub fn score(&self) -> Option<&ScoreAssessment> {
        match self {
            HintResult::Success { score, .. } => score.as_ref(),
            HintResult::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            HintResult::Success { .. } => None,
            HintResult::Failure { error_message } => Some(error_message),
        }
    }
}
