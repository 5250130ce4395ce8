//! Pulls the model's `SCORE_ASSESSMENT:` block out of free-form hint text.
//!
//! The block is written by the model, so it is frequently malformed. Each
//! tier below is tried in order and is public so malformed-input behaviour
//! can be pinned down on its own:
//!
//! 1. [`parse_score_block`] - marker followed by a `{...}` JSON object
//! 2. [`manual_overall`] - any `overall: <int>` in the text, when a marker exists
//!    and the block was not valid JSON
//! 3. [`loose_overall`] - `<int>/100`, `score ... <int>` or `<int>%`, when no marker exists
//!
//! Every tier applies the same range policy: `overall` in `0..=100` and each
//! breakdown component in `0..=25`, otherwise the tier yields nothing. A
//! well-formed block that fails the range check ends the chain with no score.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::constants::SCORE_MARKER;
use crate::domain::types::ScoreAssessment;

static BLOCK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)SCORE_ASSESSMENT:\s*(\{.*\})").expect("valid score block pattern")
});

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

static OVERALL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)["']?overall["']?\s*:\s*["']?(\d{1,3})\b"#).expect("valid overall pattern")
});

static LOOSE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,3})\s*/\s*100\b|(?i:score)\D{0,20}?(\d{1,3})\b|\b(\d{1,3})\s*%")
        .expect("valid loose score pattern")
});

/// Which tier produced the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSource {
    Block,
    ManualOverall,
    Loose,
}

/// Hint text with the score block stripped, plus whatever score was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreExtraction {
    pub hint: String,
    pub score: Option<ScoreAssessment>,
    pub source: Option<ScoreSource>,
}

/// Result of matching the block pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockMatch {
    /// Byte offset of the marker; everything from here on is not shown to the user.
    pub marker_start: usize,
    pub outcome: BlockOutcome,
}

/// What the brace-delimited object after the marker turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockOutcome {
    Valid(ScoreAssessment),
    /// Well-formed JSON that failed the range check. Final: no later tier runs.
    OutOfRange,
    /// Not JSON; the manual `overall:` tier may still recover a score.
    Unparseable,
}

/// Split `text` into the hint shown to the user and an optional score.
pub fn extract_score(text: &str) -> ScoreExtraction {
    let has_marker = text.contains(SCORE_MARKER);
    let block = parse_score_block(text);

    let hint = match &block {
        Some(found) => text[..found.marker_start].trim().to_string(),
        None => text.to_string(),
    };

    let outcome = block.map(|b| b.outcome);
    let (score, source) = if let Some(BlockOutcome::Valid(score)) = outcome {
        (Some(score), Some(ScoreSource::Block))
    } else if outcome == Some(BlockOutcome::OutOfRange) {
        (None, None)
    } else if has_marker {
        match manual_overall(text) {
            Some(score) => (Some(score), Some(ScoreSource::ManualOverall)),
            None => (None, None),
        }
    } else {
        match loose_overall(text) {
            Some(score) => (Some(score), Some(ScoreSource::Loose)),
            None => (None, None),
        }
    };

    debug!(
        has_marker,
        source = ?source,
        overall = score.map(|s| s.overall),
        "Score extraction finished"
    );

    ScoreExtraction {
        hint,
        score,
        source,
    }
}

/// Tier 1: the marker followed by a brace-delimited object.
///
/// Returns `None` when the pattern does not match at all. A match with
/// unparseable JSON still reports the marker position so the caller can strip it.
pub fn parse_score_block(text: &str) -> Option<BlockMatch> {
    let captures = BLOCK_PATTERN.captures(text)?;
    let marker_start = captures.get(0)?.start();
    let object = captures.get(1)?.as_str();

    let collapsed = WHITESPACE.replace_all(object, " ");
    let outcome = match serde_json::from_str::<ScoreAssessment>(&collapsed) {
        Ok(score) if score.is_within_range() => BlockOutcome::Valid(score),
        Ok(score) => {
            debug!(overall = score.overall, "Score block out of range");
            BlockOutcome::OutOfRange
        }
        Err(err) => {
            debug!(%err, "Score block is not valid JSON");
            BlockOutcome::Unparseable
        }
    };

    Some(BlockMatch {
        marker_start,
        outcome,
    })
}

/// Tier 2: an `overall: <int>` pair anywhere in the text, quotes optional.
pub fn manual_overall(text: &str) -> Option<ScoreAssessment> {
    let captures = OVERALL_PATTERN.captures(text)?;
    let overall = captures.get(1)?.as_str().parse::<u32>().ok()?;
    Some(ScoreAssessment::overall_only(overall)).filter(ScoreAssessment::is_within_range)
}

/// Tier 3: the first loose numeric rating in the text.
///
/// Only the first match is considered; if it is out of range there is no score.
pub fn loose_overall(text: &str) -> Option<ScoreAssessment> {
    let captures = LOOSE_PATTERN.captures(text)?;
    let digits = (1..=3).find_map(|group| captures.get(group))?;
    let overall = digits.as_str().parse::<u32>().ok()?;
    Some(ScoreAssessment::overall_only(overall)).filter(ScoreAssessment::is_within_range)
}
