//! Terminal rendering for hints and scores.

use thinkdsa_core::ScoreAssessment;
use thinkdsa_core::store::StoredScore;

pub fn score_badge(score: &ScoreAssessment) -> String {
    format!("Understanding: {}/100 ({})", score.overall, score.band())
}

pub fn score_details(score: &ScoreAssessment) -> String {
    let mut out = score_badge(score);
    if let Some(b) = score.breakdown {
        out.push_str(&format!(
            "\n  conceptual      {:>2}/25\n  implementation  {:>2}/25\n  optimization    {:>2}/25\n  testing         {:>2}/25",
            b.conceptual, b.implementation, b.optimization, b.testing
        ));
    }
    out
}

pub fn hint_block(hint: &str, score: Option<&ScoreAssessment>) -> String {
    match score {
        Some(score) => format!("{hint}\n\n{}", score_details(score)),
        None => hint.to_string(),
    }
}

pub fn stored_line(stored: &StoredScore) -> String {
    let score = stored.assessment();
    format!(
        "{:>3}  {:<10}  {}  ({})",
        score.overall,
        score.band().label(),
        stored.title,
        stored.updated_at.format("%Y-%m-%d %H:%M")
    )
}
