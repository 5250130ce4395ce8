// End-to-end hint flow: scripted Gemini replies through the service into the score store

use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::tempdir;
use thinkdsa_core::model::{GeminiClient, HttpReply, HttpTransport, ModelError, TokioDelay};
use thinkdsa_core::store::ScoreStore;
use thinkdsa_core::{HintService, ProblemContext, ScoreBand};
use tokio::time::Instant;

struct Scripted {
    replies: Mutex<VecDeque<HttpReply>>,
    prompts: Mutex<Vec<String>>,
}

impl Scripted {
    fn new(replies: Vec<HttpReply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl HttpTransport for Scripted {
    async fn post_json(
        &self,
        _url: &str,
        _api_key: &str,
        body: &Value,
    ) -> Result<HttpReply, ModelError> {
        let prompt = body["contents"][0]["parts"][0]["text"]
            .as_str()
            .unwrap_or_default()
            .to_string();
        self.prompts.lock().unwrap().push(prompt);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ModelError::network("scripted", "no reply scripted"))
    }
}

fn reply_text(text: &str) -> HttpReply {
    HttpReply::new(
        200,
        json!({"candidates": [{"content": {"parts": [{"text": text}], "role": "model"}}]})
            .to_string(),
    )
}

fn service(transport: Arc<Scripted>) -> HintService {
    let client = GeminiClient::default()
        .with_transport(transport)
        .with_delay(Arc::new(TokioDelay));
    HintService::new(Arc::new(client))
}

fn valid_parentheses() -> ProblemContext {
    ProblemContext::from_page(
        Some("20. Valid Parentheses"),
        Some("Given a string s containing just the characters '(', ')', '{', '}', '[' and ']'..."),
        Some("Java\n"),
    )
}

#[tokio::test]
async fn first_hint_then_code_feedback_records_latest_score() {
    let dir = tempdir().expect("tempdir");
    let store = ScoreStore::new(dir.path().join("scores.json"));
    let transport = Scripted::new(vec![
        reply_text(
            "What data structure remembers the most recent opener?\n\nSCORE_ASSESSMENT: {\"overall\": 0, \"breakdown\": {\"conceptual\": 0, \"implementation\": 0, \"optimization\": 0, \"testing\": 0}}",
        ),
        reply_text(
            "Good use of a stack. What happens when the string starts with ')'?\n\nSCORE_ASSESSMENT: {\"overall\": 72, \"breakdown\": {\"conceptual\": 20, \"implementation\": 18, \"optimization\": 19, \"testing\": 15}}",
        ),
    ]);
    let service = service(transport.clone());

    let first = service.request_hint(&valid_parentheses(), "key").await;
    assert_eq!(
        first.hint(),
        Some("What data structure remembers the most recent opener?")
    );
    store
        .record("20. Valid Parentheses", first.score().expect("score"))
        .expect("record");

    let with_code = valid_parentheses().with_user_code("Deque<Character> stack = new ArrayDeque<>();");
    let second = service.request_hint(&with_code, "key").await;
    let score = second.score().expect("score");
    assert_eq!(score.overall, 72);
    assert_eq!(score.band(), ScoreBand::Fair);
    store.record("20. Valid Parentheses", score).expect("record");

    let stored = store
        .get("20. Valid Parentheses")
        .expect("get")
        .expect("present");
    assert_eq!(stored.overall, 72);
    assert_eq!(store.list().expect("list").len(), 1);

    let prompts = transport.prompts.lock().unwrap();
    assert!(!prompts[0].contains("```"));
    assert!(prompts[1].contains("```java\nDeque<Character> stack = new ArrayDeque<>();\n```"));
}

#[tokio::test(start_paused = true)]
async fn rate_limited_request_waits_before_succeeding() {
    let transport = Scripted::new(vec![
        HttpReply::new(429, r#"{"error":{"code":429,"message":"Quota exceeded"}}"#),
        HttpReply::new(429, r#"{"error":{"code":429,"message":"Quota exceeded"}}"#),
        reply_text("Try a stack. Score: 30/100"),
    ]);
    let started = Instant::now();

    let result = service(transport.clone())
        .request_hint(&valid_parentheses(), "key")
        .await;

    assert!(started.elapsed() >= Duration::from_millis(4500));
    assert_eq!(result.score().map(|s| s.overall), Some(30));
    assert_eq!(transport.prompts.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn reply_without_score_leaves_store_untouched() {
    let dir = tempdir().expect("tempdir");
    let store = ScoreStore::new(dir.path().join("scores.json"));
    let transport = Scripted::new(vec![reply_text("Consider what each closer must match.")]);

    let result = service(transport).request_hint(&valid_parentheses(), "key").await;

    assert!(result.is_success());
    assert!(result.score().is_none());
    assert!(store.list().expect("list").is_empty());
}

#[tokio::test]
async fn network_failure_surfaces_as_error_result() {
    let transport = Scripted::new(vec![]);

    let result = service(transport).request_hint(&valid_parentheses(), "key").await;

    let message = result.error().expect("error");
    assert!(message.starts_with("Failed to get response from AI."));
}
