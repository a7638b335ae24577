use async_trait::async_trait;
use interp_http::{InterpError, Interpreter};
use mirage::flow::{PlanSource, plan_from_prompt};
use plan_core::{EntityType, Tag};
use serde_json::{Value, json};

enum Reply {
    Value(Value),
    Timeout,
    Status(u16),
}

struct StubInterp(Reply);

#[async_trait]
impl Interpreter for StubInterp {
    async fn interpret(&self, _prompt: &str) -> Result<Value, InterpError> {
        match &self.0 {
            Reply::Value(v) => Ok(v.clone()),
            Reply::Timeout => Err(InterpError::Timeout),
            Reply::Status(code) => Err(InterpError::Status(*code)),
        }
    }
}

#[tokio::test]
async fn well_formed_remote_response_is_used() {
    let interp = StubInterp(Reply::Value(json!({
        "summary": "x",
        "tags": ["CRYSTALS", " bogus "],
        "entities": []
    })));
    let out = plan_from_prompt(&interp, "cristales").await;
    assert_eq!(out.source, PlanSource::Remote);
    assert!(!out.used_fallback());
    assert_eq!(
        out.plan.tags.iter().copied().collect::<Vec<_>>(),
        vec![Tag::Crystals]
    );
    assert_eq!(out.plan.summary, "x");
}

#[tokio::test]
async fn fenced_json_in_string_still_counts_as_remote() {
    let raw = "```json\n{\"tags\":[\"dunes\"],\"entities\":[{\"type\":\"towers\",\"quantity\":999}]}\n```";
    let interp = StubInterp(Reply::Value(Value::String(raw.to_string())));
    let out = plan_from_prompt(&interp, "whatever").await;
    assert_eq!(out.source, PlanSource::Remote);
    assert!(out.plan.tags.contains(&Tag::Dunes));
    assert_eq!(out.plan.entities[0].kind, EntityType::Structure);
    assert_eq!(out.plan.entities[0].quantity, 10);
}

#[tokio::test]
async fn unreachable_backend_falls_back_on_prompt_keywords() {
    let interp = StubInterp(Reply::Timeout);
    let out = plan_from_prompt(&interp, "un oasis con cristales").await;
    assert_eq!(out.source, PlanSource::LocalFallback);
    let kinds: Vec<EntityType> = out.plan.entities.iter().map(|e| e.kind).collect();
    assert!(kinds.contains(&EntityType::Water));
    assert!(kinds.contains(&EntityType::Crystal));
    for e in &out.plan.entities {
        assert!((1..=3).contains(&e.quantity));
    }
}

#[tokio::test]
async fn error_status_falls_back() {
    let interp = StubInterp(Reply::Status(500));
    let out = plan_from_prompt(&interp, "three rocks").await;
    assert!(out.used_fallback());
    assert!(
        out.plan
            .entities
            .iter()
            .any(|e| e.kind == EntityType::Rock)
    );
}

#[tokio::test]
async fn semantically_empty_response_falls_back() {
    let interp = StubInterp(Reply::Value(json!({
        "tags": ["bogus"],
        "entities": [{"type": "spaceship"}]
    })));
    let out = plan_from_prompt(&interp, "palmeras").await;
    assert!(out.used_fallback());
    assert!(
        out.plan
            .entities
            .iter()
            .any(|e| e.kind == EntityType::Tree)
    );
}

#[tokio::test]
async fn prose_response_falls_back() {
    let interp = StubInterp(Reply::Value(Value::String(
        "I'm sorry, I can't help with landscapes.".to_string(),
    )));
    let out = plan_from_prompt(&interp, "gibberish prompt qqq").await;
    assert!(out.used_fallback());
    // even a keywordless prompt must yield a renderable plan
    assert!(!out.plan.is_empty());
    assert!(!out.plan.summary.is_empty());
}
