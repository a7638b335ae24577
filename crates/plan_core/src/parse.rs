//! Best-effort parser for raw interpreter output.
//!
//! Backends return anything from clean JSON to fenced markdown with prose
//! around it, to JSON nested one level deep under `data`/`response`/etc., to
//! JSON-in-a-string. This module digs the candidate plan fields out of all of
//! those shapes; it never validates content (that is the normalizer's job).

use serde_json::Value;

use crate::PlanError;

/// Loosely-typed plan candidate as extracted from a raw response.
///
/// Tags are raw tokens, entities raw JSON values; both go through
/// [`crate::normalize`] before anything downstream sees them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Candidate {
    pub summary: Option<String>,
    pub tags: Vec<String>,
    pub entities: Vec<Value>,
}

/// Nesting paths probed, in order, after the root object itself.
const NESTED_PATHS: [&str; 4] = ["data", "response", "result", "plan"];

/// Parse a raw text blob: strip code fences, slice from the first `{` to the
/// last `}` (commentary around the JSON is common), then decode.
pub fn parse_text(raw: &str) -> Result<Candidate, PlanError> {
    let body = strip_fences(raw);
    let (Some(start), Some(end)) = (body.find('{'), body.rfind('}')) else {
        return Err(PlanError::MalformedResponse(
            "no JSON object in response text".into(),
        ));
    };
    if end < start {
        return Err(PlanError::MalformedResponse(
            "mismatched braces in response text".into(),
        ));
    }
    let v: Value = serde_json::from_str(&body[start..=end])
        .map_err(|e| PlanError::MalformedResponse(format!("invalid JSON: {e}")))?;
    parse_value(&v)
}

/// Parse an already-decoded JSON value.
///
/// A string payload is treated as JSON-in-string and re-parsed as text.
/// Otherwise the root object is probed first, then each known nesting path;
/// the first object carrying at least one candidate field wins.
pub fn parse_value(v: &Value) -> Result<Candidate, PlanError> {
    if let Value::String(inner) = v {
        return parse_text(inner);
    }
    if let Some(c) = candidate_from(v) {
        return Ok(c);
    }
    for key in NESTED_PATHS {
        if let Some(c) = v.get(key).and_then(candidate_from) {
            return Ok(c);
        }
    }
    Err(PlanError::MalformedResponse(
        "no summary/tags/entities at any known path".into(),
    ))
}

/// Drop a leading ```lang fence line and a trailing ``` fence.
fn strip_fences(raw: &str) -> &str {
    let mut s = raw.trim();
    if let Some(rest) = s.strip_prefix("```") {
        s = match rest.find('\n') {
            Some(i) => &rest[i + 1..],
            None => rest,
        };
    }
    if let Some(rest) = s.trim_end().strip_suffix("```") {
        s = rest;
    }
    s.trim()
}

fn candidate_from(v: &Value) -> Option<Candidate> {
    let obj = v.as_object()?;
    if !obj.contains_key("summary") && !obj.contains_key("tags") && !obj.contains_key("entities")
    {
        return None;
    }
    let summary = obj
        .get("summary")
        .and_then(Value::as_str)
        .map(str::to_string);
    let tags = match obj.get("tags") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|t| match t.as_str() {
                Some(s) => Some(s.to_string()),
                None => {
                    log::debug!("skipping non-string tag token: {t}");
                    None
                }
            })
            .collect(),
        // a bare string is tolerated as a single token
        Some(Value::String(one)) => vec![one.clone()],
        _ => Vec::new(),
    };
    let entities = match obj.get("entities") {
        Some(Value::Array(items)) => items.clone(),
        Some(one @ Value::Object(_)) => vec![one.clone()],
        _ => Vec::new(),
    };
    Some(Candidate {
        summary,
        tags,
        entities,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_fenced_json_with_language_hint() {
        let raw = "```json\n{\"summary\":\"x\",\"tags\":[\"CRYSTALS\",\" bogus \"],\"entities\":[]}\n```";
        let c = parse_text(raw).unwrap();
        assert_eq!(c.summary.as_deref(), Some("x"));
        assert_eq!(c.tags, vec!["CRYSTALS".to_string(), " bogus ".to_string()]);
        assert!(c.entities.is_empty());
    }

    #[test]
    fn slices_json_out_of_surrounding_prose() {
        let raw = "Sure! Here is your plan:\n{\"tags\":[\"dunes\"]}\nEnjoy.";
        let c = parse_text(raw).unwrap();
        assert_eq!(c.tags, vec!["dunes".to_string()]);
    }

    #[test]
    fn probes_nested_paths_in_order() {
        let v = json!({ "data": { "tags": ["oasis"], "entities": [] } });
        let c = parse_value(&v).unwrap();
        assert_eq!(c.tags, vec!["oasis".to_string()]);

        let v = json!({ "response": { "summary": "hi" } });
        let c = parse_value(&v).unwrap();
        assert_eq!(c.summary.as_deref(), Some("hi"));
    }

    #[test]
    fn root_object_wins_over_nested() {
        let v = json!({
            "tags": ["storm"],
            "data": { "tags": ["oasis"] }
        });
        let c = parse_value(&v).unwrap();
        assert_eq!(c.tags, vec!["storm".to_string()]);
    }

    #[test]
    fn json_in_string_is_reparsed() {
        let v = Value::String("{\"summary\":\"inner\",\"entities\":[]}".to_string());
        let c = parse_value(&v).unwrap();
        assert_eq!(c.summary.as_deref(), Some("inner"));
    }

    #[test]
    fn single_string_tag_and_single_object_entity_are_tolerated() {
        let v = json!({ "tags": "oasis", "entities": { "type": "cactus" } });
        let c = parse_value(&v).unwrap();
        assert_eq!(c.tags, vec!["oasis".to_string()]);
        assert_eq!(c.entities.len(), 1);
    }

    #[test]
    fn garbage_is_malformed_not_a_panic() {
        assert!(matches!(
            parse_text("no braces here at all"),
            Err(PlanError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_text("} backwards {"),
            Err(PlanError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_text("{not json}"),
            Err(PlanError::MalformedResponse(_))
        ));
        let v = json!({ "weather": "sunny" });
        assert!(matches!(
            parse_value(&v),
            Err(PlanError::MalformedResponse(_))
        ));
    }

    #[test]
    fn non_string_tag_tokens_are_skipped() {
        let v = json!({ "tags": ["oasis", 7, null, "dunes"] });
        let c = parse_value(&v).unwrap();
        assert_eq!(c.tags, vec!["oasis".to_string(), "dunes".to_string()]);
    }
}
