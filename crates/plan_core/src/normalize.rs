//! Plan normalizer: the single source of truth for what a legal
//! instruction is.
//!
//! Takes the parser's loosely-typed [`Candidate`] and produces a
//! [`LandscapePlan`] whose every field is in range. Policy throughout:
//! out-of-range numerics are clamped, never cause a drop; unparseable
//! numerics are omitted, never defaulted to zero; a descriptor is dropped
//! only when its type cannot be resolved to the canonical vocabulary.
//! Normalization is idempotent over its own serialized output.

use std::collections::BTreeSet;

use serde_json::{Map, Value};

use crate::PlanError;
use crate::parse::Candidate;
use crate::plan::{EntityDescriptor, LandscapePlan, SizeClass};
use crate::vocab::{EntityType, Tag};

pub const QUANTITY_MIN: u32 = 1;
pub const QUANTITY_MAX: u32 = 10;
pub const DIM_MIN: f32 = 0.1;
pub const DIM_MAX: f32 = 400.0;
pub const SCALE_MIN: f32 = 0.1;
pub const SCALE_MAX: f32 = 50.0;
pub const SPREAD_MIN: f32 = 0.0;
pub const SPREAD_MAX: f32 = 200.0;
pub const COLOR_MAX_LEN: usize = 40;
pub const DETAIL_MAX_LEN: usize = 120;
pub const SUMMARY_MAX_LEN: usize = 200;
pub const DEFAULT_SUMMARY: &str = "A quiet stretch of empty desert.";

/// Type field lookup order within a candidate entity object.
const TYPE_KEYS: [&str; 5] = ["type", "entity", "kind", "target", "label"];

/// Validate and clamp a candidate into a renderable plan.
///
/// `EmptyPlan` when nothing survives; the caller's duty is to fall back,
/// not to surface an error.
pub fn normalize(candidate: Candidate) -> Result<LandscapePlan, PlanError> {
    let tags = normalize_tags(&candidate.tags);
    let entities: Vec<EntityDescriptor> = candidate
        .entities
        .iter()
        .filter_map(normalize_entity)
        .collect();
    if tags.is_empty() && entities.is_empty() {
        return Err(PlanError::EmptyPlan);
    }
    let summary = resolve_summary(candidate.summary.as_deref(), &tags, &entities);
    Ok(LandscapePlan {
        tags,
        entities,
        summary,
    })
}

/// Lowercase + trim each token, exact vocabulary match first, then the
/// substring heuristics. Unknown tokens are dropped without raising.
fn normalize_tags(tokens: &[String]) -> BTreeSet<Tag> {
    let mut out = BTreeSet::new();
    for raw in tokens {
        let token = raw.trim().to_lowercase();
        if token.is_empty() {
            continue;
        }
        match Tag::from_name(&token).or_else(|| Tag::from_fragment(&token)) {
            Some(tag) => {
                out.insert(tag);
            }
            None => log::debug!("dropping unknown tag token {token:?}"),
        }
    }
    out
}

/// Normalize one candidate entity. `None` means the whole descriptor is
/// dropped (unresolvable type); a bad individual field never drops an
/// otherwise-valid descriptor.
fn normalize_entity(raw: &Value) -> Option<EntityDescriptor> {
    let Some(kind) = entity_kind(raw) else {
        log::warn!("dropping entity with unresolvable type: {raw}");
        metrics::counter!("plan.dropped_entities_total", "reason" => "unresolved_type")
            .increment(1);
        return None;
    };
    let mut d = EntityDescriptor::new(kind, QUANTITY_MIN);
    // a bare string entity is shorthand for a type-only descriptor
    let Some(obj) = raw.as_object() else {
        return Some(d);
    };
    if let Some(q) = obj.get("quantity").and_then(num_value) {
        d.quantity = (q.trunc() as i64).clamp(QUANTITY_MIN as i64, QUANTITY_MAX as i64) as u32;
    }
    d.size = obj
        .get("size")
        .and_then(Value::as_str)
        .and_then(SizeClass::from_word);
    d.scale = clamped(obj, "scale", SCALE_MIN, SCALE_MAX);
    d.spread = clamped(obj, "spread", SPREAD_MIN, SPREAD_MAX);
    d.color = capped_string(obj, "color", COLOR_MAX_LEN);
    d.trunk_color = capped_string(obj, "trunkColor", COLOR_MAX_LEN);
    d.foliage_color = capped_string(obj, "foliageColor", COLOR_MAX_LEN);
    d.detail = capped_string(obj, "detail", DETAIL_MAX_LEN);
    d.floors = clamped(obj, "floors", DIM_MIN, DIM_MAX);
    d.height = clamped(obj, "height", DIM_MIN, DIM_MAX);
    d.width = clamped(obj, "width", DIM_MIN, DIM_MAX);
    d.depth = clamped(obj, "depth", DIM_MIN, DIM_MAX);
    d.radius = clamped(obj, "radius", DIM_MIN, DIM_MAX);
    d.length = clamped(obj, "length", DIM_MIN, DIM_MAX);
    d.thickness = clamped(obj, "thickness", DIM_MIN, DIM_MAX);
    Some(d)
}

/// Resolve the canonical type from the first present type-ish key.
/// If the first present key names an unknown type, the descriptor is
/// rejected rather than probing further keys.
fn entity_kind(raw: &Value) -> Option<EntityType> {
    if let Value::String(s) = raw {
        return EntityType::resolve_alias(s);
    }
    let obj = raw.as_object()?;
    let key = TYPE_KEYS
        .iter()
        .find_map(|k| obj.get(*k).and_then(Value::as_str))?;
    EntityType::resolve_alias(key)
}

/// A JSON number, or a string that fully parses as one. Non-finite values
/// are treated as absent so clamping stays well-defined.
fn num_value(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

fn clamped(obj: &Map<String, Value>, key: &str, min: f32, max: f32) -> Option<f32> {
    obj.get(key)
        .and_then(num_value)
        .map(|f| (f as f32).clamp(min, max))
}

/// Trimmed, length-capped (in chars), otherwise opaque pass-through.
fn capped_string(obj: &Map<String, Value>, key: &str, max: usize) -> Option<String> {
    let s = obj.get(key)?.as_str()?.trim();
    if s.is_empty() {
        return None;
    }
    // trim again after capping so re-normalizing is a no-op
    let capped: String = s.chars().take(max).collect();
    Some(capped.trim_end().to_string())
}

/// Explicit summary, else tag labels, else entity labels, else the default.
fn resolve_summary(
    explicit: Option<&str>,
    tags: &BTreeSet<Tag>,
    entities: &[EntityDescriptor],
) -> String {
    if let Some(s) = explicit {
        let s = s.trim();
        if !s.is_empty() {
            // trim again after capping so re-normalizing is a no-op
            let capped: String = s.chars().take(SUMMARY_MAX_LEN).collect();
            return capped.trim_end().to_string();
        }
    }
    let labels: Vec<&str> = if !tags.is_empty() {
        tags.iter().map(|t| t.label()).collect()
    } else {
        let mut seen: Vec<&str> = Vec::new();
        for e in entities {
            if !seen.contains(&e.kind.label()) {
                seen.push(e.kind.label());
            }
        }
        seen
    };
    if labels.is_empty() {
        return DEFAULT_SUMMARY.to_string();
    }
    format!("A desert scene with {}.", join_labels(&labels))
}

fn join_labels(labels: &[&str]) -> String {
    match labels {
        [] => String::new(),
        [only] => (*only).to_string(),
        [rest @ .., last] => format!("{} and {}", rest.join(", "), last),
    }
}
