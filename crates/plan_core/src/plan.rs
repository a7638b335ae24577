//! Normalized landscape plan model.
//!
//! A `LandscapePlan` is the only shape the scene layer accepts: closed-enum
//! tags, canonical entity descriptors with clamped numerics, and a non-empty
//! summary. Serialization uses camelCase field names so a serialized plan is
//! also a valid interpreter response (normalization is idempotent over its
//! own output).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::vocab::{EntityType, Tag};

/// Relative footprint of an entity group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    Small,
    #[default]
    Medium,
    Large,
}

impl SizeClass {
    /// Fixed word list, English and Spanish. Unrecognized words yield `None`
    /// so the caller omits the field rather than defaulting it.
    pub fn from_word(s: &str) -> Option<SizeClass> {
        Some(match s.trim().to_lowercase().as_str() {
            "small" | "tiny" | "little" | "mini" | "pequeño" | "pequeno" | "pequeña"
            | "pequena" | "chico" | "chica" => SizeClass::Small,
            "medium" | "normal" | "average" | "regular" | "mediano" | "mediana" => {
                SizeClass::Medium
            }
            "large" | "big" | "huge" | "giant" | "massive" | "grande" | "enorme"
            | "gigante" | "masivo" | "masiva" => SizeClass::Large,
            _ => return None,
        })
    }

    /// Radius multiplier applied when resolving spawn distances.
    pub fn radius_multiplier(self) -> f32 {
        match self {
            SizeClass::Small => 0.6,
            SizeClass::Medium => 1.0,
            SizeClass::Large => 1.6,
        }
    }
}

/// One normalized entity group within a plan.
///
/// `quantity` is always within the global clamp range; dimension fields are
/// present only when the interpreter supplied a usable value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityDescriptor {
    #[serde(rename = "type")]
    pub kind: EntityType,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<SizeClass>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trunk_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foliage_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spread: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floors: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f32>,
}

impl EntityDescriptor {
    /// A descriptor with just a kind and quantity; everything else default.
    pub fn new(kind: EntityType, quantity: u32) -> Self {
        Self {
            kind,
            quantity,
            size: None,
            scale: None,
            color: None,
            trunk_color: None,
            foliage_color: None,
            spread: None,
            detail: None,
            floors: None,
            height: None,
            width: None,
            depth: None,
            radius: None,
            length: None,
            thickness: None,
        }
    }
}

/// The normalized output of interpretation: what to spawn and how to
/// describe it. Tags are a sorted set (stable iteration order), entities
/// keep the interpreter's order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandscapePlan {
    #[serde(default)]
    pub tags: BTreeSet<Tag>,
    #[serde(default)]
    pub entities: Vec<EntityDescriptor>,
    #[serde(default)]
    pub summary: String,
}

impl LandscapePlan {
    /// True when the plan would spawn nothing.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_words_map_to_classes() {
        assert_eq!(SizeClass::from_word("tiny"), Some(SizeClass::Small));
        assert_eq!(SizeClass::from_word(" pequeña "), Some(SizeClass::Small));
        assert_eq!(SizeClass::from_word("ENORME"), Some(SizeClass::Large));
        assert_eq!(SizeClass::from_word("normal"), Some(SizeClass::Medium));
        assert_eq!(SizeClass::from_word("colossal-ish"), None);
        assert_eq!(SizeClass::from_word(""), None);
    }

    #[test]
    fn descriptor_serializes_camel_case_and_skips_none() {
        let d = EntityDescriptor::new(EntityType::Cactus, 4);
        let v = serde_json::to_value(&d).unwrap();
        assert_eq!(v["type"], "cactus");
        assert_eq!(v["quantity"], 4);
        assert!(v.get("size").is_none());
        assert!(v.get("trunkColor").is_none());
        assert!(v.get("height").is_none());
    }

    #[test]
    fn descriptor_round_trips_optional_dimensions() {
        let mut d = EntityDescriptor::new(EntityType::Structure, 2);
        d.floors = Some(3.0);
        d.height = Some(12.5);
        d.trunk_color = Some("#8b5a2b".into());
        let s = serde_json::to_string(&d).unwrap();
        assert!(s.contains("\"trunkColor\""));
        let back: EntityDescriptor = serde_json::from_str(&s).unwrap();
        assert_eq!(back, d);
    }

    #[test]
    fn plan_default_is_empty() {
        let p = LandscapePlan::default();
        assert!(p.is_empty());
        assert_eq!(p.summary, "");
    }
}
