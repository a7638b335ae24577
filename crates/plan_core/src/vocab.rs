//! Closed vocabularies for landscape plans.
//!
//! One canonical table for tags and entity types: exact aliases (plurals,
//! synonyms, Spanish variants) plus bilingual keyword fragments for loose
//! text matching. Every layer that touches vocabulary (normalizer, local
//! fallback generator, UI suggestion chips) resolves through this module,
//! so the tables cannot drift apart.

use serde::{Deserialize, Serialize};

/// Coarse landscape theme driving a whole-group spawn.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    Cacti,
    Oasis,
    Palms,
    Dunes,
    Rocks,
    Mesas,
    Ruins,
    Crystals,
    Storm,
    Stars,
    Flowers,
    Bones,
}

impl Tag {
    pub const ALL: [Tag; 12] = [
        Tag::Cacti,
        Tag::Oasis,
        Tag::Palms,
        Tag::Dunes,
        Tag::Rocks,
        Tag::Mesas,
        Tag::Ruins,
        Tag::Crystals,
        Tag::Storm,
        Tag::Stars,
        Tag::Flowers,
        Tag::Bones,
    ];

    /// Canonical lowercase identifier (stable; matches the serde form).
    pub fn name(self) -> &'static str {
        match self {
            Tag::Cacti => "cacti",
            Tag::Oasis => "oasis",
            Tag::Palms => "palms",
            Tag::Dunes => "dunes",
            Tag::Rocks => "rocks",
            Tag::Mesas => "mesas",
            Tag::Ruins => "ruins",
            Tag::Crystals => "crystals",
            Tag::Storm => "storm",
            Tag::Stars => "stars",
            Tag::Flowers => "flowers",
            Tag::Bones => "bones",
        }
    }

    /// Short display label used when composing plan summaries.
    pub fn label(self) -> &'static str {
        match self {
            Tag::Cacti => "cacti",
            Tag::Oasis => "an oasis",
            Tag::Palms => "palm trees",
            Tag::Dunes => "rolling dunes",
            Tag::Rocks => "scattered rocks",
            Tag::Mesas => "distant mesas",
            Tag::Ruins => "ancient ruins",
            Tag::Crystals => "glowing crystals",
            Tag::Storm => "a sandstorm",
            Tag::Stars => "a starry sky",
            Tag::Flowers => "desert blooms",
            Tag::Bones => "bleached bones",
        }
    }

    /// Exact match against the canonical identifier (input already trimmed;
    /// matching is ASCII-case-insensitive).
    pub fn from_name(s: &str) -> Option<Tag> {
        let s = s.to_ascii_lowercase();
        Tag::ALL.iter().copied().find(|t| t.name() == s)
    }

    /// Keyword fragments recognized in free text, Spanish and English.
    fn fragments(self) -> &'static [&'static str] {
        match self {
            Tag::Cacti => &["cact", "nopal", "saguaro"],
            Tag::Oasis => &["oasis"],
            Tag::Palms => &["palm"],
            Tag::Dunes => &["dune", "duna", "arena", "sand"],
            Tag::Rocks => &["roca", "rock", "piedra", "stone", "boulder"],
            Tag::Mesas => &["mesa", "meseta", "butte", "plateau"],
            Tag::Ruins => &["ruin", "templo", "temple", "antig", "ancient"],
            Tag::Crystals => &["cristal", "crystal", "cuarzo", "quartz", "gema", "gem"],
            Tag::Storm => &["storm", "torment", "ventisca"],
            Tag::Stars => &["estrella", "starry", "star"],
            Tag::Flowers => &["flor", "flower", "bloom"],
            Tag::Bones => &["hueso", "bone", "skelet", "esquelet", "calavera", "skull"],
        }
    }

    /// True if any keyword fragment of this tag occurs in `text`
    /// (caller lowercases).
    pub fn matches(self, text: &str) -> bool {
        self.fragments().iter().any(|f| text.contains(f))
    }

    /// First tag (declaration order) with a keyword fragment in `token`.
    pub fn from_fragment(token: &str) -> Option<Tag> {
        Tag::ALL.iter().copied().find(|t| t.matches(token))
    }
}

/// Canonical kind of a spawnable entity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Structure,
    Tree,
    Cactus,
    Rock,
    Crystal,
    Water,
    Plant,
    Creature,
    Bird,
    Human,
    Monolith,
    Campfire,
}

impl EntityType {
    pub const ALL: [EntityType; 12] = [
        EntityType::Structure,
        EntityType::Tree,
        EntityType::Cactus,
        EntityType::Rock,
        EntityType::Crystal,
        EntityType::Water,
        EntityType::Plant,
        EntityType::Creature,
        EntityType::Bird,
        EntityType::Human,
        EntityType::Monolith,
        EntityType::Campfire,
    ];

    /// Canonical lowercase identifier (stable; matches the serde form).
    pub fn name(self) -> &'static str {
        match self {
            EntityType::Structure => "structure",
            EntityType::Tree => "tree",
            EntityType::Cactus => "cactus",
            EntityType::Rock => "rock",
            EntityType::Crystal => "crystal",
            EntityType::Water => "water",
            EntityType::Plant => "plant",
            EntityType::Creature => "creature",
            EntityType::Bird => "bird",
            EntityType::Human => "human",
            EntityType::Monolith => "monolith",
            EntityType::Campfire => "campfire",
        }
    }

    /// Short display label used when composing plan summaries.
    pub fn label(self) -> &'static str {
        match self {
            EntityType::Structure => "structures",
            EntityType::Tree => "trees",
            EntityType::Cactus => "cacti",
            EntityType::Rock => "rocks",
            EntityType::Crystal => "crystals",
            EntityType::Water => "water",
            EntityType::Plant => "desert plants",
            EntityType::Creature => "creatures",
            EntityType::Bird => "birds",
            EntityType::Human => "travelers",
            EntityType::Monolith => "monoliths",
            EntityType::Campfire => "a campfire",
        }
    }

    /// Resolve a raw kind string to a canonical entity type.
    ///
    /// Exact match after trim + lowercase. Every canonical name resolves to
    /// itself, so resolution is idempotent over normalized plans. Aliases
    /// cover plurals, common synonyms, and Spanish variants (with and
    /// without accents).
    pub fn resolve_alias(s: &str) -> Option<EntityType> {
        let k = s.trim().to_lowercase();
        Some(match k.as_str() {
            // structures
            "structure" | "structures" | "building" | "buildings" | "tower" | "towers"
            | "house" | "houses" | "hut" | "huts" | "pyramid" | "pyramids" | "tent"
            | "tents" | "edificio" | "edificios" | "torre" | "torres" | "casa" | "casas"
            | "piramide" | "pirámide" | "piramides" | "pirámides" | "carpa" | "carpas" => {
                EntityType::Structure
            }
            // trees
            "tree" | "trees" | "palm" | "palms" | "palm tree" | "palm trees" | "acacia"
            | "acacias" | "arbol" | "árbol" | "arboles" | "árboles" | "palmera"
            | "palmeras" => EntityType::Tree,
            // cacti
            "cactus" | "cacti" | "cactuses" | "cacto" | "cactos" | "nopal" | "nopales"
            | "saguaro" | "saguaros" => EntityType::Cactus,
            // rocks
            "rock" | "rocks" | "stone" | "stones" | "boulder" | "boulders" | "roca"
            | "rocas" | "piedra" | "piedras" => EntityType::Rock,
            // crystals
            "crystal" | "crystals" | "cristal" | "cristales" | "gem" | "gems" | "gema"
            | "gemas" | "quartz" | "cuarzo" => EntityType::Crystal,
            // water features
            "water" | "agua" | "oasis" | "lake" | "lakes" | "lago" | "lagos" | "pond"
            | "ponds" | "estanque" | "laguna" | "lagoon" | "spring" | "manantial"
            | "pool" | "poza" => EntityType::Water,
            // low vegetation
            "plant" | "plants" | "planta" | "plantas" | "bush" | "bushes" | "arbusto"
            | "arbustos" | "shrub" | "shrubs" | "flower" | "flowers" | "flor" | "flores"
            | "grass" | "hierba" | "pasto" => EntityType::Plant,
            // ground fauna
            "creature" | "creatures" | "criatura" | "criaturas" | "animal" | "animals"
            | "animales" | "camel" | "camels" | "camello" | "camellos" | "lizard"
            | "lizards" | "lagarto" | "lagartos" | "snake" | "snakes" | "serpiente"
            | "serpientes" | "vibora" | "víbora" | "scorpion" | "scorpions"
            | "escorpion" | "escorpión" | "fox" | "zorro" | "coyote" | "coyotes" => {
                EntityType::Creature
            }
            // birds
            "bird" | "birds" | "pajaro" | "pájaro" | "pajaros" | "pájaros" | "ave"
            | "aves" | "eagle" | "eagles" | "aguila" | "águila" | "hawk" | "halcon"
            | "halcón" | "vulture" | "vultures" | "buitre" | "owl" | "buho" | "búho" => {
                EntityType::Bird
            }
            // people
            "human" | "humans" | "person" | "people" | "humano" | "humanos" | "persona"
            | "personas" | "gente" | "traveler" | "travelers" | "viajero" | "viajeros"
            | "nomad" | "nomads" | "nomada" | "nómada" | "wanderer" | "wanderers"
            | "figure" | "figura" | "figuras" => EntityType::Human,
            // monoliths
            "monolith" | "monoliths" | "monolito" | "monolitos" | "obelisk" | "obelisco"
            | "stele" | "estela" | "pillar" | "pillars" | "pilar" | "pilares"
            | "standing stone" => EntityType::Monolith,
            // campfires
            "campfire" | "campfires" | "bonfire" | "fogata" | "fogatas" | "hoguera"
            | "hogueras" | "fuego" => EntityType::Campfire,
            _ => return None,
        })
    }

    /// Keyword fragments recognized in free prompt text, Spanish and English.
    ///
    /// Deliberately narrower than the alias table: short fragments that are
    /// substrings of everyday words ("ave", "fire") are left out.
    fn fragments(self) -> &'static [&'static str] {
        match self {
            EntityType::Structure => &[
                "torre", "tower", "templo", "temple", "piramid", "pirámid", "edificio",
                "building", "casa", "house", "hut", "ruina", "ruin",
            ],
            EntityType::Tree => &["palmera", "palm", "arbol", "árbol", "tree", "acacia"],
            EntityType::Cactus => &["cact", "nopal", "saguaro"],
            EntityType::Rock => &["roca", "rock", "piedra", "stone", "boulder"],
            EntityType::Crystal => &["cristal", "crystal", "cuarzo", "quartz", "gema", "gem"],
            EntityType::Water => &[
                "oasis", "agua", "water", "lago", "lake", "estanque", "pond",
                "manantial", "spring", "laguna",
            ],
            EntityType::Plant => &[
                "flor", "flower", "arbusto", "bush", "shrub", "planta", "plant",
                "hierba", "grass",
            ],
            EntityType::Creature => &[
                "camello", "camel", "lagarto", "lizard", "serpiente", "snake",
                "escorpi", "scorpi", "zorro", "fox", "coyote", "animal", "criatura",
                "creature",
            ],
            EntityType::Bird => &[
                "pajaro", "pájaro", "bird", "aguila", "águila", "eagle", "halcon",
                "halcón", "hawk", "buitre", "vulture", "buho", "búho", "owl",
            ],
            EntityType::Human => &[
                "viajero", "traveler", "nomada", "nómada", "nomad", "persona", "person",
                "gente", "people", "humano", "human", "wanderer",
            ],
            EntityType::Monolith => &["monolit", "obelisc", "obelisk", "estela", "pillar", "pilar"],
            EntityType::Campfire => &["fogata", "hoguera", "campfire", "bonfire", "fuego"],
        }
    }

    /// True if any keyword fragment of this type occurs in `text`
    /// (caller lowercases).
    pub fn matches(self, text: &str) -> bool {
        self.fragments().iter().any(|f| text.contains(f))
    }

    /// First entity type (declaration order) with a keyword fragment in
    /// `token`.
    pub fn from_fragment(token: &str) -> Option<EntityType> {
        EntityType::ALL.iter().copied().find(|t| t.matches(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_names_round_trip() {
        for t in Tag::ALL {
            assert_eq!(Tag::from_name(t.name()), Some(t));
        }
        assert_eq!(Tag::from_name("CRYSTALS"), Some(Tag::Crystals));
        assert_eq!(Tag::from_name("bogus"), None);
    }

    #[test]
    fn tag_fragments_cover_both_languages() {
        assert_eq!(Tag::from_fragment("cristales"), Some(Tag::Crystals));
        assert_eq!(Tag::from_fragment("una tormenta"), Some(Tag::Storm));
        assert_eq!(Tag::from_fragment("skeletons"), Some(Tag::Bones));
        assert_eq!(Tag::from_fragment("zzz"), None);
    }

    #[test]
    fn aliases_resolve_to_canonical() {
        assert_eq!(EntityType::resolve_alias("towers"), Some(EntityType::Structure));
        assert_eq!(EntityType::resolve_alias(" Palmera "), Some(EntityType::Tree));
        assert_eq!(EntityType::resolve_alias("oasis"), Some(EntityType::Water));
        assert_eq!(EntityType::resolve_alias("águila"), Some(EntityType::Bird));
        assert_eq!(EntityType::resolve_alias("spaceship"), None);
    }

    #[test]
    fn canonical_names_resolve_to_themselves() {
        for ty in EntityType::ALL {
            assert_eq!(EntityType::resolve_alias(ty.name()), Some(ty));
        }
    }

    #[test]
    fn fragment_scan_finds_types_in_free_text() {
        let text = "un oasis con cristales y palmeras";
        assert!(EntityType::Water.matches(text));
        assert!(EntityType::Crystal.matches(text));
        assert!(EntityType::Tree.matches(text));
        assert!(!EntityType::Campfire.matches(text));
    }

    #[test]
    fn traveler_is_not_a_bird() {
        // "ave" is deliberately absent from the bird fragments; it is a
        // substring of too many unrelated words.
        assert_eq!(EntityType::from_fragment("travelers resting"), Some(EntityType::Human));
    }
}
