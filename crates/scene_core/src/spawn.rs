//! Spawn resolver: turns a normalized plan into placed build commands.
//!
//! Placement is distance-from-viewer sampling on the ground plane: every
//! command gets an independent uniform bearing and a uniform radius within
//! the range resolved for it. Tag-driven and entity-driven spawns keep
//! separate range policies. Placements are not deduplicated or
//! collision-checked; desert scenes tolerate overlap.

use glam::Vec3;
use rand::{Rng, SeedableRng, rngs::SmallRng};

use plan_core::{LandscapePlan, SizeClass, Tag};

use crate::capability::{CapabilityKey, SpawnRequest};

/// Hard limits every resolved radius range is clamped to.
pub const MIN_SPAWN_RADIUS: f32 = 2.0;
pub const MAX_SPAWN_RADIUS: f32 = 400.0;

/// Base [min, max] distance for one entity instance, before size/spread.
pub const ENTITY_BASE_RADIUS: (f32, f32) = (6.0, 60.0);

/// Distance range for tags without a specific table entry.
pub const DEFAULT_TAG_RADIUS: (f32, f32) = (20.0, 120.0);

/// Where one object goes: ground-plane position (y = 0), the sampled
/// bearing, and the sampled distance that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Vec3,
    pub bearing: f32,
    pub radius: f32,
}

/// One resolved unit of work for the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnCommand {
    pub key: CapabilityKey,
    pub placement: Placement,
    pub request: SpawnRequest,
}

/// Per-tag distance ranges; themes that read as backdrop sit further out.
fn tag_radius(tag: Tag) -> (f32, f32) {
    match tag {
        Tag::Oasis => (30.0, 90.0),
        Tag::Ruins => (40.0, 140.0),
        Tag::Dunes => (60.0, 220.0),
        Tag::Storm => (80.0, 200.0),
        Tag::Mesas => (150.0, 350.0),
        Tag::Cacti | Tag::Flowers => (8.0, 50.0),
        _ => DEFAULT_TAG_RADIUS,
    }
}

/// Owns the placement RNG. One resolver per session.
#[derive(Debug)]
pub struct SpawnResolver {
    rng: SmallRng,
}

impl Default for SpawnResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SpawnResolver {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Deterministic placements for tests and replayable sessions.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Every tag yields exactly one command; every descriptor yields
    /// `quantity` commands with independent samples.
    pub fn resolve(&mut self, plan: &LandscapePlan, viewer: Vec3) -> Vec<SpawnCommand> {
        let mut out = Vec::new();
        for &tag in &plan.tags {
            let range = tag_radius(tag);
            out.push(SpawnCommand {
                key: CapabilityKey::Tag(tag),
                placement: self.sample(viewer, range),
                request: SpawnRequest::Theme(tag),
            });
        }
        for d in &plan.entities {
            let mult = d.size.unwrap_or(SizeClass::Medium).radius_multiplier();
            let spread = d.spread.unwrap_or(0.0);
            let range = entity_radius(mult, spread);
            for _ in 0..d.quantity {
                out.push(SpawnCommand {
                    key: CapabilityKey::Entity(d.kind),
                    placement: self.sample(viewer, range),
                    request: SpawnRequest::Entity(d.clone()),
                });
            }
        }
        log::debug!(
            "resolved {} spawn commands ({} tags, {} descriptors)",
            out.len(),
            plan.tags.len(),
            plan.entities.len()
        );
        out
    }

    fn sample(&mut self, viewer: Vec3, (min, max): (f32, f32)) -> Placement {
        let bearing = self.rng.random_range(0.0..std::f32::consts::TAU);
        let radius = self.rng.random_range(min..=max);
        Placement {
            position: Vec3::new(
                viewer.x + bearing.sin() * radius,
                0.0,
                viewer.z + bearing.cos() * radius,
            ),
            bearing,
            radius,
        }
    }
}

/// Scale the base range by the size multiplier, widen the outer bound by
/// `spread`, then clamp both bounds to the global hard limits.
fn entity_radius(mult: f32, spread: f32) -> (f32, f32) {
    let min = (ENTITY_BASE_RADIUS.0 * mult).clamp(MIN_SPAWN_RADIUS, MAX_SPAWN_RADIUS);
    let max = (ENTITY_BASE_RADIUS.1 * mult + spread).clamp(min, MAX_SPAWN_RADIUS);
    (min, max)
}
