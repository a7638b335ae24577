//! Scene session: one object owning all mutable scene state.
//!
//! The per-frame callback, plan application, and stage transitions are all
//! methods here, so there is no hidden module-level state; a fresh session
//! resets everything. The session talks to the renderer exclusively through
//! [`SceneBackend`].

use glam::Vec3;

use plan_core::LandscapePlan;

use crate::NodeHandle;
use crate::anim::AnimationSet;
use crate::cache::ResourceCache;
use crate::capability::{CapabilityRegistry, SceneBackend};
use crate::pool::ScenePool;
use crate::spawn::SpawnResolver;
use crate::stage::{DayCycle, DayStage};

pub struct SceneSession {
    pool: ScenePool,
    anim: AnimationSet,
    registry: CapabilityRegistry,
    cycle: DayCycle,
    resolver: SpawnResolver,
    cache: ResourceCache<NodeHandle>,
    viewer_pos: Vec3,
}

impl SceneSession {
    pub fn new(capacity: usize, registry: CapabilityRegistry) -> Self {
        Self {
            pool: ScenePool::new(capacity),
            anim: AnimationSet::new(),
            registry,
            cycle: DayCycle::new(),
            resolver: SpawnResolver::new(),
            cache: ResourceCache::new(),
            viewer_pos: Vec3::ZERO,
        }
    }

    /// Deterministic placement sampling, for tests and replays.
    pub fn with_seed(capacity: usize, registry: CapabilityRegistry, seed: u64) -> Self {
        let mut s = Self::new(capacity, registry);
        s.resolver = SpawnResolver::with_seed(seed);
        s
    }

    pub fn set_viewer_pos(&mut self, pos: Vec3) {
        self.viewer_pos = pos;
    }

    pub fn viewer_pos(&self) -> Vec3 {
        self.viewer_pos
    }

    /// Resolve a plan around the viewer, build every command through the
    /// registry (total: unknown keys hit the default capability), and
    /// register the results with the pool. Returns the number of objects
    /// spawned; a plan that spawns nothing is a bug upstream, not here.
    pub fn apply_plan(&mut self, plan: &LandscapePlan, backend: &mut dyn SceneBackend) -> usize {
        let commands = self.resolver.resolve(plan, self.viewer_pos);
        let count = commands.len();
        for cmd in commands {
            let cap = self.registry.get_mut(&cmd.key);
            let built = cap.build(&mut self.cache, &cmd.placement, &cmd.request);
            self.pool
                .register(built, cmd.key, &mut self.anim, backend);
        }
        log::info!("applied plan ({count} objects): {}", plan.summary);
        count
    }

    /// Animation pass. Called once per rendered frame with a monotonically
    /// increasing clock; deltas are pure functions of `elapsed`.
    pub fn frame(&mut self, elapsed: f32, backend: &mut dyn SceneBackend) {
        for update in self.anim.update_all(elapsed) {
            backend.apply_part(&update);
        }
    }

    pub fn set_stage(&mut self, stage: DayStage, backend: &mut dyn SceneBackend) {
        let atmos = self.cycle.set(stage);
        backend.apply_atmosphere(atmos);
    }

    /// Total by construction: unknown names land on the default stage.
    pub fn set_stage_by_name(&mut self, name: &str, backend: &mut dyn SceneBackend) -> DayStage {
        let (stage, atmos) = self.cycle.set_by_name(name);
        backend.apply_atmosphere(atmos);
        stage
    }

    pub fn stage(&self) -> DayStage {
        self.cycle.current()
    }

    /// Re-send the current preset, e.g. after the backend was recreated.
    pub fn refresh_atmosphere(&self, backend: &mut dyn SceneBackend) {
        backend.apply_atmosphere(self.cycle.atmosphere());
    }

    pub fn pool(&self) -> &ScenePool {
        &self.pool
    }

    pub fn animations(&self) -> &AnimationSet {
        &self.anim
    }

    /// Release every live object and drain the shared cache.
    pub fn teardown(&mut self, backend: &mut dyn SceneBackend) {
        self.pool.dispose_all(&mut self.anim, backend);
        self.cache.dispose_all(|node| backend.dispose(node));
    }
}
