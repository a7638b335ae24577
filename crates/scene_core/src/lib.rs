//! Scene lifecycle core: spawn placement, bounded pooling, day stages, and
//! the per-frame animation pass.
//!
//! This crate is renderer-agnostic. Everything the renderer must do is
//! expressed through two seams: [`capability::Capability`] (build an object
//! graph for a request) and [`capability::SceneBackend`] (dispose nodes,
//! apply animation deltas and atmosphere presets). Node identity is an
//! opaque `u64` handle; the core never touches meshes or materials.

pub mod anim;
pub mod cache;
pub mod capability;
pub mod pool;
pub mod session;
pub mod spawn;
pub mod stage;

/// Opaque handle to one renderer-side node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(pub u64);

/// Identity of one pooled object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

pub use anim::{AnimKind, AnimSpec, AnimationSet, PartDelta, PartUpdate, eval};
pub use cache::ResourceCache;
pub use capability::{
    Built, Capability, CapabilityKey, CapabilityRegistry, SceneBackend, SpawnRequest,
};
pub use pool::{ScenePool, SpawnedObject};
pub use session::SceneSession;
pub use spawn::{Placement, SpawnCommand, SpawnResolver};
pub use stage::{Atmosphere, DEFAULT_STAGE, DayCycle, DayStage, preset};
