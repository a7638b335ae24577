//! Rendering capability registry and the backend seam.
//!
//! The core never builds meshes or materials. A capability is an opaque
//! factory bound to a tag or entity type; invoking it yields a disposable,
//! traversable object graph described purely by node handles. The registry
//! is total: lookups that miss land on a mandatory default capability, so
//! no tag or descriptor is ever silently discarded.

use std::collections::HashMap;

use plan_core::{EntityDescriptor, EntityType, Tag};

use crate::NodeHandle;
use crate::anim::{AnimSpec, PartUpdate};
use crate::cache::ResourceCache;
use crate::spawn::Placement;
use crate::stage::Atmosphere;

/// What a capability is asked to materialize.
#[derive(Debug, Clone, PartialEq)]
pub enum SpawnRequest {
    /// Whole-group themed spawn (one placement per tag).
    Theme(Tag),
    /// One instance of a normalized entity descriptor.
    Entity(EntityDescriptor),
}

/// The object graph a capability hands back: a root, every owned node
/// (for disposal), and the subparts tagged for animation.
#[derive(Debug, Clone)]
pub struct Built {
    pub root: NodeHandle,
    pub nodes: Vec<NodeHandle>,
    pub parts: Vec<(NodeHandle, AnimSpec)>,
}

/// Opaque rendering factory. Must not fail for well-formed requests;
/// a capability that cannot honor a request builds a placeholder instead.
pub trait Capability {
    fn build(
        &mut self,
        shared: &mut ResourceCache<NodeHandle>,
        placement: &Placement,
        req: &SpawnRequest,
    ) -> Built;
}

/// Registry key: capabilities are bound per tag or per canonical type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityKey {
    Tag(Tag),
    Entity(EntityType),
}

/// Capability lookup with a mandatory default.
pub struct CapabilityRegistry {
    specific: HashMap<CapabilityKey, Box<dyn Capability>>,
    default: Box<dyn Capability>,
}

impl CapabilityRegistry {
    /// The default capability is supplied at construction so `get_mut`
    /// can be total.
    pub fn new(default: Box<dyn Capability>) -> Self {
        Self {
            specific: HashMap::new(),
            default,
        }
    }

    pub fn register(&mut self, key: CapabilityKey, cap: Box<dyn Capability>) {
        if self.specific.insert(key, cap).is_some() {
            log::debug!("capability for {key:?} replaced");
        }
    }

    /// Total lookup: a missing registration resolves to the default.
    pub fn get_mut(&mut self, key: &CapabilityKey) -> &mut dyn Capability {
        if let Some(cap) = self.specific.get_mut(key) {
            return cap.as_mut();
        }
        self.default.as_mut()
    }

    pub fn is_registered(&self, key: &CapabilityKey) -> bool {
        self.specific.contains_key(key)
    }
}

/// The only mutation route into the opaque renderer. The core calls it to
/// release nodes, push animation deltas, and swap atmosphere presets.
pub trait SceneBackend {
    fn dispose(&mut self, node: NodeHandle);
    fn apply_part(&mut self, update: &PartUpdate);
    fn apply_atmosphere(&mut self, atmos: &Atmosphere);
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    /// Builds single-node graphs from a fixed handle base.
    struct FlatCap {
        base: u64,
        built: u64,
    }
    impl FlatCap {
        fn new(base: u64) -> Self {
            Self { base, built: 0 }
        }
    }
    impl Capability for FlatCap {
        fn build(
            &mut self,
            _shared: &mut ResourceCache<NodeHandle>,
            _placement: &Placement,
            _req: &SpawnRequest,
        ) -> Built {
            let node = NodeHandle(self.base + self.built);
            self.built += 1;
            Built {
                root: node,
                nodes: vec![node],
                parts: Vec::new(),
            }
        }
    }

    fn placement() -> Placement {
        Placement {
            position: Vec3::new(1.0, 0.0, 2.0),
            bearing: 0.0,
            radius: 5.0,
        }
    }

    #[test]
    fn unregistered_keys_fall_through_to_the_default() {
        let mut reg = CapabilityRegistry::new(Box::new(FlatCap::new(9000)));
        reg.register(
            CapabilityKey::Entity(EntityType::Cactus),
            Box::new(FlatCap::new(100)),
        );
        let mut cache = ResourceCache::new();
        let req = SpawnRequest::Theme(Tag::Storm);

        let specific = reg
            .get_mut(&CapabilityKey::Entity(EntityType::Cactus))
            .build(&mut cache, &placement(), &req);
        assert_eq!(specific.root, NodeHandle(100));

        // no registration for this tag: default takes it
        let fallback = reg
            .get_mut(&CapabilityKey::Tag(Tag::Storm))
            .build(&mut cache, &placement(), &req);
        assert_eq!(fallback.root, NodeHandle(9000));
        assert!(!reg.is_registered(&CapabilityKey::Tag(Tag::Storm)));
    }
}
