//! Bounded object pool with strict FIFO eviction.
//!
//! The pool is the sole owner of spawned objects and the sole mutable
//! structure shared between "content arriving" and the per-frame pass.
//! The population bound is enforced at insertion time: exceeding the cap
//! evicts the single oldest object before the new one is kept, so worst-case
//! population is deterministic under continuous prompt submission. Eviction
//! detaches an object's animated parts before any node is disposed.

use std::collections::VecDeque;

use crate::anim::AnimationSet;
use crate::capability::{Built, CapabilityKey, SceneBackend};
use crate::{NodeHandle, ObjectId};

/// A live, renderable unit owned exclusively by the pool.
#[derive(Debug, Clone)]
pub struct SpawnedObject {
    pub id: ObjectId,
    pub key: CapabilityKey,
    pub root: NodeHandle,
    pub nodes: Vec<NodeHandle>,
}

#[derive(Debug)]
pub struct ScenePool {
    objects: VecDeque<SpawnedObject>,
    capacity: usize,
    next_id: u64,
}

impl ScenePool {
    /// A zero capacity could never hold a registration; it is raised to 1.
    pub fn new(capacity: usize) -> Self {
        if capacity == 0 {
            log::warn!("pool capacity 0 raised to 1");
        }
        Self {
            objects: VecDeque::new(),
            capacity: capacity.max(1),
            next_id: 0,
        }
    }

    /// Take ownership of a built object graph. Returns the assigned id.
    /// Population after return is always <= capacity.
    pub fn register(
        &mut self,
        built: Built,
        key: CapabilityKey,
        anim: &mut AnimationSet,
        backend: &mut dyn SceneBackend,
    ) -> ObjectId {
        while self.objects.len() >= self.capacity {
            self.evict_oldest(anim, backend);
        }
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        anim.register_parts(id, &built.parts);
        self.objects.push_back(SpawnedObject {
            id,
            key,
            root: built.root,
            nodes: built.nodes,
        });
        id
    }

    /// Evict the single oldest object: de-register its animated parts,
    /// then dispose every node of its graph, then drop the record.
    pub fn evict_oldest(
        &mut self,
        anim: &mut AnimationSet,
        backend: &mut dyn SceneBackend,
    ) -> Option<ObjectId> {
        let obj = self.objects.pop_front()?;
        anim.remove_owner(obj.id);
        for node in &obj.nodes {
            backend.dispose(*node);
        }
        metrics::counter!("scene.pool_evictions_total").increment(1);
        log::debug!("evicted object {:?} ({} nodes)", obj.id, obj.nodes.len());
        Some(obj.id)
    }

    /// Scene teardown: release everything, oldest first.
    pub fn dispose_all(&mut self, anim: &mut AnimationSet, backend: &mut dyn SceneBackend) {
        let n = self.objects.len();
        while let Some(obj) = self.objects.pop_front() {
            anim.remove_owner(obj.id);
            for node in &obj.nodes {
                backend.dispose(*node);
            }
        }
        log::debug!("pool disposed {n} objects");
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.iter().any(|o| o.id == id)
    }

    /// Live objects, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &SpawnedObject> {
        self.objects.iter()
    }
}
