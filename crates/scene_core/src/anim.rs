//! Declarative animation pass.
//!
//! Spawned objects tag subparts with an [`AnimSpec`]; once per frame the
//! session evaluates every registered spec against the elapsed clock and
//! hands the resulting deltas to the backend. Evaluation is pure: the same
//! elapsed time and spec always produce the same delta, so pausing and
//! resuming never drifts.

use std::collections::BTreeSet;

use crate::{NodeHandle, ObjectId};

/// How a tagged subpart moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimKind {
    /// Rotation offset around Z, like wind through fronds.
    Sway,
    /// Vertical offset around a baseline height.
    Float,
    /// Continuous spin around Y.
    Rotate,
    /// Uniform scale around a baseline.
    Pulse,
    /// Opacity wobble, clamped to [0, 1].
    Flicker,
    /// Rectified vertical offset (always above the baseline).
    Bob,
}

/// Animation parameters fixed at creation time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimSpec {
    pub kind: AnimKind,
    pub speed: f32,
    pub amount: f32,
    pub phase: f32,
    pub baseline: f32,
}

impl AnimSpec {
    pub fn new(kind: AnimKind, speed: f32, amount: f32) -> Self {
        Self {
            kind,
            speed,
            amount,
            phase: 0.0,
            baseline: 0.0,
        }
    }

    pub fn with_phase(mut self, phase: f32) -> Self {
        self.phase = phase;
        self
    }

    pub fn with_baseline(mut self, baseline: f32) -> Self {
        self.baseline = baseline;
        self
    }
}

/// One evaluated transform delta. The backend interprets it against the
/// node's rest transform; deltas are absolute for the given time, never
/// accumulated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PartDelta {
    RotateZ(f32),
    OffsetY(f32),
    SpinY(f32),
    Scale(f32),
    Opacity(f32),
}

/// A delta addressed to one scene node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartUpdate {
    pub node: NodeHandle,
    pub delta: PartDelta,
}

/// Evaluate one spec at an absolute elapsed time. Stateless.
pub fn eval(spec: &AnimSpec, elapsed: f32) -> PartDelta {
    let wave = (elapsed * spec.speed + spec.phase).sin();
    match spec.kind {
        AnimKind::Sway => PartDelta::RotateZ(wave * spec.amount),
        AnimKind::Float => PartDelta::OffsetY(spec.baseline + wave * spec.amount),
        AnimKind::Rotate => PartDelta::SpinY(elapsed * spec.speed + spec.phase),
        AnimKind::Pulse => PartDelta::Scale(spec.baseline + wave * spec.amount),
        AnimKind::Flicker => {
            let fast = (elapsed * spec.speed * 2.7 + spec.phase * 1.3).sin();
            let v = spec.baseline + 0.5 * spec.amount * (wave + fast);
            PartDelta::Opacity(v.clamp(0.0, 1.0))
        }
        AnimKind::Bob => PartDelta::OffsetY(spec.baseline + wave.abs() * spec.amount),
    }
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    owner: ObjectId,
    node: NodeHandle,
    spec: AnimSpec,
}

/// Flat registry of animated subparts across all live objects.
///
/// Ownership invariant: every entry's owner is a live pool object; the pool
/// calls [`AnimationSet::remove_owner`] before disposing an object's nodes,
/// so the pass never touches a disposed resource.
#[derive(Debug, Default)]
pub struct AnimationSet {
    entries: Vec<Entry>,
}

impl AnimationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_parts(&mut self, owner: ObjectId, parts: &[(NodeHandle, AnimSpec)]) {
        for (node, spec) in parts {
            self.entries.push(Entry {
                owner,
                node: *node,
                spec: *spec,
            });
        }
    }

    pub fn remove_owner(&mut self, owner: ObjectId) {
        self.entries.retain(|e| e.owner != owner);
    }

    /// Evaluate every registered part at `elapsed`. Output order follows
    /// registration order.
    pub fn update_all(&self, elapsed: f32) -> Vec<PartUpdate> {
        self.entries
            .iter()
            .map(|e| PartUpdate {
                node: e.node,
                delta: eval(&e.spec, elapsed),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct owners with at least one registered part.
    pub fn owners(&self) -> BTreeSet<ObjectId> {
        self.entries.iter().map(|e| e.owner).collect()
    }
}
