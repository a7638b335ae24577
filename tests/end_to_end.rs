use async_trait::async_trait;
use glam::Vec3;
use interp_http::{InterpError, Interpreter};
use mirage::flow::plan_from_prompt;
use scene_core::{
    AnimKind, AnimSpec, Atmosphere, Built, Capability, CapabilityRegistry, DayStage, NodeHandle,
    PartUpdate, Placement, ResourceCache, SceneBackend, SceneSession, SpawnRequest,
};
use serde_json::{Value, json};

struct DownInterp;

#[async_trait]
impl Interpreter for DownInterp {
    async fn interpret(&self, _prompt: &str) -> Result<Value, InterpError> {
        Err(InterpError::Timeout)
    }
}

struct UpInterp(Value);

#[async_trait]
impl Interpreter for UpInterp {
    async fn interpret(&self, _prompt: &str) -> Result<Value, InterpError> {
        Ok(self.0.clone())
    }
}

#[derive(Default)]
struct RecordingBackend {
    disposed: Vec<NodeHandle>,
    parts: Vec<PartUpdate>,
    atmospheres: Vec<Atmosphere>,
}
impl SceneBackend for RecordingBackend {
    fn dispose(&mut self, node: NodeHandle) {
        self.disposed.push(node);
    }
    fn apply_part(&mut self, update: &PartUpdate) {
        self.parts.push(*update);
    }
    fn apply_atmosphere(&mut self, atmos: &Atmosphere) {
        self.atmospheres.push(*atmos);
    }
}

struct StubCap {
    next: u64,
}
impl Capability for StubCap {
    fn build(
        &mut self,
        _shared: &mut ResourceCache<NodeHandle>,
        _placement: &Placement,
        _req: &SpawnRequest,
    ) -> Built {
        let root = NodeHandle(self.next);
        self.next += 2;
        Built {
            root,
            nodes: vec![root, NodeHandle(root.0 + 1)],
            parts: vec![(
                NodeHandle(root.0 + 1),
                AnimSpec::new(AnimKind::Bob, 1.0, 0.2),
            )],
        }
    }
}

fn fresh_session() -> SceneSession {
    let registry = CapabilityRegistry::new(Box::new(StubCap { next: 100 }));
    SceneSession::with_seed(32, registry, 11)
}

// Prompt in, objects placed, per-frame deltas out: the whole pipeline with
// the backend unreachable end to end.
#[tokio::test]
async fn prompt_to_scene_with_backend_down() {
    let mut session = fresh_session();
    let mut backend = RecordingBackend::default();
    session.set_viewer_pos(Vec3::new(5.0, 1.7, 5.0));

    let out = plan_from_prompt(&DownInterp, "un oasis con cristales").await;
    assert!(out.used_fallback());
    let spawned = session.apply_plan(&out.plan, &mut backend);
    assert!(spawned > 0, "a prompt with no visible change is a bug");
    assert_eq!(session.pool().len(), spawned);

    session.frame(0.25, &mut backend);
    assert_eq!(backend.parts.len(), spawned);

    session.teardown(&mut backend);
    assert!(session.pool().is_empty());
    assert_eq!(backend.disposed.len(), spawned * 2);
}

#[tokio::test]
async fn remote_plan_spawns_quantities_and_stage_swap_applies() {
    let mut session = fresh_session();
    let mut backend = RecordingBackend::default();

    let interp = UpInterp(json!({
        "summary": "three cacti under a dusk sky",
        "entities": [{"type": "cacti", "quantity": 3}]
    }));
    let out = plan_from_prompt(&interp, "tres cactus al atardecer").await;
    assert!(!out.used_fallback());
    let spawned = session.apply_plan(&out.plan, &mut backend);
    assert_eq!(spawned, 3);

    session.set_stage_by_name("dusk", &mut backend);
    assert_eq!(session.stage(), DayStage::Dusk);
    assert_eq!(backend.atmospheres.len(), 1);
}
