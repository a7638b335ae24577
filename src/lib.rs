//! Mirage: prompt-sculpted desert scenes.
//!
//! The embedding application drives three pieces: [`flow::plan_from_prompt`]
//! turns a prompt into a renderable [`plan_core::LandscapePlan`] (remote
//! interpretation with a guaranteed local fallback),
//! [`scene_core::SceneSession`] materializes plans and owns object
//! lifecycle, and a renderer supplies the [`scene_core::SceneBackend`] and
//! capability implementations. No durable state anywhere: a reload starts
//! from a fresh session.

pub use interp_http;
pub use plan_core;
pub use scene_core;

pub mod flow;

/// Developer-friendly default logging (info+) unless RUST_LOG overrides.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info,mirage=info"),
    )
    .format_timestamp_secs()
    .try_init();
}
