//! Plan ingestion pipeline: prompt interpretation output in, validated
//! landscape plans out.
//!
//! This crate is renderer- and transport-agnostic; it holds pure logic for
//! parsing loosely-structured interpreter responses, normalizing them
//! against closed vocabularies, and deriving a local fallback plan when the
//! remote path yields nothing usable.
//!
//! Pipeline order: [`parse`] -> [`normalize`] -> [`LandscapePlan`]; on any
//! failure the caller switches to [`fallback`], which guarantees a
//! renderable plan for every prompt.

use thiserror::Error;

pub mod fallback;
pub mod normalize;
pub mod parse;
pub mod plan;
pub mod vocab;

pub use parse::Candidate;
pub use plan::{EntityDescriptor, LandscapePlan, SizeClass};
pub use vocab::{EntityType, Tag};

/// Failures of the ingestion pipeline. All of them are handled by falling
/// back to local generation; none propagate to the scene layer.
#[derive(Debug, Error)]
pub enum PlanError {
    /// Response could not be decoded into candidate plan fields.
    #[error("malformed interpreter response: {0}")]
    MalformedResponse(String),
    /// Well-formed response with nothing usable left after normalization.
    #[error("plan empty after normalization")]
    EmptyPlan,
}
