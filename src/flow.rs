//! Prompt-handling flow: remote interpretation with a guaranteed fallback.
//!
//! One attempt against the remote backend, no retries: the local generator
//! already guarantees forward progress, so retrying would only add latency.
//! Every failure mode (transport, timeout, bad status, malformed payload,
//! empty plan) takes the same exit: warn, count the reason, generate
//! locally. This function cannot fail.

use interp_http::{InterpError, Interpreter};
use plan_core::{LandscapePlan, PlanError, fallback, normalize, parse};

/// Where the returned plan came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanSource {
    Remote,
    LocalFallback,
}

/// A renderable plan plus its provenance. The UI shows a non-blocking
/// notice when the fallback produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanOutcome {
    pub plan: LandscapePlan,
    pub source: PlanSource,
}

impl PlanOutcome {
    pub fn used_fallback(&self) -> bool {
        self.source == PlanSource::LocalFallback
    }
}

/// Interpret a prompt into a plan. Always returns a non-empty plan; the
/// scene layer never sees any of the failure modes.
pub async fn plan_from_prompt(interp: &dyn Interpreter, prompt: &str) -> PlanOutcome {
    let reason = match interp.interpret(prompt).await {
        Ok(value) => match parse::parse_value(&value).and_then(normalize::normalize) {
            Ok(plan) => {
                metrics::counter!("plan.remote_total").increment(1);
                log::info!("remote plan accepted: {}", plan.summary);
                return PlanOutcome {
                    plan,
                    source: PlanSource::Remote,
                };
            }
            Err(e) => {
                log::warn!("unusable interpreter response: {e}");
                plan_reason(&e)
            }
        },
        Err(e) => {
            log::warn!("interpretation backend failed: {e}");
            interp_reason(&e)
        }
    };
    metrics::counter!("plan.fallback_total", "reason" => reason).increment(1);
    let plan = fallback::generate(prompt);
    log::info!("local fallback plan: {}", plan.summary);
    PlanOutcome {
        plan,
        source: PlanSource::LocalFallback,
    }
}

fn interp_reason(e: &InterpError) -> &'static str {
    match e {
        InterpError::Timeout => "timeout",
        InterpError::Http(_) => "backend_unavailable",
        InterpError::Status(_) => "backend_status",
        InterpError::Decode(_) => "decode",
    }
}

fn plan_reason(e: &PlanError) -> &'static str {
    match e {
        PlanError::MalformedResponse(_) => "malformed_response",
        PlanError::EmptyPlan => "empty_plan",
    }
}
