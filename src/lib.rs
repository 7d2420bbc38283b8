// ── studywm-core ───────────────────────────────────────────────────────────
// Core engine library for StudyWithMe: the adaptive mastery / depth
// adjustment pipeline behind the tutoring endpoints.
//
// Layering:
//   atoms/   — pure data types, constants, errors. No I/O.
//   engine/  — stores, the progress tracker, depth-signal rules, insights,
//              dashboard aggregation, ethics guard, model-output schema
//              validation, and the AdaptiveEngine facade.
//
// The store and interaction log are constructed once at host startup and
// passed by Arc into AdaptiveEngine — no module-level globals. State is
// memory-resident; nothing here survives a restart.
//
// This crate never installs a logger and never talks to the network. Hosts
// pick a `log` subscriber and own the LLM/HTTP boundary.

pub mod atoms;
pub mod engine;

pub use atoms::error::{EngineError, EngineResult};
pub use atoms::types::*;

pub use engine::adaptive::AdaptiveEngine;
pub use engine::dashboard::aggregate;
pub use engine::ethics::{EthicsGuard, SanitizedInput};
pub use engine::insights::generate_insights;
pub use engine::interaction_log::InteractionLog;
pub use engine::schema::{parse_assignment, parse_feedback};
pub use engine::signals::signal_for;
pub use engine::store::{ProfileStore, ProgressStore};
pub use engine::tokens::{count_tokens, estimate_cost};
pub use engine::tracker::ProgressTracker;
