// StudyWithMe Engine — adaptive tutoring core
// In-process library: event ingestion, mastery tracking, depth signals,
// insights, and dashboard rollups. The LLM call itself and the HTTP layer
// live in the host; this crate only sees their inputs and outputs.

pub mod adaptive;
pub mod dashboard;
pub mod ethics;
pub mod insights;
pub mod interaction_log;
pub mod schema;
pub mod signals;
pub mod store;
pub mod tokens;
pub mod tracker;
pub mod validate;
