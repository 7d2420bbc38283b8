// ── StudyWithMe Atoms: Error Types ─────────────────────────────────────────
// Single canonical error enum for the engine, built with `thiserror`.
//
// Design rules:
//   • Variants are coarse-grained by domain (NotFound, InvalidInput, Parse…).
//   • "Not found" is an expected outcome for query paths and is surfaced as
//     `Option`/sentinel values there; the `NotFound` variant exists for the
//     one entry point that treats a missing profile as a contract violation
//     (event ingestion requires a provisioned student).
//   • `EngineError` → `String` conversion is provided via `Display` so that
//     host boundaries (`Result<T, String>`) can call `.map_err(|e|
//     e.to_string())` without boilerplate.

use thiserror::Error;

// ── Primary error enum ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum EngineError {
    /// A student or topic profile that the contract requires is absent.
    /// Callers are expected to fall back to defaults (start at Core level),
    /// never to abort an unrelated request.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Caller passed input that should have been rejected upstream
    /// (blank student id, out-of-bounds topic name, …).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Model output failed strict schema validation. Fail-closed: no
    /// partially-populated value is ever produced.
    #[error("Parse error: {0}")]
    Parse(String),

    /// JSON serialization / deserialization failure outside the model-output
    /// path (snapshots, host IPC payloads).
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Catch-all for errors that do not yet have a dedicated variant.
    /// Prefer adding a specific variant over using this in new code.
    #[error("{0}")]
    Other(String),
}

// ── Convenience constructors ───────────────────────────────────────────────

impl EngineError {
    /// Create a not-found error for a student profile.
    pub fn student_not_found(student_id: impl AsRef<str>) -> Self {
        Self::NotFound(format!("student profile '{}'", student_id.as_ref()))
    }

    /// Create a parse error with context.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}

// ── Migration bridge: String → EngineError ─────────────────────────────────
// Allows `?` on functions still returning `Result<T, String>` inside
// functions that return `EngineResult<T>`.

impl From<String> for EngineError {
    fn from(s: String) -> Self {
        EngineError::Other(s)
    }
}

impl From<&str> for EngineError {
    fn from(s: &str) -> Self {
        EngineError::Other(s.to_string())
    }
}

// ── Convenience alias ──────────────────────────────────────────────────────

/// All engine operations should return this type.
/// At host boundaries, convert with `.map_err(|e| e.to_string())`.
pub type EngineResult<T> = Result<T, EngineError>;

// ── Conversion: EngineError → String ──────────────────────────────────────

impl From<EngineError> for String {
    fn from(e: EngineError) -> Self {
        e.to_string()
    }
}
