// ── StudyWithMe Engine: Input Validation ───────────────────────────────────
// Boundary checks applied before an event or query reaches the tracker.
// The tracker itself assumes pre-validated input; a violation reaching it
// would be a caller bug.

use crate::atoms::constants::{TOPIC_MAX_LEN, TOPIC_MIN_LEN};
use crate::atoms::error::{EngineError, EngineResult};

pub fn validate_student_id(student_id: &str) -> EngineResult<()> {
    if student_id.trim().is_empty() {
        return Err(EngineError::InvalidInput("studentId is required".into()));
    }
    Ok(())
}

pub fn validate_topic(topic: &str) -> EngineResult<()> {
    let topic = topic.trim();
    if topic.len() < TOPIC_MIN_LEN {
        return Err(EngineError::InvalidInput("Topic is too short.".into()));
    }
    if topic.len() > TOPIC_MAX_LEN {
        return Err(EngineError::InvalidInput("Topic is too long.".into()));
    }
    Ok(())
}
