// ── StudyWithMe Engine: Model-Output Schema Validation ─────────────────────
// The model is asked for JSON; this module is the only place that text is
// turned into typed values. Parsing fails closed: a missing field, a wrong
// type, or an out-of-range score is an `EngineError::Parse`, never a
// partially-populated struct.
//
// Models routinely wrap JSON in markdown code fences despite instructions,
// so fences are stripped before parsing. Nothing else is repaired.

use crate::atoms::error::{EngineError, EngineResult};
use crate::atoms::types::{AssignmentFeedback, AssignmentStructure};

/// Parse a generated assignment from raw model text.
pub fn parse_assignment(raw: &str) -> EngineResult<AssignmentStructure> {
    let assignment: AssignmentStructure = parse_json(raw, "assignment")?;
    if assignment.questions.is_empty() {
        return Err(EngineError::parse("assignment has no questions"));
    }
    Ok(assignment)
}

/// Parse graded feedback from raw model text. The conceptual score must be
/// within [0, 100].
pub fn parse_feedback(raw: &str) -> EngineResult<AssignmentFeedback> {
    let feedback: AssignmentFeedback = parse_json(raw, "feedback")?;
    if !(0.0..=100.0).contains(&feedback.conceptual_score) {
        return Err(EngineError::parse(format!(
            "feedback conceptualScore {} outside [0, 100]",
            feedback.conceptual_score
        )));
    }
    Ok(feedback)
}

fn parse_json<T: serde::de::DeserializeOwned>(raw: &str, what: &str) -> EngineResult<T> {
    let body = strip_code_fences(raw);
    if body.is_empty() {
        return Err(EngineError::parse(format!("empty {what} payload")));
    }
    serde_json::from_str(body)
        .map_err(|e| EngineError::parse(format!("invalid {what} payload: {e}")))
}

/// Strip a single surrounding ``` or ```json fence, if present.
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atoms::types::DepthLevel;

    const FEEDBACK: &str = r#"{
        "conceptualScore": 72.5,
        "feedback": "Good grasp of the base case.",
        "misconceptions": ["confused stack depth with input size"],
        "nextSteps": "Trace the recursion tree for n = 4."
    }"#;

    #[test]
    fn test_feedback_parses() {
        let feedback = parse_feedback(FEEDBACK).unwrap();
        assert_eq!(feedback.conceptual_score, 72.5);
        assert_eq!(feedback.misconceptions.len(), 1);
    }

    #[test]
    fn test_code_fences_are_tolerated() {
        let fenced = format!("```json\n{FEEDBACK}\n```");
        assert!(parse_feedback(&fenced).is_ok());
    }

    #[test]
    fn test_missing_field_fails_closed() {
        let raw = r#"{"conceptualScore": 50.0, "feedback": "ok"}"#;
        let err = parse_feedback(raw).unwrap_err();
        assert!(matches!(err, EngineError::Parse(_)));
    }

    #[test]
    fn test_out_of_range_score_is_rejected() {
        let raw = r#"{
            "conceptualScore": 140.0,
            "feedback": "x",
            "misconceptions": [],
            "nextSteps": "y"
        }"#;
        assert!(parse_feedback(raw).is_err());
    }

    #[test]
    fn test_non_json_prose_is_rejected() {
        assert!(parse_feedback("I couldn't grade this, sorry!").is_err());
        assert!(parse_feedback("").is_err());
    }

    #[test]
    fn test_assignment_parses_and_requires_questions() {
        let raw = r#"{
            "title": "Recursion Drills",
            "objective": "Practice base cases",
            "difficulty": "Applied",
            "questions": ["Write factorial recursively."],
            "hints": ["What input needs no recursive call?"]
        }"#;
        let assignment = parse_assignment(raw).unwrap();
        assert_eq!(assignment.difficulty, DepthLevel::Applied);

        let empty = raw.replace("[\"Write factorial recursively.\"]", "[]");
        assert!(parse_assignment(&empty).is_err());
    }

    #[test]
    fn test_unknown_difficulty_is_rejected() {
        let raw = r#"{
            "title": "t",
            "objective": "o",
            "difficulty": "Expert",
            "questions": ["q"],
            "hints": []
        }"#;
        assert!(parse_assignment(raw).is_err());
    }
}
