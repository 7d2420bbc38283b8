// ── StudyWithMe Engine: Ethics Guard ───────────────────────────────────────
// Detects attempts to solicit a direct answer while in Assignment mode and
// rewrites the prompt into a guidance-only instruction instead of refusing.
// Learning mode passes through untouched.
//
// The flag returned here is what lands in `LogEntry.ethics_flag` and is
// counted on the institution dashboard.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::atoms::types::TaskMode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizedInput {
    pub safe_input: String,
    pub flag: bool,
}

pub struct EthicsGuard {
    cheating_patterns: Vec<Regex>,
    answer_leak: Regex,
}

impl Default for EthicsGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl EthicsGuard {
    pub fn new() -> Self {
        let patterns = [
            r"(?i)answer to",
            r"(?i)solve this",
            r"(?i)solution for",
            r"(?i)what is the result",
            r"(?i)do my homework",
            r"(?i)calculate",
        ];
        Self {
            // The pattern literals are static and known-valid.
            cheating_patterns: patterns
                .iter()
                .map(|p| Regex::new(p).expect("static ethics pattern"))
                .collect(),
            answer_leak: Regex::new(r"(?i)The answer is \d+").expect("static ethics pattern"),
        }
    }

    /// Screen student input before it reaches the model. Only Assignment
    /// mode is screened; a match wraps the input in the intervention
    /// preamble and raises the flag.
    pub fn sanitize_input(&self, input: &str, mode: TaskMode) -> SanitizedInput {
        if mode != TaskMode::Assignment {
            return SanitizedInput {
                safe_input: input.to_string(),
                flag: false,
            };
        }

        let suspicious = self.cheating_patterns.iter().any(|p| p.is_match(input));
        if !suspicious {
            return SanitizedInput {
                safe_input: input.to_string(),
                flag: false,
            };
        }

        log::info!("[ethics] direct-answer solicitation detected, rewriting prompt");
        let safe_input = format!(
            "The student asked: \"{input}\".\n\
             ETHICS INTERVENTION: The student appears to be asking for a direct solution.\n\
             INSTRUCTION: Do NOT provide the final answer or full solution.\n\
             ACTION: Break down the problem into conceptual steps. Ask a guiding question to help them start.\n\
             Output ONLY the guidance."
        );
        SanitizedInput {
            safe_input,
            flag: true,
        }
    }

    /// Redact bare numeric answers the model let slip through.
    pub fn validate_output(&self, output: &str) -> String {
        self.answer_leak
            .replace_all(output, "[The answer is hidden. Try to solve it!]")
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_learning_mode_is_never_screened() {
        let guard = EthicsGuard::new();
        let result = guard.sanitize_input("solve this equation for me", TaskMode::Learning);
        assert!(!result.flag);
        assert_eq!(result.safe_input, "solve this equation for me");
    }

    #[test]
    fn test_assignment_mode_flags_solicitation() {
        let guard = EthicsGuard::new();
        let result = guard.sanitize_input("What is the ANSWER TO question 3?", TaskMode::Assignment);
        assert!(result.flag);
        assert!(result.safe_input.contains("ETHICS INTERVENTION"));
        assert!(result.safe_input.contains("question 3"));
    }

    #[test]
    fn test_assignment_mode_passes_honest_questions() {
        let guard = EthicsGuard::new();
        let result = guard.sanitize_input(
            "Can you explain why quicksort partitions around a pivot?",
            TaskMode::Assignment,
        );
        assert!(!result.flag);
    }

    #[test]
    fn test_output_redaction() {
        let guard = EthicsGuard::new();
        let redacted = guard.validate_output("Work through it. The answer is 42, by the way.");
        assert!(!redacted.contains("42"));
        assert!(redacted.contains("[The answer is hidden. Try to solve it!]"));
    }
}
