// ── StudyWithMe Engine: Token Accounting ───────────────────────────────────
// Heuristic token counts for texts we never run through a real tokenizer,
// plus the flat per-million cost estimate. Feeds the interaction log's token
// fields; nothing here talks to a provider.

use crate::atoms::constants::{CHARS_PER_TOKEN, INPUT_COST_PER_MTOK, OUTPUT_COST_PER_MTOK};

/// Rough token count: one token per ~4 characters, rounded up.
pub fn count_tokens(text: &str) -> u32 {
    if text.is_empty() {
        return 0;
    }
    let chars = text.chars().count();
    chars.div_ceil(CHARS_PER_TOKEN) as u32
}

/// Estimated USD cost for one interaction, rounded to 6 decimal places.
pub fn estimate_cost(input_tokens: u32, output_tokens: u32) -> f64 {
    let input_cost = f64::from(input_tokens) / 1_000_000.0 * INPUT_COST_PER_MTOK;
    let output_cost = f64::from(output_tokens) / 1_000_000.0 * OUTPUT_COST_PER_MTOK;
    let total = input_cost + output_cost;
    (total * 1e6).round() / 1e6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_tokens_rounds_up() {
        assert_eq!(count_tokens(""), 0);
        assert_eq!(count_tokens("abc"), 1);
        assert_eq!(count_tokens("abcd"), 1);
        assert_eq!(count_tokens("abcde"), 2);
    }

    #[test]
    fn test_cost_estimate() {
        // 1M input + 1M output = 0.50 + 1.50 USD.
        assert_eq!(estimate_cost(1_000_000, 1_000_000), 2.0);
        assert_eq!(estimate_cost(0, 0), 0.0);
        // 1000 + 2000 tokens → 0.0005 + 0.003 = 0.0035.
        assert_eq!(estimate_cost(1_000, 2_000), 0.0035);
    }
}
