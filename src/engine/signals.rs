// ── StudyWithMe Engine: Depth Signal Rules ─────────────────────────────────
// Pure, total mapping from topic metrics to one advisory signal.
//
// Rule order is load-bearing and must not be reshuffled: misconception
// reduction outranks depth increase, which outranks practice, which outranks
// mastery-ready. A topic at score 90 with three logged mistakes gets
// REDUCE_COMPLEXITY, not INCREASE_DEPTH. States satisfying several rules are
// resolved by this precedence alone.

use crate::atoms::constants::{
    SIGNAL_INCREASE_DEPTH_SCORE, SIGNAL_MASTERY_READY_SCORE, SIGNAL_MISTAKE_COUNT,
    SIGNAL_PRACTICE_ATTEMPTS, SIGNAL_PRACTICE_SCORE,
};
use crate::atoms::types::{AdaptiveSignal, DepthLevel, SignalKind, TopicMetrics};

pub(crate) const REASON_REDUCE_COMPLEXITY: &str =
    "Multiple misconceptions detected. Stepping back to Core principles.";
pub(crate) const REASON_INCREASE_DEPTH: &str =
    "Mastery score indicates readiness for deeper analysis.";
pub(crate) const REASON_PRACTICE_NEEDED: &str =
    "Concept understanding is not yet solid. More practice examples needed.";
pub(crate) const REASON_MASTERY_READY: &str = "Strong performance in Applied tasks.";
pub(crate) const REASON_MAINTAIN: &str = "Current learning pace is optimal.";

/// Advisory signal for one topic. First matching rule wins; the final arm
/// makes the function total.
pub fn signal_for(metrics: &TopicMetrics) -> AdaptiveSignal {
    let (signal_type, reason) = if metrics.common_mistakes.len() >= SIGNAL_MISTAKE_COUNT
        && metrics.last_depth != DepthLevel::Core
    {
        (SignalKind::ReduceComplexity, REASON_REDUCE_COMPLEXITY)
    } else if metrics.mastery_score > SIGNAL_INCREASE_DEPTH_SCORE
        && metrics.last_depth != DepthLevel::Mastery
    {
        (SignalKind::IncreaseDepth, REASON_INCREASE_DEPTH)
    } else if metrics.mastery_score < SIGNAL_PRACTICE_SCORE
        && metrics.attempts > SIGNAL_PRACTICE_ATTEMPTS
    {
        (SignalKind::PracticeNeeded, REASON_PRACTICE_NEEDED)
    } else if metrics.mastery_score > SIGNAL_MASTERY_READY_SCORE
        && metrics.last_depth == DepthLevel::Applied
    {
        (SignalKind::MasteryReady, REASON_MASTERY_READY)
    } else {
        (SignalKind::Maintain, REASON_MAINTAIN)
    };

    AdaptiveSignal {
        topic: metrics.topic.clone(),
        signal_type,
        reason: reason.to_string(),
    }
}
