// ── StudyWithMe Engine: Progress Tracker ───────────────────────────────────
// The single mutation entry point for topic metrics and overall stats.
// Nothing else in the crate writes to the store.
//
// `process_event` is a read-modify-write across two store calls, so the
// tracker serializes it with a per-student mutex: concurrent events for the
// same student queue up instead of interleaving at await points and losing
// updates. Events for different students never contend.

use log::debug;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use crate::atoms::constants::{
    ASSIGNMENT_SCORE_DIVISOR, ASSIGNMENT_SCORE_PIVOT, ASSIGNMENT_WEIGHT_MULTIPLIER,
    COMMON_MISTAKES_CAP, EXPLANATION_BASE_DELTA, MASTERY_MAX, MASTERY_MIN, STALENESS_GRACE_DAYS,
    STALENESS_PENALTY_CAP,
};
use crate::atoms::error::{EngineError, EngineResult};
use crate::atoms::types::{ConfidenceLevel, LearningEvent, LearningEventKind, TopicMetrics};
use crate::engine::store::ProfileStore;

pub struct ProgressTracker {
    store: Arc<dyn ProfileStore>,
    /// Per-student serialization tokens. An entry is created on first use and
    /// kept for the process lifetime, like the profile it guards.
    student_locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl ProgressTracker {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self {
            store,
            student_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Fold one learning event into the student's topic metrics and overall
    /// stats, returning the updated metrics.
    ///
    /// Errors with [`EngineError::NotFound`] when the student has no profile:
    /// the platform provisions profiles before events flow, so an absent one
    /// is a contract violation, not a lazy-init case. The *topic* is
    /// initialized lazily.
    pub async fn process_event(&self, event: &LearningEvent) -> EngineResult<TopicMetrics> {
        let lock = self.student_lock(&event.student_id);
        let _guard = lock.lock().await;

        let profile = self
            .store
            .get_profile(&event.student_id)
            .await
            .ok_or_else(|| EngineError::student_not_found(&event.student_id))?;

        let mut metrics = profile
            .topics
            .get(&event.topic)
            .cloned()
            .unwrap_or_else(|| TopicMetrics::new(&event.topic, event.timestamp));

        // Staleness is measured against the stored last_interaction, before
        // it is overwritten below. A freshly created topic has
        // last_interaction == event.timestamp and so never decays on its
        // first event.
        let delta = score_delta(&metrics, event);
        metrics.mastery_score = (metrics.mastery_score + delta).clamp(MASTERY_MIN, MASTERY_MAX);
        metrics.confidence_level = ConfidenceLevel::from_score(metrics.mastery_score);
        metrics.attempts += 1;
        metrics.last_depth = event.depth;
        metrics.last_interaction = event.timestamp;

        if !event.mistakes.is_empty() {
            metrics.common_mistakes = merge_mistakes(&event.mistakes, &metrics.common_mistakes);
        }

        debug!(
            "[tracker] {}/{}: delta {:+.1} → mastery {:.1} ({:?})",
            event.student_id, event.topic, delta, metrics.mastery_score, metrics.confidence_level
        );

        self.store
            .upsert_topic_metrics(&event.student_id, &event.topic, metrics.clone())
            .await;

        let mut stats = profile.overall_stats;
        stats.total_sessions += 1;
        if event.depth > stats.highest_depth_reached {
            stats.highest_depth_reached = event.depth;
        }
        if let Some(score) = event.score {
            // Incremental mean with n = post-increment session count. A
            // Some(0.0) score counts; only absence is skipped.
            let n = f64::from(stats.total_sessions);
            stats.average_reasoning_score =
                (stats.average_reasoning_score * (n - 1.0) + score) / n;
        }
        self.store
            .update_overall_stats(&event.student_id, stats)
            .await;

        Ok(metrics)
    }

    fn student_lock(&self, student_id: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.student_locks.lock();
        locks
            .entry(student_id.to_string())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }
}

// ── Pure update rules ──────────────────────────────────────────────────────

/// Raw mastery delta for an event, including the staleness penalty.
/// "Now" for staleness is the event's own timestamp, keeping the whole
/// computation deterministic.
fn score_delta(current: &TopicMetrics, event: &LearningEvent) -> f64 {
    let weight = event.depth.weight();

    let mut delta = match event.event_type {
        LearningEventKind::Explanation => EXPLANATION_BASE_DELTA * weight,
        LearningEventKind::AssignmentComplete => match event.score {
            Some(score) => {
                let performance = (score - ASSIGNMENT_SCORE_PIVOT) / ASSIGNMENT_SCORE_DIVISOR;
                performance * weight * ASSIGNMENT_WEIGHT_MULTIPLIER
            }
            None => 0.0,
        },
        LearningEventKind::AssignmentAttempt => 0.0,
    };

    let days_since_last = (event.timestamp - current.last_interaction).num_seconds() as f64
        / 86_400.0;
    if days_since_last > STALENESS_GRACE_DAYS {
        // Non-compounding: a month away still costs at most 10 points.
        delta -= days_since_last.min(STALENESS_PENALTY_CAP);
    }

    delta
}

/// Merge freshly observed mistakes into the running list: newest first,
/// first occurrence wins on duplicates, capped at 10 entries.
fn merge_mistakes(new: &[String], existing: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(COMMON_MISTAKES_CAP);
    for mistake in new.iter().chain(existing.iter()) {
        if merged.len() == COMMON_MISTAKES_CAP {
            break;
        }
        if !merged.contains(mistake) {
            merged.push(mistake.clone());
        }
    }
    merged
}
