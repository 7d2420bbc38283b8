// ── StudyWithMe Engine: Adaptive Engine ────────────────────────────────────
// The facade controllers talk to. Owns the injected store, tracker, and
// interaction log; exposes event ingestion plus the read-only queries that
// back the per-student and dashboard endpoints.
//
// Read queries return sentinels ("no data yet": Maintain at Core) rather
// than errors for unknown students or topics, so a brand-new student's
// first page load is not a failure path.

use std::sync::Arc;

use log::info;

use crate::atoms::error::EngineResult;
use crate::atoms::types::{
    AdaptiveSignal, DashboardMetrics, DepthAdjustment, DepthLevel, LearningEvent, SignalKind,
    StudentSummary, TopicMetrics,
};
use crate::engine::dashboard;
use crate::engine::insights::generate_insights;
use crate::engine::interaction_log::InteractionLog;
use crate::engine::signals::signal_for;
use crate::engine::store::{ProfileStore, ProgressStore};
use crate::engine::tracker::ProgressTracker;
use crate::engine::validate::{validate_student_id, validate_topic};

const REASON_NEW_STUDENT: &str = "New student - starting at Core level";
const REASON_NEW_TOPIC: &str = "New topic - starting at Core level";
const REASON_NO_TOPIC_DATA: &str = "No data available for this topic yet.";

pub struct AdaptiveEngine {
    store: Arc<ProgressStore>,
    tracker: ProgressTracker,
    interaction_log: Arc<InteractionLog>,
}

impl AdaptiveEngine {
    pub fn new(store: Arc<ProgressStore>, interaction_log: Arc<InteractionLog>) -> Self {
        let tracker = ProgressTracker::new(store.clone());
        Self {
            store,
            tracker,
            interaction_log,
        }
    }

    /// Provision a profile for a new student. Idempotent.
    pub async fn register_student(&self, student_id: &str) -> EngineResult<()> {
        validate_student_id(student_id)?;
        self.store.ensure_profile(student_id).await;
        Ok(())
    }

    /// Ingest one learning event: validate, fold it into the student's
    /// metrics, and return the updated metrics together with the advisory
    /// signal computed against them.
    pub async fn record_event(
        &self,
        event: &LearningEvent,
    ) -> EngineResult<(TopicMetrics, AdaptiveSignal)> {
        validate_student_id(&event.student_id)?;
        validate_topic(&event.topic)?;

        let metrics = self.tracker.process_event(event).await?;
        let signal = signal_for(&metrics);
        info!(
            "[adaptive] {}/{}: {:?} → {:?}",
            event.student_id, event.topic, event.event_type, signal.signal_type
        );
        Ok((metrics, signal))
    }

    /// Advisory signal for one topic. Unknown student or topic yields the
    /// Maintain sentinel, distinguishing "no information yet" from failure.
    pub async fn topic_signal(&self, student_id: &str, topic: &str) -> AdaptiveSignal {
        match self.store.get_profile(student_id).await {
            Some(profile) => match profile.topics.get(topic) {
                Some(metrics) => signal_for(metrics),
                None => maintain_sentinel(topic),
            },
            None => maintain_sentinel(topic),
        }
    }

    /// Current and suggested depth tier for one topic, derived from the
    /// signal. New students and new topics both start at Core.
    pub async fn depth_adjustment(&self, student_id: &str, topic: &str) -> DepthAdjustment {
        let Some(profile) = self.store.get_profile(student_id).await else {
            return core_sentinel(REASON_NEW_STUDENT);
        };
        let Some(metrics) = profile.topics.get(topic) else {
            return core_sentinel(REASON_NEW_TOPIC);
        };

        let signal = signal_for(metrics);
        let suggested_depth = match signal.signal_type {
            SignalKind::IncreaseDepth => metrics.last_depth.next(),
            SignalKind::ReduceComplexity => metrics.last_depth.previous(),
            _ => metrics.last_depth,
        };

        DepthAdjustment {
            current_depth: metrics.last_depth,
            suggested_depth,
            reason: signal.reason,
        }
    }

    /// Full progress view for one student: profile snapshot, insights, and
    /// a signal per topic. `None` when the student is unknown.
    pub async fn student_summary(&self, student_id: &str) -> Option<StudentSummary> {
        let profile = self.store.get_profile(student_id).await?;
        let insights = generate_insights(&profile);
        let signals = profile.topics.values().map(signal_for).collect();
        Some(StudentSummary {
            profile,
            insights,
            signals,
        })
    }

    /// Teacher- and institution-facing rollup over every student and the
    /// full interaction log. Snapshot-consistent, may trail writers by one
    /// update.
    pub async fn dashboard_metrics(&self) -> DashboardMetrics {
        let profiles = self.store.profiles().await;
        let logs = self.interaction_log.snapshot();
        dashboard::aggregate(&profiles, &logs)
    }

    pub fn interaction_log(&self) -> &InteractionLog {
        &self.interaction_log
    }
}

fn maintain_sentinel(topic: &str) -> AdaptiveSignal {
    AdaptiveSignal {
        topic: topic.to_string(),
        signal_type: SignalKind::Maintain,
        reason: REASON_NO_TOPIC_DATA.to_string(),
    }
}

fn core_sentinel(reason: &str) -> DepthAdjustment {
    DepthAdjustment {
        current_depth: DepthLevel::Core,
        suggested_depth: DepthLevel::Core,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atoms::error::EngineError;
    use crate::atoms::types::LearningEventKind;
    use chrono::Utc;

    fn make_engine() -> AdaptiveEngine {
        AdaptiveEngine::new(
            Arc::new(ProgressStore::new()),
            Arc::new(InteractionLog::new()),
        )
    }

    fn event(student: &str, topic: &str, depth: DepthLevel, score: Option<f64>) -> LearningEvent {
        LearningEvent {
            student_id: student.into(),
            topic: topic.into(),
            event_type: match score {
                Some(_) => LearningEventKind::AssignmentComplete,
                None => LearningEventKind::Explanation,
            },
            depth,
            score,
            mistakes: Vec::new(),
            time_spent_seconds: 45,
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_blank_ids_are_rejected_at_the_boundary() {
        let engine = make_engine();
        let err = engine
            .record_event(&event("", "Arrays", DepthLevel::Core, None))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));

        let err = engine
            .record_event(&event("s1", "x", DepthLevel::Core, None))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_record_event_returns_metrics_and_signal() {
        let engine = make_engine();
        engine.register_student("s1").await.unwrap();

        let (metrics, signal) = engine
            .record_event(&event("s1", "Arrays", DepthLevel::Core, None))
            .await
            .unwrap();
        assert_eq!(metrics.mastery_score, 5.0);
        assert_eq!(signal.signal_type, SignalKind::Maintain);
        assert_eq!(signal.topic, "Arrays");
    }

    #[tokio::test]
    async fn test_unknown_student_and_topic_sentinels() {
        let engine = make_engine();

        let signal = engine.topic_signal("ghost", "Arrays").await;
        assert_eq!(signal.signal_type, SignalKind::Maintain);
        assert_eq!(signal.reason, REASON_NO_TOPIC_DATA);

        let adjustment = engine.depth_adjustment("ghost", "Arrays").await;
        assert_eq!(adjustment.current_depth, DepthLevel::Core);
        assert_eq!(adjustment.suggested_depth, DepthLevel::Core);
        assert_eq!(adjustment.reason, REASON_NEW_STUDENT);

        engine.register_student("s1").await.unwrap();
        let adjustment = engine.depth_adjustment("s1", "Arrays").await;
        assert_eq!(adjustment.reason, REASON_NEW_TOPIC);

        assert!(engine.student_summary("ghost").await.is_none());
    }

    #[tokio::test]
    async fn test_depth_adjustment_moves_with_the_signal() {
        let engine = make_engine();
        engine.register_student("s1").await.unwrap();

        // Two perfect Applied assignments: (100-50)/10 × 1.5 × 2 = +15 each,
        // then a third pushes past the 85-point increase threshold.
        for _ in 0..6 {
            engine
                .record_event(&event("s1", "Graphs", DepthLevel::Applied, Some(100.0)))
                .await
                .unwrap();
        }

        let adjustment = engine.depth_adjustment("s1", "Graphs").await;
        assert_eq!(adjustment.current_depth, DepthLevel::Applied);
        assert_eq!(adjustment.suggested_depth, DepthLevel::Mastery);
    }

    #[tokio::test]
    async fn test_reduce_complexity_steps_down() {
        let engine = make_engine();
        engine.register_student("s1").await.unwrap();

        let mut e = event("s1", "Graphs", DepthLevel::Applied, None);
        e.mistakes = vec!["a".into(), "b".into(), "c".into()];
        engine.record_event(&e).await.unwrap();

        let adjustment = engine.depth_adjustment("s1", "Graphs").await;
        assert_eq!(adjustment.suggested_depth, DepthLevel::Core);
    }

    #[tokio::test]
    async fn test_student_summary_carries_insights_and_signals() {
        let engine = make_engine();
        engine.register_student("s1").await.unwrap();

        for _ in 0..6 {
            engine
                .record_event(&event("s1", "Arrays", DepthLevel::Mastery, Some(100.0)))
                .await
                .unwrap();
        }

        let summary = engine.student_summary("s1").await.unwrap();
        assert_eq!(summary.profile.overall_stats.total_sessions, 6);
        assert_eq!(summary.signals.len(), 1);
        assert!(summary
            .insights
            .iter()
            .any(|i| i.kind == crate::atoms::types::InsightKind::Strength));
    }

    #[tokio::test]
    async fn test_dashboard_rollup_over_engine_state() {
        let engine = make_engine();
        engine.register_student("s1").await.unwrap();
        engine
            .record_event(&event("s1", "Arrays", DepthLevel::Core, Some(30.0)))
            .await
            .unwrap();
        engine.interaction_log().record_interaction(
            DepthLevel::Core,
            crate::atoms::types::TaskMode::Assignment,
            100,
            200,
            0.9,
            0.8,
            true,
        );

        let metrics = engine.dashboard_metrics().await;
        assert_eq!(metrics.teacher.total_students, 1);
        assert_eq!(metrics.institution.total_interactions, 1);
        assert_eq!(metrics.institution.ethics_flag_count, 1);
    }
}
