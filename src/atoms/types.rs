// ── StudyWithMe Atoms: Pure Data Types ─────────────────────────────────────
// All plain struct/enum definitions plus their small pure helpers.
// Atoms layer rule: no I/O, no clocks, no side effects, no imports from
// engine/. Serde names mirror the HTTP API vocabulary the frontends already
// speak ("masteryScore", "INCREASE_DEPTH", "Core"…), so a profile snapshot
// serializes byte-compatible with the existing dashboard payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::atoms::constants::{CONFIDENCE_HIGH_THRESHOLD, CONFIDENCE_MEDIUM_THRESHOLD};

// ── Depth tiers ────────────────────────────────────────────────────────────

/// Pedagogical complexity tier. Ordinal: Core < Applied < Mastery
/// (the derived `Ord` is relied on by the highest-depth ratchet).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum DepthLevel {
    #[default]
    Core,
    Applied,
    Mastery,
}

impl DepthLevel {
    /// Mastery-delta weight for events at this tier.
    pub fn weight(self) -> f64 {
        match self {
            DepthLevel::Core => 1.0,
            DepthLevel::Applied => 1.5,
            DepthLevel::Mastery => 2.0,
        }
    }

    /// The next tier up. Saturates at Mastery.
    pub fn next(self) -> DepthLevel {
        match self {
            DepthLevel::Core => DepthLevel::Applied,
            DepthLevel::Applied | DepthLevel::Mastery => DepthLevel::Mastery,
        }
    }

    /// The next tier down. Saturates at Core.
    pub fn previous(self) -> DepthLevel {
        match self {
            DepthLevel::Mastery => DepthLevel::Applied,
            DepthLevel::Applied | DepthLevel::Core => DepthLevel::Core,
        }
    }
}

/// Whether the session permits direct answers. Assignment mode routes input
/// through the ethics guard before it ever reaches the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskMode {
    Learning,
    Assignment,
}

// ── Per-topic metrics ──────────────────────────────────────────────────────

/// Confidence label derived solely from the mastery score.
/// Never settable independently — see [`ConfidenceLevel::from_score`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    /// High ⇔ score ≥ 80, Medium ⇔ 50 ≤ score < 80, Low ⇔ score < 50.
    pub fn from_score(score: f64) -> Self {
        if score >= CONFIDENCE_HIGH_THRESHOLD {
            ConfidenceLevel::High
        } else if score >= CONFIDENCE_MEDIUM_THRESHOLD {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }
}

/// Rolling mastery estimate for one student × topic pair.
///
/// Invariants (enforced by the tracker, the sole mutator):
///   • `mastery_score` ∈ [0, 100]
///   • `confidence_level` is always `ConfidenceLevel::from_score(mastery_score)`
///   • `common_mistakes` holds ≤ 10 distinct strings, most recent first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicMetrics {
    pub topic: String,
    pub mastery_score: f64,
    pub confidence_level: ConfidenceLevel,
    pub attempts: u32,
    pub last_depth: DepthLevel,
    pub last_interaction: DateTime<Utc>,
    pub common_mistakes: Vec<String>,
}

impl TopicMetrics {
    /// Fresh metrics for a topic first seen at `now`. Initializing
    /// `last_interaction` to the creation instant is what keeps a brand-new
    /// topic from incurring a staleness penalty on its very first event.
    pub fn new(topic: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            topic: topic.into(),
            mastery_score: 0.0,
            confidence_level: ConfidenceLevel::Low,
            attempts: 0,
            last_depth: DepthLevel::Core,
            last_interaction: now,
            common_mistakes: Vec::new(),
        }
    }
}

// ── Student profile ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    pub total_sessions: u32,
    /// Ratchet: only ever moves up along Core < Applied < Mastery.
    pub highest_depth_reached: DepthLevel,
    /// Incremental mean over scored events, with n = post-increment
    /// `total_sessions`.
    pub average_reasoning_score: f64,
}

impl Default for OverallStats {
    fn default() -> Self {
        Self {
            total_sessions: 0,
            highest_depth_reached: DepthLevel::Core,
            average_reasoning_score: 0.0,
        }
    }
}

/// One student's full progress record. Lives for the process lifetime;
/// topics are created lazily and never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub student_id: String,
    pub topics: BTreeMap<String, TopicMetrics>,
    pub overall_stats: OverallStats,
}

impl StudentProfile {
    pub fn new(student_id: impl Into<String>) -> Self {
        Self {
            student_id: student_id.into(),
            topics: BTreeMap::new(),
            overall_stats: OverallStats::default(),
        }
    }
}

// ── Learning events ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LearningEventKind {
    Explanation,
    AssignmentAttempt,
    AssignmentComplete,
}

/// One learning interaction, consumed exactly once by the tracker.
/// `score` is an explicit `Option` so "no score" is statically distinct from
/// a score of zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningEvent {
    pub student_id: String,
    pub topic: String,
    pub event_type: LearningEventKind,
    pub depth: DepthLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mistakes: Vec<String>,
    pub time_spent_seconds: u64,
    pub timestamp: DateTime<Utc>,
}

// ── Adaptive signals ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalKind {
    IncreaseDepth,
    ReduceComplexity,
    PracticeNeeded,
    MasteryReady,
    Maintain,
}

/// Advisory recommendation about a topic's depth tier. Transient: recomputed
/// on every query, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptiveSignal {
    pub topic: String,
    pub signal_type: SignalKind,
    pub reason: String,
}

/// Resolved depth suggestion for a (student, topic) query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepthAdjustment {
    pub current_depth: DepthLevel,
    pub suggested_depth: DepthLevel,
    pub reason: String,
}

// ── Insights ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InsightKind {
    Strength,
    Weakness,
    Recommendation,
}

/// Display-only classification of one topic in a student's progress report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningInsight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub topic: String,
    pub message: String,
}

/// Per-student summary served to the progress page: profile snapshot plus
/// derived insights and signals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummary {
    pub profile: StudentProfile,
    pub insights: Vec<LearningInsight>,
    pub signals: Vec<AdaptiveSignal>,
}

// ── Interaction log ────────────────────────────────────────────────────────

/// Lightweight record of one model interaction, read only by the dashboard
/// aggregator. Append-only, unbounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: uuid::Uuid,
    pub timestamp: DateTime<Utc>,
    pub depth: DepthLevel,
    pub mode: TaskMode,
    pub prompt_tokens: u32,
    pub response_tokens: u32,
    pub depth_alignment_score: f64,
    pub clarity_score: f64,
    pub ethics_flag: bool,
}

// ── Dashboard metrics ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicRisk {
    pub topic: String,
    pub avg_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherMetrics {
    pub total_students: usize,
    pub avg_mastery: f64,
    pub topics_at_risk: Vec<TopicRisk>,
    pub active_students_last_7_days: usize,
}

/// Interaction counts per depth tier. A struct rather than a map so all
/// three tiers are always present in the payload, even at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DepthDistribution {
    #[serde(rename = "Core")]
    pub core: usize,
    #[serde(rename = "Applied")]
    pub applied: usize,
    #[serde(rename = "Mastery")]
    pub mastery: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstitutionMetrics {
    pub total_interactions: usize,
    pub avg_depth_alignment: f64,
    pub avg_clarity: f64,
    pub ethics_flag_count: usize,
    pub depth_distribution: DepthDistribution,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub teacher: TeacherMetrics,
    pub institution: InstitutionMetrics,
}

// ── Model-output payloads (strictly validated in engine/schema.rs) ─────────

/// An auto-generated assignment as returned by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentStructure {
    pub title: String,
    pub objective: String,
    pub difficulty: DepthLevel,
    pub questions: Vec<String>,
    pub hints: Vec<String>,
}

/// Model-graded feedback on a submitted assignment answer. A valid value of
/// this type is what a controller folds into an `ASSIGNMENT_COMPLETE`
/// learning event (score = conceptual_score, mistakes = misconceptions).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentFeedback {
    pub conceptual_score: f64,
    pub feedback: String,
    pub misconceptions: Vec<String>,
    pub next_steps: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_ordering_and_saturation() {
        assert!(DepthLevel::Core < DepthLevel::Applied);
        assert!(DepthLevel::Applied < DepthLevel::Mastery);

        assert_eq!(DepthLevel::Core.next(), DepthLevel::Applied);
        assert_eq!(DepthLevel::Applied.next(), DepthLevel::Mastery);
        assert_eq!(DepthLevel::Mastery.next(), DepthLevel::Mastery);

        assert_eq!(DepthLevel::Mastery.previous(), DepthLevel::Applied);
        assert_eq!(DepthLevel::Applied.previous(), DepthLevel::Core);
        assert_eq!(DepthLevel::Core.previous(), DepthLevel::Core);
    }

    #[test]
    fn test_depth_weights() {
        assert_eq!(DepthLevel::Core.weight(), 1.0);
        assert_eq!(DepthLevel::Applied.weight(), 1.5);
        assert_eq!(DepthLevel::Mastery.weight(), 2.0);
    }

    #[test]
    fn test_confidence_thresholds_are_strict() {
        assert_eq!(ConfidenceLevel::from_score(0.0), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_score(49.9), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_score(50.0), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_score(79.9), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_score(80.0), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_score(100.0), ConfidenceLevel::High);
    }

    #[test]
    fn test_wire_names_match_frontend_vocabulary() {
        let kind = serde_json::to_string(&LearningEventKind::AssignmentComplete).unwrap();
        assert_eq!(kind, "\"ASSIGNMENT_COMPLETE\"");

        let signal = serde_json::to_string(&SignalKind::IncreaseDepth).unwrap();
        assert_eq!(signal, "\"INCREASE_DEPTH\"");

        let depth = serde_json::to_string(&DepthLevel::Applied).unwrap();
        assert_eq!(depth, "\"Applied\"");

        let metrics = TopicMetrics::new("Arrays", chrono::Utc::now());
        let json = serde_json::to_value(&metrics).unwrap();
        assert!(json.get("masteryScore").is_some());
        assert!(json.get("commonMistakes").is_some());
    }

    #[test]
    fn test_event_score_absent_is_not_zero() {
        let json = r#"{
            "studentId": "s1",
            "topic": "Arrays",
            "eventType": "ASSIGNMENT_ATTEMPT",
            "depth": "Core",
            "timeSpentSeconds": 30,
            "timestamp": "2024-01-01T00:00:00Z"
        }"#;
        let event: LearningEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.score, None);
        assert!(event.mistakes.is_empty());
    }
}
