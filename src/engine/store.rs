// ── StudyWithMe Engine: Progress Store ─────────────────────────────────────
// In-memory, process-lifetime store for student profiles. Constructed once
// at startup and passed by `Arc` to every consumer — no module-level
// globals.
//
// The API is async behind the `ProfileStore` trait so a real database can be
// swapped in later without touching the tracker or the query layer. State is
// memory-resident and lost on restart; durability is a host concern, not
// this crate's.
//
// Reads hand out cloned snapshots. A snapshot may be one update behind a
// concurrent writer, which is fine for dashboards and summaries. Writers
// that need read-modify-write atomicity go through the tracker, which holds
// a per-student mutex around the whole sequence.

use async_trait::async_trait;
use log::debug;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::atoms::types::{OverallStats, StudentProfile, TopicMetrics};

// ── Storage contract ───────────────────────────────────────────────────────

/// CRUD contract for student progress persistence.
///
/// Unknown students are an expected outcome on the read path, so
/// `get_profile` returns `Option` rather than erroring.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Snapshot of one profile, or `None` for an unknown student.
    async fn get_profile(&self, student_id: &str) -> Option<StudentProfile>;

    /// Create an empty profile if one does not exist yet. Idempotent.
    async fn ensure_profile(&self, student_id: &str);

    /// Replace the metrics for one topic, creating the enclosing profile
    /// if absent.
    async fn upsert_topic_metrics(&self, student_id: &str, topic: &str, metrics: TopicMetrics);

    /// Replace the overall-stats block of a profile, creating the profile
    /// if absent.
    async fn update_overall_stats(&self, student_id: &str, stats: OverallStats);

    /// Snapshot of every profile, for dashboard aggregation.
    async fn profiles(&self) -> Vec<StudentProfile>;
}

// ── In-memory implementation ───────────────────────────────────────────────

/// The process-local implementation backing the running system.
#[derive(Default)]
pub struct ProgressStore {
    profiles: RwLock<HashMap<String, StudentProfile>>,
}

impl ProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of known students.
    pub async fn student_count(&self) -> usize {
        self.profiles.read().await.len()
    }
}

#[async_trait]
impl ProfileStore for ProgressStore {
    async fn get_profile(&self, student_id: &str) -> Option<StudentProfile> {
        self.profiles.read().await.get(student_id).cloned()
    }

    async fn ensure_profile(&self, student_id: &str) {
        let mut profiles = self.profiles.write().await;
        if !profiles.contains_key(student_id) {
            debug!("[store] creating profile for student {}", student_id);
            profiles.insert(student_id.to_string(), StudentProfile::new(student_id));
        }
    }

    async fn upsert_topic_metrics(&self, student_id: &str, topic: &str, metrics: TopicMetrics) {
        let mut profiles = self.profiles.write().await;
        let profile = profiles
            .entry(student_id.to_string())
            .or_insert_with(|| StudentProfile::new(student_id));
        profile.topics.insert(topic.to_string(), metrics);
    }

    async fn update_overall_stats(&self, student_id: &str, stats: OverallStats) {
        let mut profiles = self.profiles.write().await;
        let profile = profiles
            .entry(student_id.to_string())
            .or_insert_with(|| StudentProfile::new(student_id));
        profile.overall_stats = stats;
    }

    async fn profiles(&self) -> Vec<StudentProfile> {
        self.profiles.read().await.values().cloned().collect()
    }
}
