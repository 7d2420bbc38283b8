// ── StudyWithMe Engine: Dashboard Aggregator ───────────────────────────────
// Rolls profile snapshots and the interaction log up into teacher-facing and
// institution-facing summary numbers. Pure read path over snapshots; a
// report may trail a concurrent writer by one update, which is acceptable.
//
// Every mean is guarded against empty input and returns 0 instead of
// dividing by zero.

use std::collections::BTreeMap;

use crate::atoms::constants::TOPIC_AT_RISK_THRESHOLD;
use crate::atoms::types::{
    DashboardMetrics, DepthDistribution, DepthLevel, InstitutionMetrics, LogEntry,
    StudentProfile, TeacherMetrics, TopicRisk,
};

pub fn aggregate(profiles: &[StudentProfile], logs: &[LogEntry]) -> DashboardMetrics {
    DashboardMetrics {
        teacher: teacher_metrics(profiles),
        institution: institution_metrics(logs),
    }
}

fn teacher_metrics(profiles: &[StudentProfile]) -> TeacherMetrics {
    if profiles.is_empty() {
        return TeacherMetrics {
            total_students: 0,
            avg_mastery: 0.0,
            topics_at_risk: Vec::new(),
            active_students_last_7_days: 0,
        };
    }

    let mut total_mastery = 0.0;
    let mut topic_count = 0usize;
    let mut per_topic: BTreeMap<&str, (f64, usize)> = BTreeMap::new();

    for profile in profiles {
        for metrics in profile.topics.values() {
            total_mastery += metrics.mastery_score;
            topic_count += 1;
            let slot = per_topic.entry(metrics.topic.as_str()).or_insert((0.0, 0));
            slot.0 += metrics.mastery_score;
            slot.1 += 1;
        }
    }

    let avg_mastery = if topic_count == 0 {
        0.0
    } else {
        (total_mastery / topic_count as f64).round()
    };

    let mut topics_at_risk: Vec<TopicRisk> = per_topic
        .into_iter()
        .map(|(topic, (total, count))| TopicRisk {
            topic: topic.to_string(),
            avg_score: total / count as f64,
        })
        .filter(|t| t.avg_score < TOPIC_AT_RISK_THRESHOLD)
        .collect();
    topics_at_risk.sort_by(|a, b| {
        a.avg_score
            .partial_cmp(&b.avg_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    TeacherMetrics {
        total_students: profiles.len(),
        avg_mastery,
        topics_at_risk,
        // TODO: apply a real 7-day recency filter once per-student last-seen
        // timestamps are tracked; the shipped behavior equals total_students
        // and is kept as-is until the intended semantics are confirmed.
        active_students_last_7_days: profiles.len(),
    }
}

fn institution_metrics(logs: &[LogEntry]) -> InstitutionMetrics {
    let total = logs.len();
    if total == 0 {
        return InstitutionMetrics {
            total_interactions: 0,
            avg_depth_alignment: 0.0,
            avg_clarity: 0.0,
            ethics_flag_count: 0,
            depth_distribution: DepthDistribution::default(),
        };
    }

    let mut distribution = DepthDistribution::default();
    let mut total_alignment = 0.0;
    let mut total_clarity = 0.0;
    let mut flags = 0usize;

    for entry in logs {
        match entry.depth {
            DepthLevel::Core => distribution.core += 1,
            DepthLevel::Applied => distribution.applied += 1,
            DepthLevel::Mastery => distribution.mastery += 1,
        }
        total_alignment += entry.depth_alignment_score;
        total_clarity += entry.clarity_score;
        if entry.ethics_flag {
            flags += 1;
        }
    }

    InstitutionMetrics {
        total_interactions: total,
        avg_depth_alignment: round2(total_alignment / total as f64),
        avg_clarity: round2(total_clarity / total as f64),
        ethics_flag_count: flags,
        depth_distribution: distribution,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
