// ── StudyWithMe Engine: Insight Generator ──────────────────────────────────
// Derives display-only strengths / weaknesses / recommendations from a
// student's full topic map. Read path only; nothing here mutates state.
//
// Output ordering: all strengths, then all weaknesses, then all plateau
// recommendations, each group in topic-map iteration order. The three
// conditions are checked independently, so one topic can in principle
// appear in more than one group.

use crate::atoms::constants::{
    INSIGHT_PLATEAU_ATTEMPTS, INSIGHT_PLATEAU_HIGH, INSIGHT_PLATEAU_LOW,
    INSIGHT_STRENGTH_SCORE, INSIGHT_WEAKNESS_ATTEMPTS, INSIGHT_WEAKNESS_SCORE,
};
use crate::atoms::types::{InsightKind, LearningInsight, StudentProfile};

pub fn generate_insights(profile: &StudentProfile) -> Vec<LearningInsight> {
    let mut insights = Vec::new();
    let topics: Vec<_> = profile.topics.values().collect();

    for t in topics.iter().filter(|t| t.mastery_score > INSIGHT_STRENGTH_SCORE) {
        insights.push(LearningInsight {
            kind: InsightKind::Strength,
            topic: t.topic.clone(),
            message: format!(
                "You've demonstrated high proficiency in {}. You're ready for Mastery challenges.",
                t.topic
            ),
        });
    }

    for t in topics.iter().filter(|t| {
        t.mastery_score < INSIGHT_WEAKNESS_SCORE && t.attempts > INSIGHT_WEAKNESS_ATTEMPTS
    }) {
        insights.push(LearningInsight {
            kind: InsightKind::Weakness,
            topic: t.topic.clone(),
            message: format!(
                "It seems {} is challenging. Let's revisit the Core concepts.",
                t.topic
            ),
        });
    }

    for t in topics.iter().filter(|t| {
        t.mastery_score >= INSIGHT_PLATEAU_LOW
            && t.mastery_score <= INSIGHT_PLATEAU_HIGH
            && t.attempts > INSIGHT_PLATEAU_ATTEMPTS
    }) {
        insights.push(LearningInsight {
            kind: InsightKind::Recommendation,
            topic: t.topic.clone(),
            message: format!(
                "You're consistent in {}, but growth has slowed. Try a practical assignment to breakthrough.",
                t.topic
            ),
        });
    }

    insights
}
