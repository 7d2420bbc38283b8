// ── StudyWithMe Atoms: Constants ───────────────────────────────────────────
// All named tuning constants for the crate live here.
// Rationale: collecting constants in one place eliminates magic numbers,
// makes auditing the pedagogy rules easier, and keeps every layer's code
// self-documenting.

// ── Mastery score bounds ───────────────────────────────────────────────────
pub(crate) const MASTERY_MIN: f64 = 0.0;
pub(crate) const MASTERY_MAX: f64 = 100.0;

// ── Confidence thresholds ──────────────────────────────────────────────────
// Confidence is derived from the mastery score and never set independently.
pub(crate) const CONFIDENCE_HIGH_THRESHOLD: f64 = 80.0;
pub(crate) const CONFIDENCE_MEDIUM_THRESHOLD: f64 = 50.0;

// ── Mastery update weights ─────────────────────────────────────────────────
// Used by `ProgressTracker::process_event()` in engine/tracker.rs.
// An explanation always nudges the score up a little; a completed assignment
// moves it in either direction around the 50-point pivot.
pub(crate) const EXPLANATION_BASE_DELTA: f64 = 5.0;
pub(crate) const ASSIGNMENT_SCORE_PIVOT: f64 = 50.0;
pub(crate) const ASSIGNMENT_SCORE_DIVISOR: f64 = 10.0;
pub(crate) const ASSIGNMENT_WEIGHT_MULTIPLIER: f64 = 2.0;

// ── Staleness decay ────────────────────────────────────────────────────────
// No penalty within the grace window; beyond it, one point per stale day,
// capped so a long absence can never wipe out more than 10 points per event.
pub(crate) const STALENESS_GRACE_DAYS: f64 = 7.0;
pub(crate) const STALENESS_PENALTY_CAP: f64 = 10.0;

// ── Misconception tracking ─────────────────────────────────────────────────
pub(crate) const COMMON_MISTAKES_CAP: usize = 10;

// ── Depth signal rule thresholds ───────────────────────────────────────────
// Used by `signal_for()` in engine/signals.rs. Rule order is load-bearing;
// see that module for the precedence.
pub(crate) const SIGNAL_MISTAKE_COUNT: usize = 3;
pub(crate) const SIGNAL_INCREASE_DEPTH_SCORE: f64 = 85.0;
pub(crate) const SIGNAL_PRACTICE_SCORE: f64 = 50.0;
pub(crate) const SIGNAL_PRACTICE_ATTEMPTS: u32 = 3;
pub(crate) const SIGNAL_MASTERY_READY_SCORE: f64 = 75.0;

// ── Insight classification thresholds ──────────────────────────────────────
pub(crate) const INSIGHT_STRENGTH_SCORE: f64 = 80.0;
pub(crate) const INSIGHT_WEAKNESS_SCORE: f64 = 40.0;
pub(crate) const INSIGHT_WEAKNESS_ATTEMPTS: u32 = 2;
pub(crate) const INSIGHT_PLATEAU_LOW: f64 = 50.0;
pub(crate) const INSIGHT_PLATEAU_HIGH: f64 = 70.0;
pub(crate) const INSIGHT_PLATEAU_ATTEMPTS: u32 = 5;

// ── Dashboard aggregation ──────────────────────────────────────────────────
pub(crate) const TOPIC_AT_RISK_THRESHOLD: f64 = 50.0;

// ── Input validation bounds ────────────────────────────────────────────────
pub(crate) const TOPIC_MIN_LEN: usize = 2;
pub(crate) const TOPIC_MAX_LEN: usize = 50;

// ── Token accounting ───────────────────────────────────────────────────────
// Heuristic: ~4 characters per token, matching the provider's rough average.
pub(crate) const CHARS_PER_TOKEN: usize = 4;
// USD per million tokens.
pub(crate) const INPUT_COST_PER_MTOK: f64 = 0.50;
pub(crate) const OUTPUT_COST_PER_MTOK: f64 = 1.50;
