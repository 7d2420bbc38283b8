// ── StudyWithMe Engine: Interaction Log ────────────────────────────────────
// Append-only, in-memory record of model interactions. Unbounded by design
// for the memory-resident scope; the dashboard aggregator is the only
// reader. Constructed once and injected alongside the progress store.

use chrono::Utc;
use log::debug;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::atoms::types::{DepthLevel, LogEntry, TaskMode};

#[derive(Default)]
pub struct InteractionLog {
    entries: RwLock<Vec<LogEntry>>,
}

impl InteractionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a prebuilt entry.
    pub fn record(&self, entry: LogEntry) {
        self.entries.write().push(entry);
    }

    /// Build and append an entry for a just-finished interaction.
    /// Returns the entry id.
    #[allow(clippy::too_many_arguments)]
    pub fn record_interaction(
        &self,
        depth: DepthLevel,
        mode: TaskMode,
        prompt_tokens: u32,
        response_tokens: u32,
        depth_alignment_score: f64,
        clarity_score: f64,
        ethics_flag: bool,
    ) -> Uuid {
        let id = Uuid::new_v4();
        let entry = LogEntry {
            id,
            timestamp: Utc::now(),
            depth,
            mode,
            prompt_tokens,
            response_tokens,
            depth_alignment_score,
            clarity_score,
            ethics_flag,
        };
        debug!(
            "[log] {:?}/{:?} tokens {}+{} flag={}",
            depth, mode, prompt_tokens, response_tokens, ethics_flag
        );
        self.record(entry);
        id
    }

    /// Snapshot of all entries for aggregation.
    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.entries.read().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_snapshot() {
        let log = InteractionLog::new();
        assert!(log.is_empty());

        log.record_interaction(DepthLevel::Core, TaskMode::Learning, 120, 340, 0.9, 0.8, false);
        log.record_interaction(DepthLevel::Applied, TaskMode::Assignment, 80, 150, 0.7, 0.6, true);

        assert_eq!(log.len(), 2);
        let entries = log.snapshot();
        assert_eq!(entries[0].depth, DepthLevel::Core);
        assert!(entries[1].ethics_flag);
        assert_ne!(entries[0].id, entries[1].id);
    }
}
