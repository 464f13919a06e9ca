//! Board operation processor with activity logging

use crate::error::BoardError;
use crate::store::BoardStore;
use taskdeck_operations::{LogEntry, OperationProcessor};

/// Runs board commands and appends their log entries to the store's activity log
#[derive(Debug, Clone, Default)]
pub struct BoardOperationProcessor {
    actor: Option<String>,
}

impl BoardOperationProcessor {
    /// Processor that records entries without an actor
    pub fn new() -> Self {
        Self::default()
    }

    /// Processor that attributes every entry to `actor`
    pub fn with_actor(actor: impl Into<String>) -> Self {
        Self {
            actor: Some(actor.into()),
        }
    }
}

impl OperationProcessor<BoardStore, BoardError> for BoardOperationProcessor {
    fn actor(&self) -> Option<&str> {
        self.actor.as_deref()
    }

    fn record(&self, ctx: &mut BoardStore, entry: LogEntry) {
        ctx.record_activity(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{AddTask, GetTask};

    #[test]
    fn test_processor_records_only_changes() {
        let mut store = BoardStore::with_default_project("P");
        let column = store.projects().next().unwrap().column_ids[0].clone();
        let processor = BoardOperationProcessor::with_actor("ada");

        let task = processor
            .process(&AddTask::new(column, "x"), &mut store)
            .unwrap();
        let id = task["id"].as_str().unwrap();
        processor.process(&GetTask::new(id), &mut store).unwrap();

        let entries: Vec<_> = store.activity().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].op, "add task");
        assert_eq!(entries[0].actor.as_deref(), Some("ada"));
    }
}
