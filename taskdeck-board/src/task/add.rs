//! AddTask command

use crate::command::{failed, logged, to_value, unchanged, unlogged, CommandResult};
use crate::error::BoardError;
use crate::store::BoardStore;
use crate::types::{ColumnId, NewTask, Priority};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use taskdeck_operations::{operation, Execute};

/// Create a task at the bottom of a column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTask {
    pub column: ColumnId,
    #[serde(flatten)]
    pub fields: NewTask,
}

operation!(AddTask, verb = "add", noun = "task", description = "Add a task to the end of a column");

impl AddTask {
    pub fn new(column: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            fields: NewTask::new(title),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.fields = self.fields.with_description(description);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.fields = self.fields.with_priority(priority);
        self
    }
}

impl Execute<BoardStore, BoardError> for AddTask {
    fn execute(&self, ctx: &mut BoardStore) -> CommandResult {
        let started = Instant::now();
        if self.fields.title.trim().is_empty() {
            return failed(self, started, BoardError::missing_field("title"));
        }

        match ctx.create_task(&self.column, self.fields.clone()) {
            Some(task) => logged(self, started, to_value(&task)),
            None => unlogged(unchanged()),
        }
    }
}
