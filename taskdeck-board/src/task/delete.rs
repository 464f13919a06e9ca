//! DeleteTask command

use crate::command::{logged, unchanged, unlogged, CommandResult};
use crate::error::BoardError;
use crate::store::BoardStore;
use crate::types::TaskId;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Instant;
use taskdeck_operations::{operation, Execute};

/// Remove a task from its column and from the board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteTask {
    pub id: TaskId,
}

operation!(DeleteTask, verb = "delete", noun = "task", description = "Delete a task");

impl DeleteTask {
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self { id: id.into() }
    }
}

impl Execute<BoardStore, BoardError> for DeleteTask {
    fn execute(&self, ctx: &mut BoardStore) -> CommandResult {
        let started = Instant::now();
        let Some(column) = ctx.task(&self.id).map(|t| t.column_id.clone()) else {
            return unlogged(unchanged());
        };
        ctx.delete_task(&self.id);
        logged(
            self,
            started,
            json!({ "deleted": true, "id": self.id, "column": column }),
        )
    }
}
