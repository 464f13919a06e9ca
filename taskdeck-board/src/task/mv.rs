//! MoveTask command

use crate::command::{logged, to_value, unlogged, CommandResult};
use crate::error::BoardError;
use crate::reconcile::{MoveOutcome, MoveRequest};
use crate::store::BoardStore;
use crate::types::{ColumnId, TaskId};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Instant;
use taskdeck_operations::{operation, Execute};

/// Move a task to a column and index.
///
/// `index` counts positions in the destination list with the task already taken out.
/// Larger values are clamped; without an index the task goes to the end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveTask {
    pub id: TaskId,
    pub column: ColumnId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

operation!(MoveTask, verb = "move", noun = "task", description = "Move a task to a different column or position");

impl MoveTask {
    pub fn new(id: impl Into<TaskId>, column: impl Into<ColumnId>, index: usize) -> Self {
        Self {
            id: id.into(),
            column: column.into(),
            index: Some(index),
        }
    }

    /// Move to the end of a column
    pub fn to_column(id: impl Into<TaskId>, column: impl Into<ColumnId>) -> Self {
        Self {
            id: id.into(),
            column: column.into(),
            index: None,
        }
    }

    pub fn request(&self) -> MoveRequest {
        MoveRequest::new(
            self.id.clone(),
            self.column.clone(),
            self.index.unwrap_or(usize::MAX),
        )
    }
}

impl Execute<BoardStore, BoardError> for MoveTask {
    fn execute(&self, ctx: &mut BoardStore) -> CommandResult {
        let started = Instant::now();
        let outcome = ctx.apply_move(&self.request());
        let value = json!({
            "outcome": outcome,
            "task": ctx.task(&self.id).map(to_value),
        });

        match outcome {
            MoveOutcome::Moved { .. } => logged(self, started, value),
            MoveOutcome::Unchanged(_) => unlogged(value),
        }
    }
}
