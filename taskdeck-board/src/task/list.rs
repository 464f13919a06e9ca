//! ListTasks command

use crate::command::{unlogged, CommandResult};
use crate::error::BoardError;
use crate::store::BoardStore;
use crate::types::ColumnId;
use serde::{Deserialize, Serialize};
use serde_json::json;
use taskdeck_operations::{operation, Execute};

/// List a column's tasks in display order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListTasks {
    pub column: ColumnId,
}

operation!(ListTasks, verb = "list", noun = "tasks", description = "List the tasks of a column in order");

impl ListTasks {
    pub fn new(column: impl Into<ColumnId>) -> Self {
        Self {
            column: column.into(),
        }
    }
}

impl Execute<BoardStore, BoardError> for ListTasks {
    fn execute(&self, ctx: &mut BoardStore) -> CommandResult {
        let tasks = ctx.column_tasks(&self.column);
        let count = tasks.len();
        unlogged(json!({ "tasks": tasks, "count": count }))
    }
}
