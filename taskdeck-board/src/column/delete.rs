//! DeleteColumn command

use crate::command::{logged, unchanged, unlogged, CommandResult};
use crate::error::BoardError;
use crate::store::BoardStore;
use crate::types::ColumnId;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Instant;
use taskdeck_operations::{operation, Execute};

/// Delete a column and every task in it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteColumn {
    pub id: ColumnId,
}

operation!(DeleteColumn, verb = "delete", noun = "column", description = "Delete a column and its tasks");

impl DeleteColumn {
    pub fn new(id: impl Into<ColumnId>) -> Self {
        Self { id: id.into() }
    }
}

impl Execute<BoardStore, BoardError> for DeleteColumn {
    fn execute(&self, ctx: &mut BoardStore) -> CommandResult {
        let started = Instant::now();
        let Some(removed) = ctx.column(&self.id).map(|c| c.task_ids.clone()) else {
            return unlogged(unchanged());
        };
        ctx.delete_column(&self.id);

        logged(
            self,
            started,
            json!({
                "deleted": true,
                "id": self.id,
                "removed_tasks": removed,
            }),
        )
    }
}
