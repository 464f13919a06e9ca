//! ListColumns command

use crate::command::{to_value, unlogged, CommandResult};
use crate::error::BoardError;
use crate::store::BoardStore;
use crate::types::ProjectId;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use taskdeck_operations::{operation, Execute};

/// List a project's columns left to right, each with its task count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListColumns {
    pub project: ProjectId,
}

operation!(ListColumns, verb = "list", noun = "columns", description = "List the columns of a project");

impl ListColumns {
    pub fn new(project: impl Into<ProjectId>) -> Self {
        Self {
            project: project.into(),
        }
    }
}

impl Execute<BoardStore, BoardError> for ListColumns {
    fn execute(&self, ctx: &mut BoardStore) -> CommandResult {
        let columns: Vec<Value> = ctx
            .project_columns(&self.project)
            .into_iter()
            .map(|column| {
                let mut value = to_value(column);
                if let Some(obj) = value.as_object_mut() {
                    obj.insert("task_count".into(), json!(column.len()));
                }
                value
            })
            .collect();

        let count = columns.len();
        unlogged(json!({ "columns": columns, "count": count }))
    }
}
