//! UpdateTask command

use crate::command::{logged, to_value, unlogged, CommandResult};
use crate::error::BoardError;
use crate::store::BoardStore;
use crate::types::{TaskId, TaskPatch};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;
use taskdeck_operations::{operation, Execute};

/// Edit task fields in place. Column and order stay as they are.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTask {
    pub id: TaskId,
    #[serde(flatten)]
    pub patch: TaskPatch,
}

operation!(UpdateTask, verb = "update", noun = "task", description = "Edit a task's fields");

impl UpdateTask {
    pub fn new(id: impl Into<TaskId>, patch: TaskPatch) -> Self {
        Self { id: id.into(), patch }
    }
}

impl Execute<BoardStore, BoardError> for UpdateTask {
    fn execute(&self, ctx: &mut BoardStore) -> CommandResult {
        let started = Instant::now();
        let Some(before) = ctx.task(&self.id).cloned() else {
            return unlogged(Value::Null);
        };

        match ctx.update_task(&self.id, self.patch.clone()) {
            Some(task) if task != before => logged(self, started, to_value(&task)),
            Some(task) => unlogged(to_value(&task)),
            None => unlogged(Value::Null),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NewTask, Priority};
    use taskdeck_operations::ExecutionResult;

    #[test]
    fn test_update_task_fields() {
        let mut store = BoardStore::with_default_project("P");
        let column = store.projects().next().unwrap().column_ids[0].clone();
        let task = store
            .create_task(&column, NewTask::new("x").with_description("old"))
            .unwrap()
            .id;

        let cmd: UpdateTask = serde_json::from_value(serde_json::json!({
            "id": task,
            "priority": "low",
            "description": null,
        }))
        .unwrap();
        let result = cmd.execute(&mut store);
        assert!(result.should_log());

        let updated = store.task(&task).unwrap();
        assert_eq!(updated.priority, Priority::Low);
        assert_eq!(updated.description, None);
        assert_eq!(updated.column_id, column);
    }

    #[test]
    fn test_update_unknown_task_returns_null() {
        let mut store = BoardStore::new();
        let result = UpdateTask::new("ghost", TaskPatch::default().title("t")).execute(&mut store);
        assert!(matches!(result, ExecutionResult::Unlogged { value: Value::Null }));
    }
}
