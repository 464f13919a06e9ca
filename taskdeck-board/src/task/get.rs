//! GetTask command

use crate::command::{to_value, unlogged, CommandResult};
use crate::error::BoardError;
use crate::store::BoardStore;
use crate::types::TaskId;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use taskdeck_operations::{operation, Execute};

/// Fetch one task with its current slot. Unknown ids yield `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetTask {
    pub id: TaskId,
}

operation!(GetTask, verb = "get", noun = "task", description = "Get a task by id");

impl GetTask {
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self { id: id.into() }
    }
}

impl Execute<BoardStore, BoardError> for GetTask {
    fn execute(&self, ctx: &mut BoardStore) -> CommandResult {
        let (Some(task), Some(slot)) = (ctx.task(&self.id), ctx.find_task_slot(&self.id)) else {
            return unlogged(Value::Null);
        };

        let mut value = to_value(task);
        if let Some(obj) = value.as_object_mut() {
            obj.insert("index".into(), json!(slot.index));
            obj.insert("progress".into(), json!(task.progress()));
        }
        unlogged(value)
    }
}
