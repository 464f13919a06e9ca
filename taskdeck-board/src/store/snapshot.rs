//! Read-only, fully ordered view of the board for renderers and comparisons

use crate::types::{ColumnId, ProjectId, Task, TaskId};
use serde::Serialize;

/// The whole board in display order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardSnapshot {
    pub projects: Vec<ProjectView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectView {
    pub id: ProjectId,
    pub name: String,
    pub columns: Vec<ColumnView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnView {
    pub id: ColumnId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub position: usize,
    pub tasks: Vec<Task>,
}

impl BoardSnapshot {
    /// Task id order of one column, if present
    pub fn column_order(&self, column: &ColumnId) -> Option<Vec<TaskId>> {
        self.projects
            .iter()
            .flat_map(|p| p.columns.iter())
            .find(|c| &c.id == column)
            .map(|c| c.tasks.iter().map(|t| t.id.clone()).collect())
    }

    /// Same board with task timestamps blanked, for comparisons that ignore them
    pub fn without_timestamps(mut self) -> Self {
        let epoch = chrono::DateTime::<chrono::Utc>::UNIX_EPOCH;
        for task in self
            .projects
            .iter_mut()
            .flat_map(|p| p.columns.iter_mut())
            .flat_map(|c| c.tasks.iter_mut())
        {
            task.created_at = epoch;
            task.updated_at = epoch;
        }
        self
    }
}
