//! Board-level types: Project and Column

use super::ids::{ColumnId, ProjectId, TaskId};
use serde::{Deserialize, Serialize};

/// A project owns an ordered list of columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    /// Column order as displayed left to right
    pub column_ids: Vec<ColumnId>,
}

impl Project {
    /// Create an empty project with a fresh id
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ProjectId::new(),
            name: name.into(),
            column_ids: Vec::new(),
        }
    }
}

/// A column is a workflow stage holding an ordered list of task ids.
///
/// `task_ids` is the only record of task order: a task's place on the board is its
/// membership and index in exactly one column's list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub project_id: ProjectId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub position: usize,
    #[serde(default)]
    pub task_ids: Vec<TaskId>,
}

impl Column {
    /// Create an empty column; the store assigns `position` when it is added
    pub fn new(project_id: ProjectId, title: impl Into<String>) -> Self {
        Self {
            id: ColumnId::new(),
            project_id,
            title: title.into(),
            color: None,
            position: 0,
            task_ids: Vec::new(),
        }
    }

    /// Set the column color
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Use an explicit id instead of a generated one
    pub fn with_id(mut self, id: impl Into<ColumnId>) -> Self {
        self.id = id.into();
        self
    }

    /// Number of tasks in the column
    pub fn len(&self) -> usize {
        self.task_ids.len()
    }

    /// True when the column holds no tasks
    pub fn is_empty(&self) -> bool {
        self.task_ids.is_empty()
    }

    /// Index of a task within this column
    pub fn index_of(&self, task: &TaskId) -> Option<usize> {
        self.task_ids.iter().position(|id| id == task)
    }
}

/// In-place column edits. Never touches ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// `Some(None)` clears the color
    #[serde(
        default,
        deserialize_with = "super::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub color: Option<Option<String>>,
}

impl ColumnPatch {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn color(mut self, color: Option<String>) -> Self {
        self.color = Some(color);
        self
    }

    /// True when the patch would change nothing
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.color.is_none()
    }
}
