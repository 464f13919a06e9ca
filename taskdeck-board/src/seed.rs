//! Declarative board contents loaded from YAML or JSON
//!
//! ```yaml
//! projects:
//!   - name: Website
//!     columns:
//!       - title: To Do
//!         color: "#3b82f6"
//!         tasks:
//!           - title: Draft landing copy
//!             priority: high
//!       - title: Done
//! ```
//!
//! Entries are loaded in declaration order, so column positions and task order follow
//! the file. Ids are optional; missing ones are generated.

use crate::error::{BoardError, Result};
use crate::store::BoardStore;
use crate::types::{Attachment, Column, ColumnId, Comment, NewTask, Project, ProjectId, TaskId};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardSeed {
    #[serde(default)]
    pub projects: Vec<ProjectSeed>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSeed {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProjectId>,
    pub name: String,
    #[serde(default)]
    pub columns: Vec<ColumnSeed>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSeed {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ColumnId>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub tasks: Vec<TaskSeed>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSeed {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TaskId>,
    #[serde(flatten)]
    pub fields: NewTask,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

impl BoardSeed {
    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(text)?)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read a seed file, choosing the format from its extension (YAML unless `.json`)
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&text),
            _ => Self::from_yaml(&text),
        }
    }

    /// Build a fresh store from this seed
    pub fn build(&self) -> Result<BoardStore> {
        let mut store = BoardStore::new();
        self.load_into(&mut store)?;
        Ok(store)
    }

    /// Add every project, column and task to `store`.
    ///
    /// Fails on duplicate ids or blank titles. Entries loaded before the failure stay
    /// in the store.
    pub fn load_into(&self, store: &mut BoardStore) -> Result<()> {
        for project_seed in &self.projects {
            let mut project = Project::new(project_seed.name.clone());
            if let Some(id) = &project_seed.id {
                project.id = id.clone();
            }
            let project = store.insert_project(project)?;

            for column_seed in &project_seed.columns {
                if column_seed.title.trim().is_empty() {
                    return Err(BoardError::missing_field("title"));
                }
                let mut column = Column::new(project.id.clone(), column_seed.title.clone());
                column.color = column_seed.color.clone();
                if let Some(id) = &column_seed.id {
                    column.id = id.clone();
                }
                let column = store.insert_column(column)?;

                for task_seed in &column_seed.tasks {
                    if task_seed.fields.title.trim().is_empty() {
                        return Err(BoardError::missing_field("title"));
                    }
                    let id = task_seed.id.clone().unwrap_or_default();
                    let task = store.insert_task(&column.id, id, task_seed.fields.clone())?;
                    if let Some(stored) = store.tasks.get_mut(&task.id) {
                        stored.comments = task_seed.comments.clone();
                        stored.attachments = task_seed.attachments.clone();
                    }
                }
            }
        }
        debug!(
            projects = self.projects.len(),
            tasks = store.task_count(),
            "loaded board seed"
        );
        Ok(())
    }
}
