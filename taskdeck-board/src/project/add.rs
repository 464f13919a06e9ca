//! AddProject command

use crate::command::{failed, logged, to_value, CommandResult};
use crate::error::BoardError;
use crate::store::{BoardStore, DEFAULT_COLUMNS};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use taskdeck_operations::{operation, Execute};

/// Create a project, optionally with the standard columns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddProject {
    pub name: String,
    /// Start with "To Do / In Progress / Done"
    #[serde(default)]
    pub default_columns: bool,
}

operation!(AddProject, verb = "add", noun = "project", description = "Create a new project");

impl AddProject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default_columns: false,
        }
    }

    pub fn with_default_columns(mut self) -> Self {
        self.default_columns = true;
        self
    }
}

impl Execute<BoardStore, BoardError> for AddProject {
    fn execute(&self, ctx: &mut BoardStore) -> CommandResult {
        let started = Instant::now();
        if self.name.trim().is_empty() {
            return failed(self, started, BoardError::missing_field("name"));
        }

        let project = ctx.create_project(self.name.clone());
        if self.default_columns {
            for title in DEFAULT_COLUMNS {
                ctx.create_column(&project.id, title, None);
            }
        }
        let project = ctx.project(&project.id).cloned().unwrap_or(project);
        logged(self, started, to_value(&project))
    }
}
