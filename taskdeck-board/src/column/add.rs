//! AddColumn command

use crate::command::{failed, logged, to_value, unchanged, unlogged, CommandResult};
use crate::error::BoardError;
use crate::store::BoardStore;
use crate::types::ProjectId;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use taskdeck_operations::{operation, Execute};

/// Append a column to the end of a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddColumn {
    pub project: ProjectId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

operation!(AddColumn, verb = "add", noun = "column", description = "Add a column at the end of a project");

impl AddColumn {
    pub fn new(project: impl Into<ProjectId>, title: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            title: title.into(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

impl Execute<BoardStore, BoardError> for AddColumn {
    fn execute(&self, ctx: &mut BoardStore) -> CommandResult {
        let started = Instant::now();
        if self.title.trim().is_empty() {
            return failed(self, started, BoardError::missing_field("title"));
        }

        match ctx.create_column(&self.project, self.title.clone(), self.color.clone()) {
            Some(column) => logged(self, started, to_value(&column)),
            None => unlogged(unchanged()),
        }
    }
}
