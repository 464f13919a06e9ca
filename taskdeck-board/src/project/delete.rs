//! DeleteProject command

use crate::command::{logged, unchanged, unlogged, CommandResult};
use crate::error::BoardError;
use crate::store::BoardStore;
use crate::types::ProjectId;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Instant;
use taskdeck_operations::{operation, Execute};

/// Delete a project together with its columns and tasks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteProject {
    pub id: ProjectId,
}

operation!(DeleteProject, verb = "delete", noun = "project", description = "Delete a project and everything in it");

impl DeleteProject {
    pub fn new(id: impl Into<ProjectId>) -> Self {
        Self { id: id.into() }
    }
}

impl Execute<BoardStore, BoardError> for DeleteProject {
    fn execute(&self, ctx: &mut BoardStore) -> CommandResult {
        let started = Instant::now();
        if !ctx.delete_project(&self.id) {
            return unlogged(unchanged());
        }
        logged(self, started, json!({ "deleted": true, "id": self.id }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskdeck_operations::ExecutionResult;

    #[test]
    fn test_delete_unknown_project_is_unlogged() {
        let mut store = BoardStore::new();
        let result = DeleteProject::new("ghost").execute(&mut store);
        assert!(matches!(result, ExecutionResult::Unlogged { .. }));
    }

    #[test]
    fn test_delete_project() {
        let mut store = BoardStore::with_default_project("P");
        let id = store.projects().next().unwrap().id.clone();
        let value = DeleteProject::new(id).execute(&mut store).into_result().unwrap();
        assert_eq!(value["deleted"], true);
        assert_eq!(store.column_count(), 0);
    }
}
