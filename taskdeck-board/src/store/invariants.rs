//! Structural checks over the whole store.
//!
//! A violation here is always a bug in the store itself; nothing at runtime
//! recovers from one. Tests call [`BoardStore::check_invariants`] after every
//! mutation sequence.

use super::BoardStore;
use crate::types::{ColumnId, ProjectId, TaskId};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("task {task} is not listed in any column")]
    UnplacedTask { task: TaskId },

    #[error("task {task} is listed {count} times across columns")]
    DuplicatePlacement { task: TaskId, count: usize },

    #[error("column {column} lists unknown task {task}")]
    DanglingTask { column: ColumnId, task: TaskId },

    #[error("task {task} records column {recorded} but is listed in {actual}")]
    WrongBackReference {
        task: TaskId,
        recorded: ColumnId,
        actual: ColumnId,
    },

    #[error("column {column} belongs to unknown project {project}")]
    UnknownProject { column: ColumnId, project: ProjectId },

    #[error("column {column} is not listed exactly once by project {project}")]
    ColumnMembership { column: ColumnId, project: ProjectId },

    #[error("project {project} lists unknown column {column}")]
    DanglingColumn { project: ProjectId, column: ColumnId },

    #[error("column {column} has position {actual}, expected {expected}")]
    Position {
        column: ColumnId,
        expected: usize,
        actual: usize,
    },
}

impl BoardStore {
    /// Verify the task partition, back-references and column bookkeeping
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        for project in self.projects.values() {
            for (expected, column_id) in project.column_ids.iter().enumerate() {
                let column = self.columns.get(column_id).ok_or_else(|| {
                    InvariantViolation::DanglingColumn {
                        project: project.id.clone(),
                        column: column_id.clone(),
                    }
                })?;
                if column.position != expected {
                    return Err(InvariantViolation::Position {
                        column: column.id.clone(),
                        expected,
                        actual: column.position,
                    });
                }
            }
        }

        for column in self.columns.values() {
            let project = self.projects.get(&column.project_id).ok_or_else(|| {
                InvariantViolation::UnknownProject {
                    column: column.id.clone(),
                    project: column.project_id.clone(),
                }
            })?;
            let listed = project
                .column_ids
                .iter()
                .filter(|id| **id == column.id)
                .count();
            if listed != 1 {
                return Err(InvariantViolation::ColumnMembership {
                    column: column.id.clone(),
                    project: project.id.clone(),
                });
            }
        }

        let mut placements: HashMap<&TaskId, usize> = HashMap::new();
        for column in self.columns.values() {
            for task_id in &column.task_ids {
                let task =
                    self.tasks
                        .get(task_id)
                        .ok_or_else(|| InvariantViolation::DanglingTask {
                            column: column.id.clone(),
                            task: task_id.clone(),
                        })?;
                if task.column_id != column.id {
                    return Err(InvariantViolation::WrongBackReference {
                        task: task_id.clone(),
                        recorded: task.column_id.clone(),
                        actual: column.id.clone(),
                    });
                }
                *placements.entry(task_id).or_default() += 1;
            }
        }

        for task_id in self.tasks.keys() {
            match placements.get(task_id).copied().unwrap_or(0) {
                1 => {}
                0 => {
                    return Err(InvariantViolation::UnplacedTask {
                        task: task_id.clone(),
                    })
                }
                count => {
                    return Err(InvariantViolation::DuplicatePlacement {
                        task: task_id.clone(),
                        count,
                    })
                }
            }
        }

        Ok(())
    }
}
