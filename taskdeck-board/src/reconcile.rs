//! Position reconciliation for task moves
//!
//! A move is computed in two steps. [`plan_move`] reads the store and resolves the
//! source slot and the clamped destination slot; [`MovePlan::apply`] then rewrites the
//! affected column lists and the task's back-reference in one pass. Splitting the two
//! lets hover feedback use [`MovePlan::preview`] without touching the store.
//!
//! Destination indexes are interpreted against the destination list *after* the task
//! has been removed from its source. For a same-column move that list is one shorter.

use crate::store::BoardStore;
use crate::types::{Column, ColumnId, Task, TaskId};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use tracing::trace;

/// A place on the board: a column and a zero-based index into its task list
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub column: ColumnId,
    pub index: usize,
}

impl Slot {
    pub fn new(column: ColumnId, index: usize) -> Self {
        Self { column, index }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.column, self.index)
    }
}

/// Request to move a task to `index` of `column`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub task: TaskId,
    pub column: ColumnId,
    pub index: usize,
}

impl MoveRequest {
    pub fn new(task: impl Into<TaskId>, column: impl Into<ColumnId>, index: usize) -> Self {
        Self {
            task: task.into(),
            column: column.into(),
            index,
        }
    }
}

/// Why a move left the board untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Error)]
#[serde(rename_all = "snake_case")]
pub enum MoveSkip {
    #[error("unknown task")]
    UnknownTask,
    #[error("unknown destination column")]
    UnknownColumn,
    #[error("task is already at the destination")]
    SamePosition,
}

/// Result of [`BoardStore::move_task`]. Moves never fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", content = "detail", rename_all = "snake_case")]
pub enum MoveOutcome {
    Moved { from: Slot, to: Slot },
    Unchanged(MoveSkip),
}

impl MoveOutcome {
    /// True if the board changed
    pub fn is_moved(&self) -> bool {
        matches!(self, MoveOutcome::Moved { .. })
    }
}

/// A resolved move, ready to apply or preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePlan {
    pub task: TaskId,
    pub from: Slot,
    /// Destination with the index already clamped
    pub to: Slot,
}

/// Column orderings as they would look after a move
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MovePreview {
    pub columns: IndexMap<ColumnId, Vec<TaskId>>,
}

impl MovePreview {
    /// Previewed order of one column, if the move affects it
    pub fn order(&self, column: &ColumnId) -> Option<&[TaskId]> {
        self.columns.get(column).map(Vec::as_slice)
    }
}

/// Resolve a move request against the current board.
///
/// Unknown task or column and moves that would land the task where it already is are
/// reported as [`MoveSkip`] so callers can treat them as no-ops.
pub fn plan_move(store: &BoardStore, request: &MoveRequest) -> Result<MovePlan, MoveSkip> {
    if store.task(&request.task).is_none() {
        return Err(MoveSkip::UnknownTask);
    }
    let destination = store.column(&request.column).ok_or(MoveSkip::UnknownColumn)?;
    let from = store
        .find_task_slot(&request.task)
        .ok_or(MoveSkip::UnknownTask)?;

    let same_column = from.column == destination.id;
    let available = if same_column {
        destination.len().saturating_sub(1)
    } else {
        destination.len()
    };
    let index = request.index.min(available);

    trace!(
        task = %request.task,
        from = %from,
        requested = request.index,
        clamped = index,
        "planned move"
    );

    if same_column && index == from.index {
        return Err(MoveSkip::SamePosition);
    }

    Ok(MovePlan {
        task: request.task.clone(),
        from,
        to: Slot::new(destination.id.clone(), index),
    })
}

impl MovePlan {
    /// Orderings of the source and destination columns after this move, leaving the
    /// store untouched
    pub fn preview(&self, store: &BoardStore) -> MovePreview {
        let mut columns = IndexMap::new();
        let Some(source) = store.column(&self.from.column) else {
            return MovePreview { columns };
        };

        let mut source_ids = source.task_ids.clone();
        take(&mut source_ids, &self.task, self.from.index);

        if self.from.column == self.to.column {
            put(&mut source_ids, &self.task, self.to.index);
            columns.insert(self.from.column.clone(), source_ids);
        } else {
            columns.insert(self.from.column.clone(), source_ids);
            if let Some(destination) = store.column(&self.to.column) {
                let mut dest_ids = destination.task_ids.clone();
                put(&mut dest_ids, &self.task, self.to.index);
                columns.insert(self.to.column.clone(), dest_ids);
            }
        }
        MovePreview { columns }
    }

    /// Rewrite the column lists and the task's column in one step
    pub(crate) fn apply(
        &self,
        columns: &mut HashMap<ColumnId, Column>,
        tasks: &mut HashMap<TaskId, Task>,
        now: DateTime<Utc>,
    ) {
        if let Some(source) = columns.get_mut(&self.from.column) {
            take(&mut source.task_ids, &self.task, self.from.index);
        }
        if let Some(destination) = columns.get_mut(&self.to.column) {
            put(&mut destination.task_ids, &self.task, self.to.index);
        }
        if let Some(task) = tasks.get_mut(&self.task) {
            task.column_id = self.to.column.clone();
            task.updated_at = now;
        }
    }
}

/// Remove `task` from `ids`, expected at `index`
fn take(ids: &mut Vec<TaskId>, task: &TaskId, index: usize) {
    if ids.get(index) == Some(task) {
        ids.remove(index);
    } else {
        ids.retain(|id| id != task);
    }
}

/// Insert `task` at `index`, appending when past the end
fn put(ids: &mut Vec<TaskId>, task: &TaskId, index: usize) {
    let index = index.min(ids.len());
    ids.insert(index, task.clone());
}
