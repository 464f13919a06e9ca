//! In-memory kanban board engine
//!
//! This crate holds the authoritative board state (projects, columns and tasks) and
//! the logic that keeps every column's ordered task list consistent while tasks are
//! created, edited, deleted and moved.
//!
//! ## Overview
//!
//! - **Order lives in columns** - a column's `task_ids` is the only record of task order
//! - **One home per task** - every task id sits in exactly one column at all times
//! - **Stale ids are harmless** - unknown ids turn any operation into a no-op
//! - **One event per change** - observers are notified after each transition completes
//!
//! ## Basic Usage
//!
//! ```rust
//! use taskdeck_board::{BoardStore, NewTask};
//!
//! let mut store = BoardStore::with_default_project("Website");
//! let project = store.projects().next().unwrap().id.clone();
//! let columns: Vec<_> = store.project_columns(&project).iter().map(|c| c.id.clone()).collect();
//!
//! let task = store.create_task(&columns[0], NewTask::new("Draft landing copy")).unwrap();
//! store.move_task(&task.id, &columns[1], 0);
//!
//! assert_eq!(store.column_tasks(&columns[1])[0].title, "Draft landing copy");
//! ```
//!
//! ## Commands
//!
//! Every mutation is also available as a command struct (`task::MoveTask`,
//! `column::AddColumn`, ...) that runs through an [`OperationProcessor`] and lands in the
//! store's activity log. [`parse::parse_input`] turns loose JSON into those commands.

mod command;
mod error;
mod processor;
pub mod parse;
pub mod reconcile;
pub mod seed;
pub mod store;
pub mod types;

// Command modules
pub mod column;
pub mod project;
pub mod task;

pub use taskdeck_operations::{Execute, ExecutionResult, LogEntry, Operation, OperationProcessor};

pub use error::{BoardError, Result};
pub use processor::BoardOperationProcessor;
pub use reconcile::{plan_move, MoveOutcome, MovePlan, MovePreview, MoveRequest, MoveSkip, Slot};
pub use seed::BoardSeed;
pub use store::{BoardEvent, BoardSnapshot, BoardStore, InvariantViolation, SubscriptionId};

pub use types::{
    Attachment, Column, ColumnId, ColumnPatch, Comment, NewTask, Priority, Project, ProjectId,
    Subtask, Tag, Task, TaskId, TaskPatch, UserId,
};
