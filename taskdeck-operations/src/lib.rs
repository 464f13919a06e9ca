//! # Taskdeck Operations
//!
//! Operations are structs whose fields ARE the parameters. A command declares its
//! verb and noun with [`operation!`], implements [`Execute`] against some context,
//! and an [`OperationProcessor`] runs it and records what happened.
//!
//! ## Example
//!
//! ```ignore
//! use taskdeck_operations::*;
//!
//! #[derive(Debug, Deserialize, Serialize)]
//! pub struct AddTask {
//!     /// The task title
//!     pub title: String,
//! }
//!
//! operation!(AddTask, verb = "add", noun = "task", description = "Create a new task");
//!
//! impl Execute<BoardStore, BoardError> for AddTask {
//!     fn execute(&self, store: &mut BoardStore) -> ExecutionResult<Value, BoardError> {
//!         // implementation returns ExecutionResult::Logged or Unlogged
//!     }
//! }
//! ```
//!
//! Everything here is synchronous: a command runs to completion before the next
//! one starts, so there is no locking and no executor.

mod execution_result;
mod log;
mod operation;
mod processor;

pub use execution_result::ExecutionResult;
pub use log::LogEntry;
pub use operation::{Execute, Operation};
pub use processor::OperationProcessor;

// Re-export for use in implementations
pub use serde_json::Value;
