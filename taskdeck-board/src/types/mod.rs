//! Core types for the board engine

mod board;
mod ids;
mod task;

// Re-export all types
pub use board::{Column, ColumnPatch, Project};
pub use ids::{AttachmentId, ColumnId, CommentId, ProjectId, SubtaskId, TaskId, UserId};
pub use task::{Attachment, Comment, NewTask, Priority, Subtask, Tag, Task, TaskPatch};

use serde::{Deserialize, Deserializer};

/// Distinguish "field absent" from "field explicitly null" in patch structs.
///
/// Absent deserializes to `None` (via `#[serde(default)]`), `null` to `Some(None)`.
pub(crate) fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
