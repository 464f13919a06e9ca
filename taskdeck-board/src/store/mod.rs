//! BoardStore - the authoritative in-memory board
//!
//! The store exclusively owns projects, columns and tasks. Every mutation is a named,
//! synchronous transition that runs to completion, then notifies observers once. Reads
//! never fail: an unknown id yields `None` or an empty list, and a mutation naming an
//! unknown id does nothing.

mod events;
mod invariants;
mod snapshot;

pub use events::{BoardEvent, SubscriptionId};
pub use invariants::InvariantViolation;
pub use snapshot::{BoardSnapshot, ColumnView, ProjectView};

use crate::error::{BoardError, Result};
use crate::reconcile::{self, MoveOutcome, MoveRequest, Slot};
use crate::types::{
    Column, ColumnId, ColumnPatch, NewTask, Project, ProjectId, Task, TaskId, TaskPatch,
};
use chrono::Utc;
use events::Listeners;
use indexmap::IndexMap;
use std::collections::{HashMap, VecDeque};
use taskdeck_operations::LogEntry;
use tracing::debug;

/// Most recent activity entries kept in memory
pub const ACTIVITY_LIMIT: usize = 500;

/// Titles of the columns a default project starts with
pub const DEFAULT_COLUMNS: [&str; 3] = ["To Do", "In Progress", "Done"];

/// The board state container
#[derive(Debug, Default)]
pub struct BoardStore {
    pub(crate) projects: IndexMap<ProjectId, Project>,
    pub(crate) columns: HashMap<ColumnId, Column>,
    pub(crate) tasks: HashMap<TaskId, Task>,
    listeners: Listeners,
    activity: VecDeque<LogEntry>,
}

impl BoardStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding one project with the default columns
    pub fn with_default_project(name: impl Into<String>) -> Self {
        let mut store = Self::new();
        let project = store.create_project(name);
        for title in DEFAULT_COLUMNS {
            store.create_column(&project.id, title, None);
        }
        store
    }

    // =========================================================================
    // Observers
    // =========================================================================

    /// Register an observer; it sees every applied transition
    pub fn subscribe(&mut self, listener: impl FnMut(&BoardEvent) + 'static) -> SubscriptionId {
        self.listeners.add(Box::new(listener))
    }

    /// Remove an observer. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(id)
    }

    /// Number of registered observers
    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    fn emit(&mut self, event: BoardEvent) {
        self.listeners.notify(&event);
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn project(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.get(id)
    }

    /// Projects in creation order
    pub fn projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.values()
    }

    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.get(id)
    }

    /// Columns of a project, left to right. Empty if the project is unknown.
    pub fn project_columns(&self, project: &ProjectId) -> Vec<&Column> {
        self.projects
            .get(project)
            .map(|p| {
                p.column_ids
                    .iter()
                    .filter_map(|id| self.columns.get(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Tasks of a column in display order. Empty if the column is unknown.
    pub fn column_tasks(&self, column: &ColumnId) -> Vec<&Task> {
        self.columns
            .get(column)
            .map(|c| {
                c.task_ids
                    .iter()
                    .filter_map(|id| self.tasks.get(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// Column and index currently holding a task
    pub fn find_task_slot(&self, id: &TaskId) -> Option<Slot> {
        let task = self.tasks.get(id)?;
        let column = self.columns.get(&task.column_id)?;
        let index = column.index_of(id)?;
        Some(Slot::new(column.id.clone(), index))
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Fully ordered copy of the board
    pub fn snapshot(&self) -> BoardSnapshot {
        let projects = self
            .projects
            .values()
            .map(|project| ProjectView {
                id: project.id.clone(),
                name: project.name.clone(),
                columns: self
                    .project_columns(&project.id)
                    .into_iter()
                    .map(|column| ColumnView {
                        id: column.id.clone(),
                        title: column.title.clone(),
                        color: column.color.clone(),
                        position: column.position,
                        tasks: self.column_tasks(&column.id).into_iter().cloned().collect(),
                    })
                    .collect(),
            })
            .collect();
        BoardSnapshot { projects }
    }

    // =========================================================================
    // Activity
    // =========================================================================

    /// Record an operation; the oldest entries fall off past [`ACTIVITY_LIMIT`]
    pub fn record_activity(&mut self, entry: LogEntry) {
        self.activity.push_front(entry);
        self.activity.truncate(ACTIVITY_LIMIT);
    }

    /// Activity entries, newest first
    pub fn activity(&self) -> impl Iterator<Item = &LogEntry> {
        self.activity.iter()
    }

    // =========================================================================
    // Projects
    // =========================================================================

    /// Create an empty project
    pub fn create_project(&mut self, name: impl Into<String>) -> Project {
        self.attach_project(Project::new(name))
    }

    /// Add a project with a caller-chosen id (seeding). Listed columns are dropped;
    /// columns are added through [`insert_column`](Self::insert_column).
    pub(crate) fn insert_project(&mut self, mut project: Project) -> Result<Project> {
        if self.projects.contains_key(&project.id) {
            return Err(BoardError::duplicate_id("project", project.id.to_string()));
        }
        project.column_ids.clear();
        Ok(self.attach_project(project))
    }

    fn attach_project(&mut self, project: Project) -> Project {
        debug!(project = %project.id, name = %project.name, "created project");
        self.projects.insert(project.id.clone(), project.clone());
        self.emit(BoardEvent::ProjectCreated {
            project: project.id.clone(),
        });
        project
    }

    /// Delete a project with all of its columns and their tasks
    pub fn delete_project(&mut self, id: &ProjectId) -> bool {
        let Some(project) = self.projects.shift_remove(id) else {
            debug!(project = %id, "ignoring delete of unknown project");
            return false;
        };

        let mut removed_tasks = Vec::new();
        for column_id in &project.column_ids {
            if let Some(column) = self.columns.remove(column_id) {
                for task_id in &column.task_ids {
                    self.tasks.remove(task_id);
                }
                removed_tasks.extend(column.task_ids);
            }
        }

        debug!(
            project = %id,
            columns = project.column_ids.len(),
            tasks = removed_tasks.len(),
            "deleted project"
        );
        self.emit(BoardEvent::ProjectDeleted {
            project: project.id,
            removed_columns: project.column_ids,
            removed_tasks,
        });
        true
    }

    // =========================================================================
    // Columns
    // =========================================================================

    /// Append a column to the end of a project
    pub fn create_column(
        &mut self,
        project: &ProjectId,
        title: impl Into<String>,
        color: Option<String>,
    ) -> Option<Column> {
        if !self.projects.contains_key(project) {
            debug!(project = %project, "ignoring column for unknown project");
            return None;
        }
        let mut column = Column::new(project.clone(), title);
        column.color = color;
        self.attach_column(column)
    }

    /// Add a fully built column. Its position is taken from the project's column count.
    pub(crate) fn insert_column(&mut self, column: Column) -> Result<Column> {
        if self.columns.contains_key(&column.id) {
            return Err(BoardError::duplicate_id("column", column.id.to_string()));
        }
        if !self.projects.contains_key(&column.project_id) {
            return Err(BoardError::invalid_value(
                "project_id",
                format!("unknown project {}", column.project_id),
            ));
        }
        self.attach_column(column)
            .ok_or_else(|| BoardError::invalid_value("column", "could not attach column"))
    }

    fn attach_column(&mut self, mut column: Column) -> Option<Column> {
        let project = self.projects.get_mut(&column.project_id)?;
        column.position = project.column_ids.len();
        column.task_ids.clear();
        project.column_ids.push(column.id.clone());

        debug!(column = %column.id, project = %column.project_id, position = column.position, "created column");
        self.columns.insert(column.id.clone(), column.clone());
        self.emit(BoardEvent::ColumnCreated {
            project: column.project_id.clone(),
            column: column.id.clone(),
        });
        Some(column)
    }

    /// Edit a column's title or color in place
    pub fn update_column(&mut self, id: &ColumnId, patch: ColumnPatch) -> Option<Column> {
        let Some(column) = self.columns.get_mut(id) else {
            debug!(column = %id, "ignoring update of unknown column");
            return None;
        };

        let before = column.clone();
        if let Some(title) = patch.title {
            column.title = title;
        }
        if let Some(color) = patch.color {
            column.color = color;
        }
        let updated = column.clone();

        if updated != before {
            debug!(column = %id, "updated column");
            self.emit(BoardEvent::ColumnUpdated { column: id.clone() });
        }
        Some(updated)
    }

    /// Delete a column and every task it holds
    pub fn delete_column(&mut self, id: &ColumnId) -> bool {
        let Some(column) = self.columns.remove(id) else {
            debug!(column = %id, "ignoring delete of unknown column");
            return false;
        };

        for task_id in &column.task_ids {
            self.tasks.remove(task_id);
        }

        if let Some(project) = self.projects.get_mut(&column.project_id) {
            project.column_ids.retain(|c| c != id);
            for (position, column_id) in project.column_ids.iter().enumerate() {
                if let Some(remaining) = self.columns.get_mut(column_id) {
                    remaining.position = position;
                }
            }
        }

        debug!(column = %id, tasks = column.task_ids.len(), "deleted column");
        self.emit(BoardEvent::ColumnDeleted {
            project: column.project_id,
            column: column.id,
            removed_tasks: column.task_ids,
        });
        true
    }

    // =========================================================================
    // Tasks
    // =========================================================================

    /// Create a task at the end of a column
    pub fn create_task(&mut self, column: &ColumnId, new: NewTask) -> Option<Task> {
        self.append_task(column, TaskId::new(), new)
    }

    /// Create a task with a caller-chosen id (seeding)
    pub(crate) fn insert_task(&mut self, column: &ColumnId, id: TaskId, new: NewTask) -> Result<Task> {
        if self.tasks.contains_key(&id) {
            return Err(BoardError::duplicate_id("task", id.to_string()));
        }
        self.append_task(column, id, new).ok_or_else(|| {
            BoardError::invalid_value("column", format!("unknown column {}", column))
        })
    }

    fn append_task(&mut self, column_id: &ColumnId, id: TaskId, new: NewTask) -> Option<Task> {
        let Some(column) = self.columns.get_mut(column_id) else {
            debug!(column = %column_id, "ignoring task for unknown column");
            return None;
        };

        let task = Task::from_new(id, column_id.clone(), new, Utc::now());
        column.task_ids.push(task.id.clone());
        self.tasks.insert(task.id.clone(), task.clone());

        debug!(task = %task.id, column = %column_id, "created task");
        self.emit(BoardEvent::TaskCreated {
            task: task.id.clone(),
            column: column_id.clone(),
        });
        Some(task)
    }

    /// Edit task fields. Column and order are untouched.
    pub fn update_task(&mut self, id: &TaskId, patch: TaskPatch) -> Option<Task> {
        let Some(task) = self.tasks.get_mut(id) else {
            debug!(task = %id, "ignoring update of unknown task");
            return None;
        };

        if task.apply_patch(patch) {
            task.updated_at = Utc::now();
            let updated = task.clone();
            debug!(task = %id, "updated task");
            self.emit(BoardEvent::TaskUpdated { task: id.clone() });
            Some(updated)
        } else {
            Some(task.clone())
        }
    }

    /// Remove a task from its column and from the board
    pub fn delete_task(&mut self, id: &TaskId) -> bool {
        let Some(task) = self.tasks.remove(id) else {
            debug!(task = %id, "ignoring delete of unknown task");
            return false;
        };

        if let Some(column) = self.columns.get_mut(&task.column_id) {
            column.task_ids.retain(|t| t != id);
        }

        debug!(task = %id, column = %task.column_id, "deleted task");
        self.emit(BoardEvent::TaskDeleted {
            task: task.id,
            column: task.column_id,
        });
        true
    }

    /// Move a task to `index` of `column`, where `index` counts positions in the
    /// destination list after the task has been taken out of its current one.
    ///
    /// Out-of-range indexes are clamped; unknown ids and same-slot moves change
    /// nothing. Observers see a single `TaskMoved` event after both lists are final.
    pub fn move_task(&mut self, task: &TaskId, column: &ColumnId, index: usize) -> MoveOutcome {
        self.apply_move(&MoveRequest::new(task.clone(), column.clone(), index))
    }

    /// [`move_task`](Self::move_task) taking a prepared request
    pub fn apply_move(&mut self, request: &MoveRequest) -> MoveOutcome {
        match reconcile::plan_move(self, request) {
            Ok(plan) => {
                plan.apply(&mut self.columns, &mut self.tasks, Utc::now());
                debug!(
                    task = %plan.task,
                    from = %plan.from,
                    to = %plan.to,
                    "moved task"
                );
                self.emit(BoardEvent::TaskMoved {
                    task: plan.task.clone(),
                    from: plan.from.clone(),
                    to: plan.to.clone(),
                });
                MoveOutcome::Moved {
                    from: plan.from,
                    to: plan.to,
                }
            }
            Err(skip) => {
                debug!(task = %request.task, column = %request.column, reason = %skip, "move skipped");
                MoveOutcome::Unchanged(skip)
            }
        }
    }
}
