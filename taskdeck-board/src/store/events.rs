//! Change notification for store observers

use crate::reconcile::Slot;
use crate::types::{ColumnId, ProjectId, TaskId};
use serde::Serialize;
use std::fmt;

/// One applied state transition. Emitted after the store is consistent again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BoardEvent {
    ProjectCreated {
        project: ProjectId,
    },
    ProjectDeleted {
        project: ProjectId,
        removed_columns: Vec<ColumnId>,
        removed_tasks: Vec<TaskId>,
    },
    ColumnCreated {
        project: ProjectId,
        column: ColumnId,
    },
    ColumnUpdated {
        column: ColumnId,
    },
    ColumnDeleted {
        project: ProjectId,
        column: ColumnId,
        removed_tasks: Vec<TaskId>,
    },
    TaskCreated {
        task: TaskId,
        column: ColumnId,
    },
    TaskUpdated {
        task: TaskId,
    },
    TaskDeleted {
        task: TaskId,
        column: ColumnId,
    },
    TaskMoved {
        task: TaskId,
        from: Slot,
        to: Slot,
    },
}

/// Handle returned by [`BoardStore::subscribe`](super::BoardStore::subscribe)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&BoardEvent)>;

/// Registered observers, notified in subscription order
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    entries: Vec<(SubscriptionId, Listener)>,
}

impl Listeners {
    pub(crate) fn add(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn notify(&mut self, event: &BoardEvent) {
        for (_, listener) in &mut self.entries {
            listener(event);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}
