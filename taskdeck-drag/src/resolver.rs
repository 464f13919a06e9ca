//! Turn a hovered drop target into a board destination

use crate::surface::TargetId;
use serde::{Deserialize, Serialize};
use taskdeck_board::{BoardStore, ColumnId, MoveRequest, TaskId};
use tracing::debug;

/// Where a card lands relative to the card it is dropped on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropPlacement {
    /// Take the hovered card's current index
    #[default]
    Before,
    /// Land directly after the hovered card
    After,
}

/// Placement used unless configured otherwise
pub const DEFAULT_DROP_PLACEMENT: DropPlacement = DropPlacement::Before;

/// A resolved drop: column plus insertion index for `move_task`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub column: ColumnId,
    pub index: usize,
}

impl Destination {
    pub fn new(column: ColumnId, index: usize) -> Self {
        Self { column, index }
    }

    /// Move request for `task` to this destination
    pub fn request(&self, task: &TaskId) -> MoveRequest {
        MoveRequest::new(task.clone(), self.column.clone(), self.index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TargetResolver {
    placement: DropPlacement,
}

impl TargetResolver {
    pub fn new(placement: DropPlacement) -> Self {
        Self { placement }
    }

    pub fn placement(&self) -> DropPlacement {
        self.placement
    }

    /// Resolve a target against the current board.
    ///
    /// A column resolves to its end. A card resolves to its column and, depending on
    /// placement, its own index or the one after. `active` is the card being dragged:
    /// `move_task` reads the index after that card leaves its column, so `After` on a
    /// card further down the same column keeps the hovered card's index. Targets that
    /// no longer exist on the board resolve to `None`.
    pub fn resolve(
        &self,
        target: &TargetId,
        active: Option<&TaskId>,
        store: &BoardStore,
    ) -> Option<Destination> {
        let destination = match target {
            TargetId::Column(column) => {
                let len = store.column(column)?.len();
                Destination::new(column.clone(), len)
            }
            TargetId::Task(task) => {
                let slot = store.find_task_slot(task)?;
                let index = match self.placement {
                    DropPlacement::Before => slot.index,
                    DropPlacement::After => {
                        let above_in_same_column = active
                            .and_then(|task| store.find_task_slot(task))
                            .is_some_and(|source| {
                                source.column == slot.column && source.index < slot.index
                            });
                        if above_in_same_column {
                            slot.index
                        } else {
                            slot.index + 1
                        }
                    }
                };
                Destination::new(slot.column, index)
            }
        };
        debug!(target = %target, column = %destination.column, index = destination.index, "resolved drop target");
        Some(destination)
    }
}
