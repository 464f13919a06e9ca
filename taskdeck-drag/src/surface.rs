//! Drop surface capability: where cards and columns are on screen
//!
//! The rendering layer registers each card as a draggable and each card and column body
//! as a drop target. The drag controller only reads from a surface.

use crate::geometry::Rect;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use taskdeck_board::{ColumnId, TaskId};

/// Something a dragged card can be dropped on
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum TargetId {
    /// A column body, for dropping at the end or into an empty column
    Column(ColumnId),
    /// A task card, for dropping next to that card
    Task(TaskId),
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetId::Column(id) => write!(f, "column:{}", id),
            TargetId::Task(id) => write!(f, "task:{}", id),
        }
    }
}

/// Read access to drag geometry supplied by the rendering layer
pub trait DropSurface {
    /// Current bounds of a draggable card
    fn draggable_rect(&self, task: &TaskId) -> Option<Rect>;

    /// Every drop target with its bounds, in registration order
    fn drop_targets(&self) -> Vec<(TargetId, Rect)>;

    /// Target the host reports as under the pointer, if it tracks one
    fn hovered_target(&self) -> Option<TargetId>;
}

/// In-memory [`DropSurface`] fed by register/unregister calls
#[derive(Debug, Clone, Default)]
pub struct SurfaceRegistry {
    draggables: IndexMap<TaskId, Rect>,
    targets: IndexMap<TargetId, Rect>,
    hovered: Option<TargetId>,
}

impl SurfaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or re-measure a draggable card
    pub fn register_draggable(&mut self, task: TaskId, rect: Rect) {
        self.draggables.insert(task, rect);
    }

    /// Register or re-measure a drop target. Re-registering keeps the original order.
    pub fn register_drop_target(&mut self, target: TargetId, rect: Rect) {
        self.targets.insert(target, rect);
    }

    pub fn unregister_draggable(&mut self, task: &TaskId) -> Option<Rect> {
        self.draggables.shift_remove(task)
    }

    pub fn unregister_drop_target(&mut self, target: &TargetId) -> Option<Rect> {
        if self.hovered.as_ref() == Some(target) {
            self.hovered = None;
        }
        self.targets.shift_remove(target)
    }

    /// Record the target the host sees under the pointer
    pub fn set_hovered(&mut self, target: Option<TargetId>) {
        self.hovered = target;
    }

    pub fn clear(&mut self) {
        self.draggables.clear();
        self.targets.clear();
        self.hovered = None;
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }
}

impl DropSurface for SurfaceRegistry {
    fn draggable_rect(&self, task: &TaskId) -> Option<Rect> {
        self.draggables.get(task).copied()
    }

    fn drop_targets(&self) -> Vec<(TargetId, Rect)> {
        self.targets
            .iter()
            .map(|(target, rect)| (target.clone(), *rect))
            .collect()
    }

    fn hovered_target(&self) -> Option<TargetId> {
        self.hovered.clone()
    }
}
