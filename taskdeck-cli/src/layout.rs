//! Grid layout of a board, standing in for the geometry a UI would report
//!
//! Columns of every project sit left to right in display order. Cards stack
//! top to bottom under a column header. Below a column's last card sits its free
//! slot: the drop target for the column itself, so pointing there appends.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use taskdeck_board::{BoardStore, ColumnId, TaskId};
use taskdeck_drag::{Point, Rect, SurfaceRegistry, TargetId};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub column_width: f64,
    pub column_gap: f64,
    pub header_height: f64,
    pub card_height: f64,
    pub card_gap: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            column_width: 200.0,
            column_gap: 20.0,
            header_height: 40.0,
            card_height: 50.0,
            card_gap: 8.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutConfigError {
    #[error("{field} must be a finite, positive number (got {value})")]
    Size { field: &'static str, value: f64 },
    #[error("{field} must be a finite, non-negative number (got {value})")]
    Spacing { field: &'static str, value: f64 },
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<(), LayoutConfigError> {
        let sizes = [
            ("column_width", self.column_width),
            ("card_height", self.card_height),
        ];
        for (field, value) in sizes {
            if !value.is_finite() || value <= 0.0 {
                return Err(LayoutConfigError::Size { field, value });
            }
        }
        let spacing = [
            ("column_gap", self.column_gap),
            ("header_height", self.header_height),
            ("card_gap", self.card_gap),
        ];
        for (field, value) in spacing {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutConfigError::Spacing { field, value });
            }
        }
        Ok(())
    }

    fn column_x(&self, column_index: usize) -> f64 {
        column_index as f64 * (self.column_width + self.column_gap)
    }

    fn row_y(&self, row: usize) -> f64 {
        self.header_height + row as f64 * (self.card_height + self.card_gap)
    }
}

/// Positions of every card and column slot, plus the surface built from them
#[derive(Debug, Clone, Default)]
pub struct BoardLayout {
    surface: SurfaceRegistry,
    cards: HashMap<TaskId, Rect>,
    slots: HashMap<ColumnId, Rect>,
}

impl BoardLayout {
    pub fn build(store: &BoardStore, config: &LayoutConfig) -> Self {
        let mut layout = Self::default();
        let columns = store
            .projects()
            .flat_map(|project| store.project_columns(&project.id));

        for (column_index, column) in columns.enumerate() {
            let x = config.column_x(column_index);
            for (row, task) in column.task_ids.iter().enumerate() {
                let rect = Rect::new(x, config.row_y(row), config.column_width, config.card_height);
                layout.surface.register_draggable(task.clone(), rect);
                layout
                    .surface
                    .register_drop_target(TargetId::Task(task.clone()), rect);
                layout.cards.insert(task.clone(), rect);
            }
            let slot = Rect::new(
                x,
                config.row_y(column.task_ids.len()),
                config.column_width,
                config.card_height,
            );
            layout
                .surface
                .register_drop_target(TargetId::Column(column.id.clone()), slot);
            layout.slots.insert(column.id.clone(), slot);
        }
        layout
    }

    pub fn surface(&self) -> &SurfaceRegistry {
        &self.surface
    }

    pub fn card_rect(&self, task: &TaskId) -> Option<Rect> {
        self.cards.get(task).copied()
    }

    /// The free slot under a column's last card
    pub fn slot_rect(&self, column: &ColumnId) -> Option<Rect> {
        self.slots.get(column).copied()
    }

    /// The card whose bounds contain `point`
    pub fn card_at(&self, point: Point) -> Option<TaskId> {
        self.cards
            .iter()
            .find(|(_, rect)| rect.contains(point))
            .map(|(task, _)| task.clone())
    }
}
