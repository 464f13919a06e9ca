//! UpdateColumn command

use crate::command::{logged, to_value, unchanged, unlogged, CommandResult};
use crate::error::BoardError;
use crate::store::BoardStore;
use crate::types::{ColumnId, ColumnPatch};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use taskdeck_operations::{operation, Execute};

/// Rename or recolor a column. Ordering is never affected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateColumn {
    pub id: ColumnId,
    #[serde(flatten)]
    pub patch: ColumnPatch,
}

operation!(UpdateColumn, verb = "update", noun = "column", description = "Change a column's title or color");

impl UpdateColumn {
    pub fn new(id: impl Into<ColumnId>) -> Self {
        Self {
            id: id.into(),
            patch: ColumnPatch::default(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.patch = self.patch.title(title);
        self
    }

    /// `None` clears the color
    pub fn with_color(mut self, color: Option<String>) -> Self {
        self.patch = self.patch.color(color);
        self
    }
}

impl Execute<BoardStore, BoardError> for UpdateColumn {
    fn execute(&self, ctx: &mut BoardStore) -> CommandResult {
        let started = Instant::now();
        let Some(before) = ctx.column(&self.id).cloned() else {
            return unlogged(unchanged());
        };
        if self.patch.is_empty() {
            return unlogged(to_value(&before));
        }

        match ctx.update_column(&self.id, self.patch.clone()) {
            Some(column) if column != before => logged(self, started, to_value(&column)),
            Some(column) => unlogged(to_value(&column)),
            None => unlogged(unchanged()),
        }
    }
}
