//! Drag tuning knobs

use crate::resolver::{DropPlacement, DEFAULT_DROP_PLACEMENT};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pointer travel (px) before a press turns into a drag
pub const DEFAULT_ACTIVATION_DISTANCE: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Pointer travel (px) that separates a click from a drag
    pub activation_distance: f64,
    /// Insert before or after a hovered card
    pub drop_placement: DropPlacement,
    /// Ignore targets whose corner distance exceeds this (px)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_target_distance: Option<f64>,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            activation_distance: DEFAULT_ACTIVATION_DISTANCE,
            drop_placement: DEFAULT_DROP_PLACEMENT,
            max_target_distance: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DragConfigError {
    #[error("activation_distance must be a finite, non-negative number (got {0})")]
    ActivationDistance(f64),
    #[error("max_target_distance must be a finite, positive number (got {0})")]
    MaxTargetDistance(f64),
}

impl DragConfig {
    pub fn validate(&self) -> Result<(), DragConfigError> {
        if !self.activation_distance.is_finite() || self.activation_distance < 0.0 {
            return Err(DragConfigError::ActivationDistance(self.activation_distance));
        }
        if let Some(max) = self.max_target_distance {
            if !max.is_finite() || max <= 0.0 {
                return Err(DragConfigError::MaxTargetDistance(max));
            }
        }
        Ok(())
    }
}
