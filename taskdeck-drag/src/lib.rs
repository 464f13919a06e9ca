//! Drag-and-drop rearrangement for taskdeck boards
//!
//! Three pieces, each usable on its own:
//!
//! - [`DragController`] classifies raw pointer input into press, drag, drop and cancel
//! - [`closest_corners`] picks the drop target nearest to the dragged card
//! - [`TargetResolver`] maps that target to a column and insertion index
//!
//! Geometry comes from a [`DropSurface`], normally a [`SurfaceRegistry`] kept up to date
//! by the rendering layer. The board is only mutated when a drag is released over a
//! valid target.
//!
//! ```rust
//! use taskdeck_board::{BoardStore, NewTask};
//! use taskdeck_drag::{DragController, GestureOutcome, Point, Rect, SurfaceRegistry, TargetId};
//!
//! let mut store = BoardStore::with_default_project("Board");
//! let project = store.projects().next().unwrap().id.clone();
//! let columns = store.project(&project).unwrap().column_ids.clone();
//! let task = store.create_task(&columns[0], NewTask::new("Write tests")).unwrap().id;
//!
//! let mut surface = SurfaceRegistry::new();
//! surface.register_draggable(task.clone(), Rect::new(0.0, 40.0, 200.0, 50.0));
//! surface.register_drop_target(TargetId::Column(columns[1].clone()), Rect::new(220.0, 40.0, 200.0, 50.0));
//!
//! let mut drag = DragController::default();
//! drag.press(task.clone(), Point::new(10.0, 50.0), &store);
//! drag.pointer_move(Point::new(230.0, 50.0), &store, &surface);
//! let outcome = drag.release(Point::new(230.0, 50.0), &mut store, &surface);
//!
//! assert!(matches!(outcome, GestureOutcome::Committed { .. }));
//! assert_eq!(store.task(&task).unwrap().column_id, columns[1]);
//! ```

mod collision;
mod config;
mod geometry;
mod resolver;
mod session;
mod surface;

pub use collision::{closest_corners, Collision};
pub use config::{DragConfig, DragConfigError, DEFAULT_ACTIVATION_DISTANCE};
pub use geometry::{corner_distance, Point, Rect};
pub use resolver::{Destination, DropPlacement, TargetResolver, DEFAULT_DROP_PLACEMENT};
pub use session::{DragController, DragEvent, DragPhase, DragSession, GestureOutcome};
pub use surface::{DropSurface, SurfaceRegistry, TargetId};
