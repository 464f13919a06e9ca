//! Drag gesture state machine
//!
//! ```text
//! Idle --press--> Armed --move past activation distance--> Dragging
//!   ^               |                                          |
//!   |            release (click)                 release / cancel
//!   +---------------+------------------------------------------+
//! ```
//!
//! Committing and cancelling both happen inside a single call and leave the controller
//! Idle again. The store is only read while a gesture is in flight; the single mutation
//! is the `move_task` performed on a committing release.

use crate::collision::closest_corners;
use crate::config::DragConfig;
use crate::geometry::{Point, Rect};
use crate::resolver::{Destination, TargetResolver};
use crate::surface::{DropSurface, TargetId};
use serde::{Deserialize, Serialize};
use taskdeck_board::{plan_move, BoardStore, ColumnId, MoveOutcome, MovePreview, TaskId};
use tracing::{debug, trace};

/// Transient state of one gesture. Never stored on the board.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub active_task: TaskId,
    pub source_column: ColumnId,
    pub source_index: usize,
    pub pointer_origin: Point,
    pub pointer: Point,
    /// Card bounds when the drag started, if the surface knows them
    pub initial_rect: Option<Rect>,
    pub hovered: Option<TargetId>,
}

impl DragSession {
    /// The dragged card's bounds at the current pointer position
    pub fn dragged_rect(&self) -> Option<Rect> {
        self.initial_rect.map(|rect| {
            rect.translate(
                self.pointer.x - self.pointer_origin.x,
                self.pointer.y - self.pointer_origin.y,
            )
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Armed,
    Dragging,
}

#[derive(Debug, Clone, Default, PartialEq)]
enum State {
    #[default]
    Idle,
    Armed(DragSession),
    Dragging(DragSession),
}

/// Raw pointer input, as forwarded by the rendering layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DragEvent {
    Press { task: TaskId, point: Point },
    Move { point: Point },
    Release { point: Point },
    Cancel,
}

/// What a single input did to the gesture
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "gesture", rename_all = "snake_case")]
pub enum GestureOutcome {
    /// Input did not apply in the current phase
    Ignored,
    /// A press landed on a known task
    Armed,
    /// Pointer crossed the activation distance
    Started { hovered: Option<TargetId> },
    /// Pointer moved during a drag
    Hovering { hovered: Option<TargetId> },
    /// Released before the drag activated
    Clicked { task: TaskId },
    /// Dropped on a valid target; `move_task` ran
    Committed {
        destination: Destination,
        outcome: MoveOutcome,
    },
    /// Explicit cancel, or release with nothing valid underneath
    Cancelled,
}

#[derive(Debug, Clone, Default)]
pub struct DragController {
    config: DragConfig,
    resolver: TargetResolver,
    state: State,
}

impl DragController {
    pub fn new(config: DragConfig) -> Self {
        Self {
            resolver: TargetResolver::new(config.drop_placement),
            config,
            state: State::Idle,
        }
    }

    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    pub fn phase(&self) -> DragPhase {
        match self.state {
            State::Idle => DragPhase::Idle,
            State::Armed(_) => DragPhase::Armed,
            State::Dragging(_) => DragPhase::Dragging,
        }
    }

    /// The gesture in flight, if any
    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            State::Idle => None,
            State::Armed(session) | State::Dragging(session) => Some(session),
        }
    }

    /// Feed one input event
    pub fn handle<S>(&mut self, event: DragEvent, store: &mut BoardStore, surface: &S) -> GestureOutcome
    where
        S: DropSurface + ?Sized,
    {
        match event {
            DragEvent::Press { task, point } => self.press(task, point, store),
            DragEvent::Move { point } => self.pointer_move(point, store, surface),
            DragEvent::Release { point } => self.release(point, store, surface),
            DragEvent::Cancel => self.cancel(),
        }
    }

    /// Pointer down on a task card
    pub fn press(&mut self, task: TaskId, point: Point, store: &BoardStore) -> GestureOutcome {
        if !matches!(self.state, State::Idle) {
            return GestureOutcome::Ignored;
        }
        let Some(slot) = store.find_task_slot(&task) else {
            debug!(task = %task, "press on unknown task ignored");
            return GestureOutcome::Ignored;
        };

        trace!(task = %task, column = %slot.column, index = slot.index, "armed");
        self.state = State::Armed(DragSession {
            active_task: task,
            source_column: slot.column,
            source_index: slot.index,
            pointer_origin: point,
            pointer: point,
            initial_rect: None,
            hovered: None,
        });
        GestureOutcome::Armed
    }

    /// Pointer moved; may activate the drag and updates the hovered target
    pub fn pointer_move<S>(&mut self, point: Point, store: &BoardStore, surface: &S) -> GestureOutcome
    where
        S: DropSurface + ?Sized,
    {
        match std::mem::take(&mut self.state) {
            State::Idle => GestureOutcome::Ignored,
            State::Armed(mut session) => {
                session.pointer = point;
                if session.pointer_origin.distance(point) < self.config.activation_distance {
                    self.state = State::Armed(session);
                    return GestureOutcome::Armed;
                }

                session.initial_rect = surface.draggable_rect(&session.active_task);
                session.hovered = self.locate(&session, store, surface);
                debug!(task = %session.active_task, hovered = ?session.hovered, "drag started");
                let hovered = session.hovered.clone();
                self.state = State::Dragging(session);
                GestureOutcome::Started { hovered }
            }
            State::Dragging(mut session) => {
                session.pointer = point;
                session.hovered = self.locate(&session, store, surface);
                let hovered = session.hovered.clone();
                self.state = State::Dragging(session);
                GestureOutcome::Hovering { hovered }
            }
        }
    }

    /// Pointer up: click, commit or cancel, then back to Idle
    pub fn release<S>(&mut self, point: Point, store: &mut BoardStore, surface: &S) -> GestureOutcome
    where
        S: DropSurface + ?Sized,
    {
        match std::mem::take(&mut self.state) {
            State::Idle => GestureOutcome::Ignored,
            State::Armed(session) => GestureOutcome::Clicked {
                task: session.active_task,
            },
            State::Dragging(mut session) => {
                session.pointer = point;
                session.hovered = self.locate(&session, store, surface);

                if store.task(&session.active_task).is_none() {
                    debug!(task = %session.active_task, "dragged task vanished, cancelling");
                    return GestureOutcome::Cancelled;
                }
                let Some(destination) = session
                    .hovered
                    .as_ref()
                    .and_then(|target| {
                        self.resolver
                            .resolve(target, Some(&session.active_task), store)
                    })
                else {
                    debug!(task = %session.active_task, "released over no valid target, cancelling");
                    return GestureOutcome::Cancelled;
                };

                let outcome = store.apply_move(&destination.request(&session.active_task));
                debug!(
                    task = %session.active_task,
                    column = %destination.column,
                    index = destination.index,
                    moved = outcome.is_moved(),
                    "drag committed"
                );
                GestureOutcome::Committed {
                    destination,
                    outcome,
                }
            }
        }
    }

    /// Abandon the gesture without touching the board
    pub fn cancel(&mut self) -> GestureOutcome {
        match std::mem::take(&mut self.state) {
            State::Idle => GestureOutcome::Ignored,
            State::Armed(session) | State::Dragging(session) => {
                debug!(task = %session.active_task, "drag cancelled");
                GestureOutcome::Cancelled
            }
        }
    }

    /// Where the hovered target would currently resolve to
    pub fn destination(&self, store: &BoardStore) -> Option<Destination> {
        let State::Dragging(session) = &self.state else {
            return None;
        };
        self.resolver
            .resolve(session.hovered.as_ref()?, Some(&session.active_task), store)
    }

    /// Hover feedback: column orderings as they would look if released now
    pub fn preview(&self, store: &BoardStore) -> Option<MovePreview> {
        let session = self.session()?;
        let destination = self.destination(store)?;
        let plan = plan_move(store, &destination.request(&session.active_task)).ok()?;
        Some(plan.preview(store))
    }

    fn locate<S>(&self, session: &DragSession, store: &BoardStore, surface: &S) -> Option<TargetId>
    where
        S: DropSurface + ?Sized,
    {
        let target = match session.dragged_rect() {
            Some(rect) => closest_corners(
                &rect,
                &surface.drop_targets(),
                Some(&session.active_task),
                self.config.max_target_distance,
            )
            .map(|hit| hit.target),
            None => surface
                .hovered_target()
                .filter(|t| *t != TargetId::Task(session.active_task.clone())),
        };
        // Geometry can lag behind the board; drop targets that no longer exist
        target.filter(|t| {
            self.resolver
                .resolve(t, Some(&session.active_task), store)
                .is_some()
        })
    }
}
