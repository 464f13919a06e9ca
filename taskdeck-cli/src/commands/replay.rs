//! Replay pointer gestures through the drag controller

use super::CommandContext;
use crate::layout::BoardLayout;
use crate::render::{write_board, write_output};
use crate::script::{locate, press_target, GestureScript, GestureStep};
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use taskdeck_board::{BoardSnapshot, BoardStore};
use taskdeck_drag::{DragController, GestureOutcome, Point};
use tracing::debug;

#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub step: usize,
    pub action: String,
    pub outcome: GestureOutcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub steps: Vec<StepReport>,
    pub moves: usize,
    pub board: BoardSnapshot,
}

pub fn run(context: &CommandContext, script: &Path, seed: Option<&Path>, out: &mut dyn Write) -> Result<()> {
    let gestures = GestureScript::from_path(script)
        .with_context(|| format!("Failed to load gesture script {}", script.display()))?;
    let mut store = context.load_board(seed)?;
    let report = replay(context, &gestures, &mut store)?;

    write_output(out, context.format, &report, |out| {
        for step in &report.steps {
            writeln!(out, "{:>3}. {:<28} {}", step.step, step.action, describe(&step.outcome))?;
        }
        writeln!(out, "{} move(s) committed", report.moves)?;
        writeln!(out)?;
        write_board(out, &report.board)
    })
}

/// Drive `store` through the script. The layout is rebuilt after each committed move,
/// the way a UI re-renders once the board changes.
pub fn replay(context: &CommandContext, script: &GestureScript, store: &mut BoardStore) -> Result<ReplayReport> {
    let mut controller = DragController::new(context.config.drag);
    let mut layout = BoardLayout::build(store, &context.config.layout);
    let mut pointer = Point::default();
    let mut steps = Vec::with_capacity(script.steps.len());
    let mut moves = 0;

    for (index, step) in script.steps.iter().enumerate() {
        let number = index + 1;
        let outcome = match step {
            GestureStep::Press(at) => {
                let (task, point) =
                    press_target(store, &layout, at).with_context(|| format!("step {number}: {step}"))?;
                pointer = point;
                controller.press(task, pointer, store)
            }
            GestureStep::Move(at) => {
                pointer = locate(store, &layout, at).with_context(|| format!("step {number}: {step}"))?;
                controller.pointer_move(pointer, store, layout.surface())
            }
            GestureStep::Drop(at) => {
                pointer = locate(store, &layout, at).with_context(|| format!("step {number}: {step}"))?;
                controller.pointer_move(pointer, store, layout.surface());
                controller.release(pointer, store, layout.surface())
            }
            GestureStep::Release => controller.release(pointer, store, layout.surface()),
            GestureStep::Cancel => controller.cancel(),
        };
        debug!(step = number, action = %step, ?outcome, "replayed step");

        if let GestureOutcome::Committed { outcome: result, .. } = &outcome {
            if result.is_moved() {
                moves += 1;
                layout = BoardLayout::build(store, &context.config.layout);
            }
        }
        steps.push(StepReport {
            step: number,
            action: step.to_string(),
            outcome,
        });
    }

    Ok(ReplayReport {
        steps,
        moves,
        board: store.snapshot(),
    })
}

fn describe(outcome: &GestureOutcome) -> String {
    match outcome {
        GestureOutcome::Ignored => "ignored".to_string(),
        GestureOutcome::Armed => "armed".to_string(),
        GestureOutcome::Started { hovered } => match hovered {
            Some(target) => format!("drag started over {target}"),
            None => "drag started".to_string(),
        },
        GestureOutcome::Hovering { hovered } => match hovered {
            Some(target) => format!("over {target}"),
            None => "over nothing".to_string(),
        },
        GestureOutcome::Clicked { task } => format!("clicked {task}"),
        GestureOutcome::Committed {
            destination,
            outcome,
        } => match outcome {
            taskdeck_board::MoveOutcome::Moved { from, to } => format!("moved {from} -> {to}"),
            taskdeck_board::MoveOutcome::Unchanged(reason) => {
                format!("dropped on {}[{}], {reason}", destination.column, destination.index)
            }
        },
        GestureOutcome::Cancelled => "cancelled".to_string(),
    }
}
