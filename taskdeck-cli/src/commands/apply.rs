//! Run a batch of JSON board operations

use super::CommandContext;
use crate::render::{write_board, write_output};
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::io::{Read, Write};
use std::path::Path;
use taskdeck_board::parse::parse_input;
use taskdeck_board::{BoardOperationProcessor, BoardSnapshot, BoardStore, LogEntry, Operation, OperationProcessor};
use tracing::warn;

#[derive(Debug, Clone, Serialize)]
pub struct OpReport {
    pub op: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OpReport {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplyReport {
    pub results: Vec<OpReport>,
    /// Logged operations, newest first
    pub activity: Vec<LogEntry>,
    pub board: BoardSnapshot,
}

impl ApplyReport {
    pub fn failures(&self) -> usize {
        self.results.iter().filter(|r| !r.succeeded()).count()
    }
}

/// Returns true when every operation succeeded
pub fn run(
    context: &CommandContext,
    ops: &Path,
    seed: Option<&Path>,
    actor: Option<&str>,
    out: &mut dyn Write,
) -> Result<bool> {
    let input = read_ops(ops)?;
    let mut store = context.load_board(seed)?;
    let actor = actor.or(context.config.actor.as_deref());
    let report = apply(input, actor, &mut store)?;

    write_output(out, context.format, &report, |out| {
        for (index, result) in report.results.iter().enumerate() {
            match &result.error {
                None => writeln!(out, "{:>3}. {:<16} ok", index + 1, result.op)?,
                Some(error) => writeln!(out, "{:>3}. {:<16} failed: {error}", index + 1, result.op)?,
            }
        }
        if !report.activity.is_empty() {
            writeln!(out, "\nActivity (newest first):")?;
            for entry in &report.activity {
                let actor = entry.actor.as_deref().unwrap_or("-");
                writeln!(out, "  {} {:<16} {}", entry.timestamp.format("%H:%M:%S"), entry.op, actor)?;
            }
        }
        writeln!(out)?;
        write_board(out, &report.board)
    })?;
    Ok(report.failures() == 0)
}

/// Parse `input` and run every operation in order. A failing operation is reported and
/// the batch continues; only unparseable input is an error.
pub fn apply(input: Value, actor: Option<&str>, store: &mut BoardStore) -> Result<ApplyReport> {
    let operations = parse_input(input).context("Failed to parse operations")?;
    let processor = match actor {
        Some(actor) => BoardOperationProcessor::with_actor(actor),
        None => BoardOperationProcessor::new(),
    };

    let results = operations
        .iter()
        .map(|operation| {
            let op = operation.op_string();
            match processor.process(operation, store) {
                Ok(value) => OpReport {
                    op,
                    value: Some(value),
                    error: None,
                },
                Err(error) => {
                    warn!(op = %op, %error, "operation failed");
                    OpReport {
                        op,
                        value: None,
                        error: Some(error.to_string()),
                    }
                }
            }
        })
        .collect();

    Ok(ApplyReport {
        results,
        activity: store.activity().cloned().collect(),
        board: store.snapshot(),
    })
}

fn read_ops(path: &Path) -> Result<Value> {
    let text = if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read operations from stdin")?;
        text
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read operations file {}", path.display()))?
    };
    serde_json::from_str(&text).context("Operations must be valid JSON")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use crate::config::TaskdeckConfig;
    use serde_json::json;
    use taskdeck_board::{ColumnId, TaskId};

    fn demo() -> BoardStore {
        CommandContext::new(TaskdeckConfig::default(), OutputFormat::Table)
            .load_board(None)
            .unwrap()
    }

    #[test]
    fn test_batch_runs_in_order_with_actor() {
        let mut store = demo();
        let input = json!([
            {"op": "add task", "column": "done", "title": "Launch"},
            {"op": "move task", "id": "quiz-engine", "column": "done", "index": 0},
            {"op": "list tasks", "column": "done"}
        ]);

        let report = apply(input, Some("ada"), &mut store).unwrap();

        assert_eq!(report.failures(), 0);
        assert_eq!(report.results[2].value.as_ref().unwrap()["count"], 3);
        let done = &store.column(&ColumnId::from("done")).unwrap().task_ids;
        assert_eq!(done[0], TaskId::from("quiz-engine"));
        assert_eq!(done[1], TaskId::from("signup-flow"));

        let ops: Vec<_> = report.activity.iter().map(|e| e.op.as_str()).collect();
        assert_eq!(ops, ["move task", "add task"]);
        assert!(report.activity.iter().all(|e| e.actor.as_deref() == Some("ada")));
    }

    #[test]
    fn test_failed_operation_does_not_stop_batch() {
        let mut store = demo();
        let input = json!([
            {"op": "add task", "column": "todo", "title": "  "},
            {"op": "delete task", "id": "lesson-notes"}
        ]);

        let report = apply(input, None, &mut store).unwrap();

        assert_eq!(report.failures(), 1);
        assert!(report.results[0].error.as_ref().unwrap().contains("title"));
        assert!(report.results[1].succeeded());
        assert!(store.task(&TaskId::from("lesson-notes")).is_none());
    }

    #[test]
    fn test_stale_move_is_not_an_error() {
        let mut store = demo();
        let before = store.snapshot();
        let report = apply(json!({"op": "move task", "id": "ghost", "column": "done"}), None, &mut store).unwrap();

        assert_eq!(report.failures(), 0);
        assert_eq!(report.results[0].value.as_ref().unwrap()["outcome"]["result"], "unchanged");
        assert!(report.activity.is_empty());
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_unparseable_input_is_an_error() {
        let mut store = demo();
        let err = apply(json!({"op": "fly task"}), None, &mut store).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse operations"));
    }
}
