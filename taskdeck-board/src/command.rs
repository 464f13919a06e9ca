//! Shared plumbing for board commands

use crate::error::BoardError;
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Instant;
use taskdeck_operations::{ExecutionResult, LogEntry, Operation};

pub(crate) type CommandResult = ExecutionResult<Value, BoardError>;

/// A state change worth recording
pub(crate) fn logged<O>(op: &O, started: Instant, value: Value) -> CommandResult
where
    O: Operation + Serialize,
{
    let log_entry = LogEntry::new(op.op_string(), input_of(op), value.clone(), None, elapsed_us(started));
    ExecutionResult::Logged { value, log_entry }
}

/// A read or a no-op
pub(crate) fn unlogged(value: Value) -> CommandResult {
    ExecutionResult::Unlogged { value }
}

/// Input that could not be acted on
pub(crate) fn failed<O>(op: &O, started: Instant, error: BoardError) -> CommandResult
where
    O: Operation + Serialize,
{
    let log_entry = LogEntry::failure(op.op_string(), input_of(op), &error.to_string(), elapsed_us(started));
    ExecutionResult::Failed {
        error,
        log_entry: Some(log_entry),
    }
}

/// Result body for commands that named an unknown id
pub(crate) fn unchanged() -> Value {
    json!({ "changed": false })
}

pub(crate) fn to_value<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

fn input_of<O: Serialize>(op: &O) -> Value {
    to_value(op)
}

fn elapsed_us(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX)
}
