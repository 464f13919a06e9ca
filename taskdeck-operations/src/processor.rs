//! Operation processor: execute, attribute, record

use crate::{Execute, LogEntry, Operation};
use serde_json::Value;

/// Runs operations and records the ones that should be logged.
///
/// Implementors decide where entries go; the provided [`process`](Self::process)
/// stamps the actor onto each entry before handing it to [`record`](Self::record).
pub trait OperationProcessor<C, E> {
    /// Actor attributed to every recorded entry
    fn actor(&self) -> Option<&str>;

    /// Persist a log entry
    fn record(&self, ctx: &mut C, entry: LogEntry);

    /// Execute an operation and record its log entry, if any
    fn process<O>(&self, operation: &O, ctx: &mut C) -> Result<Value, E>
    where
        O: Execute<C, E>,
    {
        let (result, entry) = operation.execute(ctx).split();
        if let Some(mut entry) = entry {
            if let Some(actor) = self.actor() {
                entry.actor = Some(actor.to_string());
            }
            tracing::debug!(op = %entry.op, actor = ?entry.actor, "recording operation");
            self.record(ctx, entry);
        } else {
            tracing::trace!(op = %operation.op_string(), "operation left nothing to record");
        }
        result
    }
}
