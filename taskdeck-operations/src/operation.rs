//! Operation metadata and execution traits

use crate::ExecutionResult;
use serde_json::Value;

/// Static metadata every command carries
pub trait Operation {
    /// The verb, e.g. "move"
    fn verb(&self) -> &'static str;

    /// The noun, e.g. "task"
    fn noun(&self) -> &'static str;

    /// One-line human description
    fn description(&self) -> &'static str;

    /// Canonical "verb noun" string used in logs
    fn op_string(&self) -> String {
        format!("{} {}", self.verb(), self.noun())
    }
}

/// Run an operation against a context `C`, failing with `E`
pub trait Execute<C, E>: Operation {
    fn execute(&self, ctx: &mut C) -> ExecutionResult<Value, E>;
}

/// Implement [`Operation`] for a command struct.
///
/// ```ignore
/// operation!(MoveTask, verb = "move", noun = "task", description = "Move a task");
/// ```
#[macro_export]
macro_rules! operation {
    ($ty:ty, verb = $verb:literal, noun = $noun:literal, description = $description:literal) => {
        impl $crate::Operation for $ty {
            fn verb(&self) -> &'static str {
                $verb
            }

            fn noun(&self) -> &'static str {
                $noun
            }

            fn description(&self) -> &'static str {
                $description
            }
        }
    };
}
