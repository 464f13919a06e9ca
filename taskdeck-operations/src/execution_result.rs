//! Execution result types for operations

use crate::LogEntry;

/// Result of executing an operation
///
/// Distinguishes between:
/// - Logged: operations that changed state and should be recorded
/// - Unlogged: reads and no-ops
/// - Failed: errors (optionally logged)
#[derive(Debug)]
pub enum ExecutionResult<T, E> {
    /// Operation succeeded and should be logged
    Logged { value: T, log_entry: LogEntry },
    /// Operation succeeded but nothing changed
    Unlogged { value: T },
    /// Operation failed
    Failed {
        error: E,
        log_entry: Option<LogEntry>,
    },
}

impl<T, E> ExecutionResult<T, E> {
    /// Extract the result (Ok or Err)
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Self::Logged { value, .. } | Self::Unlogged { value } => Ok(value),
            Self::Failed { error, .. } => Err(error),
        }
    }

    /// Get the value and log entry separately
    pub fn split(self) -> (Result<T, E>, Option<LogEntry>) {
        match self {
            Self::Logged { value, log_entry } => (Ok(value), Some(log_entry)),
            Self::Unlogged { value } => (Ok(value), None),
            Self::Failed { error, log_entry } => (Err(error), log_entry),
        }
    }

    /// Check if this should be logged
    pub fn should_log(&self) -> bool {
        matches!(
            self,
            Self::Logged { .. }
                | Self::Failed {
                    log_entry: Some(_),
                    ..
                }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unlogged_is_not_logged() {
        let result: ExecutionResult<u32, String> = ExecutionResult::Unlogged { value: 7 };
        assert!(!result.should_log());
        assert_eq!(result.into_result(), Ok(7));
    }

    #[test]
    fn test_failed_without_entry_is_not_logged() {
        let result: ExecutionResult<u32, String> = ExecutionResult::Failed {
            error: "boom".into(),
            log_entry: None,
        };
        assert!(!result.should_log());
        let (value, entry) = result.split();
        assert_eq!(value, Err("boom".to_string()));
        assert!(entry.is_none());
    }

    #[test]
    fn test_logged_split_keeps_entry() {
        let entry = LogEntry::new("move task", json!({}), json!({"changed": true}), None, 0);
        let result: ExecutionResult<u32, String> = ExecutionResult::Logged {
            value: 1,
            log_entry: entry,
        };
        assert!(result.should_log());
        let (value, entry) = result.split();
        assert_eq!(value, Ok(1));
        assert_eq!(entry.map(|e| e.op), Some("move task".to_string()));
    }
}
