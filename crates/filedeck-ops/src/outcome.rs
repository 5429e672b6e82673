//! Per-item results of batch operations (paste, multi-delete).

use std::path::{Path, PathBuf};

use filedeck_core::FsResult;
use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::warn;

/// Kind of batch operation. Displays as the past-tense verb used in
/// summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum OperationType {
    #[strum(to_string = "Copied")]
    Copy,
    #[strum(to_string = "Moved")]
    Move,
    #[strum(to_string = "Deleted")]
    Delete,
}

/// One item of a batch that could not be processed.
#[derive(Debug, Clone, thiserror::Error, Serialize, Deserialize)]
#[error("{}: {message}", path.display())]
pub struct OperationError {
    pub path: PathBuf,
    pub message: String,
}

/// Tally of a finished batch. Failures never abort the remaining items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationOutcome {
    pub operation_type: OperationType,
    pub succeeded: usize,
    pub failed: usize,
    /// Final destinations of copied or moved items, in order.
    pub created: Vec<PathBuf>,
    pub errors: Vec<OperationError>,
}

impl OperationOutcome {
    pub(crate) fn new(operation_type: OperationType) -> Self {
        Self {
            operation_type,
            succeeded: 0,
            failed: 0,
            created: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Count the result for `source`; a failure is logged and kept.
    pub(crate) fn record(&mut self, source: &Path, result: FsResult<Option<PathBuf>>) {
        match result {
            Ok(created) => {
                self.succeeded += 1;
                self.created.extend(created);
            }
            Err(err) => {
                warn!(op = %self.operation_type, path = %source.display(), error = %err, "item failed");
                self.failed += 1;
                self.errors.push(OperationError {
                    path: source.to_path_buf(),
                    message: err.to_string(),
                });
            }
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// e.g. `Moved 3 item(s)` or `Deleted 1 item(s), 2 failed`.
    pub fn summary(&self) -> String {
        let done = format!("{} {} item(s)", self.operation_type, self.succeeded);
        match self.failed {
            0 => done,
            failed => format!("{done}, {failed} failed"),
        }
    }
}
