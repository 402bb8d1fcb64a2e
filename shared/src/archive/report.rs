use std::fmt;

use super::error::TransferError;

// Failures past this many are counted but not stored
const MAX_RECORDED_FAILURES: usize = 64;

/// A field that failed to transfer, addressed by its path from the root
/// object (`"guild.guild_name"`, `"stash_tab_options[2]"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFailure {
    pub path: String,
    pub error: TransferError,
}

/// A value that transferred correctly but broke an invariant of the format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveWarning {
    pub path: String,
    pub message: String,
}

/// Outcome of one archive walk.
///
/// Success is the conjunction of every field transfer in the walk. Only the
/// failures and warnings are kept; fields that transferred cleanly are just
/// counted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferReport {
    failures: Vec<FieldFailure>,
    failure_count: usize,
    warnings: Vec<ArchiveWarning>,
    fields_transferred: usize,
}

impl TransferReport {
    pub fn success(&self) -> bool {
        self.failure_count == 0
    }

    pub fn failures(&self) -> &[FieldFailure] {
        &self.failures
    }

    /// Total failures, including any beyond what the report stores.
    pub fn failure_count(&self) -> usize {
        self.failure_count
    }

    pub fn warnings(&self) -> &[ArchiveWarning] {
        &self.warnings
    }

    pub fn fields_transferred(&self) -> usize {
        self.fields_transferred
    }

    /// Whether a failure was recorded at exactly `path`.
    pub fn has_failure_at(&self, path: &str) -> bool {
        self.failures.iter().any(|failure| failure.path == path)
    }

    pub(crate) fn record_failure(&mut self, path: String, error: TransferError) {
        self.failure_count += 1;
        if self.failures.len() < MAX_RECORDED_FAILURES {
            self.failures.push(FieldFailure { path, error });
        }
    }

    pub(crate) fn record_warning(&mut self, path: String, message: String) {
        self.warnings.push(ArchiveWarning { path, message });
    }

    pub(crate) fn count_field(&mut self) {
        self.fields_transferred += 1;
    }
}

impl fmt::Display for TransferReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} field(s) transferred, {} failure(s), {} warning(s)",
            self.fields_transferred,
            self.failure_count,
            self.warnings.len()
        )?;
        if let Some(first) = self.failures.first() {
            write!(f, "; first failure at `{}`: {}", first.path, first.error)?;
        }
        Ok(())
    }
}
