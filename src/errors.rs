// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Enumeration Error Types
 * Typed failure taxonomy for subdomain enumeration runs
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use thiserror::Error;

use crate::types::EnumerationResult;

/// Failure taxonomy for a single enumeration run or a fan-out sweep.
#[derive(Error, Debug)]
pub enum EnumerationError {
    /// The subfinder binary is missing and could not be installed.
    #[error("subfinder unavailable: {0}")]
    ToolUnavailable(String),

    /// The subprocess could not be started at all.
    #[error("failed to start subfinder: {0}")]
    Spawn(#[source] std::io::Error),

    /// The subprocess started but did not complete successfully:
    /// non-zero exit, caller cancellation or deadline expiry.
    #[error("subfinder execution failed: {0}")]
    ProcessExecution(String),

    /// The ephemeral output file could not be created.
    #[error("failed to create output file: {0}")]
    OutputFile(#[source] std::io::Error),

    /// The result file could not be opened or read. Per-line JSON
    /// failures are not parse errors, they fall back to plain text.
    #[error("failed to parse subfinder output: {0}")]
    OutputParse(#[source] std::io::Error),

    /// A fan-out sweep was requested but the client has no discovered
    /// root domains to seed it. Run TLD discovery first.
    #[error("no root domains found, run TLD discovery first")]
    NoRootDomains,

    /// The storage collaborator failed. Partial writes may already be
    /// committed when this surfaces from a persistence batch.
    #[error("storage error: {0}")]
    Storage(#[source] anyhow::Error),
}

impl EnumerationError {
    /// True when retrying later could plausibly succeed without any
    /// operator intervention. Retry policy itself belongs to the caller.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            EnumerationError::ProcessExecution(_) | EnumerationError::Storage(_)
        )
    }
}

/// A failed run still carries its fully populated, timestamped result so
/// callers can report elapsed time on every path.
#[derive(Error, Debug)]
#[error("{error}")]
pub struct FailedScan {
    pub result: EnumerationResult,
    #[source]
    pub error: EnumerationError,
}

/// Outcome of one enumeration run: the result on success, or the result
/// plus the typed failure that ended it.
pub type ScanOutcome = Result<EnumerationResult, FailedScan>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = EnumerationError::ToolUnavailable("not found in PATH".to_string());
        assert_eq!(err.to_string(), "subfinder unavailable: not found in PATH");

        let err = EnumerationError::NoRootDomains;
        assert!(err.to_string().contains("TLD discovery"));
    }

    #[test]
    fn test_transient_classification() {
        assert!(EnumerationError::ProcessExecution("killed".into()).is_transient());
        assert!(!EnumerationError::NoRootDomains.is_transient());
        assert!(!EnumerationError::ToolUnavailable("missing".into()).is_transient());
    }
}
