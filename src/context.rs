// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Scan Execution Context
 * Caller-supplied cancellation and deadline for one enumeration run
 *
 * © 2026 Bountyy Oy
 */

use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Governs the lifetime of one enumeration run. The caller owns the
/// context; the subprocess is bound to it and terminated promptly when it
/// is cancelled or the deadline passes.
///
/// Cloning is cheap and clones share the same cancellation state.
#[derive(Debug, Clone)]
pub struct ScanContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl ScanContext {
    /// A context that only ends when explicitly cancelled.
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: None,
        }
    }

    /// A context that additionally expires `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: Some(Instant::now() + timeout),
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled() || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Resolves when the context is cancelled or its deadline passes.
    /// Pends forever on an unbounded, uncancelled context.
    pub async fn done(&self) {
        match self.deadline {
            Some(deadline) => tokio::select! {
                _ = self.token.cancelled() => {}
                _ = tokio::time::sleep_until(deadline) => {}
            },
            None => self.token.cancelled().await,
        }
    }

    /// Why the context ended, for error messages.
    pub fn end_reason(&self) -> &'static str {
        if self.token.is_cancelled() {
            "cancelled by caller"
        } else {
            "deadline exceeded"
        }
    }
}

impl Default for ScanContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cancel_is_observed() {
        let ctx = ScanContext::new();
        assert!(!ctx.is_cancelled());

        ctx.cancel();
        assert!(ctx.is_cancelled());
        assert_eq!(ctx.end_reason(), "cancelled by caller");

        // done() must resolve immediately once cancelled
        ctx.done().await;
    }

    #[tokio::test]
    async fn test_deadline_expiry() {
        let ctx = ScanContext::with_timeout(Duration::from_millis(10));
        assert!(!ctx.is_cancelled());

        ctx.done().await;
        assert!(ctx.is_cancelled());
        assert_eq!(ctx.end_reason(), "deadline exceeded");
    }

    #[tokio::test]
    async fn test_clones_share_cancellation() {
        let ctx = ScanContext::new();
        let clone = ctx.clone();

        ctx.cancel();
        assert!(clone.is_cancelled());
    }
}
