// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Subfinder Process Runner
 * Context-bound subprocess execution with live stderr forwarding
 *
 * © 2026 Bountyy Oy
 */

use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::context::ScanContext;
use crate::errors::EnumerationError;

/// Run `program` with `args`, bound to the caller's context.
///
/// stderr is piped and drained by a background task that forwards each
/// line to the log; the drain starts before the wait so the pipe can
/// never fill up against process exit. stdout is discarded, results come
/// from the output file the tool writes itself.
///
/// Cancellation or deadline expiry kills the child and returns a
/// `ProcessExecution` error, as does a non-zero exit.
pub async fn run(
    ctx: &ScanContext,
    program: &str,
    args: &[String],
) -> Result<ExitStatus, EnumerationError> {
    if ctx.is_cancelled() {
        return Err(EnumerationError::ProcessExecution(format!(
            "not started: {}",
            ctx.end_reason()
        )));
    }

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(EnumerationError::Spawn)?;

    let drain = spawn_stderr_drain(&mut child);

    let status = tokio::select! {
        status = child.wait() => {
            status.map_err(|e| {
                EnumerationError::ProcessExecution(format!("wait failed: {e}"))
            })?
        }
        _ = ctx.done() => {
            let _ = child.start_kill();
            let _ = child.wait().await;
            if let Some(drain) = drain {
                let _ = drain.await;
            }
            return Err(EnumerationError::ProcessExecution(format!(
                "terminated: {}",
                ctx.end_reason()
            )));
        }
    };

    if let Some(drain) = drain {
        let _ = drain.await;
    }

    if !status.success() {
        return Err(EnumerationError::ProcessExecution(format!(
            "exited with {status}"
        )));
    }

    Ok(status)
}

fn spawn_stderr_drain(child: &mut tokio::process::Child) -> Option<JoinHandle<()>> {
    let stderr = child.stderr.take()?;
    Some(tokio::spawn(async move {
        let mut lines = BufReader::new(stderr).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            debug!(target: "subfinder", "{}", line);
        }
    }))
}
