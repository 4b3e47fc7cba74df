// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Subfinder Availability Guard
 * PATH resolution with install-on-demand bootstrap
 *
 * © 2026 Bountyy Oy
 */

use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{info, warn};

use crate::errors::EnumerationError;

/// Binary name resolved from the executable search path.
pub const SUBFINDER_BIN: &str = "subfinder";

/// Module path handed to `go install` when the binary is absent.
const SUBFINDER_MODULE: &str = "github.com/projectdiscovery/subfinder/v2/cmd/subfinder@latest";

/// Hard cap on the install step. Installation is a one-time bootstrap,
/// so this bound is independent of any caller's scan context.
const INSTALL_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Ensure subfinder resolves on PATH, installing it on first use.
///
/// Cheap and idempotent when already installed; runs before every
/// single-domain scan attempt.
pub async fn ensure_installed() -> Result<(), EnumerationError> {
    if which::which(SUBFINDER_BIN).is_ok() {
        return Ok(());
    }

    info!("subfinder not found in PATH, installing via go install");

    let mut install = Command::new("go");
    install
        .args(["install", "-v", SUBFINDER_MODULE])
        .stdin(Stdio::null())
        .kill_on_drop(true);

    match timeout(INSTALL_TIMEOUT, install.output()).await {
        Err(_) => {
            return Err(EnumerationError::ToolUnavailable(format!(
                "install timed out after {}s",
                INSTALL_TIMEOUT.as_secs()
            )));
        }
        Ok(Err(e)) => {
            return Err(EnumerationError::ToolUnavailable(format!(
                "failed to run go install: {e}"
            )));
        }
        Ok(Ok(output)) if !output.status.success() => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("go install failed: {}", stderr.trim());
            return Err(EnumerationError::ToolUnavailable(format!(
                "go install exited with {}",
                output.status
            )));
        }
        Ok(Ok(_)) => {}
    }

    // go install succeeding is not enough, GOPATH/bin may not be on PATH
    which::which(SUBFINDER_BIN).map(|_| ()).map_err(|_| {
        EnumerationError::ToolUnavailable(
            "not found in PATH after installation".to_string(),
        )
    })
}
