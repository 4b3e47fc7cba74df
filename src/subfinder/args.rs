// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Subfinder Argument Builder
 * Deterministic mapping from typed options to the subfinder flag surface
 *
 * © 2026 Bountyy Oy
 */

use std::path::Path;

use crate::types::EnumerationConfig;

/// Build the argument vector for one subfinder invocation.
///
/// The target domain and JSON-output flags are always present; optional
/// flags are appended only when the corresponding option is set (and, for
/// numeric options, strictly positive). Source names are not validated
/// here, subfinder rejects unknown ones itself. `-silent` always trails.
pub fn build_args(domain: &str, output_path: &Path, config: &EnumerationConfig) -> Vec<String> {
    let mut args = vec!["-d".to_string(), domain.to_string()];

    args.push("-json".to_string());
    args.push("-o".to_string());
    args.push(output_path.display().to_string());

    if let Some(sources) = &config.sources {
        if !sources.is_empty() {
            args.push("-sources".to_string());
            args.push(sources.join(","));
        }
    }

    if config.all_sources == Some(true) {
        args.push("-all".to_string());
    }

    if let Some(timeout) = config.timeout {
        if timeout > 0 {
            args.push("-timeout".to_string());
            args.push(timeout.to_string());
        }
    }

    if let Some(max_time) = config.max_time {
        if max_time > 0 {
            args.push("-max-time".to_string());
            args.push(max_time.to_string());
        }
    }

    if let Some(rate_limit) = config.rate_limit {
        if rate_limit > 0 {
            args.push("-rate-limit".to_string());
            args.push(rate_limit.to_string());
        }
    }

    if config.recursive == Some(true) {
        args.push("-recursive".to_string());
    }

    args.push("-silent".to_string());

    args
}
