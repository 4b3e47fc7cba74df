// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Enumeration Types
 * Result and configuration shapes shared across the service
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Instant;

/// Options forwarded to subfinder. Every field carries explicit presence
/// semantics: an absent option is omitted from the invocation entirely so
/// the tool applies its own defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnumerationConfig {
    /// Sources to query, in order, joined by comma on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,

    /// Use all available sources, including slow ones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_sources: Option<bool>,

    /// Per-source timeout in seconds. Ignored unless strictly positive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// Wall-clock cap for the whole enumeration, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_time: Option<u64>,

    /// Maximum HTTP requests per second against the sources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<u64>,

    /// Recurse into discovered subdomains with sources that support it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recursive: Option<bool>,
}

/// Result of one enumeration run, single-domain or fan-out.
///
/// `end_time` and `duration_ms` are populated on every exit path once a run
/// has begun, so callers can always report elapsed time, including failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumerationResult {
    /// Target domain, or a synthetic label like "TLD scan (3 domains)"
    /// for fan-out sweeps.
    pub domain: String,

    pub start_time: DateTime<Utc>,

    pub end_time: Option<DateTime<Utc>>,

    /// Elapsed wall time of the run in milliseconds.
    pub duration_ms: Option<u64>,

    /// Discovered hostnames in discovery order. A fan-out sweep may
    /// contain duplicates across its sub-runs.
    pub subdomains: Vec<String>,

    pub total_subdomains: usize,

    /// Count of distinct hostnames in `subdomains`.
    pub unique_subdomains: usize,

    /// Sources that contributed at least one hostname, sorted for
    /// stable serialization.
    #[serde(rename = "sources_used")]
    pub sources: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    pub client_id: String,
}

impl EnumerationResult {
    /// Open a result for a run that starts now.
    pub fn begin(domain: impl Into<String>, client_id: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            start_time: Utc::now(),
            end_time: None,
            duration_ms: None,
            subdomains: Vec::new(),
            total_subdomains: 0,
            unique_subdomains: 0,
            sources: Vec::new(),
            error: None,
            client_id: client_id.into(),
        }
    }

    /// Stamp the end of the run. Idempotent callers should invoke this
    /// exactly once per exit path.
    pub fn finish(&mut self, started: Instant) {
        self.end_time = Some(Utc::now());
        self.duration_ms = Some(started.elapsed().as_millis() as u64);
    }

    /// Stamp the end of a failed run, recording the failure description.
    pub fn finish_with_error(&mut self, started: Instant, error: impl Into<String>) {
        self.error = Some(error.into());
        self.finish(started);
    }

    /// Install discovered hostnames and contributing sources. The source
    /// set is sorted so serialized results are reproducible.
    pub fn record_discoveries(&mut self, hostnames: Vec<String>, sources: HashSet<String>) {
        self.total_subdomains = hostnames.len();
        self.unique_subdomains = hostnames.iter().collect::<HashSet<_>>().len();
        self.subdomains = hostnames;
        let mut sources: Vec<String> = sources.into_iter().collect();
        sources.sort();
        self.sources = sources;
    }
}

/// One entry of the static subfinder source catalog. Reference data for
/// UI and configuration choices, never persisted.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SourceCatalogEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub requires_key: bool,
    pub category: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_timing_populated_on_finish() {
        let started = Instant::now();
        let mut result = EnumerationResult::begin("example.com", "client-1");
        assert!(result.end_time.is_none());

        result.finish(started);
        assert!(result.end_time.is_some());
        assert!(result.duration_ms.is_some());
    }

    #[test]
    fn test_record_discoveries_counts_distinct_hostnames() {
        let mut result = EnumerationResult::begin("sweep", "client-1");
        let hostnames = vec![
            "s1.a.com".to_string(),
            "s1.b.com".to_string(),
            "s1.a.com".to_string(),
        ];
        let sources: HashSet<String> = ["x".to_string(), "y".to_string()].into_iter().collect();

        result.record_discoveries(hostnames, sources);
        assert_eq!(result.total_subdomains, 3);
        assert_eq!(result.unique_subdomains, 2);
        assert_eq!(result.sources, vec!["x", "y"]);
    }

    #[test]
    fn test_config_defaults_are_absent() {
        let config = EnumerationConfig::default();
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }
}
