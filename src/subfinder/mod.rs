// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Subfinder Enumeration Service
 * Orchestrates subfinder runs over single domains and root-domain sweeps
 *
 * Features:
 * - Install-on-demand tool bootstrap
 * - Context-bound subprocess execution
 * - Result normalization with plain-text fallback
 * - Sequential fan-out across discovered root domains
 * - Result persistence via the domain record store
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

pub mod args;
pub mod installer;
pub mod parser;
pub mod runner;
pub mod sources;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::context::ScanContext;
use crate::errors::{EnumerationError, FailedScan, ScanOutcome};
use crate::storage::{DomainRecord, DomainStore, NewSubdomainRecord, SUBFINDER_SOURCE};
use crate::types::{EnumerationConfig, EnumerationResult, SourceCatalogEntry};

/// Subdomain enumeration service driving subfinder as a subprocess.
pub struct SubfinderService {
    store: Arc<dyn DomainStore>,
}

impl SubfinderService {
    pub fn new(store: Arc<dyn DomainStore>) -> Self {
        Self { store }
    }

    /// Run one enumeration for one domain.
    ///
    /// Every exit path returns a result with `end_time` and `duration_ms`
    /// populated; failures carry it inside [`FailedScan`].
    pub async fn run_domain(
        &self,
        ctx: &ScanContext,
        domain: &str,
        client_id: &str,
        config: &EnumerationConfig,
    ) -> ScanOutcome {
        let started = Instant::now();
        let mut result = EnumerationResult::begin(domain, client_id);

        info!(domain = %domain, "starting subfinder scan");

        if let Err(error) = installer::ensure_installed().await {
            result.finish_with_error(started, error.to_string());
            return Err(FailedScan { result, error });
        }

        // Scoped output file: subfinder writes into it, we only keep the
        // path. The handle closes here and the file is removed on drop,
        // whatever happens below.
        let output = match tempfile::Builder::new()
            .prefix("subfinder_output_")
            .suffix(".json")
            .tempfile()
        {
            Ok(file) => file.into_temp_path(),
            Err(e) => {
                let error = EnumerationError::OutputFile(e);
                result.finish_with_error(started, error.to_string());
                return Err(FailedScan { result, error });
            }
        };

        let args = args::build_args(domain, &output, config);
        debug!(command = %format!("{} {}", installer::SUBFINDER_BIN, args.join(" ")), "running subfinder");

        if let Err(error) = runner::run(ctx, installer::SUBFINDER_BIN, &args).await {
            result.finish_with_error(started, error.to_string());
            return Err(FailedScan { result, error });
        }

        let parsed = match parser::parse_output(&output).await {
            Ok(parsed) => parsed,
            Err(error) => {
                result.finish_with_error(started, error.to_string());
                return Err(FailedScan { result, error });
            }
        };

        result.record_discoveries(parsed.hostnames, parsed.sources);
        // subfinder deduplicates within a single invocation
        result.unique_subdomains = result.total_subdomains;
        result.finish(started);

        info!(
            domain = %domain,
            subdomains = result.total_subdomains,
            duration_ms = result.duration_ms.unwrap_or(0),
            "subfinder scan completed"
        );

        Ok(result)
    }

    /// Fan-out sweep: enumerate every previously discovered root domain
    /// of a client and merge the results.
    ///
    /// Root domains run strictly one after another. The upstream sources
    /// are rate limited per shared credential, so parallel invocations
    /// would trip those limits. A failing domain is logged and skipped;
    /// it never aborts the remaining domains.
    pub async fn run_root_sweep(
        &self,
        ctx: &ScanContext,
        client_id: &str,
        config: &EnumerationConfig,
    ) -> ScanOutcome {
        let started = Instant::now();
        let mut result = EnumerationResult::begin("TLD scan", client_id);

        let roots = match self.store.find_root_domains(client_id).await {
            Ok(roots) => roots,
            Err(e) => {
                let error = EnumerationError::Storage(e);
                result.finish_with_error(started, format!("failed to get root domains: {error}"));
                return Err(FailedScan { result, error });
            }
        };

        // First-seen order of the stored records (creation order) defines
        // the iteration order of the sweep.
        let unique_roots = dedupe_root_domains(&roots);
        if unique_roots.is_empty() {
            let error = EnumerationError::NoRootDomains;
            result.finish_with_error(started, error.to_string());
            return Err(FailedScan { result, error });
        }

        info!(
            client = %client_id,
            roots = unique_roots.len(),
            "starting root-domain sweep"
        );

        let mut sweep = SweepAccumulator::default();
        for domain in &unique_roots {
            match self.run_domain(ctx, domain, client_id, config).await {
                Ok(sub) => sweep.merge(sub),
                Err(failed) => sweep.skip(domain, failed.error),
            }
        }

        for (domain, error) in &sweep.skipped {
            warn!(domain = %domain, error = %error, "root domain skipped");
        }

        result.domain = format!("TLD scan ({} domains)", unique_roots.len());
        result.record_discoveries(sweep.hostnames, sweep.sources);
        result.finish(started);

        info!(
            subdomains = result.total_subdomains,
            unique = result.unique_subdomains,
            roots = unique_roots.len(),
            skipped = sweep.skipped.len(),
            duration_ms = result.duration_ms.unwrap_or(0),
            "root-domain sweep completed"
        );

        Ok(result)
    }

    /// Persist one record per discovered hostname. The first failing
    /// insert aborts the remainder of the batch; earlier writes stay
    /// committed.
    pub async fn save_results(
        &self,
        client_id: &str,
        result: &EnumerationResult,
        scan_id: &str,
    ) -> Result<usize, EnumerationError> {
        let metadata = serde_json::json!({
            "discovery_method": SUBFINDER_SOURCE,
            "sources_used": result.sources,
            "scan_duration": format!("{}ms", result.duration_ms.unwrap_or(0)),
        });

        let mut saved = 0;
        for subdomain in &result.subdomains {
            let record = NewSubdomainRecord {
                client: client_id.to_string(),
                domain: subdomain.clone(),
                parent_domain: result.domain.clone(),
                source: SUBFINDER_SOURCE.to_string(),
                resolved: false,
                discovered_at: result.start_time,
                scan_id: scan_id.to_string(),
                metadata: metadata.clone(),
            };
            self.store
                .insert_subdomain(record)
                .await
                .map_err(EnumerationError::Storage)?;
            saved += 1;
        }

        info!(saved, client = %client_id, "persisted subfinder results");
        Ok(saved)
    }

    /// Previously persisted subfinder records for a client, optionally
    /// narrowed by a domain/parent-domain pattern.
    pub async fn saved_subdomains(
        &self,
        client_id: &str,
        pattern: Option<&str>,
    ) -> Result<Vec<DomainRecord>, EnumerationError> {
        self.store
            .find_saved_subdomains(client_id, pattern)
            .await
            .map_err(EnumerationError::Storage)
    }

    /// Static catalog of upstream sources.
    pub fn available_sources() -> &'static [SourceCatalogEntry] {
        sources::available_sources()
    }
}

/// Deduplicate root-domain records into unique domains, preserving the
/// first-seen order. Blank domains are dropped.
fn dedupe_root_domains(records: &[DomainRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for record in records {
        let domain = record.domain.trim();
        if !domain.is_empty() && seen.insert(domain.to_string()) {
            unique.push(domain.to_string());
        }
    }
    unique
}

/// Fold state for one sweep: the aggregate discoveries plus the domains
/// that failed and were skipped.
#[derive(Default)]
struct SweepAccumulator {
    hostnames: Vec<String>,
    sources: HashSet<String>,
    skipped: Vec<(String, EnumerationError)>,
}

impl SweepAccumulator {
    /// Concatenate a sub-run in iteration order, duplicates retained.
    fn merge(&mut self, sub: EnumerationResult) {
        self.hostnames.extend(sub.subdomains);
        self.sources.extend(sub.sources);
    }

    fn skip(&mut self, domain: &str, error: EnumerationError) {
        self.skipped.push((domain.to_string(), error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(domain: &str) -> DomainRecord {
        DomainRecord {
            id: format!("rec-{domain}"),
            client: "client-1".to_string(),
            domain: domain.to_string(),
            parent_domain: String::new(),
            source: "tld_discovery".to_string(),
            resolved: false,
            discovered_at: None,
            scan_id: String::new(),
            metadata: None,
            created: Utc::now(),
        }
    }

    #[test]
    fn test_dedupe_preserves_first_seen_order() {
        let records = vec![record("b.com"), record("a.com"), record("b.com"), record("")];
        assert_eq!(dedupe_root_domains(&records), vec!["b.com", "a.com"]);
    }

    #[test]
    fn test_sweep_accumulator_concatenates_and_unions() {
        let mut sweep = SweepAccumulator::default();

        let mut first = EnumerationResult::begin("a.com", "client-1");
        first.subdomains = vec!["s1.a.com".to_string()];
        first.sources = vec!["x".to_string()];
        sweep.merge(first);

        let mut second = EnumerationResult::begin("b.com", "client-1");
        second.subdomains = vec!["s1.b.com".to_string(), "s1.a.com".to_string()];
        second.sources = vec!["y".to_string()];
        sweep.merge(second);

        sweep.skip("fail.com", EnumerationError::ProcessExecution("exit 2".into()));

        assert_eq!(sweep.hostnames, vec!["s1.a.com", "s1.b.com", "s1.a.com"]);
        assert_eq!(
            sweep.sources,
            HashSet::from(["x".to_string(), "y".to_string()])
        );
        assert_eq!(sweep.skipped.len(), 1);
        assert_eq!(sweep.skipped[0].0, "fail.com");
    }
}
