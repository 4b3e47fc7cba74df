// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Enumeration Integration Tests
 * End-to-end runs of the subfinder service against a scripted binary
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use anyhow::Result;
use async_trait::async_trait;

use haukka::errors::EnumerationError;
use haukka::storage::{
    DomainStore, DomainRecord, MemoryStore, NewSubdomainRecord, SUBFINDER_SOURCE,
};
use haukka::subfinder::SubfinderService;
use haukka::types::EnumerationConfig;
use haukka::ScanContext;

static FAKE_BIN: OnceLock<tempfile::TempDir> = OnceLock::new();

/// Scripted subfinder stand-in. Output depends on the target domain:
/// known domains produce fixed results, `fail.com` exits non-zero,
/// everything else gets one structured and one plain line.
fn install_fake_subfinder() {
    FAKE_BIN.get_or_init(|| {
        let dir = tempfile::tempdir().unwrap();
        let bin = dir.path().join("subfinder");
        let mut file = std::fs::File::create(&bin).unwrap();
        write!(
            file,
            r#"#!/bin/sh
DOMAIN=""
OUT=""
while [ $# -gt 0 ]; do
    case "$1" in
        -d) DOMAIN="$2"; shift 2 ;;
        -o) OUT="$2"; shift 2 ;;
        *) shift ;;
    esac
done
case "$DOMAIN" in
    a.com)
        printf '{{"host":"s1.a.com","source":"x"}}\n' > "$OUT"
        ;;
    b.com)
        printf '{{"host":"s1.b.com","source":"y"}}\n' > "$OUT"
        printf '{{"host":"s1.a.com","source":"y"}}\n' >> "$OUT"
        ;;
    fail.com)
        echo "simulated source failure" >&2
        exit 2
        ;;
    *)
        printf '{{"host":"a.%s","source":"crtsh"}}\n' "$DOMAIN" > "$OUT"
        printf 'www.%s\n' "$DOMAIN" >> "$OUT"
        ;;
esac
exit 0
"#
        )
        .unwrap();
        drop(file);
        std::fs::set_permissions(&bin, std::fs::Permissions::from_mode(0o755)).unwrap();

        let path = std::env::var("PATH").unwrap_or_default();
        std::env::set_var("PATH", format!("{}:{}", dir.path().display(), path));
        dir
    });
}

fn service_with(store: Arc<dyn DomainStore>) -> SubfinderService {
    install_fake_subfinder();
    SubfinderService::new(store)
}

#[tokio::test]
async fn test_end_to_end_single_domain_scan() {
    let service = service_with(Arc::new(MemoryStore::new()));
    let config = EnumerationConfig {
        timeout: Some(30),
        ..Default::default()
    };

    let result = service
        .run_domain(&ScanContext::new(), "example.com", "client-1", &config)
        .await
        .unwrap();

    assert_eq!(result.subdomains, vec!["a.example.com", "www.example.com"]);
    assert_eq!(result.total_subdomains, 2);
    assert_eq!(result.unique_subdomains, 2);
    assert_eq!(result.sources, vec!["crtsh"]);
    assert!(result.error.is_none());
    assert!(result.end_time.is_some());
    assert!(result.duration_ms.is_some());
    assert_eq!(result.client_id, "client-1");
}

#[tokio::test]
async fn test_cancelled_context_still_populates_timing() {
    let service = service_with(Arc::new(MemoryStore::new()));

    let ctx = ScanContext::new();
    ctx.cancel();

    let failed = service
        .run_domain(&ctx, "example.com", "client-1", &EnumerationConfig::default())
        .await
        .unwrap_err();

    assert!(matches!(
        failed.error,
        EnumerationError::ProcessExecution(_)
    ));
    assert!(failed.result.end_time.is_some());
    assert!(failed.result.duration_ms.is_some());
    assert!(failed.result.error.is_some());
    assert!(failed.result.subdomains.is_empty());
}

#[tokio::test]
async fn test_sweep_concatenates_and_counts_distinct() {
    let store = Arc::new(MemoryStore::new());
    store.seed_root_domain("client-1", "a.com", "tld_discovery");
    store.seed_root_domain("client-1", "b.com", "manual");
    // duplicate record, deduplicated before the sweep
    store.seed_root_domain("client-1", "a.com", "tld_discovery");

    let service = service_with(store);
    let result = service
        .run_root_sweep(&ScanContext::new(), "client-1", &EnumerationConfig::default())
        .await
        .unwrap();

    // concatenation in first-seen root order, duplicates retained
    assert_eq!(result.subdomains, vec!["s1.a.com", "s1.b.com", "s1.a.com"]);
    assert_eq!(result.total_subdomains, 3);
    // regression: "unique" is the distinct-hostname count, not the raw total
    assert_eq!(result.unique_subdomains, 2);
    assert_eq!(result.sources, vec!["x", "y"]);
    assert_eq!(result.domain, "TLD scan (2 domains)");
    assert!(result.end_time.is_some());
}

#[tokio::test]
async fn test_sweep_skips_failing_domain() {
    let store = Arc::new(MemoryStore::new());
    store.seed_root_domain("client-1", "fail.com", "tld_discovery");
    store.seed_root_domain("client-1", "a.com", "tld_discovery");

    let service = service_with(store);
    let result = service
        .run_root_sweep(&ScanContext::new(), "client-1", &EnumerationConfig::default())
        .await
        .unwrap();

    // the failing first domain must not abort the second
    assert_eq!(result.subdomains, vec!["s1.a.com"]);
    assert_eq!(result.domain, "TLD scan (2 domains)");
    assert!(result.error.is_none());
}

#[tokio::test]
async fn test_sweep_without_roots_fails() {
    let service = service_with(Arc::new(MemoryStore::new()));

    let failed = service
        .run_root_sweep(&ScanContext::new(), "client-1", &EnumerationConfig::default())
        .await
        .unwrap_err();

    assert!(matches!(failed.error, EnumerationError::NoRootDomains));
    assert!(failed.result.end_time.is_some());
    assert!(failed.result.duration_ms.is_some());
}

#[tokio::test]
async fn test_save_and_retrieve_results() {
    let store = Arc::new(MemoryStore::new());
    let service = service_with(Arc::clone(&store) as Arc<dyn DomainStore>);

    let result = service
        .run_domain(
            &ScanContext::new(),
            "example.com",
            "client-1",
            &EnumerationConfig::default(),
        )
        .await
        .unwrap();

    let saved = service
        .save_results("client-1", &result, "scan-42")
        .await
        .unwrap();
    assert_eq!(saved, 2);

    let records = service.saved_subdomains("client-1", None).await.unwrap();
    assert_eq!(records.len(), 2);

    let record = &records[0];
    assert_eq!(record.domain, "a.example.com");
    assert_eq!(record.parent_domain, "example.com");
    assert_eq!(record.source, SUBFINDER_SOURCE);
    assert!(!record.resolved);
    assert_eq!(record.scan_id, "scan-42");
    let metadata = record.metadata.as_ref().unwrap();
    assert_eq!(metadata["discovery_method"], "subfinder");
    assert_eq!(metadata["sources_used"][0], "crtsh");

    let filtered = service
        .saved_subdomains("client-1", Some("example.com"))
        .await
        .unwrap();
    assert_eq!(filtered.len(), 2); // matches via parent_domain as well as domain
    let filtered = service
        .saved_subdomains("client-1", Some("www"))
        .await
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].domain, "www.example.com");
}

/// Store whose inserts start failing after a quota, to observe
/// batch-abort behavior.
struct FlakyStore {
    inner: MemoryStore,
    quota: usize,
    inserts: AtomicUsize,
}

#[async_trait]
impl DomainStore for FlakyStore {
    async fn find_root_domains(&self, client: &str) -> Result<Vec<DomainRecord>> {
        self.inner.find_root_domains(client).await
    }

    async fn find_saved_subdomains(
        &self,
        client: &str,
        pattern: Option<&str>,
    ) -> Result<Vec<DomainRecord>> {
        self.inner.find_saved_subdomains(client, pattern).await
    }

    async fn insert_subdomain(&self, record: NewSubdomainRecord) -> Result<()> {
        if self.inserts.fetch_add(1, Ordering::SeqCst) >= self.quota {
            anyhow::bail!("storage unavailable");
        }
        self.inner.insert_subdomain(record).await
    }
}

#[tokio::test]
async fn test_mid_batch_storage_failure_keeps_earlier_writes() {
    let store = Arc::new(FlakyStore {
        inner: MemoryStore::new(),
        quota: 1,
        inserts: AtomicUsize::new(0),
    });
    let service = service_with(Arc::clone(&store) as Arc<dyn DomainStore>);

    let result = service
        .run_domain(
            &ScanContext::new(),
            "example.com",
            "client-1",
            &EnumerationConfig::default(),
        )
        .await
        .unwrap();

    let err = service
        .save_results("client-1", &result, "scan-43")
        .await
        .unwrap_err();
    assert!(matches!(err, EnumerationError::Storage(_)));

    // first insert committed, second aborted the batch
    assert_eq!(store.inner.len(), 1);
}
