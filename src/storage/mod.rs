// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Domain Record Storage
 * Storage collaborator seam for discovered attack-surface domains
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::{PostgresStore, StorageConfig};

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Source value stamped on every record this service creates.
pub const SUBFINDER_SOURCE: &str = "subfinder";

/// True when a record's source marks it as a root/TLD seed: discovered
/// via TLD or tenant enumeration, or entered manually.
pub fn is_root_origin(source: &str) -> bool {
    source.contains("tld") || source.contains("ms_tenant") || source == "manual"
}

/// A persisted attack-surface domain record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainRecord {
    pub id: String,
    pub client: String,
    pub domain: String,
    pub parent_domain: String,
    pub source: String,
    pub resolved: bool,
    pub discovered_at: Option<DateTime<Utc>>,
    pub scan_id: String,
    pub metadata: Option<serde_json::Value>,
    pub created: DateTime<Utc>,
}

/// A record to persist for one discovered hostname. Created once at
/// persistence time; this service never mutates it afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct NewSubdomainRecord {
    pub client: String,
    pub domain: String,
    pub parent_domain: String,
    pub source: String,
    pub resolved: bool,
    pub discovered_at: DateTime<Utc>,
    pub scan_id: String,
    pub metadata: serde_json::Value,
}

/// Read/write contract this core holds against the record storage layer.
///
/// Reads are ordered by creation time. Writes are single-record; a batch
/// of discoveries is persisted one insert at a time and aborts on the
/// first failure, so partial persistence is possible.
#[async_trait]
pub trait DomainStore: Send + Sync {
    /// Root/TLD-origin domains for a client, in creation order.
    async fn find_root_domains(&self, client: &str) -> Result<Vec<DomainRecord>>;

    /// Subfinder-discovered records for a client, optionally narrowed to
    /// those whose domain or parent domain contains `pattern`.
    async fn find_saved_subdomains(
        &self,
        client: &str,
        pattern: Option<&str>,
    ) -> Result<Vec<DomainRecord>>;

    async fn insert_subdomain(&self, record: NewSubdomainRecord) -> Result<()>;
}
