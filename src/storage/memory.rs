// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * In-Memory Domain Store
 * Storage backend for tests and database-less dry runs
 *
 * © 2026 Bountyy Oy
 */

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use super::{is_root_origin, DomainRecord, DomainStore, NewSubdomainRecord, SUBFINDER_SOURCE};

/// Vec-backed store. Record order is insertion order, which doubles as
/// creation order for the read contract.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Vec<DomainRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a record, e.g. a discovered root domain.
    pub fn seed(&self, record: DomainRecord) {
        self.records.write().push(record);
    }

    /// Convenience seeding for root/TLD-origin domains.
    pub fn seed_root_domain(&self, client: &str, domain: &str, source: &str) {
        self.seed(DomainRecord {
            id: Uuid::new_v4().to_string(),
            client: client.to_string(),
            domain: domain.to_string(),
            parent_domain: String::new(),
            source: source.to_string(),
            resolved: false,
            discovered_at: None,
            scan_id: String::new(),
            metadata: None,
            created: Utc::now(),
        });
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[async_trait]
impl DomainStore for MemoryStore {
    async fn find_root_domains(&self, client: &str) -> Result<Vec<DomainRecord>> {
        Ok(self
            .records
            .read()
            .iter()
            .filter(|r| r.client == client && is_root_origin(&r.source))
            .cloned()
            .collect())
    }

    async fn find_saved_subdomains(
        &self,
        client: &str,
        pattern: Option<&str>,
    ) -> Result<Vec<DomainRecord>> {
        Ok(self
            .records
            .read()
            .iter()
            .filter(|r| r.client == client && r.source == SUBFINDER_SOURCE)
            .filter(|r| match pattern {
                Some(p) => r.domain.contains(p) || r.parent_domain.contains(p),
                None => true,
            })
            .cloned()
            .collect())
    }

    async fn insert_subdomain(&self, record: NewSubdomainRecord) -> Result<()> {
        self.records.write().push(DomainRecord {
            id: Uuid::new_v4().to_string(),
            client: record.client,
            domain: record.domain,
            parent_domain: record.parent_domain,
            source: record.source,
            resolved: record.resolved,
            discovered_at: Some(record.discovered_at),
            scan_id: record.scan_id,
            metadata: Some(record.metadata),
            created: Utc::now(),
        });
        Ok(())
    }
}
