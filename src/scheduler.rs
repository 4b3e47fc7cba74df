// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Enumeration Scheduler
 * Periodic root-domain sweeps with an owned start/stop lifecycle
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::config::{EnumerationSettings, SchedulerConfig};
use crate::context::ScanContext;
use crate::subfinder::SubfinderService;

/// Triggers fan-out sweeps on a fixed interval. Constructed once, passed
/// by handle, and shut down explicitly; there is no ambient global
/// scheduler state.
pub struct EnumerationScheduler {
    service: Arc<SubfinderService>,
    scheduler: SchedulerConfig,
    enumeration: EnumerationSettings,
    shutdown: CancellationToken,
    worker: Option<JoinHandle<()>>,
}

impl EnumerationScheduler {
    pub fn new(
        service: Arc<SubfinderService>,
        scheduler: SchedulerConfig,
        enumeration: EnumerationSettings,
    ) -> Self {
        Self {
            service,
            scheduler,
            enumeration,
            shutdown: CancellationToken::new(),
            worker: None,
        }
    }

    /// Spawn the sweep loop. The first sweep runs immediately, then once
    /// per configured interval. Calling start twice is a no-op.
    pub fn start(&mut self) {
        if self.worker.is_some() {
            warn!("scheduler already started");
            return;
        }
        if !self.scheduler.enabled {
            info!("scheduler disabled, not starting");
            return;
        }

        info!(
            interval_secs = self.scheduler.interval_secs,
            clients = self.scheduler.clients.len(),
            "starting enumeration scheduler"
        );

        let service = Arc::clone(&self.service);
        let clients = self.scheduler.clients.clone();
        let enumeration = self.enumeration.clone();
        let interval = Duration::from_secs(self.scheduler.interval_secs.max(1));
        let shutdown = self.shutdown.clone();

        self.worker = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => break,
                    _ = ticker.tick() => {
                        run_sweeps(&service, &clients, &enumeration).await;
                    }
                }
            }
            info!("enumeration scheduler stopped");
        }));
    }

    /// Cancel the loop and wait for the worker to drain.
    pub async fn stop(&mut self) {
        self.shutdown.cancel();
        if let Some(worker) = self.worker.take() {
            let _ = worker.await;
        }
    }
}

async fn run_sweeps(
    service: &SubfinderService,
    clients: &[String],
    enumeration: &EnumerationSettings,
) {
    for client in clients {
        let ctx = if enumeration.scan_deadline_secs > 0 {
            ScanContext::with_timeout(Duration::from_secs(enumeration.scan_deadline_secs))
        } else {
            ScanContext::new()
        };

        match service
            .run_root_sweep(&ctx, client, &enumeration.defaults)
            .await
        {
            Ok(result) => {
                let scan_id = Uuid::new_v4().to_string();
                if let Err(e) = service.save_results(client, &result, &scan_id).await {
                    error!(client = %client, error = %e, "failed to persist sweep results");
                }
            }
            Err(failed) => {
                error!(client = %client, error = %failed.error, "scheduled sweep failed");
            }
        }
    }
}
