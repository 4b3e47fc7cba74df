// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Haukka - Attack Surface Reconnaissance CLI
 * Subdomain enumeration over previously discovered root domains
 *
 * Features:
 * - Single-domain and fan-out enumeration runs
 * - Result persistence to the domain record store
 * - Periodic sweeps via the watch command
 * - Source catalog inspection
 *
 * (c) 2026 Bountyy Oy
 */

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use haukka::config::{self, AppConfig};
use haukka::errors::ScanOutcome;
use haukka::scheduler::EnumerationScheduler;
use haukka::storage::{DomainStore, MemoryStore, PostgresStore};
use haukka::subfinder::SubfinderService;
use haukka::types::EnumerationConfig;
use haukka::ScanContext;

/// Haukka - Attack Surface Reconnaissance
#[derive(Parser)]
#[command(name = "haukka")]
#[command(author = "Bountyy Oy <info@bountyy.fi>")]
#[command(version = "0.3.0")]
#[command(about = "Subdomain enumeration orchestration service", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output (includes subprocess stderr)
    #[arg(short, long, global = true)]
    debug: bool,

    /// Quiet mode - errors only
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file path (TOML or JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Enumerate subdomains of a single domain
    Scan {
        /// Target domain
        #[arg(required = true)]
        domain: String,

        /// Client the results belong to
        #[arg(short = 'C', long)]
        client: String,

        #[command(flatten)]
        options: ScanOptions,
    },

    /// Enumerate every discovered root domain of a client and merge the
    /// results
    Sweep {
        /// Client whose root domains seed the sweep
        #[arg(short = 'C', long)]
        client: String,

        #[command(flatten)]
        options: ScanOptions,
    },

    /// List the available subfinder sources
    Sources {
        /// Emit the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show previously persisted subdomains for a client
    Saved {
        #[arg(short = 'C', long)]
        client: String,

        /// Narrow to records whose domain or parent domain contains this
        #[arg(long)]
        domain: Option<String>,
    },

    /// Run scheduled sweeps until interrupted
    Watch,
}

#[derive(Args, Debug, Clone)]
struct ScanOptions {
    /// Sources to query, comma separated
    #[arg(long, value_delimiter = ',')]
    sources: Option<Vec<String>>,

    /// Use all sources, including slow ones
    #[arg(long)]
    all: bool,

    /// Per-source timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Wall-clock cap for the enumeration in seconds
    #[arg(long = "max-time")]
    max_time: Option<u64>,

    /// Maximum requests per second against the sources
    #[arg(long = "rate-limit")]
    rate_limit: Option<u64>,

    /// Recurse into discovered subdomains
    #[arg(long)]
    recursive: bool,

    /// Persist discovered hostnames to the record store
    #[arg(long)]
    save: bool,

    /// Scan deadline in seconds, 0 for unbounded
    #[arg(long)]
    deadline: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    let config = config::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Scan {
            domain,
            client,
            options,
        } => {
            let service = service_for(&config).await?;
            let enum_config = merge_options(&config.enumeration.defaults, &options);
            let ctx = scan_context(&config, &options);

            let outcome = service.run_domain(&ctx, &domain, &client, &enum_config).await;
            report_outcome(&service, &client, outcome, options.save).await
        }

        Commands::Sweep { client, options } => {
            let service = service_for(&config).await?;
            let enum_config = merge_options(&config.enumeration.defaults, &options);
            let ctx = scan_context(&config, &options);

            let outcome = service.run_root_sweep(&ctx, &client, &enum_config).await;
            report_outcome(&service, &client, outcome, options.save).await
        }

        Commands::Sources { json } => {
            let catalog = SubfinderService::available_sources();
            if json {
                println!("{}", serde_json::to_string_pretty(catalog)?);
            } else {
                println!(
                    "{:<16} {:<24} {:<6} {}",
                    "NAME", "DESCRIPTION", "KEY", "CATEGORY"
                );
                for source in catalog {
                    println!(
                        "{:<16} {:<24} {:<6} {}",
                        source.name,
                        source.description,
                        if source.requires_key { "yes" } else { "no" },
                        source.category
                    );
                }
            }
            Ok(())
        }

        Commands::Saved { client, domain } => {
            let service = service_for(&config).await?;
            let records = service
                .saved_subdomains(&client, domain.as_deref())
                .await?;
            println!("{}", serde_json::to_string_pretty(&records)?);
            info!(count = records.len(), "saved subdomains retrieved");
            Ok(())
        }

        Commands::Watch => {
            let service = service_for(&config).await?;

            let mut scheduler_config = config.scheduler.clone();
            // invoking watch is the opt-in, regardless of the config flag
            scheduler_config.enabled = true;
            if scheduler_config.clients.is_empty() {
                anyhow::bail!("no clients configured for scheduled sweeps");
            }

            let mut scheduler = EnumerationScheduler::new(
                service,
                scheduler_config,
                config.enumeration.clone(),
            );
            scheduler.start();

            tokio::signal::ctrl_c().await?;
            info!("shutdown signal received");
            scheduler.stop().await;
            Ok(())
        }
    }
}

fn init_tracing(cli: &Cli) {
    let level = if cli.debug {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    };

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(level.to_string())),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn service_for(config: &AppConfig) -> Result<Arc<SubfinderService>> {
    let store: Arc<dyn DomainStore> = if config.database.enabled {
        Arc::new(PostgresStore::connect(&config.database.storage()).await?)
    } else {
        warn!("database disabled - domain records held in memory only");
        Arc::new(MemoryStore::new())
    };
    Ok(Arc::new(SubfinderService::new(store)))
}

/// CLI flags override the configured defaults; untouched options stay
/// absent so subfinder keeps its own behavior.
fn merge_options(defaults: &EnumerationConfig, options: &ScanOptions) -> EnumerationConfig {
    let mut merged = defaults.clone();
    if options.sources.is_some() {
        merged.sources = options.sources.clone();
    }
    if options.all {
        merged.all_sources = Some(true);
    }
    if options.timeout.is_some() {
        merged.timeout = options.timeout;
    }
    if options.max_time.is_some() {
        merged.max_time = options.max_time;
    }
    if options.rate_limit.is_some() {
        merged.rate_limit = options.rate_limit;
    }
    if options.recursive {
        merged.recursive = Some(true);
    }
    merged
}

fn scan_context(config: &AppConfig, options: &ScanOptions) -> ScanContext {
    let deadline = options
        .deadline
        .unwrap_or(config.enumeration.scan_deadline_secs);
    if deadline > 0 {
        ScanContext::with_timeout(Duration::from_secs(deadline))
    } else {
        ScanContext::new()
    }
}

async fn report_outcome(
    service: &SubfinderService,
    client: &str,
    outcome: ScanOutcome,
    save: bool,
) -> Result<()> {
    match outcome {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            if save {
                let scan_id = Uuid::new_v4().to_string();
                let saved = service.save_results(client, &result, &scan_id).await?;
                info!(saved, scan_id = %scan_id, "results persisted");
            }
            Ok(())
        }
        Err(failed) => {
            println!("{}", serde_json::to_string_pretty(&failed.result)?);
            error!(error = %failed.error, "enumeration failed");
            std::process::exit(1);
        }
    }
}
