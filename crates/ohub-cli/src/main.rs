//! ohub CLI entry point.
//!
//! This binary is intentionally thin: it loads layered configuration, builds
//! the order repository, runs a load pass, and renders query results. All
//! domain logic lives in the library crates.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

use ohub_config::{load_layered_yaml, SourcePaths};
use ohub_schemas::{CanonicalStatus, PresentationOrder};
use ohub_store::{OrderRepository, SearchFilter};

#[derive(Parser)]
#[command(name = "ohub")]
#[command(about = "Order hub CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a full load and print the load report
    Load {
        /// Layered config paths in merge order (base -> env -> site)
        #[arg(long = "config", required = true)]
        config_paths: Vec<String>,
    },

    /// Print every canonical order as JSON lines
    Orders {
        #[arg(long = "config", required = true)]
        config_paths: Vec<String>,
    },

    /// Look up one order by id (first match in collection order)
    Order {
        #[arg(long)]
        id: String,

        #[arg(long = "config", required = true)]
        config_paths: Vec<String>,
    },

    /// Search orders by status and/or inclusive date range
    Search {
        /// Canonical status name (case-insensitive)
        #[arg(long)]
        status: Option<String>,

        /// Inclusive range start (YYYY-MM-DD); applied only with --end
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Inclusive range end (YYYY-MM-DD); applied only with --start
        #[arg(long)]
        end: Option<NaiveDate>,

        #[arg(long = "config", required = true)]
        config_paths: Vec<String>,
    },

    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

fn main() -> Result<()> {
    // Load .env.local if present (dev convenience). Silent if the file does
    // not exist; production injects env vars directly.
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let cli = Cli::parse();
    match cli.cmd {
        Commands::Load { config_paths } => cmd_load(&config_paths),
        Commands::Orders { config_paths } => cmd_orders(&config_paths),
        Commands::Order { id, config_paths } => cmd_order(&config_paths, &id),
        Commands::Search {
            status,
            start,
            end,
            config_paths,
        } => cmd_search(&config_paths, status, start, end),
        Commands::ConfigHash { paths } => cmd_config_hash(&paths),
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}

/// Build the repository from layered config.
fn build_repository(config_paths: &[String]) -> Result<OrderRepository> {
    let path_refs: Vec<&str> = config_paths.iter().map(|s| s.as_str()).collect();
    let cfg = load_layered_yaml(&path_refs).context("load layered config")?;
    info!(config_hash = %cfg.config_hash, "config loaded");

    let sources = SourcePaths::from_config(&cfg.config_json).context("resolve source paths")?;
    Ok(OrderRepository::new(sources.system_a, sources.system_b))
}

/// Load for a query command: a structural failure in one source is reported
/// but does not abort the query; the surviving records are served.
fn load_tolerant(repo: &OrderRepository) {
    if let Err(err) = repo.load() {
        error!(%err, "load completed with source failures; serving surviving records");
    }
}

fn cmd_load(config_paths: &[String]) -> Result<()> {
    let repo = build_repository(config_paths)?;
    let report = repo.load()?;
    println!("{report}");
    Ok(())
}

fn cmd_orders(config_paths: &[String]) -> Result<()> {
    let repo = build_repository(config_paths)?;
    load_tolerant(&repo);
    for order in repo.get_all().iter() {
        println!("{}", serde_json::to_string(&PresentationOrder::from(order))?);
    }
    Ok(())
}

fn cmd_order(config_paths: &[String], id: &str) -> Result<()> {
    let repo = build_repository(config_paths)?;
    load_tolerant(&repo);
    // Not-found is an ordinary empty outcome, not a failure.
    match repo.get_by_id(id) {
        Some(order) => println!("{}", serde_json::to_string(&PresentationOrder::from(&order))?),
        None => println!("order '{id}' not found"),
    }
    Ok(())
}

fn cmd_search(
    config_paths: &[String],
    status: Option<String>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<()> {
    if let Some(s) = status.as_deref() {
        if CanonicalStatus::from_name_ci(s).is_none() {
            warn!(status = s, "not a canonical status name; search will match nothing");
        }
    }

    let repo = build_repository(config_paths)?;
    load_tolerant(&repo);

    let filter = SearchFilter {
        status,
        start_date: start,
        end_date: end,
    };
    for order in repo.search(&filter) {
        println!("{}", serde_json::to_string(&PresentationOrder::from(&order))?);
    }
    Ok(())
}

fn cmd_config_hash(paths: &[String]) -> Result<()> {
    let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
    let cfg = load_layered_yaml(&path_refs)?;
    println!("{}", cfg.config_hash);
    println!("{}", cfg.canonical_json);
    Ok(())
}
