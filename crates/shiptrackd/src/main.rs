//! Shiptrack daemon
//!
//! Serves seller shipment summaries over HTTP and exposes the same queries
//! on the command line.
//!
//! ## Commands
//!
//! - `serve`: run the HTTP server
//! - `analytics`, `stats`, `alerts`: run one query and print the response body
//! - `seed`: load a JSON fixture into the configured store

mod http;
mod seed;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use shipment_store::{SellerId, ShipmentGateway, SurrealShipmentStore};
use shiptrack_core::{Operation, QueryService};
use tracing::{info, warn, Level};

use crate::http::SharedService;
use crate::seed::Fixture;

#[derive(Parser)]
#[command(name = "shiptrackd")]
#[command(author = "Shiptrack Maintainers")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Seller shipment summaries service", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Address to listen on
        #[arg(long, env = "SHIPTRACK_BIND", default_value = "127.0.0.1:5000")]
        bind: String,

        /// Number of HTTP worker threads (default: one per core)
        #[arg(long, env = "SHIPTRACK_WORKERS")]
        workers: Option<usize>,
    },

    /// Monthly shipment volume for a seller
    Analytics {
        #[arg(short, long)]
        seller: String,
    },

    /// Total, pending and completed counts for a seller
    Stats {
        #[arg(short, long)]
        seller: String,
    },

    /// Pending-shipment warnings for a seller
    Alerts {
        #[arg(short, long)]
        seller: String,
    },

    /// Load sellers and shipments from a JSON fixture
    Seed {
        /// Path to fixture file
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    shiptrack_core::init_tracing(cli.json, level);

    let store = SurrealShipmentStore::from_env()
        .await
        .context("Failed to connect to shipment store")?;

    match cli.command {
        Commands::Serve { bind, workers } => cmd_serve(store, &bind, workers).await,
        Commands::Analytics { seller } => cmd_query(store, Operation::Analytics, &seller).await,
        Commands::Stats { seller } => cmd_query(store, Operation::Stats, &seller).await,
        Commands::Alerts { seller } => cmd_query(store, Operation::Alerts, &seller).await,
        Commands::Seed { file } => cmd_seed(&store, &file).await,
    }
}

fn query_service(store: SurrealShipmentStore) -> SharedService {
    let gateway: Arc<dyn ShipmentGateway> = Arc::new(store);
    QueryService::new(gateway)
}

async fn cmd_serve(store: SurrealShipmentStore, bind: &str, workers: Option<usize>) -> Result<()> {
    let service = query_service(store);
    http::serve(service, bind, workers)
        .await
        .with_context(|| format!("HTTP server on {bind} failed"))?;
    info!("shiptrackd stopped");
    Ok(())
}

async fn cmd_query(store: SurrealShipmentStore, operation: Operation, seller: &str) -> Result<()> {
    run_query(&query_service(store), operation, seller).await
}

/// Print the response body for one query; a non-2xx reply is an error.
///
/// The seller lookup only feeds a warning. Its failure is logged and the
/// query still runs, so store errors surface as the usual 500 body.
async fn run_query(service: &SharedService, operation: Operation, seller: &str) -> Result<()> {
    let seller_id = SellerId::from(seller.trim());
    if !seller_id.as_str().is_empty() {
        match service.gateway().find_seller(&seller_id).await {
            Ok(Some(_)) => {}
            Ok(None) => warn!(seller_id = %seller_id, "no seller profile found; results may be empty"),
            Err(err) => warn!(seller_id = %seller_id, error = %err, "seller lookup failed"),
        }
    }

    let reply = service.handle(operation, Some(seller)).await;
    println!("{}", serde_json::to_string_pretty(&reply.body)?);

    if !reply.is_success() {
        bail!("{operation} query failed with status {}", reply.status);
    }
    Ok(())
}

async fn cmd_seed(store: &SurrealShipmentStore, file: &std::path::Path) -> Result<()> {
    let fixture = Fixture::load(file)?;
    fixture.apply(store).await?;
    println!(
        "Seeded {} sellers and {} shipments from {}",
        fixture.sellers.len(),
        fixture.shipments.len(),
        file.display()
    );
    Ok(())
}
