use clap::Parser;
use std::sync::Arc;
use tracing::info;

use crm_core::ops::LowStockPolicy;
use crm_core::storage::{InMemoryStorage, Storage};
use crm_graphql::server;

#[derive(Parser)]
#[command(name = "crm-graphql")]
#[command(about = "GraphQL API server for the CRM backend")]
#[command(version = "0.1.0")]
struct Cli {
    /// Port to run the server on
    #[arg(short, long, default_value = "8000")]
    port: u16,

    /// Products with stock below this are restocked by the low-stock mutation
    #[arg(long, default_value = "10")]
    low_stock_threshold: i32,

    /// How many units each low-stock product gains on restock
    #[arg(long, default_value = "10")]
    restock_amount: i32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt::init();

    println!("🚀 Starting CRM GraphQL API server on port {}...", cli.port);

    info!("Initializing in-memory storage...");
    let storage: Arc<dyn Storage> = Arc::new(InMemoryStorage::new());

    let low_stock_policy = LowStockPolicy {
        threshold: cli.low_stock_threshold,
        restock_amount: cli.restock_amount,
    };
    info!(
        "Low-stock policy: threshold {}, restock by {}",
        low_stock_policy.threshold, low_stock_policy.restock_amount
    );

    println!("📡 Server endpoints:");
    println!("   GraphQL API: http://localhost:{}/graphql", cli.port);
    println!("   GraphiQL UI: http://localhost:{}/graphiql", cli.port);
    println!("   Health check: http://localhost:{}/health", cli.port);
    println!();

    // Start the server
    server::start_server(storage, low_stock_policy, cli.port).await?;

    Ok(())
}
