//! Startup entry point: waits for the search engine and provisions the posts
//! index, exiting non-zero if the engine never becomes reachable.

use std::env;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use feed_search::{Dependencies, FeedSearchError};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json")) {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn run() -> Result<(), FeedSearchError> {
    let deps = Dependencies::from_env()?;

    deps.search.wait_until_ready().await?;

    let health = deps.search.check_connection().await?;
    info!(
        cluster = %health.cluster_name,
        status = ?health.status,
        nodes = health.number_of_nodes,
        index = %deps.search.settings().index_name,
        "Search index ready"
    );

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Search startup failed");
            ExitCode::FAILURE
        }
    }
}
