use std::path::PathBuf;
use std::sync::Arc;

use babbler::api::{self, AppState};
use babbler::chain::{self, ChainSet};
use babbler::config::Config;
use babbler::metrics;
use babbler::stats::Stats;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = Config::load();
    if config.corpus_files.is_empty() {
        tracing::error!("No corpus files configured, nothing to serve");
        std::process::exit(1);
    }
    metrics::register_metrics();

    let chains = ChainSet::new();
    let stats = Arc::new(Stats::new());

    // Corpus loading runs in the background; requests arriving before it
    // finishes get the retryable not-ready response.
    spawn_chain_loader(chains.clone(), config.corpus_files.clone());

    let app = api::router(AppState { chains, stats });

    let addr = format!("{}:{}", config.bind_addr, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind to {addr}: {e}"));

    tracing::info!("Babbler listening on {addr}");
    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}

/// Load every corpus file off the async runtime, then publish the set.
/// Any malformed corpus aborts the process: a chain that failed integrity
/// checks must never reach the serving path.
fn spawn_chain_loader(chains: ChainSet, files: Vec<PathBuf>) {
    tokio::task::spawn_blocking(move || {
        tracing::info!("[*] Loading files");

        let mut loaded = Vec::new();
        for path in &files {
            let timer = metrics::CHAIN_LOAD_SECONDS.start_timer();
            match chain::load_file(path) {
                Ok(graph) => {
                    timer.observe_duration();
                    loaded.push(graph);
                }
                Err(e) => {
                    tracing::error!("Failed to load corpus: {e}");
                    std::process::exit(1);
                }
            }
        }

        metrics::CHAINS_LOADED.set(loaded.len() as i64);
        chains.publish(loaded);
        tracing::info!("[*] Chains ready, serving garbage");
    });
}
