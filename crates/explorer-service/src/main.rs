//! Main entry point for the intent explorer service.
//!
//! This binary wires the read-only registry and event-store gateways
//! into the assembler and settlement matcher, then serves the explorer
//! HTTP API. Each request is an independent unit of work; the service
//! holds no state beyond the stateless gateway clients built at startup.

use clap::Parser;
use explorer_config::Config;
use explorer_core::{IntentAssembler, SettlementMatcher};
use explorer_gateway::{
	EventStoreGateway, GraphqlEventStore, HttpRegistryGateway, RegistryGateway, RetryPolicy,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

mod apis;
mod server;

/// Command-line arguments for the explorer service.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config.toml")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,
}

/// Main entry point for the explorer service.
///
/// This function:
/// 1. Parses command-line arguments
/// 2. Initializes logging infrastructure
/// 3. Loads configuration from file
/// 4. Builds the gateways, assembler, and matcher
/// 5. Serves the HTTP API until interrupted
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	let default_directive = args.log_level.to_string();
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

	fmt()
		.with_env_filter(env_filter)
		.with_thread_ids(true)
		.with_target(true)
		.init();

	tracing::info!("Started intent explorer");

	let config = Config::from_file(&args.config)?;
	tracing::info!("Loaded configuration [{}]", config.explorer.id);

	let state = build_state(&config)?;

	let Some(api_config) = config.api.clone().filter(|api| api.enabled) else {
		tracing::warn!("API server disabled in configuration; nothing to serve");
		return Ok(());
	};

	server::start_server(api_config, state).await?;

	tracing::info!("Stopped intent explorer");
	Ok(())
}

/// Builds the shared application state from configuration.
///
/// Gateways are constructed once and injected into the assembler and
/// matcher, so tests can substitute in-memory doubles for both.
fn build_state(config: &Config) -> Result<server::AppState, Box<dyn std::error::Error>> {
	let registry: Arc<dyn RegistryGateway> = Arc::new(HttpRegistryGateway::new(
		&config.registry.url,
		Duration::from_secs(config.registry.timeout_seconds),
		RetryPolicy::with_max_elapsed_secs(config.registry.retry_max_elapsed_seconds),
	)?);

	let events: Arc<dyn EventStoreGateway> = Arc::new(GraphqlEventStore::new(
		&config.indexer.url,
		Duration::from_secs(config.indexer.timeout_seconds),
		RetryPolicy::with_max_elapsed_secs(config.indexer.retry_max_elapsed_seconds),
	)?);

	let assembler = Arc::new(IntentAssembler::new(registry, events.clone()));
	let matcher = Arc::new(SettlementMatcher::new(events, config.matcher.clone()));

	Ok(server::AppState { assembler, matcher })
}
