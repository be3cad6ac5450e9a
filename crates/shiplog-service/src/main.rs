//! Main entry point for the shiplog service.
//!
//! This binary serves the order-tracking API: two JSON endpoints backed by
//! a pluggable Order Store. It loads a TOML configuration, constructs the
//! configured storage backend, and runs the HTTP server until interrupted.

use clap::Parser;
use shiplog_config::Config;
use shiplog_storage::{OrderStore, StoreFactory};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

mod apis;
mod server;

/// Configuration path tried when none is given on the command line.
const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Command-line arguments for the shiplog service.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file (when omitted, config.toml is used if
	/// present, otherwise built-in defaults)
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,
}

/// Main entry point for the shiplog service.
///
/// This function:
/// 1. Parses command-line arguments
/// 2. Initializes logging infrastructure
/// 3. Loads configuration from file
/// 4. Constructs the configured Order Store backend
/// 5. Serves the API until interrupted
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	// Create env filter with default from args
	let default_directive = args.log_level.to_string();
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

	fmt().with_env_filter(env_filter).with_target(true).init();

	tracing::info!("Started shiplog");

	// Load configuration
	let config = load_config(args.config.as_deref()).await?;
	tracing::info!("Using storage backend [{}]", config.storage.backend);

	let store = build_store(&config)?;

	server::start_server(config.server, store).await?;

	tracing::info!("Stopped shiplog");
	Ok(())
}

/// Loads the service configuration.
///
/// An explicitly passed path must load; a missing or unreadable file is
/// fatal. Only when no path was given does the service try the default
/// path and fall back to built-in defaults if it does not exist.
async fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
	match path {
		Some(path) => {
			let path = path
				.to_str()
				.ok_or("config path is not valid UTF-8")?;
			Ok(Config::from_file_async(path).await?)
		}
		None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
			Ok(Config::from_file_async(DEFAULT_CONFIG_PATH).await?)
		}
		None => {
			tracing::warn!(
				"Config file {} not found, using defaults",
				DEFAULT_CONFIG_PATH
			);
			Ok(Config::default())
		}
	}
}

/// Constructs the Order Store named by the configuration.
///
/// Backends register themselves as (name, factory) pairs; the configured
/// backend's TOML table is handed to its factory.
fn build_store(config: &Config) -> Result<Arc<dyn OrderStore>, Box<dyn std::error::Error>> {
	let factories: HashMap<&str, StoreFactory> =
		shiplog_storage::get_all_implementations().into_iter().collect();

	let factory = factories
		.get(config.storage.backend.as_str())
		.ok_or_else(|| format!("Unknown storage backend: {}", config.storage.backend))?;

	let store = factory(&config.storage.backend_config())?;
	Ok(Arc::from(store))
}
