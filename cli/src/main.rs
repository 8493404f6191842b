//! ShareIt: CLI server
//!
//! Headless reservation service suitable for deployment as a systemd
//! service, Docker container, or standalone process.
//!
//! ```sh
//! # Run with default config (~/.config/shareit/config.toml)
//! shareit-service
//!
//! # Custom config path
//! shareit-service --config /etc/shareit/config.toml
//!
//! # Override the port, keep everything in memory
//! shareit-service --api-port 8080 --memory
//!
//! # Validate config without starting
//! shareit-service --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use shareit::config::{AppConfig, StorageBackend};
use shareit::server::{init_tracing, ServerHandle, ServerOptions};

/// ShareIt: item rental reservation service.
#[derive(Parser, Debug)]
#[command(
    name = "shareit-service",
    version,
    about = "Item rental reservation service",
    long_about = "ShareIt: REST API for listing items, reserving them and \
                  approving reservations.\n\n\
                  Default config: ~/.config/shareit/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "SHAREIT_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(long)]
    api_port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Use the in-memory store instead of the database.
    #[arg(long)]
    memory: bool,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(shareit::default_config_path);

    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) if cli.check => {
            eprintln!("Invalid configuration {}: {}", config_path.display(), e);
            std::process::exit(1);
        }
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config);
    match load_error {
        None => info!(path = %config_path.display(), "Configuration loaded"),
        Some(e) => error!(
            path = %config_path.display(),
            error = %e,
            "Failed to load config; using defaults"
        ),
    }

    if let Some(port) = cli.api_port {
        info!(port, "CLI override: api_port");
        config.server.api_port = port;
    }
    if cli.memory {
        info!("CLI override: in-memory storage");
        config.storage.backend = StorageBackend::Memory;
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}:{}", config.server.api_host, config.server.api_port);
        println!("   Storage     : {:?}", config.storage.backend);
        println!("   Database    : {}", config.database.connection_url());
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
    })
    .await?;

    handle.install_signal_handler();
    info!(port = handle.api_port, "Press Ctrl+C to shut down gracefully");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
