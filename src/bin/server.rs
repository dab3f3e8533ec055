//! DomainKV Server Binary
//!
//! Starts the TCP server for DomainKV.

use std::sync::Arc;

use clap::Parser;
use domainkv::network::Server;
use domainkv::{Config, Store};
use tracing_subscriber::{fmt, EnvFilter};

/// DomainKV Server
#[derive(Parser, Debug)]
#[command(name = "domainkv-server")]
#[command(about = "Domain-partitioned in-memory key-value store")]
#[command(version)]
struct Args {
    /// Listen address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    listen: String,

    /// Maximum concurrent sessions
    #[arg(short, long, default_value = "1024")]
    max_connections: usize,

    /// Idle read timeout in milliseconds (0 = none)
    #[arg(long, default_value = "0")]
    read_timeout_ms: u64,

    /// Maximum request frame size in KB
    #[arg(long, default_value = "16384")]
    max_frame_kb: usize,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,domainkv=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("DomainKV Server v{}", domainkv::VERSION);
    tracing::info!("Listen address: {}", args.listen);

    let config = Config::builder()
        .listen_addr(&args.listen)
        .max_connections(args.max_connections)
        .read_timeout_ms(args.read_timeout_ms)
        .max_frame_size(args.max_frame_kb * 1024)
        .build();

    let store = Arc::new(Store::new());

    let server = match Server::bind(config, store) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to start server: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run() {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
