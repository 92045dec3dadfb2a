//! wirekv Server Binary
//!
//! Binds a store server and serves requests until killed.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};
use wirekv::{Server, Transport};

/// wirekv Server
#[derive(Parser, Debug)]
#[command(name = "wirekv-server")]
#[command(about = "Minimal in-memory key-value store server")]
#[command(version)]
struct Args {
    /// Port to listen on (binds all interfaces)
    #[arg(short, long, default_value = "4100")]
    port: u16,

    /// Transport to serve: stream (TCP) or datagram (UDP)
    #[arg(short, long, default_value = "stream")]
    transport: String,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,wirekv=debug"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    let transport: Transport = match args.transport.parse() {
        Ok(t) => t,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    };

    let mut server = match Server::bind(args.port, transport) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("failed to bind {transport} server on port {}: {e}", args.port);
            std::process::exit(1);
        }
    };

    tracing::info!(
        "wirekv v{} serving {transport} on port {}",
        wirekv::VERSION,
        args.port
    );

    // the library serves one request per call; the loop lives here
    loop {
        if let Err(e) = server.listen() {
            tracing::error!("request cycle failed: {e}");
        }
    }
}
