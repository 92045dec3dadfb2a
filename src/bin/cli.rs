//! wirekv CLI Client
//!
//! Command-line interface for a running wirekv server.

use clap::{Parser, Subcommand};
use serde_json::{Map, Value};
use wirekv::{Client, Transport};

/// wirekv CLI
#[derive(Parser, Debug)]
#[command(name = "wirekv-cli")]
#[command(about = "CLI for the wirekv key-value store")]
#[command(version)]
struct Args {
    /// Server host
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Server port
    #[arg(short, long, default_value = "4100")]
    port: u16,

    /// Transport: stream (TCP) or datagram (UDP)
    #[arg(short, long, default_value = "stream")]
    transport: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Merge a single key-value pair into the store
    Set {
        /// The key to set
        key: String,

        /// The value; parsed as JSON, otherwise taken as a string
        value: String,
    },

    /// Fetch and print the entire store
    Get,

    /// Remove every entry from the store
    Clear,
}

fn main() {
    let args = Args::parse();

    let transport: Transport = match args.transport.parse() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let client = Client::new(args.host, args.port, transport);

    let result = match args.command {
        Commands::Set { key, value } => {
            let value = serde_json::from_str(&value).unwrap_or(Value::String(value));
            let mut data = Map::new();
            data.insert(key, value);
            client.update(data)
        }
        Commands::Get => client.get().and_then(|store| {
            println!("{}", serde_json::to_string_pretty(&store)?);
            Ok(())
        }),
        Commands::Clear => client.clear(),
    };

    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
