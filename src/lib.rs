//! # wirekv
//!
//! A minimal in-memory key-value store served over TCP or UDP:
//! - JSON wire format, length-prefixed on the stream transport
//! - single-shot synchronous request cycle (one request per `listen` call)
//! - one-shot clients with no connection reuse
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────┐  encode    ┌───────────────┐   decode   ┌──────────┐
//! │  Client  ├───────────▶│ Wire Protocol │───────────▶│  Server  │
//! └────▲─────┘            └───────────────┘            └────┬─────┘
//!      │                                                    │ dispatch
//!      │                  ┌───────────────┐                 ▼
//!      └──────────────────┤  `get` reply  │◀───────────┌──────────┐
//!                         └───────────────┘            │  Store   │
//!                                                      └──────────┘
//! ```
//!
//! The server owns its [`Store`] as a plain field, so independent
//! servers coexist without shared state. Both ends are synchronous and
//! blocking; sustained service is a caller loop over
//! [`Server::listen`].

// =============================================================================
// Module Declarations
// =============================================================================

pub mod client;
pub mod config;
pub mod error;
pub mod network;
pub mod protocol;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use client::Client;
pub use config::Transport;
pub use error::{KvError, Result};
pub use network::Server;
pub use store::Store;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of wirekv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
