//! Network Module
//!
//! Socket ownership and the single-shot request cycle.
//!
//! ## Architecture
//! - One bound endpoint per server, fixed transport
//! - One request served per [`Server::listen`] call, no internal loop
//! - Connections and datagrams handled on the caller's thread

mod server;

pub use server::Server;
