//! Network Module
//!
//! TCP server and client handling.
//!
//! ## Architecture
//! - Single acceptor thread
//! - One thread per session, capped by `max_connections`
//! - Shutdown closes open sessions and waits on a crossbeam `WaitGroup`
//! - Requests routed through the shared Store

mod client;
mod connection;
mod server;

pub use client::Client;
pub use connection::Connection;
pub use server::{Server, ShutdownHandle};
