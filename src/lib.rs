//! # DomainKV
//!
//! A concurrent, in-memory key-value store with:
//! - Named domains, each an isolated namespace
//! - A flat string map per domain with integer increment/decrement
//! - Named skip list indexes per domain with O(log n) rank queries
//! - TCP-based request/response protocol
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      TCP Server                              │
//! │                  (Multiple Clients)                          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Store                                 │
//! │              (RwLock<name -> Arc<Domain>>)                   │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                       Domain                                 │
//! │                  (one RwLock each)                           │
//! └──────────┬───────────────────────────────┬──────────────────┘
//!            │                               │
//!            ▼                               ▼
//!   ┌─────────────────┐            ┌──────────────────┐
//!   │  String store   │            │ SkipList indexes │
//!   │ (HashMap)       │            │ (span tracking)  │
//!   └─────────────────┘            └──────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod index;
pub mod store;
pub mod network;
pub mod protocol;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{KvError, Result};
pub use config::Config;
pub use index::SkipList;
pub use store::{Domain, Store};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of DomainKV
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
