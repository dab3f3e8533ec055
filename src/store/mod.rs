//! Store Module
//!
//! Named domains and the façade that routes typed operations to them.
//!
//! ## Concurrency Model
//! - `Store` guards its name -> domain map with its own `RwLock`; lookups
//!   clone an `Arc<Domain>` and release the map lock immediately
//! - Each `Domain` guards its string map and its indexes with one `RwLock`
//! - Reads take the shared lock, mutations take the exclusive lock
//! - No operation ever holds two domain locks, so there is no lock ordering

mod domain;
mod registry;

pub use domain::Domain;
pub use registry::Store;
