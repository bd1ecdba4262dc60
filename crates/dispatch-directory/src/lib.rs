//! Executor discovery: query the directory for candidates and score them
//! against a request's requirements.
//!
//! - [`model`] — `ExecutorSnapshot` and `QueryCriteria`.
//! - [`client`] — the pluggable `DirectoryClient` backend.
//! - [`scoring`] — the weighted fit score and tie-break ranking.
//! - [`discovery`] — `ExecutorDiscovery`, which rate-limits the outbound
//!   call and wraps it in the fallback chain.

pub mod client;
pub mod discovery;
pub mod error;
pub mod events;
pub mod model;
pub mod scoring;

pub use client::{DirectoryClient, InMemoryDirectoryClient};
pub use discovery::{DiscoveryConfig, ExecutorDiscovery};
pub use error::DirectoryError;
pub use events::DirectoryEvent;
pub use model::{DiscoveryResult, ExecutorSnapshot, QueryCriteria};
pub use scoring::{rank, score};
