//! ohub-store
//!
//! The order repository: load orchestration over the configured source
//! readers and the read-only query surface over the published collection.

pub mod repository;
pub mod types;

pub use repository::{OrderRepository, ConfiguredSource};
pub use types::{LoadError, SearchFilter, SourceFailure};
