//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.

mod error;
mod object_store;

pub use error::{ObjectStoreError, ObjectStoreResult};
pub use object_store::ObjectStorePort;
