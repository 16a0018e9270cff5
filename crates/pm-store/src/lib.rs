//! PM Store
//!
//! Document persistence for clients and projects. Redis is the primary
//! backend; `MemoryStore` serves tests and throwaway servers.

pub mod client;
pub mod keys;
pub mod memory;
pub mod queries;
pub mod store;

pub use client::{RedisPool, StoreError, StoreResult, init_pool};
pub use keys::KeySpace;
pub use memory::MemoryStore;
pub use queries::clients::{ClientRow, DeletedClient};
pub use queries::projects::{ProjectPatch, ProjectRow};
pub use store::{RecordStore, RedisStore};
