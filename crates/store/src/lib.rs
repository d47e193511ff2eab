//! Persistence for registered trees.
//!
//! Trees live in two tiers: a durable [`KvStore`] holding every registered root as JSON, and a
//! small [`ExpiringCache`] in front of it for the roots currently being clicked through.
//! [`RootRegistry`] ties the two together.

mod cache;
mod error;
mod file;
mod kv;
mod registry;

pub use cache::{DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL, ExpiringCache};
pub use error::{Error, Result};
pub use file::FileStore;
pub use kv::{JsonStore, KvStore, MemoryStore, Namespaced};
pub use registry::RootRegistry;
