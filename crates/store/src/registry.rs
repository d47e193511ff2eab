use std::sync::Arc;

use tracing::debug;
use trellis_tree::{Node, RootKey};

use crate::cache::ExpiringCache;
use crate::kv::{JsonStore, KvStore};
use crate::{Error, Result};

/// Two-tier registry of tree roots.
///
/// Every root is written to the durable store and to the fast cache. Lookups try the cache
/// first and fall back to the durable store, re-populating the cache on the way out. No lock is
/// held while the durable store is accessed, so two concurrent misses on one key may both load
/// it; the second cache insert simply overwrites the first.
pub struct RootRegistry<S> {
	durable: JsonStore<S>,
	cache: ExpiringCache<Arc<Node>>,
}

impl<S: KvStore> RootRegistry<S> {
	/// Creates a registry over `store` with an explicitly constructed cache.
	pub fn new(store: S, cache: ExpiringCache<Arc<Node>>) -> Self {
		Self {
			durable: JsonStore::new(store),
			cache,
		}
	}

	/// Registers `root` under a fresh key.
	pub fn insert(&self, root: Node) -> Result<(RootKey, Arc<Node>)> {
		let key = RootKey::generate();
		let root = self.insert_with_key(&key, root)?;
		Ok((key, root))
	}

	/// Registers `root` under `key`, replacing any previous root.
	pub fn insert_with_key(&self, key: &RootKey, root: Node) -> Result<Arc<Node>> {
		self.durable.set(key.as_str(), &root)?;
		let root = Arc::new(root);
		self.cache.insert(key.as_str(), Arc::clone(&root));
		debug!(root_key = %key, "registered root");
		Ok(root)
	}

	/// Root registered under `key`.
	pub fn get(&self, key: &RootKey) -> Result<Arc<Node>> {
		if let Some(root) = self.cache.get(key.as_str()) {
			return Ok(root);
		}
		debug!(root_key = %key, "root cache miss");
		let root: Node = self.durable.get(key.as_str())?.ok_or_else(|| Error::NotFound(key.to_string()))?;
		let root = Arc::new(root);
		self.cache.insert(key.as_str(), Arc::clone(&root));
		Ok(root)
	}

	/// Whether a root is registered under `key`.
	pub fn contains(&self, key: &RootKey) -> Result<bool> {
		if self.cache.get(key.as_str()).is_some() {
			return Ok(true);
		}
		self.durable.contains(key.as_str())
	}

	/// The fast tier.
	pub fn cache(&self) -> &ExpiringCache<Arc<Node>> {
		&self.cache
	}

	/// The durable tier.
	pub fn durable(&self) -> &JsonStore<S> {
		&self.durable
	}
}

impl<S> std::fmt::Debug for RootRegistry<S> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RootRegistry").field("cache", &self.cache).finish_non_exhaustive()
	}
}
