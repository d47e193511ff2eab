use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::Result;

/// Durable byte store with atomic per-key operations.
pub trait KvStore: Send + Sync {
	/// Value stored under `key`.
	fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

	/// Stores `value` under `key`, replacing any previous value.
	fn set(&self, key: &str, value: &[u8]) -> Result<()>;

	/// Whether anything is stored under `key`.
	fn contains(&self, key: &str) -> Result<bool> {
		Ok(self.get(key)?.is_some())
	}

	/// Deletes the value under `key`. Missing keys are not an error.
	fn remove(&self, key: &str) -> Result<()>;

	/// Wraps the store so every key gets `prefix` prepended.
	fn namespaced(self, prefix: impl Into<String>) -> Namespaced<Self>
	where
		Self: Sized,
	{
		Namespaced::new(self, prefix)
	}
}

impl<T: KvStore + ?Sized> KvStore for Arc<T> {
	fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
		(**self).get(key)
	}

	fn set(&self, key: &str, value: &[u8]) -> Result<()> {
		(**self).set(key, value)
	}

	fn contains(&self, key: &str) -> Result<bool> {
		(**self).contains(key)
	}

	fn remove(&self, key: &str) -> Result<()> {
		(**self).remove(key)
	}
}

/// In-process store; contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryStore {
	entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
	/// Creates an empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of stored keys.
	pub fn len(&self) -> usize {
		self.entries.read().len()
	}

	/// Whether the store is empty.
	pub fn is_empty(&self) -> bool {
		self.entries.read().is_empty()
	}
}

impl KvStore for MemoryStore {
	fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
		Ok(self.entries.read().get(key).cloned())
	}

	fn set(&self, key: &str, value: &[u8]) -> Result<()> {
		self.entries.write().insert(key.to_string(), value.to_vec());
		Ok(())
	}

	fn contains(&self, key: &str) -> Result<bool> {
		Ok(self.entries.read().contains_key(key))
	}

	fn remove(&self, key: &str) -> Result<()> {
		self.entries.write().remove(key);
		Ok(())
	}
}

/// A view of a store where every key carries a fixed prefix.
#[derive(Debug, Clone)]
pub struct Namespaced<S> {
	inner: S,
	prefix: String,
}

impl<S> Namespaced<S> {
	/// Wraps `inner`.
	pub fn new(inner: S, prefix: impl Into<String>) -> Self {
		Self {
			inner,
			prefix: prefix.into(),
		}
	}

	/// The key prefix.
	pub fn prefix(&self) -> &str {
		&self.prefix
	}

	/// The wrapped store.
	pub fn inner(&self) -> &S {
		&self.inner
	}

	fn key(&self, key: &str) -> String {
		format!("{}{key}", self.prefix)
	}
}

impl<S: KvStore> KvStore for Namespaced<S> {
	fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
		self.inner.get(&self.key(key))
	}

	fn set(&self, key: &str, value: &[u8]) -> Result<()> {
		self.inner.set(&self.key(key), value)
	}

	fn contains(&self, key: &str) -> Result<bool> {
		self.inner.contains(&self.key(key))
	}

	fn remove(&self, key: &str) -> Result<()> {
		self.inner.remove(&self.key(key))
	}
}

/// Typed access to a byte store, encoding values as JSON.
#[derive(Debug, Clone)]
pub struct JsonStore<S> {
	inner: S,
}

impl<S: KvStore> JsonStore<S> {
	/// Wraps `inner`.
	pub fn new(inner: S) -> Self {
		Self { inner }
	}

	/// Decodes the value under `key`.
	pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
		match self.inner.get(key)? {
			Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
			None => Ok(None),
		}
	}

	/// Encodes and stores `value` under `key`.
	pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
		let bytes = serde_json::to_vec(value)?;
		self.inner.set(key, &bytes)
	}

	/// Whether anything is stored under `key`.
	pub fn contains(&self, key: &str) -> Result<bool> {
		self.inner.contains(key)
	}

	/// Deletes the value under `key`.
	pub fn remove(&self, key: &str) -> Result<()> {
		self.inner.remove(key)
	}

	/// The wrapped store.
	pub fn inner(&self) -> &S {
		&self.inner
	}
}
