use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use lru::LruCache;
use parking_lot::Mutex;
use rustc_hash::FxHasher;
use tracing::trace;

/// Default number of entries kept by the root cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 20;

/// Default lifetime of a cached root.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(120);

/// Upper bound on the number of independently locked shards.
const SHARDS: usize = 4;

#[derive(Debug)]
struct Entry<V> {
	value: V,
	inserted: Instant,
	/// Global recency stamp; higher is more recent.
	touched: u64,
}

type Shard<V> = Mutex<LruCache<String, Entry<V>>>;

/// Bounded cache whose entries expire a fixed time after insertion.
///
/// Keys are spread over up to four shards, each an LRU behind its own lock, so lookups of keys
/// in different shards never contend. The capacity bounds the whole cache: once it is exceeded,
/// the least recently used entry across all shards is evicted. Reads do not extend an entry's
/// lifetime.
pub struct ExpiringCache<V> {
	shards: Box<[Shard<V>]>,
	ttl: Duration,
	capacity: usize,
	len: AtomicUsize,
	clock: AtomicU64,
}

impl<V: Clone> ExpiringCache<V> {
	/// Creates a cache holding at most `capacity` entries (at least 1) for `ttl` each.
	pub fn new(capacity: usize, ttl: Duration) -> Self {
		let capacity = capacity.max(1);
		let shards = (0..SHARDS.min(capacity)).map(|_| Mutex::new(LruCache::unbounded())).collect();
		Self {
			shards,
			ttl,
			capacity,
			len: AtomicUsize::new(0),
			clock: AtomicU64::new(0),
		}
	}

	/// Live value under `key`.
	pub fn get(&self, key: &str) -> Option<V> {
		self.get_at(key, Instant::now())
	}

	/// Inserts or replaces the value under `key`, restarting its lifetime.
	pub fn insert(&self, key: impl Into<String>, value: V) {
		self.insert_at(key.into(), value, Instant::now());
	}

	/// Removes and returns the value under `key`, expired or not.
	pub fn remove(&self, key: &str) -> Option<V> {
		let entry = self.shard(key).lock().pop(key)?;
		self.len.fetch_sub(1, Ordering::Relaxed);
		Some(entry.value)
	}

	/// Number of held entries, including expired ones not yet purged.
	pub fn len(&self) -> usize {
		self.shards.iter().map(|shard| shard.lock().len()).sum()
	}

	/// Whether no entries are held.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Maximum number of entries.
	pub fn capacity(&self) -> usize {
		self.capacity
	}

	/// Entry lifetime.
	pub fn ttl(&self) -> Duration {
		self.ttl
	}

	pub(crate) fn get_at(&self, key: &str, now: Instant) -> Option<V> {
		let mut shard = self.shard(key).lock();
		let expired = shard.peek(key).map(|entry| now.saturating_duration_since(entry.inserted) >= self.ttl)?;
		if expired {
			shard.pop(key);
			self.len.fetch_sub(1, Ordering::Relaxed);
			return None;
		}
		let touched = self.tick();
		shard.get_mut(key).map(|entry| {
			entry.touched = touched;
			entry.value.clone()
		})
	}

	pub(crate) fn insert_at(&self, key: String, value: V, now: Instant) {
		let touched = self.tick();
		let replaced = self.shard(&key).lock().put(key, Entry { value, inserted: now, touched });
		if replaced.is_none() && self.len.fetch_add(1, Ordering::Relaxed) >= self.capacity {
			self.evict_oldest();
		}
	}

	/// Evicts the globally least recently used entry.
	///
	/// Shards are locked one at a time; if the chosen victim was touched in between, the scan
	/// starts over.
	fn evict_oldest(&self) {
		loop {
			let victim = self
				.shards
				.iter()
				.enumerate()
				.filter_map(|(i, shard)| shard.lock().peek_lru().map(|(_, entry)| (entry.touched, i)))
				.min();
			let Some((touched, index)) = victim else {
				return;
			};
			let mut shard = self.shards[index].lock();
			if shard.peek_lru().is_some_and(|(_, entry)| entry.touched == touched) {
				if let Some((key, _)) = shard.pop_lru() {
					trace!(key = %key, "evicted cache entry");
				}
				self.len.fetch_sub(1, Ordering::Relaxed);
				return;
			}
		}
	}

	fn tick(&self) -> u64 {
		self.clock.fetch_add(1, Ordering::Relaxed)
	}

	fn shard(&self, key: &str) -> &Shard<V> {
		let mut hasher = FxHasher::default();
		key.hash(&mut hasher);
		let index = (hasher.finish() % self.shards.len() as u64) as usize;
		&self.shards[index]
	}
}

impl<V> std::fmt::Debug for ExpiringCache<V> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ExpiringCache")
			.field("shards", &self.shards.len())
			.field("capacity", &self.capacity)
			.field("ttl", &self.ttl)
			.finish()
	}
}
