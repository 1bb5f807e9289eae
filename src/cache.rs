//! Key-value cache contract consumed by the credential adapters, plus built-in backends.

pub mod file;
pub mod memory;
#[cfg(feature = "redis")] pub mod redis;

pub use file::FileCache;
pub use memory::MemoryCache;
#[cfg(feature = "redis")] pub use self::redis::RedisCache;

// self
use crate::_prelude::*;

/// Boxed future returned by [`CacheClient`] operations.
pub type CacheFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, CacheError>> + 'a + Send>>;

/// Minimal key-value store with per-entry TTL.
///
/// Implementations must make each single-key operation atomic; the adapters add no locking
/// of their own.
pub trait CacheClient
where
	Self: Send + Sync,
{
	/// Fetches the live value stored under `key`, if any.
	fn get<'a>(&'a self, key: &'a str) -> CacheFuture<'a, Option<Vec<u8>>>;

	/// Stores `value` under `key`, replacing any previous value, evicting it after `ttl`.
	fn set<'a>(&'a self, key: &'a str, value: Vec<u8>, ttl: Duration) -> CacheFuture<'a, ()>;

	/// Removes `key`. Deleting an absent key is not an error.
	fn delete<'a>(&'a self, key: &'a str) -> CacheFuture<'a, ()>;

	/// Atomically fetches and removes the live value stored under `key`.
	fn take<'a>(&'a self, key: &'a str) -> CacheFuture<'a, Option<Vec<u8>>>;
}

/// Error type produced by [`CacheClient`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum CacheError {
	/// Serialization failures surfaced while encoding or decoding entries.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the cache engine (I/O, timeout, protocol).
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
impl CacheError {
	/// Rejects TTLs that would store an already-expired entry.
	pub fn ensure_positive_ttl(ttl: Duration) -> Result<(), Self> {
		if ttl.is_positive() {
			Ok(())
		} else {
			Err(Self::Backend { message: format!("TTL must be positive, got {ttl}") })
		}
	}
}

/// Value plus absolute expiry instant, as kept by the in-process backends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
	/// Raw stored bytes.
	pub value: Vec<u8>,
	/// Instant after which the entry is treated as evicted.
	pub expires_at: OffsetDateTime,
}
impl CacheEntry {
	/// Creates an entry that expires `ttl` after `now`.
	pub fn new(value: Vec<u8>, ttl: Duration, now: OffsetDateTime) -> Self {
		Self { value, expires_at: now.saturating_add(ttl) }
	}

	/// Returns `true` while the entry has not reached its expiry instant.
	pub fn is_live_at(&self, instant: OffsetDateTime) -> bool {
		instant < self.expires_at
	}
}

/// Entries held by the in-process backends, tracking the earliest expiry so writes can sweep
/// dead entries without scanning a map that holds none.
#[derive(Clone, Debug, Default)]
pub(crate) struct EntryMap {
	entries: HashMap<String, CacheEntry>,
	// Lower bound; removals may leave it earlier than the true minimum.
	next_expiry: Option<OffsetDateTime>,
}
impl EntryMap {
	pub(crate) fn len(&self) -> usize {
		self.entries.len()
	}

	pub(crate) fn get(&self, key: &str) -> Option<&CacheEntry> {
		self.entries.get(key)
	}

	pub(crate) fn iter(&self) -> impl Iterator<Item = (&String, &CacheEntry)> {
		self.entries.iter()
	}

	pub(crate) fn insert(&mut self, key: String, entry: CacheEntry) -> Option<CacheEntry> {
		self.next_expiry = Some(match self.next_expiry {
			Some(at) => at.min(entry.expires_at),
			None => entry.expires_at,
		});

		self.entries.insert(key, entry)
	}

	pub(crate) fn remove(&mut self, key: &str) -> Option<CacheEntry> {
		self.entries.remove(key)
	}

	/// Drops every entry expired at `now` and returns how many were removed.
	pub(crate) fn sweep_expired(&mut self, now: OffsetDateTime) -> usize {
		if self.next_expiry.is_none_or(|at| now < at) {
			return 0;
		}

		let before = self.entries.len();

		self.entries.retain(|_, entry| entry.is_live_at(now));
		self.next_expiry = self.entries.values().map(|entry| entry.expires_at).min();

		before - self.entries.len()
	}
}
impl FromIterator<(String, CacheEntry)> for EntryMap {
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = (String, CacheEntry)>,
	{
		let mut map = Self::default();

		for (key, entry) in iter {
			map.insert(key, entry);
		}

		map
	}
}
