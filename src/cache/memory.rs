//! Thread-safe in-memory [`CacheClient`] for local development and tests.

// self
use crate::{
	_prelude::*,
	cache::{CacheClient, CacheEntry, CacheError, CacheFuture, EntryMap},
};

type CacheMap = Arc<RwLock<EntryMap>>;

/// Process-local cache that honors per-entry TTLs.
///
/// Expired entries are invisible to reads. They are dropped when a read touches them, swept
/// by the next write once any entry has expired, or purged via [`MemoryCache::purge_expired`].
#[derive(Clone, Debug, Default)]
pub struct MemoryCache(CacheMap);
impl MemoryCache {
	/// Number of live entries.
	pub fn len(&self) -> usize {
		let now = OffsetDateTime::now_utc();

		self.0.read().iter().filter(|(_, entry)| entry.is_live_at(now)).count()
	}

	/// Returns `true` if no live entries remain.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Returns `true` if a live entry exists under `key`.
	pub fn contains_key(&self, key: &str) -> bool {
		let now = OffsetDateTime::now_utc();

		self.0.read().get(key).is_some_and(|entry| entry.is_live_at(now))
	}

	/// Drops every expired entry and returns how many were removed.
	pub fn purge_expired(&self) -> usize {
		self.0.write().sweep_expired(OffsetDateTime::now_utc())
	}

	fn get_now(map: CacheMap, key: String, now: OffsetDateTime) -> Option<Vec<u8>> {
		match map.read().get(&key) {
			Some(entry) if entry.is_live_at(now) => return Some(entry.value.clone()),
			Some(_) => {},
			None => return None,
		}

		let mut guard = map.write();

		// Another writer may have replaced the entry between the two locks.
		if guard.get(&key).is_some_and(|entry| !entry.is_live_at(now)) {
			guard.remove(&key);
		}

		guard.get(&key).map(|entry| entry.value.clone())
	}

	fn set_now(
		map: CacheMap,
		key: String,
		value: Vec<u8>,
		ttl: Duration,
		now: OffsetDateTime,
	) -> Result<(), CacheError> {
		CacheError::ensure_positive_ttl(ttl)?;

		let mut guard = map.write();

		guard.sweep_expired(now);
		guard.insert(key, CacheEntry::new(value, ttl, now));

		Ok(())
	}

	fn take_now(map: CacheMap, key: String, now: OffsetDateTime) -> Option<Vec<u8>> {
		map.write().remove(&key).filter(|entry| entry.is_live_at(now)).map(|entry| entry.value)
	}
}
impl CacheClient for MemoryCache {
	fn get<'a>(&'a self, key: &'a str) -> CacheFuture<'a, Option<Vec<u8>>> {
		let map = self.0.clone();
		let key = key.to_owned();

		Box::pin(async move { Ok(Self::get_now(map, key, OffsetDateTime::now_utc())) })
	}

	fn set<'a>(&'a self, key: &'a str, value: Vec<u8>, ttl: Duration) -> CacheFuture<'a, ()> {
		let map = self.0.clone();
		let key = key.to_owned();

		Box::pin(async move { Self::set_now(map, key, value, ttl, OffsetDateTime::now_utc()) })
	}

	fn delete<'a>(&'a self, key: &'a str) -> CacheFuture<'a, ()> {
		let map = self.0.clone();
		let key = key.to_owned();

		Box::pin(async move {
			map.write().remove(&key);

			Ok(())
		})
	}

	fn take<'a>(&'a self, key: &'a str) -> CacheFuture<'a, Option<Vec<u8>>> {
		let map = self.0.clone();
		let key = key.to_owned();

		Box::pin(async move { Ok(Self::take_now(map, key, OffsetDateTime::now_utc())) })
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::time::Duration as StdDuration;
	// self
	use super::*;

	#[tokio::test]
	async fn set_get_delete_round_trip() {
		let cache = MemoryCache::default();

		cache.set("k", b"v".to_vec(), Duration::minutes(1)).await.expect("Set should succeed.");

		assert_eq!(cache.get("k").await.expect("Get should succeed."), Some(b"v".to_vec()));
		assert!(cache.contains_key("k"));

		cache.delete("k").await.expect("Delete should succeed.");
		cache.delete("k").await.expect("Deleting an absent key should succeed.");

		assert_eq!(cache.get("k").await.expect("Get should succeed."), None);
		assert!(cache.is_empty());
	}

	#[tokio::test]
	async fn entries_disappear_after_ttl() {
		let cache = MemoryCache::default();

		cache
			.set("short", b"v".to_vec(), Duration::milliseconds(50))
			.await
			.expect("Set should succeed.");
		cache.set("long", b"v".to_vec(), Duration::hours(1)).await.expect("Set should succeed.");
		tokio::time::sleep(StdDuration::from_millis(120)).await;

		assert_eq!(cache.get("short").await.expect("Get should succeed."), None);
		assert_eq!(cache.len(), 1);
		assert!(cache.contains_key("long"));
	}

	#[tokio::test]
	async fn purge_drops_only_expired_entries() {
		let cache = MemoryCache::default();

		cache
			.set("a", b"1".to_vec(), Duration::milliseconds(20))
			.await
			.expect("Set should succeed.");
		cache
			.set("b", b"2".to_vec(), Duration::milliseconds(20))
			.await
			.expect("Set should succeed.");
		cache.set("c", b"3".to_vec(), Duration::hours(1)).await.expect("Set should succeed.");
		tokio::time::sleep(StdDuration::from_millis(60)).await;

		assert_eq!(cache.purge_expired(), 2);
		assert_eq!(cache.purge_expired(), 0);
		assert_eq!(cache.len(), 1);
	}

	#[tokio::test]
	async fn writes_sweep_entries_that_expired_unread() {
		let cache = MemoryCache::default();

		for i in 0..1_000 {
			cache
				.set(&format!("stale_{i}"), b"v".to_vec(), Duration::milliseconds(5))
				.await
				.expect("Set should succeed.");
		}

		tokio::time::sleep(StdDuration::from_millis(30)).await;

		for i in 0..10 {
			cache
				.set(&format!("fresh_{i}"), b"v".to_vec(), Duration::hours(1))
				.await
				.expect("Set should succeed.");
		}

		assert_eq!(cache.len(), 10);
		assert_eq!(cache.0.read().len(), 10, "expired entries must not linger in the map");
	}

	#[tokio::test]
	async fn take_returns_value_once() {
		let cache = MemoryCache::default();

		cache.set("k", b"v".to_vec(), Duration::minutes(1)).await.expect("Set should succeed.");

		assert_eq!(cache.take("k").await.expect("Take should succeed."), Some(b"v".to_vec()));
		assert_eq!(cache.take("k").await.expect("Take should succeed."), None);
	}

	#[tokio::test]
	async fn zero_ttl_is_rejected() {
		let cache = MemoryCache::default();
		let err = cache
			.set("k", b"v".to_vec(), Duration::ZERO)
			.await
			.expect_err("Zero TTL must be rejected.");

		assert!(matches!(err, CacheError::Backend { .. }));
		assert!(!cache.contains_key("k"));
	}
}
