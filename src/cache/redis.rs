//! Redis-backed [`CacheClient`] for shared, multi-node deployments.

// crates.io
use ::redis::{Client, RedisError, aio::ConnectionManager};
// self
use crate::{
	_prelude::*,
	cache::{CacheClient, CacheError, CacheFuture},
};

/// Cache client speaking to Redis through a reconnecting [`ConnectionManager`].
///
/// Entries are written with `SET key value EX ttl`, so Redis owns eviction. [`CacheClient::take`]
/// maps to `GETDEL`, which requires Redis 6.2 or newer.
#[derive(Clone)]
pub struct RedisCache {
	conn: ConnectionManager,
}
impl RedisCache {
	/// Connects to the Redis server at `url` (e.g., `redis://127.0.0.1/`).
	pub async fn connect(url: &str) -> Result<Self, CacheError> {
		let client = Client::open(url).map_err(backend("open client"))?;
		let conn = client.get_connection_manager().await.map_err(backend("connect"))?;

		Ok(Self { conn })
	}

	/// Wraps an existing connection manager.
	pub fn with_connection_manager(conn: ConnectionManager) -> Self {
		Self { conn }
	}

	/// Redis expiries are whole seconds; partial seconds round up so entries never expire early.
	fn ttl_seconds(ttl: Duration) -> Result<u64, CacheError> {
		CacheError::ensure_positive_ttl(ttl)?;

		let whole = ttl.whole_seconds().unsigned_abs();

		Ok(if ttl.subsec_nanoseconds() > 0 { whole + 1 } else { whole })
	}
}
impl CacheClient for RedisCache {
	fn get<'a>(&'a self, key: &'a str) -> CacheFuture<'a, Option<Vec<u8>>> {
		Box::pin(async move {
			let mut conn = self.conn.clone();

			::redis::cmd("GET")
				.arg(key)
				.query_async::<_, Option<Vec<u8>>>(&mut conn)
				.await
				.map_err(backend("GET"))
		})
	}

	fn set<'a>(&'a self, key: &'a str, value: Vec<u8>, ttl: Duration) -> CacheFuture<'a, ()> {
		Box::pin(async move {
			let seconds = Self::ttl_seconds(ttl)?;
			let mut conn = self.conn.clone();

			::redis::cmd("SET")
				.arg(key)
				.arg(value)
				.arg("EX")
				.arg(seconds)
				.query_async::<_, ()>(&mut conn)
				.await
				.map_err(backend("SET"))
		})
	}

	fn delete<'a>(&'a self, key: &'a str) -> CacheFuture<'a, ()> {
		Box::pin(async move {
			let mut conn = self.conn.clone();

			::redis::cmd("DEL")
				.arg(key)
				.query_async::<_, i64>(&mut conn)
				.await
				.map(|_| ())
				.map_err(backend("DEL"))
		})
	}

	fn take<'a>(&'a self, key: &'a str) -> CacheFuture<'a, Option<Vec<u8>>> {
		Box::pin(async move {
			let mut conn = self.conn.clone();

			::redis::cmd("GETDEL")
				.arg(key)
				.query_async::<_, Option<Vec<u8>>>(&mut conn)
				.await
				.map_err(backend("GETDEL"))
		})
	}
}
impl Debug for RedisCache {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("RedisCache(..)")
	}
}

fn backend(action: &'static str) -> impl Fn(RedisError) -> CacheError {
	move |e| CacheError::Backend { message: format!("Redis {action} failed: {e}") }
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn ttl_rounds_up_to_whole_seconds() {
		assert_eq!(RedisCache::ttl_seconds(Duration::seconds(3600)), Ok(3600));
		assert_eq!(RedisCache::ttl_seconds(Duration::milliseconds(1500)), Ok(2));
		assert_eq!(RedisCache::ttl_seconds(Duration::milliseconds(1)), Ok(1));
		assert!(RedisCache::ttl_seconds(Duration::ZERO).is_err());
	}
}
