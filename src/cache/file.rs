//! Simple file-backed [`CacheClient`] for single-node deployments that must survive restarts.

// std
use std::{
	fs::{self, File},
	io::Write,
	path::{Path, PathBuf},
};
// self
use crate::{
	_prelude::*,
	cache::{CacheClient, CacheEntry, CacheError, CacheFuture, EntryMap},
};

/// Persists cache entries to a JSON file after each mutation.
///
/// Entries keep their absolute expiry instants, so a TTL keeps counting down while the process
/// is stopped. Entries that expired in the meantime are discarded on [`FileCache::open`], and
/// writes sweep expired entries before persisting. A mutation whose snapshot cannot be written
/// is rolled back in memory, so memory never runs ahead of the file.
#[derive(Clone, Debug)]
pub struct FileCache {
	path: PathBuf,
	inner: Arc<RwLock<EntryMap>>,
}
impl FileCache {
	/// Opens (or creates) a cache at the provided path, eagerly loading live entries.
	pub fn open(path: impl Into<PathBuf>) -> Result<Self, CacheError> {
		let path = path.into();

		Self::ensure_parent_exists(&path)?;

		let now = OffsetDateTime::now_utc();
		let mut snapshot =
			if path.exists() { Self::load_snapshot(&path)? } else { EntryMap::default() };

		snapshot.sweep_expired(now);

		Ok(Self { path, inner: Arc::new(RwLock::new(snapshot)) })
	}

	/// Location of the snapshot file.
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Drops every expired entry, persisting the snapshot if anything changed.
	pub fn purge_expired(&self) -> Result<usize, CacheError> {
		let mut guard = self.inner.write();
		let purged = guard.sweep_expired(OffsetDateTime::now_utc());

		if purged > 0 {
			self.persist_locked(&guard)?;
		}

		Ok(purged)
	}

	fn load_snapshot(path: &Path) -> Result<EntryMap, CacheError> {
		let metadata = path.metadata().map_err(|e| CacheError::Backend {
			message: format!("Failed to inspect {}: {e}", path.display()),
		})?;

		if metadata.len() == 0 {
			return Ok(EntryMap::default());
		}

		let bytes = fs::read(path).map_err(|e| CacheError::Backend {
			message: format!("Failed to read {}: {e}", path.display()),
		})?;
		let entries: Vec<(String, CacheEntry)> =
			serde_json::from_slice(&bytes).map_err(|e| CacheError::Serialization {
				message: format!("Failed to parse {}: {e}", path.display()),
			})?;

		Ok(entries.into_iter().collect())
	}

	fn ensure_parent_exists(path: &Path) -> Result<(), CacheError> {
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent).map_err(|e| CacheError::Backend {
				message: format!("Failed to create cache directory {}: {e}", parent.display()),
			})?;
		}

		Ok(())
	}

	fn persist_locked(&self, contents: &EntryMap) -> Result<(), CacheError> {
		Self::ensure_parent_exists(&self.path)?;

		let snapshot: Vec<_> = contents.iter().collect();
		let serialized =
			serde_json::to_vec_pretty(&snapshot).map_err(|e| CacheError::Serialization {
				message: format!("Failed to serialize cache snapshot: {e}"),
			})?;
		let mut tmp_path = self.path.clone();

		tmp_path.set_extension("tmp");

		{
			let mut file = File::create(&tmp_path).map_err(|e| CacheError::Backend {
				message: format!("Failed to create {}: {e}", tmp_path.display()),
			})?;

			file.write_all(&serialized).map_err(|e| CacheError::Backend {
				message: format!("Failed to write {}: {e}", tmp_path.display()),
			})?;
			file.sync_all().map_err(|e| CacheError::Backend {
				message: format!("Failed to sync {}: {e}", tmp_path.display()),
			})?;
		}

		fs::rename(&tmp_path, &self.path).map_err(|e| CacheError::Backend {
			message: format!("Failed to replace {}: {e}", self.path.display()),
		})
	}

	/// Persists `contents`, putting `previous` back under `key` if the snapshot cannot be written.
	fn persist_or_restore(
		&self,
		contents: &mut EntryMap,
		key: &str,
		previous: Option<CacheEntry>,
	) -> Result<(), CacheError> {
		let Err(e) = self.persist_locked(contents) else {
			return Ok(());
		};

		match previous {
			Some(entry) => contents.insert(key.to_owned(), entry),
			None => contents.remove(key),
		};

		Err(e)
	}
}
impl CacheClient for FileCache {
	fn get<'a>(&'a self, key: &'a str) -> CacheFuture<'a, Option<Vec<u8>>> {
		Box::pin(async move {
			let now = OffsetDateTime::now_utc();

			Ok(self
				.inner
				.read()
				.get(key)
				.filter(|entry| entry.is_live_at(now))
				.map(|entry| entry.value.clone()))
		})
	}

	fn set<'a>(&'a self, key: &'a str, value: Vec<u8>, ttl: Duration) -> CacheFuture<'a, ()> {
		Box::pin(async move {
			CacheError::ensure_positive_ttl(ttl)?;

			let now = OffsetDateTime::now_utc();
			let mut guard = self.inner.write();

			guard.sweep_expired(now);

			let previous = guard.insert(key.to_owned(), CacheEntry::new(value, ttl, now));

			self.persist_or_restore(&mut guard, key, previous)
		})
	}

	fn delete<'a>(&'a self, key: &'a str) -> CacheFuture<'a, ()> {
		Box::pin(async move {
			let mut guard = self.inner.write();
			let Some(entry) = guard.remove(key) else {
				return Ok(());
			};

			self.persist_or_restore(&mut guard, key, Some(entry))
		})
	}

	fn take<'a>(&'a self, key: &'a str) -> CacheFuture<'a, Option<Vec<u8>>> {
		Box::pin(async move {
			let now = OffsetDateTime::now_utc();
			let mut guard = self.inner.write();
			let Some(entry) = guard.remove(key) else {
				return Ok(None);
			};

			if let Err(e) = self.persist_locked(&guard) {
				guard.insert(key.to_owned(), entry);

				return Err(e);
			}

			Ok(Some(entry).filter(|entry| entry.is_live_at(now)).map(|entry| entry.value))
		})
	}
}
