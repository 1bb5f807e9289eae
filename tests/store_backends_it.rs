mod common;

// std
use std::{collections::HashSet, env, fs, process, sync::Arc};
// crates.io
use time::OffsetDateTime;
// self
use common::grant;
use oauth2_cache_store::{
	auth::{CredentialKind, RequestContext},
	cache::{CacheClient, FileCache, MemoryCache},
	config::StoreConfig,
	store::{LoadFailure, TokenStore},
};

fn memory_store() -> TokenStore {
	let cache: Arc<dyn CacheClient> = Arc::new(MemoryCache::default());

	TokenStore::new(cache, StoreConfig::default()).expect("Store configuration should be valid.")
}

#[tokio::test]
async fn concurrent_redemptions_allow_single_winner() {
	let store = memory_store();
	let (owner, client, scopes) = grant("u1", "c1", &["read"]);
	let issued = store
		.authorization_codes()
		.save(owner, client, scopes, &RequestContext::new())
		.await
		.expect("Saving a code should succeed.");
	let identifier: String = issued.identifier.into();
	let tasks = (0..8)
		.map(|_| {
			let store = store.clone();
			let identifier = identifier.clone();

			tokio::spawn(async move {
				store.authorization_codes().redeem(&identifier, &RequestContext::new()).await
			})
		})
		.collect::<Vec<_>>();
	let mut winners = 0;

	for task in tasks {
		match task.await.expect("Redemption task should not panic.") {
			Ok(_) => winners += 1,
			Err(failure) => assert_eq!(failure, LoadFailure::NotFound),
		}
	}

	assert_eq!(winners, 1, "only one redemption should succeed");
}

#[tokio::test]
async fn concurrent_saves_never_collide() {
	let store = memory_store();
	let tasks = (0..32)
		.map(|i| {
			let store = store.clone();

			tokio::spawn(async move {
				let (owner, client, scopes) = grant(&format!("u{i}"), "c1", &["read"]);

				store
					.access_tokens()
					.save(owner, client, scopes, &RequestContext::new())
					.await
					.expect("Concurrent save should succeed.")
			})
		})
		.collect::<Vec<_>>();
	let mut identifiers = HashSet::new();

	for task in tasks {
		let issued = task.await.expect("Save task should not panic.");

		assert!(identifiers.insert(issued.identifier));
	}

	assert_eq!(identifiers.len(), 32);
}

#[tokio::test]
async fn file_cache_keeps_credentials_across_restarts() {
	let path = env::temp_dir().join(format!(
		"oauth2_cache_store_it_{}_{}.json",
		process::id(),
		OffsetDateTime::now_utc().unix_timestamp_nanos(),
	));
	let context = RequestContext::new();
	let (owner, client, scopes) = grant("u1", "c1", &["read", "profile"]);
	let mut issued = Vec::new();

	{
		let cache: Arc<dyn CacheClient> =
			Arc::new(FileCache::open(&path).expect("Failed to open file cache."));
		let store =
			TokenStore::new(cache, StoreConfig::default()).expect("Store config should be valid.");

		for kind in CredentialKind::ALL {
			let credential = store
				.credentials(kind)
				.save(owner.clone(), client.clone(), scopes.clone(), &context)
				.await
				.expect("Saving into the file cache should succeed.");

			issued.push((kind, credential.identifier));
		}
	}

	let cache: Arc<dyn CacheClient> =
		Arc::new(FileCache::open(&path).expect("Failed to reopen file cache."));
	let store =
		TokenStore::new(cache, StoreConfig::default()).expect("Store config should be valid.");

	for (kind, identifier) in &issued {
		let record = store
			.credentials(*kind)
			.load(identifier, &context)
			.await
			.expect("Credential should survive a restart.");

		assert_eq!(record.resource_owner, owner);
		assert_eq!(record.client, client);
		assert_eq!(record.scopes, scopes);
	}

	let (_, code) = &issued[0];

	store.authorization_codes().remove(code).await.expect("Removing a code should succeed.");

	assert_eq!(
		store.authorization_codes().load(code, &context).await,
		Err(LoadFailure::NotFound)
	);

	fs::remove_file(&path).unwrap_or_else(|e| {
		panic!("Failed to remove temporary file cache snapshot {}: {e}", path.display())
	});
}
