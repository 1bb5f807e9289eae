//! Refresh token adapter keyed under `refresh_token<id>` (or `refresh_token_<id>` with
//! [`KeyLayout::Uniform`](crate::config::KeyLayout::Uniform)).

// self
use crate::{
	_prelude::*,
	auth::{ClientIdentity, CredentialKind, Issued, RequestContext, ResourceOwner, Scopes},
	cache::CacheClient,
	config::StoreConfig,
	store::{CredentialStore, LoadFuture, StoreFuture, adapter::CacheAdapter},
};

/// Cache-backed refresh token adapter.
#[derive(Clone, Debug)]
pub struct CacheRefreshTokens(CacheAdapter);
impl CacheRefreshTokens {
	/// Binds the adapter to the shared cache client.
	pub fn new(cache: Arc<dyn CacheClient>, config: StoreConfig) -> Self {
		Self(CacheAdapter::new(CredentialKind::RefreshToken, cache, config))
	}
}
impl CredentialStore for CacheRefreshTokens {
	fn kind(&self) -> CredentialKind {
		self.0.kind()
	}

	fn load<'a>(&'a self, identifier: &'a str, context: &'a RequestContext) -> LoadFuture<'a> {
		Box::pin(self.0.load(identifier, context))
	}

	fn save<'a>(
		&'a self,
		resource_owner: ResourceOwner,
		client: ClientIdentity,
		scopes: Scopes,
		context: &'a RequestContext,
	) -> StoreFuture<'a, Issued> {
		Box::pin(self.0.save(resource_owner, client, scopes, context))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{_preludet::*, cache::MemoryCache, config::KeyLayout};

	async fn stored_key(layout: KeyLayout) -> (String, Arc<MemoryCache>) {
		let cache = Arc::new(MemoryCache::default());
		let config =
			StoreConfig::builder().key_layout(layout).build().expect("Config should be valid.");
		let tokens = CacheRefreshTokens::new(cache.clone(), config);
		let (owner, client, scopes) = sample_grant("u1", "c1", &["offline_access"]);
		let issued = tokens
			.save(owner, client, scopes, &RequestContext::new())
			.await
			.expect("Saving a refresh token should succeed.");

		(issued.identifier.into(), cache)
	}

	#[tokio::test]
	async fn legacy_layout_omits_the_separator() {
		let (identifier, cache) = stored_key(KeyLayout::Legacy).await;

		assert!(cache.contains_key(&format!("refresh_token{identifier}")));
		assert!(!cache.contains_key(&format!("refresh_token_{identifier}")));
	}

	#[tokio::test]
	async fn uniform_layout_adds_the_separator() {
		let (identifier, cache) = stored_key(KeyLayout::Uniform).await;

		assert!(cache.contains_key(&format!("refresh_token_{identifier}")));
	}
}
