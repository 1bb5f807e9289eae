//! Access token adapter keyed under `access_token_<id>`.

// self
use crate::{
	_prelude::*,
	auth::{ClientIdentity, CredentialKind, Issued, RequestContext, ResourceOwner, Scopes},
	cache::CacheClient,
	config::StoreConfig,
	store::{CredentialStore, LoadFuture, StoreFuture, adapter::CacheAdapter},
};

/// Cache-backed access token adapter. Tokens are not revocable; they live until their TTL
/// elapses.
#[derive(Clone, Debug)]
pub struct CacheAccessTokens(CacheAdapter);
impl CacheAccessTokens {
	/// Binds the adapter to the shared cache client.
	pub fn new(cache: Arc<dyn CacheClient>, config: StoreConfig) -> Self {
		Self(CacheAdapter::new(CredentialKind::AccessToken, cache, config))
	}
}
impl CredentialStore for CacheAccessTokens {
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
