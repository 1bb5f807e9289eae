//! Authorization code adapter keyed under `authorization_code_<id>`.

// self
use crate::{
	_prelude::*,
	auth::{ClientIdentity, CredentialKind, Issued, RequestContext, ResourceOwner, Scopes},
	cache::CacheClient,
	config::StoreConfig,
	store::{AuthorizationCodeStore, CredentialStore, LoadFuture, StoreFuture, adapter::CacheAdapter},
};

/// Cache-backed [`AuthorizationCodeStore`].
///
/// Single use is the engine's responsibility: it should call
/// [`remove`](AuthorizationCodeStore::remove) after a successful exchange, or use
/// [`redeem`](AuthorizationCodeStore::redeem) when concurrent exchanges of one code must be
/// ruled out.
#[derive(Clone, Debug)]
pub struct CacheAuthorizationCodes(CacheAdapter);
impl CacheAuthorizationCodes {
	/// Binds the adapter to the shared cache client.
	pub fn new(cache: Arc<dyn CacheClient>, config: StoreConfig) -> Self {
		Self(CacheAdapter::new(CredentialKind::AuthorizationCode, cache, config))
	}
}
impl CredentialStore for CacheAuthorizationCodes {
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
impl AuthorizationCodeStore for CacheAuthorizationCodes {
	fn remove<'a>(&'a self, identifier: &'a str) -> StoreFuture<'a, ()> {
		Box::pin(self.0.remove(identifier))
	}

	fn redeem<'a>(&'a self, identifier: &'a str, context: &'a RequestContext) -> LoadFuture<'a> {
		Box::pin(self.0.redeem(identifier, context))
	}
}
