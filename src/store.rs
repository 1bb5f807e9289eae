//! Credential adapters consumed by the OAuth engine and the [`TokenStore`] that composes them.
//!
//! Each adapter turns engine calls into single-key cache operations: `save` mints a fresh
//! identifier and writes the record with the configured TTL, `load` resolves an identifier back
//! into its record, and (authorization codes only) `remove` deletes a redeemed code. Eviction is
//! left entirely to the cache.

mod access_token;
mod adapter;
mod authorization_code;
mod refresh_token;

pub use access_token::CacheAccessTokens;
pub use authorization_code::CacheAuthorizationCodes;
pub use refresh_token::CacheRefreshTokens;

// self
use crate::{
	_prelude::*,
	auth::{
		ClientIdentity, CredentialKind, CredentialRecord, IdentifierError, Issued, RequestContext,
		ResourceOwner, Scopes,
	},
	cache::{CacheClient, CacheError},
	config::{KeyLayout, StoreConfig},
	error::ConfigError,
};

/// Boxed future returned by fallible adapter operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;
/// Boxed future returned by credential lookups.
pub type LoadFuture<'a> =
	Pin<Box<dyn Future<Output = Result<CredentialRecord, LoadFailure>> + 'a + Send>>;

/// Load/save contract shared by every credential kind.
pub trait CredentialStore
where
	Self: Send + Sync,
{
	/// Kind of credential handled by this adapter.
	fn kind(&self) -> CredentialKind;

	/// Resolves an identifier into the record it was saved with.
	fn load<'a>(&'a self, identifier: &'a str, context: &'a RequestContext) -> LoadFuture<'a>;

	/// Persists a freshly issued credential under a newly minted identifier.
	fn save<'a>(
		&'a self,
		resource_owner: ResourceOwner,
		client: ClientIdentity,
		scopes: Scopes,
		context: &'a RequestContext,
	) -> StoreFuture<'a, Issued>;
}

/// Authorization code contract: load/save plus explicit invalidation.
pub trait AuthorizationCodeStore
where
	Self: CredentialStore,
{
	/// Deletes the code unconditionally. Removing an unknown code succeeds.
	fn remove<'a>(&'a self, identifier: &'a str) -> StoreFuture<'a, ()>;

	/// Loads and deletes the code in one atomic cache operation, so concurrent redemptions of
	/// the same code cannot both succeed.
	fn redeem<'a>(&'a self, identifier: &'a str, context: &'a RequestContext) -> LoadFuture<'a>;
}

/// Reason a credential could not be resolved.
///
/// The engine is expected to treat every variant as an invalid credential; the variants exist so
/// hosts can tell infrastructure trouble apart from forged or expired credentials in their logs.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum LoadFailure {
	/// The identifier can never name a stored entry.
	#[error("Credential identifier is invalid.")]
	InvalidIdentifier(#[from] IdentifierError),
	/// No live entry exists (never saved, expired, or removed).
	#[error("No stored credential matches the identifier.")]
	NotFound,
	/// The cache reported an error.
	#[error("Cache lookup failed: {0}")]
	Backend(#[source] CacheError),
	/// The stored value is not a valid credential record.
	#[error("Stored credential is malformed at `{path}`: {message}.")]
	Malformed {
		/// Path to the offending field (`.` for the document root).
		path: String,
		/// Decoder message.
		message: String,
	},
}
impl LoadFailure {
	/// Returns `true` for every variant: whatever the reason, the engine must reject the
	/// credential.
	pub fn is_invalid_credential(&self) -> bool {
		match self {
			Self::InvalidIdentifier(_) | Self::NotFound | Self::Backend(_) | Self::Malformed { .. } =>
				true,
		}
	}

	/// Returns `true` when a retry might succeed (the cache itself failed).
	pub fn is_transient(&self) -> bool {
		matches!(self, Self::Backend(_))
	}
}

/// The composed credential store handed to the OAuth engine.
///
/// All three adapters share one cache client and one [`StoreConfig`]. Overrides supplied through
/// [`TokenStoreBuilder`] are resolved once at construction; the composed store is immutable.
#[derive(Clone)]
pub struct TokenStore {
	config: StoreConfig,
	authorization_codes: Arc<dyn AuthorizationCodeStore>,
	access_tokens: Arc<dyn CredentialStore>,
	refresh_tokens: Arc<dyn CredentialStore>,
}
impl TokenStore {
	/// Builds the default cache-backed adapters around `cache`.
	pub fn new(cache: Arc<dyn CacheClient>, config: StoreConfig) -> Result<Self> {
		Self::builder(cache).config(config).build()
	}

	/// Returns a builder for selectively replacing adapters.
	pub fn builder(cache: Arc<dyn CacheClient>) -> TokenStoreBuilder {
		TokenStoreBuilder::new(cache)
	}

	/// Resolved configuration.
	pub fn config(&self) -> &StoreConfig {
		&self.config
	}

	/// Authorization code adapter.
	pub fn authorization_codes(&self) -> &dyn AuthorizationCodeStore {
		self.authorization_codes.as_ref()
	}

	/// Access token adapter.
	pub fn access_tokens(&self) -> &dyn CredentialStore {
		self.access_tokens.as_ref()
	}

	/// Refresh token adapter.
	pub fn refresh_tokens(&self) -> &dyn CredentialStore {
		self.refresh_tokens.as_ref()
	}

	/// Adapter for the given kind, through the shared load/save contract.
	pub fn credentials(&self, kind: CredentialKind) -> &dyn CredentialStore {
		match kind {
			CredentialKind::AuthorizationCode => self.authorization_codes.as_ref(),
			CredentialKind::AccessToken => self.access_tokens.as_ref(),
			CredentialKind::RefreshToken => self.refresh_tokens.as_ref(),
		}
	}
}
impl Debug for TokenStore {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenStore").field("config", &self.config).finish_non_exhaustive()
	}
}

/// Builder for [`TokenStore`].
///
/// To replace a single operation, implement the adapter trait and delegate the remaining
/// operations to the matching `Cache*` adapter. Override adapters must report the kind of the
/// slot they fill and should be built with the same [`StoreConfig`].
pub struct TokenStoreBuilder {
	cache: Arc<dyn CacheClient>,
	config: StoreConfig,
	authorization_codes: Option<Arc<dyn AuthorizationCodeStore>>,
	access_tokens: Option<Arc<dyn CredentialStore>>,
	refresh_tokens: Option<Arc<dyn CredentialStore>>,
}
impl TokenStoreBuilder {
	fn new(cache: Arc<dyn CacheClient>) -> Self {
		Self {
			cache,
			config: StoreConfig::default(),
			authorization_codes: None,
			access_tokens: None,
			refresh_tokens: None,
		}
	}

	/// Replaces the whole configuration.
	pub fn config(mut self, config: StoreConfig) -> Self {
		self.config = config;

		self
	}

	/// Sets the entry lifetime in seconds for all three kinds.
	pub fn lifetime(mut self, seconds: u64) -> Self {
		self.config.lifetime = seconds;

		self
	}

	/// Sets the cache key layout.
	pub fn key_layout(mut self, layout: KeyLayout) -> Self {
		self.config.key_layout = layout;

		self
	}

	/// Overrides the authorization code adapter.
	pub fn authorization_codes(mut self, adapter: Arc<dyn AuthorizationCodeStore>) -> Self {
		self.authorization_codes = Some(adapter);

		self
	}

	/// Overrides the access token adapter.
	pub fn access_tokens(mut self, adapter: Arc<dyn CredentialStore>) -> Self {
		self.access_tokens = Some(adapter);

		self
	}

	/// Overrides the refresh token adapter.
	pub fn refresh_tokens(mut self, adapter: Arc<dyn CredentialStore>) -> Self {
		self.refresh_tokens = Some(adapter);

		self
	}

	/// Validates the configuration and resolves every adapter.
	pub fn build(self) -> Result<TokenStore> {
		let Self { cache, config, authorization_codes, access_tokens, refresh_tokens } = self;

		config.validate()?;

		let authorization_codes: Arc<dyn AuthorizationCodeStore> = match authorization_codes {
			Some(adapter) => {
				ensure_kind(CredentialKind::AuthorizationCode, adapter.kind())?;

				adapter
			},
			None => Arc::new(CacheAuthorizationCodes::new(cache.clone(), config.clone())),
		};
		let access_tokens: Arc<dyn CredentialStore> = match access_tokens {
			Some(adapter) => {
				ensure_kind(CredentialKind::AccessToken, adapter.kind())?;

				adapter
			},
			None => Arc::new(CacheAccessTokens::new(cache.clone(), config.clone())),
		};
		let refresh_tokens: Arc<dyn CredentialStore> = match refresh_tokens {
			Some(adapter) => {
				ensure_kind(CredentialKind::RefreshToken, adapter.kind())?;

				adapter
			},
			None => Arc::new(CacheRefreshTokens::new(cache, config.clone())),
		};

		Ok(TokenStore { config, authorization_codes, access_tokens, refresh_tokens })
	}
}
impl Debug for TokenStoreBuilder {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenStoreBuilder")
			.field("config", &self.config)
			.field("authorization_codes_overridden", &self.authorization_codes.is_some())
			.field("access_tokens_overridden", &self.access_tokens.is_some())
			.field("refresh_tokens_overridden", &self.refresh_tokens.is_some())
			.finish()
	}
}

fn ensure_kind(slot: CredentialKind, adapter: CredentialKind) -> Result<(), ConfigError> {
	if slot == adapter { Ok(()) } else { Err(ConfigError::AdapterKindMismatch { slot, adapter }) }
}
