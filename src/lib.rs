//! Cache-backed persistence for OAuth 2.0 providers—authorization codes, access tokens, and
//! refresh tokens stored with TTLs behind one pluggable client contract.
//!
//! The crate does not run grant flows. An external OAuth 2.0 engine calls the adapters exposed
//! by [`store::TokenStore`] to persist newly issued credentials, resolve incoming credential
//! strings, and invalidate redeemed authorization codes. Entries live in any
//! [`cache::CacheClient`] and are evicted by the cache once their lifetime elapses.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod obs;
pub mod store;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for tests; enabled via `cfg(test)` or the `test`
	//! crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::{ClientIdentity, ResourceOwner, Scopes},
		cache::{CacheClient, MemoryCache},
		config::StoreConfig,
		store::TokenStore,
	};

	/// Constructs a [`TokenStore`] backed by a fresh [`MemoryCache`] and returns both so tests
	/// can inspect raw cache entries.
	pub fn build_memory_token_store(config: StoreConfig) -> (TokenStore, Arc<MemoryCache>) {
		let cache_backend = Arc::new(MemoryCache::default());
		let cache: Arc<dyn CacheClient> = cache_backend.clone();
		let store = TokenStore::new(cache, config)
			.expect("Test token store configuration should be valid.");

		(store, cache_backend)
	}

	/// Resource owner, client, and scope fixture shared across tests.
	pub fn sample_grant(
		owner_id: &str,
		client_id: &str,
		scopes: &[&str],
	) -> (ResourceOwner, ClientIdentity, Scopes) {
		let owner = ResourceOwner::from_value(serde_json::json!({ "id": owner_id }));
		let client = ClientIdentity::from_value(serde_json::json!({ "id": client_id }));
		let scopes = Scopes::new(scopes.iter().copied()).expect("Scope fixture should be valid.");

		(owner, client, scopes)
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::RwLock;
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};

	pub use crate::error::{Error, Result};
}

#[cfg(test)] use color_eyre as _;
