//! Crate-level error types shared across adapters, caches, and configuration.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Cache-layer failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::cache::CacheError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Scope list cannot be stored.
	#[error(transparent)]
	InvalidScope(#[from] crate::auth::ScopeValidationError),
	/// Identity payload could not be encoded or decoded.
	#[error(transparent)]
	InvalidIdentity(#[from] crate::auth::IdentityError),
	/// Credential identifier is not a usable cache key.
	#[error(transparent)]
	InvalidIdentifier(#[from] crate::auth::IdentifierError),

	/// Credential could not be resolved; the engine should treat it as an invalid grant.
	#[error("Credential could not be resolved: {0}")]
	InvalidGrant(
		#[from]
		#[source]
		crate::store::LoadFailure,
	),
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Entry lifetime must be at least one second.
	#[error("Credential lifetime must be greater than zero seconds.")]
	ZeroLifetime,
	/// Entry lifetime does not fit a signed 64-bit second count.
	#[error("Credential lifetime of {lifetime} seconds exceeds the supported range.")]
	LifetimeOutOfRange {
		/// Rejected lifetime, in seconds.
		lifetime: u64,
	},
	/// Override adapter reports a different credential kind than the slot it was given.
	#[error("A {adapter} adapter cannot serve as the {slot} adapter.")]
	AdapterKindMismatch {
		/// Slot being filled.
		slot: crate::auth::CredentialKind,
		/// Kind reported by the override adapter.
		adapter: crate::auth::CredentialKind,
	},
	/// Configuration document could not be parsed.
	#[error("Store configuration is malformed.")]
	Parse {
		/// Structured parsing failure including the offending field path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}

#[cfg(test)]
mod tests {
	// std
	use std::error::Error as StdError;
	// self
	use super::*;
	use crate::{cache::CacheError, store::LoadFailure};

	#[test]
	fn cache_error_converts_into_crate_error_with_source() {
		let cache_error = CacheError::Backend { message: "connection refused".into() };
		let error: Error = cache_error.clone().into();

		assert!(matches!(error, Error::Storage(_)));
		assert!(error.to_string().contains("connection refused"));

		let source = StdError::source(&error)
			.expect("Crate error should expose the cache error as its source.");

		assert_eq!(source.to_string(), cache_error.to_string());
	}

	#[test]
	fn load_failures_surface_as_invalid_grants() {
		let error: Error = LoadFailure::NotFound.into();

		assert!(matches!(error, Error::InvalidGrant(LoadFailure::NotFound)));
		assert!(error.to_string().starts_with("Credential could not be resolved"));
	}
}
