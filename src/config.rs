//! Store configuration: entry lifetime and cache key layout.

// self
use crate::{_prelude::*, error::ConfigError};

/// Lifetime applied to every stored credential when none is configured, in seconds.
pub const DEFAULT_LIFETIME: u64 = 3600;

/// Cache key layout used when namespacing identifiers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyLayout {
	/// `authorization_code_<id>`, `access_token_<id>`, `refresh_token<id>`.
	///
	/// Matches keys written by existing deployments.
	#[default]
	Legacy,
	/// `authorization_code_<id>`, `access_token_<id>`, `refresh_token_<id>`.
	Uniform,
}

/// Settings shared by the authorization code, access token, and refresh token adapters.
///
/// Deserializes from a host application's configuration with every field optional:
///
/// ```
/// use oauth2_cache_store::config::{KeyLayout, StoreConfig};
///
/// let config = StoreConfig::from_json_str(r#"{ "lifetime": 600 }"#).unwrap();
///
/// assert_eq!(config.lifetime, 600);
/// assert_eq!(config.key_layout, KeyLayout::Legacy);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
	/// Entry lifetime in seconds, applied uniformly to all three credential kinds.
	pub lifetime: u64,
	/// Cache key layout.
	pub key_layout: KeyLayout,
}
impl StoreConfig {
	/// Returns a builder seeded with defaults.
	pub fn builder() -> StoreConfigBuilder {
		StoreConfigBuilder::default()
	}

	/// Parses and validates a JSON configuration document.
	pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
		let mut deserializer = serde_json::Deserializer::from_str(raw);
		let config: Self = serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| ConfigError::Parse { source })?;

		config.validate()?;

		Ok(config)
	}

	/// Ensures the lifetime can be handed to a cache as a positive TTL.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.lifetime == 0 {
			return Err(ConfigError::ZeroLifetime);
		}
		if i64::try_from(self.lifetime).is_err() {
			return Err(ConfigError::LifetimeOutOfRange { lifetime: self.lifetime });
		}

		Ok(())
	}

	/// Lifetime as the TTL passed to the cache.
	pub fn ttl(&self) -> Duration {
		Duration::seconds(i64::try_from(self.lifetime).unwrap_or(i64::MAX))
	}
}
impl Default for StoreConfig {
	fn default() -> Self {
		Self { lifetime: DEFAULT_LIFETIME, key_layout: KeyLayout::default() }
	}
}

/// Builder for [`StoreConfig`].
#[derive(Clone, Debug, Default)]
pub struct StoreConfigBuilder {
	config: StoreConfig,
}
impl StoreConfigBuilder {
	/// Sets the entry lifetime in seconds.
	pub fn lifetime(mut self, seconds: u64) -> Self {
		self.config.lifetime = seconds;

		self
	}

	/// Sets the cache key layout.
	pub fn key_layout(mut self, layout: KeyLayout) -> Self {
		self.config.key_layout = layout;

		self
	}

	/// Validates and returns the configuration.
	pub fn build(self) -> Result<StoreConfig, ConfigError> {
		self.config.validate()?;

		Ok(self.config)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn defaults_match_documented_values() {
		let config = StoreConfig::default();

		assert_eq!(config.lifetime, 3600);
		assert_eq!(config.key_layout, KeyLayout::Legacy);
		assert_eq!(config.ttl(), Duration::hours(1));
		assert_eq!(StoreConfig::from_json_str("{}").expect("Empty document should parse."), config);
	}

	#[test]
	fn builder_validates_lifetime() {
		assert!(matches!(StoreConfig::builder().lifetime(0).build(), Err(ConfigError::ZeroLifetime)));
		assert!(matches!(
			StoreConfig::builder().lifetime(u64::MAX).build(),
			Err(ConfigError::LifetimeOutOfRange { lifetime: u64::MAX })
		));

		let config = StoreConfig::builder()
			.lifetime(120)
			.key_layout(KeyLayout::Uniform)
			.build()
			.expect("Builder should accept a positive lifetime.");

		assert_eq!(config.ttl(), Duration::minutes(2));
		assert_eq!(config.key_layout, KeyLayout::Uniform);
	}

	#[test]
	fn parse_errors_report_the_field_path() {
		let err = StoreConfig::from_json_str(r#"{ "lifetime": "soon" }"#)
			.expect_err("String lifetimes must be rejected.");

		match err {
			ConfigError::Parse { source } => assert_eq!(source.path().to_string(), "lifetime"),
			other => panic!("Unexpected error: {other:?}"),
		}

		assert!(StoreConfig::from_json_str(r#"{ "lifetime": 0 }"#).is_err());
		assert!(StoreConfig::from_json_str(r#"{ "ttl": 5 }"#).is_err());
		assert_eq!(
			StoreConfig::from_json_str(r#"{ "key_layout": "uniform" }"#)
				.expect("Key layout should parse.")
				.key_layout,
			KeyLayout::Uniform
		);
	}
}
