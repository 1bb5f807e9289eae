//! Credential kinds, stored records, and issuance results.

// self
use crate::{
	_prelude::*,
	auth::{ClientIdentity, CredentialId, ResourceOwner, Scopes},
	config::KeyLayout,
};

/// The three credential kinds persisted by the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialKind {
	/// Short-lived code exchanged by a client for an access token.
	AuthorizationCode,
	/// Credential granting access to a resource owner's data.
	AccessToken,
	/// Long-lived credential used to mint new access tokens.
	RefreshToken,
}
impl CredentialKind {
	/// Every kind, in issuance order.
	pub const ALL: [Self; 3] = [Self::AuthorizationCode, Self::AccessToken, Self::RefreshToken];

	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::AuthorizationCode => "authorization_code",
			Self::AccessToken => "access_token",
			Self::RefreshToken => "refresh_token",
		}
	}

	/// Prefix prepended to the identifier to form the cache key.
	///
	/// Under [`KeyLayout::Legacy`] refresh tokens carry no separator (`refresh_token<id>`) so
	/// entries written by earlier deployments stay addressable.
	pub const fn key_prefix(self, layout: KeyLayout) -> &'static str {
		match (self, layout) {
			(Self::AuthorizationCode, _) => "authorization_code_",
			(Self::AccessToken, _) => "access_token_",
			(Self::RefreshToken, KeyLayout::Legacy) => "refresh_token",
			(Self::RefreshToken, KeyLayout::Uniform) => "refresh_token_",
		}
	}

	/// Builds the namespaced cache key for an identifier.
	pub fn storage_key(self, layout: KeyLayout, identifier: &CredentialId) -> String {
		format!("{}{identifier}", self.key_prefix(layout))
	}
}
impl Display for CredentialKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Authorization context bound to an issued code or token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
	/// Entity that granted access.
	pub resource_owner: ResourceOwner,
	/// Application the credential was issued to.
	pub client: ClientIdentity,
	/// Scopes granted with the credential.
	pub scopes: Scopes,
}
impl CredentialRecord {
	/// Bundles the grant triple into a record.
	pub fn new(resource_owner: ResourceOwner, client: ClientIdentity, scopes: Scopes) -> Self {
		Self { resource_owner, client, scopes }
	}
}

/// Result of a successful save, handed back to the engine for inclusion in the issued
/// credential.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Issued {
	/// Entry lifetime in seconds.
	pub lifetime: u64,
	/// Freshly minted identifier.
	pub identifier: CredentialId,
}
impl Issued {
	/// Lifetime as a [`Duration`].
	pub fn lifetime_duration(&self) -> Duration {
		Duration::seconds(i64::try_from(self.lifetime).unwrap_or(i64::MAX))
	}
}
