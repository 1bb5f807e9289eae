//! Randomly generated credential identifiers used as the variable part of cache keys.

// std
use std::{borrow::Borrow, ops::Deref};
// crates.io
use uuid::Uuid;
// self
use crate::_prelude::*;

const IDENTIFIER_MAX_LEN: usize = 128;

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("Credential identifier cannot be empty.")]
	Empty,
	/// The identifier contains whitespace or control characters.
	#[error("Credential identifier contains whitespace or control characters.")]
	InvalidCharacter,
	/// The identifier exceeded the allowed character count.
	#[error("Credential identifier exceeds {max} characters.")]
	TooLong {
		/// Maximum permitted character count.
		max: usize,
	},
}

/// Identifier minted for every saved authorization code, access token, or refresh token.
///
/// Freshly generated identifiers are UUID v4 values in hyphenated lowercase form. Identifiers
/// supplied by callers (e.g., a code echoed back by a client) are only checked for being usable
/// as a cache key; they do not have to be UUIDs.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CredentialId(String);
impl CredentialId {
	/// Mints a new random identifier.
	pub fn generate() -> Self {
		Self(Uuid::new_v4().hyphenated().to_string())
	}

	/// Wraps a caller-supplied identifier after validation.
	pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
		let view = value.as_ref();

		validate_view(view)?;

		Ok(Self(view.to_owned()))
	}

	/// Returns the identifier as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl Deref for CredentialId {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for CredentialId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Borrow<str> for CredentialId {
	fn borrow(&self) -> &str {
		&self.0
	}
}
impl From<CredentialId> for String {
	fn from(value: CredentialId) -> Self {
		value.0
	}
}
impl TryFrom<String> for CredentialId {
	type Error = IdentifierError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		validate_view(&value)?;

		Ok(Self(value))
	}
}
impl FromStr for CredentialId {
	type Err = IdentifierError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}
impl Debug for CredentialId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "CredentialId({})", self.0)
	}
}
impl Display for CredentialId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

fn validate_view(view: &str) -> Result<(), IdentifierError> {
	if view.is_empty() {
		return Err(IdentifierError::Empty);
	}
	// Memcached-style keys reject whitespace and control bytes.
	if view.chars().any(|c| c.is_whitespace() || c.is_control()) {
		return Err(IdentifierError::InvalidCharacter);
	}
	if view.len() > IDENTIFIER_MAX_LEN {
		return Err(IdentifierError::TooLong { max: IDENTIFIER_MAX_LEN });
	}

	Ok(())
}
