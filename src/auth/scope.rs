//! Granted scope lists stored alongside each credential.

// std
use std::slice::Iter;
// crates.io
use serde::{Deserializer, de::Error as DeError};
// self
use crate::_prelude::*;

/// Errors emitted when validating scopes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum ScopeValidationError {
	/// Empty scope entries are not allowed.
	#[error("Scope entries cannot be empty.")]
	Empty,
	/// Scopes cannot contain embedded whitespace characters.
	#[error("Scope contains whitespace: {scope}.")]
	ContainsWhitespace {
		/// The offending scope string.
		scope: String,
	},
}

/// Ordered list of granted OAuth scopes.
///
/// Scope negotiation belongs to the OAuth engine, so the list keeps the exact order and
/// multiplicity it was granted with; a loaded record compares equal to the one that was saved.
/// Only entries that could never be valid scope tokens (empty or whitespace-bearing) are
/// rejected.
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Scopes(Vec<String>);
impl Scopes {
	/// Creates a validated scope list from any iterator.
	pub fn new<I, S>(scopes: I) -> Result<Self, ScopeValidationError>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let scopes = scopes.into_iter().map(Into::into).collect::<Vec<String>>();

		for scope in &scopes {
			validate(scope)?;
		}

		Ok(Self(scopes))
	}

	/// Number of scope entries.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if no scopes were granted.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Returns true if the list contains the provided scope.
	pub fn contains(&self, scope: &str) -> bool {
		self.0.iter().any(|candidate| candidate == scope)
	}

	/// Iterator over scope strings in granted order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(|s| s.as_str())
	}

	/// Returns the space-delimited representation used on the OAuth wire.
	pub fn joined(&self) -> String {
		self.0.join(" ")
	}

	/// Returns the underlying slice of scope strings.
	pub fn as_slice(&self) -> &[String] {
		&self.0
	}
}
impl Debug for Scopes {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("Scopes").field(&self.0).finish()
	}
}
impl Display for Scopes {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.joined())
	}
}

/// Iterator over scope strings.
pub struct ScopeIter<'a> {
	inner: Iter<'a, String>,
}
impl<'a> Iterator for ScopeIter<'a> {
	type Item = &'a str;

	fn next(&mut self) -> Option<Self::Item> {
		self.inner.next().map(|s| s.as_str())
	}
}
impl<'a> IntoIterator for &'a Scopes {
	type IntoIter = ScopeIter<'a>;
	type Item = &'a str;

	fn into_iter(self) -> Self::IntoIter {
		ScopeIter { inner: self.0.iter() }
	}
}
impl TryFrom<Vec<String>> for Scopes {
	type Error = ScopeValidationError;

	fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}
impl TryFrom<&[&str]> for Scopes {
	type Error = ScopeValidationError;

	fn try_from(value: &[&str]) -> Result<Self, Self::Error> {
		Self::new(value.iter().copied())
	}
}
impl FromStr for Scopes {
	type Err = ScopeValidationError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		if s.is_empty() {
			return Ok(Self::default());
		}
		if s.chars().all(char::is_whitespace) {
			return Err(ScopeValidationError::Empty);
		}

		Self::new(s.split_whitespace())
	}
}
impl<'de> Deserialize<'de> for Scopes {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let values = <Vec<String>>::deserialize(deserializer)?;

		Scopes::new(values).map_err(DeError::custom)
	}
}

fn validate(scope: &str) -> Result<(), ScopeValidationError> {
	if scope.is_empty() {
		return Err(ScopeValidationError::Empty);
	}
	if scope.chars().any(char::is_whitespace) {
		return Err(ScopeValidationError::ContainsWhitespace { scope: scope.to_owned() });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn scopes_keep_granted_order_and_duplicates() {
		let scopes = Scopes::new(["write", "read", "write"]).expect("Scope list should be valid.");

		assert_eq!(scopes.iter().collect::<Vec<_>>(), vec!["write", "read", "write"]);
		assert_eq!(scopes.joined(), "write read write");
		assert_ne!(scopes, Scopes::new(["read", "write"]).expect("Scope list should be valid."));
	}

	#[test]
	fn invalid_scopes_error() {
		assert_eq!(Scopes::new([""]), Err(ScopeValidationError::Empty));
		assert!(matches!(
			Scopes::new([" read "]),
			Err(ScopeValidationError::ContainsWhitespace { .. })
		));
		assert!(Scopes::from_str("").is_ok(), "Empty string represents an empty scope list.");
		assert!(Scopes::from_str("   ").is_err(), "Whitespace-only input must be rejected.");
	}

	#[test]
	fn deserialization_validates_entries() {
		let scopes: Scopes =
			serde_json::from_str(r#"["read","profile"]"#).expect("Scope array should decode.");

		assert!(scopes.contains("profile"));
		assert_eq!(scopes.len(), 2);
		assert!(serde_json::from_str::<Scopes>(r#"["read write"]"#).is_err());
		assert_eq!(
			serde_json::to_string(&scopes).expect("Scopes should serialize."),
			r#"["read","profile"]"#
		);
	}

	#[test]
	fn borrowed_iteration_matches_slice() {
		let scopes = Scopes::try_from(["email", "openid"].as_slice())
			.expect("Slice-based scope list should build successfully.");
		let collected = (&scopes).into_iter().collect::<Vec<_>>();

		assert_eq!(collected, scopes.as_slice());
		assert_eq!(scopes.to_string(), "email openid");
	}
}
