//! Opaque resource-owner and client identities carried through storage unmodified.

// crates.io
use serde::de::DeserializeOwned;
use serde_json::Value;
// self
use crate::_prelude::*;

macro_rules! def_identity {
	($name:ident, $doc:literal, $kind:literal) => {
		#[doc = $doc]
		///
		/// The adapter never inspects the payload; it is stored and returned exactly as given.
		#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(Value);
		impl $name {
			/// Encodes any serializable identity description.
			pub fn new(value: impl Serialize) -> Result<Self, IdentityError> {
				serde_json::to_value(value)
					.map(Self)
					.map_err(|e| IdentityError::Encode { kind: $kind, message: e.to_string() })
			}

			/// Wraps an already-built JSON payload.
			pub fn from_value(value: Value) -> Self {
				Self(value)
			}

			/// Borrows the raw JSON payload.
			pub fn as_value(&self) -> &Value {
				&self.0
			}

			/// Consumes the identity and returns the raw JSON payload.
			pub fn into_value(self) -> Value {
				self.0
			}

			/// Decodes the payload into a caller-defined identity type.
			pub fn decode<T>(&self) -> Result<T, IdentityError>
			where
				T: DeserializeOwned,
			{
				serde_path_to_error::deserialize(&self.0)
					.map_err(|source| IdentityError::Decode { kind: $kind, source })
			}
		}
		impl From<Value> for $name {
			fn from(value: Value) -> Self {
				Self(value)
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!($kind, "({})"), self.0)
			}
		}
	};
}

/// Error returned when an identity payload cannot be converted.
#[derive(Debug, ThisError)]
pub enum IdentityError {
	/// The caller's value could not be represented as JSON.
	#[error("{kind} identity could not be encoded: {message}.")]
	Encode {
		/// Kind of identity (resource owner, client).
		kind: &'static str,
		/// Serializer message.
		message: String,
	},
	/// The stored payload does not match the requested type.
	#[error("{kind} identity could not be decoded.")]
	Decode {
		/// Kind of identity (resource owner, client).
		kind: &'static str,
		/// Structured decoding failure including the offending field path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}

def_identity! { ResourceOwner, "End user or entity that granted access.", "ResourceOwner" }
def_identity! { ClientIdentity, "Application acting on behalf of a resource owner.", "Client" }
