//! Credential-domain identifiers, identities, scopes, and stored records.

pub mod context;
pub mod credential;
pub mod id;
pub mod identity;
pub mod scope;

pub use context::*;
pub use credential::*;
pub use id::*;
pub use identity::*;
pub use scope::*;
