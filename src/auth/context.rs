//! Per-request context handed through by the OAuth engine.

// self
use crate::_prelude::*;

/// Metadata describing the engine request that triggered a store operation.
///
/// The store never branches on the context; its annotations only flow into tracing spans.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestContext {
	/// Correlation identifier assigned by the engine or transport.
	pub request_id: Option<String>,
	/// Remote address of the caller, when known.
	pub client_ip: Option<String>,
}
impl RequestContext {
	/// Creates an empty context.
	pub fn new() -> Self {
		Self::default()
	}

	/// Attaches a correlation identifier.
	pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
		self.request_id = Some(request_id.into());

		self
	}

	/// Attaches the caller's remote address.
	pub fn with_client_ip(mut self, client_ip: impl Into<String>) -> Self {
		self.client_ip = Some(client_ip.into());

		self
	}
}
