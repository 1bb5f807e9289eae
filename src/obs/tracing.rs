// self
use crate::{
	_prelude::*,
	auth::{CredentialKind, RequestContext},
	obs::StoreOp,
	store::LoadFailure,
};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedOp<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedOp<F> = F;

/// A span builder used by store operations.
#[derive(Clone, Debug)]
pub struct OpSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl OpSpan {
	/// Creates a new span tagged with the credential kind, operation, and request id.
	///
	/// Credential identifiers are deliberately not recorded.
	pub fn new(kind: CredentialKind, op: StoreOp, context: Option<&RequestContext>) -> Self {
		#[cfg(feature = "tracing")]
		{
			let request_id = context.and_then(|c| c.request_id.as_deref());
			let client_ip = context.and_then(|c| c.client_ip.as_deref());
			let span = tracing::info_span!(
				"oauth2_cache_store.op",
				kind = kind.as_str(),
				op = op.as_str(),
				request_id,
				client_ip
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, op, context);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedOp<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits an event describing why a credential could not be resolved.
///
/// Plain misses are routine (expired or forged credentials) and log at `debug`; backend and
/// decoding failures log at `warn` because the engine will report them as invalid grants.
pub fn log_load_failure(kind: CredentialKind, failure: &LoadFailure) {
	#[cfg(feature = "tracing")]
	{
		if failure.is_transient() || matches!(failure, LoadFailure::Malformed { .. }) {
			tracing::warn!(kind = kind.as_str(), error = %failure, "credential load failed");
		} else {
			tracing::debug!(kind = kind.as_str(), error = %failure, "credential not found");
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (kind, failure);
	}
}
