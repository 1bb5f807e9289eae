// self
use crate::{
	auth::CredentialKind,
	obs::{OpOutcome, StoreOp},
};

/// Records an operation outcome via the global metrics recorder (when enabled).
pub fn record_op_outcome(kind: CredentialKind, op: StoreOp, outcome: OpOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"oauth2_cache_store_op_total",
			"kind" => kind.as_str(),
			"op" => op.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, op, outcome);
	}
}
