//! Optional observability helpers for store operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `oauth2_cache_store.op` with the `kind`
//!   (credential kind), `op` (operation), and `request_id` fields, plus events for load
//!   failures.
//! - Enable `metrics` to increment the `oauth2_cache_store_op_total` counter for every
//!   attempt/success/failure, labeled by `kind` + `op` + `outcome`.

mod metrics;
mod tracing;

pub use self::{metrics::*, tracing::*};

// self
use crate::_prelude::*;

/// Store operations observed by the adapters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StoreOp {
	/// Credential lookup.
	Load,
	/// Credential issuance.
	Save,
	/// Unconditional authorization code deletion.
	Remove,
	/// Atomic load-and-delete of an authorization code.
	Redeem,
}
impl StoreOp {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			StoreOp::Load => "load",
			StoreOp::Save => "save",
			StoreOp::Remove => "remove",
			StoreOp::Redeem => "redeem",
		}
	}
}
impl Display for StoreOp {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpOutcome {
	/// Entry to an adapter operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl OpOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OpOutcome::Attempt => "attempt",
			OpOutcome::Success => "success",
			OpOutcome::Failure => "failure",
		}
	}
}
impl Display for OpOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
