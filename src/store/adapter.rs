//! Cache-backed operations shared by the three credential adapters.

// self
use crate::{
	_prelude::*,
	auth::{
		ClientIdentity, CredentialId, CredentialKind, CredentialRecord, Issued, RequestContext,
		ResourceOwner, Scopes,
	},
	cache::{CacheClient, CacheError},
	config::StoreConfig,
	obs::{self, OpOutcome, OpSpan, StoreOp},
	store::LoadFailure,
};

/// One credential kind bound to the shared cache client and configuration.
#[derive(Clone)]
pub(super) struct CacheAdapter {
	kind: CredentialKind,
	cache: Arc<dyn CacheClient>,
	config: StoreConfig,
}
impl CacheAdapter {
	pub(super) fn new(kind: CredentialKind, cache: Arc<dyn CacheClient>, config: StoreConfig) -> Self {
		Self { kind, cache, config }
	}

	pub(super) fn kind(&self) -> CredentialKind {
		self.kind
	}

	pub(super) fn key(&self, identifier: &CredentialId) -> String {
		self.kind.storage_key(self.config.key_layout, identifier)
	}

	pub(super) async fn load(
		&self,
		identifier: &str,
		context: &RequestContext,
	) -> Result<CredentialRecord, LoadFailure> {
		let span = OpSpan::new(self.kind, StoreOp::Load, Some(context));
		let lookup = async {
			let identifier = CredentialId::new(identifier)?;
			let bytes = self
				.cache
				.get(&self.key(&identifier))
				.await
				.map_err(LoadFailure::Backend)?
				.ok_or(LoadFailure::NotFound)?;

			decode_record(&bytes)
		};

		self.observed(StoreOp::Load, span.instrument(lookup))
			.await
			.inspect_err(|failure| obs::log_load_failure(self.kind, failure))
	}

	pub(super) async fn redeem(
		&self,
		identifier: &str,
		context: &RequestContext,
	) -> Result<CredentialRecord, LoadFailure> {
		let span = OpSpan::new(self.kind, StoreOp::Redeem, Some(context));
		let lookup = async {
			let identifier = CredentialId::new(identifier)?;
			let bytes = self
				.cache
				.take(&self.key(&identifier))
				.await
				.map_err(LoadFailure::Backend)?
				.ok_or(LoadFailure::NotFound)?;

			decode_record(&bytes)
		};

		self.observed(StoreOp::Redeem, span.instrument(lookup))
			.await
			.inspect_err(|failure| obs::log_load_failure(self.kind, failure))
	}

	pub(super) async fn save(
		&self,
		resource_owner: ResourceOwner,
		client: ClientIdentity,
		scopes: Scopes,
		context: &RequestContext,
	) -> Result<Issued> {
		let span = OpSpan::new(self.kind, StoreOp::Save, Some(context));
		let write = async move {
			let record = CredentialRecord::new(resource_owner, client, scopes);
			let value = serde_json::to_vec(&record).map_err(|e| CacheError::Serialization {
				message: format!("Failed to encode {} record: {e}", self.kind),
			})?;
			let identifier = CredentialId::generate();

			self.cache.set(&self.key(&identifier), value, self.config.ttl()).await?;

			Ok::<_, Error>(Issued { lifetime: self.config.lifetime, identifier })
		};

		self.observed(StoreOp::Save, span.instrument(write)).await
	}

	pub(super) async fn remove(&self, identifier: &str) -> Result<()> {
		let span = OpSpan::new(self.kind, StoreOp::Remove, None);
		let delete = async {
			let identifier = CredentialId::new(identifier)?;

			self.cache.delete(&self.key(&identifier)).await?;

			Ok::<_, Error>(())
		};

		self.observed(StoreOp::Remove, span.instrument(delete)).await
	}

	async fn observed<T, E, F>(&self, op: StoreOp, fut: F) -> Result<T, E>
	where
		F: Future<Output = Result<T, E>>,
	{
		obs::record_op_outcome(self.kind, op, OpOutcome::Attempt);

		let result = fut.await;
		let outcome = if result.is_ok() { OpOutcome::Success } else { OpOutcome::Failure };

		obs::record_op_outcome(self.kind, op, outcome);

		result
	}
}
impl Debug for CacheAdapter {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CacheAdapter")
			.field("kind", &self.kind)
			.field("config", &self.config)
			.finish_non_exhaustive()
	}
}

fn decode_record(bytes: &[u8]) -> Result<CredentialRecord, LoadFailure> {
	let mut deserializer = serde_json::Deserializer::from_slice(bytes);
	let record: CredentialRecord = serde_path_to_error::deserialize(&mut deserializer).map_err(
		|e| LoadFailure::Malformed { path: e.path().to_string(), message: e.inner().to_string() },
	)?;

	deserializer
		.end()
		.map_err(|e| LoadFailure::Malformed { path: ".".into(), message: e.to_string() })?;

	Ok(record)
}
