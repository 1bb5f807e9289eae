//! Shared fixtures for integration tests.

#![allow(dead_code)]

// std
use std::{future::Future, pin::Pin, sync::Arc};
// crates.io
use parking_lot::Mutex;
use serde_json::json;
use time::Duration;
// self
use oauth2_cache_store::{
	auth::{ClientIdentity, ResourceOwner, Scopes},
	cache::{CacheClient, CacheError, CacheFuture},
};

/// Cache whose every operation fails, recording the operation + key it was asked for.
#[derive(Clone, Debug, Default)]
pub struct FailingCache {
	pub calls: Arc<Mutex<Vec<(&'static str, String)>>>,
}
impl FailingCache {
	pub fn calls(&self) -> Vec<(&'static str, String)> {
		self.calls.lock().clone()
	}

	fn fail<T>(&self, op: &'static str, key: &str) -> CacheFuture<'_, T>
	where
		T: 'static + Send,
	{
		self.calls.lock().push((op, key.to_owned()));

		let future: Pin<Box<dyn Future<Output = Result<T, CacheError>> + Send>> =
			Box::pin(async { Err(CacheError::Backend { message: "connection reset".into() }) });

		future
	}
}
impl CacheClient for FailingCache {
	fn get<'a>(&'a self, key: &'a str) -> CacheFuture<'a, Option<Vec<u8>>> {
		self.fail("get", key)
	}

	fn set<'a>(&'a self, key: &'a str, _: Vec<u8>, _: Duration) -> CacheFuture<'a, ()> {
		self.fail("set", key)
	}

	fn delete<'a>(&'a self, key: &'a str) -> CacheFuture<'a, ()> {
		self.fail("delete", key)
	}

	fn take<'a>(&'a self, key: &'a str) -> CacheFuture<'a, Option<Vec<u8>>> {
		self.fail("take", key)
	}
}

pub fn grant(owner_id: &str, client_id: &str, scopes: &[&str]) -> (ResourceOwner, ClientIdentity, Scopes) {
	(
		ResourceOwner::from_value(json!({ "id": owner_id })),
		ClientIdentity::from_value(json!({ "id": client_id })),
		Scopes::new(scopes.iter().copied()).expect("Scope fixture should be valid."),
	)
}
